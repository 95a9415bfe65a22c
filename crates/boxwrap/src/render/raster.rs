//! In-memory raster compositor
//!
//! Every image is a single RGBA layer. Opaque sheets (wraps) are created
//! on a white background and exported as RGB; transparent sheets
//! (templates) keep their alpha channel.

use image::{DynamicImage, Rgba, RgbaImage, imageops};
use log::{debug, info, warn};

use crate::types::*;

use super::text::TextRenderer;
use super::{Compositor, FloatingRegion, ImageId, SelectionOp};

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Drawing state saved by `push_context`
#[derive(Debug, Clone, Copy)]
struct DrawingContext {
    foreground: Rgba<u8>,
}

impl Default for DrawingContext {
    fn default() -> Self {
        Self { foreground: BLACK }
    }
}

struct Sheet {
    name: String,
    pixels: RgbaImage,
    opaque: bool,
    vertical_guides: Vec<i32>,
    horizontal_guides: Vec<i32>,
    selection: Vec<PixelRect>,
    undo_enabled: bool,
    displayed: bool,
}

/// Pasted pixels positioned on a sheet
#[derive(Debug, Clone)]
pub struct RasterFloating {
    pixels: RgbaImage,
    x: i32,
    y: i32,
}

impl RasterFloating {
    pub fn new(pixels: RgbaImage, x: i32, y: i32) -> Self {
        Self { pixels, x, y }
    }
}

impl FloatingRegion for RasterFloating {
    fn bounds(&self) -> PixelRect {
        PixelRect::new(
            self.x,
            self.y,
            self.pixels.width() as i32,
            self.pixels.height() as i32,
        )
    }

    fn rotate(&mut self, rotation: Rotation) {
        self.pixels = match rotation {
            Rotation::None => return,
            Rotation::Clockwise90 => imageops::rotate90(&self.pixels),
            Rotation::Clockwise180 => imageops::rotate180(&self.pixels),
            Rotation::Clockwise270 => imageops::rotate270(&self.pixels),
        };
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }
}

/// Compositor that keeps every image in memory
pub struct RasterCompositor {
    sheets: Vec<Option<Sheet>>,
    contexts: Vec<DrawingContext>,
    context: DrawingContext,
    text: TextRenderer,
    messages: Vec<String>,
}

impl Default for RasterCompositor {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterCompositor {
    pub fn new() -> Self {
        Self {
            sheets: Vec::new(),
            contexts: Vec::new(),
            context: DrawingContext::default(),
            text: TextRenderer::new(),
            messages: Vec::new(),
        }
    }

    /// Register an existing picture, e.g. a template loaded from disk
    pub fn add_image(&mut self, name: &str, picture: &DynamicImage) -> ImageId {
        let opaque = !picture.color().has_alpha();
        self.push_sheet(name, picture.to_rgba8(), opaque)
    }

    /// Remove an image from the compositor and return its pixels
    pub fn take_image(&mut self, image: ImageId) -> Result<DynamicImage> {
        let sheet = self
            .sheets
            .get_mut(image.0)
            .and_then(Option::take)
            .ok_or_else(|| unknown_image(image))?;
        let picture = DynamicImage::ImageRgba8(sheet.pixels);
        Ok(if sheet.opaque {
            DynamicImage::ImageRgb8(picture.to_rgb8())
        } else {
            picture
        })
    }

    /// Borrow the pixels of an image
    pub fn pixels(&self, image: ImageId) -> Result<&RgbaImage> {
        self.sheet(image).map(|s| &s.pixels)
    }

    pub fn guides(&self, image: ImageId) -> Result<(&[i32], &[i32])> {
        self.sheet(image)
            .map(|s| (s.vertical_guides.as_slice(), s.horizontal_guides.as_slice()))
    }

    pub fn undo_enabled(&self, image: ImageId) -> Result<bool> {
        self.sheet(image).map(|s| s.undo_enabled)
    }

    pub fn is_displayed(&self, image: ImageId) -> Result<bool> {
        self.sheet(image).map(|s| s.displayed)
    }

    /// Depth of the drawing context stack
    pub fn context_depth(&self) -> usize {
        self.contexts.len()
    }

    pub fn set_foreground(&mut self, color: Rgba<u8>) {
        self.context.foreground = color;
    }

    /// Everything reported through `message`
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    fn push_sheet(&mut self, name: &str, pixels: RgbaImage, opaque: bool) -> ImageId {
        let id = ImageId(self.sheets.len());
        debug!(
            "Created image {:?} '{}' ({}x{})",
            id,
            name,
            pixels.width(),
            pixels.height()
        );
        self.sheets.push(Some(Sheet {
            name: name.to_string(),
            pixels,
            opaque,
            vertical_guides: Vec::new(),
            horizontal_guides: Vec::new(),
            selection: Vec::new(),
            undo_enabled: true,
            displayed: false,
        }));
        id
    }

    fn sheet(&self, image: ImageId) -> Result<&Sheet> {
        self.sheets
            .get(image.0)
            .and_then(Option::as_ref)
            .ok_or_else(|| unknown_image(image))
    }

    fn sheet_mut(&mut self, image: ImageId) -> Result<&mut Sheet> {
        self.sheets
            .get_mut(image.0)
            .and_then(Option::as_mut)
            .ok_or_else(|| unknown_image(image))
    }
}

fn unknown_image(image: ImageId) -> BoxWrapError {
    BoxWrapError::Region(format!("Unknown image {:?}", image))
}

fn size_of(pixels: &RgbaImage) -> SheetSize {
    SheetSize::new(pixels.width(), pixels.height())
}

/// Bounding box of all selected rectangles
fn selection_bounds(selection: &[PixelRect]) -> Option<PixelRect> {
    let first = *selection.first()?;
    Some(selection.iter().skip(1).fold(first, |acc, r| {
        PixelRect::from_edges(
            acc.x.min(r.x),
            acc.y.min(r.y),
            acc.right().max(r.right()),
            acc.bottom().max(r.bottom()),
        )
    }))
}

/// Clip a rectangle to the sheet, returning (x, y, width, height) in pixels
fn clip_to(rect: &PixelRect, size: SheetSize) -> Option<(u32, u32, u32, u32)> {
    let left = rect.x.max(0);
    let top = rect.y.max(0);
    let right = i64::from(rect.right()).min(i64::from(size.width));
    let bottom = i64::from(rect.bottom()).min(i64::from(size.height));
    if i64::from(left) >= right || i64::from(top) >= bottom {
        return None;
    }
    Some((
        left as u32,
        top as u32,
        (right - i64::from(left)) as u32,
        (bottom - i64::from(top)) as u32,
    ))
}

impl Compositor for RasterCompositor {
    type Clip = RgbaImage;
    type Floating = RasterFloating;

    fn create_image(&mut self, name: &str, size: SheetSize, background: Fill) -> ImageId {
        let (color, opaque) = match background {
            Fill::Foreground => (self.context.foreground, true),
            Fill::White => (WHITE, true),
            Fill::Transparent => (CLEAR, false),
        };
        let pixels = RgbaImage::from_pixel(size.width, size.height, color);
        self.push_sheet(name, pixels, opaque)
    }

    fn image_size(&self, image: ImageId) -> Result<SheetSize> {
        self.sheet(image).map(|s| size_of(&s.pixels))
    }

    fn add_vertical_guide(&mut self, image: ImageId, x: i32) -> Result<()> {
        self.sheet_mut(image)?.vertical_guides.push(x);
        Ok(())
    }

    fn add_horizontal_guide(&mut self, image: ImageId, y: i32) -> Result<()> {
        self.sheet_mut(image)?.horizontal_guides.push(y);
        Ok(())
    }

    fn set_undo_enabled(&mut self, image: ImageId, enabled: bool) {
        match self.sheet_mut(image) {
            Ok(sheet) => sheet.undo_enabled = enabled,
            Err(e) => warn!("{}", e),
        }
    }

    fn push_context(&mut self) {
        self.contexts.push(self.context);
        self.context = DrawingContext::default();
    }

    fn pop_context(&mut self) {
        match self.contexts.pop() {
            Some(saved) => self.context = saved,
            None => warn!("Drawing context popped without a matching push"),
        }
    }

    fn select_rectangle(&mut self, image: ImageId, rect: PixelRect, op: SelectionOp) -> Result<()> {
        let sheet = self.sheet_mut(image)?;
        if op == SelectionOp::Replace {
            sheet.selection.clear();
        }
        if !rect.is_empty() {
            sheet.selection.push(rect);
        }
        Ok(())
    }

    fn clear_selection(&mut self, image: ImageId) {
        if let Ok(sheet) = self.sheet_mut(image) {
            sheet.selection.clear();
        }
    }

    fn copy_visible(&mut self, image: ImageId) -> Result<RgbaImage> {
        let sheet = self.sheet(image)?;
        let bounds = selection_bounds(&sheet.selection)
            .ok_or_else(|| BoxWrapError::Region(format!("Nothing selected in '{}'", sheet.name)))?;
        if !bounds.fits_within(size_of(&sheet.pixels)) {
            return Err(BoxWrapError::Region(format!(
                "Selection {:?} leaves '{}' ({})",
                bounds,
                sheet.name,
                size_of(&sheet.pixels)
            )));
        }

        let mut clip = RgbaImage::new(bounds.width as u32, bounds.height as u32);
        for rect in &sheet.selection {
            let part = imageops::crop_imm(
                &sheet.pixels,
                rect.x as u32,
                rect.y as u32,
                rect.width as u32,
                rect.height as u32,
            )
            .to_image();
            imageops::replace(
                &mut clip,
                &part,
                i64::from(rect.x - bounds.x),
                i64::from(rect.y - bounds.y),
            );
        }
        Ok(clip)
    }

    fn paste_as_floating(&mut self, image: ImageId, clip: RgbaImage) -> Result<RasterFloating> {
        self.sheet(image)?;
        Ok(RasterFloating::new(clip, 0, 0))
    }

    fn anchor_floating(&mut self, image: ImageId, floating: RasterFloating) -> Result<()> {
        let sheet = self.sheet_mut(image)?;
        imageops::overlay(
            &mut sheet.pixels,
            &floating.pixels,
            i64::from(floating.x),
            i64::from(floating.y),
        );
        Ok(())
    }

    fn fill_selection(&mut self, image: ImageId, fill: Fill) -> Result<()> {
        let color = match fill {
            Fill::Foreground => self.context.foreground,
            Fill::White => WHITE,
            Fill::Transparent => CLEAR,
        };
        let sheet = self.sheet_mut(image)?;
        let size = size_of(&sheet.pixels);
        for rect in &sheet.selection {
            let Some((x, y, width, height)) = clip_to(rect, size) else {
                continue;
            };
            for py in y..y + height {
                for px in x..x + width {
                    sheet.pixels.put_pixel(px, py, color);
                }
            }
        }
        Ok(())
    }

    fn text_layer(&mut self, image: ImageId, text: &str, font_size: f32) -> Result<RasterFloating> {
        self.sheet(image)?;
        let pixels = self.text.render(text, font_size, self.context.foreground)?;
        if pixels.width() == 0 {
            warn!("Label {:?} rendered without any visible pixels", text);
        }
        Ok(RasterFloating::new(pixels, 0, 0))
    }

    fn display(&mut self, image: ImageId) {
        match self.sheet_mut(image) {
            Ok(sheet) => sheet.displayed = true,
            Err(e) => warn!("{}", e),
        }
    }

    fn flush_displays(&mut self) {
        for sheet in self.sheets.iter().flatten().filter(|s| s.displayed) {
            info!(
                "Sheet '{}' ready ({}x{})",
                sheet.name,
                sheet.pixels.width(),
                sheet.pixels.height()
            );
        }
    }

    fn message(&mut self, text: &str) {
        warn!("{}", text);
        self.messages.push(text.to_string());
    }
}
