use boxwrap::layout::{DrawStep, plan_wrap};
use boxwrap::render::{Compositor, FloatingRegion, ImageId, RasterCompositor, SelectionOp};
use boxwrap::*;
use image::{DynamicImage, Rgba, RgbaImage, imageops};

// =============================================================================
// Recording compositor
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Create(String),
    Guide,
    Undo(ImageId, bool),
    Push,
    Pop,
    Select(ImageId, PixelRect),
    Clear(ImageId),
    Copy(ImageId),
    Anchor(ImageId, PixelRect),
    Fill(ImageId, Fill),
    Text(String),
    Display(ImageId),
    Flush,
    Message(String),
}

struct Floating(PixelRect);

impl FloatingRegion for Floating {
    fn bounds(&self) -> PixelRect {
        self.0
    }

    fn rotate(&mut self, rotation: Rotation) {
        if rotation.swaps_axes() {
            std::mem::swap(&mut self.0.width, &mut self.0.height);
        }
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.0.x += dx;
        self.0.y += dy;
    }
}

#[derive(Default)]
struct Recorder {
    sizes: Vec<SheetSize>,
    selection: Option<PixelRect>,
    calls: Vec<Call>,
    copies: usize,
    fail_copy: Option<usize>,
}

impl Recorder {
    fn with_template(size: SheetSize) -> (Self, ImageId) {
        let recorder = Recorder {
            sizes: vec![size],
            ..Default::default()
        };
        (recorder, ImageId(0))
    }

    fn created(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Create(_)))
            .count()
    }

    fn anchors_on(&self, image: ImageId) -> Vec<PixelRect> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Anchor(i, rect) if *i == image => Some(*rect),
                _ => None,
            })
            .collect()
    }

    fn messages(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Message(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Compositor for Recorder {
    type Clip = PixelRect;
    type Floating = Floating;

    fn create_image(&mut self, name: &str, size: SheetSize, _background: Fill) -> ImageId {
        self.sizes.push(size);
        self.calls.push(Call::Create(name.to_string()));
        ImageId(self.sizes.len() - 1)
    }

    fn image_size(&self, image: ImageId) -> Result<SheetSize> {
        self.sizes
            .get(image.0)
            .copied()
            .ok_or_else(|| BoxWrapError::Region("unknown image".into()))
    }

    fn add_vertical_guide(&mut self, _image: ImageId, _x: i32) -> Result<()> {
        self.calls.push(Call::Guide);
        Ok(())
    }

    fn add_horizontal_guide(&mut self, _image: ImageId, _y: i32) -> Result<()> {
        self.calls.push(Call::Guide);
        Ok(())
    }

    fn set_undo_enabled(&mut self, image: ImageId, enabled: bool) {
        self.calls.push(Call::Undo(image, enabled));
    }

    fn push_context(&mut self) {
        self.calls.push(Call::Push);
    }

    fn pop_context(&mut self) {
        self.calls.push(Call::Pop);
    }

    fn select_rectangle(&mut self, image: ImageId, rect: PixelRect, _op: SelectionOp) -> Result<()> {
        self.selection = Some(rect);
        self.calls.push(Call::Select(image, rect));
        Ok(())
    }

    fn clear_selection(&mut self, image: ImageId) {
        self.selection = None;
        self.calls.push(Call::Clear(image));
    }

    fn copy_visible(&mut self, image: ImageId) -> Result<PixelRect> {
        self.calls.push(Call::Copy(image));
        self.copies += 1;
        if self.fail_copy == Some(self.copies) {
            return Err(BoxWrapError::Region("copy failed".into()));
        }
        self.selection
            .ok_or_else(|| BoxWrapError::Region("nothing selected".into()))
    }

    fn paste_as_floating(&mut self, _image: ImageId, clip: PixelRect) -> Result<Floating> {
        Ok(Floating(PixelRect::new(0, 0, clip.width, clip.height)))
    }

    fn anchor_floating(&mut self, image: ImageId, floating: Floating) -> Result<()> {
        self.calls.push(Call::Anchor(image, floating.0));
        Ok(())
    }

    fn fill_selection(&mut self, image: ImageId, fill: Fill) -> Result<()> {
        self.calls.push(Call::Fill(image, fill));
        Ok(())
    }

    fn text_layer(&mut self, _image: ImageId, text: &str, font_size: f32) -> Result<Floating> {
        self.calls.push(Call::Text(text.to_string()));
        let width = (text.len() as f32 * font_size) as i32;
        Ok(Floating(PixelRect::new(0, 0, width, font_size as i32)))
    }

    fn display(&mut self, image: ImageId) {
        self.calls.push(Call::Display(image));
    }

    fn flush_displays(&mut self) {
        self.calls.push(Call::Flush);
    }

    fn message(&mut self, text: &str) {
        self.calls.push(Call::Message(text.to_string()));
    }
}

fn reference_template_size() -> SheetSize {
    SheetSize::new(4134, 3590)
}

// =============================================================================
// Wrap building
// =============================================================================

#[test]
fn test_size_mismatch_aborts_before_drawing() {
    let (mut recorder, template) = Recorder::with_template(SheetSize::new(4000, 3590));

    let result = build_wraps(&mut recorder, template, &WrapOptions::default());

    match result {
        Err(BoxWrapError::SizeMismatch { expected, actual }) => {
            assert_eq!(expected, reference_template_size());
            assert_eq!(actual, SheetSize::new(4000, 3590));
        }
        other => panic!("Expected SizeMismatch, got {:?}", other),
    }
    assert!(recorder.calls.is_empty());
}

#[test]
fn test_size_mismatch_message_lists_both_sizes() {
    let err = BoxWrapError::SizeMismatch {
        expected: reference_template_size(),
        actual: SheetSize::new(4000, 3590),
    };
    let msg = err.to_string();
    assert!(msg.contains("4134px x 3590px"));
    assert!(msg.contains("4000px x 3590px"));
    // Millimeters are truncated to whole numbers
    assert!(msg.contains("4134px x 3590px (350mm x 303mm)"));
    assert!(msg.contains("(338mm x 303mm)"));
}

fn degenerate_run(box_size: BoxSizeMm) -> (Recorder, [ImageId; 2]) {
    let options = WrapOptions {
        box_size,
        ..Default::default()
    };
    assert!(options.validate().is_ok());
    let expected = layout::template_coordinates(&options.box_size.to_pixels());
    let (mut recorder, template) =
        Recorder::with_template(layout::CoordinateGrid::size(&expected));

    let images = build_wraps(&mut recorder, template, &options).unwrap();
    (recorder, images)
}

#[test]
fn test_shallow_box_is_reported_and_drawn() {
    // Depth below two flap widths folds y6 back past y5
    let (recorder, [top, bottom]) = degenerate_run(BoxSizeMm::new(75.0, 104.0, 15.0));

    let messages = recorder.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("Wrap top"));
    assert!(messages[1].starts_with("Wrap bottom"));
    assert!(messages.iter().all(|m| m.contains("y-axis") && m.contains("index 6")));

    // The report comes before any sheet exists
    let first_message = recorder
        .calls
        .iter()
        .position(|c| matches!(c, Call::Message(_)))
        .unwrap();
    let first_create = recorder
        .calls
        .iter()
        .position(|c| matches!(c, Call::Create(_)))
        .unwrap();
    assert!(first_message < first_create);

    assert_eq!(recorder.created(), 2);
    for image in [top, bottom] {
        assert_eq!(recorder.anchors_on(image).len(), 9);
        assert!(recorder.calls.contains(&Call::Display(image)));
    }
}

#[test]
fn test_flat_box_is_reported_and_drawn() {
    // Half the height equals the flap size
    let (recorder, [top, bottom]) = degenerate_run(BoxSizeMm::new(75.0, 20.0, 100.0));

    let messages = recorder.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| m.contains("x-axis") && m.contains("index 4")));
    assert!(recorder.calls.contains(&Call::Display(top)));
    assert!(recorder.calls.contains(&Call::Display(bottom)));
}

#[test]
fn test_invalid_options_abort_before_drawing() {
    let options = WrapOptions {
        thickness_mm: 0.1,
        ..Default::default()
    };
    let (mut recorder, template) = Recorder::with_template(reference_template_size());

    assert!(matches!(
        build_wraps(&mut recorder, template, &options),
        Err(BoxWrapError::Config(_))
    ));
    assert!(recorder.calls.is_empty());
}

#[test]
fn test_wraps_follow_the_plan_in_order() {
    let options = WrapOptions::default();
    let (mut recorder, template) = Recorder::with_template(reference_template_size());

    let [top, bottom] = build_wraps(&mut recorder, template, &options).unwrap();
    assert_eq!(recorder.created(), 2);
    assert!(recorder.messages().is_empty());

    let dims = options.box_size.to_pixels();
    let material = options.material();
    for (image, half) in [(top, WrapHalf::Top), (bottom, WrapHalf::Bottom)] {
        let plan = plan_wrap(half, &dims, &material);
        let expected: Vec<PixelRect> = plan
            .steps()
            .iter()
            .filter_map(|step| match step {
                DrawStep::CopyFromTemplate(p) | DrawStep::CopyWithinSheet(p) => {
                    Some(p.destination())
                }
                DrawStep::FillRect(_) => None,
            })
            .collect();
        assert_eq!(recorder.anchors_on(image), expected, "{:?}", half);
    }
}

#[test]
fn test_flaps_copy_from_the_sheet_after_primaries() {
    let (mut recorder, template) = Recorder::with_template(reference_template_size());
    let [top, _] = build_wraps(&mut recorder, template, &WrapOptions::default()).unwrap();

    let sources: Vec<ImageId> = recorder
        .calls
        .iter()
        .skip_while(|c| **c != Call::Create("Wrap top".into()))
        .take_while(|c| !matches!(c, Call::Display(_)))
        .filter_map(|c| match c {
            Call::Copy(image) => Some(*image),
            _ => None,
        })
        .collect();

    assert_eq!(sources.len(), 9);
    assert!(sources[..5].iter().all(|&s| s == template));
    assert!(sources[5..].iter().all(|&s| s == top));
}

#[test]
fn test_each_sheet_gets_twenty_mark_fills() {
    let (mut recorder, template) = Recorder::with_template(reference_template_size());
    let [top, bottom] = build_wraps(&mut recorder, template, &WrapOptions::default()).unwrap();

    for image in [top, bottom] {
        let fills = recorder
            .calls
            .iter()
            .filter(|c| **c == Call::Fill(image, Fill::Foreground))
            .count();
        assert_eq!(fills, 20);
    }
}

#[test]
fn test_guards_restore_state() {
    let (mut recorder, template) = Recorder::with_template(reference_template_size());
    let [top, bottom] = build_wraps(&mut recorder, template, &WrapOptions::default()).unwrap();

    let pushes = recorder.calls.iter().filter(|c| **c == Call::Push).count();
    let pops = recorder.calls.iter().filter(|c| **c == Call::Pop).count();
    assert_eq!(pushes, pops);
    assert_eq!(recorder.calls.last(), Some(&Call::Pop));

    for image in [top, bottom] {
        let undo: Vec<bool> = recorder
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Undo(i, enabled) if *i == image => Some(*enabled),
                _ => None,
            })
            .collect();
        assert_eq!(undo, vec![false, true]);
    }
}

#[test]
fn test_failed_step_is_reported_and_skipped() {
    let (mut recorder, template) = Recorder::with_template(reference_template_size());
    recorder.fail_copy = Some(2);

    let [top, bottom] = build_wraps(&mut recorder, template, &WrapOptions::default()).unwrap();

    let messages = recorder.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("step 2"));
    assert!(messages[0].contains("copy failed"));

    // The failed placement is missing, everything after it was still drawn
    assert_eq!(recorder.anchors_on(top).len(), 8);
    assert_eq!(recorder.anchors_on(bottom).len(), 9);
    assert!(recorder.calls.contains(&Call::Display(bottom)));
}

// =============================================================================
// Template building
// =============================================================================

#[test]
fn test_template_labels_and_artwork() {
    let mut recorder = Recorder::default();
    let image = build_template(&mut recorder, &TemplateOptions::default()).unwrap();

    assert_eq!(recorder.image_size(image).unwrap(), reference_template_size());

    let labels: Vec<&str> = recorder
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::Text(t) => Some(t.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels.len(), 7);
    assert_eq!(&labels[..6], &["TOP", "LEFT", "FRONT", "RIGHT", "BACK", "BOTTOM"]);
    assert!(labels[6].starts_with("Box width: 75mm (886px)"));

    assert!(recorder.calls.contains(&Call::Fill(image, Fill::White)));
    let guides = recorder.calls.iter().filter(|c| **c == Call::Guide).count();
    assert_eq!(guides, 10);
}

// =============================================================================
// Raster end to end
// =============================================================================

fn small_wrap_options() -> WrapOptions {
    WrapOptions {
        box_size: BoxSizeMm::new(10.0, 10.0, 10.0),
        thickness_mm: 0.5,
        flap_size_mm: 1.0,
        inside_size_mm: 1.0,
        crop_mark_size_mm: 1.0,
        crop_mark_distance_mm: 0.0,
    }
}

/// Every pixel encodes its own position
fn position_template(size: SheetSize) -> RgbaImage {
    RgbaImage::from_fn(size.width, size.height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, (x / 256 + y / 256 * 16) as u8, 255])
    })
}

#[tokio::test]
async fn test_raster_wraps_copy_faces() {
    let options = small_wrap_options();
    let dims = options.box_size.to_pixels();
    let size = layout::CoordinateGrid::size(&layout::template_coordinates(&dims));
    let template = position_template(size);

    let (top, bottom) = create_wraps(DynamicImage::ImageRgba8(template.clone()), &options)
        .await
        .unwrap();
    assert!(matches!(top, DynamicImage::ImageRgb8(_)));
    let (top, bottom) = (top.to_rgba8(), bottom.to_rgba8());

    let grid = layout::wrap_coordinates(&dims, &options.material());
    assert_eq!(top.dimensions(), (grid.xs[11] as u32, grid.ys[11] as u32));

    // TOP and BOTTOM faces are copied unrotated onto (x5, y4)
    let (x5, y4) = (grid.xs[5] as u32, grid.ys[4] as u32);
    let t = layout::template_coordinates(&dims);
    for (dx, dy) in [(0, 0), (50, 20), (dims.width as u32 - 1, dims.depth as u32 - 1)] {
        assert_eq!(
            top.get_pixel(x5 + dx, y4 + dy),
            template.get_pixel(t.xs[1] as u32 + dx, t.ys[0] as u32 + dy)
        );
        assert_eq!(
            bottom.get_pixel(x5 + dx, y4 + dy),
            template.get_pixel(t.xs[1] as u32 + dx, t.ys[3] as u32 + dy)
        );
    }
}

#[tokio::test]
async fn test_raster_flap_is_cut_from_the_sheet() {
    let options = small_wrap_options();
    let dims = options.box_size.to_pixels();
    let material = options.material();
    let size = layout::CoordinateGrid::size(&layout::template_coordinates(&dims));

    let (top, _) = create_wraps(DynamicImage::ImageRgba8(position_template(size)), &options)
        .await
        .unwrap();
    let top = top.to_rgba8();

    let grid = layout::wrap_coordinates(&dims, &material);
    let extra = layout::half_height_plus_extra(&dims, &material);
    let (x1, x5, y4) = (grid.xs[1] as u32, grid.xs[5] as u32, grid.ys[4] as u32);
    let flap = material.flap_size as u32;

    let strip = imageops::crop_imm(&top, x1, y4, extra as u32, flap).to_image();
    let expected = imageops::rotate90(&strip);
    let placed = imageops::crop_imm(&top, x5 - flap, y4 - extra as u32, flap, extra as u32).to_image();

    assert_eq!(placed, expected);
}

#[test]
fn test_raster_shallow_box_draws_every_step() {
    let options = WrapOptions {
        box_size: BoxSizeMm::new(75.0, 104.0, 15.0),
        ..Default::default()
    };
    let dims = options.box_size.to_pixels();
    let size = layout::CoordinateGrid::size(&layout::template_coordinates(&dims));

    let mut compositor = RasterCompositor::new();
    let template = compositor.create_image("template", size, Fill::White);
    let [top, bottom] = build_wraps(&mut compositor, template, &options).unwrap();

    // Only the two grid reports, no skipped steps
    assert_eq!(compositor.messages().len(), 2);
    assert!(compositor.messages().iter().all(|m| !m.contains("skipped")));
    assert!(compositor.is_displayed(top).unwrap());
    assert!(compositor.is_displayed(bottom).unwrap());
}

#[test]
fn test_raster_template_sheet() {
    let mut compositor = RasterCompositor::new();
    let options = TemplateOptions {
        box_size: BoxSizeMm::new(10.0, 10.0, 10.0),
    };
    let image = build_template(&mut compositor, &options).unwrap();

    assert_eq!(compositor.context_depth(), 0);
    assert!(compositor.undo_enabled(image).unwrap());
    assert!(compositor.is_displayed(image).unwrap());
    let (vertical, horizontal) = compositor.guides(image).unwrap();
    assert_eq!(vertical, &[0, 118, 236, 354, 472]);
    assert_eq!(horizontal, &[0, 118, 177, 236, 354]);

    let pixels = compositor.pixels(image).unwrap();
    assert_eq!(pixels.dimensions(), (472, 354));
    // Corner cells outside the cross stay transparent
    assert_eq!(pixels.get_pixel(471, 353).0[3], 0);
    // Artwork areas are opaque white
    assert_eq!(*pixels.get_pixel(120, 232), Rgba([255, 255, 255, 255]));
}
