//! Compositing backend interface and the operations built on top of it
//!
//! This module handles everything that touches pixels:
//! - The `Compositor` trait every backend implements
//! - Anchoring, copy-and-rotate and crop mark drawing, written once against
//!   the trait so every backend places regions identically
//! - Scoped guards for undo history and drawing context
//! - An in-memory raster backend

mod guard;
mod raster;
mod text;

pub use guard::{DefaultContext, PausedUndo};
pub use raster::{RasterCompositor, RasterFloating};
pub use text::TextRenderer;

use crate::layout::PanelPlacement;
use crate::types::*;

/// Handle to an image owned by a compositor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub usize);

/// How a new rectangle combines with the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOp {
    Replace,
    Add,
}

/// A pasted region that can still be moved before it is anchored
pub trait FloatingRegion {
    /// Current bounds on the target image
    fn bounds(&self) -> PixelRect;
    /// Rotate clockwise in place; quarter turns swap width and height
    fn rotate(&mut self, rotation: Rotation);
    fn translate(&mut self, dx: i32, dy: i32);
}

/// Capabilities the builders need from a compositing engine
pub trait Compositor {
    /// Pixels copied out of an image
    type Clip;
    type Floating: FloatingRegion;

    fn create_image(&mut self, name: &str, size: SheetSize, background: Fill) -> ImageId;
    fn image_size(&self, image: ImageId) -> Result<SheetSize>;

    fn add_vertical_guide(&mut self, image: ImageId, x: i32) -> Result<()>;
    fn add_horizontal_guide(&mut self, image: ImageId, y: i32) -> Result<()>;

    fn set_undo_enabled(&mut self, image: ImageId, enabled: bool);
    /// Save the drawing state and reset it to defaults
    fn push_context(&mut self);
    /// Restore the drawing state saved by the matching `push_context`
    fn pop_context(&mut self);

    fn select_rectangle(&mut self, image: ImageId, rect: PixelRect, op: SelectionOp) -> Result<()>;
    fn clear_selection(&mut self, image: ImageId);
    /// Copy the visible pixels inside the current selection
    fn copy_visible(&mut self, image: ImageId) -> Result<Self::Clip>;
    fn paste_as_floating(&mut self, image: ImageId, clip: Self::Clip) -> Result<Self::Floating>;
    /// Composite a floating region onto its image
    fn anchor_floating(&mut self, image: ImageId, floating: Self::Floating) -> Result<()>;
    fn fill_selection(&mut self, image: ImageId, fill: Fill) -> Result<()>;

    /// Render text in the foreground color as a floating region
    fn text_layer(&mut self, image: ImageId, text: &str, font_size: f32) -> Result<Self::Floating>;

    fn display(&mut self, image: ImageId);
    fn flush_displays(&mut self);
    /// Report a problem to the user without aborting
    fn message(&mut self, text: &str);
}

// =============================================================================
// Operations
// =============================================================================

/// Move a floating region so that `corner` of its bounds lands on `target`
pub fn move_to_anchor<F: FloatingRegion>(floating: &mut F, corner: Corner, target: Point) {
    let (dx, dy) = corner.offset_to(&floating.bounds(), target);
    floating.translate(dx, dy);
}

/// Copy a rectangle from one image to another while rotating it.
///
/// `src` and `dst` may be the same image; the copy is taken before anything
/// is pasted.
pub fn copy_and_rotate<C: Compositor + ?Sized>(
    compositor: &mut C,
    src: ImageId,
    dst: ImageId,
    placement: &PanelPlacement,
) -> Result<()> {
    compositor.select_rectangle(src, placement.src, SelectionOp::Replace)?;
    let clip = compositor.copy_visible(src);
    compositor.clear_selection(src);

    let mut floating = compositor.paste_as_floating(dst, clip?)?;
    if placement.rotation != Rotation::None {
        floating.rotate(placement.rotation);
    }
    move_to_anchor(&mut floating, placement.corner, placement.anchor);
    compositor.anchor_floating(dst, floating)
}

/// Fill a rectangle with the foreground color
pub fn fill_rect<C: Compositor + ?Sized>(
    compositor: &mut C,
    image: ImageId,
    rect: PixelRect,
) -> Result<()> {
    compositor.select_rectangle(image, rect, SelectionOp::Replace)?;
    let filled = compositor.fill_selection(image, Fill::Foreground);
    compositor.clear_selection(image);
    filled
}

/// Render text and composite it centered on `center`
pub fn place_text_centered<C: Compositor + ?Sized>(
    compositor: &mut C,
    image: ImageId,
    text: &str,
    font_size: f32,
    center: Point,
) -> Result<()> {
    let mut layer = compositor.text_layer(image, text, font_size)?;
    move_to_anchor(&mut layer, Corner::Center, center);
    compositor.anchor_floating(image, layer)
}

/// Add a guide at every breakpoint
pub fn add_guides<C: Compositor + ?Sized>(
    compositor: &mut C,
    image: ImageId,
    xs: &[i32],
    ys: &[i32],
) -> Result<()> {
    for &x in xs {
        compositor.add_vertical_guide(image, x)?;
    }
    for &y in ys {
        compositor.add_horizontal_guide(image, y)?;
    }
    Ok(())
}
