//! Layout data types for box wraps
//!
//! These types represent the intermediate layout calculations between
//! the coordinate grids and the compositing backend.

use crate::marks::CropMark;
use crate::types::{BoxWrapError, Corner, Face, PixelRect, Point, Result, Rotation, SheetSize, WrapHalf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered breakpoints along both axes of a sheet
pub trait CoordinateGrid {
    fn xs(&self) -> &[i32];
    fn ys(&self) -> &[i32];

    /// Sheet size spanned by the first and last breakpoint
    fn size(&self) -> SheetSize {
        let span = |axis: &[i32]| match (axis.first(), axis.last()) {
            (Some(first), Some(last)) => (last - first).max(0) as u32,
            _ => 0,
        };
        SheetSize::new(span(self.xs()), span(self.ys()))
    }

    /// Check that every consecutive pair of breakpoints is strictly increasing.
    ///
    /// The generators do not enforce this themselves: a flap wider than half
    /// the box height plus the cardboard thickness folds `x4` back past `x3`.
    fn check_increasing(&self) -> Result<()> {
        check_axis('x', self.xs())?;
        check_axis('y', self.ys())
    }
}

fn check_axis(axis: char, breakpoints: &[i32]) -> Result<()> {
    for (index, pair) in breakpoints.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(BoxWrapError::DegenerateGrid {
                axis,
                index: index + 1,
                previous: pair[0],
                value: pair[1],
            });
        }
    }
    Ok(())
}

/// Breakpoints of the cross-shaped template sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TemplateGrid {
    pub xs: [i32; 5],
    pub ys: [i32; 5],
}

impl CoordinateGrid for TemplateGrid {
    fn xs(&self) -> &[i32] {
        &self.xs
    }

    fn ys(&self) -> &[i32] {
        &self.ys
    }
}

/// Breakpoints of a wrap sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WrapGrid {
    pub xs: [i32; 12],
    pub ys: [i32; 12],
}

impl CoordinateGrid for WrapGrid {
    fn xs(&self) -> &[i32] {
        &self.xs
    }

    fn ys(&self) -> &[i32] {
        &self.ys
    }
}

/// Copy a rectangle, rotate it, then move one of its corners onto a point.
///
/// Rotation happens before anchoring, so for quarter turns the anchored
/// bounding box is `src.height` wide and `src.width` tall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelPlacement {
    /// Face this placement transfers (None for flaps)
    pub face: Option<Face>,
    pub src: PixelRect,
    pub anchor: Point,
    pub corner: Corner,
    pub rotation: Rotation,
}

impl PanelPlacement {
    /// Where the pasted region ends up on the destination sheet
    pub fn destination(&self) -> PixelRect {
        let (width, height) = if self.rotation.swaps_axes() {
            (self.src.height, self.src.width)
        } else {
            (self.src.width, self.src.height)
        };
        let unplaced = PixelRect::new(0, 0, width, height);
        let (dx, dy) = self.corner.offset_to(&unplaced, self.anchor);
        PixelRect::new(dx, dy, width, height)
    }
}

/// A line of text centered on a point
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextLabel {
    pub text: String,
    pub center: Point,
}

/// Everything needed to draw the empty template sheet
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TemplatePlan {
    pub grid: TemplateGrid,
    pub size: SheetSize,
    /// Areas filled with white where artwork goes
    pub artwork_regions: Vec<PixelRect>,
    pub labels: Vec<TextLabel>,
}

/// One drawing operation handed to the compositing backend
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DrawStep {
    /// Copy a region of the template onto the sheet
    CopyFromTemplate(PanelPlacement),
    /// Copy a region of the sheet onto itself
    CopyWithinSheet(PanelPlacement),
    /// Fill a rectangle with the foreground color
    FillRect(PixelRect),
}

/// Everything needed to draw one wrap sheet.
///
/// The phases are ordered: `flaps` read pixels that `primary` wrote, and
/// `marks` are drawn over both.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WrapPlan {
    pub half: WrapHalf,
    pub grid: WrapGrid,
    pub size: SheetSize,
    /// Face transfers from the template
    pub primary: Vec<PanelPlacement>,
    /// Flap strips copied within the sheet after every primary placement
    pub flaps: Vec<PanelPlacement>,
    pub marks: Vec<CropMark>,
}

impl WrapPlan {
    /// Flatten the plan into the order the backend must execute it
    pub fn steps(&self) -> Vec<DrawStep> {
        let primary = self.primary.iter().copied().map(DrawStep::CopyFromTemplate);
        let flaps = self.flaps.iter().copied().map(DrawStep::CopyWithinSheet);
        let marks = self
            .marks
            .iter()
            .flat_map(CropMark::rectangles)
            .map(DrawStep::FillRect);
        primary.chain(flaps).chain(marks).collect()
    }
}
