//! Crop marks for wrap sheets
//!
//! A crop mark is one or two short ticks next to a point where the sheet
//! must be cut or folded. Each tick is a thin filled rectangle set off from
//! the point by the crop mark distance.

use crate::constants::CROP_MARK_THICKNESS;
use crate::layout::WrapGrid;
use crate::types::{Direction, MaterialParams, PixelRect, Point};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ticks drawn around one anchor point
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CropMark {
    pub anchor: Point,
    pub directions: Vec<Direction>,
    /// Tick length
    pub size: i32,
    /// Gap between the anchor and the tick
    pub distance: i32,
}

impl CropMark {
    pub fn new(anchor: Point, directions: &[Direction], size: i32, distance: i32) -> Self {
        Self {
            anchor,
            directions: directions.to_vec(),
            size,
            distance,
        }
    }

    /// One rectangle per direction, in direction order
    pub fn rectangles(&self) -> Vec<PixelRect> {
        self.directions
            .iter()
            .map(|&direction| tick(self.anchor, direction, self.size, self.distance))
            .collect()
    }
}

/// Rectangle of a single tick pointing away from `anchor`
pub fn tick(anchor: Point, direction: Direction, size: i32, distance: i32) -> PixelRect {
    let Point { x: x0, y: y0 } = anchor;
    let half = CROP_MARK_THICKNESS / 2;
    match direction {
        Direction::Up => PixelRect::new(x0 - half, y0 - distance - size, CROP_MARK_THICKNESS, size),
        Direction::Down => PixelRect::new(x0 - half, y0 + distance, CROP_MARK_THICKNESS, size),
        Direction::Left => PixelRect::new(x0 - distance - size, y0 - half, size, CROP_MARK_THICKNESS),
        Direction::Right => PixelRect::new(x0 + distance, y0 - half, size, CROP_MARK_THICKNESS),
    }
}

/// The twelve marks of a wrap sheet: the flap and face edges above and
/// below the sheet, and the fold lines of the side bands left and right.
pub fn wrap_crop_marks(grid: &WrapGrid, material: &MaterialParams) -> Vec<CropMark> {
    use Direction::{Down, Left, Right, Up};

    let (xs, ys) = (&grid.xs, &grid.ys);
    let mark = |x: i32, y: i32, directions: &[Direction]| {
        CropMark::new(
            Point::new(x, y),
            directions,
            material.crop_mark_size,
            material.crop_mark_distance,
        )
    };

    vec![
        mark(xs[4], ys[1], &[Up, Left]),
        mark(xs[5], ys[1], &[Up]),
        mark(xs[6], ys[1], &[Up]),
        mark(xs[7], ys[1], &[Up, Right]),
        mark(xs[1], ys[4], &[Up, Left]),
        mark(xs[10], ys[4], &[Up, Right]),
        mark(xs[1], ys[7], &[Down, Left]),
        mark(xs[10], ys[7], &[Down, Right]),
        mark(xs[4], ys[10], &[Down, Left]),
        mark(xs[5], ys[10], &[Down]),
        mark(xs[6], ys[10], &[Down]),
        mark(xs[7], ys[10], &[Down, Right]),
    ]
}
