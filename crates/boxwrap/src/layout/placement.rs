//! Placement planning
//!
//! This module decides where every region of the template ends up:
//! - Label positions on the empty template
//! - Face transfers from the template onto each wrap half
//! - Flap strips copied within a wrap sheet
//!
//! Source rectangles are addressed in template coordinates, anchors in wrap
//! coordinates.

use crate::marks::wrap_crop_marks;
use crate::options::BoxSizeMm;
use crate::types::*;

use super::{
    CoordinateGrid, PanelPlacement, TemplatePlan, TextLabel, WrapPlan, template_coordinates,
    wrap_coordinates,
};

// =============================================================================
// Template
// =============================================================================

/// Plan the empty template sheet: white artwork areas and centered labels.
pub fn plan_template(box_size: &BoxSizeMm) -> TemplatePlan {
    let dims = box_size.to_pixels();
    let grid = template_coordinates(&dims);
    let size = grid.size();
    let (xs, ys) = (grid.xs, grid.ys);

    // The cross: the side strip across the full width plus the
    // top-front-bottom column across the full height
    let artwork_regions = vec![
        PixelRect::new(xs[0], ys[1], size.width as i32, ys[3] - ys[1]),
        PixelRect::new(xs[1], ys[0], xs[2] - xs[1], size.height as i32),
    ];

    let cell = |left: usize, top: usize, right: usize, bottom: usize| {
        PixelRect::from_edges(xs[left], ys[top], xs[right], ys[bottom]).center()
    };
    let face_label = |face: Face, center: Point| TextLabel {
        text: face.label().to_string(),
        center,
    };

    let labels = vec![
        face_label(Face::Top, cell(1, 0, 2, 1)),
        face_label(Face::Left, cell(0, 1, 1, 3)),
        face_label(Face::Front, cell(1, 1, 2, 3)),
        face_label(Face::Right, cell(2, 1, 3, 3)),
        face_label(Face::Back, cell(3, 1, 4, 3)),
        face_label(Face::Bottom, cell(1, 3, 2, 4)),
        TextLabel {
            text: dimensions_caption(box_size, &dims),
            center: cell(0, 0, 1, 1),
        },
    ];

    TemplatePlan {
        grid,
        size,
        artwork_regions,
        labels,
    }
}

/// Caption listing the box size in whole millimeters and in pixels
fn dimensions_caption(box_size: &BoxSizeMm, dims: &BoxDimensions) -> String {
    format!(
        "Box width: {}mm ({}px)\nBox height: {}mm ({}px)\nBox depth: {}mm ({}px)",
        box_size.width_mm.trunc() as i64,
        dims.width,
        box_size.height_mm.trunc() as i64,
        dims.height,
        box_size.depth_mm.trunc() as i64,
        dims.depth,
    )
}

// =============================================================================
// Wraps
// =============================================================================

/// Height of a side strip taken from the template: half the box height plus
/// the paper wrapped over the cardboard edge and folded inside.
pub fn half_height_plus_extra(dims: &BoxDimensions, material: &MaterialParams) -> i32 {
    dims.half_height() + material.thickness + material.inside_size
}

/// Plan one wrap sheet.
///
/// Both halves share the grid, the flaps and the crop marks; they differ in
/// which half of the template the faces are read from and how they are
/// turned.
pub fn plan_wrap(half: WrapHalf, dims: &BoxDimensions, material: &MaterialParams) -> WrapPlan {
    let src = template_coordinates(dims);
    let grid = wrap_coordinates(dims, material);
    let extra = half_height_plus_extra(dims, material);

    let primary = match half {
        WrapHalf::Top => top_face_placements(&src.xs, &src.ys, &grid.xs, &grid.ys, dims, extra),
        WrapHalf::Bottom => {
            bottom_face_placements(&src.xs, &src.ys, &grid.xs, &grid.ys, dims, extra)
        }
    };
    let flaps = flap_placements(&grid.xs, &grid.ys, material, extra);
    let marks = wrap_crop_marks(&grid, material);

    WrapPlan {
        half,
        size: grid.size(),
        grid,
        primary,
        flaps,
        marks,
    }
}

fn place(
    face: Option<Face>,
    src: PixelRect,
    anchor: Point,
    corner: Corner,
    rotation: Rotation,
) -> PanelPlacement {
    PanelPlacement {
        face,
        src,
        anchor,
        corner,
        rotation,
    }
}

/// Faces of the lid: the top face and the upper halves of the sides
fn top_face_placements(
    sx: &[i32; 5],
    sy: &[i32; 5],
    dx: &[i32; 12],
    dy: &[i32; 12],
    dims: &BoxDimensions,
    extra: i32,
) -> Vec<PanelPlacement> {
    let (width, depth) = (dims.width, dims.depth);
    vec![
        place(
            Some(Face::Top),
            PixelRect::new(sx[1], sy[0], width, depth),
            Point::new(dx[5], dy[4]),
            Corner::TopLeft,
            Rotation::None,
        ),
        place(
            Some(Face::Left),
            PixelRect::new(sx[0], sy[1], depth, extra),
            Point::new(dx[5], dy[4]),
            Corner::TopRight,
            Rotation::Clockwise90,
        ),
        place(
            Some(Face::Front),
            PixelRect::new(sx[1], sy[1], width, extra),
            Point::new(dx[5], dy[7]),
            Corner::TopLeft,
            Rotation::None,
        ),
        place(
            Some(Face::Right),
            PixelRect::new(sx[2], sy[1], depth, extra),
            Point::new(dx[6], dy[4]),
            Corner::TopLeft,
            Rotation::Clockwise270,
        ),
        place(
            Some(Face::Back),
            PixelRect::new(sx[3], sy[1], width, extra),
            Point::new(dx[5], dy[4]),
            Corner::BottomLeft,
            Rotation::Clockwise180,
        ),
    ]
}

/// Faces of the base: the lower halves of the sides and the bottom face
fn bottom_face_placements(
    sx: &[i32; 5],
    sy: &[i32; 5],
    dx: &[i32; 12],
    dy: &[i32; 12],
    dims: &BoxDimensions,
    extra: i32,
) -> Vec<PanelPlacement> {
    let (width, depth) = (dims.width, dims.depth);
    let strip_top = sy[3] - extra;
    vec![
        place(
            Some(Face::Left),
            PixelRect::new(sx[0], strip_top, depth, extra),
            Point::new(dx[5], dy[4]),
            Corner::TopRight,
            Rotation::Clockwise270,
        ),
        place(
            Some(Face::Front),
            PixelRect::new(sx[1], strip_top, width, extra),
            Point::new(dx[5], dy[1]),
            Corner::TopLeft,
            Rotation::None,
        ),
        place(
            Some(Face::Right),
            PixelRect::new(sx[2], strip_top, depth, extra),
            Point::new(dx[6], dy[4]),
            Corner::TopLeft,
            Rotation::Clockwise90,
        ),
        place(
            Some(Face::Back),
            PixelRect::new(sx[3], strip_top, width, extra),
            Point::new(dx[5], dy[10]),
            Corner::BottomLeft,
            Rotation::Clockwise180,
        ),
        place(
            Some(Face::Bottom),
            PixelRect::new(sx[1], sy[3], width, depth),
            Point::new(dx[5], dy[4]),
            Corner::TopLeft,
            Rotation::None,
        ),
    ]
}

/// Flaps on the front and back panels, cut from the already placed side
/// strips. Must run after every face placement of the sheet.
fn flap_placements(
    dx: &[i32; 12],
    dy: &[i32; 12],
    material: &MaterialParams,
    extra: i32,
) -> Vec<PanelPlacement> {
    let strip = |x: i32, y: i32| PixelRect::new(x, y, extra, material.flap_size);
    vec![
        place(
            None,
            strip(dx[1], dy[4]),
            Point::new(dx[5], dy[4]),
            Corner::BottomRight,
            Rotation::Clockwise90,
        ),
        place(
            None,
            strip(dx[1], dy[6]),
            Point::new(dx[5], dy[7]),
            Corner::TopRight,
            Rotation::Clockwise270,
        ),
        place(
            None,
            strip(dx[6], dy[4]),
            Point::new(dx[6], dy[4]),
            Corner::BottomLeft,
            Rotation::Clockwise270,
        ),
        place(
            None,
            strip(dx[6], dy[6]),
            Point::new(dx[6], dy[7]),
            Corner::TopLeft,
            Rotation::Clockwise90,
        ),
    ]
}

// =============================================================================
// Tests
// =============================================================================
