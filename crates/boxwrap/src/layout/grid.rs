//! Coordinate grid calculation
//!
//! This module derives every breakpoint of the template sheet and of the
//! wrap sheets from the box size and the material parameters.

use crate::types::{BoxDimensions, MaterialParams};

use super::{TemplateGrid, WrapGrid};

// =============================================================================
// Template Grid
// =============================================================================

/// Calculate the breakpoints of the template sheet.
///
/// The template layout looks like this:
///
/// ```text
///    x0         x1         x2        x3         x4
///
/// y0 o          +----------+                       -
///               |          |                       ^
///               |   TOP    |                       | depth
///               |          |                       v
/// y1 +----------+----------+---------+----------+  -
///    |          |          |         |          |  ^
/// y2 |---LEFT---|--FRONT---|--RIGHT--|---BACK---|  | height
///    |          |          |         |          |  v
/// y3 +----------+----------+---------+----------+  -
///               |          |                       ^
///               |  BOTTOM  |                       | depth
///               |          |                       v
/// y4            +----------+                       -
///
///     |<------->|<-------->|<------->|<-------->|
///        depth     width      depth     width
/// ```
///
/// `y2` only marks the middle of the side strip.
pub fn template_coordinates(dims: &BoxDimensions) -> TemplateGrid {
    let x0 = 0;
    let x1 = x0 + dims.depth;
    let x2 = x1 + dims.width;
    let x3 = x2 + dims.depth;
    let x4 = x3 + dims.width;

    let y0 = 0;
    let y1 = y0 + dims.depth;
    let y2 = y1 + dims.half_height();
    let y3 = y1 + dims.height;
    let y4 = y3 + dims.depth;

    TemplateGrid {
        xs: [x0, x1, x2, x3, x4],
        ys: [y0, y1, y2, y3, y4],
    }
}

// =============================================================================
// Wrap Grid
// =============================================================================

/// Calculate the breakpoints of a wrap sheet.
///
/// ```text
///     0   x1      x2 x3       x4  x5           x6  x7      x8 x9      x10 x11
///
/// 0   o                       |   |            |   |
///
/// y1                      --  +---+------------+---+  --
///                             |   |  inside    |   |
/// y2                          +...+............+...+
/// y3                          +...+............+...+
///                             | f |   front    | f |
///                             | l |   /back    | l |
/// y4  --  +--------+-+--------+---+------------+---+--------+-+--------+  --
/// y5      |........|.|............|            |............|.|........|
///         | inside | | left/right | top/bottom | left/right | | inside |
/// y6      |........|.|............|            |............|.|........|
/// y7  --  +--------+-+--------+---+------------+---+--------+-+--------+  --
///                             | f |   front    | f |
///                             | l |   /back    | l |
/// y8                          +...+............+...+
/// y9                          +...+............+...+
///                             |   |  inside    |   |
/// y10                     --  +---+------------+---+  --
///
/// y11                         |   |            |   |
/// ```
///
/// The x axis runs across the box width, the y axis across its depth; the
/// flap bands sit inside the face band on x but outside it on y.
pub fn wrap_coordinates(dims: &BoxDimensions, material: &MaterialParams) -> WrapGrid {
    let half_box_height = dims.half_height();
    let outer = material.crop_mark_size + material.crop_mark_distance;

    let x1 = outer;
    let x2 = x1 + material.inside_size;
    let x3 = x2 + material.thickness;
    let x5 = x3 + half_box_height;
    let x4 = x5 - material.flap_size;
    let x6 = x5 + dims.width;
    let x7 = x6 + material.flap_size;
    let x8 = x6 + half_box_height;
    let x9 = x8 + material.thickness;
    let x10 = x9 + material.inside_size;
    let x11 = x10 + material.crop_mark_distance + material.crop_mark_size;

    let y1 = outer;
    let y2 = y1 + material.inside_size;
    let y3 = y2 + material.thickness;
    let y4 = y3 + half_box_height;
    let y5 = y4 + material.flap_size;
    let y7 = y4 + dims.depth;
    let y6 = y7 - material.flap_size;
    let y8 = y7 + half_box_height;
    let y9 = y8 + material.thickness;
    let y10 = y9 + material.inside_size;
    let y11 = y10 + material.crop_mark_distance + material.crop_mark_size;

    WrapGrid {
        xs: [0, x1, x2, x3, x4, x5, x6, x7, x8, x9, x10, x11],
        ys: [0, y1, y2, y3, y4, y5, y6, y7, y8, y9, y10, y11],
    }
}

// =============================================================================
// Tests
// =============================================================================
