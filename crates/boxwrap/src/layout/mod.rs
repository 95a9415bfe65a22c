//! Layout calculation modules for box wraps
//!
//! This module handles all the geometric calculations:
//! - Coordinate grids (template and wrap breakpoints)
//! - Placement planning (which region goes where, anchored and rotated how)

mod grid;
mod placement;
mod types;

pub use grid::*;
pub use placement::*;
pub use types::*;
