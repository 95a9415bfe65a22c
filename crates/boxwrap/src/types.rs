use crate::constants::{mm_to_px, px_to_mm};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoxWrapError {
    #[error("Template image has the wrong size. Expected {expected} but got {actual}.")]
    SizeMismatch { expected: SheetSize, actual: SheetSize },
    #[error("{axis}-axis breakpoints are not strictly increasing at index {index}: {value} follows {previous}")]
    DegenerateGrid {
        axis: char,
        index: usize,
        previous: i32,
        value: i32,
    },
    #[error("Invalid corner {0}")]
    InvalidCorner(u8),
    #[error("Invalid direction {0}")]
    InvalidDirection(u8),
    #[error("Invalid rotation {0}")]
    InvalidRotation(i32),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Drawing error: {0}")]
    Region(String),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, BoxWrapError>;

/// Pixel size of a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetSize {
    pub width: u32,
    pub height: u32,
}

impl SheetSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for SheetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}px x {}px ({}mm x {}mm)",
            self.width,
            self.height,
            px_to_mm(self.width as i32).trunc() as i64,
            px_to_mm(self.height as i32).trunc() as i64
        )
    }
}

/// A point on a sheet in pixels (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangular area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelRect {
    /// X position (left edge)
    pub x: i32,
    /// Y position (top edge)
    pub y: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning two breakpoints on each axis
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Right edge x coordinate (exclusive)
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate (exclusive)
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Center, rounded towards negative infinity
    pub fn center(&self) -> Point {
        Point::new(
            (self.x + self.right()).div_euclid(2),
            (self.y + self.bottom()).div_euclid(2),
        )
    }

    /// Whether the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the two rectangles share at least one pixel
    pub fn intersects(&self, other: &PixelRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether the rectangle lies completely inside a sheet of the given size
    pub fn fits_within(&self, size: SheetSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && i64::from(self.right()) <= i64::from(size.width)
            && i64::from(self.bottom()) <= i64::from(size.height)
    }
}

/// Enumerates four corners and the center of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

impl Corner {
    /// The point of `bounds` this corner refers to
    pub fn point_of(self, bounds: &PixelRect) -> Point {
        match self {
            Corner::TopLeft => Point::new(bounds.x, bounds.y),
            Corner::TopRight => Point::new(bounds.right(), bounds.y),
            Corner::BottomLeft => Point::new(bounds.x, bounds.bottom()),
            Corner::BottomRight => Point::new(bounds.right(), bounds.bottom()),
            Corner::Center => bounds.center(),
        }
    }

    /// Translation that moves this corner of `bounds` onto `target`
    pub fn offset_to(self, bounds: &PixelRect, target: Point) -> (i32, i32) {
        let from = self.point_of(bounds);
        (target.x - from.x, target.y - from.y)
    }
}

/// Legacy numeric corner codes (1 = top left ... 5 = center)
impl TryFrom<u8> for Corner {
    type Error = BoxWrapError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Corner::TopLeft),
            2 => Ok(Corner::TopRight),
            3 => Ok(Corner::BottomLeft),
            4 => Ok(Corner::BottomRight),
            5 => Ok(Corner::Center),
            other => Err(BoxWrapError::InvalidCorner(other)),
        }
    }
}

/// Enumerates the four principal directions on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Legacy numeric direction codes (1 = left ... 4 = down)
impl TryFrom<u8> for Direction {
    type Error = BoxWrapError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Direction::Left),
            2 => Ok(Direction::Right),
            3 => Ok(Direction::Up),
            4 => Ok(Direction::Down),
            other => Err(BoxWrapError::InvalidDirection(other)),
        }
    }
}

/// Clockwise rotation in quarter turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::None => 0,
            Rotation::Clockwise90 => 90,
            Rotation::Clockwise180 => 180,
            Rotation::Clockwise270 => 270,
        }
    }

    pub fn from_degrees(degrees: i32) -> Result<Self> {
        match degrees {
            0 => Ok(Rotation::None),
            90 => Ok(Rotation::Clockwise90),
            180 => Ok(Rotation::Clockwise180),
            270 => Ok(Rotation::Clockwise270),
            other => Err(BoxWrapError::InvalidRotation(other)),
        }
    }

    /// Whether width and height trade places
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Clockwise90 | Rotation::Clockwise270)
    }
}

/// The six faces of an unfolded box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Face {
    Top,
    Bottom,
    Left,
    Right,
    Front,
    Back,
}

impl Face {
    /// Label printed on the template
    pub fn label(self) -> &'static str {
        match self {
            Face::Top => "TOP",
            Face::Bottom => "BOTTOM",
            Face::Left => "LEFT",
            Face::Right => "RIGHT",
            Face::Front => "FRONT",
            Face::Back => "BACK",
        }
    }
}

/// Which half of the two-piece box a wrap sheet covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WrapHalf {
    Top,
    Bottom,
}

impl WrapHalf {
    pub const ALL: [WrapHalf; 2] = [WrapHalf::Top, WrapHalf::Bottom];

    /// Suffix used for file and image names
    pub fn suffix(self) -> &'static str {
        match self {
            WrapHalf::Top => "top",
            WrapHalf::Bottom => "bottom",
        }
    }
}

/// Fill source for rectangles and new images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fill {
    /// Current foreground color of the drawing context
    Foreground,
    White,
    Transparent,
}

/// Box size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxDimensions {
    /// Distance between the left and right face
    pub width: i32,
    /// Distance between the top and bottom face
    pub height: i32,
    /// Distance between the front and back face
    pub depth: i32,
}

impl BoxDimensions {
    pub fn new(width: i32, height: i32, depth: i32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn from_mm(width_mm: f64, height_mm: f64, depth_mm: f64) -> Self {
        Self::new(mm_to_px(width_mm), mm_to_px(height_mm), mm_to_px(depth_mm))
    }

    /// Half of the box height, rounded down
    pub fn half_height(&self) -> i32 {
        self.height.div_euclid(2)
    }
}

/// Paper and cardboard parameters in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialParams {
    /// Cardboard thickness
    pub thickness: i32,
    /// Width of the flaps covering the side seams
    pub flap_size: i32,
    /// Amount of paper folded inside the box
    pub inside_size: i32,
    /// Length of a crop mark tick
    pub crop_mark_size: i32,
    /// Gap between a crop mark and the point it marks
    pub crop_mark_distance: i32,
}
