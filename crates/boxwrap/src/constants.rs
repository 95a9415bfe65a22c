//! Shared constants for box wrap layouts
//!
//! This module centralizes the resolution, unit conversion and the
//! fixed drawing sizes used by the template and wrap builders.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Sheet resolution in pixels per inch
pub const DPI: f64 = 300.0;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// PDF points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Convert millimeters to pixels, rounding half away from zero
#[inline]
pub fn mm_to_px(mm: f64) -> i32 {
    (mm / MM_PER_INCH * DPI).round() as i32
}

/// Convert pixels to millimeters (for display only)
#[inline]
pub fn px_to_mm(px: i32) -> f64 {
    (f64::from(px) * MM_PER_INCH) / DPI
}

/// Convert pixels to PDF points
#[inline]
pub fn px_to_pt(px: u32) -> f64 {
    f64::from(px) / DPI * POINTS_PER_INCH
}

// =============================================================================
// Drawing
// =============================================================================

/// Thickness of a crop mark tick in pixels
pub const CROP_MARK_THICKNESS: i32 = 2;

/// Font size of the template labels in pixels (a quarter inch)
pub const LABEL_FONT_SIZE: f32 = (DPI / 4.0) as f32;

/// Font family requested for the template labels
pub const LABEL_FONT_FAMILY: &str = "sans-serif";

/// Line height of multi-line labels relative to the font size
pub const LABEL_LINE_HEIGHT: f32 = 1.2;

/// Name of the layer holding the template artwork
pub const TEMPLATE_LAYER_NAME: &str = "Template";

/// Name of the layer holding a wrap sheet
pub const WRAP_LAYER_NAME: &str = "Wrap";

// =============================================================================
// Parameter Ranges (millimeters)
// =============================================================================

/// Allowed range for each box dimension
pub const BOX_DIMENSION_RANGE: (f64, f64) = (10.0, 500.0);

/// Allowed range for the cardboard thickness
pub const THICKNESS_RANGE: (f64, f64) = (0.5, 6.0);

/// Allowed range for the flap width
pub const FLAP_SIZE_RANGE: (f64, f64) = (1.0, 20.0);

/// Allowed range for the paper folded inside the box
pub const INSIDE_SIZE_RANGE: (f64, f64) = (1.0, 50.0);

/// Allowed range for the crop mark length
pub const CROP_MARK_SIZE_RANGE: (f64, f64) = (1.0, 20.0);

/// Allowed range for the gap between crop marks and artwork
pub const CROP_MARK_DISTANCE_RANGE: (f64, f64) = (0.0, 10.0);
