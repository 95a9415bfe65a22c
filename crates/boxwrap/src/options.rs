use crate::constants::*;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Box size as entered by the user, in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoxSizeMm {
    /// Distance between the left and right face
    pub width_mm: f64,
    /// Distance between the top and bottom face
    pub height_mm: f64,
    /// Distance between the front and back face
    pub depth_mm: f64,
}

impl Default for BoxSizeMm {
    fn default() -> Self {
        Self {
            width_mm: 75.0,
            height_mm: 104.0,
            depth_mm: 100.0,
        }
    }
}

impl BoxSizeMm {
    pub fn new(width_mm: f64, height_mm: f64, depth_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
            depth_mm,
        }
    }

    /// Box size converted to pixels at the sheet resolution
    pub fn to_pixels(&self) -> BoxDimensions {
        BoxDimensions::from_mm(self.width_mm, self.height_mm, self.depth_mm)
    }

    pub fn validate(&self) -> Result<()> {
        check_range("Box width", self.width_mm, BOX_DIMENSION_RANGE)?;
        check_range("Box height", self.height_mm, BOX_DIMENSION_RANGE)?;
        check_range("Box depth", self.depth_mm, BOX_DIMENSION_RANGE)?;
        Ok(())
    }
}

/// Options for building the empty template sheet
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TemplateOptions {
    pub box_size: BoxSizeMm,
}

impl TemplateOptions {
    pub fn validate(&self) -> Result<()> {
        self.box_size.validate()
    }
}

/// Options for building the two wrap sheets from a template.
///
/// The box size must be the one the template was created with.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WrapOptions {
    pub box_size: BoxSizeMm,
    /// Cardboard thickness
    pub thickness_mm: f64,
    /// Width of the flaps
    pub flap_size_mm: f64,
    /// Amount of paper inside the box
    pub inside_size_mm: f64,
    /// Size of the crop marks
    pub crop_mark_size_mm: f64,
    /// Distance between the crop marks and the image
    pub crop_mark_distance_mm: f64,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            box_size: BoxSizeMm::default(),
            thickness_mm: 2.0,
            flap_size_mm: 10.0,
            inside_size_mm: 15.0,
            crop_mark_size_mm: 5.0,
            crop_mark_distance_mm: 2.0,
        }
    }
}

impl WrapOptions {
    /// Material parameters converted to pixels
    pub fn material(&self) -> MaterialParams {
        MaterialParams {
            thickness: mm_to_px(self.thickness_mm),
            flap_size: mm_to_px(self.flap_size_mm),
            inside_size: mm_to_px(self.inside_size_mm),
            crop_mark_size: mm_to_px(self.crop_mark_size_mm),
            crop_mark_distance: mm_to_px(self.crop_mark_distance_mm),
        }
    }

    /// Validate every parameter against its allowed range
    pub fn validate(&self) -> Result<()> {
        self.box_size.validate()?;
        check_range("Cardboard thickness", self.thickness_mm, THICKNESS_RANGE)?;
        check_range("Flap size", self.flap_size_mm, FLAP_SIZE_RANGE)?;
        check_range("Inside size", self.inside_size_mm, INSIDE_SIZE_RANGE)?;
        check_range("Crop mark size", self.crop_mark_size_mm, CROP_MARK_SIZE_RANGE)?;
        check_range(
            "Crop mark distance",
            self.crop_mark_distance_mm,
            CROP_MARK_DISTANCE_RANGE,
        )?;
        Ok(())
    }
}

fn check_range(name: &str, value: f64, (min, max): (f64, f64)) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(BoxWrapError::Config(format!(
            "{} must be between {} and {} mm, got {}",
            name, min, max, value
        )));
    }
    Ok(())
}

#[cfg(feature = "serde")]
mod persist {
    use super::*;
    use serde::de::DeserializeOwned;
    use std::path::Path;

    async fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
        let bytes = tokio::fs::read(path).await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| BoxWrapError::Config(format!("Failed to parse config: {}", e)))
    }

    async fn save_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| BoxWrapError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    impl TemplateOptions {
        /// Load options from JSON file
        pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
            load_json(path).await
        }

        /// Save options to JSON file
        pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
            save_json(self, path).await
        }
    }

    impl WrapOptions {
        /// Load options from JSON file
        pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
            load_json(path).await
        }

        /// Save options to JSON file
        pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
            save_json(self, path).await
        }
    }
}
