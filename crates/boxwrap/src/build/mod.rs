//! Building template and wrap sheets
//!
//! The builders run against any `Compositor`. The async entry points use
//! the in-memory raster backend and move the work onto the blocking pool.

mod template;
mod wraps;

pub use template::build_template;
pub use wraps::build_wraps;

use image::DynamicImage;

use crate::options::{TemplateOptions, WrapOptions};
use crate::render::RasterCompositor;
use crate::types::*;

/// Render an empty template for the given box
pub async fn create_template(options: &TemplateOptions) -> Result<DynamicImage> {
    options.validate()?;
    let options = *options;

    tokio::task::spawn_blocking(move || {
        let mut compositor = RasterCompositor::new();
        let image = build_template(&mut compositor, &options)?;
        compositor.take_image(image)
    })
    .await?
}

/// Render the top and bottom wraps from a filled-in template
pub async fn create_wraps(
    template: DynamicImage,
    options: &WrapOptions,
) -> Result<(DynamicImage, DynamicImage)> {
    options.validate()?;
    let options = *options;

    tokio::task::spawn_blocking(move || {
        let mut compositor = RasterCompositor::new();
        let template = compositor.add_image("Source template", &template);
        let [top, bottom] = build_wraps(&mut compositor, template, &options)?;
        Ok((compositor.take_image(top)?, compositor.take_image(bottom)?))
    })
    .await?
}
