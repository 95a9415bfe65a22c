//! Text rendering for template labels
//!
//! Labels are laid out as a small SVG document and rasterized with resvg.
//! Fonts come from the system font database, which is loaded once per
//! renderer.

use std::sync::Arc;

use image::{Rgba, RgbaImage};
use log::{debug, warn};

use crate::constants::{LABEL_FONT_FAMILY, LABEL_LINE_HEIGHT};
use crate::types::{BoxWrapError, Result};

pub struct TextRenderer {
    fontdb: Option<Arc<usvg::fontdb::Database>>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self { fontdb: None }
    }

    fn fontdb(&mut self) -> Arc<usvg::fontdb::Database> {
        self.fontdb
            .get_or_insert_with(|| {
                let mut fontdb = usvg::fontdb::Database::new();
                fontdb.load_system_fonts();
                if fontdb.len() == 0 {
                    warn!("No system fonts found, template labels will be blank");
                } else {
                    debug!("Loaded {} font faces", fontdb.len());
                }
                Arc::new(fontdb)
            })
            .clone()
    }

    /// Rasterize `text` and crop the result to the drawn pixels.
    ///
    /// Lines are separated by `\n`. Returns an empty image when no font
    /// could draw the text.
    pub fn render(&mut self, text: &str, font_size: f32, color: Rgba<u8>) -> Result<RgbaImage> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.is_empty() {
            return Ok(RgbaImage::new(0, 0));
        }

        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let line_height = font_size * LABEL_LINE_HEIGHT;
        let pad = font_size;
        let width = (longest as f32 * font_size + 2.0 * pad).ceil() as u32;
        let height = (lines.len() as f32 * line_height + 2.0 * pad).ceil() as u32;

        let svg = label_svg(&lines, font_size, line_height, pad, width, height, color);

        let mut opt = usvg::Options::default();
        opt.fontdb = self.fontdb();
        let tree = usvg::Tree::from_str(&svg, &opt)
            .map_err(|e| BoxWrapError::Region(format!("Failed to lay out label: {e}")))?;
        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| BoxWrapError::Region(format!("Label too large: {width}x{height}")))?;
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        let mut pixels = RgbaImage::new(width, height);
        for (dst, src) in pixels.pixels_mut().zip(pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Ok(crop_to_ink(&pixels))
    }
}

fn label_svg(
    lines: &[&str],
    font_size: f32,
    line_height: f32,
    pad: f32,
    width: u32,
    height: u32,
    color: Rgba<u8>,
) -> String {
    let [r, g, b, _] = color.0;
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\">\
         <text font-family=\"{LABEL_FONT_FAMILY}\" font-size=\"{font_size}\" \
         fill=\"rgb({r},{g},{b})\">"
    );
    for (i, line) in lines.iter().enumerate() {
        let baseline = pad + font_size + i as f32 * line_height;
        svg.push_str(&format!(
            "<tspan x=\"{pad}\" y=\"{baseline}\">{}</tspan>",
            escape_xml(line)
        ));
    }
    svg.push_str("</text></svg>");
    svg
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Smallest sub-image holding every pixel that is not fully transparent
fn crop_to_ink(pixels: &RgbaImage) -> RgbaImage {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, p) in pixels.enumerate_pixels() {
        if p.0[3] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    match bounds {
        Some((x0, y0, x1, y1)) => {
            image::imageops::crop_imm(pixels, x0, y0, x1 - x0 + 1, y1 - y0 + 1).to_image()
        }
        None => RgbaImage::new(0, 0),
    }
}
