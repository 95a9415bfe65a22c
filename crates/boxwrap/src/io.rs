//! Reading and writing sheets
//!
//! Raster formats go through the `image` crate. A `.pdf` output path wraps
//! the sheet in a one-page PDF at print resolution.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};
use lopdf::{Dictionary, Document, Object, Stream};
use log::debug;

use crate::constants::px_to_pt;
use crate::types::*;

/// Load a sheet from any raster format the `image` crate can decode
pub async fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let image = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes)).await??;
    debug!(
        "Loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Save a sheet, picking the format from the file extension
pub async fn save_image(image: DynamicImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    if is_pdf(&path) {
        return save_pdf(image, path).await;
    }

    let format = ImageFormat::from_path(&path)?;
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Cursor::new(Vec::new());
        image.write_to(&mut writer, format)?;
        Ok::<_, BoxWrapError>(writer.into_inner())
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    debug!("Saved {}", path.display());
    Ok(())
}

/// Save a sheet as a single PDF page the size of the printed sheet
pub async fn save_pdf(image: DynamicImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut doc = sheet_document(&image)?;
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, BoxWrapError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    debug!("Saved {}", path.display());
    Ok(())
}

/// Output paths for the two wrap halves: `<stem>-top.<ext>` and
/// `<stem>-bottom.<ext>` next to `path`
pub fn wrap_output_paths(path: impl AsRef<Path>) -> (PathBuf, PathBuf) {
    let path = path.as_ref();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "wrap".to_string());
    let with_suffix = |half: WrapHalf| {
        let name = match path.extension() {
            Some(ext) => format!("{}-{}.{}", stem, half.suffix(), ext.to_string_lossy()),
            None => format!("{}-{}", stem, half.suffix()),
        };
        path.with_file_name(name)
    };
    (with_suffix(WrapHalf::Top), with_suffix(WrapHalf::Bottom))
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Build a one-page document showing `image` at 300 dpi
fn sheet_document(image: &DynamicImage) -> Result<Document> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let (width_pt, height_pt) = (px_to_pt(width), px_to_pt(height));

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let image_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Image".to_vec())),
        ("Width", Object::Integer(i64::from(width))),
        ("Height", Object::Integer(i64::from(height))),
        ("ColorSpace", Object::Name(b"DeviceRGB".to_vec())),
        ("BitsPerComponent", Object::Integer(8)),
    ]);
    let mut image_stream = Stream::new(image_dict, rgb.into_raw());
    image_stream.compress()?;
    let image_id = doc.add_object(image_stream);

    let content = format!("q {:.4} 0 0 {:.4} 0 0 cm /Im0 Do Q", width_pt, height_pt);
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let resources = Dictionary::from_iter(vec![(
        "XObject",
        Object::Dictionary(Dictionary::from_iter(vec![(
            "Im0",
            Object::Reference(image_id),
        )])),
    )]);
    let page_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(width_pt as f32),
                Object::Real(height_pt as f32),
            ]),
        ),
        ("Resources", Object::Dictionary(resources)),
        ("Contents", Object::Reference(content_id)),
    ]));

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(vec![Object::Reference(page_id)])),
        ("Count", Object::Integer(1)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}
