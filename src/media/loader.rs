/// Selected image loader
///
/// Reads the files picked in the file dialog and turns each one into a
/// `StagedImage`: the encoded bytes become the full-size handle, and a
/// decoded, downscaled copy becomes the thumbnail.
use iced::widget::image::Handle;
use image::imageops::FilterType;
use image::{DynamicImage, ImageDecoder, ImageReader};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tokio::task;

use crate::state::data::{SourceImage, StagedImage};

/// Why a selection could not be loaded
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("could not read {path}: {message}")]
    Read { path: String, message: String },
    #[error("{path} is not a supported image: {message}")]
    Decode { path: String, message: String },
    #[error("image loading task failed: {0}")]
    Task(String),
}

/// Load every file in `paths`, in order.
///
/// Fails as a whole when any single file cannot be read or decoded, so a
/// selection is either staged completely or not at all.
pub async fn load_images(
    paths: Vec<PathBuf>,
    thumbnail_size: u32,
) -> Result<Vec<StagedImage>, LoadError> {
    let mut images = Vec::with_capacity(paths.len());

    for path in paths {
        let bytes = tokio::fs::read(&path).await.map_err(|e| LoadError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        // Decoding and resizing are CPU-bound
        let image = task::spawn_blocking(move || decode_image(&path, bytes, thumbnail_size))
            .await
            .map_err(|e| LoadError::Task(e.to_string()))??;

        tracing::debug!(
            path = %image.source.path.display(),
            width = image.source.width,
            height = image.source.height,
            "decoded selected image"
        );
        images.push(image);
    }

    tracing::info!(count = images.len(), "loaded image selection");
    Ok(images)
}

/// Decode one file's bytes and build its staged entry.
///
/// The thumbnail and the recorded dimensions follow the EXIF orientation,
/// so portrait photos from cameras come out upright.
pub fn decode_image(
    path: &Path,
    bytes: Vec<u8>,
    thumbnail_size: u32,
) -> Result<StagedImage, LoadError> {
    let decode_error = |message: String| LoadError::Decode {
        path: path.display().to_string(),
        message,
    };

    let mut decoder = ImageReader::new(Cursor::new(bytes.as_slice()))
        .with_guessed_format()
        .map_err(|e| decode_error(e.to_string()))?
        .into_decoder()
        .map_err(|e| decode_error(e.to_string()))?;

    let orientation = decoder.orientation().map_err(|e| decode_error(e.to_string()))?;
    let mut decoded =
        DynamicImage::from_decoder(decoder).map_err(|e| decode_error(e.to_string()))?;
    decoded.apply_orientation(orientation);

    let (width, height) = (decoded.width(), decoded.height());

    // Resize maintaining aspect ratio, never upscaling small images
    let edge = thumbnail_size.max(1);
    let thumbnail = if width > edge || height > edge {
        decoded.resize(edge, edge, FilterType::Triangle)
    } else {
        decoded
    }
    .into_rgba8();
    let preview = Handle::from_rgba(thumbnail.width(), thumbnail.height(), thumbnail.into_raw());

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let source = SourceImage {
        path: path.to_path_buf(),
        name,
        width,
        height,
        handle: Handle::from_bytes(bytes),
    };

    Ok(StagedImage::new(source, preview))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(RgbaImage::new(width, height))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn crc32(data: &[u8]) -> u32 {
        let mut crc = 0xFFFF_FFFFu32;
        for &byte in data {
            crc ^= u32::from(byte);
            for _ in 0..8 {
                crc = if crc & 1 == 1 { (crc >> 1) ^ 0xEDB8_8320 } else { crc >> 1 };
            }
        }
        !crc
    }

    /// A PNG whose eXIf chunk says "rotate 90° clockwise to display"
    fn rotated_png_bytes(width: u32, height: u32) -> Vec<u8> {
        // Big-endian TIFF header, one IFD entry: Orientation (0x0112), SHORT, 1, value 6
        let exif: Vec<u8> = [
            &b"MM\0*"[..],
            &8u32.to_be_bytes(),
            &1u16.to_be_bytes(),
            &0x0112u16.to_be_bytes(),
            &3u16.to_be_bytes(),
            &1u32.to_be_bytes(),
            &6u16.to_be_bytes(),
            &0u16.to_be_bytes(),
            &0u32.to_be_bytes(),
        ]
        .concat();

        let mut chunk = Vec::new();
        chunk.extend_from_slice(&(exif.len() as u32).to_be_bytes());
        chunk.extend_from_slice(b"eXIf");
        chunk.extend_from_slice(&exif);
        chunk.extend_from_slice(&crc32(&chunk[4..]).to_be_bytes());

        // Signature (8 bytes) plus the IHDR chunk (25 bytes) come first
        let mut bytes = png_bytes(width, height);
        bytes.splice(33..33, chunk);
        bytes
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("comic-strip-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_decode_records_source_details() {
        let staged = decode_image(Path::new("/panels/page_01.png"), png_bytes(40, 20), 8).unwrap();

        assert_eq!(staged.source.name, "page_01.png");
        assert_eq!(staged.source.path, PathBuf::from("/panels/page_01.png"));
        assert_eq!((staged.source.width, staged.source.height), (40, 20));
        assert_ne!(staged.preview.id(), staged.source.handle.id());
    }

    #[test]
    fn test_decode_applies_exif_orientation() {
        let staged = decode_image(Path::new("portrait.png"), rotated_png_bytes(4, 2), 96).unwrap();

        assert_eq!((staged.source.width, staged.source.height), (2, 4));
    }

    #[test]
    fn test_decode_rejects_non_image_bytes() {
        let result = decode_image(Path::new("notes.txt"), b"just some text".to_vec(), 8);

        assert!(matches!(result, Err(LoadError::Decode { ref path, .. }) if path == "notes.txt"));
    }

    #[tokio::test]
    async fn test_load_images_keeps_selection_order() {
        let dir = scratch_dir("order");
        let first = dir.join("first.png");
        let second = dir.join("second.png");
        std::fs::write(&first, png_bytes(3, 3)).unwrap();
        std::fs::write(&second, png_bytes(5, 2)).unwrap();

        let images = load_images(vec![first, second], 96).await.unwrap();

        let names: Vec<_> = images.iter().map(|i| i.source.name.as_str()).collect();
        assert_eq!(names, vec!["first.png", "second.png"]);
        assert_ne!(images[0].id, images[1].id);

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_load_images_fails_on_missing_file() {
        let dir = scratch_dir("missing");
        let present = dir.join("present.png");
        std::fs::write(&present, png_bytes(2, 2)).unwrap();

        let result = load_images(vec![present, dir.join("absent.png")], 96).await;

        assert!(matches!(result, Err(LoadError::Read { .. })));

        std::fs::remove_dir_all(dir).ok();
    }
}
