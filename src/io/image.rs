//! Sprite loading, PNG export with textual metadata, and metadata inspection

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use image::{DynamicImage, ImageReader, RgbaImage};
use tempfile::NamedTempFile;

#[cfg(unix)]
use crate::io::configuration::OUTPUT_FILE_MODE;
use crate::io::error::{Result, TilestampError};

/// Load the cutout sprite as RGBA
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist
/// - The file cannot be opened or decoded as an image
pub fn load_sprite(path: &Path) -> Result<RgbaImage> {
    if !path.exists() {
        return Err(TilestampError::MissingInput {
            path: path.to_path_buf(),
        });
    }

    let decode_error = |source| TilestampError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let image = ImageReader::open(path)
        .map_err(|e| decode_error(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| decode_error(image::ImageError::IoError(e)))?
        .decode()
        .map_err(decode_error)?;

    Ok(image.into_rgba8())
}

/// Encode `image` as an 8-bit RGB PNG carrying one text chunk
///
/// Text representable in Latin-1 goes into a `tEXt` chunk, anything else into `iTXt`.
///
/// # Errors
///
/// Returns an error if the PNG encoder rejects the header, the text chunk or the pixel data
pub fn encode_png_with_text(
    image: &RgbaImage,
    key: &str,
    text: &str,
    path: &Path,
) -> Result<Vec<u8>> {
    let export_error = |source| TilestampError::ImageExport {
        path: path.to_path_buf(),
        source,
    };

    let rgb = DynamicImage::ImageRgba8(image.clone()).into_rgb8();
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, rgb.width(), rgb.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);

        if text.chars().all(|c| u32::from(c) <= 0xFF) {
            encoder
                .add_text_chunk(key.to_string(), text.to_string())
                .map_err(export_error)?;
        } else {
            encoder
                .add_itxt_chunk(key.to_string(), text.to_string())
                .map_err(export_error)?;
        }

        let mut writer = encoder.write_header().map_err(export_error)?;
        writer.write_image_data(rgb.as_raw()).map_err(export_error)?;
        writer.finish().map_err(export_error)?;
    }

    Ok(bytes)
}

/// Write encoded bytes to `path`, creating parent directories as needed
///
/// The bytes go to a temporary file beside `path` that is renamed over it once
/// complete, so a failed write leaves any existing file untouched.
///
/// # Errors
///
/// Returns an error if a parent directory cannot be created or the file cannot be
/// written or moved into place
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).map_err(|e| TilestampError::FileSystem {
        path: parent.to_path_buf(),
        operation: "create directory",
        source: e,
    })?;

    let write_error = |source| TilestampError::FileSystem {
        path: path.to_path_buf(),
        operation: "write output",
        source,
    };
    let mut staged = NamedTempFile::new_in(parent).map_err(write_error)?;
    staged.write_all(bytes).map_err(write_error)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(OUTPUT_FILE_MODE))
            .map_err(write_error)?;
    }
    staged.as_file().sync_all().map_err(write_error)?;
    staged.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}

/// Read every textual chunk (`tEXt`, `zTXt`, `iTXt`) from a PNG file in file order per kind
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not a valid PNG or a compressed chunk cannot be inflated
pub fn read_text_metadata(path: &Path) -> Result<Vec<(String, String)>> {
    let file = File::open(path).map_err(|e| TilestampError::FileSystem {
        path: path.to_path_buf(),
        operation: "open image",
        source: e,
    })?;
    text_chunks(BufReader::new(file), path)
}

fn text_chunks<R: std::io::Read>(reader: R, path: &Path) -> Result<Vec<(String, String)>> {
    let metadata_error = |source| TilestampError::MetadataRead {
        path: path.to_path_buf(),
        source,
    };

    let png_reader = png::Decoder::new(reader)
        .read_info()
        .map_err(metadata_error)?;
    let info = png_reader.info();

    let mut entries: Vec<(String, String)> = info
        .uncompressed_latin1_text
        .iter()
        .map(|chunk| (chunk.keyword.clone(), chunk.text.clone()))
        .collect();
    for chunk in &info.compressed_latin1_text {
        entries.push((chunk.keyword.clone(), chunk.get_text().map_err(metadata_error)?));
    }
    for chunk in &info.utf8_text {
        entries.push((chunk.keyword.clone(), chunk.get_text().map_err(metadata_error)?));
    }

    Ok(entries)
}

/// Value of the first text chunk named `key`, if any
///
/// # Errors
///
/// Returns an error if the file cannot be read as a PNG
pub fn read_text_value(path: &Path, key: &str) -> Result<Option<String>> {
    Ok(read_text_metadata(path)?
        .into_iter()
        .find(|(keyword, _)| keyword == key)
        .map(|(_, text)| text))
}
