//! File decode/encode around the `image` crate
//!
//! Decoded pixels are reordered to B, G, R[, A] and reordered back on encode.

use crate::{Image, UnitedColorsError, UnitedColorsResult, path::codec_path};
use image::{
    DynamicImage, ImageError, ImageFormat, ImageReader, ImageResult, RgbImage, RgbaImage,
    codecs::jpeg::JpegEncoder,
    error::{ParameterError, ParameterErrorKind},
};
use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
};

pub const JPEG_QUALITY: u8 = 95;
pub const OUTPUT_SUFFIX: &str = "-1";

/// How many channels a decoded image keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelMode {
    /// Always three channels, alpha is dropped.
    #[default]
    Color,
    /// Four channels when the file carries alpha, three otherwise.
    Unchanged,
}

impl ChannelMode {
    pub fn from_channels(channels: u8) -> UnitedColorsResult<Self> {
        match channels {
            3 => Ok(ChannelMode::Color),
            4 => Ok(ChannelMode::Unchanged),
            _ => Err(UnitedColorsError::UnsupportedFormat {
                channels: channels as usize,
            }),
        }
    }
}

/// Reads an image file. Grayscale and 16-bit sources come back as 8-bit color.
pub fn decode(path: impl AsRef<Path>, mode: ChannelMode) -> UnitedColorsResult<Image> {
    let path = path.as_ref();

    let img = read_dynamic(&codec_path(path)).map_err(|source| UnitedColorsError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let keep_alpha = mode == ChannelMode::Unchanged && img.color().has_alpha();
    let (width, height) = (img.width(), img.height());
    let (channels, mut data) = if keep_alpha {
        (4, img.to_rgba8().into_raw())
    } else {
        (3, img.to_rgb8().into_raw())
    };
    swap_red_blue(&mut data, channels);

    log::info!(
        "decoded {} ({width}x{height}, {:?} -> {channels} channels)",
        path.display(),
        img.color()
    );

    Image::from_raw(width, height, channels, data)
}

/// Writes `image` to `path` and returns the path actually written.
///
/// The format follows the extension. Without one, PNG is used for images
/// with alpha and JPEG otherwise, and the extension is appended. Nothing is
/// written if encoding fails.
pub fn encode(path: impl AsRef<Path>, image: &Image) -> UnitedColorsResult<PathBuf> {
    let path = path.as_ref();
    let encode_err = |source| UnitedColorsError::Encode {
        path: path.to_path_buf(),
        source,
    };

    let (path, format) = output_format(path, image).map_err(encode_err)?;
    let bytes = encode_to_vec(image, format).map_err(encode_err)?;

    fs::write(codec_path(&path), bytes).map_err(|source| UnitedColorsError::Write {
        path: path.clone(),
        source,
    })?;

    log::info!("saved {} as {format:?}", path.display());
    Ok(path)
}

/// `<dir>/<stem>-1.png` for images with alpha, `<dir>/<stem>-1.jpg` otherwise.
pub fn default_output_path(input: impl AsRef<Path>, image: &Image) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let ext = if image.has_alpha() { "png" } else { "jpg" };

    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.{ext}"))
}

fn read_dynamic(path: &Path) -> ImageResult<DynamicImage> {
    ImageReader::open(path)
        .map_err(ImageError::IoError)?
        .with_guessed_format()
        .map_err(ImageError::IoError)?
        .decode()
}

fn output_format(path: &Path, image: &Image) -> ImageResult<(PathBuf, ImageFormat)> {
    if path.extension().is_some() {
        return Ok((path.to_path_buf(), ImageFormat::from_path(path)?));
    }

    let format = if image.has_alpha() {
        ImageFormat::Png
    } else {
        ImageFormat::Jpeg
    };

    Ok((path.with_extension(format.extensions_str()[0]), format))
}

fn encode_to_vec(image: &Image, format: ImageFormat) -> ImageResult<Vec<u8>> {
    let img = to_dynamic(image)?;
    let mut bytes = Vec::new();

    if format == ImageFormat::Jpeg {
        if image.has_alpha() {
            log::warn!("JPEG output cannot store alpha, dropping it");
        }
        JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).encode_image(&img.to_rgb8())?;
    } else {
        img.write_to(&mut Cursor::new(&mut bytes), format)?;
    }

    Ok(bytes)
}

fn to_dynamic(image: &Image) -> ImageResult<DynamicImage> {
    let (width, height) = (image.width(), image.height());
    let mut data = image.as_raw().to_vec();
    swap_red_blue(&mut data, image.channels());

    let img = match image.channels() {
        4 => RgbaImage::from_raw(width, height, data).map(DynamicImage::ImageRgba8),
        3 => RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8),
        _ => None,
    };

    img.ok_or_else(|| {
        ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        ))
    })
}

fn swap_red_blue(data: &mut [u8], channels: usize) {
    for pixel in data.chunks_exact_mut(channels) {
        pixel.swap(0, 2);
    }
}
