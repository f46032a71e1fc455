//! Bridge to PNG, JPEG and BMP containers using the `image` crate

use crate::catalog::RGBA8;
use crate::{FormatId, Image, ImageSize, assign, color_convert};
use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};
use std::path::Path;

/// Container file formats supported by [`encode`] and [`write_image`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerFormat {
    Png,
    Jpeg,
    Bmp,
}

impl ContainerFormat {
    /// Guess the container from a file extension
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        match image::ImageFormat::from_path(path).ok()? {
            image::ImageFormat::Png => Some(Self::Png),
            image::ImageFormat::Jpeg => Some(Self::Jpeg),
            image::ImageFormat::Bmp => Some(Self::Bmp),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error(transparent)]
    Codec(#[from] image::ImageError),

    #[error(transparent)]
    Image(#[from] crate::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("no container color type or conversion exists for format {0:?}")]
    UnsupportedFormat(Option<FormatId>),

    #[error("image of {width}x{height} pixels is too large for a container")]
    TooLarge { width: usize, height: usize },
}

/// Decode a PNG, JPEG or BMP file into an RGBA8 image
pub fn decode(bytes: &[u8]) -> Result<Image, CodecError> {
    let decoded = image::load_from_memory(bytes)?;

    into_rgba8(decoded)
}

/// Read and decode a PNG, JPEG or BMP file into an RGBA8 image
pub fn read_image(path: impl AsRef<Path>) -> Result<Image, CodecError> {
    let path = path.as_ref();
    let decoded = image::open(path)?;

    tracing::debug!(path = %path.display(), "read image");

    into_rgba8(decoded)
}

fn into_rgba8(decoded: DynamicImage) -> Result<Image, CodecError> {
    let rgba = decoded.into_rgba8();
    let size = ImageSize::new(rgba.width() as usize, rgba.height() as usize);

    tracing::debug!(width = size.width, height = size.height, "decoded image");

    let src_step = size.width * 4;
    let mut image = Image::create(size, RGBA8);
    let dest_step = image.steps()[0];

    assign(size, src_step, rgba.as_raw(), dest_step, image.buffer_mut())?;

    Ok(image)
}

/// Encode `image` into the given container.
///
/// 8 bit single channel formats are stored as grey, RG8 as grey with alpha. RGB8 and RGBA8 are
/// stored as is. Other formats are converted to RGBA8 first, if a conversion exists. JPEG drops
/// the alpha channel.
pub fn encode<S: AsRef<[u8]>>(
    image: &Image<S>,
    container: ContainerFormat,
) -> Result<Vec<u8>, CodecError> {
    let size = image.size();

    let (Ok(width), Ok(height)) = (u32::try_from(size.width), u32::try_from(size.height)) else {
        return Err(CodecError::TooLarge {
            width: size.width,
            height: size.height,
        });
    };

    let (pixels, color) = match color_type(image.format().id()) {
        Some(color) => (pack(image, color, container), color),
        None => {
            let mut rgba = Image::create(size, RGBA8);

            if !color_convert(image, &mut rgba) {
                return Err(CodecError::UnsupportedFormat(image.format().id()));
            }

            (
                pack(&rgba, ExtendedColorType::Rgba8, container),
                ExtendedColorType::Rgba8,
            )
        }
    };

    let color = match container {
        ContainerFormat::Jpeg => without_alpha(color),
        _ => color,
    };

    let mut out = Vec::new();

    match container {
        ContainerFormat::Png => {
            PngEncoder::new(&mut out).write_image(&pixels, width, height, color)?;
        }
        ContainerFormat::Jpeg => {
            JpegEncoder::new_with_quality(&mut out, 100)
                .write_image(&pixels, width, height, color)?;
        }
        ContainerFormat::Bmp => {
            BmpEncoder::new(&mut out).write_image(&pixels, width, height, color)?;
        }
    }

    tracing::debug!(?container, bytes = out.len(), "encoded image");

    Ok(out)
}

/// Encode `image` and write it to `path`
pub fn write_image<S: AsRef<[u8]>>(
    path: impl AsRef<Path>,
    image: &Image<S>,
    container: ContainerFormat,
) -> Result<(), CodecError> {
    let encoded = encode(image, container)?;

    std::fs::write(path, encoded)?;

    Ok(())
}

fn color_type(id: Option<FormatId>) -> Option<ExtendedColorType> {
    match id? {
        FormatId::R8 | FormatId::GREY8 | FormatId::STENCIL8 => Some(ExtendedColorType::L8),
        FormatId::RG8 => Some(ExtendedColorType::La8),
        FormatId::RGB8 => Some(ExtendedColorType::Rgb8),
        FormatId::RGBA8 => Some(ExtendedColorType::Rgba8),
        _ => None,
    }
}

fn without_alpha(color: ExtendedColorType) -> ExtendedColorType {
    match color {
        ExtendedColorType::La8 => ExtendedColorType::L8,
        ExtendedColorType::Rgba8 => ExtendedColorType::Rgb8,
        color => color,
    }
}

/// Copy the rows of a packed 8 bit image without padding, dropping alpha for JPEG
fn pack<S: AsRef<[u8]>>(
    image: &Image<S>,
    color: ExtendedColorType,
    container: ContainerFormat,
) -> Vec<u8> {
    let meta = image.meta();
    let size = meta.size();
    let channels = usize::from(color.channel_count());
    let keep = usize::from(without_alpha(color).channel_count());

    if container != ContainerFormat::Jpeg || keep == channels {
        let tight = size.width * channels;
        let mut out = vec![0u8; tight * size.height];

        if tight > 0 {
            let rows = image.buffer().chunks(meta.steps()[0]);

            for (src, dest) in rows.zip(out.chunks_exact_mut(tight)) {
                dest.copy_from_slice(&src[..tight]);
            }
        }

        return out;
    }

    let mut out = Vec::with_capacity(size.width * size.height * keep);

    if size.width > 0 {
        for row in image.buffer().chunks(meta.steps()[0]).take(size.height) {
            for px in row[..size.width * channels].chunks_exact(channels) {
                out.extend_from_slice(&px[..keep]);
            }
        }
    }

    out
}
