// Image bytes -> tf.train.Example conversion
mod proto;


pub use proto::{BytesList, Example, Feature, Features, Int64List, feature};

use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use thiserror::Error;
use tracing::debug;

pub const IMAGE_ENCODED_KEY: &str = "image/encoded";
pub const IMAGE_FORMAT_KEY: &str = "image/format";
pub const IMAGE_HEIGHT_KEY: &str = "image/height";
pub const IMAGE_WIDTH_KEY: &str = "image/width";

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Image payload is empty")]
    EmptyInput,

    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image as PNG: {0}")]
    Encode(#[source] image::ImageError),
}

/// Turns raw image bytes into the example the model consumes
pub trait ExampleConverter: Send + Sync {
    fn convert(&self, image_bytes: &[u8]) -> Result<Example, ConversionError>;
}

/// Decodes any supported image format and re-encodes it as 8-bit RGB PNG
#[derive(Debug, Clone, Copy, Default)]
pub struct PngExampleConverter;

impl ExampleConverter for PngExampleConverter {
    fn convert(&self, image_bytes: &[u8]) -> Result<Example, ConversionError> {
        if image_bytes.is_empty() {
            return Err(ConversionError::EmptyInput);
        }

        let image = image::load_from_memory(image_bytes).map_err(ConversionError::Decode)?;
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut png = Vec::new();
        DynamicImage::ImageRgb8(rgb)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(ConversionError::Encode)?;
        debug!(width, height, size = png.len(), "Encoded image as PNG");

        Ok(Example::from_features([
            (IMAGE_ENCODED_KEY.to_string(), Feature::bytes(png)),
            (IMAGE_FORMAT_KEY.to_string(), Feature::bytes(b"png".to_vec())),
            (IMAGE_HEIGHT_KEY.to_string(), Feature::int64(i64::from(height))),
            (IMAGE_WIDTH_KEY.to_string(), Feature::int64(i64::from(width))),
        ]))
    }
}
