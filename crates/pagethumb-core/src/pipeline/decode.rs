//! Image decoding with format detection, dimension limits and timeout.

use image::{GenericImageView, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::LimitsConfig;
use crate::error::PipelineError;

/// An image held in memory as 8-bit RGBA, independent of its source encoding.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    /// RGBA8 pixel data
    pub image: RgbaImage,
    /// Format the payload was encoded in
    pub source_format: ImageFormat,
    /// Size of the downloaded payload in bytes
    pub byte_size: u64,
}

impl NormalizedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Decoder with configurable limits and timeout.
pub struct ImageDecoder {
    limits: LimitsConfig,
}

impl ImageDecoder {
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Decode a downloaded payload into a [`NormalizedImage`].
    ///
    /// Decoding runs on the blocking pool under `limits.decode_timeout_ms`.
    /// `url` is only used for error context.
    pub async fn decode(
        &self,
        bytes: Vec<u8>,
        url: &str,
    ) -> Result<NormalizedImage, PipelineError> {
        let url_owned = url.to_string();
        let max_dim = self.limits.max_image_dimension;
        let timeout_duration = Duration::from_millis(self.limits.decode_timeout_ms);

        let decode_result = timeout(timeout_duration, async {
            tokio::task::spawn_blocking(move || Self::decode_sync(bytes, &url_owned, max_dim)).await
        })
        .await;

        match decode_result {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(PipelineError::Decode {
                url: url.to_string(),
                message: format!("Task join error: {}", e),
            }),
            Err(_) => Err(PipelineError::Timeout {
                target: url.to_string(),
                stage: "decode".to_string(),
                timeout_ms: self.limits.decode_timeout_ms,
            }),
        }
    }

    /// Synchronous decode + RGBA conversion (runs in spawn_blocking).
    pub(crate) fn decode_sync(
        bytes: Vec<u8>,
        url: &str,
        max_dim: u32,
    ) -> Result<NormalizedImage, PipelineError> {
        let byte_size = bytes.len() as u64;
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                url: url.to_string(),
                message: format!("Cannot detect image format: {}", e),
            })?;
        let Some(source_format) = reader.format() else {
            return Err(PipelineError::UnsupportedFormat {
                url: url.to_string(),
            });
        };

        let decoded = reader.decode().map_err(|e| PipelineError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let (width, height) = decoded.dimensions();
        if width > max_dim || height > max_dim {
            return Err(PipelineError::ImageTooLarge {
                url: url.to_string(),
                width,
                height,
                max_dim,
            });
        }

        Ok(NormalizedImage {
            image: decoded.into_rgba8(),
            source_format,
            byte_size,
        })
    }
}
