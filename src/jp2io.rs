use hayro_jpeg2000::{self, ColorSpace};

use crate::error::{Error, Result};
use crate::image::{Image, PixelFormat};

impl Image {
    /// Reads an image from a JPEG 2000 file or codestream, converting it to
    /// RGBA.
    pub fn read_jp2(input: &[u8]) -> Result<Image> {
        let image = hayro_jpeg2000::Image::new(
            input,
            &hayro_jpeg2000::DecodeSettings {
                resolve_palette_indices: true,
                strict: false,
                target_resolution: None,
            },
        )
        .map_err(|e| Error::Decode(format!("invalid JPEG 2000 data: {}", e)))?;

        let pixel_format = match (image.color_space(), image.has_alpha()) {
            (ColorSpace::Gray, false) => PixelFormat::Gray,
            (ColorSpace::Gray, true) => PixelFormat::GrayAlpha,
            (ColorSpace::RGB, false) => PixelFormat::RGB,
            (ColorSpace::RGB, true) => PixelFormat::RGBA,
            (ColorSpace::CMYK, _) => {
                return Err(Error::Decode(
                    "JPEG 2000 images with CMYK color space not supported"
                        .to_string(),
                ));
            }
            (ColorSpace::Unknown { num_channels }, _) => {
                return Err(Error::Decode(format!(
                    "JPEG 2000 images with unknown ({num_channels}-channel) \
                     color space not supported"
                )));
            }
            (ColorSpace::Icc { .. }, _) => {
                return Err(Error::Decode(
                    "JPEG 2000 images with ICC profile not supported"
                        .to_string(),
                ));
            }
        };
        let (width, height) = (image.width(), image.height());
        let data = image.decode().map_err(|e| {
            Error::Decode(format!("failed to decode JPEG 2000 data: {}", e))
        })?;
        Image::from_raw(pixel_format, width, height, data)
    }
}
