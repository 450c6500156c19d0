use std::io::{BufRead, Seek, Write};

use crate::error::{Error, Result};
use crate::image::{Image, PixelFormat};

/// The eight-byte signature that starts every PNG stream.
pub(crate) const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

impl Image {
    /// Reads an image from a PNG file, converting it to RGBA.
    pub fn read_png<R: BufRead + Seek>(input: R) -> Result<Image> {
        let mut decoder = png::Decoder::new(input);
        decoder.set_transformations(
            png::Transformations::STRIP_16 | png::Transformations::EXPAND,
        );
        let info = decoder.read_header_info().map_err(decode_error)?;
        let (width, height) = (info.width, info.height);
        let mut reader = decoder.read_info().map_err(decode_error)?;

        let (color_type, bit_depth) = reader.output_color_type();
        if bit_depth != png::BitDepth::Eight {
            let msg = format!("unsupported PNG bit depth {:?}", bit_depth);
            return Err(Error::Decode(msg));
        }
        let pixel_format = match color_type {
            png::ColorType::Rgba => PixelFormat::RGBA,
            png::ColorType::Rgb => PixelFormat::RGB,
            png::ColorType::GrayscaleAlpha => PixelFormat::GrayAlpha,
            png::ColorType::Grayscale => PixelFormat::Gray,
            png::ColorType::Indexed => {
                // EXPAND should have resolved the palette.
                return Err(Error::Decode("unexpanded PNG palette".to_string()));
            }
        };

        let buffer_size = reader.output_buffer_size().ok_or_else(|| {
            Error::Decode(format!("PNG dimensions {}x{} are too large",
                                  width,
                                  height))
        })?;
        let mut data = vec![0u8; buffer_size];
        let frame = reader.next_frame(&mut data).map_err(decode_error)?;
        data.truncate(frame.buffer_size());
        reader.finish().map_err(decode_error)?;
        Image::from_raw(pixel_format, width, height, data)
    }

    /// Writes the image to a PNG file as 8-bit RGBA.
    pub fn write_png<W: Write>(&self, output: W) -> Result<()> {
        let mut encoder = png::Encoder::new(output, self.width(), self.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header().map_err(encode_error)?;
        writer.write_image_data(self.data()).map_err(encode_error)?;
        writer.finish().map_err(encode_error)?;
        Ok(())
    }
}

fn decode_error(err: png::DecodingError) -> Error {
    Error::Decode(format!("invalid PNG data: {}", err))
}

fn encode_error(err: png::EncodingError) -> Error {
    Error::Encode(format!("PNG encoder rejected image: {}", err))
}
