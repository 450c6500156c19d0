use crate::error::{Error, Result};

/// A decoded bitmap, always stored as 8-bit-per-channel RGBA.
///
/// Images are never mutated once built; resampling produces a new image.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    data: Box<[u8]>,
}

impl Image {
    /// Creates a new, fully transparent image.
    ///
    /// Panics if `width * height` pixels cannot be addressed in memory.
    pub fn new(width: u32, height: u32) -> Image {
        let data_bytes = num_pixels(width, height)
            .checked_mul(PixelFormat::RGBA.bytes_per_pixel() as usize)
            .unwrap_or_else(|| too_large(width, height));
        Image {
            width,
            height,
            data: vec![0u8; data_bytes].into_boxed_slice(),
        }
    }

    /// Creates an image filled with a single RGBA color.
    ///
    /// Panics if `width * height` pixels cannot be addressed in memory.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Image {
        let num_pixels = num_pixels(width, height);
        if num_pixels.checked_mul(rgba.len()).is_none() {
            too_large(width, height);
        }
        let data = rgba.repeat(num_pixels);
        Image {
            width,
            height,
            data: data.into_boxed_slice(),
        }
    }

    /// Wraps raw pixel data in the given format, converting it to RGBA.
    /// Returns an error if the buffer length does not match the dimensions.
    pub fn from_raw(format: PixelFormat,
                    width: u32,
                    height: u32,
                    data: Vec<u8>)
                    -> Result<Image> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| {
                pixels.checked_mul(format.bytes_per_pixel() as usize)
            })
            .ok_or_else(|| {
                Error::Decode(format!("image dimensions {}x{} are too large",
                                      width,
                                      height))
            })?;
        if data.len() != expected {
            let msg = format!("pixel buffer has {} bytes (expected {} for \
                               {}x{} {:?})",
                              data.len(),
                              expected,
                              width,
                              height,
                              format);
            return Err(Error::Decode(msg));
        }
        let rgba = match format {
            PixelFormat::RGBA => data.into_boxed_slice(),
            PixelFormat::RGB => rgb_to_rgba(&data),
            PixelFormat::GrayAlpha => gray_alpha_to_rgba(&data),
            PixelFormat::Gray => gray_to_rgba(&data),
        };
        Ok(Image {
            width,
            height,
            data: rgba,
        })
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns true if the image has no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns a reference to the image's RGBA pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the RGBA value of the pixel at the given coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let start = 4 * (y as usize * self.width as usize + x as usize);
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.data[start..start + 4]);
        rgba
    }
}

/// A layout of 8-bit pixel data as produced by image decoders.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PixelFormat {
    /// 32-bit color with alpha channel.
    RGBA,
    /// 24-bit color with no alpha.
    RGB,
    /// 16-bit grayscale-with-alpha.
    GrayAlpha,
    /// 8-bit grayscale with no alpha.
    Gray,
}

impl PixelFormat {
    /// Returns the number of bytes needed to store a single pixel in this
    /// format.
    pub fn bytes_per_pixel(self) -> u32 {
        match self {
            PixelFormat::RGBA => 4,
            PixelFormat::RGB => 3,
            PixelFormat::GrayAlpha => 2,
            PixelFormat::Gray => 1,
        }
    }
}

fn num_pixels(width: u32, height: u32) -> usize {
    (width as usize)
        .checked_mul(height as usize)
        .unwrap_or_else(|| too_large(width, height))
}

fn too_large(width: u32, height: u32) -> ! {
    panic!("image dimensions {}x{} are too large", width, height)
}

fn rgb_to_rgba(rgb: &[u8]) -> Box<[u8]> {
    let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
    for pixel in rgb.chunks_exact(3) {
        rgba.extend_from_slice(pixel);
        rgba.push(u8::MAX);
    }
    rgba.into_boxed_slice()
}

fn gray_alpha_to_rgba(gray_alpha: &[u8]) -> Box<[u8]> {
    let mut rgba = Vec::with_capacity(gray_alpha.len() * 2);
    for pixel in gray_alpha.chunks_exact(2) {
        rgba.extend_from_slice(&[pixel[0], pixel[0], pixel[0], pixel[1]]);
    }
    rgba.into_boxed_slice()
}

fn gray_to_rgba(gray: &[u8]) -> Box<[u8]> {
    let mut rgba = Vec::with_capacity(gray.len() * 4);
    for &value in gray {
        rgba.extend_from_slice(&[value, value, value, u8::MAX]);
    }
    rgba.into_boxed_slice()
}
