use fast_image_resize as fr;

use crate::error::{Error, Result};
use crate::image::{Image, PixelFormat};

impl Image {
    /// Resamples the image to a `size` by `size` square using a Lanczos3
    /// convolution filter, with alpha-premultiplied filtering so transparent
    /// pixels don't bleed color into their neighbours.
    ///
    /// Non-square sources are stretched to fill the square; nothing is
    /// cropped or padded.  The source image is left untouched.
    pub fn resample(&self, size: u32) -> Result<Image> {
        if size == 0 {
            return Err(resample_error(size, "target size must be positive"));
        }
        if self.is_empty() {
            return Err(resample_error(size, "source image has no pixels"));
        }

        let src_image = fr::images::Image::from_vec_u8(
            self.width(),
            self.height(),
            self.data().to_vec(),
            fr::PixelType::U8x4,
        )
        .map_err(|e| resample_error(size, e))?;
        let mut dst_image = fr::images::Image::new(size, size, fr::PixelType::U8x4);

        let mut resizer = fr::Resizer::new();
        let options = fr::ResizeOptions::new()
            .resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3));
        resizer
            .resize(&src_image, &mut dst_image, Some(&options))
            .map_err(|e| resample_error(size, e))?;

        Image::from_raw(PixelFormat::RGBA,
                        size,
                        size,
                        dst_image.into_vec())
            .map_err(|e| resample_error(size, e))
    }
}

fn resample_error<E: ToString>(size: u32, reason: E) -> Error {
    Error::Resample {
        size,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Image {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 255 / width.max(1)) as u8,
                                         (y * 255 / height.max(1)) as u8,
                                         128,
                                         255]);
            }
        }
        Image::from_raw(PixelFormat::RGBA, width, height, data).unwrap()
    }

    #[test]
    fn resample_to_every_default_size() {
        let source = gradient(100, 100);
        for &size in &[16, 32, 64, 128, 256, 512, 1024] {
            let resampled = source.resample(size).expect("resample failed");
            assert_eq!(resampled.width(), size);
            assert_eq!(resampled.height(), size);
            assert_eq!(resampled.data().len(), (size * size * 4) as usize);
        }
    }

    #[test]
    fn stretch_non_square_source() {
        let source = gradient(40, 10);
        let resampled = source.resample(20).unwrap();
        assert_eq!((resampled.width(), resampled.height()), (20, 20));
    }

    #[test]
    fn solid_color_survives_resampling() {
        let source = Image::filled(37, 37, [200, 100, 50, 255]);
        for &size in &[16, 128] {
            let resampled = source.resample(size).unwrap();
            for (x, y) in [(0, 0), (size / 2, size / 2), (size - 1, 0)] {
                let pixel = resampled.pixel(x, y);
                for (&actual, &expected) in pixel.iter()
                    .zip(&[200u8, 100, 50, 255]) {
                    assert!(actual.abs_diff(expected) <= 1,
                            "pixel ({}, {}) is {:?}", x, y, pixel);
                }
            }
        }
    }

    #[test]
    fn resample_is_deterministic_and_pure() {
        let source = gradient(64, 64);
        let copy = source.clone();
        let first = source.resample(48).unwrap();
        let second = source.resample(48).unwrap();
        assert_eq!(first, second);
        assert_eq!(source, copy);
    }

    #[test]
    fn reject_zero_size() {
        let source = gradient(8, 8);
        assert!(matches!(source.resample(0),
                         Err(Error::Resample { size: 0, .. })));
    }

    #[test]
    fn reject_empty_source() {
        let source = Image::new(0, 0);
        assert!(matches!(source.resample(16),
                         Err(Error::Resample { size: 16, .. })));
    }
}
