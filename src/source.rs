//! Decoding of source images handed over by the image-generation service.

use base64::Engine;
use log::debug;
use std::io::Cursor;

use crate::error::{Error, Result};
use crate::image::Image;
use crate::pngio::PNG_SIGNATURE;

/// Signature box that starts a JP2 (boxed) file.
const JP2_SIGNATURE: &[u8; 12] = b"\x00\x00\x00\x0cjP  \r\n\x87\n";

/// SOC + SIZ markers that start a raw JPEG 2000 codestream.
pub(crate) const J2K_SIGNATURE: &[u8; 4] = b"\xff\x4f\xff\x51";

/// Raster formats recognized by their leading signature bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SourceFormat {
    /// A PNG stream.
    Png,
    /// A JP2 file or raw JPEG 2000 codestream.
    Jpeg2000,
}

/// Identifies the raster format of `bytes` from its signature, without
/// decoding anything.  Returns `None` for unrecognized data.
pub fn sniff_format(bytes: &[u8]) -> Option<SourceFormat> {
    if bytes.starts_with(PNG_SIGNATURE) {
        Some(SourceFormat::Png)
    } else if bytes.starts_with(JP2_SIGNATURE) ||
              bytes.starts_with(J2K_SIGNATURE) {
        Some(SourceFormat::Jpeg2000)
    } else {
        None
    }
}

/// Decodes a PNG (or, with the `jp2io` feature, JPEG 2000) byte stream into
/// an RGBA image.  Unrecognized, corrupt, or zero-sized images are rejected
/// with `Error::Decode`.
pub fn decode(bytes: &[u8]) -> Result<Image> {
    let image = match sniff_format(bytes) {
        Some(SourceFormat::Png) => Image::read_png(Cursor::new(bytes))?,
        Some(SourceFormat::Jpeg2000) => read_jpeg2000(bytes)?,
        None => {
            return Err(Error::Decode("unrecognized image format".to_string()));
        }
    };
    if image.is_empty() {
        let msg = format!("source image is empty ({}x{})",
                          image.width(),
                          image.height());
        return Err(Error::Decode(msg));
    }
    debug!("decoded {}x{} source image from {} bytes",
           image.width(),
           image.height(),
           bytes.len());
    Ok(image)
}

/// Decodes base64 image data, either bare or wrapped in a
/// `data:<mime>;base64,<payload>` URL, then decodes the image it contains.
pub fn decode_base64(text: &str) -> Result<Image> {
    let text = text.trim();
    let payload = match text.strip_prefix("data:") {
        Some(url) => {
            let (header, payload) = url.split_once(',').ok_or_else(|| {
                Error::Decode("data URL has no payload".to_string())
            })?;
            if !header.ends_with(";base64") {
                let msg = format!("data URL is not base64-encoded ({})",
                                  header);
                return Err(Error::Decode(msg));
            }
            payload
        }
        None => text,
    };
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| Error::Decode(format!("invalid base64 data: {}", e)))?;
    decode(&bytes)
}

#[cfg(feature = "jp2io")]
fn read_jpeg2000(bytes: &[u8]) -> Result<Image> {
    Image::read_jp2(bytes)
}

#[cfg(not(feature = "jp2io"))]
fn read_jpeg2000(_bytes: &[u8]) -> Result<Image> {
    Err(Error::Decode("JPEG 2000 support is not enabled".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(image: &Image) -> Vec<u8> {
        let mut png = Vec::new();
        image.write_png(&mut png).unwrap();
        png
    }

    #[test]
    fn decode_png() {
        let image = Image::filled(5, 3, [9, 8, 7, 6]);
        let decoded = decode(&png_bytes(&image)).expect("decode failed");
        assert_eq!(decoded, image);
    }

    #[test]
    fn decode_unknown_format() {
        match decode(b"GIF89a......") {
            Err(Error::Decode(msg)) => {
                assert_eq!(msg, "unrecognized image format")
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(decode(&[]), Err(Error::Decode(_))));
    }

    #[test]
    fn sniff_signatures() {
        let png = png_bytes(&Image::filled(1, 1, [0, 0, 0, 0]));
        assert_eq!(sniff_format(&png), Some(SourceFormat::Png));
        assert_eq!(sniff_format(JP2_SIGNATURE), Some(SourceFormat::Jpeg2000));
        assert_eq!(sniff_format(J2K_SIGNATURE), Some(SourceFormat::Jpeg2000));
        assert_eq!(sniff_format(b"\x89PN"), None);
        assert_eq!(sniff_format(b"GIF89a"), None);
    }

    #[test]
    #[cfg(feature = "jp2io")]
    fn decode_truncated_jpeg2000() {
        for bytes in [&JP2_SIGNATURE[..], &J2K_SIGNATURE[..]] {
            match decode(bytes) {
                Err(Error::Decode(msg)) => {
                    assert_ne!(msg, "unrecognized image format")
                }
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }

    #[test]
    #[cfg(not(feature = "jp2io"))]
    fn decode_jpeg2000_without_codec() {
        for bytes in [&JP2_SIGNATURE[..], &J2K_SIGNATURE[..]] {
            match decode(bytes) {
                Err(Error::Decode(msg)) => {
                    assert_eq!(msg, "JPEG 2000 support is not enabled")
                }
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }

    #[test]
    fn decode_corrupt_png() {
        let mut png = png_bytes(&Image::filled(4, 4, [1, 1, 1, 1]));
        // Scramble the IDAT payload, leaving the header and IEND intact.
        let end = png.len() - 16;
        for byte in &mut png[41..end] {
            *byte ^= 0x5a;
        }
        assert!(matches!(decode(&png), Err(Error::Decode(_))));
    }

    #[test]
    fn decode_data_url() {
        let image = Image::filled(2, 2, [0, 255, 0, 255]);
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(png_bytes(&image));
        let url = format!("data:image/png;base64,{}", encoded);
        assert_eq!(decode_base64(&url).expect("decode failed"), image);
        assert_eq!(decode_base64(&encoded).expect("decode failed"), image);
    }

    #[test]
    fn decode_bad_data_url() {
        assert!(matches!(decode_base64("data:image/png,abcd"),
                         Err(Error::Decode(_))));
        assert!(matches!(decode_base64("data:image/png;base64"),
                         Err(Error::Decode(_))));
        assert!(matches!(decode_base64("@@not base64@@"),
                         Err(Error::Decode(_))));
    }
}
