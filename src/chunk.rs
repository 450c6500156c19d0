use byteorder::{BigEndian, WriteBytesExt};
use std::io::{self, Write};

use crate::error::Result;
use crate::icontype::{IconTarget, OSType};
use crate::image::Image;

/// The length of an icon chunk header, in bytes:
pub(crate) const ICON_CHUNK_HEADER_LENGTH: u32 = 8;

/// Turns a resampled bitmap into the payload stored in an icon chunk.
///
/// Implementations must be pure: the pipeline calls `encode` concurrently
/// for independent bitmaps.
pub trait ChunkEncoder: Sync {
    /// Encodes the bitmap, returning the compressed payload bytes.
    fn encode(&self, image: &Image) -> Result<Vec<u8>>;
}

/// Encodes chunk payloads as 8-bit RGBA PNG streams.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngEncoder;

impl ChunkEncoder for PngEncoder {
    fn encode(&self, image: &Image) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        image.write_png(&mut data)?;
        Ok(data)
    }
}

/// One tagged, length-prefixed record in an ICNS file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IconChunk {
    /// The OSType for this chunk (e.g. `ic10` or `icp4`).
    pub ostype: OSType,
    /// The encoded data payload.
    pub data: Vec<u8>,
}

impl IconChunk {
    /// Creates an icon chunk with the given OSType and data payload.
    pub fn new(ostype: OSType, data: Vec<u8>) -> IconChunk {
        IconChunk { ostype, data }
    }

    /// Resamples `source` to the target's size and encodes the result into
    /// a chunk tagged with the target's OSType.
    pub fn encode_target<E: ChunkEncoder + ?Sized>(source: &Image,
                                                   target: IconTarget,
                                                   encoder: &E)
                                                   -> Result<IconChunk> {
        let bitmap = source.resample(target.size)?;
        let data = encoder.encode(&bitmap)?;
        Ok(IconChunk::new(target.ostype, data))
    }

    /// Returns the encoded length of the chunk, in bytes, including the
    /// length of the header.
    ///
    /// Panics if the chunk cannot be represented in an ICNS file (that is,
    /// if its payload is 4 GiB or larger).
    pub fn total_length(&self) -> u32 {
        u32::try_from(self.data.len())
            .ok()
            .and_then(|len| len.checked_add(ICON_CHUNK_HEADER_LENGTH))
            .unwrap_or_else(|| {
                panic!("icon chunk '{}' is too large ({} byte payload)",
                       self.ostype,
                       self.data.len())
            })
    }

    /// Writes the icon chunk to within an ICNS file.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let OSType(ref raw_ostype) = self.ostype;
        writer.write_all(raw_ostype)?;
        writer.write_u32::<BigEndian>(self.total_length())?;
        writer.write_all(&self.data)?;
        Ok(())
    }
}
