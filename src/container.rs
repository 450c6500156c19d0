use byteorder::{BigEndian, WriteBytesExt};
use std::io::{self, Write};

use crate::chunk::IconChunk;

/// The first four bytes of an ICNS file:
pub const ICNS_MAGIC_LITERAL: &[u8; 4] = b"icns";

/// The length of an ICNS file header, in bytes:
pub(crate) const ICNS_HEADER_LENGTH: u32 = 8;

/// Returns the encoded length of an ICNS file holding the given chunks, in
/// bytes, including the length of the file header.
///
/// Panics if the total does not fit in the file's 32-bit length field.
pub fn total_length(chunks: &[IconChunk]) -> u32 {
    let mut length = ICNS_HEADER_LENGTH;
    for chunk in chunks {
        length = length.checked_add(chunk.total_length()).unwrap_or_else(|| {
            panic!("icns container exceeds 4 GiB ({} chunks)", chunks.len())
        });
    }
    length
}

/// Writes an ICNS file holding the given chunks, in order.
pub fn write_container<W: Write>(chunks: &[IconChunk],
                                 mut writer: W)
                                 -> io::Result<()> {
    writer.write_all(ICNS_MAGIC_LITERAL)?;
    writer.write_u32::<BigEndian>(total_length(chunks))?;
    for chunk in chunks {
        chunk.write(writer.by_ref())?;
    }
    Ok(())
}

/// Lays out the given chunks, in order, as a complete ICNS file.
///
/// The returned buffer is exactly as long as the length recorded in its
/// header.  An empty chunk list yields the bare 8-byte header.
pub fn assemble(chunks: &[IconChunk]) -> Vec<u8> {
    let length = total_length(chunks);
    let mut output = Vec::with_capacity(length as usize);
    if let Err(err) = write_container(chunks, &mut output) {
        unreachable!("writing to a Vec cannot fail: {}", err);
    }
    assert_eq!(output.len(), length as usize,
               "icns container length does not match its header");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icontype::OSType;

    #[test]
    fn assemble_empty_container() {
        let output = assemble(&[]);
        assert_eq!(b"icns\0\0\0\x08", &output as &[u8]);
        assert_eq!(total_length(&[]), 8);
    }

    #[test]
    fn assemble_single_chunk() {
        let chunk = IconChunk::new(OSType(*b"icp4"), vec![0xff; 16]);
        let output = assemble(&[chunk]);
        assert_eq!(output.len(), 32);
        assert_eq!(&output[0..4], b"icns");
        assert_eq!(&output[4..8], &[0, 0, 0, 32]);
        assert_eq!(&output[8..12], b"icp4");
        assert_eq!(&output[12..16], &[0, 0, 0, 24]);
        assert_eq!(&output[16..32], &[0xff; 16]);
    }

    #[test]
    fn assemble_container_with_fake_chunks() {
        let chunks = [IconChunk::new(OSType(*b"quux"), b"foobar".to_vec()),
                      IconChunk::new(OSType(*b"baz!"), b"#".to_vec())];
        let output = assemble(&chunks);
        assert_eq!(b"icns\0\0\0\x1fquux\0\0\0\x0efoobarbaz!\0\0\0\x09#",
                   &output as &[u8]);
    }

    #[test]
    fn streaming_matches_assembled() {
        let chunks = [IconChunk::new(OSType(*b"ic07"), vec![1, 2, 3]),
                      IconChunk::new(OSType(*b"icp6"), vec![4; 300])];
        let mut streamed = Vec::new();
        write_container(&chunks, &mut streamed).expect("write failed");
        assert_eq!(streamed, assemble(&chunks));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_chunk() -> impl Strategy<Value = IconChunk> {
            (any::<[u8; 4]>(), prop::collection::vec(any::<u8>(), 1..256))
                .prop_map(|(tag, data)| IconChunk::new(OSType(tag), data))
        }

        /// Walks the chunk records of an assembled container by following
        /// each chunk's self-length.
        fn walk(buffer: &[u8]) -> Vec<IconChunk> {
            let mut chunks = Vec::new();
            let mut offset = 8;
            while offset < buffer.len() {
                let mut tag = [0u8; 4];
                tag.copy_from_slice(&buffer[offset..offset + 4]);
                let mut len = [0u8; 4];
                len.copy_from_slice(&buffer[offset + 4..offset + 8]);
                let len = u32::from_be_bytes(len) as usize;
                let data = buffer[offset + 8..offset + len].to_vec();
                chunks.push(IconChunk::new(OSType(tag), data));
                offset += len;
            }
            assert_eq!(offset, buffer.len());
            chunks
        }

        proptest! {
            #[test]
            fn header_length_matches_buffer(
                chunks in prop::collection::vec(arb_chunk(), 0..8)
            ) {
                let output = assemble(&chunks);
                let mut header = [0u8; 4];
                header.copy_from_slice(&output[4..8]);
                prop_assert_eq!(&output[0..4], ICNS_MAGIC_LITERAL);
                prop_assert_eq!(u32::from_be_bytes(header) as usize,
                                output.len());
                prop_assert_eq!(total_length(&chunks) as usize, output.len());
            }

            #[test]
            fn walking_chunks_recovers_input(
                chunks in prop::collection::vec(arb_chunk(), 0..8)
            ) {
                let output = assemble(&chunks);
                prop_assert_eq!(walk(&output), chunks);
            }
        }
    }
}
