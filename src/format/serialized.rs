//! Structural check for serialized asset files.
//!
//! Serialized files carry no magic. Instead the header declares the total
//! file size and the offset of the object data, and both can be checked
//! against the real length of the stream.

use std::io::Read;

use crate::io::{ClassifiableStream, Rewind};

use super::structures::{HeaderLayout, SerializedHeader};

impl SerializedHeader {
    /// Read a header candidate from the start of a stream of `len` bytes.
    ///
    /// Returns `None` when the stream is too short for the layout its
    /// version asks for, or when a read fails. The stream is back at
    /// offset 0 on return.
    pub fn read<S: ClassifiableStream + ?Sized>(stream: &mut S, len: u64) -> Option<Self> {
        let mut guard = Rewind::at(stream, 0).ok()?;
        if len < HeaderLayout::Narrow.min_stream_len() {
            return None;
        }

        let mut narrow = [0u8; SerializedHeader::NARROW_SIZE];
        guard.read_exact(&mut narrow).ok()?;
        let mut header = SerializedHeader::from_narrow_bytes(&narrow)?;

        match HeaderLayout::for_version(header.version) {
            HeaderLayout::Narrow => {}
            HeaderLayout::Wide => {
                if len < HeaderLayout::Wide.min_stream_len() {
                    tracing::trace!(
                        version = header.version,
                        len,
                        "stream too short for wide serialized header"
                    );
                    return None;
                }
                let mut wide = [0u8; SerializedHeader::WIDE_EXT_SIZE];
                guard.read_exact(&mut wide).ok()?;
                header.apply_wide_bytes(&wide)?;
            }
        }

        Some(header)
    }
}

/// Whether the stream looks like a serialized asset file.
///
/// A heuristic, not a validation: any file whose leading bytes happen to
/// declare its own length is accepted.
pub fn looks_like_serialized<S: ClassifiableStream + ?Sized>(stream: &mut S) -> bool {
    let Ok(mut guard) = Rewind::at(stream, 0) else {
        return false;
    };
    let Ok(len) = guard.total_len() else {
        return false;
    };
    looks_like_serialized_with_len(&mut *guard, len)
}

pub(crate) fn looks_like_serialized_with_len<S: ClassifiableStream + ?Sized>(
    stream: &mut S,
    len: u64,
) -> bool {
    match SerializedHeader::read(stream, len) {
        Some(header) => {
            let consistent = header.is_consistent_with(len);
            if !consistent {
                tracing::trace!(
                    declared_size = header.file_size,
                    data_offset = header.data_offset,
                    len,
                    "serialized header sizes disagree with stream"
                );
            }
            consistent
        }
        None => false,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use byteorder::{BigEndian, WriteBytesExt};
    use std::io::Cursor;

    /// Build a narrow header padded with zeros to `total_len` bytes
    pub(crate) fn narrow_file(
        file_size: u32,
        version: u32,
        data_offset: u32,
        total_len: usize,
    ) -> Vec<u8> {
        let mut data = Vec::with_capacity(total_len);
        data.write_u32::<BigEndian>(0).unwrap();
        data.write_u32::<BigEndian>(file_size).unwrap();
        data.write_u32::<BigEndian>(version).unwrap();
        data.write_u32::<BigEndian>(data_offset).unwrap();
        data.extend_from_slice(&[0, 0, 0, 0]);
        data.resize(total_len, 0);
        data
    }

    /// Build a wide header padded with zeros to `total_len` bytes
    fn wide_file(file_size: i64, version: u32, data_offset: i64, total_len: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(total_len);
        data.write_u32::<BigEndian>(0).unwrap();
        data.write_u32::<BigEndian>(0).unwrap();
        data.write_u32::<BigEndian>(version).unwrap();
        data.write_u32::<BigEndian>(0).unwrap();
        data.extend_from_slice(&[0, 0, 0, 0]);
        data.write_u32::<BigEndian>(0x1234).unwrap();
        data.write_i64::<BigEndian>(file_size).unwrap();
        data.write_i64::<BigEndian>(data_offset).unwrap();
        data.resize(total_len, 0);
        data
    }

    #[test]
    fn accepts_matching_narrow_header() {
        let mut stream = Cursor::new(narrow_file(64, 17, 32, 64));
        assert!(looks_like_serialized(&mut stream));
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn rejects_size_off_by_one() {
        let mut stream = Cursor::new(narrow_file(65, 17, 32, 64));
        assert!(!looks_like_serialized(&mut stream));
        assert_eq!(stream.position(), 0);

        let mut stream = Cursor::new(narrow_file(63, 17, 32, 64));
        assert!(!looks_like_serialized(&mut stream));
    }

    #[test]
    fn data_offset_may_equal_length() {
        let mut stream = Cursor::new(narrow_file(64, 9, 64, 64));
        assert!(looks_like_serialized(&mut stream));
    }

    #[test]
    fn rejects_data_offset_past_end() {
        let mut stream = Cursor::new(narrow_file(64, 9, 65, 64));
        assert!(!looks_like_serialized(&mut stream));
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn short_stream_is_rejected_without_reading() {
        let mut stream = Cursor::new(vec![0u8; 19]);
        assert!(!looks_like_serialized(&mut stream));
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn short_stream_never_reads_past_end() {
        // Fails every read; a short stream must not even try one.
        let mut stream = crate::io::tests::FlakyStream::new(vec![0u8; 12], 0);
        assert!(!looks_like_serialized(&mut stream));
    }

    #[test]
    fn wide_header_uses_64_bit_fields() {
        let mut stream = Cursor::new(wide_file(48, 22, 40, 48));
        let header = SerializedHeader::read(&mut stream, 48).unwrap();
        assert_eq!(header.layout, HeaderLayout::Wide);
        assert_eq!(header.metadata_size, 0x1234);
        assert_eq!(header.version, 22);
        assert_eq!(header.file_size, 48);
        assert_eq!(stream.position(), 0);
        assert!(looks_like_serialized(&mut stream));
    }

    #[test]
    fn wide_header_ignores_narrow_size_fields() {
        // Narrow size field says 100, the wide one is authoritative.
        let mut data = wide_file(64, 22, 0, 64);
        data[4..8].copy_from_slice(&100u32.to_be_bytes());
        let mut stream = Cursor::new(data);
        assert!(looks_like_serialized(&mut stream));
    }

    #[test]
    fn wide_version_needs_48_bytes() {
        let mut stream = Cursor::new(narrow_file(40, 22, 0, 40));
        assert!(!looks_like_serialized(&mut stream));
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn negative_wide_size_never_matches() {
        let mut stream = Cursor::new(wide_file(-1, 23, 0, 48));
        assert!(!looks_like_serialized(&mut stream));
    }

    #[test]
    fn read_failure_is_a_mismatch() {
        let data = narrow_file(64, 17, 32, 64);
        let mut stream = crate::io::tests::FlakyStream::new(data, 10);
        assert!(!looks_like_serialized(&mut stream));
    }

    #[test]
    fn header_is_read_from_start_whatever_the_cursor() {
        let mut stream = Cursor::new(narrow_file(64, 17, 32, 64));
        stream.set_position(8);
        assert!(looks_like_serialized(&mut stream));
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn short_stream_is_rewound() {
        let mut stream = Cursor::new(vec![0u8; 10]);
        stream.set_position(5);
        assert!(!looks_like_serialized(&mut stream));
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn short_wide_stream_is_rewound() {
        let mut stream = Cursor::new(narrow_file(40, 22, 0, 40));
        stream.set_position(30);
        assert!(!looks_like_serialized(&mut stream));
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn read_header_ignores_cursor_position() {
        let mut stream = Cursor::new(wide_file(48, 22, 40, 48));
        stream.set_position(44);
        let header = SerializedHeader::read(&mut stream, 48).unwrap();
        assert_eq!(header.file_size, 48);
        assert_eq!(header.data_offset, 40);
        assert_eq!(stream.position(), 0);
    }
}
