mod local;
mod rewind;

pub use local::SourceStream;
pub use rewind::Rewind;

use std::io::{self, Read, Seek, SeekFrom};

/// A seekable byte source that can be probed for its container format.
///
/// Anything that is `Read + Seek` qualifies. The total length is derived
/// by seeking to the end and back, so the cursor is left where it was.
pub trait ClassifiableStream: Read + Seek {
    /// Total length of the stream in bytes
    fn total_len(&mut self) -> io::Result<u64> {
        let current = self.stream_position()?;
        let len = self.seek(SeekFrom::End(0))?;
        if current != len {
            self.seek(SeekFrom::Start(current))?;
        }
        Ok(len)
    }
}

impl<T: Read + Seek> ClassifiableStream for T {}

/// Read up to `len` bytes from the current position.
///
/// Hitting end-of-stream early is not an error; the returned buffer is
/// simply shorter than requested.
pub fn read_prefix<R: Read + ?Sized>(reader: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(len);
    reader.take(len as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

/// Read a NUL-terminated string of at most `max_len` bytes.
///
/// Stops at the first NUL, after `max_len` bytes, or at end-of-stream,
/// whichever comes first. A read error ends the string where it stands.
/// Bytes are decoded as UTF-8 with invalid sequences replaced.
pub fn read_string_to_null<R: Read + ?Sized>(reader: &mut R, max_len: usize) -> String {
    let mut bytes = Vec::with_capacity(max_len);
    let mut byte = [0u8; 1];

    while bytes.len() < max_len {
        match reader.read(&mut byte) {
            Ok(0) => break,
            Ok(_) if byte[0] == 0 => break,
            Ok(_) => bytes.push(byte[0]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::trace!(error = %e, "signature read cut short");
                break;
            }
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Cursor;

    /// Stream that serves `data` but fails every read past `fail_after`.
    pub(crate) struct FlakyStream {
        inner: Cursor<Vec<u8>>,
        fail_after: u64,
    }

    impl FlakyStream {
        pub(crate) fn new(data: Vec<u8>, fail_after: u64) -> Self {
            Self {
                inner: Cursor::new(data),
                fail_after,
            }
        }
    }

    impl Read for FlakyStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.inner.position() >= self.fail_after {
                return Err(io::Error::other("device went away"));
            }
            let allowed = (self.fail_after - self.inner.position()) as usize;
            let len = buf.len().min(allowed);
            self.inner.read(&mut buf[..len])
        }
    }

    impl Seek for FlakyStream {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    #[test]
    fn total_len_keeps_position() {
        let mut stream = Cursor::new(vec![0u8; 64]);
        stream.set_position(10);
        assert_eq!(stream.total_len().unwrap(), 64);
        assert_eq!(stream.position(), 10);
    }

    #[test]
    fn read_prefix_tolerates_short_stream() {
        let mut stream = Cursor::new(vec![1u8, 2, 3]);
        assert_eq!(read_prefix(&mut stream, 6).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn string_stops_at_nul() {
        let mut stream = Cursor::new(b"UnityFS\0\0\0\x06".to_vec());
        assert_eq!(read_string_to_null(&mut stream, 20), "UnityFS");
        assert_eq!(stream.position(), 8);
    }

    #[test]
    fn string_is_truncated_at_max_len() {
        let mut stream = Cursor::new(vec![b'A'; 40]);
        assert_eq!(read_string_to_null(&mut stream, 20), "A".repeat(20));
    }

    #[test]
    fn string_survives_read_error() {
        let mut stream = FlakyStream::new(b"UnityRaw-and-more".to_vec(), 5);
        assert_eq!(read_string_to_null(&mut stream, 20), "Unity");
    }

    #[test]
    fn string_from_empty_stream() {
        let mut stream = Cursor::new(Vec::new());
        assert_eq!(read_string_to_null(&mut stream, 20), "");
    }
}
