use std::io::{self, Read, Seek};
use std::path::Path;

use crate::error::OpenError;
use crate::format::ZSTD_MAGIC;
use crate::io::{Rewind, SourceStream, read_prefix};

use super::{Codec, decompress_stream};

/// Open a file, stripping a whole-stream zstd wrapper if present.
///
/// The returned stream is either the file itself or an in-memory buffer
/// holding the decompressed bytes. Either way it is at offset 0.
pub fn open(path: impl AsRef<Path>) -> Result<SourceStream, OpenError> {
    let stream = SourceStream::open(path.as_ref())?;
    let (stream, _) = unwrap_whole_stream(stream)?;
    Ok(stream)
}

/// Swap a zstd-wrapped stream for its decompressed contents.
///
/// Returns the stream to use from now on together with the codec that was
/// stripped, if any. Streams without the zstd magic are handed back
/// untouched.
pub fn unwrap_whole_stream(
    mut stream: SourceStream,
) -> Result<(SourceStream, Option<Codec>), OpenError> {
    if !is_whole_stream_compressed(&mut stream)? {
        return Ok((stream, None));
    }
    let stream = decompress_stream(stream, Codec::Zstd)?;
    Ok((stream, Some(Codec::Zstd)))
}

/// Whether the stream starts with the zstd frame magic.
///
/// Streams shorter than the magic simply don't match. The stream is at
/// offset 0 afterwards.
pub fn is_whole_stream_compressed<S: Read + Seek + ?Sized>(stream: &mut S) -> io::Result<bool> {
    let mut guard = Rewind::at(stream, 0)?;
    let magic = read_prefix(&mut *guard, ZSTD_MAGIC.len())?;
    guard.finish()?;
    Ok(magic == ZSTD_MAGIC)
}
