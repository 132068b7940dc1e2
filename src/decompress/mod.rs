//! Whole-stream decompression.
//!
//! Two kinds of wrapper are handled, both by decompressing the entire
//! payload into memory and swapping it in as the new backing store:
//!
//! - [`open`] strips a zstd frame around the whole file before anything
//!   looks at it
//! - [`unwrap_web_container`] peels gzip or brotli web-delivery compression
//!   after a stream has been classified as such
//!
//! Decompression is all-or-nothing. A payload the codec rejects is
//! reported as [`OpenError::CorruptContainer`] and no partial output is
//! ever classified.

mod front_end;
mod web;

pub use front_end::{is_whole_stream_compressed, open, unwrap_whole_stream};
pub use web::unwrap_web_container;

use std::fmt;
use std::io::{self, Read};

use flate2::read::GzDecoder;

use crate::error::OpenError;
use crate::format::FileType;
use crate::io::SourceStream;

/// Internal buffer size handed to the brotli decoder
const BROTLI_BUFFER_SIZE: usize = 4096;

/// Compression formats that can wrap a whole stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    Zstd,
    Gzip,
    Brotli,
}

impl Codec {
    /// Codec behind a web-compressed verdict
    pub fn for_file_type(file_type: FileType) -> Option<Self> {
        match file_type {
            FileType::GZipFile => Some(Codec::Gzip),
            FileType::BrotliFile => Some(Codec::Brotli),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Codec::Zstd => "zstd",
            Codec::Gzip => "gzip",
            Codec::Brotli => "brotli",
        }
    }

    /// Decompress a complete payload
    pub fn decode(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            Codec::Zstd => zstd::stream::decode_all(data),
            Codec::Gzip => {
                let mut out = Vec::new();
                GzDecoder::new(data).read_to_end(&mut out)?;
                Ok(out)
            }
            Codec::Brotli => {
                let mut out = Vec::new();
                brotli::Decompressor::new(data, BROTLI_BUFFER_SIZE).read_to_end(&mut out)?;
                Ok(out)
            }
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Replace a stream with its decompressed contents.
///
/// The original handle is released once its bytes are copied out. The
/// returned stream is in memory and positioned at 0.
pub(crate) fn decompress_stream(
    mut stream: SourceStream,
    codec: Codec,
) -> Result<SourceStream, OpenError> {
    let compressed = stream.read_all()?;
    drop(stream);

    let data = codec
        .decode(&compressed)
        .map_err(|source| OpenError::CorruptContainer { codec, source })?;

    tracing::debug!(
        %codec,
        compressed_len = compressed.len(),
        decompressed_len = data.len(),
        "unwrapped compressed stream"
    );

    Ok(SourceStream::from_bytes(data))
}
