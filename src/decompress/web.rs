use crate::error::OpenError;
use crate::format::FileType;
use crate::io::SourceStream;

use super::{Codec, decompress_stream};

/// Peel gzip or brotli web-delivery compression off a classified stream.
///
/// Only [`FileType::GZipFile`] and [`FileType::BrotliFile`] are touched;
/// any other verdict hands the stream back as it was. The result still
/// needs classifying.
pub fn unwrap_web_container(
    stream: SourceStream,
    file_type: FileType,
) -> Result<SourceStream, OpenError> {
    match Codec::for_file_type(file_type) {
        Some(codec) => decompress_stream(stream, codec),
        None => Ok(stream),
    }
}
