use std::io;

use thiserror::Error;

use crate::decompress::Codec;

/// Failures while opening or unwrapping a stream.
///
/// Not recognising a format is never an error; such streams are
/// classified as resources.
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("corrupt {codec} container: {source}")]
    CorruptContainer {
        codec: Codec,
        #[source]
        source: io::Error,
    },
}

impl OpenError {
    /// Codec that rejected the payload, if any
    pub fn codec(&self) -> Option<Codec> {
        match self {
            OpenError::Io(_) => None,
            OpenError::CorruptContainer { codec, .. } => Some(*codec),
        }
    }
}
