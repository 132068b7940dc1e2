use std::path::{Path, PathBuf};

use crate::decompress::{self, Codec};
use crate::error::OpenError;
use crate::format::{FileType, classify};
use crate::io::SourceStream;

/// An input file together with its detected container format.
///
/// The stream is always at offset 0 when it leaves this type, ready for
/// whichever parser [`FileReader::file_type`] points at.
#[derive(Debug)]
pub struct FileReader {
    full_path: PathBuf,
    file_name: String,
    file_type: FileType,
    wrappers: Vec<Codec>,
    stream: SourceStream,
}

impl FileReader {
    /// Open and classify a file, stripping a zstd wrapper first
    pub fn open(path: impl AsRef<Path>) -> Result<Self, OpenError> {
        let path = path.as_ref();
        let (stream, codec) = decompress::unwrap_whole_stream(SourceStream::open(path)?)?;
        Ok(Self::build(path, stream, codec.into_iter().collect()))
    }

    /// Classify an already open stream, without the zstd front-end
    pub fn from_stream(path: impl AsRef<Path>, stream: SourceStream) -> Self {
        Self::build(path.as_ref(), stream, Vec::new())
    }

    fn build(path: &Path, mut stream: SourceStream, wrappers: Vec<Codec>) -> Self {
        let file_type = classify(&mut stream);
        let full_path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Self {
            full_path,
            file_name,
            file_type,
            wrappers,
            stream,
        }
    }

    /// Peel gzip or brotli web compression and classify what is inside.
    ///
    /// Does nothing for other verdicts.
    pub fn unwrap_web_container(self) -> Result<Self, OpenError> {
        let Some(codec) = Codec::for_file_type(self.file_type) else {
            return Ok(self);
        };

        let mut stream = decompress::unwrap_web_container(self.stream, self.file_type)?;
        let file_type = classify(&mut stream);
        let mut wrappers = self.wrappers;
        wrappers.push(codec);

        Ok(Self {
            full_path: self.full_path,
            file_name: self.file_name,
            file_type,
            wrappers,
            stream,
        })
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Codecs stripped so far, outermost first
    pub fn wrappers(&self) -> &[Codec] {
        &self.wrappers
    }

    /// Length of the (possibly decompressed) stream
    pub fn len(&self) -> u64 {
        self.stream.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }

    pub fn stream_mut(&mut self) -> &mut SourceStream {
        &mut self.stream
    }

    pub fn into_stream(self) -> SourceStream {
        self.stream
    }
}
