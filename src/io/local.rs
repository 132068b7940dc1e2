use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

/// Backing store for a stream under inspection.
///
/// Starts life as an open file. When a wrapper is peeled off the
/// decompressed bytes replace the file entirely and the handle is released.
pub enum SourceStream {
    File { file: File, size: u64 },
    Memory(Cursor<Vec<u8>>),
}

impl SourceStream {
    /// Open a file for reading and remember its size
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let size = file.metadata()?.len();
        Ok(Self::File { file, size })
    }

    /// Wrap an owned buffer, positioned at its start
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self::Memory(Cursor::new(data))
    }

    /// Length of the backing store in bytes
    pub fn len(&self) -> u64 {
        match self {
            Self::File { size, .. } => *size,
            Self::Memory(cursor) => cursor.get_ref().len() as u64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the bytes now live in memory rather than on disk
    pub fn is_in_memory(&self) -> bool {
        matches!(self, Self::Memory(_))
    }

    /// Read the whole backing store from offset 0 into one buffer.
    ///
    /// The stream is left at its end; callers that keep it must rewind.
    pub fn read_all(&mut self) -> io::Result<Vec<u8>> {
        self.seek(SeekFrom::Start(0))?;
        let mut data = Vec::with_capacity(self.len() as usize);
        self.read_to_end(&mut data)?;
        Ok(data)
    }
}

impl Read for SourceStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::File { file, .. } => file.read(buf),
            Self::Memory(cursor) => cursor.read(buf),
        }
    }
}

impl Seek for SourceStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            Self::File { file, .. } => file.seek(pos),
            Self::Memory(cursor) => cursor.seek(pos),
        }
    }
}

impl std::fmt::Debug for SourceStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File { size, .. } => f.debug_struct("File").field("size", size).finish(),
            Self::Memory(cursor) => f
                .debug_struct("Memory")
                .field("size", &cursor.get_ref().len())
                .field("position", &cursor.position())
                .finish(),
        }
    }
}
