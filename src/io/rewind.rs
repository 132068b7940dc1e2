use std::io::{self, Read, Seek, SeekFrom};
use std::ops::{Deref, DerefMut};

/// Scoped guard that puts a stream back at offset 0.
///
/// Probes read through the guard; when it goes out of scope the stream is
/// rewound whatever path the probe took. Dropping cannot report a failed
/// seek, so callers that must surface it use [`Rewind::finish`].
pub struct Rewind<'a, S: Seek + ?Sized> {
    stream: &'a mut S,
    rewound: bool,
}

impl<'a, S: Seek + ?Sized> Rewind<'a, S> {
    pub fn new(stream: &'a mut S) -> Self {
        Self {
            stream,
            rewound: false,
        }
    }

    /// Start the probe at `offset`.
    ///
    /// Seeking past the end is allowed by most streams; the following read
    /// then comes back short, which probes treat as a mismatch.
    pub fn at(stream: &'a mut S, offset: u64) -> io::Result<Self> {
        let mut guard = Self::new(stream);
        guard.stream.seek(SeekFrom::Start(offset))?;
        Ok(guard)
    }

    /// Rewind now and report whether the seek succeeded
    pub fn finish(mut self) -> io::Result<()> {
        self.stream.seek(SeekFrom::Start(0))?;
        self.rewound = true;
        Ok(())
    }
}

impl<S: Seek + ?Sized> Deref for Rewind<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &*self.stream
    }
}

impl<S: Seek + ?Sized> DerefMut for Rewind<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut *self.stream
    }
}

impl<S: Read + Seek + ?Sized> Read for Rewind<'_, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}

impl<S: Seek + ?Sized> Drop for Rewind<'_, S> {
    fn drop(&mut self) {
        if self.rewound {
            return;
        }
        if let Err(e) = self.stream.seek(SeekFrom::Start(0)) {
            tracing::warn!(error = %e, "failed to rewind stream after probe");
        }
    }
}
