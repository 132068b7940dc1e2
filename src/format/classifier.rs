//! Ordered signature rules.
//!
//! Formats are not mutually exclusive on their bytes alone: a serialized
//! file may happen to start with a ZIP marker, and a gzip member may happen
//! to declare its own length. [`RULES`] is therefore evaluated strictly in
//! order and the first match wins. Reordering it changes verdicts.

use crate::io::{ClassifiableStream, Rewind, read_prefix, read_string_to_null};

use super::serialized::looks_like_serialized_with_len;
use super::structures::*;

/// State shared by the rules while one stream is classified
pub struct Probe<'a> {
    stream: &'a mut dyn ClassifiableStream,
    len: u64,
    signature: String,
}

impl<'a> Probe<'a> {
    fn new(stream: &'a mut dyn ClassifiableStream) -> Self {
        let len = stream.total_len().unwrap_or(0);
        let signature = match Rewind::at(&mut *stream, 0) {
            Ok(mut guard) => read_string_to_null(&mut *guard, SIGNATURE_MAX_LEN),
            Err(_) => String::new(),
        };
        Self {
            stream,
            len,
            signature,
        }
    }

    /// Leading text signature, read once before any rule runs
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Total length of the stream
    pub fn stream_len(&self) -> u64 {
        self.len
    }

    /// Compare the bytes at `offset` with `magic`.
    ///
    /// A short or failed read is a mismatch. The stream is rewound either way.
    pub fn bytes_at_match(&mut self, offset: u64, magic: &[u8]) -> bool {
        let Ok(mut guard) = Rewind::at(&mut *self.stream, offset) else {
            return false;
        };
        match read_prefix(&mut *guard, magic.len()) {
            Ok(bytes) => bytes == magic,
            Err(e) => {
                tracing::trace!(offset, error = %e, "magic probe read failed");
                false
            }
        }
    }
}

/// One entry of the classification table
pub struct Rule {
    pub name: &'static str,
    pub verdict: FileType,
    pub matches: fn(&mut Probe<'_>) -> bool,
}

/// Classification rules in precedence order
pub const RULES: &[Rule] = &[
    Rule {
        name: "bundle signature",
        verdict: FileType::BundleFile,
        matches: |probe| BUNDLE_SIGNATURES.iter().any(|s| *s == probe.signature()),
    },
    Rule {
        name: "web data signature",
        verdict: FileType::WebFile,
        matches: |probe| probe.signature() == WEB_SIGNATURE,
    },
    Rule {
        name: "gzip magic",
        verdict: FileType::GZipFile,
        matches: |probe| probe.bytes_at_match(0, GZIP_MAGIC),
    },
    Rule {
        name: "brotli tag",
        verdict: FileType::BrotliFile,
        matches: |probe| probe.bytes_at_match(BROTLI_MAGIC_OFFSET, BROTLI_MAGIC),
    },
    Rule {
        name: "serialized header",
        verdict: FileType::AssetsFile,
        matches: |probe| {
            let len = probe.len;
            looks_like_serialized_with_len(&mut *probe.stream, len)
        },
    },
    Rule {
        name: "zip magic",
        verdict: FileType::ZipFile,
        matches: |probe| {
            probe.bytes_at_match(0, ZIP_MAGIC) || probe.bytes_at_match(0, ZIP_SPANNED_MAGIC)
        },
    },
];

/// Verdict when no rule matches
pub const FALLBACK: FileType = FileType::ResourceFile;

/// Decide which container format a stream holds.
///
/// Never fails: anything unrecognised is a [`FileType::ResourceFile`].
/// The stream is positioned at offset 0 when this returns.
pub fn classify<S: ClassifiableStream>(stream: &mut S) -> FileType {
    let mut probe = Probe::new(stream);

    for rule in RULES {
        if (rule.matches)(&mut probe) {
            tracing::debug!(
                verdict = %rule.verdict,
                rule = rule.name,
                len = probe.len,
                "classified stream"
            );
            return rule.verdict;
        }
        tracing::trace!(rule = rule.name, "rule did not match");
    }

    tracing::debug!(verdict = %FALLBACK, len = probe.len, "no rule matched");
    FALLBACK
}
