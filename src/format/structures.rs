use byteorder::{BigEndian, ReadBytesExt};
use std::fmt;
use std::io::{Cursor, Read};

/// Container formats a stream can be classified as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileType {
    BundleFile,
    WebFile,
    GZipFile,
    BrotliFile,
    ZipFile,
    AssetsFile,
    ResourceFile,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::BundleFile => "BundleFile",
            FileType::WebFile => "WebFile",
            FileType::GZipFile => "GZipFile",
            FileType::BrotliFile => "BrotliFile",
            FileType::ZipFile => "ZipFile",
            FileType::AssetsFile => "AssetsFile",
            FileType::ResourceFile => "ResourceFile",
        }
    }

    /// Whether this verdict is a web-delivery compression wrapper
    pub fn is_web_compressed(&self) -> bool {
        matches!(self, FileType::GZipFile | FileType::BrotliFile)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text signatures that open an asset bundle
pub const BUNDLE_SIGNATURES: &[&str] = &["UnityWeb", "UnityRaw", "UnityArchive", "UnityFS"];

/// Text signature of a web data container
pub const WEB_SIGNATURE: &str = "UnityWebData1.0";

/// Maximum length of the leading text signature
pub const SIGNATURE_MAX_LEN: usize = 20;

/// gzip member header
pub const GZIP_MAGIC: &[u8] = b"\x1f\x8b";

/// Tag written into the brotli stream comment of web builds
pub const BROTLI_MAGIC: &[u8] = b"brotli";
pub const BROTLI_MAGIC_OFFSET: u64 = 0x20;

/// ZIP local file header and spanned archive marker
pub const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
pub const ZIP_SPANNED_MAGIC: &[u8] = b"PK\x07\x08";

/// Zstandard frame magic, marks a whole-stream compressed file
pub const ZSTD_MAGIC: &[u8] = b"\x28\xb5\x2f\xfd";

/// Header layout of a serialized asset file.
///
/// The format version decides how wide the size and offset fields are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLayout {
    /// metadata u32, file size u32, version u32, data offset u32,
    /// endianness u8, reserved [u8; 3]
    Narrow,
    /// Narrow block followed by metadata u32, file size i64, data offset i64
    Wide,
}

impl HeaderLayout {
    /// First version that uses the wide layout
    pub const WIDE_VERSION: u32 = 22;

    pub fn for_version(version: u32) -> Self {
        if version >= Self::WIDE_VERSION {
            HeaderLayout::Wide
        } else {
            HeaderLayout::Narrow
        }
    }

    /// Smallest stream that can hold a header in this layout
    pub fn min_stream_len(&self) -> u64 {
        match self {
            HeaderLayout::Narrow => 20,
            HeaderLayout::Wide => 48,
        }
    }
}

/// Candidate header read from the start of a possibly serialized file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedHeader {
    pub metadata_size: u32,
    pub file_size: i64,
    pub version: u32,
    pub data_offset: i64,
    pub endianness: u8,
    pub reserved: [u8; 3],
    pub layout: HeaderLayout,
}

impl SerializedHeader {
    /// Size of the narrow header block
    pub const NARROW_SIZE: usize = 20;
    /// Size of the wide fields that follow the narrow block
    pub const WIDE_EXT_SIZE: usize = 20;

    /// Parse the narrow block. All fields are big-endian.
    pub fn from_narrow_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < Self::NARROW_SIZE {
            return None;
        }

        let mut cursor = Cursor::new(data);
        let metadata_size = cursor.read_u32::<BigEndian>().ok()?;
        let file_size = cursor.read_u32::<BigEndian>().ok()?;
        let version = cursor.read_u32::<BigEndian>().ok()?;
        let data_offset = cursor.read_u32::<BigEndian>().ok()?;
        let endianness = cursor.read_u8().ok()?;
        let mut reserved = [0u8; 3];
        cursor.read_exact(&mut reserved).ok()?;

        Some(Self {
            metadata_size,
            file_size: file_size as i64,
            version,
            data_offset: data_offset as i64,
            endianness,
            reserved,
            layout: HeaderLayout::Narrow,
        })
    }

    /// Replace the size fields with the wide ones that follow the narrow block.
    ///
    /// Version, endianness and reserved bytes keep their narrow values.
    pub fn apply_wide_bytes(&mut self, data: &[u8]) -> Option<()> {
        if data.len() < Self::WIDE_EXT_SIZE {
            return None;
        }

        let mut cursor = Cursor::new(data);
        self.metadata_size = cursor.read_u32::<BigEndian>().ok()?;
        self.file_size = cursor.read_i64::<BigEndian>().ok()?;
        self.data_offset = cursor.read_i64::<BigEndian>().ok()?;
        self.layout = HeaderLayout::Wide;
        Some(())
    }

    /// Whether the declared sizes agree with a stream of `len` bytes.
    ///
    /// The declared file size must match exactly and the data offset must
    /// not point past the end.
    pub fn is_consistent_with(&self, len: u64) -> bool {
        let Ok(len) = i64::try_from(len) else {
            return false;
        };
        self.file_size == len && self.data_offset <= len
    }
}
