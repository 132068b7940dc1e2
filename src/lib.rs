//! # assetprobe
//!
//! Identify Unity asset containers with transparent zstd unwrapping.
//!
//! Given an arbitrary byte stream this library decides which parser should
//! handle it: an asset bundle, a web data container, a serialized asset
//! file, a ZIP archive, a gzip or brotli web wrapper, or an opaque resource
//! blob. Detection never consumes the stream; it is handed back positioned
//! at offset 0 for the parser that comes next.
//!
//! ## Features
//!
//! - Whole-file zstd wrappers are detected and decompressed in memory before
//!   classification
//! - Text signatures, fixed-offset magic and a structural check of the
//!   serialized file header, evaluated in a fixed precedence
//! - Optional peeling of gzip and brotli web-delivery compression
//! - Unrecognised input is a resource, never an error
//!
//! ## Example
//!
//! ```no_run
//! use assetprobe::{FileReader, FileType};
//!
//! fn main() -> anyhow::Result<()> {
//!     let reader = FileReader::open("level0")?;
//!     if reader.file_type() == FileType::AssetsFile {
//!         println!("{} is a serialized file", reader.file_name());
//!     }
//!
//!     // Peel web compression and look again
//!     let reader = reader.unwrap_web_container()?;
//!     println!("{}", reader.file_type());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod decompress;
pub mod error;
pub mod format;
pub mod io;
pub mod reader;

pub use cli::Cli;
pub use decompress::Codec;
pub use error::OpenError;
pub use format::{FileType, classify, looks_like_serialized};
pub use io::{ClassifiableStream, SourceStream};
pub use reader::FileReader;
