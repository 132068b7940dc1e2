//! Container format detection.
//!
//! Decides which downstream parser should handle a stream without
//! disturbing it: every probe puts the stream back at offset 0.
//!
//! ## Architecture
//!
//! - [`structures`]: The [`FileType`] verdicts, magic constants and the
//!   serialized header candidate
//! - [`serialized`]: Structural check for serialized asset files, which
//!   have no magic of their own
//! - [`classifier`]: The ordered rule table and [`classify`]
//!
//! ## Precedence
//!
//! 1. Text signature (`UnityFS`, `UnityWebData1.0`, ...) in the first 20 bytes
//! 2. gzip magic at offset 0
//! 3. `brotli` tag at offset 0x20
//! 4. Serialized header whose declared size equals the stream length
//! 5. ZIP local or spanned header marker
//! 6. Anything else is a resource blob

mod classifier;
mod serialized;
mod structures;

pub use classifier::{FALLBACK, Probe, RULES, Rule, classify};
pub use serialized::looks_like_serialized;
pub use structures::*;
