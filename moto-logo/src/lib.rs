//! MotoLogo container format (`logo.bin`)
//!
//! Motorola boot logo containers hold a directory of named, run-length
//! compressed images. This crate parses and builds the container and
//! drives the [`moto_run`] codec for each embedded image.
//!
//! # Layout
//!
//! ```text
//! 0x00: magic "MotoLogo\0" (9 bytes)
//! 0x09: header_size (u32 LE) - magic + header_size + all entries
//! 0x0D: directory entries (32 bytes each):
//!         0x00: name (24 bytes, NUL padded, 23 byte maximum)
//!         0x18: offset (u32 LE, absolute)
//!         0x1C: size (u32 LE, blob length)
//! ....: MotoRun image blobs, each starting on a 512-byte boundary
//! ```
//!
//! Unused bytes between the directory and the blobs, and between blobs,
//! are `0xFF`. `num_entries` is `(header_size - 13) / 32` with truncating
//! division; a header size that does not divide evenly is read as the
//! truncated entry count rather than rejected.
//!
//! # Usage
//!
//! ```
//! use moto_logo::{pack, unpack};
//! use moto_run::Raster;
//!
//! let images = vec![("boot".to_string(), Raster::new(4, 2))];
//! let container = pack(&images).unwrap();
//!
//! let extracted = unpack(&container).unwrap();
//! assert_eq!(extracted, images);
//! ```

mod container;
mod directory;

pub use container::{pack, unpack};
pub use directory::{DirEntry, entry_name, parse_directory};

use moto_run::MotoRunError;
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Container magic, including the trailing NUL
pub const LOGO_MAGIC: &[u8; 9] = b"MotoLogo\0";

/// Fixed header size (magic + header_size field)
pub const LOGO_HEADER_FIXED: usize = 13;

/// Image blobs start on multiples of this offset
pub const BLOB_ALIGN: usize = 512;

/// Filler for unused container bytes
pub const PAD_BYTE: u8 = 0xFF;

// =============================================================================
// Error Type
// =============================================================================

/// Errors that can occur while reading or building a logo container
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogoError {
    /// Container does not start with the "MotoLogo\0" magic
    #[error("not a Moto logo.bin file")]
    NotALogoFile,
    /// Container ended mid-header or mid-directory
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// A directory entry references bytes outside the container
    #[error("bad offset or size for image \"{name}\"")]
    BadOffsetOrSize { name: String },
    /// An entry name does not fit the 24-byte NUL-terminated field
    #[error("image name \"{name}\" is longer than 23 bytes")]
    NameTooLong { name: String },
    /// A blob or the whole container exceeds the u32 size domain
    #[error("image \"{name}\" does not fit in the container's 32-bit size fields")]
    BlobTooLarge { name: String },
    /// An embedded image failed to decode
    #[error("could not decode image \"{name}\"")]
    Decode {
        name: String,
        #[source]
        source: MotoRunError,
    },
    /// An image failed to encode
    #[error("could not encode image \"{name}\"")]
    Encode {
        name: String,
        #[source]
        source: MotoRunError,
    },
}
