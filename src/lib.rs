//! A library for building ZIP archives entirely in memory, in one pass.
//! This is useful when the archive is assembled from data that already
//! lives in memory and the finished byte buffer is handed to something
//! else — written to disk, sent as an HTTP response, offered as a download.
//!
//! ZIP is an archive file format that supports lossless data compression.
//! This crate writes the *store* method only: every entry is kept
//! byte-for-byte uncompressed, preceded by its local file header and
//! indexed by a central directory at the end of the archive. The output is
//! readable by any standard unzip-capable tool.
//!
//! The implementation is based on
//!
//! [PKWARE's APPNOTE.TXT v6.3.10](https://pkware.cachefly.net/webdocs/casestudies/APPNOTE.TXT)
//!
//! ## Examples
//!
//! Append entries one by one, then finalize:
//!
//!```rust
//! use memzip::archive::ZipArchive;
//!
//! let mut archive = ZipArchive::new();
//! archive.append("file1.txt", "hello\n").unwrap();
//! archive.append("file2.txt", "world\n").unwrap();
//!
//! let bytes = archive.finalize().unwrap();
//! assert!(bytes.starts_with(&[0x50, 0x4b, 0x03, 0x04]));
//!```
//!
//! Or build from a slice of entries in one call:
//!
//!```rust
//! use memzip::{archive::build_archive, types::ArchiveEntry};
//!
//! let entries = [
//!     ArchiveEntry::new("readme.txt", "An archive built in memory.\n"),
//!     ArchiveEntry::new("data/empty.txt", ""),
//! ];
//!
//! let bytes = build_archive(&entries).unwrap();
//! assert_eq!(&bytes[bytes.len() - 22..][..4], &[0x50, 0x4b, 0x05, 0x06]);
//!```
//!
//! ## Limits
//!
//! The classic (non-zip64) record layout is a hard boundary: at most 65535
//! entries, names up to 65535 bytes, payloads and offsets up to `u32::MAX`
//! bytes. Exceeding any of them fails the build with
//! [`error::ArchiveError`] before a partial archive can escape.

mod constants;
mod descriptor;

pub mod archive;
pub mod crc32;
pub mod error;
pub mod types;
