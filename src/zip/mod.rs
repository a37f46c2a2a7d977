//! ZIP central directory reading.
//!
//! This module is the archive reader behind the listing: it opens a ZIP
//! archive from any [`ReadAt`](crate::io::ReadAt) source and exposes its
//! central directory through the [`EntryCursor`](crate::list::EntryCursor)
//! contract.
//!
//! ## Architecture
//!
//! - [`structures`]: fixed-layout records (EOCD, ZIP64 records, central
//!   directory file headers)
//! - [`reader`]: EOCD discovery and the entry cursor
//!
//! ## ZIP Format Overview
//!
//! A ZIP file consists of:
//! 1. Local file headers and compressed data for each file
//! 2. Central Directory with metadata for all files
//! 3. End of Central Directory (EOCD) record at the end
//!
//! The EOCD is read first (from the end of the file), then the Central
//! Directory, so listing never touches file data. For HTTP sources that
//! means only the tail of the archive is downloaded.
//!
//! ## Supported Features
//!
//! - Standard ZIP format (PKZIP APPNOTE 6.3.x compatible)
//! - ZIP64 extensions for archives and entries over 4GB
//! - WinZip AES entries (the inner compression method is reported)
//! - Archives with prepended data, such as self-extracting stubs
//!
//! ## Limitations
//!
//! - No multi-disk archive support

mod reader;
mod structures;

pub use reader::ZipReader;
pub use structures::*;
