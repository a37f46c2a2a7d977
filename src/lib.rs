//! # zipls
//!
//! List the contents of ZIP archives, local or remote.
//!
//! The listing is the classic fixed-width table of packed size, unpacked
//! size, ratio, method, attributes, date, time, CRC-32 and name. Remote
//! archives are read with HTTP Range requests, so only the central directory
//! is ever downloaded.
//!
//! ## Layout
//!
//! - [`list`]: the lister and row formatting, independent of any archive format
//! - [`zip`]: central directory reader implementing [`list::EntryCursor`]
//! - [`io`]: random-access byte sources (local file, HTTP, memory)
//!
//! ## Example
//!
//! ```no_run
//! use zipls::{LocalFileReader, ZipReader, list_entries};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let source = LocalFileReader::new("archive.zip".as_ref())?;
//!     let mut reader = ZipReader::open(&source).await?;
//!
//!     let stdout = std::io::stdout();
//!     list_entries(&mut reader, &mut stdout.lock())?;
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod io;
pub mod list;
pub mod zip;

#[cfg(test)]
pub(crate) mod test_utils;

pub use cli::Cli;
pub use error::{ListError, ReadError};
pub use io::{HttpRangeReader, LocalFileReader, MemoryReader, ReadAt};
pub use list::{EntryCursor, EntryMetadata, ListSummary, list_entries};
pub use zip::ZipReader;
