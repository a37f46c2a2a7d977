//! Archive listing.
//!
//! The lister walks an [`EntryCursor`] from the first entry to the end of
//! the list and writes one fixed-width row per entry. It never touches
//! archive bytes itself: the cursor decodes headers, this module only turns
//! [`EntryMetadata`] into text.
//!
//! ## Termination
//!
//! [`CursorStatus::EndOfList`] is the only successful way out, either right
//! away for an empty archive or after the last entry. Every other cursor
//! failure stops the walk and is reported as a [`ListError`]; rows already
//! written stay written.

mod cursor;
mod entry;
mod row;

use std::io::Write;

use tracing::{debug, trace};

pub use crate::error::ListError;
pub use cursor::{CursorStatus, EntryCursor, StatusCode};
pub use entry::{
    CalendarFields, CompressionMethod, DosDateTime, EntryMetadata, FLAG_ENCRYPTED,
    deflate_sub_level,
};
pub use row::{
    DisplayRow, HEADER_RULE, HEADER_TITLES, crypt_marker, format_row, method_label,
    ratio_percent, write_header,
};

/// Outcome of a completed listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListSummary {
    /// Number of rows written.
    pub entries: u64,
}

/// List every entry reachable from `cursor` into `out`.
///
/// Writes the two header lines followed by one row per entry, in cursor
/// order. The cursor is borrowed and left wherever the walk stopped.
///
/// # Errors
///
/// - [`ListError::PositionFailed`] if the cursor cannot reach the first entry
///   (nothing is written)
/// - [`ListError::MetadataFetchFailed`] if an entry cannot be decoded
/// - [`ListError::AdvanceFailed`] if the cursor cannot move past an entry
/// - [`ListError::Io`] if `out` fails
pub fn list_entries<C, W>(cursor: &mut C, out: &mut W) -> Result<ListSummary, ListError>
where
    C: EntryCursor + ?Sized,
    W: Write + ?Sized,
{
    let mut status = match cursor.goto_first_entry() {
        CursorStatus::Failed(code) => return Err(ListError::PositionFailed(code)),
        status => status,
    };

    write_header(out)?;

    let mut summary = ListSummary::default();

    while status == CursorStatus::Ok {
        let entry = cursor
            .current_entry_info()
            .map_err(ListError::MetadataFetchFailed)?;

        trace!(name = %entry.filename, method = entry.compression_method.as_u16(), "entry");
        writeln!(out, "{}", DisplayRow::from_metadata(&entry))?;
        summary.entries += 1;

        status = cursor.goto_next_entry();
        if let CursorStatus::Failed(code) = status {
            return Err(ListError::AdvanceFailed(code));
        }
    }

    debug!(entries = summary.entries, "listing complete");
    Ok(summary)
}
