//! Cursor contract between the lister and an archive reader.

use std::fmt;

use super::entry::EntryMetadata;

/// Numeric status reported by an archive reader.
///
/// Values follow the classic minizip numbering so that diagnostics printed by
/// this tool line up with other zip tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(pub i32);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(0);
    pub const DATA_ERROR: StatusCode = StatusCode(-3);
    pub const END_OF_LIST: StatusCode = StatusCode(-100);
    pub const PARAM_ERROR: StatusCode = StatusCode(-102);
    pub const FORMAT_ERROR: StatusCode = StatusCode(-103);
    pub const READ_ERROR: StatusCode = StatusCode(-115);
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of moving the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStatus {
    /// The cursor now points at an entry.
    Ok,
    /// There are no more entries. Not an error.
    EndOfList,
    /// The reader failed; the listing cannot continue.
    Failed(StatusCode),
}

impl CursorStatus {
    /// Build a status from a raw reader code.
    pub fn from_code(code: i32) -> Self {
        match StatusCode(code) {
            StatusCode::OK => CursorStatus::Ok,
            StatusCode::END_OF_LIST => CursorStatus::EndOfList,
            other => CursorStatus::Failed(other),
        }
    }

    /// Raw reader code for this status.
    pub fn code(self) -> StatusCode {
        match self {
            CursorStatus::Ok => StatusCode::OK,
            CursorStatus::EndOfList => StatusCode::END_OF_LIST,
            CursorStatus::Failed(code) => code,
        }
    }
}

/// Sequential access to the entries of an opened archive.
///
/// Only one entry is current at a time. Moving the cursor invalidates any
/// metadata fetched for the previous entry.
pub trait EntryCursor {
    /// Place the cursor on the first entry.
    fn goto_first_entry(&mut self) -> CursorStatus;

    /// Move the cursor to the entry after the current one.
    fn goto_next_entry(&mut self) -> CursorStatus;

    /// Decode the metadata of the entry under the cursor.
    fn current_entry_info(&self) -> Result<EntryMetadata, StatusCode>;
}

impl<C: EntryCursor + ?Sized> EntryCursor for &mut C {
    fn goto_first_entry(&mut self) -> CursorStatus {
        (**self).goto_first_entry()
    }

    fn goto_next_entry(&mut self) -> CursorStatus {
        (**self).goto_next_entry()
    }

    fn current_entry_info(&self) -> Result<EntryMetadata, StatusCode> {
        (**self).current_entry_info()
    }
}
