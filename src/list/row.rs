//! Fixed-width row formatting.
//!
//! Column layout (one row per entry):
//!
//! ```text
//!       Packed     Unpacked Ratio Method   Attribs Date     Time  CRC-32     Name
//!       ------     -------- ----- ------   ------- ----     ----  ------     ----
//!           12           12  100% Stored        20 01-01-00 00:00 00000000   a.txt
//! ```

use std::fmt;
use std::io::Write;

use super::entry::{CalendarFields, CompressionMethod, EntryMetadata};

/// Column titles.
pub const HEADER_TITLES: &str =
    "      Packed     Unpacked Ratio Method   Attribs Date     Time  CRC-32     Name";

/// Dashed separator under the titles.
pub const HEADER_RULE: &str =
    "      ------     -------- ----- ------   ------- ----     ----  ------     ----";

/// Write the two header lines.
pub fn write_header<W: Write + ?Sized>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{HEADER_TITLES}")?;
    writeln!(out, "{HEADER_RULE}")
}

/// Compressed size as a percentage of the uncompressed size, rounded down.
///
/// Zero when the entry is empty. Not clamped: inflated entries exceed 100.
pub fn ratio_percent(compressed: u64, uncompressed: u64) -> u32 {
    if uncompressed == 0 {
        return 0;
    }
    (compressed as u128 * 100 / uncompressed as u128) as u32
}

/// Short label for the compression method column.
pub fn method_label(method: CompressionMethod, deflate_sub_level: u8) -> &'static str {
    match method {
        CompressionMethod::Stored => "Stored",
        CompressionMethod::Deflate => match deflate_sub_level {
            0 => "Defl:N",
            1 => "Defl:X",
            2 | 3 => "Defl:F",
            _ => "Defl:?",
        },
        CompressionMethod::BZip2 => "BZip2",
        CompressionMethod::Lzma => "LZMA",
        CompressionMethod::Unknown(_) => "?",
    }
}

#[inline]
pub fn crypt_marker(encrypted: bool) -> char {
    if encrypted { '*' } else { ' ' }
}

/// Display-ready view of one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow<'a> {
    pub compressed_size: u64,
    pub uncompressed_size: u64,
    pub ratio_percent: u32,
    pub method_label: &'static str,
    pub crypt_marker: char,
    pub external_attributes: u32,
    pub date: CalendarFields,
    pub crc32: u32,
    pub filename: &'a str,
}

impl<'a> DisplayRow<'a> {
    pub fn from_metadata(entry: &'a EntryMetadata) -> Self {
        Self {
            compressed_size: entry.compressed_size,
            uncompressed_size: entry.uncompressed_size,
            ratio_percent: ratio_percent(entry.compressed_size, entry.uncompressed_size),
            method_label: method_label(entry.compression_method, entry.deflate_sub_level()),
            crypt_marker: crypt_marker(entry.is_encrypted()),
            external_attributes: entry.external_attributes,
            date: entry.modified.calendar(),
            crc32: entry.crc32,
            filename: &entry.filename,
        }
    }
}

impl fmt::Display for DisplayRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>12} {:>12}  {:>3}% {:>6}{} {:>8x} {} {:08x}   {}",
            self.compressed_size,
            self.uncompressed_size,
            self.ratio_percent,
            self.method_label,
            self.crypt_marker,
            self.external_attributes,
            self.date,
            self.crc32,
            self.filename
        )
    }
}

/// Format one listing line (without the trailing newline).
pub fn format_row(entry: &EntryMetadata) -> String {
    DisplayRow::from_metadata(entry).to_string()
}
