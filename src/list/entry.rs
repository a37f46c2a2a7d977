//! Per-entry metadata as reported by the archive reader.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, Timelike};

/// General purpose flag: entry is encrypted.
pub const FLAG_ENCRYPTED: u16 = 0x0001;

/// ZIP compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Stored,
    Deflate,
    BZip2,
    Lzma,
    Unknown(u16),
}

impl CompressionMethod {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => CompressionMethod::Stored,
            8 => CompressionMethod::Deflate,
            12 => CompressionMethod::BZip2,
            14 => CompressionMethod::Lzma,
            _ => CompressionMethod::Unknown(value),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            CompressionMethod::Stored => 0,
            CompressionMethod::Deflate => 8,
            CompressionMethod::BZip2 => 12,
            CompressionMethod::Lzma => 14,
            CompressionMethod::Unknown(v) => *v,
        }
    }
}

/// Calendar fields decoded from a packed timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalendarFields {
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    /// Year modulo 100.
    pub year2: u8,
    pub hour: u8,
    pub minute: u8,
}

impl CalendarFields {
    /// Render as `MM-DD-YY hh:mm`.
    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CalendarFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}-{:02}-{:02} {:02}:{:02}",
            self.month, self.day, self.year2, self.hour, self.minute
        )
    }
}

/// MS-DOS packed date and time, `date << 16 | time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DosDateTime(pub u32);

impl DosDateTime {
    pub fn new(date: u16, time: u16) -> Self {
        Self(((date as u32) << 16) | time as u32)
    }

    #[inline]
    pub fn date(self) -> u16 {
        (self.0 >> 16) as u16
    }

    #[inline]
    pub fn time(self) -> u16 {
        self.0 as u16
    }

    /// Decode into calendar fields.
    ///
    /// Out-of-range fields roll over into the next larger unit the way
    /// `mktime` normalizes them: April 31 becomes May 1, month 0 is December
    /// of the previous year and 62 seconds carry into the minute. No time
    /// zone is applied.
    pub fn calendar(self) -> CalendarFields {
        let date = self.date();
        let time = self.time();

        let day = (date & 0x1F) as i64;
        let month = ((date >> 5) & 0x0F) as i32;
        let year = ((date >> 9) & 0x7F) as i32 + 1980;
        let second = ((time & 0x1F) * 2) as i64;
        let minute = ((time >> 5) & 0x3F) as i64;
        let hour = ((time >> 11) & 0x1F) as i64;

        let year = year + (month - 1).div_euclid(12);
        let month = (month - 1).rem_euclid(12) as u32 + 1;

        let Some(start) = NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        else {
            return CalendarFields::default();
        };
        let offset =
            Duration::days(day - 1) + Duration::seconds(hour * 3600 + minute * 60 + second);
        let Some(at) = start.checked_add_signed(offset) else {
            return CalendarFields::default();
        };

        CalendarFields {
            month: at.month() as u8,
            day: at.day() as u8,
            year2: at.year().rem_euclid(100) as u8,
            hour: at.hour() as u8,
            minute: at.minute() as u8,
        }
    }
}

/// Metadata of the entry under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    pub compressed_size: u64,
    pub uncompressed_size: u64,
    pub compression_method: CompressionMethod,
    /// Raw general purpose bit flags.
    pub flags: u16,
    pub external_attributes: u32,
    pub modified: DosDateTime,
    pub crc32: u32,
    pub filename: String,
}

impl EntryMetadata {
    /// Deflate option bits (1-2 of the flags word).
    #[inline]
    pub fn deflate_sub_level(&self) -> u8 {
        deflate_sub_level(self.flags)
    }

    #[inline]
    pub fn is_encrypted(&self) -> bool {
        self.flags & FLAG_ENCRYPTED != 0
    }
}

/// Extract the 2-bit deflate option field from a flags word.
#[inline]
pub fn deflate_sub_level(flags: u16) -> u8 {
    ((flags >> 1) & 0x3) as u8
}
