use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

use crate::error::{ReadError, Result};

/// End of Central Directory (EOCD) - 22 bytes minimum
pub struct EndOfCentralDirectory {
    pub disk_number: u16,
    pub disk_with_cd: u16,
    pub disk_entries: u16,
    pub total_entries: u16,
    pub cd_size: u32,
    pub cd_offset: u32,
    pub comment_len: u16,
}

impl EndOfCentralDirectory {
    pub const SIGNATURE: &'static [u8] = b"PK\x05\x06";
    pub const SIZE: usize = 22;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE || &data[0..4] != Self::SIGNATURE {
            return Err(ReadError::EocdNotFound);
        }

        let mut cursor = Cursor::new(&data[4..]);

        Ok(Self {
            disk_number: cursor.read_u16::<LittleEndian>()?,
            disk_with_cd: cursor.read_u16::<LittleEndian>()?,
            disk_entries: cursor.read_u16::<LittleEndian>()?,
            total_entries: cursor.read_u16::<LittleEndian>()?,
            cd_size: cursor.read_u32::<LittleEndian>()?,
            cd_offset: cursor.read_u32::<LittleEndian>()?,
            comment_len: cursor.read_u16::<LittleEndian>()?,
        })
    }

    pub fn is_zip64(&self) -> bool {
        self.disk_entries == 0xFFFF
            || self.total_entries == 0xFFFF
            || self.cd_size == 0xFFFFFFFF
            || self.cd_offset == 0xFFFFFFFF
    }
}

/// ZIP64 End of Central Directory Locator - 20 bytes
pub struct Zip64EOCDLocator {
    pub disk_with_eocd64: u32,
    pub eocd64_offset: u64,
    pub total_disks: u32,
}

impl Zip64EOCDLocator {
    pub const SIGNATURE: &'static [u8] = b"PK\x06\x07";
    pub const SIZE: usize = 20;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE || &data[0..4] != Self::SIGNATURE {
            return Err(ReadError::InvalidZip64);
        }

        let mut cursor = Cursor::new(&data[4..]);

        Ok(Self {
            disk_with_eocd64: cursor.read_u32::<LittleEndian>()?,
            eocd64_offset: cursor.read_u64::<LittleEndian>()?,
            total_disks: cursor.read_u32::<LittleEndian>()?,
        })
    }
}

/// ZIP64 End of Central Directory - 56 bytes minimum
pub struct Zip64EOCD {
    pub eocd64_size: u64,
    pub version_made_by: u16,
    pub version_needed: u16,
    pub disk_number: u32,
    pub disk_with_cd: u32,
    pub disk_entries: u64,
    pub total_entries: u64,
    pub cd_size: u64,
    pub cd_offset: u64,
}

impl Zip64EOCD {
    pub const SIGNATURE: &'static [u8] = b"PK\x06\x06";
    pub const MIN_SIZE: usize = 56;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::MIN_SIZE || &data[0..4] != Self::SIGNATURE {
            return Err(ReadError::InvalidZip64);
        }

        let mut cursor = Cursor::new(&data[4..]);

        Ok(Self {
            eocd64_size: cursor.read_u64::<LittleEndian>()?,
            version_made_by: cursor.read_u16::<LittleEndian>()?,
            version_needed: cursor.read_u16::<LittleEndian>()?,
            disk_number: cursor.read_u32::<LittleEndian>()?,
            disk_with_cd: cursor.read_u32::<LittleEndian>()?,
            disk_entries: cursor.read_u64::<LittleEndian>()?,
            total_entries: cursor.read_u64::<LittleEndian>()?,
            cd_size: cursor.read_u64::<LittleEndian>()?,
            cd_offset: cursor.read_u64::<LittleEndian>()?,
        })
    }
}

/// Extra field: ZIP64 extended information.
pub const ZIP64_EXTRA_ID: u16 = 0x0001;

/// Extra field: WinZip AES encryption.
pub const AES_EXTRA_ID: u16 = 0x9901;

/// Compression method recorded for WinZip AES entries.
pub const AES_METHOD: u16 = 99;

/// Fixed part of a Central Directory File Header (CDFH) - 46 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CentralFileHeader {
    pub version_made_by: u16,
    pub version_needed: u16,
    pub flags: u16,
    pub compression_method: u16,
    pub last_mod_time: u16,
    pub last_mod_date: u16,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name_length: u16,
    pub extra_field_length: u16,
    pub file_comment_length: u16,
    pub disk_number_start: u16,
    pub internal_attrs: u16,
    pub external_attrs: u32,
    pub lfh_offset: u32,
}

impl CentralFileHeader {
    pub const SIGNATURE: &'static [u8] = b"PK\x01\x02";
    pub const SIZE: usize = 46;

    /// Parse the fixed header at the start of `data`.
    ///
    /// Returns `None` if the slice is too short or the signature is wrong.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < Self::SIZE || &data[0..4] != Self::SIGNATURE {
            return None;
        }

        let mut cursor = Cursor::new(&data[4..Self::SIZE]);
        Self::read_fields(&mut cursor).ok()
    }

    fn read_fields(cursor: &mut Cursor<&[u8]>) -> std::io::Result<Self> {
        Ok(Self {
            version_made_by: cursor.read_u16::<LittleEndian>()?,
            version_needed: cursor.read_u16::<LittleEndian>()?,
            flags: cursor.read_u16::<LittleEndian>()?,
            compression_method: cursor.read_u16::<LittleEndian>()?,
            last_mod_time: cursor.read_u16::<LittleEndian>()?,
            last_mod_date: cursor.read_u16::<LittleEndian>()?,
            crc32: cursor.read_u32::<LittleEndian>()?,
            compressed_size: cursor.read_u32::<LittleEndian>()?,
            uncompressed_size: cursor.read_u32::<LittleEndian>()?,
            file_name_length: cursor.read_u16::<LittleEndian>()?,
            extra_field_length: cursor.read_u16::<LittleEndian>()?,
            file_comment_length: cursor.read_u16::<LittleEndian>()?,
            disk_number_start: cursor.read_u16::<LittleEndian>()?,
            internal_attrs: cursor.read_u16::<LittleEndian>()?,
            external_attrs: cursor.read_u32::<LittleEndian>()?,
            lfh_offset: cursor.read_u32::<LittleEndian>()?,
        })
    }

    /// Total record length including name, extra field and comment.
    pub fn record_len(&self) -> usize {
        Self::SIZE
            + self.file_name_length as usize
            + self.extra_field_length as usize
            + self.file_comment_length as usize
    }
}
