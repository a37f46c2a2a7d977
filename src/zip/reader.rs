//! Central directory cursor.
//!
//! [`ZipReader::open`] locates the central directory and loads it with a
//! single read, which keeps HTTP sources down to a handful of Range requests.
//! After that the cursor is synchronous: each move validates the next fixed
//! header, and [`EntryCursor::current_entry_info`] decodes the variable part
//! (name and extra fields) on demand.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;
use tracing::debug;

use crate::error::{ReadError, Result};
use crate::io::ReadAt;
use crate::list::{
    CompressionMethod, CursorStatus, DosDateTime, EntryCursor, EntryMetadata, StatusCode,
};

use super::structures::*;

/// Maximum ZIP comment size allowed by the format (65535 bytes).
///
/// This limits the search area when looking for EOCD with a comment.
const MAX_COMMENT_SIZE: u64 = 65535;

/// Header under the cursor.
#[derive(Debug, Clone, Copy)]
struct Position {
    /// Offset of the header within the central directory.
    offset: usize,
    index: u64,
    header: CentralFileHeader,
}

/// Sequential reader over a ZIP central directory.
pub struct ZipReader {
    central_directory: Vec<u8>,
    total_entries: u64,
    position: Option<Position>,
}

impl ZipReader {
    /// Open an archive: find the EOCD, follow ZIP64 records if needed and
    /// load the whole central directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is not a ZIP archive, the ZIP64
    /// records are broken, or the central directory cannot be read.
    pub async fn open<R: ReadAt + ?Sized>(reader: &R) -> Result<Self> {
        let size = reader.size();
        let (eocd, eocd_offset) = find_eocd(reader, size).await?;

        let (cd_offset, cd_size, total_entries) = if eocd.is_zip64() {
            let eocd64 = read_zip64_eocd(reader, eocd_offset).await?;
            (eocd64.cd_offset, eocd64.cd_size, eocd64.total_entries)
        } else {
            (
                eocd.cd_offset as u64,
                eocd.cd_size as u64,
                eocd.total_entries as u64,
            )
        };

        if cd_size > size {
            return Err(ReadError::CentralDirectoryTooLarge(cd_size));
        }
        let cd_len =
            usize::try_from(cd_size).map_err(|_| ReadError::CentralDirectoryTooLarge(cd_size))?;

        let cd_offset = resolve_cd_offset(reader, cd_offset, cd_size, eocd_offset, eocd.is_zip64())
            .await?;

        let mut central_directory = vec![0u8; cd_len];
        reader
            .read_exact_at(cd_offset, &mut central_directory)
            .await?;

        debug!(cd_offset, cd_size, total_entries, "loaded central directory");

        Ok(Self::from_central_directory(central_directory, total_entries))
    }

    /// Build a reader over raw central directory bytes.
    pub fn from_central_directory(central_directory: Vec<u8>, total_entries: u64) -> Self {
        Self {
            central_directory,
            total_entries,
            position: None,
        }
    }

    /// Number of entries declared by the end of central directory record.
    pub fn total_entries(&self) -> u64 {
        self.total_entries
    }

    fn load_header(&mut self, offset: usize, index: u64) -> CursorStatus {
        match CentralFileHeader::from_bytes(&self.central_directory[offset..]) {
            Some(header) => {
                self.position = Some(Position {
                    offset,
                    index,
                    header,
                });
                CursorStatus::Ok
            }
            None => {
                debug!(offset, index, "bad central directory header");
                CursorStatus::Failed(StatusCode::FORMAT_ERROR)
            }
        }
    }
}

impl EntryCursor for ZipReader {
    fn goto_first_entry(&mut self) -> CursorStatus {
        self.position = None;
        if self.total_entries == 0 || self.central_directory.is_empty() {
            return CursorStatus::EndOfList;
        }
        self.load_header(0, 0)
    }

    fn goto_next_entry(&mut self) -> CursorStatus {
        let Some(current) = self.position.take() else {
            return CursorStatus::Failed(StatusCode::PARAM_ERROR);
        };

        let index = current.index + 1;
        let offset = current.offset + current.header.record_len();
        if index >= self.total_entries || offset >= self.central_directory.len() {
            return CursorStatus::EndOfList;
        }
        self.load_header(offset, index)
    }

    fn current_entry_info(&self) -> std::result::Result<EntryMetadata, StatusCode> {
        let Some(position) = self.position else {
            return Err(StatusCode::PARAM_ERROR);
        };
        let header = position.header;

        let end = position.offset + header.record_len();
        if end > self.central_directory.len() {
            return Err(StatusCode::FORMAT_ERROR);
        }

        let name_start = position.offset + CentralFileHeader::SIZE;
        let name_end = name_start + header.file_name_length as usize;
        let extra_end = name_end + header.extra_field_length as usize;

        // Use lossy conversion to handle non-UTF8 filenames gracefully
        let filename = String::from_utf8_lossy(&self.central_directory[name_start..name_end])
            .into_owned();

        let mut entry = EntryMetadata {
            compressed_size: header.compressed_size as u64,
            uncompressed_size: header.uncompressed_size as u64,
            compression_method: CompressionMethod::from_u16(header.compression_method),
            flags: header.flags,
            external_attributes: header.external_attrs,
            modified: DosDateTime::new(header.last_mod_date, header.last_mod_time),
            crc32: header.crc32,
            filename,
        };

        apply_extra_fields(
            &mut entry,
            &header,
            &self.central_directory[name_end..extra_end],
        )
        .map_err(|_| StatusCode::FORMAT_ERROR)?;

        Ok(entry)
    }
}

/// Fold the extra fields that affect listing into `entry`.
fn apply_extra_fields(
    entry: &mut EntryMetadata,
    header: &CentralFileHeader,
    extra: &[u8],
) -> std::io::Result<()> {
    let mut cursor = Cursor::new(extra);
    let len = extra.len() as u64;

    while cursor.position() + 4 <= len {
        let header_id = cursor.read_u16::<LittleEndian>()?;
        let field_size = cursor.read_u16::<LittleEndian>()? as u64;
        let field_end = cursor.position() + field_size;
        if field_end > len {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }

        match header_id {
            ZIP64_EXTRA_ID => {
                // Fields are present only if the header field is saturated
                if header.uncompressed_size == 0xFFFFFFFF && cursor.position() + 8 <= field_end {
                    entry.uncompressed_size = cursor.read_u64::<LittleEndian>()?;
                }
                if header.compressed_size == 0xFFFFFFFF && cursor.position() + 8 <= field_end {
                    entry.compressed_size = cursor.read_u64::<LittleEndian>()?;
                }
            }
            AES_EXTRA_ID if header.compression_method == AES_METHOD && field_size >= 7 => {
                // vendor version (2), vendor id (2), strength (1), method (2)
                cursor.set_position(cursor.position() + 5);
                let method = cursor.read_u16::<LittleEndian>()?;
                entry.compression_method = CompressionMethod::from_u16(method);
            }
            _ => {}
        }

        cursor.set_position(field_end);
    }

    Ok(())
}

/// Find and parse the End of Central Directory record.
///
/// Tries the no-comment layout first, then scans backwards across the
/// largest possible comment.
async fn find_eocd<R: ReadAt + ?Sized>(
    reader: &R,
    size: u64,
) -> Result<(EndOfCentralDirectory, u64)> {
    let eocd_size = EndOfCentralDirectory::SIZE as u64;
    if size < eocd_size {
        return Err(ReadError::EocdNotFound);
    }

    let offset = size - eocd_size;
    let mut buf = vec![0u8; EndOfCentralDirectory::SIZE];
    reader.read_exact_at(offset, &mut buf).await?;

    if &buf[0..4] == EndOfCentralDirectory::SIGNATURE && &buf[20..22] == b"\x00\x00" {
        let eocd = EndOfCentralDirectory::from_bytes(&buf)?;
        return Ok((eocd, offset));
    }

    let search_size = (MAX_COMMENT_SIZE + eocd_size).min(size);
    let search_start = size - search_size;

    let mut buf = vec![0u8; search_size as usize];
    reader.read_exact_at(search_start, &mut buf).await?;

    let last = buf.len() - EndOfCentralDirectory::SIZE;
    for i in (0..=last).rev() {
        if &buf[i..i + 4] == EndOfCentralDirectory::SIGNATURE {
            // The comment length must account for every remaining byte.
            let comment_len = u16::from_le_bytes([buf[i + 20], buf[i + 21]]) as usize;

            if comment_len == buf.len() - i - EndOfCentralDirectory::SIZE {
                let eocd =
                    EndOfCentralDirectory::from_bytes(&buf[i..i + EndOfCentralDirectory::SIZE])?;
                debug!(offset = search_start + i as u64, comment_len, "found EOCD");
                return Ok((eocd, search_start + i as u64));
            }
        }
    }

    Err(ReadError::EocdNotFound)
}

/// Read the ZIP64 End of Central Directory record via its locator, which
/// sits immediately before the regular EOCD.
async fn read_zip64_eocd<R: ReadAt + ?Sized>(reader: &R, eocd_offset: u64) -> Result<Zip64EOCD> {
    let locator_offset = eocd_offset
        .checked_sub(Zip64EOCDLocator::SIZE as u64)
        .ok_or(ReadError::InvalidZip64)?;
    let mut locator_buf = vec![0u8; Zip64EOCDLocator::SIZE];
    reader.read_exact_at(locator_offset, &mut locator_buf).await?;

    let locator = Zip64EOCDLocator::from_bytes(&locator_buf)?;

    let mut eocd64_buf = vec![0u8; Zip64EOCD::MIN_SIZE];
    reader
        .read_exact_at(locator.eocd64_offset, &mut eocd64_buf)
        .await
        .map_err(|_| ReadError::InvalidZip64)?;

    Zip64EOCD::from_bytes(&eocd64_buf)
}

/// Account for data prepended to the archive (self-extracting stubs).
///
/// When the central directory does not end where the EOCD begins, the
/// recorded offset is shifted by the size of the prefix, provided a header
/// signature is found at the shifted position.
async fn resolve_cd_offset<R: ReadAt + ?Sized>(
    reader: &R,
    cd_offset: u64,
    cd_size: u64,
    eocd_offset: u64,
    zip64: bool,
) -> Result<u64> {
    let recorded_end = cd_offset.saturating_add(cd_size);
    if zip64 || cd_size == 0 || recorded_end >= eocd_offset {
        return Ok(cd_offset);
    }

    let shift = eocd_offset - recorded_end;
    let mut sig = [0u8; 4];
    if reader.read_exact_at(cd_offset + shift, &mut sig).await.is_ok()
        && sig == CentralFileHeader::SIGNATURE
    {
        debug!(shift, "archive has prepended data");
        return Ok(cd_offset + shift);
    }

    Ok(cd_offset)
}
