//! Synthetic archive builder for tests.
//!
//! Writes local headers without payloads: listing only reads the central
//! directory, so recorded sizes can be arbitrarily large.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::zip::{AES_EXTRA_ID, AES_METHOD, CentralFileHeader, ZIP64_EXTRA_ID};

#[derive(Debug, Clone)]
pub struct TestEntry {
    name: Vec<u8>,
    method: u16,
    flags: u16,
    compressed_size: u64,
    uncompressed_size: u64,
    crc32: u32,
    external_attributes: u32,
    date: u16,
    time: u16,
    extra: Vec<u8>,
    zip64: bool,
}

impl TestEntry {
    pub fn stored(name: &str, size: u64) -> Self {
        Self::stored_raw_name(name.as_bytes().to_vec(), size)
    }

    pub fn stored_raw_name(name: Vec<u8>, size: u64) -> Self {
        Self {
            name,
            method: 0,
            flags: 0,
            compressed_size: size,
            uncompressed_size: size,
            crc32: 0,
            external_attributes: 0,
            // 2020-01-01 00:00
            date: (40 << 9) | (1 << 5) | 1,
            time: 0,
            extra: Vec::new(),
            zip64: false,
        }
    }

    pub fn deflated(name: &str, compressed: u64, uncompressed: u64) -> Self {
        Self {
            method: 8,
            compressed_size: compressed,
            uncompressed_size: uncompressed,
            ..Self::stored(name, 0)
        }
    }

    pub fn method(mut self, method: u16) -> Self {
        self.method = method;
        self
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    pub fn crc32(mut self, crc32: u32) -> Self {
        self.crc32 = crc32;
        self
    }

    pub fn external_attributes(mut self, attrs: u32) -> Self {
        self.external_attributes = attrs;
        self
    }

    pub fn modified(mut self, date: u16, time: u16) -> Self {
        self.date = date;
        self.time = time;
        self
    }

    /// Store sizes in a ZIP64 extra field.
    pub fn zip64(mut self) -> Self {
        self.zip64 = true;
        self
    }

    /// Wrap the entry in WinZip AES encryption around `inner_method`.
    pub fn aes(mut self, inner_method: u16) -> Self {
        let mut field = Vec::new();
        field.write_u16::<LittleEndian>(AES_EXTRA_ID).unwrap();
        field.write_u16::<LittleEndian>(7).unwrap();
        field.write_u16::<LittleEndian>(2).unwrap();
        field.extend_from_slice(b"AE");
        field.push(3);
        field.write_u16::<LittleEndian>(inner_method).unwrap();
        self.extra.extend(field);
        self.method = AES_METHOD;
        self.flags |= 0x0001;
        self
    }

    pub fn raw_extra(mut self, extra: Vec<u8>) -> Self {
        self.extra.extend(extra);
        self
    }

    fn extra_field(&self) -> Vec<u8> {
        let mut extra = Vec::new();
        if self.zip64 {
            extra.write_u16::<LittleEndian>(ZIP64_EXTRA_ID).unwrap();
            extra.write_u16::<LittleEndian>(16).unwrap();
            extra.write_u64::<LittleEndian>(self.uncompressed_size).unwrap();
            extra.write_u64::<LittleEndian>(self.compressed_size).unwrap();
        }
        extra.extend_from_slice(&self.extra);
        extra
    }

    fn sizes32(&self) -> (u32, u32) {
        if self.zip64 {
            (0xFFFFFFFF, 0xFFFFFFFF)
        } else {
            (self.compressed_size as u32, self.uncompressed_size as u32)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ArchiveBuilder {
    entries: Vec<TestEntry>,
    comment: Vec<u8>,
    prefix: Vec<u8>,
    zip64_eocd: bool,
    corrupt: Vec<usize>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(mut self, entry: TestEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn comment(mut self, comment: &[u8]) -> Self {
        self.comment = comment.to_vec();
        self
    }

    /// Bytes placed before the archive without adjusting recorded offsets.
    pub fn prefix(mut self, prefix: &[u8]) -> Self {
        self.prefix = prefix.to_vec();
        self
    }

    pub fn zip64_eocd(mut self) -> Self {
        self.zip64_eocd = true;
        self
    }

    /// Break the signature of the central directory header at `index`.
    pub fn corrupt_header(mut self, index: usize) -> Self {
        self.corrupt.push(index);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        let mut lfh_offsets = Vec::new();

        for entry in &self.entries {
            lfh_offsets.push(out.len() as u32);
            let (compressed, uncompressed) = entry.sizes32();
            out.extend_from_slice(b"PK\x03\x04");
            out.write_u16::<LittleEndian>(20).unwrap();
            out.write_u16::<LittleEndian>(entry.flags).unwrap();
            out.write_u16::<LittleEndian>(entry.method).unwrap();
            out.write_u16::<LittleEndian>(entry.time).unwrap();
            out.write_u16::<LittleEndian>(entry.date).unwrap();
            out.write_u32::<LittleEndian>(entry.crc32).unwrap();
            out.write_u32::<LittleEndian>(compressed).unwrap();
            out.write_u32::<LittleEndian>(uncompressed).unwrap();
            out.write_u16::<LittleEndian>(entry.name.len() as u16).unwrap();
            out.write_u16::<LittleEndian>(0).unwrap();
            out.extend_from_slice(&entry.name);
        }

        let cd_offset = out.len() as u64;
        for (index, entry) in self.entries.iter().enumerate() {
            let extra = entry.extra_field();
            let (compressed, uncompressed) = entry.sizes32();
            if self.corrupt.contains(&index) {
                out.extend_from_slice(b"PK\x09\x09");
            } else {
                out.extend_from_slice(CentralFileHeader::SIGNATURE);
            }
            out.write_u16::<LittleEndian>(0x031E).unwrap();
            out.write_u16::<LittleEndian>(20).unwrap();
            out.write_u16::<LittleEndian>(entry.flags).unwrap();
            out.write_u16::<LittleEndian>(entry.method).unwrap();
            out.write_u16::<LittleEndian>(entry.time).unwrap();
            out.write_u16::<LittleEndian>(entry.date).unwrap();
            out.write_u32::<LittleEndian>(entry.crc32).unwrap();
            out.write_u32::<LittleEndian>(compressed).unwrap();
            out.write_u32::<LittleEndian>(uncompressed).unwrap();
            out.write_u16::<LittleEndian>(entry.name.len() as u16).unwrap();
            out.write_u16::<LittleEndian>(extra.len() as u16).unwrap();
            out.write_u16::<LittleEndian>(0).unwrap();
            out.write_u16::<LittleEndian>(0).unwrap();
            out.write_u16::<LittleEndian>(0).unwrap();
            out.write_u32::<LittleEndian>(entry.external_attributes).unwrap();
            out.write_u32::<LittleEndian>(lfh_offsets[index]).unwrap();
            out.extend_from_slice(&entry.name);
            out.extend_from_slice(&extra);
        }
        let cd_size = out.len() as u64 - cd_offset;
        let count = self.entries.len() as u64;

        if self.zip64_eocd {
            let eocd64_offset = out.len() as u64;
            out.extend_from_slice(b"PK\x06\x06");
            out.write_u64::<LittleEndian>(44).unwrap();
            out.write_u16::<LittleEndian>(45).unwrap();
            out.write_u16::<LittleEndian>(45).unwrap();
            out.write_u32::<LittleEndian>(0).unwrap();
            out.write_u32::<LittleEndian>(0).unwrap();
            out.write_u64::<LittleEndian>(count).unwrap();
            out.write_u64::<LittleEndian>(count).unwrap();
            out.write_u64::<LittleEndian>(cd_size).unwrap();
            out.write_u64::<LittleEndian>(cd_offset).unwrap();

            out.extend_from_slice(b"PK\x06\x07");
            out.write_u32::<LittleEndian>(0).unwrap();
            out.write_u64::<LittleEndian>(eocd64_offset).unwrap();
            out.write_u32::<LittleEndian>(1).unwrap();
        }

        out.extend_from_slice(b"PK\x05\x06");
        out.write_u16::<LittleEndian>(0).unwrap();
        out.write_u16::<LittleEndian>(0).unwrap();
        if self.zip64_eocd {
            out.write_u16::<LittleEndian>(0xFFFF).unwrap();
            out.write_u16::<LittleEndian>(0xFFFF).unwrap();
            out.write_u32::<LittleEndian>(0xFFFFFFFF).unwrap();
            out.write_u32::<LittleEndian>(0xFFFFFFFF).unwrap();
        } else {
            out.write_u16::<LittleEndian>(count as u16).unwrap();
            out.write_u16::<LittleEndian>(count as u16).unwrap();
            out.write_u32::<LittleEndian>(cd_size as u32).unwrap();
            out.write_u32::<LittleEndian>(cd_offset as u32).unwrap();
        }
        out.write_u16::<LittleEndian>(self.comment.len() as u16).unwrap();
        out.extend_from_slice(&self.comment);

        let mut archive = self.prefix.clone();
        archive.extend(out);
        archive
    }
}
