use async_trait::async_trait;

use super::ReadAt;
use crate::error::Result;

/// In-memory archive bytes
#[derive(Debug, Clone, Default)]
pub struct MemoryReader {
    data: Vec<u8>,
}

impl MemoryReader {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }
}

#[async_trait]
impl ReadAt for MemoryReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let start = usize::try_from(offset)
            .unwrap_or(usize::MAX)
            .min(self.data.len());
        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        Ok(n)
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }
}
