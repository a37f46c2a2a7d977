use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use super::ReadAt;
use crate::error::Result;

/// Local file reader with random access support
pub struct LocalFileReader {
    #[cfg(unix)]
    file: std::fs::File,
    #[cfg(not(unix))]
    file: std::sync::Mutex<std::fs::File>,
    size: u64,
}

impl LocalFileReader {
    pub fn new(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let size = file.metadata()?.len();
        debug!(path = %path.display(), size, "opened local archive");

        #[cfg(not(unix))]
        let file = std::sync::Mutex::new(file);

        Ok(Self { file, size })
    }
}

#[async_trait]
impl ReadAt for LocalFileReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileExt;
            Ok(self.file.read_at(buf, offset)?)
        }

        #[cfg(not(unix))]
        {
            use std::io::{Read, Seek, SeekFrom};
            // Seek and read must not interleave between callers.
            let mut file = self
                .file
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            file.seek(SeekFrom::Start(offset))?;
            Ok(file.read(buf)?)
        }
    }

    fn size(&self) -> u64 {
        self.size
    }
}
