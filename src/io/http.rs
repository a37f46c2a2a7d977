use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::ReadAt;
use crate::error::{ReadError, Result};

/// Default request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Transient failures tolerated per read.
const MAX_RETRY: u32 = 10;

/// HTTP Range reader for remote ZIP files
pub struct HttpRangeReader {
    client: Client,
    url: String,
    size: u64,
    transferred_bytes: AtomicU64,
    max_retry: u32,
}

impl HttpRangeReader {
    /// Create a new HTTP Range reader
    ///
    /// This will send a HEAD request to verify Range support and get file size
    pub async fn new(url: String) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        let resp = client.head(&url).send().await?;

        if !resp.status().is_success() {
            return Err(ReadError::HttpStatus(resp.status()));
        }

        let accept_ranges = resp
            .headers()
            .get(reqwest::header::ACCEPT_RANGES)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("none");

        if !accept_ranges.contains("bytes") {
            return Err(ReadError::RangeUnsupported);
        }

        let size = resp
            .headers()
            .get(reqwest::header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .ok_or(ReadError::MissingContentLength)?;

        debug!(%url, size, "opened remote archive");

        Ok(Self {
            client,
            url,
            size,
            transferred_bytes: AtomicU64::new(0),
            max_retry: MAX_RETRY,
        })
    }

    /// Get total bytes transferred from network
    pub fn transferred_bytes(&self) -> u64 {
        self.transferred_bytes.load(Ordering::Relaxed)
    }
}

/// Inclusive last byte and length of a read of `len` bytes at `offset`,
/// clamped to the end of a `size`-byte resource.
///
/// `None` when nothing can be read.
fn range_bounds(offset: u64, len: usize, size: u64) -> Option<(u64, usize)> {
    if len == 0 || offset >= size {
        return None;
    }
    let end = offset.saturating_add(len as u64 - 1).min(size - 1);
    Some((end, (end - offset + 1) as usize))
}

#[async_trait]
impl ReadAt for HttpRangeReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let Some((end, expected_size)) = range_bounds(offset, buf.len(), self.size) else {
            return Ok(0);
        };

        let mut received = 0;
        let mut retry_count = 0;

        while received < expected_size {
            let current_start = offset + received as u64;
            let range = format!("bytes={current_start}-{end}");

            let result = self
                .client
                .get(&self.url)
                .header(reqwest::header::RANGE, &range)
                .send()
                .await;

            match result {
                Ok(resp) => {
                    if resp.status() != reqwest::StatusCode::PARTIAL_CONTENT {
                        return Err(ReadError::HttpStatus(resp.status()));
                    }

                    let bytes = resp.bytes().await?;
                    if bytes.is_empty() {
                        break;
                    }
                    let chunk_len = bytes.len().min(expected_size - received);
                    buf[received..received + chunk_len].copy_from_slice(&bytes[..chunk_len]);
                    received += chunk_len;

                    self.transferred_bytes
                        .fetch_add(chunk_len as u64, Ordering::Relaxed);
                }
                Err(e) if e.is_timeout() || e.is_connect() => {
                    retry_count += 1;
                    if retry_count >= self.max_retry {
                        return Err(ReadError::RetriesExhausted);
                    }
                    warn!(
                        retry = retry_count,
                        max = self.max_retry,
                        error = %e,
                        "connection error, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(500 * retry_count as u64)).await;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(received)
    }

    fn size(&self) -> u64 {
        self.size
    }
}
