use std::io::Read;

use anyhow::{anyhow, Result};
use flate2::read::GzDecoder;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

pub fn is_gzip(body: &[u8]) -> bool {
    body.starts_with(&GZIP_MAGIC)
}

/// Inflates gzip payloads, passing anything else through. Inflated output
/// larger than `limit` bytes is rejected.
pub fn maybe_gunzip(body: Vec<u8>, limit: u64) -> Result<Vec<u8>> {
    if !is_gzip(&body) {
        return Ok(body);
    }
    let mut out = Vec::new();
    GzDecoder::new(body.as_slice())
        .take(limit.saturating_add(1))
        .read_to_end(&mut out)?;
    if out.len() as u64 > limit {
        return Err(anyhow!("decompressed file exceeds {} bytes", limit));
    }
    Ok(out)
}
