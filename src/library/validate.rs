//! MP3 file validation.
//!
//! Mirrors the checks a picky file picker would do: the extension must be
//! `.mp3`, the first bytes must look like an MPEG audio stream (ID3v2 tag or
//! an MPEG frame sync) and the file must stay under the size cap. None of
//! these failures are fatal; callers surface them in the status line.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

/// Hard cap on importable file size: 50 MB.
pub const MAX_FILE_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("unsupported file type (expected .mp3): {0}")]
    UnsupportedType(String),

    #[error("file too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },

    #[error("not an MPEG audio stream: {0}")]
    NotMpeg(String),

    #[error("unreadable file: {0}")]
    Io(String),
}

impl From<std::io::Error> for ValidateError {
    fn from(e: std::io::Error) -> Self {
        ValidateError::Io(e.to_string())
    }
}

fn has_mp3_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}

/// Sniff the leading bytes of an MP3 file: either an ID3v2 tag or a raw
/// MPEG frame sync (11 set bits).
pub(super) fn looks_like_mpeg(header: &[u8]) -> bool {
    if header.len() >= 3 && &header[..3] == b"ID3" {
        return true;
    }
    header.len() >= 2 && header[0] == 0xFF && header[1] & 0xE0 == 0xE0
}

/// Validate `path` as an importable MP3 and return its size in bytes.
pub fn validate_mp3(path: &Path) -> Result<u64, ValidateError> {
    if !has_mp3_extension(path) {
        return Err(ValidateError::UnsupportedType(path.display().to_string()));
    }

    let meta = std::fs::metadata(path)?;
    if !meta.is_file() {
        return Err(ValidateError::Io(format!(
            "not a regular file: {}",
            path.display()
        )));
    }
    if meta.len() > MAX_FILE_BYTES {
        return Err(ValidateError::TooLarge {
            size: meta.len(),
            limit: MAX_FILE_BYTES,
        });
    }

    let mut header = [0u8; 4];
    let read = File::open(path)?.read(&mut header)?;
    if !looks_like_mpeg(&header[..read]) {
        return Err(ValidateError::NotMpeg(path.display().to_string()));
    }

    Ok(meta.len())
}
