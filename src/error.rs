// ─── Error ──────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("buffer full: cursor {cursor} reached capacity {capacity}")]
    BufferFull { cursor: usize, capacity: usize },
    #[error("read at offset {offset} is outside committed data (cursor {cursor})")]
    OutOfBounds { offset: usize, cursor: usize },
    #[error("record has {0} specifiers, max is 255")]
    TooManySpecifiers(usize),
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("field width {0} is outside 1..=4")]
    InvalidWidth(u8),
    #[error("value {value} does not fit in {width} bytes")]
    ValueTooWide { value: u32, width: u8 },
    /// A record's specifier block or field bytes run past the committed region.
    #[error("record at {record_start} ends at {end}, past cursor {cursor}")]
    Truncated {
        record_start: usize,
        end: usize,
        cursor: usize,
    },
    /// Traversal finished at an offset other than the cursor.
    #[error("decode ended at {end} but cursor is {cursor}")]
    Desync { end: usize, cursor: usize },
    #[error("cursor {offset} exceeds capacity {capacity}")]
    InvalidCursor { offset: usize, capacity: usize },
    #[error("config error: {0}")]
    Config(String),
    #[error("sink error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        CacheError::Config(e.to_string())
    }
}
