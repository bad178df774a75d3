//! Fixed-size staging cache for data-logger readings.
//!
//! Readings are packed into a flat byte buffer as self-describing records
//! (a count byte, one width byte per field, then big-endian field bytes) and
//! later flushed as comma-separated text, one line per record.
//!
//! ```
//! use onboard_cache::{CacheConfig, OnboardCache};
//!
//! let mut cache = OnboardCache::new(CacheConfig::default());
//! cache.cache_record(&[1, 2], &[5, 0x01, 0x02]).unwrap();
//!
//! let mut lines: Vec<String> = Vec::new();
//! cache.flush(&mut lines).unwrap();
//! assert_eq!(lines, ["5,258"]);
//! ```

pub mod buffer_store;
pub mod cache;
pub mod config;
pub mod error;
pub mod record;
pub mod sink;
pub mod types;

pub use buffer_store::BufferStore;
pub use cache::OnboardCache;
pub use config::CacheConfig;
pub use error::CacheError;
pub use record::{RecordBuilder, RecordReader, append_record, decode_and_emit};
pub use sink::{FileSink, LineSink, WriterSink};
pub use types::{DecodedField, DecodedRecord, FieldValue, FlushSummary};
