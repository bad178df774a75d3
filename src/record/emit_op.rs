use super::read_op::{RecordReader, check_end};
use crate::buffer_store::BufferStore;
use crate::error::CacheError;
use crate::sink::LineSink;
use crate::types::FlushSummary;
use tracing::warn;

// ─── Decode & Emit ──────────────────────────────────────────────────────────

/// Write one line per committed record to `sink`, in buffer order.
///
/// Each record is emitted as soon as it decodes. Fields with unsupported
/// widths render as `OVER` and do not stop the walk. A record that cannot be
/// read (`Truncated`) or that claims bytes past the cursor (`Desync`) ends
/// the walk: every record before it has already reached the sink, a `Desync`
/// record's own line included. The sink is flushed in both cases. The cursor
/// is left untouched.
pub fn decode_and_emit<S: LineSink>(
    store: &BufferStore,
    mut sink: S,
) -> Result<FlushSummary, CacheError> {
    let mut summary = FlushSummary {
        bytes: store.cursor(),
        ..FlushSummary::default()
    };
    let mut reader = RecordReader::new(store);

    while let Some(next) = reader.next_unchecked() {
        let record = match next {
            Ok(record) => record,
            Err(e) => {
                sink.flush()?;
                return Err(e);
            }
        };

        let overflow = record.overflow_count();
        if overflow > 0 {
            warn!(
                record_start = record.start,
                overflow, "record has fields with unsupported widths"
            );
        }
        sink.write_line(&record.to_line())?;

        summary.records += 1;
        summary.fields += record.fields.len();
        summary.overflow_fields += overflow;

        if let Err(e) = check_end(&record, store.cursor()) {
            sink.flush()?;
            return Err(e);
        }
    }
    sink.flush()?;

    Ok(summary)
}
