pub mod builder;
mod emit_op;
mod read_op;
mod write_op;

pub use builder::{RecordBuilder, minimal_width};
pub use emit_op::decode_and_emit;
pub use read_op::{RecordReader, decode_all, read_field};
pub use write_op::append_record;
