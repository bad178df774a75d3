use std::fmt;

// ─── Constants ──────────────────────────────────────────────────────────────
pub const DEFAULT_CAPACITY: usize = 256;
pub const MAX_SPECIFIERS: usize = u8::MAX as usize;
pub const MAX_FIELD_WIDTH: u8 = 4;

pub const FIELD_SEPARATOR: char = ',';
pub const OVERFLOW_TOKEN: &str = "OVER";

// ─── Binary Layout ──────────────────────────────────────────────────────────
//
//  ┌──────────────────────────────────────────────┐
//  │ specifier_count: u8                          │
//  ├──────────────────────────────────────────────┤
//  │ specifiers: [u8; specifier_count]            │
//  │   byte width of each field (1..=4)           │
//  ├──────────────────────────────────────────────┤
//  │ fields (variable)                            │
//  │   big-endian, back-to-back, no padding       │
//  └──────────────────────────────────────────────┘
//
//  Records are concatenated with no separator. The next record starts at the
//  byte after the last field of the previous one.

/// Bytes a record occupies once encoded: count byte, specifiers, field bytes.
#[inline]
pub fn encoded_len(specifiers: &[u8]) -> usize {
    1 + specifiers.len() + specifiers.iter().map(|&w| w as usize).sum::<usize>()
}

// ─── Decoded Fields ─────────────────────────────────────────────────────────

/// Value reassembled from a field's big-endian bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    Number(u32),
    /// Declared width outside 1..=4. The field bytes are skipped, not read.
    Overflow,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Overflow => f.write_str(OVERFLOW_TOKEN),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedField {
    pub width: u8,
    pub value: FieldValue,
}

/// One record recovered from the buffer, with its byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    pub start: usize,
    pub end: usize,
    pub fields: Vec<DecodedField>,
}

impl DecodedRecord {
    #[inline]
    pub fn overflow_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| f.value == FieldValue::Overflow)
            .count()
    }

    /// Render as one output line without the trailing newline.
    /// An empty record renders as an empty string.
    pub fn to_line(&self) -> String {
        let mut line = String::new();
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                line.push(FIELD_SEPARATOR);
            }
            line.push_str(&field.value.to_string());
        }
        line
    }
}

/// Totals reported by a flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushSummary {
    pub records: usize,
    pub fields: usize,
    pub overflow_fields: usize,
    pub bytes: usize,
}
