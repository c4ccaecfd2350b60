use thiserror::Error;

/// Failure raised by any layer of the wire codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("unexpected end of buffer at offset {offset}")]
    UnexpectedEof { offset: usize },

    #[error("invalid compression pointer at offset {offset} targeting {target}")]
    InvalidCompressionPointer { offset: usize, target: usize },

    #[error("too many compression pointers (max {max_jumps})")]
    TooManyCompressionJumps { max_jumps: usize },

    #[error("domain name too long ({length} bytes)")]
    NameTooLong { length: usize },

    #[error("label too long ({length} bytes)")]
    LabelTooLong { length: usize },

    #[error("empty label in domain name {0:?}")]
    EmptyLabel(String),

    #[error("unknown label type 0x{byte:02X} at offset {offset}")]
    UnknownLabelType { offset: usize, byte: u8 },

    #[error("invalid escape sequence in domain name {0:?}")]
    InvalidEscape(String),

    #[error("resource of type {record_type} ended at offset {actual}, expected {expected}")]
    ResourceLengthMismatch {
        record_type: u16,
        expected: usize,
        actual: usize,
    },

    #[error("service parameter {key} ended at offset {actual}, expected {expected}")]
    SvcParamLengthMismatch {
        key: u16,
        expected: usize,
        actual: usize,
    },

    #[error("service parameter {key} follows {previous}; keys must strictly increase")]
    SvcParamOutOfOrder { key: u16, previous: u16 },

    #[error("{section} section declares {declared} records but holds {actual}")]
    SectionCountMismatch {
        section: &'static str,
        declared: u16,
        actual: usize,
    },

    #[error("unsupported question count {0}")]
    UnsupportedQuestionCount(u16),

    #[error("invalid address length {0}")]
    InvalidAddressLength(usize),

    #[error("character string too long ({0} bytes)")]
    StringTooLong(usize),

    #[error("output buffer full: need {needed} bytes, capacity {capacity}")]
    BufferFull { needed: usize, capacity: usize },
}

pub type Result<T> = std::result::Result<T, WireError>;
