use thiserror::Error;

/// Errors produced while decoding operator-supplied bytes.
///
/// Every variant is a hard failure. A malformed sample must never be coerced
/// into a default value, since a silent zero would masquerade as a zero
/// baseline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The encoded buffer is not the size the layout requires.
    #[error("Invalid encoded length: expected {expected} bytes, got {actual} bytes")]
    InvalidLength { expected: usize, actual: usize },

    /// A 32-byte word holds a value wider than the target integer.
    #[error("Word {index} does not fit in a {bits}-bit unsigned integer")]
    WordOverflow { index: usize, bits: u32 },

    /// The dynamic string offset in a payload head is not where the tuple
    /// layout places it.
    #[error("Invalid string offset in payload head: {offset}")]
    InvalidStringOffset { offset: u64 },

    /// Bytes after a dynamic string are not all zero.
    #[error("Non-zero padding after string data at byte {offset}")]
    NonZeroPadding { offset: usize },

    /// The payload label is not valid UTF-8.
    #[error("Payload label is not valid UTF-8")]
    InvalidUtf8,

    /// The payload decoded cleanly but carries a label this trap never emits.
    #[error("Unknown payload label: {0:?}")]
    UnknownLabel(String),
}

/// Errors produced by the trap subsystem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrapError {
    /// Operator-supplied bytes could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The ambient fee metric could not be read.
    #[error("Fee source error: {0}")]
    FeeSource(String),

    /// The configuration is invalid (e.g. version = 0).
    #[error("Invalid trap configuration: {reason}")]
    InvalidConfig { reason: String },
}

pub type Result<T> = std::result::Result<T, TrapError>;
