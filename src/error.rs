//! Error types.

use thiserror::Error;

/// A predictor configuration that cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("saturating counter width must be at least 1 bit")]
    ZeroCounterWidth,

    #[error("saturating counter width of {bits} bits exceeds the 8-bit limit")]
    CounterTooWide { bits: u32 },

    #[error("{bits} PC index bits exceeds the 30 usable bits of a 32-bit PC")]
    PcBitsTooWide { bits: u32 },

    #[error("2^{bits} pattern history entries is too large to allocate")]
    TableTooLarge { bits: u32 },
}

/// The reason a trace line could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected 3 fields, found {0}")]
    FieldCount(usize),

    #[error("unknown operation '{0}'")]
    UnknownOp(String),

    #[error("invalid address '{0}'")]
    BadAddress(String),

    #[error("line is not valid UTF-8")]
    Encoding,
}

/// A malformed line in a trace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
