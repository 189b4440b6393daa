//! Error types for huff-tree

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("illegal header: expected magic {expected:#010x}, found {found:#010x}")]
    BadMagic { expected: u32, found: u32 },

    #[error("input ended before the tree header was complete")]
    TruncatedHeader,

    #[error("tree header describes more than {max_internal} internal nodes")]
    MalformedHeader { max_internal: usize },

    #[error("input ended before the end-of-stream symbol was decoded")]
    MissingTerminator,

    #[error("symbol value {0} is outside the alphabet")]
    InvalidSymbol(u32),

    #[error("input exceeds the configured limit of {limit} bytes")]
    InputTooLarge { limit: u64 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CompressError>;
