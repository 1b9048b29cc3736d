//! Error types for the canonical Huffman codec.

use thiserror::Error;

/// Error variants for encoding, decoding and the file adapters.
#[derive(Debug, Error)]
pub enum Error {
    /// The frame header is inconsistent with the buffer that carries it.
    #[error("malformed header: {0}")]
    MalformedHeader(&'static str),

    /// The padding field claims more filler bits than the payload holds.
    #[error("truncated payload: padding of {padding} bits but only {available} payload bits")]
    TruncatedPayload {
        /// Padding declared in the header.
        padding: u8,
        /// Bits actually present in the payload.
        available: usize,
    },

    /// The bit stream does not end on a codeword boundary, or holds a
    /// bit pattern that no codeword starts with.
    #[error("invalid bit stream at bit {bit}")]
    InvalidBitStream {
        /// Offset of the offending bit in the unpadded stream.
        bit: usize,
    },

    /// A code length does not fit the single-byte `max_len` field.
    #[error("code length {0} exceeds the 255-bit frame limit")]
    CodeTooLong(usize),

    /// A byte to encode has no code in the table. Indicates a table built
    /// for different data.
    #[error("byte {0:#04x} has no code")]
    UncodedSymbol(u8),

    /// The file adapter configuration cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// A file passed to decompression does not carry the expected name prefix.
    #[error("file name {name:?} does not start with prefix {prefix:?}")]
    MissingPrefix {
        /// The offending file name.
        name: String,
        /// The configured prefix.
        prefix: String,
    },

    /// An I/O error occurred while reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
