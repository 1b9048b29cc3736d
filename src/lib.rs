//! # Canonical Huffman Coding
//!
//! *Byte-oriented prefix coding with a header that stores lengths only.*
//!
//! ## Intuition First
//!
//! A Huffman code gives frequent bytes short bit strings and rare bytes long
//! ones, with no code a prefix of another so the stream splits unambiguously.
//! The plain algorithm decides *how long* each code is; which exact bits go
//! with which byte is arbitrary. A **canonical** code removes that freedom:
//! sort symbols by `(length, value)` and count upwards. Now the lengths alone
//! describe the whole code, and the header shrinks to one count per length
//! plus the sorted symbol list.
//!
//! ## Historical Context
//!
//! ```text
//! 1952  Huffman     Minimum-redundancy prefix codes
//! 1964  Schwartz    Codes with ordered codewords (canonical form)
//! 1990  Hirschberg  Efficient decoding from first-code tables
//! 1996  Deutsch     DEFLATE (RFC 1951) transmits canonical code lengths
//! ```
//!
//! ## Frame
//!
//! ```text
//! padding | max_len | counts[1..=max_len] | symbols | payload
//! ```
//!
//! See [`frame`] for the byte-level layout.
//!
//! ## Complexity Analysis
//!
//! - **Time**: $O(N + n \log n)$ to encode `N` bytes over `n <= 256` symbols;
//!   $O(\text{bits})$ to decode.
//! - **Space**: $O(n)$ for the tree and tables plus the output buffer.
//!
//! ## Failure Modes
//!
//! 1. **Malformed frames**: truncated headers, impossible length tables and
//!    stray payload bits are reported, never repaired.
//! 2. **Small inputs**: the header costs `2 + max_len + n` bytes, so short or
//!    high-entropy inputs grow.
//!
//! ## Example
//!
//! ```
//! let blob = canonhuff::encode(b"AAAAAAAABBBCCD")?;
//! assert_eq!(canonhuff::decode(&blob)?, b"AAAAAAAABBBCCD");
//! # Ok::<(), canonhuff::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bits;
pub mod canonical;
pub mod codec;
pub mod config;
pub mod decode;
pub mod error;
pub mod file;
pub mod frame;
pub mod freq;
pub mod tree;

pub use canonical::CanonicalCode;
pub use codec::{decode, encode, encode_to};
pub use config::Config;
pub use decode::Decoder;
pub use error::{Error, Result};
pub use frame::Header;
pub use freq::FrequencyTable;
pub use tree::{CodeTable, HuffmanTree};
