//! Canonical decode table.
//!
//! Decoding never materializes a tree. For a canonical code the first code of
//! length `L` is `first(L) = (first(L - 1) + count(L - 1)) << 1`, and the
//! codes of that length are consecutive. Walking bit by bit we only track
//! `delta = code - first(L)`:
//!
//! ```text
//! delta(L) = 2 * (delta(L-1) - count(L-1)) + bit
//! ```
//!
//! A symbol is found when `delta(L) < count(L)`; it is entry `index(L) + delta`
//! of the canonical symbol list. This is the same walk as descending the
//! canonical tree with `0` going left and `1` going right, and `delta` stays
//! small no matter how long the codes are.

use crate::canonical::CanonicalCode;
use crate::error::{Error, Result};

/// Walk state between two bits.
#[derive(Clone, Copy, Debug, Default)]
struct Cursor {
    /// Bits consumed for the current codeword.
    len: usize,
    /// Offset of the current code from the first code of length `len`.
    delta: u64,
    /// Index of the first symbol of length `len` in the symbol list.
    index: usize,
}

/// Decode table built from a canonical code.
#[derive(Debug, Clone)]
pub struct Decoder {
    /// `counts[L]` symbols have length `L`; `counts[0]` is unused.
    counts: Vec<u64>,
    symbols: Vec<u8>,
}

impl Decoder {
    /// Build the table for `code`.
    pub fn new(code: &CanonicalCode) -> Self {
        let mut counts = vec![0u64; code.max_len() as usize + 1];
        for (len, count) in code.length_counts().into_iter().enumerate() {
            counts[len + 1] = count as u64;
        }
        Self {
            counts,
            symbols: code.symbols().to_vec(),
        }
    }

    fn max_len(&self) -> usize {
        self.counts.len() - 1
    }

    /// Decode every symbol of `bits`.
    ///
    /// # Errors
    /// Returns `Error::InvalidBitStream` if a bit pattern matches no code, or
    /// the stream stops in the middle of a codeword.
    pub fn decode_bits<I: IntoIterator<Item = u8>>(&self, bits: I) -> Result<Vec<u8>> {
        let bits = bits.into_iter();
        let mut out = Vec::with_capacity(bits.size_hint().0 / self.max_len().max(1));
        let mut cur = Cursor::default();
        let mut pos = 0usize;

        for bit in bits {
            if let Some(symbol) = self.step(&mut cur, bit, pos)? {
                out.push(symbol);
            }
            pos += 1;
        }

        if cur.len != 0 {
            return Err(Error::InvalidBitStream { bit: pos });
        }
        Ok(out)
    }

    /// Feed one bit. Returns the symbol once a codeword completes.
    fn step(&self, cur: &mut Cursor, bit: u8, pos: usize) -> Result<Option<u8>> {
        if cur.len >= self.max_len() {
            // Empty alphabet, or a code space the header left unassigned.
            return Err(Error::InvalidBitStream { bit: pos });
        }
        cur.len += 1;
        cur.delta = cur.delta.saturating_mul(2).saturating_add((bit != 0) as u64);

        let count = self.counts[cur.len];
        if cur.delta < count {
            let symbol = self.symbols[cur.index + cur.delta as usize];
            *cur = Cursor::default();
            return Ok(Some(symbol));
        }

        cur.delta -= count;
        cur.index += count as usize;
        if cur.len == self.max_len() {
            return Err(Error::InvalidBitStream { bit: pos });
        }
        Ok(None)
    }
}
