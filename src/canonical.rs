//! Canonical code construction.
//!
//! A canonical code is fully determined by its `(symbol, length)` pairs taken
//! in `(length, symbol)` order: the first symbol gets the all-zero code of its
//! length, and every following code is the previous one plus one, shifted left
//! by the growth in length. Encoder and decoder run the same [`CanonicalCode::rebuild`]
//! so only lengths ever need to be stored.
//!
//! Codes are kept as bit sequences rather than fixed-width integers, so a code
//! may be as long as the 255-bit limit of the frame.

use crate::error::{Error, Result};
use crate::freq::FrequencyTable;
use crate::tree::{CodeTable, HuffmanTree};

/// Longest code length the frame can describe.
pub const MAX_CODE_LEN: usize = 255;

/// A code table in canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCode {
    symbols: Vec<u8>,
    lengths: Vec<u8>,
    table: CodeTable,
}

impl CanonicalCode {
    /// Derive the canonical code for `freq` by way of a Huffman tree.
    ///
    /// An empty table yields an empty code.
    pub fn from_frequencies(freq: &FrequencyTable) -> Result<Self> {
        match HuffmanTree::build(freq) {
            Some(tree) => Self::from_code_table(&tree.code_table()),
            None => Self::rebuild(Vec::new(), Vec::new()),
        }
    }

    /// Canonicalize an arbitrary prefix code, keeping only its lengths.
    ///
    /// # Errors
    /// Returns `Error::CodeTooLong` if a code is longer than [`MAX_CODE_LEN`].
    pub fn from_code_table(table: &CodeTable) -> Result<Self> {
        let mut pairs = table
            .iter()
            .map(|(symbol, code)| {
                if code.len() > MAX_CODE_LEN {
                    return Err(Error::CodeTooLong(code.len()));
                }
                Ok((code.len() as u8, symbol))
            })
            .collect::<Result<Vec<_>>>()?;
        pairs.sort_unstable();

        let (lengths, symbols) = pairs.into_iter().unzip();
        Self::rebuild(symbols, lengths)
    }

    /// Assign canonical codes to `symbols`, which must already be in
    /// canonical order with matching `lengths`.
    ///
    /// # Errors
    /// Returns `Error::MalformedHeader` if lengths are zero or decreasing, a
    /// symbol repeats, or the lengths over-subscribe the code space.
    pub fn rebuild(symbols: Vec<u8>, lengths: Vec<u8>) -> Result<Self> {
        if symbols.len() != lengths.len() {
            return Err(Error::MalformedHeader("symbol and length lists differ in size"));
        }

        let mut table = CodeTable::empty();
        let mut code: Vec<u8> = Vec::new();
        for (i, (&symbol, &len)) in symbols.iter().zip(&lengths).enumerate() {
            if len == 0 {
                return Err(Error::MalformedHeader("zero code length"));
            }
            if table.get(symbol).is_some() {
                return Err(Error::MalformedHeader("duplicate symbol"));
            }
            if i > 0 {
                if len < lengths[i - 1] {
                    return Err(Error::MalformedHeader("code lengths out of order"));
                }
                if !increment(&mut code) {
                    return Err(Error::MalformedHeader("over-subscribed code lengths"));
                }
            }
            code.resize(len as usize, 0);
            table.set(symbol, code.clone());
        }

        Ok(Self {
            symbols,
            lengths,
            table,
        })
    }

    /// Symbols in canonical order.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Code length of each entry of [`symbols`](Self::symbols).
    pub fn lengths(&self) -> &[u8] {
        &self.lengths
    }

    /// Canonical code of `symbol`.
    pub fn code(&self, symbol: u8) -> Option<&[u8]> {
        self.table.get(symbol)
    }

    /// The full symbol to code mapping.
    pub fn code_table(&self) -> &CodeTable {
        &self.table
    }

    /// Alphabet size.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True for the empty alphabet.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Longest code length, `0` for the empty alphabet.
    pub fn max_len(&self) -> u8 {
        self.lengths.last().copied().unwrap_or(0)
    }

    /// Number of symbols at each length `1..=max_len`.
    pub fn length_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.max_len() as usize];
        for &len in &self.lengths {
            counts[len as usize - 1] += 1;
        }
        counts
    }

    /// Bits needed to code a buffer with the symbol counts of `freq`.
    pub fn payload_bits(&self, freq: &FrequencyTable) -> u64 {
        self.symbols
            .iter()
            .zip(&self.lengths)
            .map(|(&s, &len)| freq.count(s) * len as u64)
            .sum()
    }
}

/// Add one to a big-endian bit sequence in place. Returns false on carry out.
fn increment(bits: &mut [u8]) -> bool {
    for bit in bits.iter_mut().rev() {
        if *bit == 0 {
            *bit = 1;
            return true;
        }
        *bit = 0;
    }
    false
}
