//! Binary frame layout.
//!
//! ```text
//! byte 0                padding     filler bits in the last payload byte (0..=7)
//! byte 1                max_len     longest code length, 0 for an empty alphabet
//! max_len bytes         counts      symbols per length 1..=max_len, mod 256
//! char_num bytes        symbols     canonical (length, value) order
//! rest                  payload     MSB-first packed codes
//! ```
//!
//! A count of 256 can only occur at `max_len` (every byte value with the same
//! length) and is stored as `0`. On read, counts summing to zero under a
//! non-zero `max_len` mean 256 symbols at `max_len`.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::canonical::CanonicalCode;
use crate::error::{Error, Result};

/// Size of the fixed part of the header.
pub const FIXED_HEADER_LEN: usize = 2;

/// Parsed or to-be-written frame header.
///
/// Only built from a [`CanonicalCode`] or by [`Header::parse`], so the length
/// table never exceeds 255 entries and always accounts for every symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    padding: u8,
    /// Index 0 is length 1.
    length_counts: Vec<usize>,
    symbols: Vec<u8>,
}

impl Header {
    /// Header describing `code`; `padding` must be below 8.
    pub(crate) fn new(code: &CanonicalCode, padding: u8) -> Self {
        debug_assert!(padding < 8);
        Self {
            padding,
            length_counts: code.length_counts(),
            symbols: code.symbols().to_vec(),
        }
    }

    /// Filler bits at the end of the payload.
    pub fn padding(&self) -> u8 {
        self.padding
    }

    /// Symbols per code length, index 0 is length 1.
    pub fn length_counts(&self) -> &[usize] {
        &self.length_counts
    }

    /// Symbols in canonical order.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Longest code length.
    pub fn max_len(&self) -> u8 {
        self.length_counts.len() as u8
    }

    /// Encoded size of the header in bytes.
    pub fn encoded_len(&self) -> usize {
        FIXED_HEADER_LEN + self.length_counts.len() + self.symbols.len()
    }

    /// Write the header.
    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&[self.padding, self.max_len()])?;
        w.write_all(&store_length_counts(&self.length_counts))?;
        w.write_all(&self.symbols)
    }

    /// Parse the header at the start of `buf`, returning it with the payload
    /// that follows.
    ///
    /// # Errors
    /// Returns `Error::MalformedHeader` if a field is out of range or the
    /// buffer ends before the header does.
    pub fn parse(buf: &[u8]) -> Result<(Self, &[u8])> {
        let [padding, max_len, rest @ ..] = buf else {
            return Err(Error::MalformedHeader("shorter than the fixed header"));
        };
        if *padding > 7 {
            return Err(Error::MalformedHeader("padding exceeds 7 bits"));
        }

        let max_len = *max_len as usize;
        if rest.len() < max_len {
            return Err(Error::MalformedHeader("length table truncated"));
        }
        let (raw_counts, rest) = rest.split_at(max_len);
        let length_counts = load_length_counts(raw_counts);

        let char_num: usize = length_counts.iter().sum();
        if char_num > 256 {
            return Err(Error::MalformedHeader("more than 256 symbols"));
        }
        if rest.len() < char_num {
            return Err(Error::MalformedHeader("symbol list truncated"));
        }
        let (symbols, payload) = rest.split_at(char_num);

        Ok((
            Self {
                padding: *padding,
                length_counts,
                symbols: symbols.to_vec(),
            },
            payload,
        ))
    }

    /// Rebuild the canonical code the header describes.
    ///
    /// # Errors
    /// Returns `Error::MalformedHeader` if the lengths over-subscribe the code
    /// space or a symbol repeats.
    pub fn canonical_code(&self) -> Result<CanonicalCode> {
        let lengths = self
            .length_counts
            .iter()
            .enumerate()
            .flat_map(|(i, &count)| std::iter::repeat((i + 1) as u8).take(count))
            .collect();
        CanonicalCode::rebuild(self.symbols.clone(), lengths)
    }

    /// Human readable description of the header.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "padding:  {}", self.padding);
        let _ = writeln!(out, "max_len:  {}", self.max_len());
        let _ = writeln!(out, "symbols:  {}", self.symbols.len());
        let mut start = 0;
        for (i, &count) in self.length_counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let listed: Vec<String> = self
                .symbols
                .get(start..start + count)
                .unwrap_or_default()
                .iter()
                .map(|s| format!("{s:02x}"))
                .collect();
            let _ = writeln!(out, "  len {:>3}: {:>3} [{}]", i + 1, count, listed.join(" "));
            start += count;
        }
        out
    }
}

/// Serialize per-length counts, storing 256 as 0.
pub fn store_length_counts(counts: &[usize]) -> Vec<u8> {
    counts.iter().map(|&c| (c % 256) as u8).collect()
}

/// Inverse of [`store_length_counts`]: an all-zero table under a non-zero
/// `max_len` stands for 256 symbols at the last length.
pub fn load_length_counts(raw: &[u8]) -> Vec<usize> {
    let mut counts: Vec<usize> = raw.iter().map(|&c| c as usize).collect();
    if counts.iter().all(|&c| c == 0) {
        if let Some(last) = counts.last_mut() {
            *last = 256;
        }
    }
    counts
}
