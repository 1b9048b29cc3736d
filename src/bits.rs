//! MSB-first bit packing.

use std::io::{self, Write};

/// Bytes accumulated before a flush to the underlying writer.
const FLUSH_THRESHOLD: usize = 8 * 1024;

/// Packs bits into bytes, most significant bit first.
///
/// Completed bytes are buffered and handed to the writer in chunks; the final
/// partial byte is zero-filled on the right by [`finish`](Self::finish).
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    inner: W,
    buf: Vec<u8>,
    current: u8,
    filled: u8,
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Wrap `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(FLUSH_THRESHOLD),
            current: 0,
            filled: 0,
            bits_written: 0,
        }
    }

    /// Append one bit. Any non-zero value is a `1`.
    pub fn push_bit(&mut self, bit: u8) -> io::Result<()> {
        self.current = (self.current << 1) | (bit != 0) as u8;
        self.filled += 1;
        self.bits_written += 1;
        if self.filled == 8 {
            self.buf.push(self.current);
            self.current = 0;
            self.filled = 0;
            if self.buf.len() >= FLUSH_THRESHOLD {
                self.inner.write_all(&self.buf)?;
                self.buf.clear();
            }
        }
        Ok(())
    }

    /// Append a code given as a `0`/`1` sequence.
    pub fn push_code(&mut self, code: &[u8]) -> io::Result<()> {
        for &bit in code {
            self.push_bit(bit)?;
        }
        Ok(())
    }

    /// Bits pushed so far.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Pad the last byte, flush everything, and return the writer together
    /// with the number of filler bits (0 when the bit count divides by 8).
    pub fn finish(mut self) -> io::Result<(W, u8)> {
        let padding = if self.filled == 0 { 0 } else { 8 - self.filled };
        if self.filled > 0 {
            self.buf.push(self.current << padding);
        }
        self.inner.write_all(&self.buf)?;
        self.inner.flush()?;
        Ok((self.inner, padding))
    }
}

/// Number of filler bits needed to complete the last byte of `bits` bits.
pub fn padding_for(bits: u64) -> u8 {
    ((8 - bits % 8) % 8) as u8
}

/// Iterates the bits of a payload, most significant bit first, stopping
/// before the trailing filler bits.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    len: usize,
}

impl<'a> BitReader<'a> {
    /// Read `bytes`, ignoring the last `padding` bits.
    ///
    /// Returns `None` if `padding` exceeds the bits available.
    pub fn new(bytes: &'a [u8], padding: u8) -> Option<Self> {
        let len = (bytes.len() * 8).checked_sub(padding as usize)?;
        Some(Self { bytes, pos: 0, len })
    }

    /// Unpadded stream length in bits.
    pub fn bit_len(&self) -> usize {
        self.len
    }
}

impl Iterator for BitReader<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.pos >= self.len {
            return None;
        }
        let byte = self.bytes[self.pos / 8];
        let bit = (byte >> (7 - self.pos % 8)) & 1;
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.len - self.pos;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for BitReader<'_> {}
