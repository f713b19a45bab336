//! Sequential reader for fixed little-endian structs.

use super::{DecodeError, LeScalar, read_at, slice_at};

/// Reads consecutive fields of a fixed-layout struct.
#[derive(Clone, Debug)]
pub struct FixedReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FixedReader<'a> {
    /// Start reading `buf`, which must hold at least `size` bytes.
    pub fn new(name: &'static str, buf: &'a [u8], size: usize) -> Result<Self, DecodeError> {
        if buf.len() < size {
            return Err(DecodeError::WrongSize {
                name,
                expected: size,
                actual: buf.len(),
            });
        }
        Ok(Self { buf, pos: 0 })
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn read<T: LeScalar>(&mut self) -> Result<T, DecodeError> {
        let value = read_at(self.buf, self.pos)?;
        self.pos += T::SIZE;
        Ok(value)
    }

    pub fn bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let bytes = slice_at(self.buf, self.pos, len)?;
        self.pos += len;
        Ok(bytes)
    }

    pub fn skip(&mut self, len: usize) -> Result<(), DecodeError> {
        self.bytes(len).map(|_| ())
    }

    /// Read a NUL-terminated UTF-16LE string stored in `len` bytes.
    pub fn utf16(&mut self, field: &'static str, len: usize) -> Result<String, DecodeError> {
        let units: Vec<u16> = self
            .bytes(len)?
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .take_while(|&unit| unit != 0)
            .collect();
        String::from_utf16(&units).map_err(|_| DecodeError::InvalidUtf16 { field })
    }
}
