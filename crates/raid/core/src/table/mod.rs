//! Offset-indexed binary table reader.
//!
//! The game ships its encounter, reward and priority tables as little-endian
//! flat tables: a root offset at the buffer head, per-table indirection
//! records ("vtables") that map field slots to offsets, nested tables reached
//! through one more indirection, and length-prefixed vectors of table offsets.
//!
//! Only the reads those tables need are supported:
//!
//! - [`TableView`] resolves one table and reads fields by slot.
//! - [`FieldCursor`] walks a table's fields in declaration order, which is how
//!   every decoder in [`crate::tables`] is written.
//! - [`FixedReader`] reads fixed little-endian structs (save block payloads).
//!
//! Every read is bounds-checked. An absent field yields the caller's default;
//! anything else that does not fit the buffer is a [`DecodeError`].
mod cursor;
mod fixed;
mod view;

pub use cursor::FieldCursor;
pub use fixed::FixedReader;
pub use view::{TableVector, TableView};

use crate::error::{ErrorSeverity, RaidFault};

/// Errors raised while decoding a table or fixed struct.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DecodeError {
    /// A read would run past the end of the buffer.
    #[error("read of {len} bytes at {offset:#x} exceeds buffer of {size:#x} bytes")]
    OutOfBounds {
        offset: usize,
        len: usize,
        size: usize,
    },

    /// A vector's declared length does not fit in the buffer.
    #[error("vector of {count} entries at {offset:#x} overruns buffer of {size:#x} bytes")]
    VectorOverrun {
        offset: usize,
        count: usize,
        size: usize,
    },

    /// A table's indirection record points outside the buffer.
    #[error("table at {table:#x} has an indirection record outside the buffer")]
    BadIndirection { table: usize },

    /// A stored integer is outside the enumerated domain of its field.
    #[error("field `{field}` holds {value}, which is not a known value")]
    InvalidValue { field: &'static str, value: i64 },

    /// A fixed struct was handed a buffer of the wrong length.
    #[error("`{name}` needs at least {expected:#x} bytes, got {actual:#x}")]
    WrongSize {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A UTF-16 text field does not decode.
    #[error("field `{field}` is not valid UTF-16")]
    InvalidUtf16 { field: &'static str },
}

impl RaidFault for DecodeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use DecodeError::*;
        match self {
            OutOfBounds { .. } => "DECODE_OUT_OF_BOUNDS",
            VectorOverrun { .. } => "DECODE_VECTOR_OVERRUN",
            BadIndirection { .. } => "DECODE_BAD_INDIRECTION",
            InvalidValue { .. } => "DECODE_INVALID_VALUE",
            WrongSize { .. } => "DECODE_WRONG_SIZE",
            InvalidUtf16 { .. } => "DECODE_INVALID_UTF16",
        }
    }
}

/// Fixed-width little-endian integer that can be read from a table.
pub trait LeScalar: Copy {
    const SIZE: usize;

    /// Decode from exactly `SIZE` bytes.
    fn from_le_slice(bytes: &[u8]) -> Self;

    /// Widen for error reporting and enum mapping.
    fn widen(self) -> i64;
}

macro_rules! impl_le_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl LeScalar for $ty {
                const SIZE: usize = core::mem::size_of::<$ty>();

                #[inline]
                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; core::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(raw)
                }

                #[inline]
                fn widen(self) -> i64 {
                    self as i64
                }
            }
        )*
    };
}

impl_le_scalar!(u8, u16, u32, u64, i8, i16, i32, i64);

/// Borrow `len` bytes at `offset`, or fail with [`DecodeError::OutOfBounds`].
pub(crate) fn slice_at(buf: &[u8], offset: usize, len: usize) -> Result<&[u8], DecodeError> {
    offset
        .checked_add(len)
        .and_then(|end| buf.get(offset..end))
        .ok_or(DecodeError::OutOfBounds {
            offset,
            len,
            size: buf.len(),
        })
}

/// Read a little-endian scalar at `offset`. Unaligned reads are fine.
pub(crate) fn read_at<T: LeScalar>(buf: &[u8], offset: usize) -> Result<T, DecodeError> {
    slice_at(buf, offset, T::SIZE).map(T::from_le_slice)
}
