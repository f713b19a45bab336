//! Single-table access by field slot.

use super::{DecodeError, LeScalar, read_at};

/// Byte offset of the first field slot inside an indirection record.
pub(crate) const FIRST_SLOT: u16 = 4;

/// One resolved table inside a buffer.
///
/// Field slots are byte offsets into the table's indirection record: the
/// first field lives at slot 4, the next at 6, and so on.
#[derive(Clone, Copy, Debug)]
pub struct TableView<'a> {
    buf: &'a [u8],
    pos: usize,
    vtable: usize,
    vtable_size: u16,
}

impl<'a> TableView<'a> {
    /// Resolve the root table through the offset stored at the buffer head.
    pub fn root(buf: &'a [u8]) -> Result<Self, DecodeError> {
        let pos = read_at::<u32>(buf, 0)? as usize;
        Self::at(buf, pos)
    }

    /// Resolve the table whose header sits at `pos`.
    pub fn at(buf: &'a [u8], pos: usize) -> Result<Self, DecodeError> {
        let soffset = i64::from(read_at::<i32>(buf, pos)?);
        let vtable = usize::try_from(pos as i64 - soffset)
            .map_err(|_| DecodeError::BadIndirection { table: pos })?;
        let vtable_size = read_at::<u16>(buf, vtable)?;
        Ok(Self {
            buf,
            pos,
            vtable,
            vtable_size,
        })
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    /// Absolute position of the field in `slot`, or `None` when absent.
    ///
    /// A slot beyond the indirection record and a zero offset both mean the
    /// writer omitted the field.
    pub fn field_position(&self, slot: u16) -> Result<Option<usize>, DecodeError> {
        if slot >= self.vtable_size {
            return Ok(None);
        }
        let offset = read_at::<u16>(self.buf, self.vtable + usize::from(slot))?;
        if offset == 0 {
            return Ok(None);
        }
        Ok(Some(self.pos + usize::from(offset)))
    }

    /// Read a scalar field, falling back to `default` when absent.
    pub fn scalar<T: LeScalar>(&self, slot: u16, default: T) -> Result<T, DecodeError> {
        match self.field_position(slot)? {
            Some(at) => read_at(self.buf, at),
            None => Ok(default),
        }
    }

    /// Follow a nested-table field.
    pub fn table(&self, slot: u16) -> Result<Option<TableView<'a>>, DecodeError> {
        match self.field_position(slot)? {
            Some(at) => self.indirect(at).and_then(|pos| Self::at(self.buf, pos)).map(Some),
            None => Ok(None),
        }
    }

    /// Follow a vector-of-tables field. An absent vector is empty.
    pub fn vector(&self, slot: u16) -> Result<TableVector<'a>, DecodeError> {
        let Some(at) = self.field_position(slot)? else {
            return Ok(TableVector::empty(self.buf));
        };
        let vpos = self.indirect(at)?;
        let count = read_at::<u32>(self.buf, vpos)? as usize;
        let start = vpos + 4;
        let fits = count
            .checked_mul(4)
            .and_then(|bytes| start.checked_add(bytes))
            .is_some_and(|end| end <= self.buf.len());
        if !fits {
            return Err(DecodeError::VectorOverrun {
                offset: vpos,
                count,
                size: self.buf.len(),
            });
        }
        Ok(TableVector {
            buf: self.buf,
            start,
            len: count,
        })
    }

    /// `at + u32(at)`: the uoffset convention for nested references.
    fn indirect(&self, at: usize) -> Result<usize, DecodeError> {
        let rel = read_at::<u32>(self.buf, at)? as usize;
        at.checked_add(rel).ok_or(DecodeError::OutOfBounds {
            offset: at,
            len: rel,
            size: self.buf.len(),
        })
    }
}

/// Length-prefixed vector of table offsets.
#[derive(Clone, Copy, Debug)]
pub struct TableVector<'a> {
    buf: &'a [u8],
    start: usize,
    len: usize,
}

impl<'a> TableVector<'a> {
    fn empty(buf: &'a [u8]) -> Self {
        Self { buf, start: 0, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resolve the table referenced by element `index`.
    pub fn get(&self, index: usize) -> Option<Result<TableView<'a>, DecodeError>> {
        if index >= self.len {
            return None;
        }
        let at = self.start + index * 4;
        Some(read_at::<u32>(self.buf, at).and_then(|rel| {
            let pos = at
                .checked_add(rel as usize)
                .ok_or(DecodeError::BadIndirection { table: at })?;
            TableView::at(self.buf, pos)
        }))
    }

    pub fn iter(&self) -> impl Iterator<Item = Result<TableView<'a>, DecodeError>> + '_ {
        (0..self.len).filter_map(move |i| self.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root -> table { slot 4: u16 = 0xBEEF, slot 6: absent, slot 8: i8 = -3 }
    fn build() -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&16u32.to_le_bytes()); // 0: root -> 16
        buf.extend_from_slice(&10u16.to_le_bytes()); // 4: vtable size
        buf.extend_from_slice(&8u16.to_le_bytes()); // 6: table size
        buf.extend_from_slice(&4u16.to_le_bytes()); // 8: slot 4 -> +4
        buf.extend_from_slice(&0u16.to_le_bytes()); // 10: slot 6 absent
        buf.extend_from_slice(&6u16.to_le_bytes()); // 12: slot 8 -> +6
        buf.extend_from_slice(&[0, 0]); // 14: pad
        buf.extend_from_slice(&12i32.to_le_bytes()); // 16: soffset -> vtable at 4
        buf.extend_from_slice(&0xBEEFu16.to_le_bytes()); // 20
        buf.push(0xFD); // 22
        buf.push(0);
        buf
    }

    #[test]
    fn reads_present_and_absent_fields() {
        let buf = build();
        let view = TableView::root(&buf).unwrap();
        assert_eq!(view.position(), 16);
        assert_eq!(view.scalar::<u16>(4, 0).unwrap(), 0xBEEF);
        assert_eq!(view.scalar::<i32>(6, 77).unwrap(), 77);
        assert_eq!(view.scalar::<i8>(8, 0).unwrap(), -3);
        // beyond the indirection record
        assert_eq!(view.scalar::<u8>(10, 9).unwrap(), 9);
        assert!(view.vector(6).unwrap().is_empty());
    }

    #[test]
    fn truncated_buffer_is_an_error() {
        let buf = build();
        assert!(TableView::root(&buf[..18]).is_err());
        let view = TableView::root(&buf[..21]).unwrap();
        assert!(matches!(
            view.scalar::<u16>(4, 0),
            Err(DecodeError::OutOfBounds { offset: 20, .. })
        ));
    }

    #[test]
    fn vector_element_pointing_past_the_buffer_is_an_error() {
        // root table with one vector field holding a single dangling element
        let mut buf = Vec::new();
        buf.extend_from_slice(&12u32.to_le_bytes()); // 0: root -> 12
        buf.extend_from_slice(&6u16.to_le_bytes()); // 4: vtable size
        buf.extend_from_slice(&8u16.to_le_bytes()); // 6: table size
        buf.extend_from_slice(&4u16.to_le_bytes()); // 8: slot 4 -> +4
        buf.extend_from_slice(&[0, 0]); // 10: pad
        buf.extend_from_slice(&8i32.to_le_bytes()); // 12: soffset -> vtable at 4
        buf.extend_from_slice(&4u32.to_le_bytes()); // 16: vector at 20
        buf.extend_from_slice(&1u32.to_le_bytes()); // 20: count
        buf.extend_from_slice(&u32::MAX.to_le_bytes()); // 24: element offset

        let view = TableView::root(&buf).unwrap();
        let vector = view.vector(4).unwrap();
        assert_eq!(vector.len(), 1);
        assert!(matches!(
            vector.get(0),
            Some(Err(DecodeError::OutOfBounds { .. } | DecodeError::BadIndirection { .. }))
        ));
        assert!(vector.get(1).is_none());
    }

    #[test]
    fn negative_indirection_outside_buffer_is_rejected() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&4u32.to_le_bytes());
        buf.extend_from_slice(&64i32.to_le_bytes());
        assert_eq!(
            TableView::root(&buf).unwrap_err(),
            DecodeError::BadIndirection { table: 4 }
        );
    }
}
