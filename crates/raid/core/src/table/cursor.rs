//! Declaration-order field walker.

use super::view::FIRST_SLOT;
use super::{DecodeError, LeScalar, TableVector, TableView};

/// Walks a table's fields in declaration order.
///
/// Each read consumes the current slot and advances by one field, whether
/// or not the field was present. Decoders therefore list every field of the
/// schema in order, skipping the ones they do not need with [`Self::skip`].
#[derive(Clone, Copy, Debug)]
pub struct FieldCursor<'a> {
    view: TableView<'a>,
    slot: u16,
}

impl<'a> FieldCursor<'a> {
    pub fn new(view: TableView<'a>) -> Self {
        Self {
            view,
            slot: FIRST_SLOT,
        }
    }

    /// Slot the next read will consume.
    pub fn slot(&self) -> u16 {
        self.slot
    }

    pub fn view(&self) -> TableView<'a> {
        self.view
    }

    fn advance(&mut self) -> u16 {
        let slot = self.slot;
        self.slot += 2;
        slot
    }

    /// Step over one field.
    pub fn skip(&mut self) {
        self.advance();
    }

    pub fn scalar<T: LeScalar>(&mut self, default: T) -> Result<T, DecodeError> {
        let slot = self.advance();
        self.view.scalar(slot, default)
    }

    /// Read a scalar and map it into an enumerated domain.
    ///
    /// An absent field yields `default`; a present value that `map` rejects is
    /// [`DecodeError::InvalidValue`].
    pub fn mapped<T, E>(
        &mut self,
        field: &'static str,
        default: E,
        map: impl FnOnce(T) -> Option<E>,
    ) -> Result<E, DecodeError>
    where
        T: LeScalar,
    {
        let slot = self.advance();
        let Some(at) = self.view.field_position(slot)? else {
            return Ok(default);
        };
        let raw: T = super::read_at(self.view.buffer(), at)?;
        map(raw).ok_or(DecodeError::InvalidValue {
            field,
            value: raw.widen(),
        })
    }

    pub fn table(&mut self) -> Result<Option<TableView<'a>>, DecodeError> {
        let slot = self.advance();
        self.view.table(slot)
    }

    /// Follow a nested table and decode it with `decode`.
    pub fn nested<R>(
        &mut self,
        decode: impl FnOnce(FieldCursor<'a>) -> Result<R, DecodeError>,
    ) -> Result<Option<R>, DecodeError> {
        self.table()?.map(|view| decode(FieldCursor::new(view))).transpose()
    }

    pub fn vector(&mut self) -> Result<TableVector<'a>, DecodeError> {
        let slot = self.advance();
        self.view.vector(slot)
    }
}
