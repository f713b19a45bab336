//! Type-tagged block values.

use super::SaveError;
use crate::rng::ByteStreamCipher32;

/// Shape tag stored (masked) in the first byte of every block.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum TypeCode {
    None = 0,
    BoolFalse = 1,
    BoolTrue = 2,
    BoolArray = 3,
    Object = 4,
    Array = 5,
    U8 = 8,
    U16 = 9,
    U32 = 10,
    U64 = 11,
    I8 = 12,
    I16 = 13,
    I32 = 14,
    I64 = 15,
    Float = 16,
    Double = 17,
}

impl TypeCode {
    /// Byte width of one value of this type, for types with a fixed width.
    pub fn byte_size(self) -> Option<usize> {
        use TypeCode::*;
        match self {
            BoolFalse | BoolTrue | U8 | I8 => Some(1),
            U16 | I16 => Some(2),
            U32 | I32 | Float => Some(4),
            U64 | I64 | Double => Some(8),
            None | BoolArray | Object | Array => Option::None,
        }
    }

    /// Parse a decrypted tag byte into a code this reader can decode.
    fn parse(key: u32, tag: u8) -> Result<Self, SaveError> {
        match Self::from_repr(tag) {
            Some(TypeCode::None | TypeCode::BoolArray) | Option::None => {
                Err(SaveError::UnsupportedTag { key, tag })
            }
            Some(code) => Ok(code),
        }
    }
}

/// One fixed-width primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalarValue {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl ScalarValue {
    /// Decode `bytes` (exactly `code.byte_size()` long) as `code`.
    fn from_le(code: TypeCode, bytes: &[u8]) -> Option<Self> {
        let mut raw = [0u8; 8];
        raw.get_mut(..bytes.len())?.copy_from_slice(bytes);
        let value = match code {
            TypeCode::BoolFalse | TypeCode::BoolTrue => {
                ScalarValue::Bool(raw[0] == TypeCode::BoolTrue as u8)
            }
            TypeCode::U8 => ScalarValue::U8(raw[0]),
            TypeCode::I8 => ScalarValue::I8(raw[0] as i8),
            TypeCode::U16 => ScalarValue::U16(u16::from_le_bytes([raw[0], raw[1]])),
            TypeCode::I16 => ScalarValue::I16(i16::from_le_bytes([raw[0], raw[1]])),
            TypeCode::U32 => ScalarValue::U32(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]])),
            TypeCode::I32 => ScalarValue::I32(i32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]])),
            TypeCode::Float => {
                ScalarValue::F32(f32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
            }
            TypeCode::U64 => ScalarValue::U64(u64::from_le_bytes(raw)),
            TypeCode::I64 => ScalarValue::I64(i64::from_le_bytes(raw)),
            TypeCode::Double => ScalarValue::F64(f64::from_le_bytes(raw)),
            TypeCode::None | TypeCode::BoolArray | TypeCode::Object | TypeCode::Array => {
                return None;
            }
        };
        Some(value)
    }

    pub fn type_code(&self) -> TypeCode {
        match self {
            ScalarValue::Bool(true) => TypeCode::BoolTrue,
            ScalarValue::Bool(false) => TypeCode::BoolFalse,
            ScalarValue::U8(_) => TypeCode::U8,
            ScalarValue::U16(_) => TypeCode::U16,
            ScalarValue::U32(_) => TypeCode::U32,
            ScalarValue::U64(_) => TypeCode::U64,
            ScalarValue::I8(_) => TypeCode::I8,
            ScalarValue::I16(_) => TypeCode::I16,
            ScalarValue::I32(_) => TypeCode::I32,
            ScalarValue::I64(_) => TypeCode::I64,
            ScalarValue::F32(_) => TypeCode::Float,
            ScalarValue::F64(_) => TypeCode::Double,
        }
    }

    fn to_le(self) -> Vec<u8> {
        match self {
            ScalarValue::Bool(b) => vec![if b {
                TypeCode::BoolTrue as u8
            } else {
                TypeCode::BoolFalse as u8
            }],
            ScalarValue::U8(v) => v.to_le_bytes().to_vec(),
            ScalarValue::U16(v) => v.to_le_bytes().to_vec(),
            ScalarValue::U32(v) => v.to_le_bytes().to_vec(),
            ScalarValue::U64(v) => v.to_le_bytes().to_vec(),
            ScalarValue::I8(v) => v.to_le_bytes().to_vec(),
            ScalarValue::I16(v) => v.to_le_bytes().to_vec(),
            ScalarValue::I32(v) => v.to_le_bytes().to_vec(),
            ScalarValue::I64(v) => v.to_le_bytes().to_vec(),
            ScalarValue::F32(v) => v.to_le_bytes().to_vec(),
            ScalarValue::F64(v) => v.to_le_bytes().to_vec(),
        }
    }
}

/// Decoded content of one save block.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockValue {
    /// Inline boolean; the tag itself carries the value.
    Bool(bool),
    /// Inline fixed-width primitive.
    Scalar(ScalarValue),
    /// Length-prefixed opaque payload.
    Object(Vec<u8>),
    /// Count-prefixed array of one primitive subtype.
    Array {
        subtype: TypeCode,
        items: Vec<ScalarValue>,
    },
}

/// Sequential keystream reader over an encoded block.
struct Decrypting<'a> {
    key: u32,
    bytes: &'a [u8],
    pos: usize,
    cipher: ByteStreamCipher32,
}

impl<'a> Decrypting<'a> {
    fn new(key: u32, bytes: &'a [u8]) -> Self {
        Self {
            key,
            bytes,
            pos: 0,
            cipher: ByteStreamCipher32::new(key),
        }
    }

    fn take(&mut self, len: usize) -> Result<Vec<u8>, SaveError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(SaveError::Truncated {
                key: self.key,
                needed: self.pos.saturating_add(len),
                available: self.bytes.len(),
            })?;
        let mut out = self.bytes[self.pos..end].to_vec();
        self.cipher.apply(&mut out);
        self.pos = end;
        Ok(out)
    }

    fn byte(&mut self) -> Result<u8, SaveError> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32, SaveError> {
        let raw = self.take(4)?;
        Ok(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }
}

impl BlockValue {
    /// Decode a block whose tag byte is the first byte of `bytes`.
    ///
    /// Trailing bytes after the block are ignored. Length prefixes are only
    /// trusted after unmasking.
    pub fn decode(key: u32, bytes: &[u8]) -> Result<Self, SaveError> {
        Self::decode_with_len(key, bytes).map(|(value, _)| value)
    }

    /// Decode and also report how many bytes the block occupies.
    pub fn decode_with_len(key: u32, bytes: &[u8]) -> Result<(Self, usize), SaveError> {
        let mut reader = Decrypting::new(key, bytes);
        let code = TypeCode::parse(key, reader.byte()?)?;
        let value = match code {
            TypeCode::BoolFalse => BlockValue::Bool(false),
            TypeCode::BoolTrue => BlockValue::Bool(true),
            TypeCode::Object => {
                let len = reader.u32()? as usize;
                BlockValue::Object(reader.take(len)?)
            }
            TypeCode::Array => {
                let count = reader.u32()? as usize;
                let subtype = TypeCode::parse(key, reader.byte()?)?;
                let width = subtype
                    .byte_size()
                    .ok_or(SaveError::UnsupportedTag {
                        key,
                        tag: subtype as u8,
                    })?;
                let data = reader.take(count.saturating_mul(width))?;
                let items = data
                    .chunks_exact(width)
                    .filter_map(|chunk| ScalarValue::from_le(subtype, chunk))
                    .collect();
                BlockValue::Array { subtype, items }
            }
            scalar => {
                let width = scalar.byte_size().ok_or(SaveError::UnsupportedTag {
                    key,
                    tag: scalar as u8,
                })?;
                let data = reader.take(width)?;
                let value = ScalarValue::from_le(scalar, &data).ok_or(
                    SaveError::UnsupportedTag {
                        key,
                        tag: scalar as u8,
                    },
                )?;
                BlockValue::Scalar(value)
            }
        };
        Ok((value, reader.pos))
    }

    /// Number of bytes the block occupies, given enough of its head.
    ///
    /// Needs the tag byte, and for sized shapes the length prefix (plus the
    /// array subtype). Returns `None` when `head` is too short to tell.
    pub fn encoded_len(key: u32, head: &[u8]) -> Result<Option<usize>, SaveError> {
        let mut reader = Decrypting::new(key, head);
        let Ok(tag) = reader.byte() else {
            return Ok(None);
        };
        let code = TypeCode::parse(key, tag)?;
        let len = match code {
            TypeCode::BoolFalse | TypeCode::BoolTrue => 1,
            TypeCode::Object => match reader.u32() {
                Ok(len) => 5 + len as usize,
                Err(_) => return Ok(None),
            },
            TypeCode::Array => {
                let (Ok(count), Ok(sub)) = (reader.u32(), reader.byte()) else {
                    return Ok(None);
                };
                let subtype = TypeCode::parse(key, sub)?;
                let width = subtype
                    .byte_size()
                    .ok_or(SaveError::UnsupportedTag { key, tag: sub })?;
                6 + (count as usize).saturating_mul(width)
            }
            scalar => 1 + scalar.byte_size().unwrap_or(0),
        };
        Ok(Some(len))
    }

    /// Encode and mask this value for `key`.
    pub fn encode(&self, key: u32) -> Vec<u8> {
        let mut out = Vec::new();
        match self {
            BlockValue::Bool(b) => out.extend(ScalarValue::Bool(*b).to_le()),
            BlockValue::Scalar(value) => {
                out.push(value.type_code() as u8);
                out.extend(value.to_le());
            }
            BlockValue::Object(payload) => {
                out.push(TypeCode::Object as u8);
                out.extend((payload.len() as u32).to_le_bytes());
                out.extend_from_slice(payload);
            }
            BlockValue::Array { subtype, items } => {
                out.push(TypeCode::Array as u8);
                out.extend((items.len() as u32).to_le_bytes());
                out.push(*subtype as u8);
                for item in items {
                    out.extend(item.to_le());
                }
            }
        }
        ByteStreamCipher32::new(key).apply(&mut out);
        out
    }

    /// Short name of the shape, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            BlockValue::Bool(_) => "bool",
            BlockValue::Scalar(_) => "scalar",
            BlockValue::Object(_) => "object",
            BlockValue::Array { .. } => "array",
        }
    }

    pub fn as_bool(&self, key: u32) -> Result<bool, SaveError> {
        match self {
            BlockValue::Bool(b) => Ok(*b),
            other => Err(SaveError::UnexpectedType {
                key,
                expected: "bool",
                found: other.kind(),
            }),
        }
    }

    pub fn into_object(self, key: u32) -> Result<Vec<u8>, SaveError> {
        match self {
            BlockValue::Object(payload) => Ok(payload),
            other => Err(SaveError::UnexpectedType {
                key,
                expected: "object",
                found: other.kind(),
            }),
        }
    }
}
