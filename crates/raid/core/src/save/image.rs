//! Decrypted save-file image.

use super::{BlockKey, BlockSource, BlockValue, SaveError};

/// Pad XOR-ed over the whole save file except its trailing hash.
const STATIC_XORPAD: [u8; 127] = [
    0xA0, 0x92, 0xD1, 0x06, 0x07, 0xDB, 0x32, 0xA1, 0xAE, 0x01, 0xF5, 0xC5, 0x1E, 0x84, 0x4F,
    0xE3, 0x53, 0xCA, 0x37, 0xF4, 0xA7, 0xB0, 0x4D, 0xA0, 0x18, 0xB7, 0xC2, 0x97, 0xDA, 0x5F,
    0x53, 0x2B, 0x75, 0xFA, 0x48, 0x16, 0xF8, 0xD4, 0x8A, 0x6F, 0x61, 0x05, 0xF4, 0xE2, 0xFD,
    0x04, 0xB5, 0xA3, 0x0F, 0xFC, 0x44, 0x92, 0xCB, 0x32, 0xE6, 0x1B, 0xB9, 0xB1, 0x2E, 0x01,
    0xB0, 0x56, 0x53, 0x36, 0xD2, 0xD1, 0x50, 0x3D, 0xDE, 0x5B, 0x2E, 0x0E, 0x52, 0xFD, 0xDF,
    0x2F, 0x7B, 0xCA, 0x63, 0x50, 0xA4, 0x67, 0x5D, 0x23, 0x17, 0xC0, 0x52, 0xE1, 0xA6, 0x30,
    0x7C, 0x2B, 0xB6, 0x70, 0x36, 0x5B, 0x2A, 0x27, 0x69, 0x33, 0xF5, 0x63, 0x7B, 0x36, 0x3F,
    0x26, 0x9B, 0xA3, 0xED, 0x7A, 0x53, 0x00, 0xA4, 0x48, 0xB3, 0x50, 0x9E, 0x14, 0xA0, 0x52,
    0xDE, 0x7E, 0x10, 0x2B, 0x1B, 0x77, 0x6E,
];

/// Trailing hash left untouched by the pad.
const HASH_LEN: usize = 0x20;

/// A save file with the outer pad removed.
///
/// Blocks are located by scanning for the little-endian key bytes; the
/// block's tag byte follows the key directly. Key hints are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveImage {
    data: Vec<u8>,
}

impl SaveImage {
    /// Remove the outer pad from a raw save file.
    pub fn decrypt(mut raw: Vec<u8>) -> Self {
        apply_xorpad(&mut raw);
        Self { data: raw }
    }

    /// Wrap bytes that are already unpadded.
    pub fn from_plain(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Re-apply the outer pad, producing bytes in the on-disk form.
    pub fn into_raw(mut self) -> Vec<u8> {
        apply_xorpad(&mut self.data);
        self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Offset of the tag byte of block `key`.
    pub fn find_block(&self, key: u32) -> Result<usize, SaveError> {
        let needle = key.to_le_bytes();
        self.data
            .windows(needle.len())
            .position(|window| window == needle)
            .map(|at| at + needle.len())
            .ok_or(SaveError::BlockNotFound { key, hint: None })
    }
}

impl BlockSource for SaveImage {
    fn read_block(&self, key: BlockKey) -> Result<BlockValue, SaveError> {
        let at = self.find_block(key.key)?;
        tracing::trace!(key = format_args!("{:#010x}", key.key), at, "decoding save block");
        BlockValue::decode(key.key, &self.data[at..])
    }
}

fn apply_xorpad(data: &mut [u8]) {
    let end = data.len().saturating_sub(HASH_LEN);
    for (byte, pad) in data[..end].iter_mut().zip(STATIC_XORPAD.iter().cycle()) {
        *byte ^= pad;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_skips_trailing_hash() {
        let raw = vec![0u8; 200];
        let image = SaveImage::decrypt(raw);
        assert_eq!(image.as_bytes()[0], 0xA0);
        assert_eq!(image.as_bytes()[127], 0xA0);
        assert!(image.as_bytes()[200 - HASH_LEN..].iter().all(|&b| b == 0));
    }

    #[test]
    fn pad_round_trips() {
        let raw: Vec<u8> = (0..=255u8).cycle().take(700).collect();
        assert_eq!(SaveImage::decrypt(raw.clone()).into_raw(), raw);
    }

    #[test]
    fn scans_for_key_and_decodes_block() {
        let key = BlockKey::TRAINER_STATUS;
        let mut data = vec![0x11; 9];
        data.extend(key.key.to_le_bytes());
        data.extend(BlockValue::Object(vec![1, 2, 3]).encode(key.key));
        data.extend([0u8; 4]);
        let image = SaveImage::from_plain(data);
        assert_eq!(image.find_block(key.key), Ok(13));
        assert_eq!(image.read_object(key), Ok(vec![1, 2, 3]));
        assert_eq!(
            image.read_bool(BlockKey::STORY_FLAGS[0]),
            Err(SaveError::BlockNotFound {
                key: BlockKey::STORY_FLAGS[0].key,
                hint: None
            })
        );
    }
}
