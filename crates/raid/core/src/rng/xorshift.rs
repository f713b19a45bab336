//! 32-bit xorshift keystream used to mask save blocks.

/// Byte-at-a-time keystream seeded from a block key.
///
/// Encryption and decryption are the same operation: XOR each byte with
/// [`ByteStreamCipher32::next_byte`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteStreamCipher32 {
    state: u32,
    counter: u32,
}

impl ByteStreamCipher32 {
    /// Seed from a block key and run the `popcount(key)` warm-up.
    pub fn new(key: u32) -> Self {
        let mut cipher = Self {
            state: key,
            counter: 0,
        };
        for _ in 0..key.count_ones() {
            cipher.advance();
        }
        cipher
    }

    #[inline]
    fn advance(&mut self) {
        let mut s = self.state;
        s ^= s << 2;
        s ^= s >> 15;
        s ^= s << 13;
        self.state = s;
    }

    /// Next keystream byte, taken from lane `counter` of the current state.
    pub fn next_byte(&mut self) -> u8 {
        let byte = (self.state >> (self.counter * 8)) as u8;
        if self.counter == 3 {
            self.advance();
            self.counter = 0;
        } else {
            self.counter += 1;
        }
        byte
    }

    /// Four keystream bytes composed little-endian.
    pub fn next32(&mut self) -> u32 {
        u32::from_le_bytes([
            self.next_byte(),
            self.next_byte(),
            self.next_byte(),
            self.next_byte(),
        ])
    }

    /// XOR `buf` in place with the next `buf.len()` keystream bytes.
    pub fn apply(&mut self, buf: &mut [u8]) {
        for b in buf {
            *b ^= self.next_byte();
        }
    }
}
