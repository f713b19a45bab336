//! Block directory inside a live process snapshot.

use super::{BlockKey, BlockSource, BlockValue, SaveError};

/// Distance between consecutive directory entries.
const ENTRY_STRIDE: usize = 0x20;
/// How far from the hint the neighborhood scan may look.
const SCAN_WINDOW: usize = 0x1000;
/// Offset of the payload pointer inside a directory entry.
const POINTER_OFFSET: usize = 8;
/// Enough head bytes to size any block shape.
const HEAD_LEN: usize = 6;

/// Read access to the memory a snapshot was taken from.
///
/// Implementations wrap whatever transport fetches bytes; the reader never
/// retries, so transports own their own retry and chunking.
pub trait BlockMemory {
    /// Read `len` bytes of the block directory starting at `offset`.
    fn read_directory(&self, offset: usize, len: usize) -> Result<Vec<u8>, SaveError>;

    /// Read `len` bytes at an absolute address.
    fn read_absolute(&self, address: u64, len: usize) -> Result<Vec<u8>, SaveError>;
}

/// Block reader over a [`BlockMemory`].
#[derive(Clone, Debug)]
pub struct LiveSnapshot<M> {
    memory: M,
}

impl<M: BlockMemory> LiveSnapshot<M> {
    pub fn new(memory: M) -> Self {
        Self { memory }
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    fn key_at(&self, offset: usize) -> Result<u32, SaveError> {
        let raw = self.memory.read_directory(offset, 4)?;
        let bytes: [u8; 4] = raw.as_slice().try_into().map_err(|_| SaveError::MemoryRead {
            address: offset as u64,
            len: 4,
        })?;
        Ok(u32::from_le_bytes(bytes))
    }

    /// Resolve the directory offset holding `key`.
    ///
    /// Checks the hint first. On mismatch, scans away from the hint in
    /// 0x20-byte steps, toward higher offsets when the expected key is greater
    /// than the one found (directories are sorted by key), for up to 0x1000
    /// bytes.
    pub fn locate(&self, key: BlockKey) -> Result<usize, SaveError> {
        let not_found = SaveError::BlockNotFound {
            key: key.key,
            hint: key.hint,
        };
        let Some(hint) = key.hint else {
            return Err(not_found);
        };
        let found = self.key_at(hint)?;
        if found == key.key {
            return Ok(hint);
        }
        let upward = key.key > found;
        tracing::warn!(
            hint = format_args!("{hint:#x}"),
            expected = format_args!("{:#010x}", key.key),
            found = format_args!("{found:#010x}"),
            direction = if upward { "up" } else { "down" },
            "save block hint mismatch, scanning"
        );
        for step in 0..SCAN_WINDOW / ENTRY_STRIDE {
            let delta = step * ENTRY_STRIDE;
            let offset = if upward {
                hint + delta
            } else {
                match hint.checked_sub(delta) {
                    Some(offset) => offset,
                    None => break,
                }
            };
            if self.key_at(offset)? == key.key {
                tracing::info!(offset = format_args!("{offset:#x}"), "save block found");
                return Ok(offset);
            }
        }
        Err(not_found)
    }

    fn payload_address(&self, entry: usize) -> Result<u64, SaveError> {
        let at = entry + POINTER_OFFSET;
        let raw = self.memory.read_directory(at, 8)?;
        let bytes: [u8; 8] = raw
            .as_slice()
            .try_into()
            .map_err(|_| SaveError::MemoryRead {
                address: at as u64,
                len: 8,
            })?;
        Ok(u64::from_le_bytes(bytes))
    }
}

impl<M: BlockMemory> BlockSource for LiveSnapshot<M> {
    fn read_block(&self, key: BlockKey) -> Result<BlockValue, SaveError> {
        let entry = self.locate(key)?;
        let address = self.payload_address(entry)?;
        let head = self.memory.read_absolute(address, HEAD_LEN)?;
        let len = BlockValue::encoded_len(key.key, &head)?.ok_or(SaveError::Truncated {
            key: key.key,
            needed: HEAD_LEN,
            available: head.len(),
        })?;
        let bytes = self.memory.read_absolute(address, len)?;
        BlockValue::decode(key.key, &bytes)
    }
}

/// Snapshot held entirely in memory: a directory region plus a heap that
/// payload pointers index into.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemorySnapshot {
    directory: Vec<u8>,
    heap: Vec<u8>,
}

impl InMemorySnapshot {
    pub fn new(directory: Vec<u8>, heap: Vec<u8>) -> Self {
        Self { directory, heap }
    }

    /// Directory of `len` zero bytes and an empty heap.
    pub fn with_directory_len(len: usize) -> Self {
        Self::new(vec![0; len], Vec::new())
    }

    /// Write a directory entry at `offset` whose payload is `encoded`.
    ///
    /// Grows the directory if needed.
    pub fn insert(&mut self, offset: usize, key: u32, encoded: &[u8]) {
        let end = offset + ENTRY_STRIDE;
        if self.directory.len() < end {
            self.directory.resize(end, 0);
        }
        let address = self.heap.len() as u64;
        self.heap.extend_from_slice(encoded);
        // pad so a head read never runs off the end
        self.heap.extend_from_slice(&[0; HEAD_LEN]);
        self.directory[offset..offset + 4].copy_from_slice(&key.to_le_bytes());
        self.directory[offset + POINTER_OFFSET..offset + POINTER_OFFSET + 8]
            .copy_from_slice(&address.to_le_bytes());
    }
}

impl BlockMemory for InMemorySnapshot {
    fn read_directory(&self, offset: usize, len: usize) -> Result<Vec<u8>, SaveError> {
        offset
            .checked_add(len)
            .and_then(|end| self.directory.get(offset..end))
            .map(<[u8]>::to_vec)
            .ok_or(SaveError::MemoryRead {
                address: offset as u64,
                len,
            })
    }

    fn read_absolute(&self, address: u64, len: usize) -> Result<Vec<u8>, SaveError> {
        usize::try_from(address)
            .ok()
            .and_then(|start| Some(start..start.checked_add(len)?))
            .and_then(|range| self.heap.get(range))
            .map(<[u8]>::to_vec)
            .ok_or(SaveError::MemoryRead { address, len })
    }
}

impl<M: BlockMemory + ?Sized> BlockMemory for &M {
    fn read_directory(&self, offset: usize, len: usize) -> Result<Vec<u8>, SaveError> {
        (**self).read_directory(offset, len)
    }

    fn read_absolute(&self, address: u64, len: usize) -> Result<Vec<u8>, SaveError> {
        (**self).read_absolute(address, len)
    }
}
