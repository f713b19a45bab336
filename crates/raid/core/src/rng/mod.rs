//! Deterministic generators replicating the game's own PRNGs.
//!
//! Two generators exist and they never mix:
//!
//! - [`StreamGen64`] drives every raid roll (difficulty, encounter slot,
//!   tera type, PID, IVs, ...). It is seeded from a 32-bit slot seed.
//! - [`ByteStreamCipher32`] is the keystream behind encrypted save blocks.
//!
//! # Determinism
//!
//! Given the same seed (and for `StreamGen64`, the same [`GeneratorFormula`]),
//! both produce the same sequence on every platform. The reference vectors in
//! the test suite pin the exact output.
mod xoroshiro;
mod xorshift;

pub use xoroshiro::{GeneratorFormula, RandomSource, StreamGen64};
pub use xorshift::ByteStreamCipher32;
