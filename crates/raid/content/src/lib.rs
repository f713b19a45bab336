//! Static data and buffer storage for the raid engine.
//!
//! This crate loads what the engine cannot derive from a snapshot:
//! - Species metadata (data-driven via RON)
//! - Engine configuration (data-driven via TOML)
//! - Raw table buffers dumped from a live session, reloaded verbatim
//!
//! Loaded values are handed to `raid-core` by reference and never mutated.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{BufferCache, ConfigLoader, ContentFactory, LoadResult, SpeciesLoader};
