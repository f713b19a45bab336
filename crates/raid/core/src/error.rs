//! Common error infrastructure for raid-core.
//!
//! This module provides the shared severity classification and the umbrella
//! [`RaidError`] type. Domain-specific errors (e.g., [`DecodeError`],
//! [`SaveError`], [`DeriveError`]) are defined in their respective modules
//! alongside the operations that raise them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each stage has its own error type with specific variants
//! - **Rich Context**: Errors carry offsets, keys and slot indices for debugging
//! - **No Silent Defaults**: Only an absent table field falls back to a default;
//!   every other failure surfaces to the caller, who owns the retry decision

use crate::derive::DeriveError;
use crate::save::SaveError;
use crate::table::DecodeError;

/// Severity level of an error, used for categorization and logging priority.
///
/// - **Validation**: Input refers to something the static data does not know
/// - **Internal**: Unexpected state inconsistency inside the engine
/// - **Fatal**: The buffers handed in cannot produce a result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation error - input references unknown static data.
    ///
    /// Examples: species/form missing from the metadata table
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - buffers are malformed or an invariant is violated.
    ///
    /// Examples: truncated table, zero total encounter rate
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the derivation call cannot produce a result.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all raid-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Error codes are stable upper-snake identifiers
pub trait RaidFault: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Umbrella error for callers that drive several stages at once.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RaidError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    Derive(#[from] DeriveError),
}

impl RaidFault for RaidError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Decode(e) => e.severity(),
            Self::Save(e) => e.severity(),
            Self::Derive(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Decode(e) => e.error_code(),
            Self::Save(e) => e.error_code(),
            Self::Derive(e) => e.error_code(),
        }
    }
}
