//! Error types for the memscope inspector core.
//!
//! `InspectError` covers the fallible public APIs (configuration, setup).
//! `ResolveFault` describes why a pointer resolution pass stopped early; it is
//! never propagated out of a draw or measure call, only logged and reported.

use thiserror::Error;

use crate::core::address::Address;
use crate::memory::MemoryError;

/// Main error type for memscope operations.
#[derive(Debug, Error)]
pub enum InspectError {
    /// Pointer width other than 32 or 64 bits
    #[error("Invalid pointer width: {0} bits")]
    InvalidPointerWidth(u8),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Remote memory access failed
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for memscope operations
pub type Result<T> = std::result::Result<T, InspectError>;

/// Which read of a resolution chain a fault happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hop {
    /// Pointer slot read from the local memory window
    First,
    /// Dereference of the first hop in the remote process
    Second,
    /// Copy of the target window into the mirror buffer
    Mirror,
}

impl std::fmt::Display for Hop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hop::First => write!(f, "first hop"),
            Hop::Second => write!(f, "second hop"),
            Hop::Mirror => write!(f, "mirror fill"),
        }
    }
}

/// Reasons a resolution pass degrades to "no target".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveFault {
    /// A hop produced the null address
    #[error("null pointer on {hop}")]
    NullPointer { hop: Hop },

    /// A read of the remote process failed
    #[error("remote read failed on {hop} at {address}: {source}")]
    RemoteReadFailure {
        hop: Hop,
        address: Address,
        #[source]
        source: MemoryError,
    },

    /// Mirror size diverged from the inner node's declared size; corrected by resizing
    #[error("mirror size {actual} does not match declared size {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}
