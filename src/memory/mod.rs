//! Remote memory access.
//!
//! `RemoteMemory` is the boundary to the inspected process: everything the
//! inspector knows about the target comes through `read_bytes`. Reads are
//! synchronous and fallible. `MemoryBuffer` snapshots a fixed-size window of
//! the target so a subtree can be drawn without further remote reads, and
//! `ProcessSnapshot` is an in-memory process image for offline use and tests.

pub mod buffer;
pub mod snapshot;

pub use buffer::MemoryBuffer;
pub use snapshot::ProcessSnapshot;

use crate::core::address::{Address, PointerWidth};

/// Errors that can occur during remote memory reads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemoryError {
    #[error("invalid address {0}")]
    InvalidAddress(Address),
    #[error("access denied at {0}")]
    AccessDenied(Address),
    #[error("process is no longer attached")]
    ProcessGone,
}

/// Read access to the memory of an external process.
pub trait RemoteMemory {
    /// Read `len` bytes starting at `address`.
    ///
    /// Implementations return either exactly `len` bytes or an error; a
    /// partially readable range is an error.
    fn read_bytes(&self, address: Address, len: usize) -> Result<Vec<u8>, MemoryError>;

    /// Convenience: read one pointer of `width` at `address`.
    fn read_pointer(&self, address: Address, width: PointerWidth) -> Result<Address, MemoryError> {
        let bytes = self.read_bytes(address, width.bytes())?;
        width
            .decode(&bytes)
            .ok_or(MemoryError::InvalidAddress(address))
    }
}

impl<T: RemoteMemory + ?Sized> RemoteMemory for &T {
    fn read_bytes(&self, address: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        (**self).read_bytes(address, len)
    }
}

impl<T: RemoteMemory + ?Sized> RemoteMemory for Box<T> {
    fn read_bytes(&self, address: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        (**self).read_bytes(address, len)
    }
}

/// A process handle that is not attached to anything. Every read fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl RemoteMemory for Detached {
    fn read_bytes(&self, _address: Address, _len: usize) -> Result<Vec<u8>, MemoryError> {
        Err(MemoryError::ProcessGone)
    }
}
