//! MemoryBuffer: a local mirror of a window of remote memory.
//!
//! A buffer has a declared size, a base address and a validity flag. After
//! `update` the contents are either an exact copy of `size` bytes at the base
//! address, or all zeroes with the buffer marked invalid. Reads at an offset
//! never fail: anything outside the window, or any read of an invalid
//! buffer, yields zeroes.

use tracing::trace;

use super::{MemoryError, RemoteMemory};
use crate::core::address::{Address, PointerWidth};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryBuffer {
    data: Vec<u8>,
    base: Address,
    valid: bool,
}

impl MemoryBuffer {
    /// An empty, invalid buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// A zero-filled, invalid buffer of `size` bytes.
    pub fn with_size(size: usize) -> Self {
        Self {
            data: vec![0; size],
            base: Address::NULL,
            valid: false,
        }
    }

    /// A valid buffer holding `data` as the contents of memory at `base`.
    pub fn from_bytes(base: Address, data: Vec<u8>) -> Self {
        Self {
            data,
            base,
            valid: true,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Resize the window. New bytes are zero; existing bytes are kept.
    pub fn set_size(&mut self, size: usize) {
        self.data.resize(size, 0);
    }

    /// Remote address the buffer currently mirrors.
    pub fn base(&self) -> Address {
        self.base
    }

    /// Whether the last update populated the buffer from remote memory.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Re-populate the window from `address` in `process`.
    ///
    /// A null address or a failed read leaves the buffer zero-filled and
    /// invalid. The size is never changed by an update.
    pub fn update(
        &mut self,
        process: &dyn RemoteMemory,
        address: Address,
    ) -> Result<(), MemoryError> {
        self.base = address;

        if address.is_null() {
            self.invalidate();
            return Ok(());
        }

        match process.read_bytes(address, self.data.len()) {
            Ok(bytes) if bytes.len() == self.data.len() => {
                self.data.copy_from_slice(&bytes);
                self.valid = true;
                trace!(base = %address, size = self.data.len(), "mirror updated");
                Ok(())
            }
            Ok(_) => {
                self.invalidate();
                Err(MemoryError::InvalidAddress(address))
            }
            Err(e) => {
                self.invalidate();
                Err(e)
            }
        }
    }

    /// Zero the contents and mark the buffer invalid.
    pub fn invalidate(&mut self) {
        self.data.fill(0);
        self.valid = false;
    }

    /// Bytes `offset..offset + len` of the window, if the buffer is valid and
    /// the range lies inside it.
    pub fn read_bytes(&self, offset: usize, len: usize) -> Option<&[u8]> {
        if !self.valid {
            return None;
        }
        let end = offset.checked_add(len)?;
        self.data.get(offset..end)
    }

    /// Like `read_bytes`, but returns `len` zero bytes when unavailable.
    pub fn read_bytes_or_zero(&self, offset: usize, len: usize) -> Vec<u8> {
        self.read_bytes(offset, len)
            .map(<[u8]>::to_vec)
            .unwrap_or_else(|| vec![0; len])
    }

    pub fn read_u8(&self, offset: usize) -> u8 {
        self.read_bytes(offset, 1).map(|b| b[0]).unwrap_or(0)
    }

    pub fn read_u32(&self, offset: usize) -> u32 {
        self.read_bytes(offset, 4)
            .and_then(|b| b.try_into().ok())
            .map(u32::from_le_bytes)
            .unwrap_or(0)
    }

    pub fn read_u64(&self, offset: usize) -> u64 {
        self.read_bytes(offset, 8)
            .and_then(|b| b.try_into().ok())
            .map(u64::from_le_bytes)
            .unwrap_or(0)
    }

    /// Pointer stored at `offset` within the window; null when unavailable.
    pub fn read_pointer(&self, offset: usize, width: PointerWidth) -> Address {
        self.read_bytes(offset, width.bytes())
            .and_then(|b| width.decode(b))
            .unwrap_or(Address::NULL)
    }
}
