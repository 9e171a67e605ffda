//! ProcessSnapshot: an in-memory image of a process address space.
//!
//! Regions are mapped explicitly; reads outside a mapped region fail with
//! `InvalidAddress`, reads of a protected region fail with `AccessDenied`,
//! and every read fails with `ProcessGone` after `detach`. Every read attempt
//! is recorded so callers can check exactly which remote reads a pass made.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::{MemoryError, RemoteMemory};
use crate::core::address::{Address, PointerWidth};

#[derive(Debug, Clone)]
struct Region {
    data: Vec<u8>,
    protected: bool,
}

/// One recorded read attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRecord {
    pub address: Address,
    pub len: usize,
}

/// Sparse, mutable process image implementing `RemoteMemory`.
#[derive(Debug, Clone)]
pub struct ProcessSnapshot {
    width: PointerWidth,
    regions: BTreeMap<u64, Region>,
    attached: bool,
    reads: RefCell<Vec<ReadRecord>>,
}

impl ProcessSnapshot {
    pub fn new(width: PointerWidth) -> Self {
        Self {
            width,
            regions: BTreeMap::new(),
            attached: true,
            reads: RefCell::new(Vec::new()),
        }
    }

    /// Pointer width of the imaged process.
    pub fn pointer_width(&self) -> PointerWidth {
        self.width
    }

    /// Map `data` at `base`. Mapping over an existing base replaces it.
    pub fn map_region(&mut self, base: Address, data: Vec<u8>) {
        self.regions.insert(
            base.value(),
            Region {
                data,
                protected: false,
            },
        );
    }

    /// Map a region of `len` bytes that exists but cannot be read.
    pub fn map_protected(&mut self, base: Address, len: usize) {
        self.regions.insert(
            base.value(),
            Region {
                data: vec![0; len],
                protected: true,
            },
        );
    }

    /// Remove the region starting at `base`.
    pub fn unmap(&mut self, base: Address) -> bool {
        self.regions.remove(&base.value()).is_some()
    }

    /// Simulate the process exiting.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Overwrite bytes inside a mapped, unprotected region.
    pub fn write_bytes(&mut self, address: Address, bytes: &[u8]) -> Result<(), MemoryError> {
        if !self.attached {
            return Err(MemoryError::ProcessGone);
        }
        let (base, region) = self
            .regions
            .range_mut(..=address.value())
            .next_back()
            .ok_or(MemoryError::InvalidAddress(address))?;
        if region.protected {
            return Err(MemoryError::AccessDenied(address));
        }
        let start = (address.value() - *base) as usize;
        let end = start
            .checked_add(bytes.len())
            .filter(|end| *end <= region.data.len())
            .ok_or(MemoryError::InvalidAddress(address))?;
        region.data[start..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Store a pointer of the snapshot's width at `address`.
    pub fn write_pointer(&mut self, address: Address, value: Address) -> Result<(), MemoryError> {
        let bytes = self.width.encode(value);
        self.write_bytes(address, &bytes)
    }

    /// All read attempts since creation or the last `clear_reads`.
    pub fn reads(&self) -> Vec<ReadRecord> {
        self.reads.borrow().clone()
    }

    pub fn read_count(&self) -> usize {
        self.reads.borrow().len()
    }

    pub fn clear_reads(&self) {
        self.reads.borrow_mut().clear();
    }
}

impl RemoteMemory for ProcessSnapshot {
    fn read_bytes(&self, address: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        self.reads.borrow_mut().push(ReadRecord { address, len });

        if !self.attached {
            return Err(MemoryError::ProcessGone);
        }
        if len == 0 {
            return Ok(Vec::new());
        }

        let (base, region) = self
            .regions
            .range(..=address.value())
            .next_back()
            .ok_or(MemoryError::InvalidAddress(address))?;
        let start = (address.value() - *base) as usize;
        let end = start.saturating_add(len);
        if start >= region.data.len() || end > region.data.len() {
            return Err(MemoryError::InvalidAddress(address));
        }
        if region.protected {
            return Err(MemoryError::AccessDenied(address));
        }

        Ok(region.data[start..end].to_vec())
    }
}
