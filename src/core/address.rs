//! Address types for remote memory inspection.
//!
//! This module provides the `Address` and `PointerWidth` types that every
//! read against the inspected process is expressed in.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{InspectError, Result};

/// A location in the address space of the inspected process.
///
/// Zero is the null address. Arithmetic is checked so that a wild pointer
/// read from the remote process can never wrap around silently.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Address(u64);

impl Address {
    /// The null address.
    pub const NULL: Address = Address(0);

    /// Create a new Address from a raw value.
    pub const fn new(value: u64) -> Self {
        Address(value)
    }

    /// The raw numeric value.
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Whether this is the null address.
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Add a byte offset, returning `None` on overflow.
    pub fn checked_add(self, offset: u64) -> Option<Self> {
        self.0.checked_add(offset).map(Address)
    }

    /// Subtract a byte offset, returning `None` on underflow.
    pub fn checked_sub(self, offset: u64) -> Option<Self> {
        self.0.checked_sub(offset).map(Address)
    }

    /// Offset of `self` from `base`, if `self` is not below it.
    pub fn offset_from(self, base: Address) -> Option<u64> {
        self.0.checked_sub(base.0)
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Address(value)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

/// Width of a pointer in the inspected process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerWidth {
    /// 4-byte pointers (32-bit process)
    Bits32,
    /// 8-byte pointers (64-bit process)
    Bits64,
}

impl PointerWidth {
    /// Pointer width of the host, used when nothing else is configured.
    pub const fn native() -> Self {
        if cfg!(target_pointer_width = "32") {
            PointerWidth::Bits32
        } else {
            PointerWidth::Bits64
        }
    }

    /// Build from a bit count (32 or 64).
    pub fn from_bits(bits: u8) -> Result<Self> {
        match bits {
            32 => Ok(PointerWidth::Bits32),
            64 => Ok(PointerWidth::Bits64),
            other => Err(InspectError::InvalidPointerWidth(other)),
        }
    }

    /// Size of a pointer in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            PointerWidth::Bits32 => 4,
            PointerWidth::Bits64 => 8,
        }
    }

    /// Size of a pointer in bits.
    pub const fn bits(self) -> u8 {
        match self {
            PointerWidth::Bits32 => 32,
            PointerWidth::Bits64 => 64,
        }
    }

    /// Decode a little-endian pointer from the start of `bytes`.
    ///
    /// Returns `None` if fewer than `self.bytes()` bytes are available.
    pub fn decode(self, bytes: &[u8]) -> Option<Address> {
        match self {
            PointerWidth::Bits32 => {
                let b: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
                Some(Address(u32::from_le_bytes(b) as u64))
            }
            PointerWidth::Bits64 => {
                let b: [u8; 8] = bytes.get(..8)?.try_into().ok()?;
                Some(Address(u64::from_le_bytes(b)))
            }
        }
    }

    /// Encode `address` as a little-endian pointer of this width.
    ///
    /// On 32-bit the value is truncated to the low 32 bits.
    pub fn encode(self, address: Address) -> Vec<u8> {
        match self {
            PointerWidth::Bits32 => (address.0 as u32).to_le_bytes().to_vec(),
            PointerWidth::Bits64 => address.0.to_le_bytes().to_vec(),
        }
    }
}

impl Default for PointerWidth {
    fn default() -> Self {
        Self::native()
    }
}

impl fmt::Display for PointerWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}
