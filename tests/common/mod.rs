//! Common test fixtures.
//!
//! Builds a small process image with a weak pointer chain:
//! the parent structure at `PARENT` holds `SLOT` at offset 8, `SLOT` holds
//! `OBJECT + 8`, and `OBJECT` holds the bytes `0..64`.

#![allow(dead_code)]

use memscope::config::MemoryConfig;
use memscope::{Address, InspectorConfig, MemoryBuffer, PointerWidth, ProcessSnapshot, WeakPtrNode};

pub const PARENT: u64 = 0x10_0000;
pub const SLOT: u64 = 0x20_0000;
pub const OBJECT: u64 = 0x30_0000;
pub const WEAK_OFFSET: usize = 8;

pub fn config() -> InspectorConfig {
    let mut config = InspectorConfig::default();
    config.memory.pointer_width = PointerWidth::Bits64;
    config
}

pub fn line_height() -> i32 {
    config().layout.font.height
}

/// Process image holding the full chain.
pub fn process() -> ProcessSnapshot {
    let mut p = ProcessSnapshot::new(PointerWidth::Bits64);
    let mut parent = vec![0u8; 16];
    parent[WEAK_OFFSET..WEAK_OFFSET + 8].copy_from_slice(&SLOT.to_le_bytes());
    p.map_region(Address::new(PARENT), parent);
    p.map_region(Address::new(SLOT), vec![0; 8]);
    p.write_pointer(Address::new(SLOT), Address::new(OBJECT + 8))
        .unwrap();
    p.map_region(Address::new(OBJECT), (0u8..64).collect());
    p
}

/// Local window over the parent structure with `first_hop` in the weak slot.
pub fn parent_window(first_hop: u64) -> MemoryBuffer {
    let mut bytes = vec![0u8; 16];
    bytes[WEAK_OFFSET..WEAK_OFFSET + 8].copy_from_slice(&first_hop.to_le_bytes());
    MemoryBuffer::from_bytes(Address::new(PARENT), bytes)
}

/// Weak pointer at `WEAK_OFFSET` targeting a padded structure of `inner_size` bytes.
pub fn weak(inner_size: usize) -> WeakPtrNode {
    let memory = MemoryConfig {
        pointer_width: PointerWidth::Bits64,
        default_inner_size: inner_size,
    };
    WeakPtrNode::new("owner", WEAK_OFFSET, &memory)
}
