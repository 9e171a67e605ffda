//! Pointer chain resolution and mirroring through the public API.

use crate::common::*;
use memscope::error::Hop;
use memscope::memory::snapshot::ReadRecord;
use memscope::{Address, MemoryError, Node, ResolveFault, Surface, ViewInfo};

#[test]
fn null_first_hop_never_reads_remote() {
    let config = config();
    let p = process();
    let mem = parent_window(0);
    let view = ViewInfo::new(&config, &p, &mem, Address::new(PARENT));

    for expanded in [false, true] {
        let mut node = weak(64);
        node.header_mut().levels_open.set(0, expanded);

        let mut surface = Surface::new();
        let size = node.draw(&view, &mut surface, 0, 0);
        assert_eq!(size.height, line_height());
        assert_eq!(node.calculate_drawn_height(&view), size.height);
        assert_eq!(p.read_count(), 0);
    }
}

#[test]
fn failed_second_hop_degrades_like_null() {
    let config = config();
    let line = line_height();

    let null_size = {
        let p = process();
        let mem = parent_window(0);
        let view = ViewInfo::new(&config, &p, &mem, Address::new(PARENT));
        let mut node = weak(64);
        node.toggle_level(0);
        node.draw(&view, &mut Surface::new(), 0, 0)
    };

    // Slot points into unmapped memory, into a protected page, and into a
    // process that has gone away
    let mut unmapped = process();
    unmapped.unmap(Address::new(SLOT));
    let mut protected = process();
    protected.map_protected(Address::new(SLOT), 8);
    let mut gone = process();
    gone.detach();

    let expected = [
        MemoryError::InvalidAddress(Address::new(SLOT)),
        MemoryError::AccessDenied(Address::new(SLOT)),
        MemoryError::ProcessGone,
    ];
    for (p, error) in [unmapped, protected, gone].iter().zip(expected) {
        let mem = parent_window(SLOT);
        let view = ViewInfo::new(&config, p, &mem, Address::new(PARENT));
        let mut node = weak(64);
        node.toggle_level(0);

        let mut surface = Surface::new();
        let size = node.draw(&view, &mut surface, 0, 0);
        assert_eq!(size, null_size);
        assert_eq!(size.height, line);

        let resolution = node.last_resolution().unwrap();
        assert_eq!(resolution.final_address(), Address::NULL);
        assert_eq!(
            resolution.fault,
            Some(ResolveFault::RemoteReadFailure {
                hop: Hop::Second,
                address: Address::new(SLOT),
                source: error,
            })
        );
        assert!(!node.mirror().is_valid());
        assert_eq!(node.mirror().size(), 64);

        p.clear_reads();
        assert_eq!(node.calculate_drawn_height(&view), size.height);
        assert_eq!(p.read_count(), 0);
    }
}

#[test]
fn final_address_is_second_hop_minus_pointer_width() {
    let config = config();
    let mut p = process();
    let mem = parent_window(SLOT);

    for second in [0x2000u64, 0x30_0008, 0x7fff_0000_0010] {
        p.write_pointer(Address::new(SLOT), Address::new(second))
            .unwrap();
        let view = ViewInfo::new(&config, &p, &mem, Address::new(PARENT));
        let resolution = weak(8).resolve(&view);
        assert_eq!(resolution.second_hop, Some(Address::new(second)));
        assert_eq!(resolution.final_address(), Address::new(second - 8));
    }

    p.write_pointer(Address::new(SLOT), Address::NULL).unwrap();
    let view = ViewInfo::new(&config, &p, &mem, Address::new(PARENT));
    let resolution = weak(8).resolve(&view);
    assert_eq!(resolution.target, None);
    assert_eq!(
        resolution.fault,
        Some(ResolveFault::NullPointer { hop: Hop::Second })
    );
}

#[test]
fn mirror_matches_declared_size() {
    let config = config();
    let p = process();
    let mem = parent_window(SLOT);
    let view = ViewInfo::new(&config, &p, &mem, Address::new(PARENT));

    for size in [0usize, 1, 7, 8, 33, 64] {
        let mut node = weak(size);
        node.toggle_level(0);
        node.draw(&view, &mut Surface::new(), 0, 0);
        assert_eq!(node.inner().memory_size(), size);
        assert_eq!(node.mirror().size(), size);
        assert!(node.mirror().is_valid());
        assert_eq!(node.mirror().as_bytes(), &(0u8..size as u8).collect::<Vec<_>>()[..]);
    }
}

#[test]
fn reads_happen_in_chain_order() {
    let config = config();
    let p = process();
    let mem = parent_window(SLOT);
    let view = ViewInfo::new(&config, &p, &mem, Address::new(PARENT));
    let mut node = weak(64);
    node.toggle_level(0);

    node.draw(&view, &mut Surface::new(), 0, 0);
    assert_eq!(
        p.reads(),
        vec![
            ReadRecord {
                address: Address::new(SLOT),
                len: 8
            },
            ReadRecord {
                address: Address::new(OBJECT),
                len: 64
            },
        ]
    );
}

#[test]
fn repeated_passes_mirror_identical_bytes() {
    let config = config();
    let p = process();
    let mem = parent_window(SLOT);
    let view = ViewInfo::new(&config, &p, &mem, Address::new(PARENT));
    let mut node = weak(64);
    node.toggle_level(0);

    node.draw(&view, &mut Surface::new(), 0, 0);
    let first = node.mirror().clone();
    node.draw(&view, &mut Surface::new(), 0, 0);
    assert_eq!(node.mirror(), &first);
    // Nothing is cached between passes
    assert_eq!(p.read_count(), 4);
}

#[test]
fn each_pass_sees_current_process_state() {
    let config = config();
    let mut p = process();
    let mem = parent_window(SLOT);
    let mut node = weak(16);
    node.toggle_level(0);

    {
        let view = ViewInfo::new(&config, &p, &mem, Address::new(PARENT));
        node.draw(&view, &mut Surface::new(), 0, 0);
    }
    assert_eq!(node.mirror().read_u8(0), 0);

    p.write_bytes(Address::new(OBJECT), &[0xaa]).unwrap();
    {
        let view = ViewInfo::new(&config, &p, &mem, Address::new(PARENT));
        node.draw(&view, &mut Surface::new(), 0, 0);
    }
    assert_eq!(node.mirror().read_u8(0), 0xaa);

    // Target disappears: the mirror is zeroed and marked invalid
    p.unmap(Address::new(OBJECT));
    let view = ViewInfo::new(&config, &p, &mem, Address::new(PARENT));
    let size = node.draw(&view, &mut Surface::new(), 0, 0);
    assert_eq!(size.height, line_height());
    assert!(!node.mirror().is_valid());
    assert_eq!(node.mirror().read_u8(0), 0);
    assert_eq!(
        node.last_resolution().unwrap().fault,
        Some(ResolveFault::RemoteReadFailure {
            hop: Hop::Mirror,
            address: Address::new(OBJECT),
            source: MemoryError::InvalidAddress(Address::new(OBJECT)),
        })
    );
}
