//! Expansion state and the draw-free measure pass.

use crate::common::*;
use memscope::{Address, ClassNode, Node, Renderer, Surface, ViewInfo, WeakPtrNode};

#[test]
fn measure_never_reads_remote_memory() {
    let config = config();
    let p = process();
    let mem = parent_window(SLOT);
    let view = ViewInfo::new(&config, &p, &mem, Address::new(PARENT));
    let mut node = weak(64);
    node.toggle_level(0);

    let height = node.calculate_drawn_height(&view);
    assert_eq!(p.read_count(), 0);
    assert_eq!(height, line_height() * 10);

    let size = node.draw(&view, &mut Surface::new(), 0, 0);
    assert!(p.read_count() > 0);
    assert_eq!(size.height, height);

    p.clear_reads();
    node.calculate_drawn_height(&view);
    assert_eq!(p.read_count(), 0);
}

#[test]
fn expansion_is_tracked_per_level() {
    let config = config();
    let p = process();
    let mem = parent_window(SLOT);
    let view = ViewInfo::new(&config, &p, &mem, Address::new(PARENT));
    let deeper = view.nested();
    let line = line_height();

    let mut node = weak(64);
    node.header_mut().levels_open.set(0, false);
    node.header_mut().levels_open.set(1, true);

    let collapsed = node.draw(&view, &mut Surface::new(), 0, 0);
    assert_eq!(collapsed.height, line);
    assert_eq!(node.calculate_drawn_height(&view), line);
    assert_eq!(p.read_count(), 0);

    let expanded = node.draw(&deeper, &mut Surface::new(), 0, 0);
    assert!(expanded.height > line);
    assert_eq!(node.calculate_drawn_height(&deeper), expanded.height);
    assert_eq!(p.read_count(), 2);

    assert!(!node.is_expanded_at(0));
    assert!(node.is_expanded_at(1));
    assert!(!node.is_expanded_at(2));
}

#[test]
fn expanded_subtree_is_drawn_below_and_indented() {
    let config = config();
    let p = process();
    let mem = parent_window(SLOT);
    let view = ViewInfo::new(&config, &p, &mem, Address::new(PARENT));
    let mut node = weak(8);
    node.toggle_level(0);

    let mut surface = Surface::new();
    let size = node.draw(&view, &mut surface, 0, 0);

    let line = line_height();
    let indent = config.layout.icon_width * 2;
    let class_header = surface
        .hot_spots()
        .iter()
        .find(|h| h.node == node.inner().id() && h.kind == memscope::view::HotSpotKind::OpenClose)
        .unwrap();
    assert_eq!(class_header.rect.x, indent);
    assert_eq!(class_header.rect.y, line);
    assert_eq!(class_header.address, Address::new(OBJECT));
    assert_eq!(size.height, line * 3);
}

#[test]
fn collapsing_inner_structure_shrinks_footprint() {
    let config = config();
    let p = process();
    let mem = parent_window(SLOT);
    let view = ViewInfo::new(&config, &p, &mem, Address::new(PARENT));
    let mut node = weak(64);
    node.toggle_level(0);
    node.inner_mut().toggle_level(0);

    let size = node.draw(&view, &mut Surface::new(), 0, 0);
    assert_eq!(size.height, line_height() * 2);
    assert_eq!(node.calculate_drawn_height(&view), size.height);
}

#[test]
fn nested_weak_pointers_resolve_independently() {
    // OBJECT holds a second weak slot at offset 0 pointing back at SLOT,
    // so the inner structure's own weak pointer resolves to OBJECT again.
    let mut p = process();
    p.write_pointer(Address::new(OBJECT), Address::new(SLOT))
        .unwrap();

    let mut inner = ClassNode::new("Entity");
    let mut back = WeakPtrNode::with_inner(
        "next",
        0,
        memscope::PointerWidth::Bits64,
        Box::new({
            let mut c = ClassNode::new("Entity");
            c.add_bytes(8);
            c
        }),
    );
    back.header_mut().levels_open.set(2, true);
    inner.add_node(Box::new(back));
    inner.add_bytes(8);

    let mut root = ClassNode::new("Parent");
    root.add_bytes(8);
    let mut owner = WeakPtrNode::with_inner("owner", 0, memscope::PointerWidth::Bits64, Box::new(inner));
    owner.header_mut().levels_open.set(1, true);
    root.add_node(Box::new(owner));

    let mut renderer = Renderer::new(config());
    let size = renderer.render(&mut root, &p, Address::new(PARENT));

    // Parent header, pad, owner, Entity header, next, Entity header, pad, pad
    assert_eq!(size.height, line_height() * 8);
    assert_eq!(renderer.measure(&root), size.height);
    assert!(memscope::traversal::find_cycle(&root).is_none());

    let entity_headers: Vec<Address> = renderer
        .surface()
        .hot_spots()
        .iter()
        .filter(|h| h.kind == memscope::view::HotSpotKind::EditName)
        .map(|h| h.address)
        .collect();
    assert!(entity_headers.contains(&Address::new(OBJECT)));
}

#[test]
fn max_level_stops_expansion() {
    let mut config = config();
    config.layout.max_level = 1;
    let p = process();
    let mem = parent_window(SLOT);
    let view = ViewInfo::new(&config, &p, &mem, Address::new(PARENT));
    let mut node = weak(64);
    node.header_mut().levels_open.set_all(true);

    let deeper = view.nested();
    assert_eq!(node.draw(&deeper, &mut Surface::new(), 0, 0).height, line_height());
    assert_eq!(p.read_count(), 0);
}
