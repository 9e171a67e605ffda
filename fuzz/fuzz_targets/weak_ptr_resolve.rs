#![no_main]
use libfuzzer_sys::fuzz_target;
use memscope::{Address, ClassNode, InspectorConfig, Node, PointerWidth, ProcessSnapshot, Renderer, WeakPtrNode};

// The input is mapped at 0x1000 and is also the root structure, so every
// pointer chain it encodes stays inside the fuzzed image or hits unmapped memory.
fuzz_target!(|data: &[u8]| {
    let mut process = ProcessSnapshot::new(PointerWidth::Bits64);
    process.map_region(Address::new(0x1000), data.to_vec());

    let config = InspectorConfig::default();
    let mut weak = WeakPtrNode::new("p", 0, &config.memory);
    weak.header_mut().levels_open.set_all(true);
    let mut root = ClassNode::new("Root");
    root.add_node(Box::new(weak));

    let mut renderer = Renderer::new(config);
    let size = renderer.render(&mut root, &process, Address::new(0x1000));
    assert!(size.height >= renderer.config().layout.font.height);
});
