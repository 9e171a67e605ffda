//! Generic walks over a node tree.
//!
//! Traversals decide how to treat a node from its `NodeCapabilities`, never
//! from its concrete type. Structural cycle detection only descends through
//! nodes that carry `CYCLE_CHECK`; nodes that reach their children through
//! remote memory opt out and are skipped.

use tracing::warn;

use crate::nodes::{Node, NodeCapabilities};

/// Visit every node depth-first, including nodes behind references.
pub fn visit<'a, F>(root: &'a dyn Node, f: &mut F)
where
    F: FnMut(&'a dyn Node, usize),
{
    fn walk<'a, F>(node: &'a dyn Node, depth: usize, f: &mut F)
    where
        F: FnMut(&'a dyn Node, usize),
    {
        f(node, depth);
        for child in node.children() {
            walk(child, depth + 1, f);
        }
    }
    walk(root, 0, f);
}

/// Find a structure that embeds itself.
///
/// Returns the chain of structure names from the outermost to the repeated
/// one, e.g. `["A", "B", "A"]`, or `None` if no embedding cycle exists.
pub fn find_cycle(root: &dyn Node) -> Option<Vec<String>> {
    fn walk(node: &dyn Node, path: &mut Vec<String>) -> Option<Vec<String>> {
        let pushed = match node.class_name() {
            Some(name) => {
                if path.iter().any(|p| p == name) {
                    let mut cycle = path.clone();
                    cycle.push(name.to_string());
                    return Some(cycle);
                }
                path.push(name.to_string());
                true
            }
            None => false,
        };

        if node.capabilities().contains(NodeCapabilities::CYCLE_CHECK) {
            for child in node.children() {
                if let Some(cycle) = walk(child, path) {
                    return Some(cycle);
                }
            }
        }

        if pushed {
            path.pop();
        }
        None
    }

    let cycle = walk(root, &mut Vec::new());
    if let Some(chain) = &cycle {
        warn!(chain = %chain.join(" -> "), "structure embeds itself");
    }
    cycle
}
