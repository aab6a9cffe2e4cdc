//! Post-order traversal over every structural child.

use crate::ast::{BoundValue, Node, Value};

/// Calls a callback on every node, children before their parent.
///
/// Children are visited in the order [`Node::edges`] lists them.
pub struct DepthFirst<F: FnMut(&Node)> {
    callback: F,
}

impl<F: FnMut(&Node)> DepthFirst<F> {
    pub fn new(callback: F) -> Self {
        Self { callback }
    }

    pub fn accept(&mut self, node: &Node) {
        for (_, child) in node.edges() {
            self.accept(child);
        }
        (self.callback)(node);
    }

    pub fn into_inner(self) -> F {
        self.callback
    }
}

/// Every bind value in the tree, in traversal order.
pub fn collect_binds(node: &Node) -> Vec<Value> {
    let mut binds = Vec::new();
    DepthFirst::new(|n: &Node| match n {
        Node::BindParam(b) => binds.push(b.value.clone()),
        Node::HomogeneousIn(h) => binds.extend(h.values.iter().cloned()),
        Node::BoundSqlLiteral(b) => {
            for value in b.values() {
                bound_values(value, &mut binds);
            }
        }
        _ => {}
    })
    .accept(node);
    binds
}

fn bound_values(value: &BoundValue, binds: &mut Vec<Value>) {
    match value {
        BoundValue::Value(v) => binds.push(v.clone()),
        BoundValue::List(items) => {
            for item in items {
                bound_values(item, binds);
            }
        }
        BoundValue::Node(_) => {}
    }
}
