//! Graphviz export for debugging trees.
//!
//! Nodes are identified by address, so a subtree shared through the same
//! `Arc` is drawn once with several incoming edges.

use std::collections::HashMap;

use crate::ast::Node;

struct DotNode {
    name: String,
    fields: Vec<String>,
}

struct DotEdge {
    from: usize,
    to: usize,
    label: &'static str,
}

/// Accumulates the graph of one or more trees.
#[derive(Default)]
pub struct Dot {
    nodes: Vec<DotNode>,
    edges: Vec<DotEdge>,
    seen: HashMap<usize, usize>,
}

impl Dot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tree and return the id of its root.
    ///
    /// Sharing is detected within one tree only; addresses from an earlier
    /// tree may have been freed and reused.
    pub fn accept(&mut self, node: &Node) -> usize {
        self.seen.clear();
        self.walk(node)
    }

    fn walk(&mut self, node: &Node) -> usize {
        let address = node as *const Node as usize;
        if let Some(&id) = self.seen.get(&address) {
            return id;
        }

        let id = self.nodes.len();
        self.seen.insert(address, id);
        self.nodes.push(DotNode {
            name: node.kind().to_string(),
            fields: node.fields(),
        });
        for (label, child) in node.edges() {
            let to = self.walk(child);
            self.edges.push(DotEdge { from: id, to, label });
        }
        id
    }

    pub fn render(&self) -> String {
        let mut dot = String::from("digraph \"relsql\" {\nnode [width=0.375,height=0.25,shape=record];\n");
        for (id, node) in self.nodes.iter().enumerate() {
            let mut label = format!("<f0>{}", node.name);
            for (i, field) in node.fields.iter().enumerate() {
                label.push_str(&format!("|<f{}>{}", i + 1, quote(field)));
            }
            dot.push_str(&format!("{} [label=\"{}\"];\n", id, label));
        }
        for edge in &self.edges {
            dot.push_str(&format!(
                "{} -> {} [label=\"{}\"];\n",
                edge.from, edge.to, edge.label
            ));
        }
        dot.push('}');
        dot
    }
}

fn quote(field: &str) -> String {
    field.replace('"', "\\\"")
}

/// The graph of a single tree.
pub fn to_dot(node: &Node) -> String {
    let mut dot = Dot::new();
    dot.accept(node);
    dot.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[test]
    fn test_simple_graph() {
        let tree = eq(column("id"), quoted("a\"b"));
        assert_eq!(
            to_dot(&tree),
            "digraph \"relsql\" {\n\
             node [width=0.375,height=0.25,shape=record];\n\
             0 [label=\"<f0>Equality\"];\n\
             1 [label=\"<f0>UnqualifiedColumn|<f1>id\"];\n\
             2 [label=\"<f0>Quoted|<f1>a\\\"b\"];\n\
             0 -> 1 [label=\"left\"];\n\
             0 -> 2 [label=\"right\"];\n\
             }"
        );
    }

    #[test]
    fn test_shared_subtree_is_drawn_once() {
        let shared: NodeRef = Arc::new(Table::new("users").attr("id"));
        let tree = and([eq(shared.clone(), bind(1)), not_eq(shared, bind(2))]);

        let mut dot = Dot::new();
        dot.accept(&tree);
        let attributes = dot.nodes.iter().filter(|n| n.name == "Attribute").count();
        assert_eq!(attributes, 1);
        let into_attribute = dot
            .edges
            .iter()
            .filter(|e| dot.nodes[e.to].name == "Attribute")
            .count();
        assert_eq!(into_attribute, 2);
    }

    #[test]
    fn test_each_tree_gets_its_own_nodes() {
        let mut dot = Dot::new();
        let first = dot.accept(&eq(column("id"), bind(1)));
        let tree = eq(column("id"), bind(2));
        let second = dot.accept(&tree);
        let again = dot.accept(&tree);
        assert_eq!((first, second, again), (0, 3, 6));
        assert_eq!(dot.nodes.len(), 9);
        assert_eq!(dot.edges.len(), 6);
    }
}
