//! Statement nodes and their construction helpers.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::nodes::{JoinSource, Table};
use super::{Node, NodeRef};
use super::builders::{sql, unary};
use super::nodes::UnaryOp;
use super::values::Value;

/// One `SELECT ... FROM ... WHERE ...` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectCore {
    pub projections: Vec<NodeRef>,
    /// Usually a `JoinSource`; absent or empty means no `FROM`.
    pub source: Option<NodeRef>,
    pub wheres: Vec<NodeRef>,
    pub groups: Vec<NodeRef>,
    pub havings: Vec<NodeRef>,
    pub windows: Vec<NodeRef>,
    pub set_quantifier: Option<NodeRef>,
    pub optimizer_hints: Option<NodeRef>,
    pub comment: Option<NodeRef>,
}

impl SelectCore {
    pub fn from_table(table: Table) -> Self {
        Self {
            source: Some(Arc::new(Node::JoinSource(JoinSource {
                left: Some(Arc::new(table.node())),
                right: Vec::new(),
            }))),
            ..Self::default()
        }
    }

    /// Whether the core has a non-empty `FROM` source.
    pub fn has_source(&self) -> bool {
        match self.source.as_deref() {
            None => false,
            Some(Node::JoinSource(js)) => !js.is_empty(),
            Some(_) => true,
        }
    }

    /// The leftmost `FROM` item.
    pub fn from_item(&self) -> Option<&NodeRef> {
        match self.source.as_deref() {
            Some(Node::JoinSource(js)) => js.left.as_ref(),
            _ => self.source.as_ref(),
        }
    }

    pub fn project(mut self, projection: impl Into<NodeRef>) -> Self {
        self.projections.push(projection.into());
        self
    }

    pub fn filter(mut self, predicate: impl Into<NodeRef>) -> Self {
        self.wheres.push(predicate.into());
        self
    }

    pub fn join(mut self, join: impl Into<NodeRef>) -> Self {
        let mut source = match self.source.as_deref() {
            Some(Node::JoinSource(js)) => js.clone(),
            Some(_) => JoinSource {
                left: self.source.clone(),
                right: Vec::new(),
            },
            None => JoinSource::default(),
        };
        source.right.push(join.into());
        self.source = Some(Arc::new(Node::JoinSource(source)));
        self
    }

    pub fn group(mut self, expr: impl Into<NodeRef>) -> Self {
        self.groups.push(Arc::new(unary(UnaryOp::Group, expr)));
        self
    }

    pub fn having(mut self, predicate: impl Into<NodeRef>) -> Self {
        self.havings.push(predicate.into());
        self
    }

    pub fn window(mut self, window: impl Into<NodeRef>) -> Self {
        self.windows.push(window.into());
        self
    }

    pub fn distinct(mut self) -> Self {
        self.set_quantifier = Some(Arc::new(Node::Distinct));
        self
    }

    pub fn distinct_on(mut self, expr: impl Into<NodeRef>) -> Self {
        self.set_quantifier = Some(Arc::new(unary(UnaryOp::DistinctOn, expr)));
        self
    }

    pub fn optimizer_hints<S: Into<String>>(mut self, hints: impl IntoIterator<Item = S>) -> Self {
        self.optimizer_hints = Some(Arc::new(Node::OptimizerHints(
            hints.into_iter().map(Into::into).collect(),
        )));
        self
    }

    pub fn comment<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.comment = Some(Arc::new(Node::Comment(
            values.into_iter().map(Into::into).collect(),
        )));
        self
    }
}

/// A full query: cores joined by their options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectStatement {
    /// Always at least one `SelectCore` node.
    pub cores: Vec<NodeRef>,
    pub orders: Vec<NodeRef>,
    pub limit: Option<NodeRef>,
    pub offset: Option<NodeRef>,
    pub lock: Option<NodeRef>,
    pub with: Option<NodeRef>,
}

impl Default for SelectStatement {
    fn default() -> Self {
        Self::new(SelectCore::default())
    }
}

impl SelectStatement {
    pub fn new(core: SelectCore) -> Self {
        Self {
            cores: vec![Arc::new(Node::SelectCore(core))],
            orders: Vec::new(),
            limit: None,
            offset: None,
            lock: None,
            with: None,
        }
    }

    pub fn from_table(table: Table) -> Self {
        Self::new(SelectCore::from_table(table))
    }

    pub fn cores(&self) -> impl Iterator<Item = &SelectCore> {
        self.cores.iter().filter_map(|c| c.as_core())
    }

    pub fn first_core(&self) -> Option<&SelectCore> {
        self.cores().next()
    }

    pub fn last_core(&self) -> Option<&SelectCore> {
        self.cores().last()
    }

    /// Whether the statement must be parenthesised when used as an operand.
    pub fn requires_parentheses(&self) -> bool {
        !self.orders.is_empty() || self.limit.is_some() || self.offset.is_some()
    }

    /// Rebuild the last core, leaving the others shared.
    pub fn map_last_core(mut self, f: impl FnOnce(SelectCore) -> SelectCore) -> Self {
        if let Some(last) = self.cores.pop() {
            let core = last.as_core().cloned().unwrap_or_default();
            self.cores.push(Arc::new(Node::SelectCore(f(core))));
        }
        self
    }

    pub fn order(mut self, order: impl Into<NodeRef>) -> Self {
        self.orders.push(order.into());
        self
    }

    pub fn limit(mut self, n: impl Into<Value>) -> Self {
        self.limit = Some(Arc::new(unary(UnaryOp::Limit, Node::Value(n.into()))));
        self
    }

    pub fn limit_node(mut self, expr: impl Into<NodeRef>) -> Self {
        self.limit = Some(Arc::new(unary(UnaryOp::Limit, expr)));
        self
    }

    pub fn offset(mut self, n: impl Into<Value>) -> Self {
        self.offset = Some(Arc::new(unary(UnaryOp::Offset, Node::Value(n.into()))));
        self
    }

    pub fn offset_node(mut self, expr: impl Into<NodeRef>) -> Self {
        self.offset = Some(Arc::new(unary(UnaryOp::Offset, expr)));
        self
    }

    /// `FOR UPDATE`, or the given locking clause.
    pub fn lock(mut self, clause: Option<&str>) -> Self {
        let clause = sql(clause.unwrap_or("FOR UPDATE"));
        self.lock = Some(Arc::new(unary(UnaryOp::Lock, clause)));
        self
    }

    pub fn with(mut self, with: impl Into<NodeRef>) -> Self {
        self.with = Some(with.into());
        self
    }
}

/// `INSERT INTO relation (columns) VALUES ... | SELECT ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertStatement {
    pub relation: NodeRef,
    pub columns: Vec<NodeRef>,
    pub values: Option<NodeRef>,
    pub select: Option<NodeRef>,
}

impl InsertStatement {
    pub fn new(relation: impl Into<NodeRef>) -> Self {
        Self {
            relation: relation.into(),
            columns: Vec::new(),
            values: None,
            select: None,
        }
    }
}

/// `UPDATE relation SET values WHERE ...`; `key` enables subselect rewrites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatement {
    pub relation: NodeRef,
    pub values: Vec<NodeRef>,
    pub wheres: Vec<NodeRef>,
    pub groups: Vec<NodeRef>,
    pub havings: Vec<NodeRef>,
    pub orders: Vec<NodeRef>,
    pub limit: Option<NodeRef>,
    pub offset: Option<NodeRef>,
    pub key: Option<NodeRef>,
}

impl UpdateStatement {
    pub fn new(relation: impl Into<NodeRef>) -> Self {
        Self {
            relation: relation.into(),
            values: Vec::new(),
            wheres: Vec::new(),
            groups: Vec::new(),
            havings: Vec::new(),
            orders: Vec::new(),
            limit: None,
            offset: None,
            key: None,
        }
    }
}

/// `DELETE FROM relation WHERE ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteStatement {
    pub relation: NodeRef,
    pub wheres: Vec<NodeRef>,
    pub groups: Vec<NodeRef>,
    pub havings: Vec<NodeRef>,
    pub orders: Vec<NodeRef>,
    pub limit: Option<NodeRef>,
    pub offset: Option<NodeRef>,
    pub key: Option<NodeRef>,
}

impl DeleteStatement {
    pub fn new(relation: impl Into<NodeRef>) -> Self {
        Self {
            relation: relation.into(),
            wheres: Vec::new(),
            groups: Vec::new(),
            havings: Vec::new(),
            orders: Vec::new(),
            limit: None,
            offset: None,
            key: None,
        }
    }
}

/// The parts UPDATE and DELETE share for row selection.
///
/// Rewrites work on this view so the two statements go through one path.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifyParts {
    pub relation: NodeRef,
    pub wheres: Vec<NodeRef>,
    pub groups: Vec<NodeRef>,
    pub havings: Vec<NodeRef>,
    pub orders: Vec<NodeRef>,
    pub limit: Option<NodeRef>,
    pub offset: Option<NodeRef>,
    pub key: Option<NodeRef>,
}

impl ModifyParts {
    /// The join source, if the relation has joins.
    pub fn join_source(&self) -> Option<&JoinSource> {
        match self.relation.as_ref() {
            Node::JoinSource(js) if !js.right.is_empty() => Some(js),
            _ => None,
        }
    }

    pub fn has_join_sources(&self) -> bool {
        self.join_source().is_some()
    }

    pub fn has_limit_or_offset_or_orders(&self) -> bool {
        self.limit.is_some() || self.offset.is_some() || !self.orders.is_empty()
    }

    pub fn has_group_by_and_having(&self) -> bool {
        !self.groups.is_empty() && !self.havings.is_empty()
    }
}

impl From<&UpdateStatement> for ModifyParts {
    fn from(o: &UpdateStatement) -> Self {
        Self {
            relation: o.relation.clone(),
            wheres: o.wheres.clone(),
            groups: o.groups.clone(),
            havings: o.havings.clone(),
            orders: o.orders.clone(),
            limit: o.limit.clone(),
            offset: o.offset.clone(),
            key: o.key.clone(),
        }
    }
}

impl From<&DeleteStatement> for ModifyParts {
    fn from(o: &DeleteStatement) -> Self {
        Self {
            relation: o.relation.clone(),
            wheres: o.wheres.clone(),
            groups: o.groups.clone(),
            havings: o.havings.clone(),
            orders: o.orders.clone(),
            limit: o.limit.clone(),
            offset: o.offset.clone(),
            key: o.key.clone(),
        }
    }
}
