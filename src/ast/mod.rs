//! The relational-algebra node model.
//!
//! A tree is built from [`Node`] values linked through [`NodeRef`]
//! (`Arc<Node>`). Nodes carry no behaviour beyond structure; compilers read
//! them and never mutate them. Rewrites build new nodes that share the
//! untouched subtrees of the original.

pub mod builders;
pub mod kind;
pub mod nodes;
pub mod statements;
pub mod values;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use builders::*;
pub use kind::Kind;
pub use nodes::*;
pub use statements::*;
pub use values::{SqlType, Unboundable, Value};

/// Shared, immutable link to a child node.
pub type NodeRef = Arc<Node>;

/// One relational-algebra construct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Table(Table),
    TableAlias(TableAlias),
    Attribute(Attribute),
    /// A bare column name, quoted as a column.
    UnqualifiedColumn(String),
    SqlLiteral(SqlLiteral),
    BoundSqlLiteral(BoundSqlLiteral),
    BindParam(BindParam),
    /// A value inlined through the quoting service.
    Quoted(Value),
    Casted(Casted),
    /// A raw host value. Only integers have a renderer.
    Value(Value),
    True,
    False,
    Distinct,
    CurrentRow,
    List(Vec<NodeRef>),
    Fragments(Vec<NodeRef>),
    ValuesList(Vec<Vec<NodeRef>>),
    HomogeneousIn(HomogeneousIn),
    /// `ROW_NUMBER() OVER (ORDER BY ...)`, only emitted by pagination rewrites.
    RowNumber(Vec<NodeRef>),
    Comment(Vec<String>),
    OptimizerHints(Vec<String>),

    Unary(Unary),
    Frame(Frame),
    Extract(Extract),
    UnaryOperation(UnaryOperation),
    With(With),

    Binary(Binary),
    Matches(Matches),
    Regexp(Regexp),
    Infix(Infix),
    Join(Join),
    JoinSource(JoinSource),
    Over(Over),
    Cte(Cte),

    And(Vec<NodeRef>),
    Or(Vec<NodeRef>),

    Function(Function),
    Exists(Exists),
    Case(Case),
    Window(Window),

    SelectStatement(SelectStatement),
    SelectCore(SelectCore),
    InsertStatement(InsertStatement),
    UpdateStatement(UpdateStatement),
    DeleteStatement(DeleteStatement),
}

impl Node {
    /// The concrete variant tag.
    pub fn kind(&self) -> Kind {
        match self {
            Node::Table(_) => Kind::Table,
            Node::TableAlias(_) => Kind::TableAlias,
            Node::Attribute(_) => Kind::Attribute,
            Node::UnqualifiedColumn(_) => Kind::UnqualifiedColumn,
            Node::SqlLiteral(_) => Kind::SqlLiteral,
            Node::BoundSqlLiteral(_) => Kind::BoundSqlLiteral,
            Node::BindParam(_) => Kind::BindParam,
            Node::Quoted(_) => Kind::Quoted,
            Node::Casted(_) => Kind::Casted,
            Node::Value(v) => v.kind(),
            Node::True => Kind::True,
            Node::False => Kind::False,
            Node::Distinct => Kind::Distinct,
            Node::CurrentRow => Kind::CurrentRow,
            Node::List(_) => Kind::List,
            Node::Fragments(_) => Kind::Fragments,
            Node::ValuesList(_) => Kind::ValuesList,
            Node::HomogeneousIn(_) => Kind::HomogeneousIn,
            Node::RowNumber(_) => Kind::RowNumber,
            Node::Comment(_) => Kind::Comment,
            Node::OptimizerHints(_) => Kind::OptimizerHints,
            Node::Unary(u) => u.op.kind(),
            Node::Frame(f) => f.kind.kind(),
            Node::Extract(_) => Kind::Extract,
            Node::UnaryOperation(u) => u.op.kind(),
            Node::With(w) => {
                if w.recursive {
                    Kind::WithRecursive
                } else {
                    Kind::With
                }
            }
            Node::Binary(b) => b.op.kind(),
            Node::Matches(m) => {
                if m.negated {
                    Kind::DoesNotMatch
                } else {
                    Kind::Matches
                }
            }
            Node::Regexp(r) => {
                if r.negated {
                    Kind::NotRegexp
                } else {
                    Kind::Regexp
                }
            }
            Node::Infix(i) => i.op.kind(),
            Node::Join(j) => j.kind.kind(),
            Node::JoinSource(_) => Kind::JoinSource,
            Node::Over(_) => Kind::Over,
            Node::Cte(_) => Kind::Cte,
            Node::And(_) => Kind::And,
            Node::Or(_) => Kind::Or,
            Node::Function(f) => f.kind.kind(),
            Node::Exists(_) => Kind::Exists,
            Node::Case(_) => Kind::Case,
            Node::Window(w) => {
                if w.name.is_some() {
                    Kind::NamedWindow
                } else {
                    Kind::Window
                }
            }
            Node::SelectStatement(_) => Kind::SelectStatement,
            Node::SelectCore(_) => Kind::SelectCore,
            Node::InsertStatement(_) => Kind::InsertStatement,
            Node::UpdateStatement(_) => Kind::UpdateStatement,
            Node::DeleteStatement(_) => Kind::DeleteStatement,
        }
    }

    /// Whether the node stands for SQL `NULL`.
    pub fn is_null(&self) -> bool {
        match self {
            Node::Quoted(v) | Node::Value(v) => v.is_null(),
            Node::Casted(c) => c.value.is_null(),
            _ => false,
        }
    }

    /// The unboundable direction of a bind, if the node is one.
    pub fn unboundable(&self) -> Option<std::cmp::Ordering> {
        match self {
            Node::BindParam(b) => b.unboundable(),
            _ => None,
        }
    }

    pub fn as_select(&self) -> Option<&SelectStatement> {
        match self {
            Node::SelectStatement(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_core(&self) -> Option<&SelectCore> {
        match self {
            Node::SelectCore(c) => Some(c),
            _ => None,
        }
    }

    /// The column name of an attribute-like node.
    pub fn column_name(&self) -> Option<&str> {
        match self {
            Node::Attribute(a) => Some(&a.name),
            Node::UnqualifiedColumn(name) => Some(name),
            _ => None,
        }
    }

    /// Convert a `WITH` child into its CTE form.
    pub fn to_cte(&self) -> Option<Cte> {
        match self {
            Node::Cte(cte) => Some(cte.clone()),
            Node::TableAlias(alias) => Some(Cte {
                name: alias.name.clone(),
                relation: alias.relation.clone(),
                materialized: None,
            }),
            Node::Binary(Binary {
                op: BinaryOp::As,
                left,
                right,
            }) => {
                let name = match left.as_ref() {
                    Node::Table(t) => t.name.clone(),
                    Node::TableAlias(a) => a.name.clone(),
                    Node::UnqualifiedColumn(n) => n.clone(),
                    Node::SqlLiteral(l) => l.text.clone(),
                    _ => return None,
                };
                Some(Cte {
                    name,
                    relation: right.clone(),
                    materialized: None,
                })
            }
            _ => None,
        }
    }

    /// Labelled child links, in the fixed traversal order.
    ///
    /// Statements list their slots as: `with`, `cores`, `orders`, `limit`,
    /// `offset`, `lock` (select); `projections`, `source`, `wheres`, `groups`,
    /// `havings`, `windows`, `set_quantifier`, `optimizer_hints`, `comment`
    /// (core); `relation`, `columns`, `values`, `select` (insert);
    /// `relation`, `values`, `wheres`, `groups`, `havings`, `orders`, `limit`,
    /// `offset`, `key` (update and delete).
    pub fn edges(&self) -> Vec<(&'static str, &Node)> {
        let mut edges: Vec<(&'static str, &Node)> = Vec::new();
        fn one<'a>(edges: &mut Vec<(&'static str, &'a Node)>, name: &'static str, n: &'a NodeRef) {
            edges.push((name, n.as_ref()));
        }
        fn opt<'a>(
            edges: &mut Vec<(&'static str, &'a Node)>,
            name: &'static str,
            n: &'a Option<NodeRef>,
        ) {
            if let Some(n) = n {
                edges.push((name, n.as_ref()));
            }
        }
        fn many<'a>(edges: &mut Vec<(&'static str, &'a Node)>, name: &'static str, ns: &'a [NodeRef]) {
            edges.extend(ns.iter().map(|n| (name, n.as_ref())));
        }

        match self {
            Node::Table(_)
            | Node::UnqualifiedColumn(_)
            | Node::SqlLiteral(_)
            | Node::BindParam(_)
            | Node::Quoted(_)
            | Node::Value(_)
            | Node::True
            | Node::False
            | Node::Distinct
            | Node::CurrentRow
            | Node::Comment(_)
            | Node::OptimizerHints(_) => {}
            Node::TableAlias(a) => one(&mut edges, "relation", &a.relation),
            Node::Attribute(a) => one(&mut edges, "relation", &a.relation),
            Node::BoundSqlLiteral(b) => {
                for value in b.values() {
                    value.collect_nodes(&mut |n| edges.push(("binds", n)));
                }
            }
            Node::Casted(c) => opt(&mut edges, "attribute", &c.attribute),
            Node::List(items) => many(&mut edges, "items", items),
            Node::Fragments(items) => many(&mut edges, "values", items),
            Node::ValuesList(rows) => {
                for row in rows {
                    many(&mut edges, "rows", row);
                }
            }
            Node::HomogeneousIn(h) => one(&mut edges, "attribute", &h.attribute),
            Node::RowNumber(orders) => many(&mut edges, "orders", orders),
            Node::Unary(u) => one(&mut edges, "expr", &u.expr),
            Node::Frame(f) => opt(&mut edges, "expr", &f.expr),
            Node::Extract(e) => one(&mut edges, "expr", &e.expr),
            Node::UnaryOperation(u) => one(&mut edges, "expr", &u.expr),
            Node::With(w) => many(&mut edges, "children", &w.children),
            Node::Binary(b) => {
                one(&mut edges, "left", &b.left);
                one(&mut edges, "right", &b.right);
            }
            Node::Matches(m) => {
                one(&mut edges, "left", &m.left);
                one(&mut edges, "right", &m.right);
                opt(&mut edges, "escape", &m.escape);
            }
            Node::Regexp(r) => {
                one(&mut edges, "left", &r.left);
                one(&mut edges, "right", &r.right);
            }
            Node::Infix(i) => {
                one(&mut edges, "left", &i.left);
                one(&mut edges, "right", &i.right);
            }
            Node::Join(j) => {
                one(&mut edges, "left", &j.left);
                opt(&mut edges, "right", &j.right);
            }
            Node::JoinSource(js) => {
                opt(&mut edges, "left", &js.left);
                many(&mut edges, "right", &js.right);
            }
            Node::Over(o) => {
                one(&mut edges, "left", &o.left);
                opt(&mut edges, "right", &o.right);
            }
            Node::Cte(c) => one(&mut edges, "relation", &c.relation),
            Node::And(children) | Node::Or(children) => many(&mut edges, "children", children),
            Node::Function(f) => {
                many(&mut edges, "expressions", &f.expressions);
                opt(&mut edges, "alias", &f.alias);
            }
            Node::Exists(e) => {
                one(&mut edges, "expressions", &e.expr);
                opt(&mut edges, "alias", &e.alias);
            }
            Node::Case(c) => {
                opt(&mut edges, "case", &c.case);
                many(&mut edges, "conditions", &c.conditions);
                opt(&mut edges, "default", &c.default);
            }
            Node::Window(w) => {
                many(&mut edges, "partitions", &w.partitions);
                many(&mut edges, "orders", &w.orders);
                opt(&mut edges, "framing", &w.framing);
            }
            Node::SelectStatement(s) => {
                opt(&mut edges, "with", &s.with);
                many(&mut edges, "cores", &s.cores);
                many(&mut edges, "orders", &s.orders);
                opt(&mut edges, "limit", &s.limit);
                opt(&mut edges, "offset", &s.offset);
                opt(&mut edges, "lock", &s.lock);
            }
            Node::SelectCore(c) => {
                many(&mut edges, "projections", &c.projections);
                opt(&mut edges, "source", &c.source);
                many(&mut edges, "wheres", &c.wheres);
                many(&mut edges, "groups", &c.groups);
                many(&mut edges, "havings", &c.havings);
                many(&mut edges, "windows", &c.windows);
                opt(&mut edges, "set_quantifier", &c.set_quantifier);
                opt(&mut edges, "optimizer_hints", &c.optimizer_hints);
                opt(&mut edges, "comment", &c.comment);
            }
            Node::InsertStatement(i) => {
                one(&mut edges, "relation", &i.relation);
                many(&mut edges, "columns", &i.columns);
                opt(&mut edges, "values", &i.values);
                opt(&mut edges, "select", &i.select);
            }
            Node::UpdateStatement(u) => {
                one(&mut edges, "relation", &u.relation);
                many(&mut edges, "values", &u.values);
                many(&mut edges, "wheres", &u.wheres);
                many(&mut edges, "groups", &u.groups);
                many(&mut edges, "havings", &u.havings);
                many(&mut edges, "orders", &u.orders);
                opt(&mut edges, "limit", &u.limit);
                opt(&mut edges, "offset", &u.offset);
                opt(&mut edges, "key", &u.key);
            }
            Node::DeleteStatement(d) => {
                one(&mut edges, "relation", &d.relation);
                many(&mut edges, "wheres", &d.wheres);
                many(&mut edges, "groups", &d.groups);
                many(&mut edges, "havings", &d.havings);
                many(&mut edges, "orders", &d.orders);
                opt(&mut edges, "limit", &d.limit);
                opt(&mut edges, "offset", &d.offset);
                opt(&mut edges, "key", &d.key);
            }
        }
        edges
    }

    /// Scalar fields shown next to the node name in graph output.
    pub fn fields(&self) -> Vec<String> {
        match self {
            Node::Table(t) => std::iter::once(t.name.clone()).chain(t.alias.clone()).collect(),
            Node::TableAlias(a) => vec![a.name.clone()],
            Node::Attribute(a) => vec![a.name.clone()],
            Node::UnqualifiedColumn(name) => vec![name.clone()],
            Node::SqlLiteral(l) => vec![l.text.clone()],
            Node::BoundSqlLiteral(b) => vec![b.sql.clone()],
            Node::BindParam(b) => vec![b.value.to_string()],
            Node::Quoted(v) | Node::Value(v) => vec![v.to_string()],
            Node::Casted(c) => vec![c.value.to_string()],
            Node::HomogeneousIn(h) => h.values.iter().map(|v| v.to_string()).collect(),
            Node::Comment(values) | Node::OptimizerHints(values) => values.clone(),
            Node::Extract(e) => vec![e.field.clone()],
            Node::UnaryOperation(u) => vec![u.op.operator().to_string()],
            Node::Infix(i) => vec![i.op.operator().to_string()],
            Node::Cte(c) => vec![c.name.clone()],
            Node::Function(f) => {
                let mut fields = vec![f.kind.name().to_string()];
                if f.distinct {
                    fields.push("DISTINCT".to_string());
                }
                fields
            }
            Node::Window(w) => w.name.iter().cloned().collect(),
            _ => Vec::new(),
        }
    }
}

impl From<Value> for Node {
    fn from(v: Value) -> Self {
        Node::Value(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kinds() {
        let users = Table::new("users");
        assert_eq!(users.attr("id").kind(), Kind::Attribute);
        assert_eq!(concat(users.attr("a"), users.attr("b")).kind(), Kind::Concat);
        assert_eq!(count(vec![sql("*")]).kind(), Kind::Count);
        assert_eq!(Node::Value(Value::from("x")).kind(), Kind::String);
        assert_eq!(does_not_match(users.attr("a"), quoted("%x%")).kind(), Kind::DoesNotMatch);
    }

    #[test]
    fn test_null_detection() {
        assert!(quoted(Value::Null).is_null());
        assert!(!quoted(1).is_null());
    }

    #[test]
    fn test_to_cte_from_as_and_alias() {
        let select = Arc::new(Node::SelectStatement(SelectStatement::from_table(Table::new("a"))));
        let as_node = as_(Table::new("recent").node(), select.clone());
        let cte = as_node.to_cte().unwrap();
        assert_eq!(cte.name, "recent");
        assert!(cte.materialized.is_none());

        let alias = Node::TableAlias(TableAlias {
            relation: select,
            name: "sub".to_string(),
        });
        assert_eq!(alias.to_cte().unwrap().name, "sub");
        assert!(sql("x").to_cte().is_none());
    }

    #[test]
    fn test_edges_follow_slot_order() {
        let users = Table::new("users");
        let stmt = SelectStatement::from_table(users.clone())
            .order(asc(users.attr("id")))
            .limit(10);
        let node = Node::SelectStatement(stmt);
        let names: Vec<&str> = node.edges().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["cores", "orders", "limit"]);
    }
}
