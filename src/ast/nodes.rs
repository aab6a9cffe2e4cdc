use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::values::{SqlType, Unboundable, Value};
use super::{Kind, Node, NodeRef};

/// A named relation, optionally aliased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub alias: Option<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The name attributes of this table are qualified with.
    pub fn reference_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn node(&self) -> Node {
        Node::Table(self.clone())
    }

    /// A column of this table.
    pub fn attr(&self, name: impl Into<String>) -> Node {
        Node::Attribute(Attribute {
            relation: Arc::new(self.node()),
            name: name.into(),
        })
    }
}

/// `<relation> <name>`, typically a parenthesised subquery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableAlias {
    pub relation: NodeRef,
    pub name: String,
}

impl TableAlias {
    pub fn attr(&self, name: impl Into<String>) -> Node {
        Node::Attribute(Attribute {
            relation: Arc::new(Node::TableAlias(self.clone())),
            name: name.into(),
        })
    }
}

/// A column qualified by its relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub relation: NodeRef,
    pub name: String,
}

/// Raw SQL text emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlLiteral {
    pub text: String,
    /// Whether re-running the statement after a transient failure is safe.
    pub retryable: bool,
}

/// A value bound inside a [`BoundSqlLiteral`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoundValue {
    /// Rendered in place through the active compiler.
    Node(NodeRef),
    /// Emitted as a bind.
    Value(Value),
    /// Expanded to a comma-separated list of binds and nodes.
    List(Vec<BoundValue>),
}

impl BoundValue {
    pub(crate) fn collect_nodes<'a>(&'a self, f: &mut dyn FnMut(&'a Node)) {
        match self {
            BoundValue::Node(n) => f(n),
            BoundValue::Value(_) => {}
            BoundValue::List(items) => {
                for item in items {
                    item.collect_nodes(f);
                }
            }
        }
    }
}

impl From<Value> for BoundValue {
    fn from(v: Value) -> Self {
        BoundValue::Value(v)
    }
}

impl From<Node> for BoundValue {
    fn from(n: Node) -> Self {
        BoundValue::Node(Arc::new(n))
    }
}

/// Placeholder values for a [`BoundSqlLiteral`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlBinds {
    /// One value per `?`, in order.
    Positional(Vec<BoundValue>),
    /// Values for `:name` placeholders. `::` is never a placeholder.
    Named(BTreeMap<String, BoundValue>),
}

/// Hand-written SQL with `?` or `:name` placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundSqlLiteral {
    pub sql: String,
    pub binds: SqlBinds,
}

impl BoundSqlLiteral {
    pub fn values(&self) -> Vec<&BoundValue> {
        match &self.binds {
            SqlBinds::Positional(values) => values.iter().collect(),
            SqlBinds::Named(values) => values.values().collect(),
        }
    }
}

/// A value deferred to execution time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindParam {
    pub value: Value,
    pub ty: Option<SqlType>,
}

impl Unboundable for BindParam {
    fn unboundable(&self) -> Option<std::cmp::Ordering> {
        self.ty.and_then(|ty| (ty, &self.value).unboundable())
    }
}

/// A literal value typed by the attribute it is compared with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Casted {
    pub value: Value,
    pub attribute: Option<NodeRef>,
}

/// `attribute [NOT] IN (...)` over plain values, bound in one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomogeneousIn {
    pub attribute: NodeRef,
    pub values: Vec<Value>,
    pub ty: Option<SqlType>,
    pub negated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Grouping,
    Ascending,
    Descending,
    NullsFirst,
    NullsLast,
    Offset,
    Limit,
    On,
    Having,
    Group,
    Lock,
    Lateral,
    Cube,
    RollUp,
    GroupingSet,
    GroupingElement,
    DistinctOn,
    Else,
    Bin,
}

impl UnaryOp {
    pub fn kind(self) -> Kind {
        match self {
            UnaryOp::Not => Kind::Not,
            UnaryOp::Grouping => Kind::Grouping,
            UnaryOp::Ascending => Kind::Ascending,
            UnaryOp::Descending => Kind::Descending,
            UnaryOp::NullsFirst => Kind::NullsFirst,
            UnaryOp::NullsLast => Kind::NullsLast,
            UnaryOp::Offset => Kind::Offset,
            UnaryOp::Limit => Kind::Limit,
            UnaryOp::On => Kind::On,
            UnaryOp::Having => Kind::Having,
            UnaryOp::Group => Kind::Group,
            UnaryOp::Lock => Kind::Lock,
            UnaryOp::Lateral => Kind::Lateral,
            UnaryOp::Cube => Kind::Cube,
            UnaryOp::RollUp => Kind::RollUp,
            UnaryOp::GroupingSet => Kind::GroupingSet,
            UnaryOp::GroupingElement => Kind::GroupingElement,
            UnaryOp::DistinctOn => Kind::DistinctOn,
            UnaryOp::Else => Kind::Else,
            UnaryOp::Bin => Kind::Bin,
        }
    }
}

/// A node wrapping exactly one child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unary {
    pub op: UnaryOp,
    pub expr: NodeRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameKind {
    Preceding,
    Following,
    Rows,
    Range,
}

impl FrameKind {
    pub fn kind(self) -> Kind {
        match self {
            FrameKind::Preceding => Kind::Preceding,
            FrameKind::Following => Kind::Following,
            FrameKind::Rows => Kind::Rows,
            FrameKind::Range => Kind::Range,
        }
    }
}

/// A window-frame piece. A missing bound expression means `UNBOUNDED`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub kind: FrameKind,
    pub expr: Option<NodeRef>,
}

/// `EXTRACT(field FROM expr)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extract {
    pub field: String,
    pub expr: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    BitwiseNot,
    Custom(String),
}

impl UnaryOperator {
    pub fn kind(&self) -> Kind {
        match self {
            UnaryOperator::BitwiseNot => Kind::BitwiseNot,
            UnaryOperator::Custom(_) => Kind::UnaryOperation,
        }
    }

    pub fn operator(&self) -> &str {
        match self {
            UnaryOperator::BitwiseNot => "~",
            UnaryOperator::Custom(op) => op,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryOperation {
    pub op: UnaryOperator,
    pub expr: NodeRef,
}

/// `WITH [RECURSIVE] ...`; children are `Cte`, `As` or `TableAlias` nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct With {
    pub recursive: bool,
    pub children: Vec<NodeRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Equality,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    In,
    NotIn,
    IsDistinctFrom,
    IsNotDistinctFrom,
    As,
    Assignment,
    Between,
    Union,
    UnionAll,
    Intersect,
    Except,
    When,
    Filter,
}

impl BinaryOp {
    pub fn kind(self) -> Kind {
        match self {
            BinaryOp::Equality => Kind::Equality,
            BinaryOp::NotEqual => Kind::NotEqual,
            BinaryOp::GreaterThan => Kind::GreaterThan,
            BinaryOp::GreaterThanOrEqual => Kind::GreaterThanOrEqual,
            BinaryOp::LessThan => Kind::LessThan,
            BinaryOp::LessThanOrEqual => Kind::LessThanOrEqual,
            BinaryOp::In => Kind::In,
            BinaryOp::NotIn => Kind::NotIn,
            BinaryOp::IsDistinctFrom => Kind::IsDistinctFrom,
            BinaryOp::IsNotDistinctFrom => Kind::IsNotDistinctFrom,
            BinaryOp::As => Kind::As,
            BinaryOp::Assignment => Kind::Assignment,
            BinaryOp::Between => Kind::Between,
            BinaryOp::Union => Kind::Union,
            BinaryOp::UnionAll => Kind::UnionAll,
            BinaryOp::Intersect => Kind::Intersect,
            BinaryOp::Except => Kind::Except,
            BinaryOp::When => Kind::When,
            BinaryOp::Filter => Kind::Filter,
        }
    }
}

/// A node with a left and a right child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binary {
    pub op: BinaryOp,
    pub left: NodeRef,
    pub right: NodeRef,
}

/// `LIKE` / `NOT LIKE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matches {
    pub left: NodeRef,
    pub right: NodeRef,
    pub escape: Option<NodeRef>,
    pub case_sensitive: bool,
    pub negated: bool,
}

/// Regular-expression match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regexp {
    pub left: NodeRef,
    pub right: NodeRef,
    pub case_sensitive: bool,
    pub negated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfixOp {
    Concat,
    Contains,
    Overlaps,
    Multiplication,
    Division,
    Addition,
    Subtraction,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseShiftLeft,
    BitwiseShiftRight,
    Custom(String),
}

impl InfixOp {
    pub fn kind(&self) -> Kind {
        match self {
            InfixOp::Concat => Kind::Concat,
            InfixOp::Contains => Kind::Contains,
            InfixOp::Overlaps => Kind::Overlaps,
            InfixOp::Multiplication => Kind::Multiplication,
            InfixOp::Division => Kind::Division,
            InfixOp::Addition => Kind::Addition,
            InfixOp::Subtraction => Kind::Subtraction,
            InfixOp::BitwiseAnd => Kind::BitwiseAnd,
            InfixOp::BitwiseOr => Kind::BitwiseOr,
            InfixOp::BitwiseXor => Kind::BitwiseXor,
            InfixOp::BitwiseShiftLeft => Kind::BitwiseShiftLeft,
            InfixOp::BitwiseShiftRight => Kind::BitwiseShiftRight,
            InfixOp::Custom(_) => Kind::InfixOperation,
        }
    }

    pub fn operator(&self) -> &str {
        match self {
            InfixOp::Concat => "||",
            InfixOp::Contains => "@>",
            InfixOp::Overlaps => "&&",
            InfixOp::Multiplication => "*",
            InfixOp::Division => "/",
            InfixOp::Addition => "+",
            InfixOp::Subtraction => "-",
            InfixOp::BitwiseAnd => "&",
            InfixOp::BitwiseOr => "|",
            InfixOp::BitwiseXor => "^",
            InfixOp::BitwiseShiftLeft => "<<",
            InfixOp::BitwiseShiftRight => ">>",
            InfixOp::Custom(op) => op,
        }
    }
}

/// `left <operator> right`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Infix {
    pub op: InfixOp,
    pub left: NodeRef,
    pub right: NodeRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    Inner,
    LeftOuter,
    FullOuter,
    RightOuter,
    /// Raw join text carried by the left child.
    String,
}

impl JoinKind {
    pub fn kind(self) -> Kind {
        match self {
            JoinKind::Inner => Kind::InnerJoin,
            JoinKind::LeftOuter => Kind::OuterJoin,
            JoinKind::FullOuter => Kind::FullOuterJoin,
            JoinKind::RightOuter => Kind::RightOuterJoin,
            JoinKind::String => Kind::StringJoin,
        }
    }
}

/// A join against `left`; `right` is the `On` constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub kind: JoinKind,
    pub left: NodeRef,
    pub right: Option<NodeRef>,
}

impl Join {
    /// The join constraint expression, unwrapping the `On` node.
    pub fn constraint(&self) -> Option<&NodeRef> {
        match self.right.as_deref() {
            Some(Node::Unary(Unary {
                op: UnaryOp::On,
                expr,
            })) => Some(expr),
            _ => None,
        }
    }
}

/// The `FROM` item and the joins hanging off it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinSource {
    pub left: Option<NodeRef>,
    pub right: Vec<NodeRef>,
}

impl JoinSource {
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_empty()
    }
}

/// `left OVER right`. `right` may be a window, a named-window identifier or nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Over {
    pub left: NodeRef,
    pub right: Option<NodeRef>,
}

/// `name AS [NOT] [MATERIALIZED] relation`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cte {
    pub name: String,
    pub relation: NodeRef,
    pub materialized: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunctionKind {
    Count,
    Sum,
    Max,
    Min,
    Avg,
    Named(String),
}

impl FunctionKind {
    pub fn kind(&self) -> Kind {
        match self {
            FunctionKind::Count => Kind::Count,
            FunctionKind::Sum => Kind::Sum,
            FunctionKind::Max => Kind::Max,
            FunctionKind::Min => Kind::Min,
            FunctionKind::Avg => Kind::Avg,
            FunctionKind::Named(_) => Kind::NamedFunction,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FunctionKind::Count => "COUNT",
            FunctionKind::Sum => "SUM",
            FunctionKind::Max => "MAX",
            FunctionKind::Min => "MIN",
            FunctionKind::Avg => "AVG",
            FunctionKind::Named(name) => name,
        }
    }
}

/// An aggregate or a named SQL function call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub kind: FunctionKind,
    pub expressions: Vec<NodeRef>,
    pub distinct: bool,
    pub alias: Option<NodeRef>,
}

impl Function {
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(Arc::new(Node::SqlLiteral(SqlLiteral {
            text: alias.into(),
            retryable: true,
        })));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exists {
    pub expr: NodeRef,
    pub alias: Option<NodeRef>,
}

/// `CASE [case] WHEN ... THEN ... [ELSE ...] END`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub case: Option<NodeRef>,
    pub conditions: Vec<NodeRef>,
    pub default: Option<NodeRef>,
}

/// A window definition, named when it appears in a `WINDOW` clause.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub name: Option<String>,
    pub partitions: Vec<NodeRef>,
    pub orders: Vec<NodeRef>,
    pub framing: Option<NodeRef>,
}
