//! Free constructor functions for building trees by hand.
//!
//! Every helper takes `impl Into<NodeRef>` so both owned [`Node`]s and shared
//! [`NodeRef`]s can be passed, and returns an owned [`Node`].

use std::collections::BTreeMap;
use std::sync::Arc;

use super::nodes::*;
use super::statements::SelectStatement;
use super::values::{SqlType, Value};
use super::{Node, NodeRef};

fn arc(n: impl Into<NodeRef>) -> NodeRef {
    n.into()
}

fn arcs<N: Into<NodeRef>>(items: impl IntoIterator<Item = N>) -> Vec<NodeRef> {
    items.into_iter().map(Into::into).collect()
}

// ----- Leaves -----

/// Raw SQL emitted verbatim. Not retryable.
pub fn sql(text: impl Into<String>) -> Node {
    Node::SqlLiteral(SqlLiteral {
        text: text.into(),
        retryable: false,
    })
}

/// Raw SQL known to be safe to re-run.
pub fn sql_retryable(text: impl Into<String>) -> Node {
    Node::SqlLiteral(SqlLiteral {
        text: text.into(),
        retryable: true,
    })
}

pub fn bound_sql(text: impl Into<String>, binds: Vec<BoundValue>) -> Node {
    Node::BoundSqlLiteral(BoundSqlLiteral {
        sql: text.into(),
        binds: SqlBinds::Positional(binds),
    })
}

pub fn bound_sql_named<K: Into<String>>(
    text: impl Into<String>,
    binds: impl IntoIterator<Item = (K, BoundValue)>,
) -> Node {
    let binds: BTreeMap<String, BoundValue> =
        binds.into_iter().map(|(k, v)| (k.into(), v)).collect();
    Node::BoundSqlLiteral(BoundSqlLiteral {
        sql: text.into(),
        binds: SqlBinds::Named(binds),
    })
}

pub fn bind(value: impl Into<Value>) -> Node {
    Node::BindParam(BindParam {
        value: value.into(),
        ty: None,
    })
}

pub fn bind_typed(value: impl Into<Value>, ty: SqlType) -> Node {
    Node::BindParam(BindParam {
        value: value.into(),
        ty: Some(ty),
    })
}

pub fn quoted(value: impl Into<Value>) -> Node {
    Node::Quoted(value.into())
}

pub fn casted(value: impl Into<Value>, attribute: impl Into<NodeRef>) -> Node {
    Node::Casted(Casted {
        value: value.into(),
        attribute: Some(attribute.into()),
    })
}

pub fn column(name: impl Into<String>) -> Node {
    Node::UnqualifiedColumn(name.into())
}

pub fn list<N: Into<NodeRef>>(items: impl IntoIterator<Item = N>) -> Node {
    Node::List(arcs(items))
}

pub fn values_list(rows: Vec<Vec<Node>>) -> Node {
    Node::ValuesList(rows.into_iter().map(arcs).collect())
}

pub fn table_alias(relation: impl Into<NodeRef>, name: impl Into<String>) -> Node {
    Node::TableAlias(TableAlias {
        relation: arc(relation),
        name: name.into(),
    })
}

pub fn homogeneous_in(attribute: impl Into<NodeRef>, values: Vec<Value>, ty: Option<SqlType>) -> Node {
    Node::HomogeneousIn(HomogeneousIn {
        attribute: arc(attribute),
        values,
        ty,
        negated: false,
    })
}

pub fn homogeneous_not_in(
    attribute: impl Into<NodeRef>,
    values: Vec<Value>,
    ty: Option<SqlType>,
) -> Node {
    Node::HomogeneousIn(HomogeneousIn {
        attribute: arc(attribute),
        values,
        ty,
        negated: true,
    })
}

// ----- Unary -----

pub fn unary(op: UnaryOp, expr: impl Into<NodeRef>) -> Node {
    Node::Unary(Unary {
        op,
        expr: arc(expr),
    })
}

pub fn not(expr: impl Into<NodeRef>) -> Node {
    unary(UnaryOp::Not, expr)
}

pub fn grouping(expr: impl Into<NodeRef>) -> Node {
    unary(UnaryOp::Grouping, expr)
}

pub fn asc(expr: impl Into<NodeRef>) -> Node {
    unary(UnaryOp::Ascending, expr)
}

pub fn desc(expr: impl Into<NodeRef>) -> Node {
    unary(UnaryOp::Descending, expr)
}

pub fn nulls_first(ordering: impl Into<NodeRef>) -> Node {
    unary(UnaryOp::NullsFirst, ordering)
}

pub fn nulls_last(ordering: impl Into<NodeRef>) -> Node {
    unary(UnaryOp::NullsLast, ordering)
}

pub fn on(expr: impl Into<NodeRef>) -> Node {
    unary(UnaryOp::On, expr)
}

pub fn lateral(expr: impl Into<NodeRef>) -> Node {
    unary(UnaryOp::Lateral, expr)
}

pub fn cube(expr: impl Into<NodeRef>) -> Node {
    unary(UnaryOp::Cube, expr)
}

pub fn rollup(expr: impl Into<NodeRef>) -> Node {
    unary(UnaryOp::RollUp, expr)
}

pub fn grouping_set(expr: impl Into<NodeRef>) -> Node {
    unary(UnaryOp::GroupingSet, expr)
}

pub fn grouping_element(expr: impl Into<NodeRef>) -> Node {
    unary(UnaryOp::GroupingElement, expr)
}

pub fn bin(expr: impl Into<NodeRef>) -> Node {
    unary(UnaryOp::Bin, expr)
}

pub fn extract(field: impl Into<String>, expr: impl Into<NodeRef>) -> Node {
    Node::Extract(Extract {
        field: field.into(),
        expr: arc(expr),
    })
}

pub fn bitwise_not(expr: impl Into<NodeRef>) -> Node {
    Node::UnaryOperation(UnaryOperation {
        op: UnaryOperator::BitwiseNot,
        expr: arc(expr),
    })
}

pub fn unary_operation(op: impl Into<String>, expr: impl Into<NodeRef>) -> Node {
    Node::UnaryOperation(UnaryOperation {
        op: UnaryOperator::Custom(op.into()),
        expr: arc(expr),
    })
}

// ----- Window frames -----

fn frame(kind: FrameKind, expr: Option<Node>) -> Node {
    Node::Frame(Frame {
        kind,
        expr: expr.map(Arc::new),
    })
}

/// `n PRECEDING`, or `UNBOUNDED PRECEDING` for `None`.
pub fn preceding(expr: Option<Node>) -> Node {
    frame(FrameKind::Preceding, expr)
}

pub fn following(expr: Option<Node>) -> Node {
    frame(FrameKind::Following, expr)
}

pub fn rows(expr: Option<Node>) -> Node {
    frame(FrameKind::Rows, expr)
}

pub fn range(expr: Option<Node>) -> Node {
    frame(FrameKind::Range, expr)
}

pub fn current_row() -> Node {
    Node::CurrentRow
}

// ----- Binary -----

pub fn binary(op: BinaryOp, left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    Node::Binary(Binary {
        op,
        left: arc(left),
        right: arc(right),
    })
}

pub fn eq(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    binary(BinaryOp::Equality, left, right)
}

pub fn not_eq(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    binary(BinaryOp::NotEqual, left, right)
}

pub fn gt(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    binary(BinaryOp::GreaterThan, left, right)
}

pub fn gteq(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    binary(BinaryOp::GreaterThanOrEqual, left, right)
}

pub fn lt(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    binary(BinaryOp::LessThan, left, right)
}

pub fn lteq(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    binary(BinaryOp::LessThanOrEqual, left, right)
}

/// `left IN right`, where `right` is a `List` or a subquery.
pub fn in_(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    binary(BinaryOp::In, left, right)
}

pub fn not_in(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    binary(BinaryOp::NotIn, left, right)
}

pub fn in_list<N: Into<NodeRef>>(left: impl Into<NodeRef>, items: impl IntoIterator<Item = N>) -> Node {
    in_(left, list(items))
}

pub fn not_in_list<N: Into<NodeRef>>(
    left: impl Into<NodeRef>,
    items: impl IntoIterator<Item = N>,
) -> Node {
    not_in(left, list(items))
}

pub fn is_distinct_from(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    binary(BinaryOp::IsDistinctFrom, left, right)
}

pub fn is_not_distinct_from(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    binary(BinaryOp::IsNotDistinctFrom, left, right)
}

pub fn as_(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    binary(BinaryOp::As, left, right)
}

pub fn assign(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    binary(BinaryOp::Assignment, left, right)
}

/// `expr BETWEEN low AND high`
pub fn between(expr: impl Into<NodeRef>, low: impl Into<NodeRef>, high: impl Into<NodeRef>) -> Node {
    binary(BinaryOp::Between, expr, and(vec![arc(low), arc(high)]))
}

fn statement_ref(stmt: impl Into<NodeRef>) -> NodeRef {
    arc(stmt)
}

pub fn union(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    binary(BinaryOp::Union, statement_ref(left), statement_ref(right))
}

pub fn union_all(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    binary(BinaryOp::UnionAll, statement_ref(left), statement_ref(right))
}

pub fn intersect(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    binary(BinaryOp::Intersect, statement_ref(left), statement_ref(right))
}

pub fn except(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    binary(BinaryOp::Except, statement_ref(left), statement_ref(right))
}

pub fn when(condition: impl Into<NodeRef>, result: impl Into<NodeRef>) -> Node {
    binary(BinaryOp::When, condition, result)
}

pub fn else_(result: impl Into<NodeRef>) -> Node {
    unary(UnaryOp::Else, result)
}

/// `aggregate FILTER (WHERE predicate)`
pub fn filter(aggregate: impl Into<NodeRef>, predicate: impl Into<NodeRef>) -> Node {
    binary(BinaryOp::Filter, aggregate, predicate)
}

pub fn matches(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    Node::Matches(Matches {
        left: arc(left),
        right: arc(right),
        escape: None,
        case_sensitive: false,
        negated: false,
    })
}

pub fn does_not_match(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    Node::Matches(Matches {
        left: arc(left),
        right: arc(right),
        escape: None,
        case_sensitive: false,
        negated: true,
    })
}

/// Full-control `LIKE` builder.
pub fn matches_with(
    left: impl Into<NodeRef>,
    right: impl Into<NodeRef>,
    escape: Option<Node>,
    case_sensitive: bool,
    negated: bool,
) -> Node {
    Node::Matches(Matches {
        left: arc(left),
        right: arc(right),
        escape: escape.map(Arc::new),
        case_sensitive,
        negated,
    })
}

pub fn regexp(left: impl Into<NodeRef>, right: impl Into<NodeRef>, case_sensitive: bool) -> Node {
    Node::Regexp(Regexp {
        left: arc(left),
        right: arc(right),
        case_sensitive,
        negated: false,
    })
}

pub fn not_regexp(left: impl Into<NodeRef>, right: impl Into<NodeRef>, case_sensitive: bool) -> Node {
    Node::Regexp(Regexp {
        left: arc(left),
        right: arc(right),
        case_sensitive,
        negated: true,
    })
}

pub fn infix(op: InfixOp, left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    Node::Infix(Infix {
        op,
        left: arc(left),
        right: arc(right),
    })
}

pub fn concat(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    infix(InfixOp::Concat, left, right)
}

pub fn contains(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    infix(InfixOp::Contains, left, right)
}

pub fn overlaps(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    infix(InfixOp::Overlaps, left, right)
}

pub fn add(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    infix(InfixOp::Addition, left, right)
}

pub fn subtract(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    infix(InfixOp::Subtraction, left, right)
}

pub fn multiply(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    infix(InfixOp::Multiplication, left, right)
}

pub fn divide(left: impl Into<NodeRef>, right: impl Into<NodeRef>) -> Node {
    infix(InfixOp::Division, left, right)
}

// ----- N-ary -----

pub fn and<N: Into<NodeRef>>(children: impl IntoIterator<Item = N>) -> Node {
    Node::And(arcs(children))
}

pub fn or<N: Into<NodeRef>>(children: impl IntoIterator<Item = N>) -> Node {
    Node::Or(arcs(children))
}

// ----- Joins -----

pub fn join(kind: JoinKind, relation: impl Into<NodeRef>, constraint: Option<Node>) -> Node {
    Node::Join(Join {
        kind,
        left: arc(relation),
        right: constraint.map(|c| Arc::new(on(c))),
    })
}

pub fn inner_join(relation: impl Into<NodeRef>, constraint: impl Into<NodeRef>) -> Node {
    Node::Join(Join {
        kind: JoinKind::Inner,
        left: arc(relation),
        right: Some(Arc::new(on(constraint))),
    })
}

pub fn outer_join(relation: impl Into<NodeRef>, constraint: impl Into<NodeRef>) -> Node {
    Node::Join(Join {
        kind: JoinKind::LeftOuter,
        left: arc(relation),
        right: Some(Arc::new(on(constraint))),
    })
}

/// A join given as raw SQL text.
pub fn string_join(text: impl Into<String>) -> Node {
    Node::Join(Join {
        kind: JoinKind::String,
        left: Arc::new(sql(text)),
        right: None,
    })
}

pub fn join_source(left: impl Into<NodeRef>, joins: Vec<Node>) -> Node {
    Node::JoinSource(JoinSource {
        left: Some(arc(left)),
        right: arcs(joins),
    })
}

// ----- Functions -----

fn function(kind: FunctionKind, expressions: Vec<Node>, distinct: bool) -> Function {
    Function {
        kind,
        expressions: arcs(expressions),
        distinct,
        alias: None,
    }
}

pub fn count(expressions: Vec<Node>) -> Node {
    Node::Function(function(FunctionKind::Count, expressions, false))
}

pub fn count_distinct(expressions: Vec<Node>) -> Node {
    Node::Function(function(FunctionKind::Count, expressions, true))
}

pub fn sum(expressions: Vec<Node>) -> Node {
    Node::Function(function(FunctionKind::Sum, expressions, false))
}

pub fn max(expressions: Vec<Node>) -> Node {
    Node::Function(function(FunctionKind::Max, expressions, false))
}

pub fn min(expressions: Vec<Node>) -> Node {
    Node::Function(function(FunctionKind::Min, expressions, false))
}

pub fn avg(expressions: Vec<Node>) -> Node {
    Node::Function(function(FunctionKind::Avg, expressions, false))
}

pub fn named_function(name: impl Into<String>, expressions: Vec<Node>) -> Node {
    Node::Function(function(FunctionKind::Named(name.into()), expressions, false))
}

/// Attach an alias to an aggregate or named function node.
pub fn aliased(function: Node, alias: impl Into<String>) -> Node {
    match function {
        Node::Function(f) => Node::Function(f.alias(alias)),
        other => as_(other, sql(alias)),
    }
}

pub fn exists(expr: impl Into<NodeRef>) -> Node {
    Node::Exists(Exists {
        expr: arc(expr),
        alias: None,
    })
}

pub fn over(expr: impl Into<NodeRef>, window: Option<Node>) -> Node {
    Node::Over(Over {
        left: arc(expr),
        right: window.map(Arc::new),
    })
}

pub fn case(subject: Option<Node>, conditions: Vec<Node>, default: Option<Node>) -> Node {
    Node::Case(Case {
        case: subject.map(Arc::new),
        conditions: arcs(conditions),
        default: default.map(|d| Arc::new(else_(d))),
    })
}

// ----- Windows -----

impl Window {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn partition(mut self, expr: impl Into<NodeRef>) -> Self {
        self.partitions.push(expr.into());
        self
    }

    pub fn order(mut self, expr: impl Into<NodeRef>) -> Self {
        self.orders.push(expr.into());
        self
    }

    pub fn frame(mut self, framing: Node) -> Self {
        self.framing = Some(Arc::new(framing));
        self
    }

    pub fn node(self) -> Node {
        Node::Window(self)
    }
}

// ----- CTEs -----

pub fn cte(name: impl Into<String>, relation: impl Into<NodeRef>, materialized: Option<bool>) -> Node {
    Node::Cte(Cte {
        name: name.into(),
        relation: arc(relation),
        materialized,
    })
}

pub fn with(children: Vec<Node>) -> Node {
    Node::With(With {
        recursive: false,
        children: arcs(children),
    })
}

pub fn with_recursive(children: Vec<Node>) -> Node {
    Node::With(With {
        recursive: true,
        children: arcs(children),
    })
}

impl From<SelectStatement> for Node {
    fn from(stmt: SelectStatement) -> Self {
        Node::SelectStatement(stmt)
    }
}

impl From<SelectStatement> for NodeRef {
    fn from(stmt: SelectStatement) -> Self {
        Arc::new(Node::SelectStatement(stmt))
    }
}

impl From<Table> for Node {
    fn from(table: Table) -> Self {
        Node::Table(table)
    }
}

impl From<Table> for NodeRef {
    fn from(table: Table) -> Self {
        Arc::new(Node::Table(table))
    }
}
