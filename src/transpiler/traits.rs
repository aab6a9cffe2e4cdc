//! The generator trait every dialect implements, and the base render table.
//!
//! Rendering rules live in free functions generic over `G: SqlGenerator`, so
//! a dialect that overrides a rule can still call the base rule for the cases
//! it does not change.

use std::borrow::Cow;

use crate::ast::{
    Binary, DeleteStatement, Kind, ModifyParts, Node, NodeRef, SelectCore, SelectStatement,
    UpdateStatement, Value,
};
use crate::collector::{Collector, Compiled, Placeholder};
use crate::error::{CompileError, CompileResult};
use crate::quoting::Quoting;

use super::dispatch::{self, Visitor};
use super::dml::{cte, delete, insert, select, update, window};
use super::{bound_sql, conditions, expressions, joins};

/// Per-generator settings supplied by configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Split `IN` lists longer than this into several groups.
    pub in_clause_length: Option<usize>,
}

fn question_mark(_index: usize) -> String {
    "?".to_string()
}

/// Trait for dialect-specific SQL generation.
///
/// Only [`Visitor::name`], [`Visitor::handles`], `quoting` and `options` are
/// required; everything else defaults to the ANSI rendering.
pub trait SqlGenerator: Visitor + Send + Sync {
    /// Identifier and literal quoting for the target database.
    fn quoting(&self) -> &dyn Quoting;

    fn options(&self) -> &GeneratorOptions;

    /// Spelling of the bind placeholder at a 1-based position.
    fn bind_placeholder(&self) -> Placeholder {
        question_mark
    }

    fn in_clause_length(&self) -> Option<usize> {
        self.options().in_clause_length
    }

    fn quote_table_name(&self, name: &str) -> String {
        self.quoting().quote_table_name(name)
    }

    fn quote_column_name(&self, name: &str) -> String {
        self.quoting().quote_column_name(name)
    }

    fn quote(&self, value: &Value) -> String {
        self.quoting().quote(value)
    }

    fn sanitize_as_sql_comment(&self, comment: &str) -> String {
        self.quoting().sanitize_as_sql_comment(comment)
    }

    /// Visit a node through the dispatcher.
    fn visit(&self, node: &Node, out: &mut Collector<'_>) -> CompileResult<()> {
        let handler = dispatch::resolve(self, node.kind())?;
        self.visit_kind(handler, node, out)
    }

    /// Run the rule registered for `handler`. Dialects override this to
    /// intercept the kinds they render differently.
    fn visit_kind(&self, handler: Kind, node: &Node, out: &mut Collector<'_>) -> CompileResult<()> {
        render(self, handler, node, out)
    }

    /// The comparison used by `IS [NOT] DISTINCT FROM`, yielding 0 or 1.
    fn is_distinct_from(&self, o: &Binary, out: &mut Collector<'_>) -> CompileResult<()> {
        conditions::is_distinct_from(self, o, out)
    }

    fn visit_select_options(&self, o: &SelectStatement, out: &mut Collector<'_>) -> CompileResult<()> {
        select::visit_select_options(self, o, out)
    }

    fn collect_optimizer_hints(&self, o: &SelectCore, out: &mut Collector<'_>) -> CompileResult<()> {
        maybe_visit(self, o.optimizer_hints.as_ref(), out)
    }

    fn prepare_update_statement<'a>(&self, o: &'a UpdateStatement) -> Cow<'a, UpdateStatement> {
        update::prepare_update_statement(self, o)
    }

    fn prepare_delete_statement<'a>(&self, o: &'a DeleteStatement) -> Cow<'a, DeleteStatement> {
        delete::prepare_delete_statement(self, o)
    }

    /// The `SELECT key FROM ...` used when rewriting UPDATE/DELETE.
    fn build_subselect(&self, key: &NodeRef, o: &ModifyParts) -> SelectStatement {
        update::build_subselect(key, o)
    }

    /// Compile a tree into SQL text and its binds.
    fn compile(&self, node: &Node) -> CompileResult<Compiled> {
        let mut out = Collector::new();
        self.visit(node, &mut out)?;
        let compiled = out.finish();
        tracing::debug!(
            dialect = self.name(),
            sql_len = compiled.sql.len(),
            binds = compiled.binds.len(),
            preparable = compiled.preparable,
            retryable = compiled.retryable,
            "compiled statement"
        );
        Ok(compiled)
    }

    /// Compile with every bind quoted inline.
    fn compile_substituted(&self, node: &Node) -> CompileResult<Compiled> {
        let mut out = Collector::substituting(self.quoting());
        self.visit(node, &mut out)?;
        Ok(out.finish())
    }
}

/// Kinds with a rule in the base renderer.
pub fn handles(kind: Kind) -> bool {
    use Kind::*;
    matches!(
        kind,
        Table
            | TableAlias
            | Attribute
            | UnqualifiedColumn
            | SqlLiteral
            | BoundSqlLiteral
            | BindParam
            | Quoted
            | Casted
            | Integer
            | True
            | False
            | Distinct
            | CurrentRow
            | List
            | Fragments
            | ValuesList
            | HomogeneousIn
            | Comment
            | OptimizerHints
            | Not
            | Grouping
            | Ascending
            | Descending
            | NullsFirst
            | NullsLast
            | Offset
            | Limit
            | On
            | Having
            | Group
            | Lock
            | Lateral
            | Cube
            | RollUp
            | GroupingSet
            | GroupingElement
            | DistinctOn
            | Else
            | Bin
            | Extract
            | Preceding
            | Following
            | Rows
            | Range
            | UnaryOperation
            | With
            | WithRecursive
            | Equality
            | NotEqual
            | GreaterThan
            | GreaterThanOrEqual
            | LessThan
            | LessThanOrEqual
            | In
            | NotIn
            | IsDistinctFrom
            | IsNotDistinctFrom
            | As
            | Assignment
            | Between
            | Union
            | UnionAll
            | Intersect
            | Except
            | When
            | Filter
            | Matches
            | DoesNotMatch
            | Regexp
            | NotRegexp
            | InfixOperation
            | InnerJoin
            | OuterJoin
            | FullOuterJoin
            | RightOuterJoin
            | StringJoin
            | JoinSource
            | Over
            | Cte
            | And
            | Or
            | Function
            | Exists
            | Case
            | Window
            | NamedWindow
            | SelectStatement
            | SelectCore
            | InsertStatement
            | UpdateStatement
            | DeleteStatement
    )
}

/// The base rule table. A handler kind paired with a node of another shape is
/// an unsupported visit.
pub fn render<G: SqlGenerator + ?Sized>(
    g: &G,
    handler: Kind,
    node: &Node,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    use std::cmp::Ordering::{Greater, Less};

    match (handler, node) {
        // ----- Leaves -----
        (Kind::Table, Node::Table(o)) => expressions::visit_table(g, o, out),
        (Kind::TableAlias, Node::TableAlias(o)) => expressions::visit_table_alias(g, o, out),
        (Kind::Attribute, Node::Attribute(o)) => expressions::visit_attribute(g, o, out),
        (Kind::UnqualifiedColumn, Node::UnqualifiedColumn(name)) => {
            out.append(&g.quote_column_name(name));
            Ok(())
        }
        (Kind::SqlLiteral, Node::SqlLiteral(o)) => expressions::visit_sql_literal(o, out),
        (Kind::BoundSqlLiteral, Node::BoundSqlLiteral(o)) => {
            bound_sql::visit_bound_sql_literal(g, o, out)
        }
        (Kind::BindParam, Node::BindParam(o)) => {
            out.add_bind(o.value.clone(), g.bind_placeholder());
            Ok(())
        }
        (Kind::Quoted, Node::Quoted(value)) => {
            out.append(&g.quote(value));
            Ok(())
        }
        (Kind::Casted, Node::Casted(o)) => {
            out.append(&g.quote(&o.value));
            Ok(())
        }
        (Kind::Integer, Node::Value(Value::Int(n))) => {
            out.append(&n.to_string());
            Ok(())
        }
        (Kind::True, Node::True) => append(out, "TRUE"),
        (Kind::False, Node::False) => append(out, "FALSE"),
        (Kind::Distinct, Node::Distinct) => append(out, "DISTINCT"),
        (Kind::CurrentRow, Node::CurrentRow) => append(out, "CURRENT ROW"),
        (Kind::List, Node::List(items)) => inject_join(g, items, ", ", out),
        (Kind::Fragments, Node::Fragments(items)) => inject_join(g, items, " ", out),
        (Kind::ValuesList, Node::ValuesList(rows)) => expressions::visit_values_list(g, rows, out),
        (Kind::HomogeneousIn, Node::HomogeneousIn(o)) => {
            conditions::visit_homogeneous_in(g, o, out)
        }
        (Kind::Comment, Node::Comment(values)) => expressions::visit_comment(g, values, out),
        (Kind::OptimizerHints, Node::OptimizerHints(hints)) => {
            expressions::visit_optimizer_hints(g, hints, out)
        }

        // ----- Unary -----
        (Kind::Not, Node::Unary(o)) => {
            out.append("NOT (");
            g.visit(&o.expr, out)?;
            append(out, ")")
        }
        (Kind::Grouping, Node::Unary(o)) => conditions::visit_grouping(g, o, out),
        (Kind::Ascending, Node::Unary(o)) => postfix(g, &o.expr, " ASC", out),
        (Kind::Descending, Node::Unary(o)) => postfix(g, &o.expr, " DESC", out),
        (Kind::NullsFirst, Node::Unary(o)) => postfix(g, &o.expr, " NULLS FIRST", out),
        (Kind::NullsLast, Node::Unary(o)) => postfix(g, &o.expr, " NULLS LAST", out),
        (Kind::Offset, Node::Unary(o)) => select::visit_offset(g, o, out),
        (Kind::Limit, Node::Unary(o)) => select::visit_limit(g, o, out),
        (Kind::On, Node::Unary(o)) => prefix(g, "ON ", &o.expr, out),
        (Kind::Having, Node::Unary(o)) => prefix(g, "HAVING ", &o.expr, out),
        (Kind::Group | Kind::Lock | Kind::Bin, Node::Unary(o)) => g.visit(&o.expr, out),
        (Kind::Lateral, Node::Unary(o)) => {
            out.append("LATERAL ");
            grouping_parentheses(g, &o.expr, true, out)
        }
        (Kind::Cube, Node::Unary(o)) => expressions::visit_grouping_set(g, "CUBE", o, out),
        (Kind::RollUp, Node::Unary(o)) => expressions::visit_grouping_set(g, "ROLLUP", o, out),
        (Kind::GroupingSet, Node::Unary(o)) => {
            expressions::visit_grouping_set(g, "GROUPING SETS", o, out)
        }
        (Kind::GroupingElement, Node::Unary(o)) => {
            out.append("( ");
            g.visit(&o.expr, out)?;
            append(out, " )")
        }
        (Kind::DistinctOn, Node::Unary(_)) => {
            Err(CompileError::not_implemented("DISTINCT ON", g.name()))
        }
        (Kind::Else, Node::Unary(o)) => prefix(g, "ELSE ", &o.expr, out),
        (Kind::Extract, Node::Extract(o)) => {
            out.append("EXTRACT(").append(&o.field.to_uppercase()).append(" FROM ");
            g.visit(&o.expr, out)?;
            append(out, ")")
        }
        (Kind::Preceding | Kind::Following | Kind::Rows | Kind::Range, Node::Frame(o)) => {
            window::visit_frame(g, o, out)
        }
        (Kind::UnaryOperation, Node::UnaryOperation(o)) => {
            out.append(" ").append(o.op.operator()).append(" ");
            g.visit(&o.expr, out)
        }
        (Kind::With | Kind::WithRecursive, Node::With(o)) => cte::visit_with(g, o, out),

        // ----- Binary -----
        (Kind::Equality, Node::Binary(o)) => conditions::visit_equality(g, o, out),
        (Kind::NotEqual, Node::Binary(o)) => conditions::visit_not_equal(g, o, out),
        (Kind::GreaterThan, Node::Binary(o)) => {
            conditions::visit_comparison(g, o, " > ", Greater, out)
        }
        (Kind::GreaterThanOrEqual, Node::Binary(o)) => {
            conditions::visit_comparison(g, o, " >= ", Greater, out)
        }
        (Kind::LessThan, Node::Binary(o)) => conditions::visit_comparison(g, o, " < ", Less, out),
        (Kind::LessThanOrEqual, Node::Binary(o)) => {
            conditions::visit_comparison(g, o, " <= ", Less, out)
        }
        (Kind::In, Node::Binary(o)) => conditions::visit_in(g, o, false, out),
        (Kind::NotIn, Node::Binary(o)) => conditions::visit_in(g, o, true, out),
        (Kind::IsDistinctFrom, Node::Binary(o)) => conditions::visit_is_distinct_from(g, o, out),
        (Kind::IsNotDistinctFrom, Node::Binary(o)) => {
            conditions::visit_is_not_distinct_from(g, o, out)
        }
        (Kind::As, Node::Binary(o)) => infix_value(g, &o.left, " AS ", &o.right, out),
        (Kind::Assignment, Node::Binary(o)) => expressions::visit_assignment(g, o, out),
        (Kind::Between, Node::Binary(o)) => infix_value(g, &o.left, " BETWEEN ", &o.right, out),
        (Kind::Union, Node::Binary(o)) => select::visit_set_operation(g, o, " UNION ", out),
        (Kind::UnionAll, Node::Binary(o)) => select::visit_set_operation(g, o, " UNION ALL ", out),
        (Kind::Intersect, Node::Binary(o)) => select::visit_set_operation(g, o, " INTERSECT ", out),
        (Kind::Except, Node::Binary(o)) => select::visit_set_operation(g, o, " EXCEPT ", out),
        (Kind::When, Node::Binary(o)) => {
            out.append("WHEN ");
            infix_value(g, &o.left, " THEN ", &o.right, out)
        }
        (Kind::Filter, Node::Binary(o)) => {
            infix_value(g, &o.left, " FILTER (WHERE ", &o.right, out)?;
            append(out, ")")
        }
        (Kind::Matches | Kind::DoesNotMatch, Node::Matches(o)) => {
            conditions::visit_matches(g, o, out)
        }
        (Kind::Regexp, Node::Regexp(_)) => Err(CompileError::not_implemented("~", g.name())),
        (Kind::NotRegexp, Node::Regexp(_)) => Err(CompileError::not_implemented("!~", g.name())),
        (Kind::InfixOperation, Node::Infix(o)) => {
            let op = format!(" {} ", o.op.operator());
            infix_value(g, &o.left, &op, &o.right, out)
        }
        (
            Kind::InnerJoin
            | Kind::OuterJoin
            | Kind::FullOuterJoin
            | Kind::RightOuterJoin
            | Kind::StringJoin,
            Node::Join(o),
        ) => joins::visit_join(g, o, out),
        (Kind::JoinSource, Node::JoinSource(o)) => joins::visit_join_source(g, o, out),
        (Kind::Over, Node::Over(o)) => window::visit_over(g, o, out),
        (Kind::Cte, Node::Cte(o)) => cte::visit_cte(g, o, out),

        // ----- N-ary -----
        (Kind::And, Node::And(children)) => inject_join(g, children, " AND ", out),
        (Kind::Or, Node::Or(children)) => inject_join(g, children, " OR ", out),

        // ----- Functions -----
        (Kind::Function, Node::Function(o)) => expressions::visit_function(g, o, out),
        (Kind::Exists, Node::Exists(o)) => expressions::visit_exists(g, o, out),
        (Kind::Case, Node::Case(o)) => expressions::visit_case(g, o, out),
        (Kind::Window, Node::Window(o)) => window::visit_window(g, o, out),
        (Kind::NamedWindow, Node::Window(o)) => window::visit_named_window(g, o, out),

        // ----- Statements -----
        (Kind::SelectStatement, Node::SelectStatement(o)) => {
            select::visit_select_statement(g, o, out)
        }
        (Kind::SelectCore, Node::SelectCore(o)) => select::visit_select_core(g, o, out),
        (Kind::InsertStatement, Node::InsertStatement(o)) => {
            insert::visit_insert_statement(g, o, out)
        }
        (Kind::UpdateStatement, Node::UpdateStatement(o)) => {
            update::visit_update_statement(g, o, out)
        }
        (Kind::DeleteStatement, Node::DeleteStatement(o)) => {
            delete::visit_delete_statement(g, o, out)
        }

        _ => Err(CompileError::UnsupportedVisit(node.kind())),
    }
}

// ----- Shared helpers -----

fn append(out: &mut Collector<'_>, text: &str) -> CompileResult<()> {
    out.append(text);
    Ok(())
}

fn prefix<G: SqlGenerator + ?Sized>(
    g: &G,
    text: &str,
    expr: &Node,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    out.append(text);
    g.visit(expr, out)
}

fn postfix<G: SqlGenerator + ?Sized>(
    g: &G,
    expr: &Node,
    text: &str,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    g.visit(expr, out)?;
    append(out, text)
}

/// `left <op> right`
pub fn infix_value<G: SqlGenerator + ?Sized>(
    g: &G,
    left: &Node,
    op: &str,
    right: &Node,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    g.visit(left, out)?;
    out.append(op);
    g.visit(right, out)
}

/// Visit each node, separated by `separator`.
pub fn inject_join<G: SqlGenerator + ?Sized>(
    g: &G,
    nodes: &[NodeRef],
    separator: &str,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            out.append(separator);
        }
        g.visit(node, out)?;
    }
    Ok(())
}

/// `" " + node`, or nothing.
pub fn maybe_visit<G: SqlGenerator + ?Sized>(
    g: &G,
    node: Option<&NodeRef>,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    if let Some(node) = node {
        out.append(" ");
        g.visit(node, out)?;
    }
    Ok(())
}

/// `spacer + nodes joined by connector`, or nothing for an empty slice.
pub fn collect_nodes_for<G: SqlGenerator + ?Sized>(
    g: &G,
    nodes: &[NodeRef],
    spacer: &str,
    connector: &str,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    if nodes.is_empty() {
        return Ok(());
    }
    out.append(spacer);
    inject_join(g, nodes, connector, out)
}

/// Parenthesise a select used as an operand when it needs it.
pub fn grouping_parentheses<G: SqlGenerator + ?Sized>(
    g: &G,
    node: &Node,
    always_wrap_selects: bool,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    match node {
        Node::SelectStatement(stmt) if always_wrap_selects || stmt.requires_parentheses() => {
            out.append("(");
            g.visit(node, out)?;
            append(out, ")")
        }
        _ => g.visit(node, out),
    }
}
