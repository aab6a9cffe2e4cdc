//! SELECT statements, cores, options and set operations.

use crate::ast::{Binary, BinaryOp, Node, SelectCore, SelectStatement, Unary, Value};
use crate::collector::Collector;
use crate::error::{CompileError, CompileResult};
use crate::transpiler::traits::{collect_nodes_for, grouping_parentheses, maybe_visit, SqlGenerator};

/// `[WITH ...] cores [ORDER BY ...] options`
pub fn visit_select_statement<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &SelectStatement,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    check_cores(o)?;
    if let Some(with) = &o.with {
        g.visit(with, out)?;
        out.append(" ");
    }
    for core in &o.cores {
        g.visit(core, out)?;
    }
    collect_nodes_for(g, &o.orders, " ORDER BY ", ", ", out)?;
    g.visit_select_options(o, out)
}

/// Limit, offset and lock, in that order.
pub fn visit_select_options<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &SelectStatement,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    maybe_visit(g, o.limit.as_ref(), out)?;
    maybe_visit(g, o.offset.as_ref(), out)?;
    maybe_visit(g, o.lock.as_ref(), out)
}

pub fn visit_select_core<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &SelectCore,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    out.append("SELECT");
    g.collect_optimizer_hints(o, out)?;
    maybe_visit(g, o.set_quantifier.as_ref(), out)?;

    if o.projections.is_empty() {
        out.append(" *");
    } else {
        collect_nodes_for(g, &o.projections, " ", ", ", out)?;
    }

    if o.has_source() {
        if let Some(source) = &o.source {
            out.append(" FROM ");
            g.visit(source, out)?;
        }
    }

    collect_nodes_for(g, &o.wheres, " WHERE ", " AND ", out)?;
    collect_nodes_for(g, &o.groups, " GROUP BY ", ", ", out)?;
    collect_nodes_for(g, &o.havings, " HAVING ", " AND ", out)?;
    collect_nodes_for(g, &o.windows, " WINDOW ", ", ", out)?;
    maybe_visit(g, o.comment.as_ref(), out)
}

/// A statement needs at least one core, and every core must be a `SelectCore`.
pub fn check_cores(o: &SelectStatement) -> CompileResult<()> {
    if o.cores.is_empty() {
        return Err(CompileError::InvalidValue(
            "SELECT statement has no cores".to_string(),
        ));
    }
    match o.cores.iter().find(|c| c.as_core().is_none()) {
        Some(other) => Err(CompileError::InvalidValue(format!(
            "SELECT statement core must be a SelectCore, got {}",
            other.kind()
        ))),
        None => Ok(()),
    }
}

/// Reject a literal negative pagination bound.
pub fn check_non_negative(expr: &Node, clause: &str) -> CompileResult<()> {
    match expr {
        Node::Value(Value::Int(n)) | Node::Quoted(Value::Int(n)) if *n < 0 => Err(
            CompileError::InvalidValue(format!("{} must be non-negative, got {}", clause, n)),
        ),
        _ => Ok(()),
    }
}

pub fn visit_limit<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Unary,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    check_non_negative(&o.expr, "LIMIT")?;
    out.append("LIMIT ");
    g.visit(&o.expr, out)
}

pub fn visit_offset<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Unary,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    check_non_negative(&o.expr, "OFFSET")?;
    out.append("OFFSET ");
    g.visit(&o.expr, out)
}

/// `( left <op> right )`. Chains nest, one pair of parentheses per operation.
pub fn visit_set_operation<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Binary,
    op: &str,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    out.append("( ");
    grouping_parentheses(g, &o.left, false, out)?;
    out.append(op);
    grouping_parentheses(g, &o.right, false, out)?;
    out.append(" )");
    Ok(())
}

/// `( a <op> b <op> c )`: operands of the same operation are spliced into one
/// pair of parentheses. `wrap_operands` controls whether ordered or limited
/// selects get their own parentheses.
pub fn visit_flat_set_operation<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Binary,
    op: &str,
    wrap_operands: bool,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    out.append("( ");
    flat_operand(g, &o.left, o.op, op, wrap_operands, out)?;
    out.append(op);
    flat_operand(g, &o.right, o.op, op, wrap_operands, out)?;
    out.append(" )");
    Ok(())
}

fn flat_operand<G: SqlGenerator + ?Sized>(
    g: &G,
    node: &Node,
    kind: BinaryOp,
    op: &str,
    wrap_operands: bool,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    match node {
        Node::Binary(inner) if inner.op == kind => {
            flat_operand(g, &inner.left, kind, op, wrap_operands, out)?;
            out.append(op);
            flat_operand(g, &inner.right, kind, op, wrap_operands, out)
        }
        other if wrap_operands => grouping_parentheses(g, other, false, out),
        other => g.visit(other, out),
    }
}
