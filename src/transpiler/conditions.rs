//! Predicate rendering: comparisons, IN lists, LIKE and distinct-from.
//!
//! Comparisons against an unboundable bind collapse to `1=0` / `1=1` without
//! emitting the bind. `IN` over an explicit list marks the statement as not
//! preparable, since its shape depends on the list length.

use std::cmp::Ordering;

use crate::ast::{Binary, HomogeneousIn, Matches, Node, NodeRef, Unary, UnaryOp, Unboundable, Value};
use crate::collector::Collector;
use crate::error::CompileResult;

use super::traits::{inject_join, SqlGenerator};

pub fn visit_grouping<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Unary,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    if let Node::Unary(Unary {
        op: UnaryOp::Grouping,
        ..
    }) = o.expr.as_ref()
    {
        return g.visit(&o.expr, out);
    }
    out.append("(");
    g.visit(&o.expr, out)?;
    out.append(")");
    Ok(())
}

pub fn visit_equality<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Binary,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    if o.right.unboundable().is_some() {
        out.append("1=0");
        return Ok(());
    }
    g.visit(&o.left, out)?;
    if o.right.is_null() {
        out.append(" IS NULL");
        Ok(())
    } else {
        out.append(" = ");
        g.visit(&o.right, out)
    }
}

pub fn visit_not_equal<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Binary,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    if o.right.unboundable().is_some() {
        out.append("1=1");
        return Ok(());
    }
    g.visit(&o.left, out)?;
    if o.right.is_null() {
        out.append(" IS NOT NULL");
        Ok(())
    } else {
        out.append(" != ");
        g.visit(&o.right, out)
    }
}

/// An ordering comparison. A right side that is out of range in the
/// `never_true` direction makes the predicate `1=0`; the other direction `1=1`.
pub fn visit_comparison<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Binary,
    op: &str,
    never_true: Ordering,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    match o.right.unboundable() {
        Some(direction) if direction == never_true => {
            out.append("1=0");
            Ok(())
        }
        Some(_) => {
            out.append("1=1");
            Ok(())
        }
        None => {
            g.visit(&o.left, out)?;
            out.append(op);
            g.visit(&o.right, out)
        }
    }
}

/// `IN` / `NOT IN`, sliced into groups when the generator caps list length.
pub fn visit_in<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Binary,
    negated: bool,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    let (tautology, op, joiner) = if negated {
        ("1=1", " NOT IN (", " AND ")
    } else {
        ("1=0", " IN (", " OR ")
    };

    let Node::List(items) = o.right.as_ref() else {
        g.visit(&o.left, out)?;
        out.append(op);
        g.visit(&o.right, out)?;
        out.append(")");
        return Ok(());
    };

    out.preparable = false;
    let values: Vec<NodeRef> = items
        .iter()
        .filter(|v| v.unboundable().is_none())
        .cloned()
        .collect();
    if values.is_empty() {
        out.append(tautology);
        return Ok(());
    }

    match g.in_clause_length() {
        Some(max) if max > 0 && values.len() > max => {
            tracing::debug!(
                dialect = g.name(),
                values = values.len(),
                max,
                "slicing IN list"
            );
            out.append("(");
            for (i, chunk) in values.chunks(max).enumerate() {
                if i > 0 {
                    out.append(joiner);
                }
                g.visit(&o.left, out)?;
                out.append(op);
                inject_join(g, chunk, ", ", out)?;
                out.append(")");
            }
            out.append(")");
        }
        _ => {
            g.visit(&o.left, out)?;
            out.append(op);
            inject_join(g, &values, ", ", out)?;
            out.append(")");
        }
    }
    Ok(())
}

/// `CASE WHEN a = b OR (a IS NULL AND b IS NULL) THEN 0 ELSE 1 END`
pub fn is_distinct_from<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Binary,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    out.append("CASE WHEN ");
    g.visit(&o.left, out)?;
    out.append(" = ");
    g.visit(&o.right, out)?;
    out.append(" OR (");
    g.visit(&o.left, out)?;
    out.append(" IS NULL AND ");
    g.visit(&o.right, out)?;
    out.append(" IS NULL) THEN 0 ELSE 1 END");
    Ok(())
}

pub fn visit_is_not_distinct_from<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Binary,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    if o.right.is_null() {
        g.visit(&o.left, out)?;
        out.append(" IS NULL");
    } else {
        g.is_distinct_from(o, out)?;
        out.append(" = 0");
    }
    Ok(())
}

pub fn visit_is_distinct_from<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Binary,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    if o.right.is_null() {
        g.visit(&o.left, out)?;
        out.append(" IS NOT NULL");
    } else {
        g.is_distinct_from(o, out)?;
        out.append(" = 1");
    }
    Ok(())
}

/// Case-insensitivity is ignored here; dialects with `ILIKE` override this.
pub fn visit_matches<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Matches,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    let op = if o.negated { " NOT LIKE " } else { " LIKE " };
    visit_like(g, o, op, out)
}

/// `left <op> right [ESCAPE escape]`
pub fn visit_like<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Matches,
    op: &str,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    g.visit(&o.left, out)?;
    out.append(op);
    g.visit(&o.right, out)?;
    if let Some(escape) = &o.escape {
        out.append(" ESCAPE ");
        g.visit(escape, out)?;
    }
    Ok(())
}

/// A typed IN list bound as one batch. Values the column type cannot hold are
/// dropped; the rest are sliced like [`visit_in`] when the list is capped.
pub fn visit_homogeneous_in<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &HomogeneousIn,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    out.preparable = false;
    let (op, joiner) = if o.negated {
        (" NOT IN (", " AND ")
    } else {
        (" IN (", " OR ")
    };

    let values: Vec<Value> = match o.ty {
        Some(ty) => o
            .values
            .iter()
            .filter(|v| (ty, *v).unboundable().is_none())
            .cloned()
            .collect(),
        None => o.values.clone(),
    };

    if values.is_empty() {
        g.visit(&o.attribute, out)?;
        out.append(op).append(&g.quote(&Value::Null)).append(")");
        return Ok(());
    }

    let cast = o.ty.map(|ty| move |v: &Value| ty.cast(v));
    let project = cast.as_ref().map(|f| f as &dyn Fn(&Value) -> Value);
    match g.in_clause_length() {
        Some(max) if max > 0 && values.len() > max => {
            tracing::debug!(
                dialect = g.name(),
                values = values.len(),
                max,
                "slicing typed IN list"
            );
            out.append("(");
            for (i, chunk) in values.chunks(max).enumerate() {
                if i > 0 {
                    out.append(joiner);
                }
                g.visit(&o.attribute, out)?;
                out.append(op);
                out.add_binds(chunk, project, g.bind_placeholder());
                out.append(")");
            }
            out.append(")");
        }
        _ => {
            g.visit(&o.attribute, out)?;
            out.append(op);
            out.add_binds(&values, project, g.bind_placeholder());
            out.append(")");
        }
    }
    Ok(())
}
