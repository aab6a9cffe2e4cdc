//! Leaves, functions and other scalar expressions.

use crate::ast::{
    Attribute, Binary, Case, Exists, Function, Node, NodeRef, SqlLiteral, Table, TableAlias, Unary,
};
use crate::collector::Collector;
use crate::error::CompileResult;

use super::traits::{inject_join, SqlGenerator};

pub fn visit_table<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Table,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    out.append(&g.quote_table_name(&o.name));
    if let Some(alias) = &o.alias {
        out.append(" ").append(&g.quote_table_name(alias));
    }
    Ok(())
}

pub fn visit_table_alias<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &TableAlias,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    g.visit(&o.relation, out)?;
    out.append(" ").append(&g.quote_table_name(&o.name));
    Ok(())
}

pub fn visit_attribute<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Attribute,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    match o.relation.as_ref() {
        Node::Table(t) => {
            out.append(&g.quote_table_name(t.reference_name()));
        }
        Node::TableAlias(a) => {
            out.append(&g.quote_table_name(&a.name));
        }
        other => {
            g.visit(other, out)?;
        }
    }
    out.append(".").append(&g.quote_column_name(&o.name));
    Ok(())
}

pub fn visit_sql_literal(o: &SqlLiteral, out: &mut Collector<'_>) -> CompileResult<()> {
    out.preparable = false;
    out.retryable = out.retryable && o.retryable;
    out.append(&o.text);
    Ok(())
}

/// `VALUES (a, b), (c, d)`; raw values are quoted inline.
pub fn visit_values_list<G: SqlGenerator + ?Sized>(
    g: &G,
    rows: &[Vec<NodeRef>],
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    out.append("VALUES ");
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            out.append(", ");
        }
        out.append("(");
        for (j, value) in row.iter().enumerate() {
            if j > 0 {
                out.append(", ");
            }
            match value.as_ref() {
                Node::Value(v) => {
                    out.append(&g.quote(v));
                }
                node => g.visit(node, out)?,
            }
        }
        out.append(")");
    }
    Ok(())
}

pub fn visit_comment<G: SqlGenerator + ?Sized>(
    g: &G,
    values: &[String],
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    let rendered: Vec<String> = values
        .iter()
        .map(|v| format!("/* {} */", g.sanitize_as_sql_comment(v)))
        .collect();
    out.append(&rendered.join(" "));
    Ok(())
}

pub fn visit_optimizer_hints<G: SqlGenerator + ?Sized>(
    g: &G,
    hints: &[String],
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    let hints: Vec<String> = hints.iter().map(|h| g.sanitize_as_sql_comment(h)).collect();
    out.append("/*+ ").append(&hints.join(" ")).append(" */");
    Ok(())
}

/// `NAME( list )` for a list argument, otherwise `NAME` followed by the expression.
pub fn visit_grouping_set<G: SqlGenerator + ?Sized>(
    g: &G,
    name: &str,
    o: &Unary,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    out.append(name);
    if let Node::List(_) = o.expr.as_ref() {
        out.append("( ");
        g.visit(&o.expr, out)?;
        out.append(" )");
        Ok(())
    } else {
        g.visit(&o.expr, out)
    }
}

/// `left = right`; a raw value on the right is quoted inline.
pub fn visit_assignment<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Binary,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    g.visit(&o.left, out)?;
    out.append(" = ");
    match o.right.as_ref() {
        Node::Value(v) => {
            out.append(&g.quote(v));
            Ok(())
        }
        right => g.visit(right, out),
    }
}

pub fn visit_function<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Function,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    out.append(o.kind.name()).append("(");
    if o.distinct {
        out.append("DISTINCT ");
    }
    inject_join(g, &o.expressions, ", ", out)?;
    out.append(")");
    if let Some(alias) = &o.alias {
        out.append(" AS ");
        g.visit(alias, out)?;
    }
    Ok(())
}

pub fn visit_exists<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Exists,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    out.append("EXISTS (");
    g.visit(&o.expr, out)?;
    out.append(")");
    if let Some(alias) = &o.alias {
        out.append(" AS ");
        g.visit(alias, out)?;
    }
    Ok(())
}

pub fn visit_case<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Case,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    out.append("CASE ");
    if let Some(subject) = &o.case {
        g.visit(subject, out)?;
        out.append(" ");
    }
    for condition in &o.conditions {
        g.visit(condition, out)?;
        out.append(" ");
    }
    if let Some(default) = &o.default {
        g.visit(default, out)?;
        out.append(" ");
    }
    out.append("END");
    Ok(())
}
