//! Window definitions, frames and `OVER`.

use crate::ast::{Frame, FrameKind, Node, Over, Window};
use crate::collector::Collector;
use crate::error::CompileResult;
use crate::transpiler::traits::{inject_join, SqlGenerator};

/// `(PARTITION BY ... ORDER BY ... <framing>)`
pub fn visit_window<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Window,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    out.append("(");
    if !o.partitions.is_empty() {
        out.append("PARTITION BY ");
        inject_join(g, &o.partitions, ", ", out)?;
    }
    if !o.orders.is_empty() {
        if !o.partitions.is_empty() {
            out.append(" ");
        }
        out.append("ORDER BY ");
        inject_join(g, &o.orders, ", ", out)?;
    }
    if let Some(framing) = &o.framing {
        if !o.partitions.is_empty() || !o.orders.is_empty() {
            out.append(" ");
        }
        g.visit(framing, out)?;
    }
    out.append(")");
    Ok(())
}

/// `"name" AS (...)`
pub fn visit_named_window<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Window,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    if let Some(name) = &o.name {
        out.append(&g.quote_column_name(name)).append(" AS ");
    }
    visit_window(g, o, out)
}

pub fn visit_frame<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Frame,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    match o.kind {
        FrameKind::Preceding | FrameKind::Following => {
            match &o.expr {
                Some(expr) => g.visit(expr, out)?,
                None => {
                    out.append("UNBOUNDED");
                }
            }
            out.append(if o.kind == FrameKind::Preceding {
                " PRECEDING"
            } else {
                " FOLLOWING"
            });
        }
        FrameKind::Rows | FrameKind::Range => {
            out.append(if o.kind == FrameKind::Rows { "ROWS" } else { "RANGE" });
            if let Some(expr) = &o.expr {
                out.append(" ");
                g.visit(expr, out)?;
            }
        }
    }
    Ok(())
}

/// `expr OVER (...)`, `expr OVER "name"` or `expr OVER ()`.
pub fn visit_over<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Over,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    g.visit(&o.left, out)?;
    match o.right.as_deref() {
        None => {
            out.append(" OVER ()");
        }
        // a named window is referenced by name only
        Some(Node::UnqualifiedColumn(name))
        | Some(Node::Window(Window {
            name: Some(name), ..
        })) => {
            out.append(" OVER ").append(&g.quote_column_name(name));
        }
        Some(window) => {
            out.append(" OVER ");
            g.visit(window, out)?;
        }
    }
    Ok(())
}
