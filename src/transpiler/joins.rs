//! Join rendering.

use crate::ast::{Join, JoinKind, JoinSource};
use crate::collector::Collector;
use crate::error::CompileResult;

use super::traits::{inject_join, SqlGenerator};

pub fn visit_join<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Join,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    let keyword = match o.kind {
        JoinKind::Inner => "INNER JOIN ",
        JoinKind::LeftOuter => "LEFT OUTER JOIN ",
        JoinKind::FullOuter => "FULL OUTER JOIN ",
        JoinKind::RightOuter => "RIGHT OUTER JOIN ",
        JoinKind::String => return g.visit(&o.left, out),
    };
    out.append(keyword);
    g.visit(&o.left, out)?;
    if let Some(constraint) = &o.right {
        out.append(" ");
        g.visit(constraint, out)?;
    }
    Ok(())
}

pub fn visit_join_source<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &JoinSource,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    if let Some(left) = &o.left {
        g.visit(left, out)?;
    }
    if !o.right.is_empty() {
        if o.left.is_some() {
            out.append(" ");
        }
        inject_join(g, &o.right, " ", out)?;
    }
    Ok(())
}
