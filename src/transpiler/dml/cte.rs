//! CTE (Common Table Expression) SQL generation.

use crate::ast::{Cte, Node, With};
use crate::collector::Collector;
use crate::error::CompileResult;
use crate::transpiler::traits::{grouping_parentheses, SqlGenerator};

/// `WITH [RECURSIVE] a AS (...), b AS (...)`
///
/// Children are converted to their CTE form first so a dialect's `Cte` rule
/// applies to every entry.
pub fn visit_with<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &With,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    out.append(if o.recursive { "WITH RECURSIVE " } else { "WITH " });
    for (i, child) in o.children.iter().enumerate() {
        if i > 0 {
            out.append(", ");
        }
        match child.to_cte() {
            Some(cte) => g.visit(&Node::Cte(cte), out)?,
            None => g.visit(child, out)?,
        }
    }
    Ok(())
}

/// `name AS [NOT MATERIALIZED |MATERIALIZED ](relation)`
pub fn visit_cte<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Cte,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    out.append(&g.quote_table_name(&o.name)).append(" AS ");
    match o.materialized {
        Some(true) => {
            out.append("MATERIALIZED ");
        }
        Some(false) => {
            out.append("NOT MATERIALIZED ");
        }
        None => {}
    }
    grouping_parentheses(g, &o.relation, true, out)
}
