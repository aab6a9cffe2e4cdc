//! INSERT statements.

use crate::ast::InsertStatement;
use crate::collector::Collector;
use crate::error::CompileResult;
use crate::transpiler::traits::{maybe_visit, SqlGenerator};

/// `INSERT INTO t (a, b) VALUES ...` or `INSERT INTO t (a, b) SELECT ...`
pub fn visit_insert_statement<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &InsertStatement,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    out.retryable = false;
    out.append("INSERT INTO ");
    g.visit(&o.relation, out)?;

    if !o.columns.is_empty() {
        out.append(" (");
        for (i, column) in o.columns.iter().enumerate() {
            if i > 0 {
                out.append(", ");
            }
            match column.column_name() {
                Some(name) => {
                    out.append(&g.quote_column_name(name));
                }
                None => g.visit(column, out)?,
            }
        }
        out.append(")");
    }

    match (&o.values, &o.select) {
        (Some(values), _) => maybe_visit(g, Some(values), out),
        (None, Some(select)) => maybe_visit(g, Some(select), out),
        (None, None) => Ok(()),
    }
}
