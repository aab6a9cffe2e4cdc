//! DELETE statements.

use std::borrow::Cow;

use crate::ast::{DeleteStatement, ModifyParts};
use crate::collector::Collector;
use crate::error::CompileResult;
use crate::transpiler::dml::update::rewrite_modify;
use crate::transpiler::traits::{collect_nodes_for, maybe_visit, SqlGenerator};

/// `DELETE FROM t WHERE ...`, or `DELETE t FROM t JOIN ...` when joins remain.
pub fn visit_delete_statement<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &DeleteStatement,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    out.retryable = false;
    let o = g.prepare_delete_statement(o);
    let parts = ModifyParts::from(&*o);
    match parts.join_source() {
        Some(js) => {
            out.append("DELETE ");
            if let Some(left) = &js.left {
                g.visit(left, out)?;
            }
            out.append(" FROM ");
        }
        None => {
            out.append("DELETE FROM ");
        }
    }
    g.visit(&o.relation, out)?;
    collect_nodes_for(g, &o.wheres, " WHERE ", " AND ", out)?;
    collect_nodes_for(g, &o.orders, " ORDER BY ", ", ", out)?;
    maybe_visit(g, o.limit.as_ref(), out)
}

pub fn prepare_delete_statement<'a, G: SqlGenerator + ?Sized>(
    g: &G,
    o: &'a DeleteStatement,
) -> Cow<'a, DeleteStatement> {
    match rewrite_modify(g, &ModifyParts::from(o)) {
        Some(parts) => Cow::Owned(with_parts(parts)),
        None => Cow::Borrowed(o),
    }
}

pub fn with_parts(parts: ModifyParts) -> DeleteStatement {
    DeleteStatement {
        relation: parts.relation,
        wheres: parts.wheres,
        groups: parts.groups,
        havings: parts.havings,
        orders: parts.orders,
        limit: parts.limit,
        offset: parts.offset,
        key: parts.key,
    }
}
