//! UPDATE statements and the keyed subselect rewrite shared with DELETE.
//!
//! When a keyed statement carries joins, ordering or pagination the base
//! renderer cannot express, it is rewritten to
//! `... WHERE (key) IN (SELECT key FROM <relation> WHERE ... ORDER BY ... LIMIT ...)`.

use std::borrow::Cow;
use std::sync::Arc;

use crate::ast::{
    grouping, in_, list, JoinSource, ModifyParts, Node, NodeRef, SelectCore, SelectStatement,
    UpdateStatement,
};
use crate::collector::Collector;
use crate::error::CompileResult;
use crate::transpiler::traits::{collect_nodes_for, maybe_visit, SqlGenerator};

pub fn visit_update_statement<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &UpdateStatement,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    out.retryable = false;
    let o = g.prepare_update_statement(o);
    out.append("UPDATE ");
    g.visit(&o.relation, out)?;
    collect_nodes_for(g, &o.values, " SET ", ", ", out)?;
    collect_nodes_for(g, &o.wheres, " WHERE ", " AND ", out)?;
    collect_nodes_for(g, &o.orders, " ORDER BY ", ", ", out)?;
    maybe_visit(g, o.limit.as_ref(), out)
}

pub fn prepare_update_statement<'a, G: SqlGenerator + ?Sized>(
    g: &G,
    o: &'a UpdateStatement,
) -> Cow<'a, UpdateStatement> {
    match rewrite_modify(g, &ModifyParts::from(o)) {
        Some(parts) => Cow::Owned(with_parts(o, parts)),
        None => Cow::Borrowed(o),
    }
}

/// The base trigger: a key plus ordering, pagination or joins.
pub fn rewrite_modify<G: SqlGenerator + ?Sized>(g: &G, o: &ModifyParts) -> Option<ModifyParts> {
    let key = o.key.as_ref()?;
    if o.has_limit_or_offset_or_orders() || o.has_join_sources() {
        Some(subselect_rewrite(g, key, o))
    } else {
        None
    }
}

/// Move row selection into `WHERE (key) IN (subselect)`.
pub fn subselect_rewrite<G: SqlGenerator + ?Sized>(
    g: &G,
    key: &NodeRef,
    o: &ModifyParts,
) -> ModifyParts {
    tracing::debug!(dialect = g.name(), "rewriting modify statement through keyed subselect");
    let subselect = g.build_subselect(key, o);
    let predicate = in_(grouping(key.clone()), list([subselect]));
    let relation = o
        .join_source()
        .and_then(|js| js.left.clone())
        .unwrap_or_else(|| o.relation.clone());
    ModifyParts {
        relation,
        wheres: vec![Arc::new(predicate)],
        groups: o.groups.clone(),
        havings: o.havings.clone(),
        orders: Vec::new(),
        limit: None,
        offset: None,
        key: o.key.clone(),
    }
}

/// `SELECT key FROM <relation> WHERE ... [GROUP BY ... HAVING ...] ORDER BY ... LIMIT ... OFFSET ...`
pub fn build_subselect(key: &NodeRef, o: &ModifyParts) -> SelectStatement {
    let source = match o.relation.as_ref() {
        Node::JoinSource(_) => o.relation.clone(),
        _ => Arc::new(Node::JoinSource(JoinSource {
            left: Some(o.relation.clone()),
            right: Vec::new(),
        })),
    };
    let core = SelectCore {
        projections: vec![key.clone()],
        source: Some(source),
        wheres: o.wheres.clone(),
        groups: o.groups.clone(),
        havings: o.havings.clone(),
        ..SelectCore::default()
    };
    SelectStatement {
        orders: o.orders.clone(),
        limit: o.limit.clone(),
        offset: o.offset.clone(),
        ..SelectStatement::new(core)
    }
}

pub fn with_parts(o: &UpdateStatement, parts: ModifyParts) -> UpdateStatement {
    UpdateStatement {
        relation: parts.relation,
        values: o.values.clone(),
        wheres: parts.wheres,
        groups: parts.groups,
        havings: parts.havings,
        orders: parts.orders,
        limit: parts.limit,
        offset: parts.offset,
        key: parts.key,
    }
}
