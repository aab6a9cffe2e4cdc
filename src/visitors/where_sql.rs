//! Renders only the `WHERE` clause of a select core.

use std::sync::Arc;

use crate::ast::{Kind, Node, SelectStatement};
use crate::collector::{Collector, Compiled};
use crate::error::{CompileError, CompileResult};
use crate::transpiler::dispatch::{self, Visitor};
use crate::transpiler::SqlGenerator;

/// Emits `WHERE <predicates>` for a core, rendering the predicates with the
/// wrapped generator.
pub struct WhereSql<'a> {
    inner: &'a dyn SqlGenerator,
}

impl<'a> WhereSql<'a> {
    pub fn new(inner: &'a dyn SqlGenerator) -> Self {
        Self { inner }
    }

    pub fn visit(&self, node: &Node, out: &mut Collector<'_>) -> CompileResult<()> {
        match (dispatch::resolve(self, node.kind())?, node) {
            (Kind::SelectCore, Node::SelectCore(core)) => {
                out.append("WHERE ");
                let predicates = Node::And(core.wheres.iter().map(Arc::clone).collect());
                self.inner.visit(&predicates, out)
            }
            (_, other) => Err(CompileError::UnsupportedVisit(other.kind())),
        }
    }

    pub fn compile(&self, node: &Node) -> CompileResult<Compiled> {
        let mut out = Collector::new();
        self.visit(node, &mut out)?;
        Ok(out.finish())
    }
}

impl Visitor for WhereSql<'_> {
    fn name(&self) -> &'static str {
        "where_sql"
    }

    fn handles(&self, kind: Kind) -> bool {
        kind == Kind::SelectCore
    }
}

/// The `WHERE` clause of the statement's last core, or `None` when it has no
/// predicates.
pub fn where_sql(generator: &dyn SqlGenerator, stmt: &SelectStatement) -> CompileResult<Option<Compiled>> {
    let Some(core) = stmt.last_core() else {
        return Ok(None);
    };
    if core.wheres.is_empty() {
        return Ok(None);
    }
    WhereSql::new(generator)
        .compile(&Node::SelectCore(core.clone()))
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;
    use crate::transpiler::Dialect;
    use pretty_assertions::assert_eq;

    fn users() -> Table {
        Table::new("users")
    }

    #[test]
    fn test_where_clause_only() {
        let stmt = SelectStatement::new(
            SelectCore::from_table(users())
                .project(sql("*"))
                .filter(eq(users().attr("id"), bind(7)))
                .filter(gt(users().attr("age"), quoted(18))),
        )
        .limit(10);

        let generator = Dialect::Postgres.generator();
        let compiled = where_sql(generator.as_ref(), &stmt).unwrap().unwrap();
        assert_eq!(
            compiled.sql,
            "WHERE \"users\".\"id\" = $1 AND \"users\".\"age\" > 18"
        );
        assert_eq!(compiled.binds, vec![Value::Int(7)]);
    }

    #[test]
    fn test_no_predicates() {
        let stmt = SelectStatement::from_table(users());
        let generator = Dialect::Ansi.generator();
        assert!(where_sql(generator.as_ref(), &stmt).unwrap().is_none());
    }

    #[test]
    fn test_rejects_other_nodes() {
        let generator = Dialect::Ansi.generator();
        let err = WhereSql::new(generator.as_ref())
            .compile(&users().node())
            .unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedVisit(Kind::Table)));
    }
}
