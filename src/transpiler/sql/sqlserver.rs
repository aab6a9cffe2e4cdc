//! SQL Server generator.
//!
//! SQL Server has no `LIMIT`. A paginated select gets a synthetic
//! `ROW_NUMBER() OVER (ORDER BY ...) as _row_num` projection and is wrapped in
//! `SELECT _t.* FROM (...) as _t WHERE _row_num BETWEEN first AND last`.
//! The ordering comes from the statement, else the core's GROUP BY, else the
//! primary key of the leftmost table.

use std::sync::Arc;

use dashmap::DashMap;

use crate::ast::{
    sql, Binary, DeleteStatement, FunctionKind, Kind, ModifyParts, Node, NodeRef, SelectCore,
    SelectStatement, Table, Value,
};
use crate::collector::Collector;
use crate::error::{CompileError, CompileResult};
use crate::quoting::{NoSchema, Quoting, SchemaLookup, SqlServerQuoting};
use crate::transpiler::dispatch::Visitor;
use crate::transpiler::dml::select;
use crate::transpiler::traits::{
    self, collect_nodes_for, inject_join, maybe_visit, GeneratorOptions, SqlGenerator,
};

/// SQL Server Generator.
pub struct SqlServerGenerator {
    options: GeneratorOptions,
    schema: Arc<dyn SchemaLookup>,
    /// Discovered primary keys by table name; `None` records a keyless table.
    primary_keys: DashMap<String, Option<String>>,
}

impl Default for SqlServerGenerator {
    fn default() -> Self {
        Self::with_options(GeneratorOptions::default())
    }
}

impl SqlServerGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: GeneratorOptions) -> Self {
        Self {
            options,
            schema: Arc::new(NoSchema),
            primary_keys: DashMap::new(),
        }
    }

    /// Use `schema` to find primary keys for pagination.
    pub fn with_schema(mut self, schema: Arc<dyn SchemaLookup>) -> Self {
        self.schema = schema;
        self.primary_keys.clear();
        self
    }
}

impl Visitor for SqlServerGenerator {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn handles(&self, kind: Kind) -> bool {
        kind == Kind::RowNumber || traits::handles(kind)
    }
}

impl SqlGenerator for SqlServerGenerator {
    fn quoting(&self) -> &dyn Quoting {
        &SqlServerQuoting
    }

    fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn visit_kind(&self, handler: Kind, node: &Node, out: &mut Collector<'_>) -> CompileResult<()> {
        match (handler, node) {
            (Kind::RowNumber, Node::RowNumber(orders)) => {
                out.append("ROW_NUMBER() OVER (ORDER BY ");
                inject_join(self, orders, ", ", out)?;
                out.append(") as _row_num");
                Ok(())
            }
            (Kind::SelectStatement, Node::SelectStatement(o))
                if o.limit.is_some() || o.offset.is_some() =>
            {
                self.visit_paginated_select(o, out)
            }
            (Kind::SelectCore, Node::SelectCore(o)) => {
                select::visit_select_core(self, o, out)?;
                maybe_visit(self, o.optimizer_hints.as_ref(), out)
            }
            (Kind::OptimizerHints, Node::OptimizerHints(hints)) => {
                let hints: Vec<String> = hints
                    .iter()
                    .map(|h| self.sanitize_as_sql_comment(h))
                    .collect();
                out.append("OPTION (").append(&hints.join(", ")).append(")");
                Ok(())
            }
            (Kind::IsNotDistinctFrom, Node::Binary(o)) => self.visit_not_distinct(o, out),
            (Kind::IsDistinctFrom, Node::Binary(o)) => {
                if o.right.is_null() {
                    self.visit(&o.left, out)?;
                    out.append(" IS NOT NULL");
                    Ok(())
                } else {
                    out.append("NOT ");
                    self.visit_not_distinct(o, out)
                }
            }
            (Kind::DeleteStatement, Node::DeleteStatement(o)) => self.visit_delete(o, out),
            _ => traits::render(self, handler, node, out),
        }
    }

    /// Hints follow the core as `OPTION (...)` instead.
    fn collect_optimizer_hints(&self, _o: &SelectCore, _out: &mut Collector<'_>) -> CompileResult<()> {
        Ok(())
    }
}

impl SqlServerGenerator {
    fn visit_paginated_select(&self, o: &SelectStatement, out: &mut Collector<'_>) -> CompileResult<()> {
        select::check_cores(o)?;
        let first_row = match o.offset.as_deref() {
            Some(offset) => pagination_int(offset, "OFFSET")?
                .checked_add(1)
                .ok_or_else(|| row_overflow("OFFSET"))?,
            None => 1,
        };
        let last_row = match o.limit.as_deref() {
            Some(limit) => Some(
                (pagination_int(limit, "LIMIT")? - 1)
                    .checked_add(first_row)
                    .ok_or_else(|| row_overflow("LIMIT"))?,
            ),
            None => None,
        };

        let mut is_select_count = false;
        let mut cores = Vec::with_capacity(o.cores.len());
        for core in o.cores() {
            let row_number = Arc::new(Node::RowNumber(self.determine_order_by(&o.orders, core)?));
            let mut core = core.clone();
            if is_select_count_core(&core) {
                core.projections = vec![row_number];
                is_select_count = true;
            } else {
                if core.projections.is_empty() {
                    core.projections.push(Arc::new(sql("*")));
                }
                core.projections.push(row_number);
            }
            cores.push(Node::SelectCore(core));
        }
        tracing::debug!(
            dialect = self.name(),
            first_row,
            last_row = ?last_row,
            is_select_count,
            "paginating with ROW_NUMBER"
        );

        if let Some(with) = &o.with {
            self.visit(with, out)?;
            out.append(" ");
        }
        if is_select_count {
            out.append("SELECT COUNT(1) as count_id FROM (");
        }
        out.append("SELECT _t.* FROM (");
        for core in &cores {
            self.visit(core, out)?;
        }
        out.append(") as _t WHERE ");
        match last_row {
            Some(last_row) => out.append(&format!("_row_num BETWEEN {} AND {}", first_row, last_row)),
            None => out.append(&format!("_row_num >= {}", first_row)),
        };
        if is_select_count {
            out.append(") AS subquery");
        }
        Ok(())
    }

    fn determine_order_by(&self, orders: &[NodeRef], core: &SelectCore) -> CompileResult<Vec<NodeRef>> {
        if !orders.is_empty() {
            return Ok(orders.to_vec());
        }
        if !core.groups.is_empty() {
            return Ok(core.groups.clone());
        }
        match core.from_item().map(|n| n.as_ref()) {
            Some(Node::Table(table)) => match self.find_primary_key(table) {
                Some(key) => Ok(vec![Arc::new(key)]),
                None => Err(CompileError::InvalidCombination(format!(
                    "pagination on {} needs ORDER BY, GROUP BY or a primary key",
                    table.name
                ))),
            },
            _ => Err(CompileError::InvalidCombination(
                "pagination needs ORDER BY, GROUP BY or a table with a primary key".to_string(),
            )),
        }
    }

    fn find_primary_key(&self, table: &Table) -> Option<Node> {
        let key = self
            .primary_keys
            .entry(table.name.clone())
            .or_insert_with(|| self.schema.primary_key(&table.name))
            .clone();
        key.map(|name| table.attr(name))
    }

    /// `EXISTS (VALUES (a) INTERSECT VALUES (b))`, or `a IS NULL`.
    fn visit_not_distinct(&self, o: &Binary, out: &mut Collector<'_>) -> CompileResult<()> {
        if o.right.is_null() {
            self.visit(&o.left, out)?;
            out.append(" IS NULL");
            return Ok(());
        }
        out.append("EXISTS (VALUES (");
        self.visit(&o.left, out)?;
        out.append(") INTERSECT VALUES (");
        self.visit(&o.right, out)?;
        out.append("))");
        Ok(())
    }

    /// `DELETE [TOP (n)] FROM ...`
    fn visit_delete(&self, o: &DeleteStatement, out: &mut Collector<'_>) -> CompileResult<()> {
        out.retryable = false;
        let o = self.prepare_delete_statement(o);
        let parts = ModifyParts::from(&*o);
        out.append("DELETE ");
        if let Some(limit) = o.limit.as_deref() {
            let n = pagination_int(limit, "LIMIT")?;
            out.append(&format!("TOP ({}) ", n));
        }
        match parts.join_source() {
            Some(js) => {
                if let Some(left) = &js.left {
                    self.visit(left, out)?;
                }
                out.append(" FROM ");
            }
            None => {
                out.append("FROM ");
            }
        }
        self.visit(&o.relation, out)?;
        // DELETE TOP takes no ORDER BY.
        collect_nodes_for(self, &o.wheres, " WHERE ", " AND ", out)
    }
}

fn row_overflow(clause: &str) -> CompileError {
    CompileError::InvalidValue(format!("{} exceeds the ROW_NUMBER range", clause))
}

fn is_select_count_core(core: &SelectCore) -> bool {
    matches!(
        core.projections.as_slice(),
        [only] if matches!(only.as_ref(), Node::Function(f) if f.kind == FunctionKind::Count)
    )
}

/// The integer inside a `Limit`/`Offset`, literal or bound.
fn pagination_int(node: &Node, clause: &str) -> CompileResult<i64> {
    let expr = match node {
        Node::Unary(u) => u.expr.as_ref(),
        other => other,
    };
    let value = match expr {
        Node::Value(v) | Node::Quoted(v) => v,
        Node::BindParam(b) => &b.value,
        Node::Casted(c) => &c.value,
        _ => {
            return Err(CompileError::InvalidValue(format!(
                "{} must be an integer for ROW_NUMBER pagination",
                clause
            )));
        }
    };
    match value {
        Value::Int(n) if *n >= 0 => Ok(*n),
        Value::Int(n) => Err(CompileError::InvalidValue(format!(
            "{} must be non-negative, got {}",
            clause, n
        ))),
        other => Err(CompileError::InvalidValue(format!(
            "{} must be an integer, got {}",
            clause, other
        ))),
    }
}
