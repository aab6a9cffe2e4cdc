use std::borrow::Cow;
use std::sync::Arc;

use crate::ast::{
    as_, grouping, sql, DeleteStatement, JoinSource, Kind, ModifyParts, Node, NodeRef,
    SelectCore, SelectStatement, Unary, UnaryOp, UpdateStatement,
};
use crate::collector::Collector;
use crate::error::CompileResult;
use crate::quoting::{MysqlQuoting, Quoting};
use crate::transpiler::dispatch::Visitor;
use crate::transpiler::dml::{delete, select, update};
use crate::transpiler::traits::{self, grouping_parentheses, infix_value, GeneratorOptions, SqlGenerator};

/// The largest row count MySQL accepts, used when only OFFSET is given.
const MAX_LIMIT: u64 = u64::MAX;

/// MySQL Generator.
#[derive(Debug, Clone, Default)]
pub struct MysqlGenerator {
    options: GeneratorOptions,
}

impl MysqlGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: GeneratorOptions) -> Self {
        Self { options }
    }

    /// MySQL only needs the subselect when it cannot update the join directly.
    fn needs_rewrite(o: &ModifyParts) -> bool {
        o.offset.is_some()
            || o.has_group_by_and_having()
            || (o.has_join_sources() && o.has_limit_or_offset_or_orders())
    }
}

impl Visitor for MysqlGenerator {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn handles(&self, kind: Kind) -> bool {
        kind == Kind::Concat || traits::handles(kind)
    }
}

impl SqlGenerator for MysqlGenerator {
    fn quoting(&self) -> &dyn Quoting {
        &MysqlQuoting
    }

    fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn visit_kind(&self, handler: Kind, node: &Node, out: &mut Collector<'_>) -> CompileResult<()> {
        match (handler, node) {
            (Kind::Concat, Node::Infix(o)) => {
                out.append("CONCAT(");
                infix_value(self, &o.left, ", ", &o.right, out)?;
                out.append(")");
                Ok(())
            }
            (Kind::Bin, Node::Unary(o)) => {
                out.append("BINARY ");
                self.visit(&o.expr, out)
            }
            (Kind::SelectCore, Node::SelectCore(o)) if o.from_item().is_none() => {
                select::visit_select_core(self, &from_dual(o), out)
            }
            (Kind::IsNotDistinctFrom, Node::Binary(o)) => {
                infix_value(self, &o.left, " <=> ", &o.right, out)
            }
            (Kind::IsDistinctFrom, Node::Binary(o)) => {
                out.append("NOT ");
                infix_value(self, &o.left, " <=> ", &o.right, out)
            }
            (Kind::Regexp | Kind::NotRegexp, Node::Regexp(o)) => {
                let op = if o.negated { " NOT REGEXP " } else { " REGEXP " };
                infix_value(self, &o.left, op, &o.right, out)
            }
            (Kind::NullsFirst, Node::Unary(o)) => self.visit_nulls(o, " IS NOT NULL, ", out),
            (Kind::NullsLast, Node::Unary(o)) => self.visit_nulls(o, " IS NULL, ", out),
            (Kind::Cte, Node::Cte(o)) => {
                out.append(&self.quote_table_name(&o.name)).append(" AS ");
                grouping_parentheses(self, &o.relation, true, out)
            }
            (Kind::Union, Node::Binary(o)) => {
                select::visit_flat_set_operation(self, o, " UNION ", true, out)
            }
            (Kind::UnionAll, Node::Binary(o)) => {
                select::visit_flat_set_operation(self, o, " UNION ALL ", true, out)
            }
            _ => traits::render(self, handler, node, out),
        }
    }

    fn visit_select_options(&self, o: &SelectStatement, out: &mut Collector<'_>) -> CompileResult<()> {
        if o.offset.is_some() && o.limit.is_none() {
            tracing::debug!(dialect = self.name(), "adding implicit LIMIT for OFFSET");
            out.append(" LIMIT ").append(&MAX_LIMIT.to_string());
        }
        select::visit_select_options(self, o, out)
    }

    fn prepare_update_statement<'a>(&self, o: &'a UpdateStatement) -> Cow<'a, UpdateStatement> {
        if Self::needs_rewrite(&ModifyParts::from(o)) {
            update::prepare_update_statement(self, o)
        } else {
            Cow::Borrowed(o)
        }
    }

    fn prepare_delete_statement<'a>(&self, o: &'a DeleteStatement) -> Cow<'a, DeleteStatement> {
        if Self::needs_rewrite(&ModifyParts::from(o)) {
            delete::prepare_delete_statement(self, o)
        } else {
            Cow::Borrowed(o)
        }
    }

    /// MySQL cannot select from the table it modifies, so the key list is
    /// materialised through a derived table. Without pagination `DISTINCT`
    /// keeps the optimizer from merging the derived table back in.
    fn build_subselect(&self, key: &NodeRef, o: &ModifyParts) -> SelectStatement {
        let mut subselect = update::build_subselect(key, o);
        let paginated = subselect.requires_parentheses();
        if !paginated {
            subselect = subselect.map_last_core(SelectCore::distinct);
        }

        let derived = as_(grouping(subselect), sql("__relsql_temp"));
        let column = key.column_name().unwrap_or_default();
        let core = SelectCore {
            source: Some(Arc::new(Node::JoinSource(JoinSource {
                left: Some(Arc::new(derived)),
                right: Vec::new(),
            }))),
            ..SelectCore::default()
        }
        .project(sql(self.quote_column_name(column)));
        SelectStatement::new(core)
    }
}

impl MysqlGenerator {
    /// `expr IS [NOT] NULL, <ordering>`
    fn visit_nulls(&self, o: &Unary, null_test: &str, out: &mut Collector<'_>) -> CompileResult<()> {
        let expr = match o.expr.as_ref() {
            Node::Unary(Unary {
                op: UnaryOp::Ascending | UnaryOp::Descending,
                expr,
            }) => expr,
            _ => &o.expr,
        };
        self.visit(expr, out)?;
        out.append(null_test);
        self.visit(&o.expr, out)
    }
}

/// A source-less core selects `FROM DUAL`, keeping any joins.
fn from_dual(o: &SelectCore) -> SelectCore {
    let right = match o.source.as_deref() {
        Some(Node::JoinSource(js)) => js.right.clone(),
        _ => Vec::new(),
    };
    SelectCore {
        source: Some(Arc::new(Node::JoinSource(JoinSource {
            left: Some(Arc::new(sql("DUAL"))),
            right,
        }))),
        ..o.clone()
    }
}
