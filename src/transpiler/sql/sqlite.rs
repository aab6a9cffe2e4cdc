use crate::ast::{Kind, Node, SelectStatement};
use crate::collector::Collector;
use crate::error::CompileResult;
use crate::quoting::{Quoting, SqliteQuoting};
use crate::transpiler::dispatch::Visitor;
use crate::transpiler::dml::select;
use crate::transpiler::traits::{self, infix_value, maybe_visit, GeneratorOptions, SqlGenerator};

/// SQLite Generator.
#[derive(Debug, Clone, Default)]
pub struct SqliteGenerator {
    options: GeneratorOptions,
}

impl SqliteGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: GeneratorOptions) -> Self {
        Self { options }
    }
}

impl Visitor for SqliteGenerator {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn handles(&self, kind: Kind) -> bool {
        traits::handles(kind)
    }
}

impl SqlGenerator for SqliteGenerator {
    fn quoting(&self) -> &dyn Quoting {
        &SqliteQuoting
    }

    fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn visit_kind(&self, handler: Kind, node: &Node, out: &mut Collector<'_>) -> CompileResult<()> {
        match (handler, node) {
            (Kind::True, Node::True) => {
                out.append("1");
                Ok(())
            }
            (Kind::False, Node::False) => {
                out.append("0");
                Ok(())
            }
            // no row locking
            (Kind::Lock, Node::Unary(_)) => Ok(()),
            (Kind::IsNotDistinctFrom, Node::Binary(o)) => {
                infix_value(self, &o.left, " IS ", &o.right, out)
            }
            (Kind::IsDistinctFrom, Node::Binary(o)) => {
                infix_value(self, &o.left, " IS NOT ", &o.right, out)
            }
            (Kind::Union, Node::Binary(o)) => {
                select::visit_flat_set_operation(self, o, " UNION ", false, out)
            }
            (Kind::UnionAll, Node::Binary(o)) => {
                select::visit_flat_set_operation(self, o, " UNION ALL ", false, out)
            }
            (Kind::Intersect, Node::Binary(o)) => {
                select::visit_flat_set_operation(self, o, " INTERSECT ", false, out)
            }
            (Kind::Except, Node::Binary(o)) => {
                select::visit_flat_set_operation(self, o, " EXCEPT ", false, out)
            }
            _ => traits::render(self, handler, node, out),
        }
    }

    /// An OFFSET needs a LIMIT; `-1` means no bound. Locks are dropped.
    fn visit_select_options(&self, o: &SelectStatement, out: &mut Collector<'_>) -> CompileResult<()> {
        if o.offset.is_some() && o.limit.is_none() {
            out.append(" LIMIT -1");
        }
        maybe_visit(self, o.limit.as_ref(), out)?;
        maybe_visit(self, o.offset.as_ref(), out)
    }
}
