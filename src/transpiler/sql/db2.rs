use crate::ast::{Binary, Kind, Node, SelectCore, SelectStatement};
use crate::collector::Collector;
use crate::error::CompileResult;
use crate::quoting::{AnsiQuoting, Quoting};
use crate::transpiler::dispatch::Visitor;
use crate::transpiler::dml::select;
use crate::transpiler::sql::oracle::decode_distinct_from;
use crate::transpiler::traits::{self, maybe_visit, GeneratorOptions, SqlGenerator};

/// IBM DB2 Generator.
#[derive(Debug, Clone, Default)]
pub struct Db2Generator {
    options: GeneratorOptions,
}

impl Db2Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: GeneratorOptions) -> Self {
        Self { options }
    }
}

impl Visitor for Db2Generator {
    fn name(&self) -> &'static str {
        "db2"
    }

    fn handles(&self, kind: Kind) -> bool {
        traits::handles(kind)
    }
}

impl SqlGenerator for Db2Generator {
    fn quoting(&self) -> &dyn Quoting {
        &AnsiQuoting
    }

    fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn visit_kind(&self, handler: Kind, node: &Node, out: &mut Collector<'_>) -> CompileResult<()> {
        match (handler, node) {
            (Kind::SelectCore, Node::SelectCore(o)) => {
                select::visit_select_core(self, o, out)?;
                maybe_visit(self, o.optimizer_hints.as_ref(), out)
            }
            (Kind::OptimizerHints, Node::OptimizerHints(hints)) => {
                let hints: String = hints
                    .iter()
                    .map(|h| self.sanitize_as_sql_comment(h))
                    .collect();
                out.append("/* <OPTGUIDELINES>")
                    .append(&hints)
                    .append("</OPTGUIDELINES> */");
                Ok(())
            }
            (Kind::Limit, Node::Unary(o)) => {
                select::check_non_negative(&o.expr, "LIMIT")?;
                out.append("FETCH FIRST ");
                self.visit(&o.expr, out)?;
                out.append(" ROWS ONLY");
                Ok(())
            }
            (Kind::Offset, Node::Unary(o)) => {
                select::check_non_negative(&o.expr, "OFFSET")?;
                out.append("OFFSET ");
                self.visit(&o.expr, out)?;
                out.append(" ROWS");
                Ok(())
            }
            _ => traits::render(self, handler, node, out),
        }
    }

    /// `OFFSET` must precede `FETCH FIRST`.
    fn visit_select_options(&self, o: &SelectStatement, out: &mut Collector<'_>) -> CompileResult<()> {
        maybe_visit(self, o.offset.as_ref(), out)?;
        maybe_visit(self, o.limit.as_ref(), out)?;
        maybe_visit(self, o.lock.as_ref(), out)
    }

    /// Hints are emitted after the core as an optimization guideline.
    fn collect_optimizer_hints(&self, _o: &SelectCore, _out: &mut Collector<'_>) -> CompileResult<()> {
        Ok(())
    }

    fn is_distinct_from(&self, o: &Binary, out: &mut Collector<'_>) -> CompileResult<()> {
        decode_distinct_from(self, o, out)
    }
}
