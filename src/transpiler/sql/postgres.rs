use std::borrow::Cow;

use crate::ast::{Join, JoinKind, Kind, Node, NodeRef, UpdateStatement};
use crate::collector::{Collector, Placeholder};
use crate::error::CompileResult;
use crate::quoting::{AnsiQuoting, Quoting};
use crate::transpiler::conditions::visit_like;
use crate::transpiler::dispatch::Visitor;
use crate::transpiler::dml::update;
use crate::transpiler::traits::{
    self, collect_nodes_for, infix_value, GeneratorOptions, SqlGenerator,
};

fn dollar(index: usize) -> String {
    format!("${}", index)
}

/// PostgreSQL Generator.
#[derive(Debug, Clone, Default)]
pub struct PostgresGenerator {
    options: GeneratorOptions,
}

impl PostgresGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: GeneratorOptions) -> Self {
        Self { options }
    }
}

impl Visitor for PostgresGenerator {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn handles(&self, kind: Kind) -> bool {
        traits::handles(kind)
    }
}

impl SqlGenerator for PostgresGenerator {
    fn quoting(&self) -> &dyn Quoting {
        &AnsiQuoting
    }

    fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn bind_placeholder(&self) -> Placeholder {
        dollar
    }

    fn visit_kind(&self, handler: Kind, node: &Node, out: &mut Collector<'_>) -> CompileResult<()> {
        match (handler, node) {
            (Kind::Matches | Kind::DoesNotMatch, Node::Matches(o)) => {
                let op = match (o.negated, o.case_sensitive) {
                    (false, true) => " LIKE ",
                    (false, false) => " ILIKE ",
                    (true, true) => " NOT LIKE ",
                    (true, false) => " NOT ILIKE ",
                };
                visit_like(self, o, op, out)
            }
            (Kind::Regexp | Kind::NotRegexp, Node::Regexp(o)) => {
                let op = match (o.negated, o.case_sensitive) {
                    (false, true) => " ~ ",
                    (false, false) => " ~* ",
                    (true, true) => " !~ ",
                    (true, false) => " !~* ",
                };
                infix_value(self, &o.left, op, &o.right, out)
            }
            (Kind::DistinctOn, Node::Unary(o)) => {
                out.append("DISTINCT ON ( ");
                self.visit(&o.expr, out)?;
                out.append(" )");
                Ok(())
            }
            (Kind::GroupingElement, Node::Unary(o)) => match o.expr.as_ref() {
                Node::List(_) => {
                    out.append("( ");
                    self.visit(&o.expr, out)?;
                    out.append(" )");
                    Ok(())
                }
                expr => self.visit(expr, out),
            },
            (Kind::IsNotDistinctFrom, Node::Binary(o)) => {
                infix_value(self, &o.left, " IS NOT DISTINCT FROM ", &o.right, out)
            }
            (Kind::IsDistinctFrom, Node::Binary(o)) => {
                infix_value(self, &o.left, " IS DISTINCT FROM ", &o.right, out)
            }
            (Kind::UpdateStatement, Node::UpdateStatement(o)) => match update_from(o) {
                Some(from) => self.visit_update_from(o, from, out),
                None => update::visit_update_statement(self, o, out),
            },
            _ => traits::render(self, handler, node, out),
        }
    }

    fn prepare_update_statement<'a>(&self, o: &'a UpdateStatement) -> Cow<'a, UpdateStatement> {
        match update_from(o) {
            Some(_) => Cow::Borrowed(o),
            None => update::prepare_update_statement(self, o),
        }
    }
}

/// The pieces of an `UPDATE ... FROM` rendering.
struct UpdateFrom<'a> {
    target: &'a NodeRef,
    first: &'a Join,
    constraint: &'a NodeRef,
    remaining: &'a [NodeRef],
}

/// An UPDATE whose joins can move into `FROM`: an inner first join with an
/// `ON` constraint, and no ordering, pagination or grouped HAVING.
fn update_from(o: &UpdateStatement) -> Option<UpdateFrom<'_>> {
    let Node::JoinSource(js) = o.relation.as_ref() else {
        return None;
    };
    let target = js.left.as_ref()?;
    let (first, remaining) = js.right.split_first()?;
    let Node::Join(first) = first.as_ref() else {
        return None;
    };
    if first.kind != JoinKind::Inner {
        return None;
    }
    let constraint = first.constraint()?;
    let paginated = o.limit.is_some() || o.offset.is_some() || !o.orders.is_empty();
    let grouped = !o.groups.is_empty() && !o.havings.is_empty();
    if paginated || grouped {
        return None;
    }
    Some(UpdateFrom {
        target,
        first,
        constraint,
        remaining,
    })
}

impl PostgresGenerator {
    /// `UPDATE t SET ... FROM j [joins] WHERE <first join constraint> AND ...`
    fn visit_update_from(
        &self,
        o: &UpdateStatement,
        from: UpdateFrom<'_>,
        out: &mut Collector<'_>,
    ) -> CompileResult<()> {
        out.retryable = false;
        out.append("UPDATE ");
        self.visit(from.target, out)?;
        collect_nodes_for(self, &o.values, " SET ", ", ", out)?;
        out.append(" FROM ");
        self.visit(&from.first.left, out)?;
        collect_nodes_for(self, from.remaining, " ", " ", out)?;

        let mut wheres = Vec::with_capacity(o.wheres.len() + 1);
        wheres.push(from.constraint.clone());
        wheres.extend(o.wheres.iter().cloned());
        collect_nodes_for(self, &wheres, " WHERE ", " AND ", out)
    }
}
