//! Oracle generators.
//!
//! [`OracleGenerator`] paginates with `ROWNUM`; [`Oracle12Generator`] uses the
//! 12c `OFFSET ... ROWS FETCH FIRST ... ROWS ONLY` clauses. Both spell binds
//! `:aN`, render `EXCEPT` as `MINUS` and compare with `DECODE`.

use std::borrow::Cow;
use std::sync::Arc;

use nom::{
    branch::alt,
    bytes::complete::is_not,
    character::complete::char,
    combinator::recognize,
    multi::{many0, separated_list0},
    sequence::delimited,
    IResult,
};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{
    lteq, sql, Binary, Kind, Node, NodeRef, SelectCore, SelectStatement, Unary, UnaryOp,
    UpdateStatement, Value,
};
use crate::collector::{Collector, Placeholder};
use crate::error::{CompileError, CompileResult};
use crate::quoting::{OracleQuoting, Quoting};
use crate::transpiler::dispatch::Visitor;
use crate::transpiler::dml::{select, update};
use crate::transpiler::traits::{self, maybe_visit, GeneratorOptions, SqlGenerator};

static DESC_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bdesc$").expect("descending order pattern"));

fn colon_a(index: usize) -> String {
    format!(":a{}", index)
}

/// Oracle Generator (ROWNUM pagination).
#[derive(Debug, Clone, Default)]
pub struct OracleGenerator {
    options: GeneratorOptions,
}

impl OracleGenerator {
    pub fn new() -> Self {
        Self::with_options(GeneratorOptions {
            in_clause_length: Some(1000),
        })
    }

    pub fn with_options(options: GeneratorOptions) -> Self {
        Self { options }
    }
}

impl Visitor for OracleGenerator {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn handles(&self, kind: Kind) -> bool {
        traits::handles(kind)
    }
}

impl SqlGenerator for OracleGenerator {
    fn quoting(&self) -> &dyn Quoting {
        &OracleQuoting
    }

    fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn bind_placeholder(&self) -> Placeholder {
        colon_a
    }

    fn visit_kind(&self, handler: Kind, node: &Node, out: &mut Collector<'_>) -> CompileResult<()> {
        match (handler, node) {
            (Kind::SelectStatement, Node::SelectStatement(o)) => self.visit_rownum_select(o, out),
            _ => visit_shared(self, handler, node, out),
        }
    }

    fn is_distinct_from(&self, o: &Binary, out: &mut Collector<'_>) -> CompileResult<()> {
        decode_distinct_from(self, o, out)
    }
}

impl OracleGenerator {
    fn visit_rownum_select(&self, o: &SelectStatement, out: &mut Collector<'_>) -> CompileResult<()> {
        select::check_cores(o)?;
        let o = self.order_hacks(o)?;
        let limit = bound_expr(o.limit.as_ref());
        let offset = bound_expr(o.offset.as_ref());
        if let Some(limit) = &limit {
            select::check_non_negative(limit, "LIMIT")?;
        }
        if let Some(offset) = &offset {
            select::check_non_negative(offset, "OFFSET")?;
        }

        let mut inner = o.into_owned();
        inner.limit = None;
        inner.offset = None;

        match (limit, offset) {
            (Some(limit), None) if rownum_filter_applies(&inner) => {
                let inner = inner.map_last_core(|core| core.filter(lteq(sql("ROWNUM"), limit)));
                select::visit_select_statement(self, &inner, out)
            }
            (Some(limit), Some(offset)) => {
                tracing::debug!(dialect = self.name(), "wrapping select in ROWNUM window");
                out.append("SELECT * FROM (SELECT raw_sql_.*, rownum raw_rnum_ FROM (");
                select::visit_select_statement(self, &inner, out)?;
                out.append(") raw_sql_ WHERE rownum <= ");
                self.visit_upper_bound(&offset, &limit, out)?;
                out.append(") WHERE raw_rnum_ > ");
                self.visit(&offset, out)
            }
            (Some(limit), None) => {
                tracing::debug!(dialect = self.name(), "wrapping ordered select for ROWNUM");
                out.append("SELECT * FROM (");
                select::visit_select_statement(self, &inner, out)?;
                out.append(") WHERE ROWNUM <= ");
                self.visit(&limit, out)
            }
            (None, Some(offset)) => {
                tracing::debug!(dialect = self.name(), "wrapping select in ROWNUM offset");
                out.append("SELECT * FROM (SELECT raw_sql_.*, rownum raw_rnum_ FROM (");
                select::visit_select_statement(self, &inner, out)?;
                out.append(") raw_sql_) WHERE raw_rnum_ > ");
                self.visit(&offset, out)
            }
            (None, None) => select::visit_select_statement(self, &inner, out),
        }
    }

    /// `offset + limit`, folded when both are integer literals.
    fn visit_upper_bound(&self, offset: &Node, limit: &Node, out: &mut Collector<'_>) -> CompileResult<()> {
        match (literal_int(offset), literal_int(limit)) {
            (Some(offset), Some(limit)) => {
                out.append(&offset.saturating_add(limit).to_string());
                Ok(())
            }
            _ => {
                out.append("(");
                self.visit(offset, out)?;
                out.append(" + ");
                self.visit(limit, out)?;
                out.append(")");
                Ok(())
            }
        }
    }

    /// With a `FIRST_VALUE` projection, orders are replaced by the
    /// `alias_N__` columns the projection exposes, one per ordering term.
    fn order_hacks<'a>(&self, o: &'a SelectStatement) -> CompileResult<Cow<'a, SelectStatement>> {
        if o.orders.is_empty() || !o.cores().any(has_first_value_projection) {
            return Ok(Cow::Borrowed(o));
        }

        let mut terms = Vec::new();
        for order in &o.orders {
            let mut scratch = Collector::new();
            self.visit(order, &mut scratch)?;
            let text = scratch.value();
            if text.contains(',') {
                terms.extend(split_order_string(text));
            } else {
                terms.push(text.to_string());
            }
        }

        let orders = terms
            .iter()
            .enumerate()
            .map(|(i, term)| {
                let direction = if DESC_SUFFIX.is_match(term) { " DESC" } else { "" };
                Arc::new(sql(format!("alias_{}__{}", i, direction)))
            })
            .collect();
        Ok(Cow::Owned(SelectStatement {
            orders,
            ..o.clone()
        }))
    }
}

/// Oracle 12c Generator (`OFFSET`/`FETCH FIRST` pagination).
#[derive(Debug, Clone, Default)]
pub struct Oracle12Generator {
    options: GeneratorOptions,
}

impl Oracle12Generator {
    pub fn new() -> Self {
        Self::with_options(GeneratorOptions {
            in_clause_length: Some(1000),
        })
    }

    pub fn with_options(options: GeneratorOptions) -> Self {
        Self { options }
    }
}

impl Visitor for Oracle12Generator {
    fn name(&self) -> &'static str {
        "oracle12"
    }

    fn handles(&self, kind: Kind) -> bool {
        traits::handles(kind)
    }
}

impl SqlGenerator for Oracle12Generator {
    fn quoting(&self) -> &dyn Quoting {
        &OracleQuoting
    }

    fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn bind_placeholder(&self) -> Placeholder {
        colon_a
    }

    fn visit_kind(&self, handler: Kind, node: &Node, out: &mut Collector<'_>) -> CompileResult<()> {
        match (handler, node) {
            (Kind::SelectStatement, Node::SelectStatement(o)) => {
                // ORA-02014
                if o.limit.is_some() && o.lock.is_some() {
                    return Err(CompileError::InvalidCombination(
                        "LIMIT cannot be combined with a row lock: SELECT FOR UPDATE and \
                         FETCH FIRST n ROWS are rejected together"
                            .to_string(),
                    ));
                }
                select::visit_select_statement(self, o, out)
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
            _ => visit_shared(self, handler, node, out),
        }
    }

    fn visit_select_options(&self, o: &SelectStatement, out: &mut Collector<'_>) -> CompileResult<()> {
        maybe_visit(self, o.offset.as_ref(), out)?;
        maybe_visit(self, o.limit.as_ref(), out)?;
        maybe_visit(self, o.lock.as_ref(), out)
    }

    fn is_distinct_from(&self, o: &Binary, out: &mut Collector<'_>) -> CompileResult<()> {
        decode_distinct_from(self, o, out)
    }
}

/// Rules both Oracle flavours share.
fn visit_shared<G: SqlGenerator + ?Sized>(
    g: &G,
    handler: Kind,
    node: &Node,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    match (handler, node) {
        (Kind::Except, Node::Binary(o)) => select::visit_set_operation(g, o, " MINUS ", out),
        // ORDER BY is rejected in UPDATE; without a LIMIT it changes nothing.
        (Kind::UpdateStatement, Node::UpdateStatement(o))
            if !o.orders.is_empty() && o.limit.is_none() =>
        {
            let unordered = UpdateStatement {
                orders: Vec::new(),
                ..o.clone()
            };
            update::visit_update_statement(g, &unordered, out)
        }
        _ => traits::render(g, handler, node, out),
    }
}

/// `DECODE(a, b, 0, 1)`
pub fn decode_distinct_from<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &Binary,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    out.append("DECODE(");
    g.visit(&o.left, out)?;
    out.append(", ");
    g.visit(&o.right, out)?;
    out.append(", 0, 1)");
    Ok(())
}

/// The expression inside a `Limit`/`Offset` wrapper.
fn bound_expr(node: Option<&NodeRef>) -> Option<NodeRef> {
    node.map(|n| match n.as_ref() {
        Node::Unary(Unary { expr, .. }) => expr.clone(),
        _ => n.clone(),
    })
}

fn literal_int(node: &Node) -> Option<i64> {
    match node {
        Node::Value(Value::Int(n)) | Node::Quoted(Value::Int(n)) => Some(*n),
        _ => None,
    }
}

/// A plain `ROWNUM <= n` filter is only correct before ordering, grouping
/// and de-duplication.
fn rownum_filter_applies(o: &SelectStatement) -> bool {
    let Some(first) = o.first_core() else {
        return false;
    };
    let distinct = matches!(
        first.set_quantifier.as_deref(),
        Some(Node::Distinct)
            | Some(Node::Unary(Unary {
                op: UnaryOp::DistinctOn,
                ..
            }))
    );
    o.orders.is_empty() && first.groups.is_empty() && !distinct
}

fn has_first_value_projection(core: &SelectCore) -> bool {
    core.projections
        .iter()
        .any(|p| matches!(p.as_ref(), Node::SqlLiteral(l) if l.text.contains("FIRST_VALUE")))
}

fn paren_group(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        char('('),
        many0(alt((paren_group, is_not("()")))),
        char(')'),
    ))(input)
}

fn order_terms(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list0(char(','), recognize(many0(alt((paren_group, is_not("(),"))))))(input)
}

/// Split an ORDER BY fragment on the commas outside parentheses.
///
/// Unbalanced text is returned whole.
pub fn split_order_string(text: &str) -> Vec<String> {
    match order_terms(text) {
        Ok(("", terms)) => terms.into_iter().map(str::to_string).collect(),
        _ => vec![text.to_string()],
    }
}
