//! Hand-written SQL with `?` or `:name` placeholders.
//!
//! The text is split into tokens with nom; each placeholder becomes either the
//! rendering of a nested node or a fresh bind. `::` is a literal cast and never
//! starts a placeholder.

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_while},
    character::complete::{char, satisfy},
    combinator::{map, recognize},
    multi::many0,
    sequence::{pair, preceded},
    IResult,
};

use crate::ast::{BoundSqlLiteral, BoundValue, SqlBinds, Value};
use crate::collector::Collector;
use crate::error::{CompileError, CompileResult};

use super::traits::SqlGenerator;

#[derive(Debug, Clone, PartialEq)]
enum Token<'a> {
    Text(&'a str),
    Positional,
    Named(&'a str),
}

fn positional_tokens(input: &str) -> IResult<&str, Vec<Token<'_>>> {
    many0(alt((
        map(tag("?"), |_| Token::Positional),
        map(is_not("?"), Token::Text),
    )))(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic()),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input)
}

fn named_tokens(input: &str) -> IResult<&str, Vec<Token<'_>>> {
    many0(alt((
        map(tag("::"), Token::Text),
        map(preceded(char(':'), identifier), Token::Named),
        map(is_not(":"), Token::Text),
        map(tag(":"), Token::Text),
    )))(input)
}

fn tokenize<'a>(
    text: &'a str,
    parser: fn(&'a str) -> IResult<&'a str, Vec<Token<'a>>>,
) -> CompileResult<Vec<Token<'a>>> {
    match parser(text) {
        Ok((rest, tokens)) if rest.is_empty() => Ok(tokens),
        Ok((rest, _)) => Err(CompileError::InvalidValue(format!(
            "unparseable SQL literal near {:?}",
            rest
        ))),
        Err(e) => Err(CompileError::InvalidValue(format!(
            "unparseable SQL literal: {}",
            e
        ))),
    }
}

pub fn visit_bound_sql_literal<G: SqlGenerator + ?Sized>(
    g: &G,
    o: &BoundSqlLiteral,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    out.retryable = false;

    match &o.binds {
        SqlBinds::Positional(values) => {
            let mut next = 0;
            for token in tokenize(&o.sql, positional_tokens)? {
                match token {
                    Token::Text(text) => {
                        out.append(text);
                    }
                    _ => {
                        next += 1;
                        let value = values
                            .get(next - 1)
                            .ok_or_else(|| CompileError::MissingBind(format!("?{}", next)))?;
                        bind_value(g, value, out)?;
                    }
                }
            }
        }
        SqlBinds::Named(values) => {
            for token in tokenize(&o.sql, named_tokens)? {
                match token {
                    Token::Named(name) => {
                        let value = values
                            .get(name)
                            .ok_or_else(|| CompileError::MissingBind(format!(":{}", name)))?;
                        bind_value(g, value, out)?;
                    }
                    Token::Text(text) => {
                        out.append(text);
                    }
                    Token::Positional => {}
                }
            }
        }
    }
    Ok(())
}

fn bind_value<G: SqlGenerator + ?Sized>(
    g: &G,
    value: &BoundValue,
    out: &mut Collector<'_>,
) -> CompileResult<()> {
    match value {
        BoundValue::Node(node) => g.visit(node, out),
        BoundValue::Value(v) => {
            out.add_bind(v.clone(), g.bind_placeholder());
            Ok(())
        }
        BoundValue::List(items) if items.is_empty() => {
            out.append(&g.quote(&Value::Null));
            Ok(())
        }
        BoundValue::List(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.append(", ");
                }
                match item {
                    BoundValue::List(_) => {
                        return Err(CompileError::InvalidValue(
                            "nested list in SQL literal bind".to_string(),
                        ));
                    }
                    other => bind_value(g, other, out)?,
                }
            }
            Ok(())
        }
    }
}
