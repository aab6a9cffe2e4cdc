//! SQL compilers for relational-algebra trees.
//!
//! A generator walks a [`Node`] tree through the dispatcher and writes SQL
//! text and binds into a [`Collector`](crate::collector::Collector). Dialects
//! override only the rules whose SQL differs and fall back to the base table
//! for everything else.

pub mod bound_sql;
pub mod conditions;
pub mod dialect;
pub mod dispatch;
pub mod dml;
pub mod expressions;
pub mod joins;
pub mod sql;
pub mod traits;

#[cfg(test)]
mod tests;

use crate::ast::*;
use crate::collector::Compiled;
use crate::error::CompileResult;

pub use dialect::Dialect;
pub use dispatch::Visitor;
pub use traits::{GeneratorOptions, SqlGenerator};

/// Trait for compiling trees to SQL.
pub trait ToSql {
    /// Compile with the given dialect, keeping binds and flags.
    fn compile_with_dialect(&self, dialect: Dialect) -> CompileResult<Compiled>;

    /// Convert this node to a SQL string using the default dialect.
    fn to_sql(&self) -> CompileResult<String> {
        self.to_sql_with_dialect(Dialect::default())
    }

    /// Convert this node to a SQL string with a specific dialect.
    fn to_sql_with_dialect(&self, dialect: Dialect) -> CompileResult<String> {
        Ok(self.compile_with_dialect(dialect)?.sql)
    }
}

impl ToSql for Node {
    fn compile_with_dialect(&self, dialect: Dialect) -> CompileResult<Compiled> {
        dialect.generator().compile(self)
    }
}

impl ToSql for SelectStatement {
    fn compile_with_dialect(&self, dialect: Dialect) -> CompileResult<Compiled> {
        dialect
            .generator()
            .compile(&Node::SelectStatement(self.clone()))
    }
}

impl ToSql for InsertStatement {
    fn compile_with_dialect(&self, dialect: Dialect) -> CompileResult<Compiled> {
        dialect
            .generator()
            .compile(&Node::InsertStatement(self.clone()))
    }
}

impl ToSql for UpdateStatement {
    fn compile_with_dialect(&self, dialect: Dialect) -> CompileResult<Compiled> {
        dialect
            .generator()
            .compile(&Node::UpdateStatement(self.clone()))
    }
}

impl ToSql for DeleteStatement {
    fn compile_with_dialect(&self, dialect: Dialect) -> CompileResult<Compiled> {
        dialect
            .generator()
            .compile(&Node::DeleteStatement(self.clone()))
    }
}
