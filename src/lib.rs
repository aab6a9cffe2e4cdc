//! # relsql
//!
//! Relational-algebra trees compiled to dialect-exact SQL with bind parameters.
//!
//! ## Quick Example
//!
//! ```rust
//! use relsql::prelude::*;
//!
//! let users = Table::new("users");
//! let stmt = SelectStatement::new(
//!     SelectCore::from_table(users.clone()).filter(eq(users.attr("id"), bind(42))),
//! )
//! .limit(10);
//!
//! let compiled = stmt.compile_with_dialect(Dialect::Postgres).unwrap();
//! assert_eq!(
//!     compiled.sql,
//!     "SELECT * FROM \"users\" WHERE \"users\".\"id\" = $1 LIMIT 10"
//! );
//! assert_eq!(compiled.binds, vec![Value::Int(42)]);
//! ```
//!
//! ## Dialects
//!
//! | Dialect     | Binds | Pagination                         |
//! |-------------|-------|------------------------------------|
//! | `ansi`      | `?`   | `LIMIT` / `OFFSET`                 |
//! | `postgres`  | `$n`  | `LIMIT` / `OFFSET`                 |
//! | `mysql`     | `?`   | `LIMIT`, implicit max for `OFFSET` |
//! | `sqlite`    | `?`   | `LIMIT -1` for bare `OFFSET`       |
//! | `oracle`    | `:an` | `ROWNUM` wrappers                  |
//! | `oracle12`  | `:an` | `OFFSET ... FETCH FIRST`           |
//! | `sqlserver` | `?`   | `ROW_NUMBER()` wrapper             |
//! | `db2`       | `?`   | `OFFSET ... FETCH FIRST`           |

pub mod ast;
pub mod collector;
pub mod config;
pub mod error;
pub mod quoting;
pub mod transpiler;
pub mod visitors;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::collector::Compiled;
    pub use crate::config::CompilerConfig;
    pub use crate::error::*;
    pub use crate::transpiler::{Dialect, SqlGenerator, ToSql};
}
