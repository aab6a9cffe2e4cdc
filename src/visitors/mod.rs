//! Visitors other than the SQL generators.

pub mod depth_first;
pub mod dot;
pub mod where_sql;

pub use depth_first::{collect_binds, DepthFirst};
pub use dot::{to_dot, Dot};
pub use where_sql::{where_sql, WhereSql};
