//! Dialect generators.
//!
//! Each generator is the base renderer plus a sparse set of overrides.

pub mod ansi;
pub mod db2;
pub mod mysql;
pub mod oracle;
pub mod postgres;
pub mod sqlite;
pub mod sqlserver;
