//! Transpiler test modules.
//!
//! Tests are organized by category:
//! - `core`: Basic SELECT, UPDATE, DELETE, INSERT tests
//! - `dialects`: SQL dialect-specific tests (MySQL, SQLite, Oracle, etc.)
//! - `features`: CTEs, windows, bound SQL, hints and other constructs
//! - `dispatch`: Handler resolution through real generators

mod core;
mod dialects;
