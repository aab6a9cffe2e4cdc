//! Statement rendering.
//!
//! SELECT (with set operations and pagination options), INSERT, UPDATE and
//! DELETE (with the subselect rewrite), CTEs and windows.

pub mod cte;
pub mod delete;
pub mod insert;
pub mod select;
pub mod update;
pub mod window;
