//! Output sink threaded through every visit of one compile call.

use serde::Serialize;

use crate::ast::Value;
use crate::quoting::Quoting;

/// Formats the placeholder for the bind at a 1-based position.
pub type Placeholder = fn(usize) -> String;

/// The result of one compile call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Compiled {
    pub sql: String,
    /// Bind values, aligned with the placeholders in `sql`.
    pub binds: Vec<Value>,
    pub preparable: bool,
    pub retryable: bool,
}

/// Accumulates SQL text, bind values and the statement flags.
///
/// A collector belongs to exactly one compile call. In substitute mode binds
/// are quoted inline instead of being emitted as placeholders.
pub struct Collector<'q> {
    sql: String,
    binds: Vec<Value>,
    bind_index: usize,
    /// Cleared when the SQL shape depends on runtime values.
    pub preparable: bool,
    /// Cleared when the statement has side effects.
    pub retryable: bool,
    substitute: Option<&'q dyn Quoting>,
}

impl Default for Collector<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'q> Collector<'q> {
    pub fn new() -> Self {
        Self {
            sql: String::new(),
            binds: Vec::new(),
            bind_index: 1,
            preparable: true,
            retryable: true,
            substitute: None,
        }
    }

    /// A collector that inlines every bind through `quoting`.
    pub fn substituting(quoting: &'q dyn Quoting) -> Self {
        Self {
            substitute: Some(quoting),
            ..Self::new()
        }
    }

    pub fn append(&mut self, text: &str) -> &mut Self {
        self.sql.push_str(text);
        self
    }

    pub fn add_bind(&mut self, value: Value, placeholder: Placeholder) -> &mut Self {
        match self.substitute {
            Some(quoting) => {
                let quoted = quoting.quote(&value);
                self.sql.push_str(&quoted);
            }
            None => {
                self.sql.push_str(&placeholder(self.bind_index));
                self.bind_index += 1;
                self.binds.push(value);
            }
        }
        self
    }

    /// Bind every value, comma-separated, optionally projecting each first.
    pub fn add_binds(
        &mut self,
        values: &[Value],
        project: Option<&dyn Fn(&Value) -> Value>,
        placeholder: Placeholder,
    ) -> &mut Self {
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            let value = match project {
                Some(f) => f(value),
                None => value.clone(),
            };
            self.add_bind(value, placeholder);
        }
        self
    }

    /// The text accumulated so far.
    pub fn value(&self) -> &str {
        &self.sql
    }

    pub fn binds(&self) -> &[Value] {
        &self.binds
    }

    pub fn is_substituting(&self) -> bool {
        self.substitute.is_some()
    }

    pub fn finish(self) -> Compiled {
        Compiled {
            sql: self.sql,
            binds: self.binds,
            preparable: self.preparable,
            retryable: self.retryable,
        }
    }
}
