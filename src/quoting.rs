//! Quoting services and the schema lookup consumed by the compilers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::Value;

static COMMENT_DELIMITERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/+\*+\+?\s*|\s*\*+/+").expect("comment delimiter pattern"));

/// Identifier and literal quoting for one database.
pub trait Quoting: Send + Sync {
    fn quote_column_name(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    /// Dotted names are quoted part by part.
    fn quote_table_name(&self, name: &str) -> String {
        name.split('.')
            .map(|part| self.quote_column_name(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    fn quote_string(&self, s: &str) -> String {
        format!("'{}'", s.replace('\'', "''"))
    }

    fn quoted_true(&self) -> &'static str {
        "TRUE"
    }

    fn quoted_false(&self) -> &'static str {
        "FALSE"
    }

    fn quote_bytes(&self, bytes: &[u8]) -> String {
        let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
        format!("X'{}'", hex)
    }

    /// Render a host value as an inline SQL literal.
    fn quote(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(true) => self.quoted_true().to_string(),
            Value::Bool(false) => self.quoted_false().to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Decimal(d) => d.to_string(),
            Value::String(s) | Value::Symbol(s) => self.quote_string(s),
            Value::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
            Value::Time(t) => format!("'{}'", t.format("%H:%M:%S%.f")),
            Value::DateTime(dt) => format!("'{}'", dt.format("%Y-%m-%d %H:%M:%S%.f")),
            Value::Bytes(bytes) => self.quote_bytes(bytes),
            Value::Uuid(u) => self.quote_string(&u.to_string()),
        }
    }

    /// Strip anything that could close a `/* ... */` comment early.
    fn sanitize_as_sql_comment(&self, comment: &str) -> String {
        let mut current = comment.to_string();
        loop {
            let next = COMMENT_DELIMITERS.replace_all(&current, "").into_owned();
            if next == current {
                return next;
            }
            current = next;
        }
    }
}

/// Double-quoted identifiers, `TRUE`/`FALSE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiQuoting;

impl Quoting for AnsiQuoting {}

/// Backtick identifiers and backslash-escaped strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlQuoting;

impl Quoting for MysqlQuoting {
    fn quote_column_name(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn quote_string(&self, s: &str) -> String {
        format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

/// Double-quoted identifiers with integer booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteQuoting;

impl Quoting for SqliteQuoting {
    fn quoted_true(&self) -> &'static str {
        "1"
    }

    fn quoted_false(&self) -> &'static str {
        "0"
    }
}

/// Bracketed identifiers, `N'...'` strings and integer booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerQuoting;

impl Quoting for SqlServerQuoting {
    fn quote_column_name(&self, name: &str) -> String {
        format!("[{}]", name.replace(']', "]]"))
    }

    fn quote_string(&self, s: &str) -> String {
        format!("N'{}'", s.replace('\'', "''"))
    }

    fn quoted_true(&self) -> &'static str {
        "1"
    }

    fn quoted_false(&self) -> &'static str {
        "0"
    }

    fn quote_bytes(&self, bytes: &[u8]) -> String {
        let hex: String = bytes.iter().map(|b| format!("{:02X}", b)).collect();
        format!("0x{}", hex)
    }
}

/// Integer booleans, otherwise ANSI.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleQuoting;

impl Quoting for OracleQuoting {
    fn quoted_true(&self) -> &'static str {
        "1"
    }

    fn quoted_false(&self) -> &'static str {
        "0"
    }

    fn quote_bytes(&self, bytes: &[u8]) -> String {
        let hex: String = bytes.iter().map(|b| format!("{:02X}", b)).collect();
        format!("HEXTORAW('{}')", hex)
    }
}

/// Primary-key discovery for pagination rewrites.
pub trait SchemaLookup: Send + Sync {
    fn primary_key(&self, table: &str) -> Option<String>;
}

/// A lookup that knows no keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSchema;

impl SchemaLookup for NoSchema {
    fn primary_key(&self, _table: &str) -> Option<String> {
        None
    }
}

/// A fixed table-to-key map.
#[derive(Debug, Clone, Default)]
pub struct StaticSchema {
    keys: std::collections::HashMap<String, String>,
}

impl StaticSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, table: impl Into<String>, key: impl Into<String>) -> Self {
        self.keys.insert(table.into(), key.into());
        self
    }
}

impl SchemaLookup for StaticSchema {
    fn primary_key(&self, table: &str) -> Option<String> {
        self.keys.get(table).cloned()
    }
}
