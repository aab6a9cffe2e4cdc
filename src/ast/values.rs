use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

use super::Kind;

/// A host value carried by a bind, a quoted literal or a raw leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    String(String),
    Symbol(String),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Bytes(Vec<u8>),
    Uuid(Uuid),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The variant tag used when a raw value reaches a visitor.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Int(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::Decimal(_) => Kind::Decimal,
            Value::String(_) => Kind::String,
            Value::Symbol(_) => Kind::Symbol,
            Value::Date(_) => Kind::Date,
            Value::Time(_) => Kind::Time,
            Value::DateTime(_) => Kind::DateTime,
            Value::Bytes(_) => Kind::Bytes,
            Value::Uuid(_) => Kind::Uuid,
        }
    }

    /// Integer view used by pagination rewrites.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Decimal(d) if d.fract().is_zero() => d.to_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::String(s) => write!(f, "{}", s),
            Value::Symbol(s) => write!(f, ":{}", s),
            Value::Date(d) => write!(f, "{}", d),
            Value::Time(t) => write!(f, "{}", t),
            Value::DateTime(dt) => write!(f, "{}", dt),
            Value::Bytes(bytes) => {
                for byte in bytes {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            Value::Uuid(u) => write!(f, "{}", u),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Value::Uuid(u)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Column type attached to a bind, used for casting and range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlType {
    /// Signed integer stored in `limit` bytes (1, 2, 4 or 8).
    Integer { limit: u8 },
    Float,
    Decimal,
    Text,
    Boolean,
    Date,
    DateTime,
}

impl SqlType {
    /// The default integer column (4 bytes).
    pub const INTEGER: SqlType = SqlType::Integer { limit: 4 };
    pub const BIG_INTEGER: SqlType = SqlType::Integer { limit: 8 };

    fn integer_range(limit: u8) -> (i128, i128) {
        let bits = (limit.clamp(1, 8) as u32) * 8;
        let max = (1i128 << (bits - 1)) - 1;
        (-max - 1, max)
    }

    /// Cast a host value to what the database column expects.
    pub fn cast(&self, value: &Value) -> Value {
        match (self, value) {
            (SqlType::Integer { .. }, Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .unwrap_or_else(|_| value.clone()),
            (SqlType::Integer { .. }, Value::Float(f)) => Value::Int(f.trunc() as i64),
            (SqlType::Integer { .. }, Value::Bool(b)) => Value::Int(*b as i64),
            (SqlType::Float, Value::Int(n)) => Value::Float(*n as f64),
            (SqlType::Text, Value::Int(_) | Value::Float(_) | Value::Decimal(_)) => {
                Value::String(value.to_string())
            }
            (SqlType::Text, Value::Symbol(s)) => Value::String(s.clone()),
            _ => value.clone(),
        }
    }
}

/// Values that can declare themselves permanently unsatisfiable.
///
/// `Some(Ordering::Greater)` means the value lies above the range the column
/// can store, `Some(Ordering::Less)` below it. Comparisons against such a value
/// collapse to a constant predicate without emitting a bind.
pub trait Unboundable {
    fn unboundable(&self) -> Option<Ordering>;
}

impl Unboundable for (SqlType, &Value) {
    fn unboundable(&self) -> Option<Ordering> {
        let (ty, value) = *self;
        let SqlType::Integer { limit } = ty else {
            return None;
        };
        let n: i128 = match ty.cast(value) {
            Value::Int(n) => n as i128,
            Value::Decimal(d) => d.trunc().to_i128()?,
            _ => return None,
        };
        let (min, max) = SqlType::integer_range(limit);
        if n > max {
            Some(Ordering::Greater)
        } else if n < min {
            Some(Ordering::Less)
        } else {
            None
        }
    }
}
