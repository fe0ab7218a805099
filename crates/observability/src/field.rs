//! Structured key/value fields.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

/// One key/value pair attached to a record or bound to a logger.
///
/// Field lists are plain ordered slices: encoders write them left to right
/// and never sort or de-duplicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    key: Cow<'static, str>,
    value: Value,
}

impl Field {
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Field whose value is the `Display` rendering of `value`.
    pub fn display(key: impl Into<Cow<'static, str>>, value: impl fmt::Display) -> Self {
        Self::new(key, value.to_string())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Build an ordered `Vec<Field>` from `key => value` pairs.
///
/// ```
/// use tracelog_observability::fields;
///
/// let fields = fields!["order_id" => "o-17", "attempt" => 2];
/// assert_eq!(fields[0].key(), "order_id");
/// assert_eq!(fields[1].value(), &serde_json::json!(2));
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        ::std::vec::Vec::<$crate::Field>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Field::new($key, $value)),+]
    };
}
