//! Edge predicates over state.
//!
//! Conditions are plain data so graph specs stay serializable. Evaluation reads the state and
//! never mutates it. Field paths are dotted (`issues.total`).

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::state::{lookup, State};

/// Comparison operator. Serialized as its symbol (`"<"`, `">="`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    #[default]
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        };
        f.write_str(s)
    }
}

/// Predicate over the run state, used by conditional edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// `state[field] <op> value`.
    Compare {
        field: String,
        #[serde(default)]
        op: CompareOp,
        value: Value,
    },
    /// Field is present (any value, including null).
    Exists { field: String },
    Not(Box<Condition>),
    /// All hold; an empty list holds.
    All(Vec<Condition>),
    /// At least one holds; an empty list does not.
    Any(Vec<Condition>),
}

/// Condition could not be evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConditionError {
    /// Ordering comparison between values of different kinds (e.g. string < number).
    #[error("cannot compare field `{field}` ({left}) {op} {right}")]
    Incomparable {
        field: String,
        op: CompareOp,
        left: String,
        right: String,
    },
}

impl Condition {
    pub fn compare(field: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Condition::Compare {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Ne, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Lt, value)
    }

    pub fn le(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Le, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Gt, value)
    }

    pub fn ge(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Ge, value)
    }

    pub fn exists(field: impl Into<String>) -> Self {
        Condition::Exists {
            field: field.into(),
        }
    }

    pub fn negate(self) -> Self {
        Condition::Not(Box::new(self))
    }

    /// Evaluates against `state`.
    ///
    /// Missing or null fields never satisfy an ordering comparison; for `==` / `!=` a missing
    /// field compares as null. Numbers compare numerically regardless of integer/float form.
    pub fn evaluate(&self, state: &State) -> Result<bool, ConditionError> {
        match self {
            Condition::Compare { field, op, value } => {
                compare(field, *op, lookup(state, field), value)
            }
            Condition::Exists { field } => Ok(lookup(state, field).is_some()),
            Condition::Not(inner) => Ok(!inner.evaluate(state)?),
            Condition::All(conds) => {
                for c in conds {
                    if !c.evaluate(state)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Condition::Any(conds) => {
                for c in conds {
                    if c.evaluate(state)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

fn compare(
    field: &str,
    op: CompareOp,
    actual: Option<&Value>,
    expected: &Value,
) -> Result<bool, ConditionError> {
    match op {
        CompareOp::Eq => Ok(values_equal(actual.unwrap_or(&Value::Null), expected)),
        CompareOp::Ne => Ok(!values_equal(actual.unwrap_or(&Value::Null), expected)),
        CompareOp::Lt | CompareOp::Le | CompareOp::Gt | CompareOp::Ge => {
            let actual = match actual {
                None | Some(Value::Null) => return Ok(false),
                Some(v) => v,
            };
            let ordering = order(actual, expected).ok_or_else(|| ConditionError::Incomparable {
                field: field.to_string(),
                op,
                left: kind(actual).to_string(),
                right: kind(expected).to_string(),
            })?;
            Ok(match op {
                CompareOp::Lt => ordering == Ordering::Less,
                CompareOp::Le => ordering != Ordering::Greater,
                CompareOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            })
        }
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) if a.is_number() && b.is_number() => x == y,
        _ => a == b,
    }
}

fn order(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
