//! Shared run state: a schema-less JSON object.
//!
//! Nodes read and write arbitrary keys; conditions address keys by dotted path
//! (`issues.total`). Which keys exist is a workflow convention, not something the engine checks.

use serde_json::{Map, Value};

/// State passed between nodes. Each node returns the full replacement state.
pub type State = Map<String, Value>;

/// Looks up a value by dotted path (`"a.b.c"`). Returns `None` when any segment is missing or
/// an intermediate value is not an object.
pub fn lookup<'a>(state: &'a State, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut value = state.get(first)?;
    for segment in segments {
        value = value.as_object()?.get(segment)?;
    }
    Some(value)
}

/// Builds a state from a JSON value; non-object values yield an empty state.
pub fn from_value(value: Value) -> State {
    match value {
        Value::Object(map) => map,
        _ => State::new(),
    }
}
