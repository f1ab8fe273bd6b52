//! Outgoing edge of a node: unconditional, or ordered predicate branches with a default.
//!
//! Besides the canonical form, deserialization accepts the compact shapes used by HTTP clients:
//! a bare target string, `{"next": target}`, and a single comparison
//! `{"field", "op", "value", "true", "false"}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::State;

use super::condition::{CompareOp, Condition, ConditionError};
use super::spec::END;

/// One guarded branch of a conditional edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub when: Condition,
    pub target: String,
}

impl Branch {
    pub fn new(when: Condition, target: impl Into<String>) -> Self {
        Self {
            when,
            target: target.into(),
        }
    }
}

/// Outgoing edge of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EdgeRepr", into = "EdgeRepr")]
pub enum Edge {
    /// Always go to the target.
    Direct(String),
    /// First branch whose condition holds wins; otherwise `default`; otherwise end of graph.
    Conditional {
        branches: Vec<Branch>,
        default: Option<String>,
    },
}

impl Edge {
    pub fn to(target: impl Into<String>) -> Self {
        Edge::Direct(target.into())
    }

    pub fn conditional(branches: Vec<Branch>, default: Option<String>) -> Self {
        Edge::Conditional { branches, default }
    }

    /// Every target named by this edge, in declaration order (default last).
    pub fn targets(&self) -> Vec<&str> {
        match self {
            Edge::Direct(t) => vec![t.as_str()],
            Edge::Conditional { branches, default } => branches
                .iter()
                .map(|b| b.target.as_str())
                .chain(default.as_deref())
                .collect(),
        }
    }

    /// Picks the target for `state`. `Ok(None)` means end of graph (no match and no default,
    /// or an explicit `END` target).
    pub fn resolve(&self, state: &State) -> Result<Option<&str>, ConditionError> {
        let target = match self {
            Edge::Direct(t) => Some(t.as_str()),
            Edge::Conditional { branches, default } => {
                let mut hit = None;
                for branch in branches {
                    if branch.when.evaluate(state)? {
                        hit = Some(branch.target.as_str());
                        break;
                    }
                }
                hit.or(default.as_deref())
            }
        };
        Ok(target.filter(|t| *t != END))
    }
}

/// Wire shapes accepted for an edge. Tried in declaration order.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum EdgeRepr {
    Direct(String),
    Conditional {
        branches: Vec<Branch>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<String>,
    },
    IfElse {
        field: String,
        #[serde(default)]
        op: CompareOp,
        value: Value,
        #[serde(rename = "true", default)]
        if_true: Option<String>,
        #[serde(rename = "false", default)]
        if_false: Option<String>,
    },
    Next {
        next: String,
    },
}

impl From<EdgeRepr> for Edge {
    fn from(repr: EdgeRepr) -> Self {
        match repr {
            EdgeRepr::Direct(t) | EdgeRepr::Next { next: t } => Edge::Direct(t),
            EdgeRepr::Conditional { branches, default } => Edge::Conditional { branches, default },
            EdgeRepr::IfElse {
                field,
                op,
                value,
                if_true,
                if_false,
            } => Edge::Conditional {
                branches: vec![Branch::new(
                    Condition::compare(field, op, value),
                    if_true.unwrap_or_else(|| END.to_string()),
                )],
                default: if_false,
            },
        }
    }
}

impl From<Edge> for EdgeRepr {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::Direct(t) => EdgeRepr::Direct(t),
            Edge::Conditional { branches, default } => EdgeRepr::Conditional { branches, default },
        }
    }
}
