//! Code-review workflow.
//!
//! State keys (all conventions of this workflow, not engine schema):
//!
//! | Key                 | Written by             | Shape                                   |
//! |---------------------|------------------------|-----------------------------------------|
//! | `code`              | caller                 | string                                  |
//! | `threshold`         | caller (default 80)    | number                                  |
//! | `functions`         | `extract_functions`    | `[{name, code}]`                        |
//! | `complexity_report` | `check_complexity`     | `[{name, complexity}]`                  |
//! | `issues`            | `detect_basic_issues`  | `{total, detail: [{name, issues}]}`     |
//! | `quality_score`     | `suggest_improvements` | integer in `0..=100`                    |
//! | `suggestions`       | `suggest_improvements` | `[string]`                              |
//!
//! Every node returns the state it received plus its own keys.

mod graph;
mod nodes;

pub use graph::{
    code_review_engine, code_review_graph, review_state, sample_state, MAX_STEPS, SAMPLE_CODE,
    SAMPLE_THRESHOLD,
};
pub use nodes::{
    register_nodes, CheckComplexity, CheckDone, DetectBasicIssues, ExtractFunctions,
    SuggestImprovements, DEFAULT_THRESHOLD,
};
