//! # minigraph-workflows
//!
//! Workflows built on `minigraph`. Currently one: a rule-based code review that splits source
//! into functions, scores complexity and smells with two tools, computes a quality score, and
//! loops back while the score is below a threshold.
//!
//! ```rust,no_run
//! use minigraph::{EngineConfig, RunOptions};
//! use minigraph_workflows::{code_review_engine, code_review_graph, sample_state};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), minigraph::GraphError> {
//! let engine = code_review_engine(EngineConfig::default())?;
//! let graph_id = engine.create_graph(code_review_graph()).await?;
//! let run = engine.run(&graph_id, sample_state(), RunOptions::sync()).await?;
//! println!("score: {}", run.state["quality_score"]);
//! # Ok(())
//! # }
//! ```

pub mod code_review;
pub mod tools;

pub use code_review::{
    code_review_engine, code_review_graph, register_nodes, review_state, sample_state,
    CheckComplexity, CheckDone, DetectBasicIssues, ExtractFunctions, SuggestImprovements,
    DEFAULT_THRESHOLD, MAX_STEPS, SAMPLE_CODE, SAMPLE_THRESHOLD,
};
pub use tools::{compute_complexity, detect_smells, register_tools};
