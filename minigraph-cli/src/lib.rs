//! minigraph-cli library: review a source file with the code-review workflow.
//!
//! ## Usage
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), minigraph_cli::Error> {
//! let config = minigraph_cli::ReviewConfig::new("src/app.py").with_threshold(85.0);
//! let run = minigraph_cli::review_file(&config).await?;
//! println!("{}", minigraph_cli::render_report(&run));
//! # Ok(())
//! # }
//! ```

mod error;
mod review;

pub use error::Error;
pub use review::{render_report, review_file, review_source, tool_names, ReviewConfig};
