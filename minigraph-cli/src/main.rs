//! minigraph binary: review a source file or list tools.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use minigraph_cli::{render_report, review_file, tool_names, ReviewConfig};

#[derive(Parser, Debug)]
#[command(name = "minigraph")]
#[command(about = "Run the minigraph code-review workflow")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Review a source file: extract functions, score complexity and smells, suggest fixes
    Review {
        /// File to review
        file: PathBuf,

        /// Quality score the review must reach (default 80)
        #[arg(short, long, value_name = "N")]
        threshold: Option<f64>,

        /// Iteration limit for the run (default: the graph's 50)
        #[arg(long, value_name = "N")]
        max_steps: Option<usize>,

        /// Print the run record as JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// List registered tools
    Tools,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    init_tracing();
    let args = Args::parse();

    match args.command {
        Command::Tools => {
            for name in tool_names()? {
                println!("{}", name);
            }
        }
        Command::Review {
            file,
            threshold,
            max_steps,
            json,
        } => {
            let mut config = ReviewConfig::new(file);
            config.threshold = threshold;
            config.max_steps = max_steps;

            let run = match review_file(&config).await {
                Ok(run) => run,
                Err(e) => {
                    eprintln!("error: {}", e);
                    std::process::exit(1);
                }
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&run)?);
            } else {
                print!("{}", render_report(&run));
            }
            if run.is_failed() {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
