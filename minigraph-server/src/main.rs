//! minigraph HTTP server.
//!
//! Env: `LISTEN` (default `0.0.0.0:8000`), `MINIGRAPH_MAX_STEPS`, `MINIGRAPH_BACKGROUND`,
//! `LOG_FILE`, `RUST_LOG`. `.env` is loaded with dotenv.

use minigraph::EngineConfig;
use minigraph_workflows::code_review_engine;
use tracing::info;

/// `.env` in the parent of the working directory, if there is one.
fn parent_dotenv() -> Option<std::path::PathBuf> {
    let path = std::env::current_dir().ok()?.parent()?.join(".env");
    path.is_file().then_some(path)
}

/// Loads `.env` from the working directory, falling back to its parent so `cargo run -p` from
/// a crate directory still picks up the workspace file.
fn load_dotenv() {
    if dotenv::dotenv().is_ok() {
        return;
    }
    if let Some(path) = parent_dotenv() {
        if let Err(e) = dotenv::from_path(&path) {
            eprintln!("ignoring {}: {}", path.display(), e);
        }
    }
}

/// Initializes tracing to stdout; if `LOG_FILE` is set, also appends plain text to that file.
fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::Layer;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("info,minigraph=debug,minigraph_server=debug")
    });

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_filter(filter.clone());
    let registry = tracing_subscriber::registry().with(stdout_layer);

    if let Ok(path) = std::env::var("LOG_FILE") {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_target(true)
            .with_filter(filter);
        registry.with(file_layer).init();
        tracing::info!(path = %path, "logging to file");
    } else {
        registry.init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    load_dotenv();
    init_tracing()?;

    let config = EngineConfig::from_env();
    info!(
        default_iteration_limit = config.default_iteration_limit,
        background = config.background_enabled,
        "engine config loaded"
    );
    let engine = code_review_engine(config)?;
    let app = minigraph_server::router(engine);

    let listen = std::env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    info!("listening on http://{}", listen);
    let listener = tokio::net::TcpListener::bind(&listen).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
