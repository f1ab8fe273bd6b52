//! Engine config: default iteration limit and whether background runs are allowed.
//!
//! Filled from env via [`EngineConfig::from_env`]; callers (server, CLI) may override fields
//! afterwards.

/// Iteration limit used when neither the run nor the graph sets one.
pub const DEFAULT_ITERATION_LIMIT: usize = 1000;

/// Env var for [`EngineConfig::default_iteration_limit`].
pub const ENV_MAX_STEPS: &str = "MINIGRAPH_MAX_STEPS";

/// Env var for [`EngineConfig::background_enabled`].
pub const ENV_BACKGROUND: &str = "MINIGRAPH_BACKGROUND";

/// Engine-wide settings.
///
/// **Interaction**: Passed to `WorkflowEngine::new`; read on every `run`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Loop bound for runs that do not specify one and whose graph has no `max_steps`.
    pub default_iteration_limit: usize,
    /// When false, background run requests execute synchronously.
    pub background_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_iteration_limit: DEFAULT_ITERATION_LIMIT,
            background_enabled: true,
        }
    }
}

impl EngineConfig {
    /// Reads `MINIGRAPH_MAX_STEPS` and `MINIGRAPH_BACKGROUND`. Unset or invalid values keep the
    /// defaults (invalid ones are logged).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_MAX_STEPS) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.default_iteration_limit = n,
                _ => tracing::warn!(
                    var = ENV_MAX_STEPS,
                    value = %raw,
                    "invalid iteration limit, using default"
                ),
            }
        }
        if let Some(raw) = lookup(ENV_BACKGROUND) {
            match parse_bool(&raw) {
                Some(b) => config.background_enabled = b,
                None => tracing::warn!(
                    var = ENV_BACKGROUND,
                    value = %raw,
                    "invalid boolean, using default"
                ),
            }
        }
        config
    }

    pub fn with_default_iteration_limit(mut self, limit: usize) -> Self {
        self.default_iteration_limit = limit;
        self
    }

    pub fn with_background(mut self, enabled: bool) -> Self {
        self.background_enabled = enabled;
        self
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
