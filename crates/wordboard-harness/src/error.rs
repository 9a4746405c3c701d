use thiserror::Error;
use wordboard_core::ReorderError;
use wordboard_core::config::ConfigError;
use wordboard_core::trace::TraceError;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("trace error: {0}")]
    Trace(#[from] TraceError),

    #[error("table error: {0}")]
    Table(#[from] ReorderError),

    #[error("invalid config: {}", problems.join("; "))]
    InvalidConfig { problems: Vec<String> },

    #[error("{failed} of {total} replayed records failed")]
    ReplayFailed { failed: usize, total: usize },
}

impl HarnessError {
    /// Process exit code: 2 for strict-replay failures, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ReplayFailed { .. } => 2,
            _ => 1,
        }
    }
}
