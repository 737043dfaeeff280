use thiserror::Error;

/// Failure taxonomy for the engine.
///
/// Initialization errors are terminal for setup (the engine never starts).
/// Frame errors are caught at the loop boundary and fail-stop the loop:
/// a corrupted frame state is not safely resumable, so there is no retry.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The drawable surface never became available within the retry budget.
    #[error("drawable surface unavailable after {attempts} attempts")]
    Init { attempts: u32 },

    /// Initialization was cancelled by the host (teardown mid-init).
    #[error("initialization cancelled")]
    Cancelled,

    /// Invalid engine configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// An unrecovered error escaped the per-frame update/render pipeline.
    #[error("frame failed: {0}")]
    Frame(String),
}
