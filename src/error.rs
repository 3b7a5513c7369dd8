use thiserror::Error;

#[derive(Debug, Error)]
pub enum DebugError {
    #[error("invalid launch configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("no project path configured")]
    MissingProject,

    #[error("stale variable chunk: expected generation {expected}, got {got}")]
    StaleChunk { expected: u64, got: u64 },
}
