use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    /// The game result store could not be read or written.
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
