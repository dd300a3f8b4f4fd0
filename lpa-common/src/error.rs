use thiserror::Error;

pub type LpaResult<T> = Result<T, LpaError>;

#[derive(Debug, Error)]
pub enum LpaError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A vertex is referenced by an edge or a message but carries no value.
    #[error("missing vertex value: {0}")]
    MissingVertexValue(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}
