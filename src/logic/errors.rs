use thiserror::Error;

/// Structured failure kinds surfaced to whoever renders the error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InsufficientData, // Nothing to average, or a zero cost average
    NotFound,         // Selection anchor or target missing from the view
    EmptyInput,       // Aggregate over an empty set
    InvalidAmount,    // Money string that is not a decimal number
    Other,
}

impl ErrorKind {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorKind::InsufficientData => "insufficient data",
            ErrorKind::NotFound => "not found",
            ErrorKind::EmptyInput => "empty input",
            ErrorKind::InvalidAmount => "invalid amount",
            ErrorKind::Other => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("{0} is not in the current view")]
    NotFound(String),

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InsufficientData(_) => ErrorKind::InsufficientData,
            EngineError::NotFound(_) => ErrorKind::NotFound,
            EngineError::EmptyInput(_) => ErrorKind::EmptyInput,
            EngineError::InvalidAmount(_) => ErrorKind::InvalidAmount,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Classify an error based on its error chain
///
/// Engine failures keep their kind even when wrapped in `anyhow` context.
pub fn classify_error(error: &anyhow::Error) -> ErrorKind {
    error
        .chain()
        .find_map(|err| err.downcast_ref::<EngineError>())
        .map(EngineError::kind)
        .unwrap_or(ErrorKind::Other)
}

/// Format error message with its root cause
pub fn format_error_message(error: &anyhow::Error) -> String {
    let mut source = error.source();
    let mut deepest = error.to_string();

    while let Some(err) = source {
        deepest = err.to_string();
        source = err.source();
    }

    if deepest == error.to_string() {
        deepest
    } else {
        format!("{}: {}", error, deepest)
    }
}
