use thiserror::Error;

/// Validation failures raised by request builders before any state changes.
///
/// Absent-argument failures from the original REST surface are unrepresentable
/// here since the builder methods take owned values; what remains are the
/// structural limit and length checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl RequestError {
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        RequestError::InvalidArgument(message.into())
    }
}
