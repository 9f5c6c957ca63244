use std::time::Duration;
use thiserror::Error;

// Bring in specific errors from other modules we want to wrap
pub use crate::measure::MeasureError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WrapError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("Measurement failed: {0}")]
    Measurement(#[from] MeasureError),

    #[error("Wrapping search cancelled after {elapsed:?} ({candidates} candidates visited)")]
    Cancelled {
        elapsed: Duration,
        candidates: usize,
    },
}

// Type alias for results of the wrapping search
pub type WrapResult<T> = Result<T, WrapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_error_converts() {
        let err: WrapError = MeasureError::new("abc", "no font loaded").into();
        assert_eq!(
            err.to_string(),
            "Measurement failed: cannot measure \"abc\": no font loaded"
        );
    }

    #[test]
    fn test_invalid_argument_message() {
        let err = WrapError::InvalidArgument("max_rows must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid argument: max_rows must be at least 1"
        );
    }
}
