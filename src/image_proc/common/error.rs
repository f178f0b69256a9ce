use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcError {
    #[error("{context}: expected shape {expected:?}, got {actual:?}")]
    ShapeMismatch {
        context: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ProcError {
    pub(crate) fn shape_mismatch(context: &'static str, expected: &[usize], actual: &[usize]) -> Self {
        ProcError::ShapeMismatch {
            context,
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        ProcError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ProcError>;
