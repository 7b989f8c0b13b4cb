use ndarray::ShapeError;
use thiserror::Error;

/// Enum of the possible error variants that may be encountered
#[derive(Error, Debug)]
pub enum TractrixError {
    /// Two inputs that should line up row-for-row have different lengths
    #[error("Input lengths do not match: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// A batch with no solar wind samples in it
    #[error("No solar wind samples were provided")]
    EmptyBatch,

    /// A surface needs at least one point
    #[error("Number of points must be at least 1")]
    InvalidPointCount,

    /// Malformed tuning parameters
    #[error("{0}")]
    InvalidParameters(String),

    /// Output arrays could not be assembled
    #[error("{0}")]
    Shape(#[from] ShapeError),

    /// Unable to write output
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

#[cfg(feature = "python")]
impl From<TractrixError> for pyo3::PyErr {
    fn from(value: TractrixError) -> Self {
        let msg = value.to_string();
        pyo3::exceptions::PyValueError::new_err(msg)
    }
}
