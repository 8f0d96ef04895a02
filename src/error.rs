use thiserror::Error;

/// Failures raised by the distance and Sammon mapping routines.
///
/// Public functions return `anyhow::Result`; use `downcast_ref::<SammonError>()` on the error
/// to inspect the cause.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SammonError {
    #[error("Sammon mapping needs at least 2 points, got {0}")]
    TooFewPoints(usize),

    #[error("all {0} input points coincide, stress is undefined")]
    AllPointsCoincide(usize),

    #[error("input points {first} and {second} coincide, stress would divide by zero")]
    CoincidentPoints { first: usize, second: usize },

    #[error("stress became non-finite at iteration {iteration}")]
    NonFiniteStress { iteration: usize },

    #[error("input value at row {row}, column {column} is not finite")]
    NonFiniteInput { row: usize, column: usize },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("expected an array of shape {expected:?}, got {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("invalid distance matrix: {0}")]
    InvalidDistanceMatrix(String),
}
