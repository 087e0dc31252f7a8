use thiserror::Error;

/// Represents the different types of errors that can occur while running a
/// sentiment model on a single review.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The feature matrix does not have the width the model was trained with
    #[error("Shape mismatch in {model}: expected {expected} features, got {actual}")]
    ShapeMismatch {
        model: String,
        expected: usize,
        actual: usize,
    },
    /// The model cannot produce probability estimates (hard voting)
    #[error("Probability estimates are not available for {0}")]
    ProbabilityUnavailable(String),
    /// The model parameters are internally inconsistent
    #[error("Invalid model: {0}")]
    Invalid(String),
}
