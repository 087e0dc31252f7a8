use std::fmt;

use ndarray::{ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::error::ClassifierError;

/// Sentiment label as encoded by the training pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Positive,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Negative => "negative",
            Sentiment::Positive => "positive",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probability estimates for one review, always ordered (negative, positive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProbabilityPair {
    pub negative: f64,
    pub positive: f64,
}

impl ProbabilityPair {
    /// Builds a pair from unnormalized non-negative scores.
    pub fn from_scores(negative: f64, positive: f64) -> Self {
        let total = negative + positive;
        if total > 0.0 && total.is_finite() {
            Self {
                negative: negative / total,
                positive: positive / total,
            }
        } else {
            Self {
                negative: 0.5,
                positive: 0.5,
            }
        }
    }

    /// Builds a pair from the positive-class probability.
    pub fn from_positive(positive: f64) -> Self {
        let positive = positive.clamp(0.0, 1.0);
        Self {
            negative: 1.0 - positive,
            positive,
        }
    }

    /// Label with the highest probability. Ties go to negative, the first
    /// class in sorted label order.
    pub fn argmax(&self) -> Sentiment {
        if self.positive > self.negative {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }

    /// Highest of the two probabilities.
    pub fn max(&self) -> f64 {
        self.negative.max(self.positive)
    }
}

/// Maps a model's declared class list onto the fixed (negative, positive)
/// order used everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassOrder {
    pub negative: usize,
    pub positive: usize,
}

impl ClassOrder {
    pub fn resolve(classes: &[Sentiment]) -> Result<Self, ClassifierError> {
        if classes.len() != 2 {
            return Err(ClassifierError::Invalid(format!(
                "expected 2 classes, found {}",
                classes.len()
            )));
        }
        let find = |label: Sentiment| {
            classes
                .iter()
                .position(|c| *c == label)
                .ok_or_else(|| ClassifierError::Invalid(format!("class '{}' is missing", label)))
        };
        Ok(Self {
            negative: find(Sentiment::Negative)?,
            positive: find(Sentiment::Positive)?,
        })
    }

    /// Reorders per-class values given in the model's own class order.
    pub fn pair(&self, values: ArrayView1<'_, f64>) -> ProbabilityPair {
        ProbabilityPair {
            negative: values[self.negative],
            positive: values[self.positive],
        }
    }

    /// Class at `index` in the model's own order.
    pub fn label_at(&self, index: usize) -> Sentiment {
        if index == self.positive {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }
}

/// Common interface of every loaded sentiment model.
///
/// Inputs are feature matrices with one row per document; outputs hold one
/// entry per row.
pub trait SentimentModel {
    /// Human-readable model name used in logs and errors
    fn name(&self) -> &str;

    /// Number of feature columns the model expects
    fn n_features(&self) -> usize;

    /// Probability pair for each row
    fn predict_proba(&self, features: ArrayView2<'_, f64>)
        -> Result<Vec<ProbabilityPair>, ClassifierError>;

    /// Predicted label for each row
    fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Vec<Sentiment>, ClassifierError> {
        Ok(self
            .predict_proba(features)?
            .iter()
            .map(ProbabilityPair::argmax)
            .collect())
    }

    /// Rejects matrices whose width differs from the training width.
    fn check_shape(&self, features: ArrayView2<'_, f64>) -> Result<(), ClassifierError> {
        let actual = features.ncols();
        if actual != self.n_features() {
            return Err(ClassifierError::ShapeMismatch {
                model: self.name().to_string(),
                expected: self.n_features(),
                actual,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_class_order_follows_declared_classes() {
        let order = ClassOrder::resolve(&[Sentiment::Positive, Sentiment::Negative]).unwrap();
        let pair = order.pair(array![0.7, 0.3].view());
        assert_eq!(pair.positive, 0.7);
        assert_eq!(pair.negative, 0.3);
        assert_eq!(order.label_at(0), Sentiment::Positive);
    }

    #[test]
    fn test_class_order_rejects_missing_label() {
        let result = ClassOrder::resolve(&[Sentiment::Positive, Sentiment::Positive]);
        assert!(matches!(result, Err(ClassifierError::Invalid(_))));
        assert!(ClassOrder::resolve(&[Sentiment::Negative]).is_err());
    }

    #[test]
    fn test_pair_from_scores_normalizes() {
        let pair = ProbabilityPair::from_scores(1.0, 3.0);
        assert!((pair.negative - 0.25).abs() < 1e-12);
        assert!((pair.positive - 0.75).abs() < 1e-12);
        assert_eq!(pair.argmax(), Sentiment::Positive);

        let degenerate = ProbabilityPair::from_scores(0.0, 0.0);
        assert_eq!((degenerate.negative, degenerate.positive), (0.5, 0.5));
        assert_eq!(degenerate.argmax(), Sentiment::Negative);
    }

    #[test]
    fn test_sentiment_serde_names() {
        let parsed: Vec<Sentiment> = serde_json::from_str(r#"["negative","positive"]"#).unwrap();
        assert_eq!(parsed, vec![Sentiment::Negative, Sentiment::Positive]);
        assert_eq!(Sentiment::Positive.to_string(), "positive");
    }
}
