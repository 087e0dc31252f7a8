use log::debug;
use serde::Serialize;

use crate::artifacts::ArtifactBundle;
use crate::classifier::{ClassifierError, ProbabilityPair, Sentiment, SentimentModel};

/// Label and probabilities from one model for one review.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelPrediction {
    pub label: Sentiment,
    pub probabilities: ProbabilityPair,
}

/// Outputs of all three models for the same review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionSet {
    pub bernoulli: ModelPrediction,
    pub svm: ModelPrediction,
    pub ensemble: ModelPrediction,
}

impl PredictionSet {
    /// `(display name, prediction)` in comparison-table order
    pub fn rows(&self) -> [(&'static str, &ModelPrediction); 3] {
        [
            ("BernoulliNB", &self.bernoulli),
            ("Linear SVM", &self.svm),
            ("Ensemble", &self.ensemble),
        ]
    }

    /// Top ensemble probability as a percentage
    pub fn ensemble_confidence_percent(&self) -> f64 {
        self.ensemble.probabilities.max() * 100.0
    }
}

fn run_model(
    model: &dyn SentimentModel,
    features: ndarray::ArrayView2<'_, f64>,
) -> Result<ModelPrediction, ClassifierError> {
    let label = first(model.predict(features)?, model)?;
    let probabilities = first(model.predict_proba(features)?, model)?;
    debug!(
        "{}: {} (neg {:.4}, pos {:.4})",
        model.name(),
        label,
        probabilities.negative,
        probabilities.positive
    );
    Ok(ModelPrediction {
        label,
        probabilities,
    })
}

fn first<T>(values: Vec<T>, model: &dyn SentimentModel) -> Result<T, ClassifierError> {
    values
        .into_iter()
        .next()
        .ok_or_else(|| ClassifierError::Invalid(format!("{} returned no rows", model.name())))
}

/// Vectorizes one normalized review and runs every model on it.
pub fn predict_all(
    normalized: &str,
    bundle: &ArtifactBundle,
) -> Result<PredictionSet, ClassifierError> {
    let features = bundle.vectorizer.transform(&[normalized]);
    debug!(
        "Vectorized {:?} into {} non-zero features",
        normalized,
        features.iter().filter(|&&x| x != 0.0).count()
    );
    let view = features.view();

    Ok(PredictionSet {
        bernoulli: run_model(&bundle.bernoulli, view)?,
        svm: run_model(&bundle.svm, view)?,
        ensemble: run_model(&bundle.ensemble, view)?,
    })
}
