use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use super::bernoulli::BernoulliNb;
use super::error::ClassifierError;
use super::model::{ProbabilityPair, Sentiment, SentimentModel};
use super::svm::LinearSvm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voting {
    #[default]
    Soft,
    Hard,
}

/// One fitted member of the voting ensemble.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    BernoulliNb(BernoulliNb),
    LinearSvm(LinearSvm),
}

impl Estimator {
    fn model(&self) -> &dyn SentimentModel {
        match self {
            Estimator::BernoulliNb(m) => m,
            Estimator::LinearSvm(m) => m,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VotingEnsembleParams {
    #[serde(default)]
    pub voting: Voting,
    #[serde(default)]
    pub weights: Option<Vec<f64>>,
    pub estimators: Vec<Estimator>,
}

/// Voting classifier over independently fitted estimators.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "VotingEnsembleParams")]
pub struct VotingEnsemble {
    voting: Voting,
    weights: Vec<f64>,
    estimators: Vec<Estimator>,
}

impl VotingEnsemble {
    pub fn new(
        voting: Voting,
        estimators: Vec<Estimator>,
        weights: Option<Vec<f64>>,
    ) -> Result<Self, ClassifierError> {
        if estimators.is_empty() {
            return Err(ClassifierError::Invalid("ensemble has no estimators".into()));
        }
        let n_features = estimators[0].model().n_features();
        if let Some(other) = estimators
            .iter()
            .find(|e| e.model().n_features() != n_features)
        {
            return Err(ClassifierError::Invalid(format!(
                "{} expects {} features, ensemble expects {}",
                other.model().name(),
                other.model().n_features(),
                n_features
            )));
        }
        let weights = weights.unwrap_or_else(|| vec![1.0; estimators.len()]);
        if weights.len() != estimators.len() {
            return Err(ClassifierError::Invalid(format!(
                "{} weights for {} estimators",
                weights.len(),
                estimators.len()
            )));
        }
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) || weights.iter().sum::<f64>() <= 0.0
        {
            return Err(ClassifierError::Invalid(
                "ensemble weights must be non-negative with a positive sum".into(),
            ));
        }
        Ok(Self {
            voting,
            weights,
            estimators,
        })
    }

    pub fn voting(&self) -> Voting {
        self.voting
    }

    pub fn estimators(&self) -> &[Estimator] {
        &self.estimators
    }

    fn soft_vote(
        &self,
        features: ArrayView2<'_, f64>,
    ) -> Result<Vec<ProbabilityPair>, ClassifierError> {
        let mut sums = vec![(0.0f64, 0.0f64); features.nrows()];
        for (estimator, weight) in self.estimators.iter().zip(&self.weights) {
            let probs = estimator.model().predict_proba(features)?;
            for (acc, p) in sums.iter_mut().zip(probs) {
                acc.0 += weight * p.negative;
                acc.1 += weight * p.positive;
            }
        }
        Ok(sums
            .into_iter()
            .map(|(neg, pos)| ProbabilityPair::from_scores(neg, pos))
            .collect())
    }

    fn hard_vote(&self, features: ArrayView2<'_, f64>) -> Result<Vec<Sentiment>, ClassifierError> {
        let mut tallies = vec![(0.0f64, 0.0f64); features.nrows()];
        for (estimator, weight) in self.estimators.iter().zip(&self.weights) {
            let labels = estimator.model().predict(features)?;
            for (acc, label) in tallies.iter_mut().zip(labels) {
                match label {
                    Sentiment::Negative => acc.0 += *weight,
                    Sentiment::Positive => acc.1 += *weight,
                }
            }
        }
        Ok(tallies
            .into_iter()
            .map(|(neg, pos)| {
                if pos > neg {
                    Sentiment::Positive
                } else {
                    Sentiment::Negative
                }
            })
            .collect())
    }
}

impl TryFrom<VotingEnsembleParams> for VotingEnsemble {
    type Error = ClassifierError;

    fn try_from(params: VotingEnsembleParams) -> Result<Self, Self::Error> {
        Self::new(params.voting, params.estimators, params.weights)
    }
}

impl SentimentModel for VotingEnsemble {
    fn name(&self) -> &str {
        "Ensemble"
    }

    fn n_features(&self) -> usize {
        self.estimators[0].model().n_features()
    }

    fn predict_proba(
        &self,
        features: ArrayView2<'_, f64>,
    ) -> Result<Vec<ProbabilityPair>, ClassifierError> {
        self.check_shape(features)?;
        match self.voting {
            Voting::Soft => self.soft_vote(features),
            Voting::Hard => Err(ClassifierError::ProbabilityUnavailable(
                "hard voting ensemble".into(),
            )),
        }
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Vec<Sentiment>, ClassifierError> {
        self.check_shape(features)?;
        match self.voting {
            Voting::Soft => Ok(self
                .soft_vote(features)?
                .iter()
                .map(ProbabilityPair::argmax)
                .collect()),
            Voting::Hard => self.hard_vote(features),
        }
    }
}
