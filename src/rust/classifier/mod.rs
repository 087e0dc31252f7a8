mod error;
mod model;
mod utils;
pub mod bernoulli;
pub mod ensemble;
pub mod svm;
pub mod vectorizer;

pub use bernoulli::{BernoulliNb, BernoulliNbParams};
pub use ensemble::{Estimator, Voting, VotingEnsemble};
pub use error::ClassifierError;
pub use model::{ClassOrder, ProbabilityPair, Sentiment, SentimentModel};
pub use svm::{LinearSvm, LinearSvmParams, PlattCalibration};
pub use vectorizer::{Norm, TfidfVectorizer};

/// Summary of a loaded model, used for startup logging and `--info`
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// Display name of the model
    pub name: String,
    /// Number of feature columns the model expects
    pub n_features: usize,
}

impl ModelInfo {
    pub fn of(model: &dyn SentimentModel) -> Self {
        Self {
            name: model.name().to_string(),
            n_features: model.n_features(),
        }
    }
}
