//! Sentiment analysis for Indonesian movie reviews.
//!
//! Three pre-trained models (Bernoulli naive Bayes, a calibrated linear SVM
//! and a soft-voting ensemble of both) share one TF-IDF vectorizer and one
//! preprocessing bundle (stopword removal + stemming). Artifacts are loaded
//! once from a models directory and then used read-only.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use ulasan::{app, ArtifactCache, ArtifactPaths};
//!
//! let paths = ArtifactPaths::in_dir("models");
//! let bundle = ArtifactCache::global()
//!     .get_or_load(&paths)
//!     .map_err(|e| e.to_string())?;
//!
//! let submission = app::Submission::new("Filmnya bagus banget, alurnya tidak ketebak!");
//! let outcome = app::handle_submission(bundle, &submission);
//! print!("{}", app::render_outcome(&outcome, &submission));
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! [`ArtifactBundle`] is `Send + Sync`; the cache is written once and only
//! read afterwards, so references can be shared freely across threads.

pub mod app;
pub mod artifacts;
pub mod classifier;
pub mod confidence;
pub mod config;
pub mod predictor;
pub mod preprocessing;

pub use artifacts::{load_artifacts, ArtifactBundle, ArtifactCache, ArtifactError, ArtifactPaths};
pub use classifier::{ClassifierError, ProbabilityPair, Sentiment, SentimentModel};
pub use confidence::{confidence_tier, ConfidenceTier, Severity};
pub use config::AppConfig;
pub use predictor::{predict_all, ModelPrediction, PredictionSet};
pub use preprocessing::{clean_text, normalize_text, PreprocessingTools};

pub fn init_logger() {
    env_logger::init();
}
