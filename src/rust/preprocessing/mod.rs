//! Review text preprocessing: character cleanup, stopword removal and
//! stemming.

mod normalizer;
mod stemmer;
mod stopwords;

use serde::Deserialize;

pub use normalizer::{clean_text, normalize_text};
pub use stemmer::Stemmer;
pub use stopwords::StopwordRemover;

/// The preprocessing bundle shipped next to the models.
///
/// Both tools are required; a bundle missing either key fails to
/// deserialize, so a loaded bundle is always complete.
#[derive(Debug, Deserialize)]
pub struct PreprocessingTools {
    pub stopword: StopwordRemover,
    pub stemmer: Stemmer,
}

impl PreprocessingTools {
    pub fn new(stopword: StopwordRemover, stemmer: Stemmer) -> Self {
        Self { stopword, stemmer }
    }
}
