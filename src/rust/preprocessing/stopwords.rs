use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Drops words found in a fixed stopword list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StopwordRemover {
    words: HashSet<String>,
}

impl StopwordRemover {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Removes stopwords from whitespace-separated text, keeping the order of
    /// the remaining words.
    pub fn remove(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|word| !self.is_stopword(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
