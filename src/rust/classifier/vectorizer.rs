use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use ndarray::Array2;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::ClassifierError;
use super::utils::{l1_normalize, l2_normalize};

lazy_static! {
    // Tokens of two or more word characters
    static ref TOKEN_PATTERN: Regex = Regex::new(r"\b\w\w+\b").unwrap();
}

/// Row normalization applied after TF-IDF weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    L1,
    None,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_true() -> bool {
    true
}

/// A fitted TF-IDF vectorizer.
///
/// Term frequencies are raw counts (or `1 + ln(tf)` with `sublinear_tf`),
/// multiplied by the stored `idf` weights and normalized per row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term to column index
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Norm,
    #[serde(default = "default_true")]
    pub lowercase: bool,
}

impl TfidfVectorizer {
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Checks that vocabulary and idf describe the same columns.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ClassifierError::Invalid(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }
        if self.vocabulary.len() != self.idf.len() {
            return Err(ClassifierError::Invalid(format!(
                "vocabulary has {} terms but idf has {} weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }
        let mut seen = HashSet::with_capacity(self.vocabulary.len());
        for (term, &index) in &self.vocabulary {
            if index >= self.idf.len() || !seen.insert(index) {
                return Err(ClassifierError::Invalid(format!(
                    "term '{}' has invalid column {}",
                    term, index
                )));
            }
        }
        Ok(())
    }

    /// Splits a document into the n-grams the vocabulary was built from.
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let document = if self.lowercase {
            document.to_lowercase()
        } else {
            document.to_string()
        };
        let tokens: Vec<&str> = TOKEN_PATTERN
            .find_iter(&document)
            .map(|m| m.as_str())
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut grams = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                grams.push(window.join(" "));
            }
        }
        grams
    }

    /// Transforms documents into a `(documents.len(), n_features)` matrix.
    pub fn transform(&self, documents: &[&str]) -> Array2<f64> {
        let mut matrix = Array2::<f64>::zeros((documents.len(), self.n_features()));

        for (row_idx, document) in documents.iter().enumerate() {
            let mut row = matrix.row_mut(row_idx);
            for gram in self.analyze(document) {
                if let Some(&col) = self.vocabulary.get(&gram) {
                    row[col] += 1.0;
                }
            }

            for (col, value) in row.iter_mut().enumerate() {
                if *value > 0.0 {
                    let tf = if self.sublinear_tf {
                        1.0 + value.ln()
                    } else {
                        *value
                    };
                    *value = tf * self.idf[col];
                }
            }

            match self.norm {
                Norm::L2 => l2_normalize(row),
                Norm::L1 => l1_normalize(row),
                Norm::None => {}
            }
        }

        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer() -> TfidfVectorizer {
        let vocabulary = [("bagus", 0), ("film", 1), ("jelek", 2), ("film bagus", 3)]
            .into_iter()
            .map(|(t, i)| (t.to_string(), i))
            .collect();
        TfidfVectorizer {
            vocabulary,
            idf: vec![2.0, 1.0, 2.0, 3.0],
            ngram_range: (1, 2),
            sublinear_tf: false,
            norm: Norm::L2,
            lowercase: true,
        }
    }

    #[test]
    fn test_transform_is_l2_normalized() {
        let v = vectorizer();
        let m = v.transform(&["film bagus"]);
        assert_eq!(m.shape(), &[1, 4]);
        let norm: f64 = m.row(0).iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
        assert_eq!(m[[0, 2]], 0.0);
        assert!(m[[0, 3]] > m[[0, 0]]);
    }

    #[test]
    fn test_unknown_terms_give_zero_row() {
        let v = vectorizer();
        let m = v.transform(&["sama sekali tidak dikenal", ""]);
        assert_eq!(m.shape(), &[2, 4]);
        assert!(m.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_analyze_drops_single_characters() {
        let v = vectorizer();
        assert_eq!(
            v.analyze("Film x bagus"),
            vec!["film", "bagus", "film bagus"]
        );
    }

    #[test]
    fn test_validate_rejects_mismatched_idf() {
        let mut v = vectorizer();
        v.idf.pop();
        assert!(matches!(v.validate(), Err(ClassifierError::Invalid(_))));

        let mut v = vectorizer();
        v.vocabulary.insert("bosan".into(), 0);
        v.idf.push(1.0);
        assert!(v.validate().is_err());
    }

    #[test]
    fn test_deserialize_defaults() {
        let v: TfidfVectorizer =
            serde_json::from_str(r#"{"vocabulary": {"bagus": 0}, "idf": [1.5]}"#).unwrap();
        assert_eq!(v.ngram_range, (1, 1));
        assert_eq!(v.norm, Norm::L2);
        assert!(v.lowercase);
        assert!(v.validate().is_ok());
    }
}
