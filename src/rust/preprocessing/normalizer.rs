use lazy_static::lazy_static;
use regex::Regex;

use super::PreprocessingTools;

lazy_static! {
    static ref NON_ALPHA: Regex = Regex::new(r"[^A-Za-z]+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Case and character normalization without any language resources.
///
/// Every run of characters outside `A-Za-z` becomes one space, the result
/// is lowercased, trimmed and its whitespace runs collapsed. Applying it
/// twice gives the same string as applying it once.
pub fn clean_text(text: &str) -> String {
    let replaced = NON_ALPHA.replace_all(text, " ");
    let lowered = replaced.to_lowercase();
    WHITESPACE.replace_all(lowered.trim(), " ").into_owned()
}

/// Full review normalization: [`clean_text`], then stopword removal, then
/// stemming.
///
/// The result may be empty when the review has no letters or only
/// stopwords.
///
/// # Example
/// ```
/// use ulasan::preprocessing::{normalize_text, PreprocessingTools, Stemmer, StopwordRemover};
///
/// let tools = PreprocessingTools::new(
///     StopwordRemover::new(["tidak"]),
///     Stemmer::new(["film", "tebak"]),
/// );
/// assert_eq!(normalize_text("Filmnya tidak ketebak!", &tools), "film tebak");
/// ```
pub fn normalize_text(text: &str, tools: &PreprocessingTools) -> String {
    let cleaned = clean_text(text);
    let without_stopwords = tools.stopword.remove(&cleaned);
    tools.stemmer.stem(&without_stopwords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::{Stemmer, StopwordRemover};

    fn tools() -> PreprocessingTools {
        PreprocessingTools::new(
            StopwordRemover::new(["tidak", "yang", "saja"]),
            Stemmer::new(["film", "bagus", "alur", "tebak", "jelek", "buang", "waktu"]),
        )
    }

    #[test]
    fn test_clean_text_steps() {
        assert_eq!(clean_text("  Film  BAGUS!!  10/10  "), "film bagus");
        assert_eq!(clean_text("a1b2c"), "a b c");
        assert_eq!(clean_text("\tHalo\n\ndunia\r\n"), "halo dunia");
        assert_eq!(clean_text("Café"), "caf");
    }

    #[test]
    fn test_non_alphabetic_input_is_empty() {
        let tools = tools();
        for input in ["", "   ", "12345", "!!! ??? ...", "\t\n 42 - 7 *"] {
            assert_eq!(clean_text(input), "");
            assert_eq!(normalize_text(input, &tools), "");
        }
    }

    #[test]
    fn test_clean_text_is_idempotent() {
        for input in [
            "Filmnya bagus banget, alurnya tidak ketebak!",
            "  GOBLOK   banget\tfilmnya ",
            "Luar biasa, sangat recommended!",
            "",
        ] {
            let once = clean_text(input);
            assert_eq!(clean_text(&once), once);
        }
    }

    #[test]
    fn test_normalize_review() {
        let tools = tools();
        assert_eq!(
            normalize_text("Filmnya bagus banget, alurnya tidak ketebak!", &tools),
            "film bagus banget alur tebak"
        );
        assert_eq!(
            normalize_text("Film jelek, buang waktu saja", &tools),
            "film jelek buang waktu"
        );
    }

    #[test]
    fn test_only_stopwords_is_empty() {
        assert_eq!(normalize_text("Tidak, yang saja.", &tools()), "");
    }
}
