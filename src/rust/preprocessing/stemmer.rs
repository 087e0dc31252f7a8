//! Dictionary-based Indonesian stemmer.
//!
//! Affixes are stripped in the order inflectional suffix, derivational
//! suffix, derivational prefixes (up to three layers). A candidate is only
//! accepted once it is found in the root dictionary, so unknown words pass
//! through unchanged.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use serde::Deserialize;

const PARTICLES: [&str; 4] = ["lah", "kah", "tah", "pun"];
const POSSESSIVES: [&str; 3] = ["ku", "mu", "nya"];
const DERIVATIONAL_SUFFIXES: [&str; 3] = ["kan", "an", "i"];
const MAX_PREFIXES: usize = 3;
const MIN_ROOT_LEN: usize = 2;
/// Memo entries kept before the cache is cleared
const MAX_CACHE_ENTRIES: usize = 10_000;

// Prefix and suffix pairs that never occur together in Indonesian
const DISALLOWED: [(&str, &str); 8] = [
    ("be", "i"),
    ("di", "an"),
    ("ke", "i"),
    ("ke", "kan"),
    ("me", "an"),
    ("se", "i"),
    ("se", "kan"),
    ("te", "an"),
];

#[derive(Deserialize)]
struct RootDictionary {
    dictionary: Vec<String>,
}

impl From<RootDictionary> for Stemmer {
    fn from(raw: RootDictionary) -> Self {
        Stemmer::new(raw.dictionary)
    }
}

/// Reduces Indonesian words to their root form.
///
/// Results are memoized per word, up to `MAX_CACHE_ENTRIES` words at a
/// time; the cache sits behind a mutex so a shared stemmer stays usable
/// from several threads.
#[derive(Debug, Deserialize)]
#[serde(from = "RootDictionary")]
pub struct Stemmer {
    dictionary: HashSet<String>,
    cache: Mutex<HashMap<String, String>>,
}

fn is_vowel(c: u8) -> bool {
    matches!(c, b'a' | b'i' | b'u' | b'e' | b'o')
}

fn starts_with_vowel(s: &str) -> bool {
    s.as_bytes().first().copied().map_or(false, is_vowel)
}

fn starts_with_any(s: &str, chars: &[u8]) -> bool {
    s.as_bytes().first().map_or(false, |c| chars.contains(c))
}

impl Stemmer {
    pub fn new<I, S>(dictionary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dictionary: dictionary.into_iter().map(Into::into).collect(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn dictionary_len(&self) -> usize {
        self.dictionary.len()
    }

    pub fn is_root(&self, word: &str) -> bool {
        self.dictionary.contains(word)
    }

    /// Stems every whitespace-separated word and joins them with single
    /// spaces.
    pub fn stem(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|word| self.stem_word(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Root form of a single word, or the lowercased word itself when no
    /// dictionary root can be reached.
    pub fn stem_word(&self, word: &str) -> String {
        let word = word.to_lowercase();
        if let Ok(cache) = self.cache.lock() {
            if let Some(hit) = cache.get(&word) {
                return hit.clone();
            }
        }

        let root = self.find_root(&word).unwrap_or_else(|| word.clone());
        if let Ok(mut cache) = self.cache.lock() {
            if cache.len() >= MAX_CACHE_ENTRIES {
                log::debug!("Stemmer cache reached {} entries, clearing", cache.len());
                cache.clear();
            }
            cache.insert(word, root.clone());
        }
        root
    }

    #[cfg(test)]
    fn cached_words(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    fn find_root(&self, word: &str) -> Option<String> {
        if word.len() <= 3 || self.is_root(word) {
            return Some(word.to_string());
        }
        if !word.is_ascii() {
            return None;
        }

        for base in inflection_variants(word) {
            if self.is_root(base) {
                return Some(base.to_string());
            }
            for (stem, suffix) in derivation_variants(base) {
                if suffix.is_some() && self.is_root(stem) {
                    return Some(stem.to_string());
                }
                if let Some(root) = self.strip_prefixes(stem, suffix, 0, None) {
                    return Some(root);
                }
            }
        }
        None
    }

    fn strip_prefixes(
        &self,
        word: &str,
        suffix: Option<&str>,
        depth: usize,
        previous: Option<&str>,
    ) -> Option<String> {
        if depth >= MAX_PREFIXES {
            return None;
        }
        for (prefix, candidates) in prefix_candidates(word) {
            if previous == Some(prefix) {
                continue;
            }
            if depth == 0 {
                if let Some(suffix) = suffix {
                    if DISALLOWED.iter().any(|&(p, s)| p == prefix && s == suffix) {
                        continue;
                    }
                }
            }
            for candidate in candidates {
                if candidate.len() < MIN_ROOT_LEN {
                    continue;
                }
                if self.is_root(&candidate) {
                    return Some(candidate);
                }
                if let Some(root) = self.strip_prefixes(&candidate, suffix, depth + 1, Some(prefix))
                {
                    return Some(root);
                }
            }
        }
        None
    }
}

/// The word, then without its particle, then without its possessive.
fn inflection_variants(word: &str) -> Vec<&str> {
    let mut variants = vec![word];
    let mut current = word;
    if let Some(stripped) = strip_suffix_any(current, &PARTICLES) {
        variants.push(stripped);
        current = stripped;
    }
    if let Some(stripped) = strip_suffix_any(current, &POSSESSIVES) {
        variants.push(stripped);
    }
    variants
}

/// The word unchanged, then each derivational suffix that can be removed.
fn derivation_variants(word: &str) -> Vec<(&str, Option<&'static str>)> {
    let mut variants = vec![(word, None)];
    for suffix in DERIVATIONAL_SUFFIXES {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.len() >= MIN_ROOT_LEN {
                variants.push((stem, Some(suffix)));
            }
        }
    }
    variants
}

fn strip_suffix_any<'a>(word: &'a str, suffixes: &[&str]) -> Option<&'a str> {
    suffixes
        .iter()
        .filter_map(|s| word.strip_suffix(s))
        .find(|stem| stem.len() >= MIN_ROOT_LEN)
}

/// Candidate remainders for each prefix the word may carry, including the
/// recoded forms of nasal and `r` prefixes.
fn prefix_candidates(word: &str) -> Vec<(&'static str, Vec<String>)> {
    let mut out = Vec::new();

    for plain in ["di", "ke", "se"] {
        if let Some(rest) = word.strip_prefix(plain) {
            out.push((plain, vec![rest.to_string()]));
        }
    }

    if let Some(rest) = word.strip_prefix("ber") {
        let mut cands = vec![rest.to_string()];
        if starts_with_vowel(rest) {
            cands.push(format!("r{}", rest));
        }
        out.push(("be", cands));
    } else if let Some(rest) = word.strip_prefix("be") {
        let mut cands = vec![rest.to_string()];
        if let Some(after_l) = rest.strip_prefix('l') {
            cands.push(after_l.to_string());
        }
        out.push(("be", cands));
    }

    if let Some(rest) = word.strip_prefix("ter") {
        let mut cands = vec![rest.to_string()];
        if starts_with_vowel(rest) {
            cands.push(format!("r{}", rest));
        }
        out.push(("te", cands));
    } else if let Some(rest) = word.strip_prefix("te") {
        out.push(("te", vec![rest.to_string()]));
    }

    if let Some(cands) = nasal_candidates(word, "me") {
        out.push(("me", cands));
    }
    if let Some(rest) = word.strip_prefix("per") {
        let mut cands = vec![rest.to_string()];
        if starts_with_vowel(rest) {
            cands.push(format!("r{}", rest));
        }
        out.push(("pe", cands));
    } else if let Some(cands) = nasal_candidates(word, "pe") {
        out.push(("pe", cands));
    }

    out
}

/// Recoding rules shared by the `meN-` and `peN-` prefixes.
fn nasal_candidates(word: &str, head: &str) -> Option<Vec<String>> {
    let rest = word.strip_prefix(head)?;

    if let Some(r) = rest.strip_prefix("ng") {
        return Some(if starts_with_vowel(r) {
            vec![r.to_string(), format!("k{}", r)]
        } else {
            vec![r.to_string()]
        });
    }
    if let Some(r) = rest.strip_prefix("ny") {
        return Some(if starts_with_vowel(r) {
            vec![format!("s{}", r)]
        } else {
            Vec::new()
        });
    }
    if let Some(r) = rest.strip_prefix('m') {
        return Some(if starts_with_vowel(r) {
            vec![format!("m{}", r), format!("p{}", r)]
        } else {
            // mem + b/f/v, and mempe- / memper-
            vec![r.to_string()]
        });
    }
    if let Some(r) = rest.strip_prefix('n') {
        return Some(if starts_with_vowel(r) {
            vec![format!("n{}", r), format!("t{}", r)]
        } else {
            vec![r.to_string()]
        });
    }
    if starts_with_any(rest, b"lrwy") {
        let mut cands = vec![rest.to_string()];
        // pelajar -> ajar
        if head == "pe" {
            if let Some(after_l) = rest.strip_prefix('l') {
                cands.push(after_l.to_string());
            }
        }
        return Some(cands);
    }
    if head == "pe" && !starts_with_vowel(rest) {
        return Some(vec![rest.to_string()]);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stemmer() -> Stemmer {
        Stemmer::new([
            "film", "mutu", "tebak", "suka", "tulis", "makan", "baik", "lalu", "baca", "ambil",
            "kerja", "ajar", "alur", "main", "rakit", "kali", "sapu", "pukul", "tari", "lihat",
        ])
    }

    #[test]
    fn test_inflectional_suffixes() {
        let s = stemmer();
        assert_eq!(s.stem_word("filmnya"), "film");
        assert_eq!(s.stem_word("alurnya"), "alur");
        assert_eq!(s.stem_word("bacalah"), "baca");
        assert_eq!(s.stem_word("bacakahmu"), "bacakahmu");
    }

    #[test]
    fn test_prefixes_and_recoding() {
        let s = stemmer();
        assert_eq!(s.stem_word("bermutu"), "mutu");
        assert_eq!(s.stem_word("ketebak"), "tebak");
        assert_eq!(s.stem_word("terlalu"), "lalu");
        assert_eq!(s.stem_word("membaca"), "baca");
        assert_eq!(s.stem_word("mengambil"), "ambil");
        assert_eq!(s.stem_word("menyapu"), "sapu");
        assert_eq!(s.stem_word("memukul"), "pukul");
        assert_eq!(s.stem_word("penulis"), "tulis");
        assert_eq!(s.stem_word("melihat"), "lihat");
        assert_eq!(s.stem_word("bekerja"), "kerja");
        assert_eq!(s.stem_word("belajar"), "ajar");
        assert_eq!(s.stem_word("berakit"), "rakit");
        assert_eq!(s.stem_word("sekali"), "kali");
    }

    #[test]
    fn test_confixes() {
        let s = stemmer();
        assert_eq!(s.stem_word("menyukai"), "suka");
        assert_eq!(s.stem_word("makanan"), "makan");
        assert_eq!(s.stem_word("dimakan"), "makan");
        assert_eq!(s.stem_word("kebaikannya"), "baik");
        assert_eq!(s.stem_word("mempermainkan"), "main");
        assert_eq!(s.stem_word("pelajaran"), "ajar");
    }

    #[test]
    fn test_disallowed_confix_is_not_stripped() {
        let s = Stemmer::new(["tari"]);
        // di- never combines with -an
        assert_eq!(s.stem_word("ditarian"), "ditarian");
        assert_eq!(s.stem_word("ditari"), "tari");
    }

    #[test]
    fn test_unknown_and_short_words_pass_through() {
        let s = stemmer();
        assert_eq!(s.stem_word("banget"), "banget");
        assert_eq!(s.stem_word("recommended"), "recommended");
        assert_eq!(s.stem_word("aja"), "aja");
        assert_eq!(s.stem_word("Mantap"), "mantap");
        assert_eq!(s.stem_word("kafé"), "kafé");
    }

    #[test]
    fn test_stem_text_and_cache() {
        let s = stemmer();
        assert_eq!(s.stem("filmnya  bermutu"), "film mutu");
        assert_eq!(s.stem(""), "");
        // cached result is stable
        assert_eq!(s.stem_word("bermutu"), "mutu");
        assert_eq!(s.cached_words(), 2);
    }

    #[test]
    fn test_cache_is_bounded() {
        let s = stemmer();
        for i in 0..MAX_CACHE_ENTRIES + 50 {
            s.stem_word(&format!("kata{}", i));
        }
        assert!(s.cached_words() <= MAX_CACHE_ENTRIES);
        assert!(s.cached_words() > 0);
        assert_eq!(s.stem_word("bermutu"), "mutu");
    }

    #[test]
    fn test_deserialize_dictionary() {
        let s: Stemmer = serde_json::from_str(r#"{"dictionary": ["makan"]}"#).unwrap();
        assert_eq!(s.dictionary_len(), 1);
        assert_eq!(s.stem_word("dimakan"), "makan");
        assert!(serde_json::from_str::<Stemmer>(r#"{"words": []}"#).is_err());
    }
}
