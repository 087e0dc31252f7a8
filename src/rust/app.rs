//! Screen logic for the demo: one call to [`handle_submission`] per click
//! of the analyse button, and [`render`] to turn the result into text.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use log::{info, warn};

use crate::artifacts::{ArtifactBundle, ArtifactCache, ArtifactPaths};
use crate::classifier::Sentiment;
use crate::confidence::{ConfidenceTier, Severity};
use crate::predictor::{predict_all, PredictionSet};
use crate::preprocessing::normalize_text;

pub const TITLE: &str = "Analisis Sentimen Film";
pub const SUBTITLE: &str = "Ensemble Model (BernoulliNB + SVM)";
pub const MANUAL_ENTRY: &str = "-- Ketik manual --";
pub const EMPTY_INPUT_WARNING: &str = "Masukkan ulasan terlebih dahulu.";
pub const MODELS_MISSING_ERROR: &str =
    "Model tidak ditemukan! Pastikan file model ada di folder models.";

/// Example reviews offered by the selector.
pub const EXAMPLE_REVIEWS: [&str; 6] = [
    "Filmnya bagus banget, alurnya tidak ketebak!",
    "Film jelek, buang waktu saja",
    "Keren, aktingnya mantap sekali",
    "Goblok banget filmnya tidak bermutu",
    "Biasa aja sih, tidak terlalu bagus",
    "Luar biasa, sangat recommended!",
];

/// What the selector currently points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewChoice {
    Manual,
    /// Index into [`EXAMPLE_REVIEWS`]
    Example(usize),
}

impl ReviewChoice {
    /// Options in selector order, manual entry first
    pub fn options() -> Vec<(ReviewChoice, &'static str)> {
        std::iter::once((ReviewChoice::Manual, MANUAL_ENTRY))
            .chain(
                EXAMPLE_REVIEWS
                    .iter()
                    .enumerate()
                    .map(|(i, text)| (ReviewChoice::Example(i), *text)),
            )
            .collect()
    }

    /// Text pre-filled into the input box
    pub fn default_text(&self) -> &'static str {
        match self {
            ReviewChoice::Manual => "",
            ReviewChoice::Example(i) => EXAMPLE_REVIEWS.get(*i).copied().unwrap_or(""),
        }
    }
}

/// A single press of the analyse button.
#[derive(Debug, Clone)]
pub struct Submission {
    pub text: String,
    /// Show the three-model comparison
    pub show_comparison: bool,
    /// Show the preprocessed text
    pub show_details: bool,
}

impl Submission {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            show_comparison: true,
            show_details: false,
        }
    }

    pub fn with_comparison(mut self, show: bool) -> Self {
        self.show_comparison = show;
        self
    }

    pub fn with_details(mut self, show: bool) -> Self {
        self.show_details = show;
        self
    }
}

/// Everything computed for one accepted submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub normalized: String,
    pub predictions: PredictionSet,
    pub confidence_percent: f64,
    pub tier: ConfidenceTier,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Input failed validation; no model was called
    Rejected(String),
    /// A model rejected the input
    Failed(String),
    Analyzed(Analysis),
}

/// Validates, normalizes and scores one submission.
///
/// The display toggles are ignored here: all three models always run.
pub fn handle_submission(bundle: &ArtifactBundle, submission: &Submission) -> Outcome {
    if submission.text.trim().is_empty() {
        warn!("Rejected empty submission");
        return Outcome::Rejected(EMPTY_INPUT_WARNING.to_string());
    }

    let normalized = normalize_text(&submission.text, &bundle.tools);
    info!("Normalized review: {:?}", normalized);

    match predict_all(&normalized, bundle) {
        Ok(predictions) => {
            let confidence_percent = predictions.ensemble_confidence_percent();
            let tier = ConfidenceTier::from_percent(confidence_percent);
            Outcome::Analyzed(Analysis {
                normalized,
                predictions,
                confidence_percent,
                tier,
            })
        }
        Err(e) => {
            log::error!("Prediction failed: {}", e);
            Outcome::Failed(format!("Gagal menganalisis ulasan: {}", e))
        }
    }
}

fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "[+]",
        Severity::Warning => "[~]",
        Severity::Error => "[-]",
    }
}

fn percent(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}

/// Renders an analysis as screen text, honouring the display toggles.
pub fn render(analysis: &Analysis, submission: &Submission) -> String {
    let mut out = String::new();
    let ensemble = &analysis.predictions.ensemble;

    let _ = writeln!(out, "=== Hasil Analisis (Ensemble) ===");
    match ensemble.label {
        Sentiment::Positive => {
            let _ = writeln!(out, "Sentimen: POSITIF");
        }
        Sentiment::Negative => {
            let _ = writeln!(out, "Sentimen: NEGATIF");
        }
    }
    let (badge, severity) = analysis.tier.badge();
    let _ = writeln!(
        out,
        "Tingkat Keyakinan: {} {} ({:.1}%)",
        severity_marker(severity),
        badge,
        analysis.confidence_percent
    );
    let _ = writeln!(out, "Probabilitas Prediksi:");
    let _ = writeln!(out, "  Negatif: {}", percent(ensemble.probabilities.negative));
    let _ = writeln!(out, "  Positif: {}", percent(ensemble.probabilities.positive));

    if submission.show_details {
        let _ = writeln!(out);
        let _ = writeln!(out, "=== Detail Preprocessing ===");
        let _ = writeln!(out, "{}", analysis.normalized);
    }

    if submission.show_comparison {
        let _ = writeln!(out);
        let _ = writeln!(out, "=== Perbandingan Model ===");
        let _ = writeln!(
            out,
            "{:<12} {:>10} {:>10} {:>10}",
            "Model", "Sentimen", "Positive", "Negative"
        );
        for (name, prediction) in analysis.predictions.rows() {
            let _ = writeln!(
                out,
                "{:<12} {:>10} {:>10} {:>10}",
                name,
                prediction.label.as_str().to_uppercase(),
                percent(prediction.probabilities.positive),
                percent(prediction.probabilities.negative)
            );
        }
    }

    out
}

/// Renders any outcome, including rejections and failures.
pub fn render_outcome(outcome: &Outcome, submission: &Submission) -> String {
    match outcome {
        Outcome::Rejected(message) => format!("{} {}\n", severity_marker(Severity::Warning), message),
        Outcome::Failed(message) => format!("{} {}\n", severity_marker(Severity::Error), message),
        Outcome::Analyzed(analysis) => render(analysis, submission),
    }
}

/// Writes the screen header and loads the artifacts through `cache`.
///
/// On failure the models-missing error is written and `None` is returned;
/// callers must not offer the input section in that case.
pub fn open_screen<'a, W: Write>(
    cache: &'a ArtifactCache,
    paths: &ArtifactPaths,
    out: &mut W,
) -> io::Result<Option<&'a ArtifactBundle>> {
    writeln!(out, "{}", TITLE)?;
    writeln!(out, "{}\n", SUBTITLE)?;
    match cache.get_or_load(paths) {
        Ok(bundle) => Ok(Some(bundle)),
        Err(e) => {
            writeln!(out, "{} {}", severity_marker(Severity::Error), MODELS_MISSING_ERROR)?;
            writeln!(out, "  {}", e)?;
            Ok(None)
        }
    }
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(out, "{}", message)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\n', '\r'][..]).to_string()))
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ya"
    } else {
        "tidak"
    }
}

/// Interactive loop: pick an example or type a review, toggle the display
/// options with `c` and `d`, quit with `q` or end of input.
pub fn run_session<R: BufRead, W: Write>(
    bundle: &ArtifactBundle,
    mut input: R,
    out: &mut W,
    mut show_comparison: bool,
    mut show_details: bool,
) -> io::Result<()> {
    let options = ReviewChoice::options();

    loop {
        writeln!(out, "Masukkan Ulasan Film")?;
        for (i, (_, label)) in options.iter().enumerate() {
            writeln!(out, "  [{}] {}", i, label)?;
        }
        writeln!(
            out,
            "  [c] Bandingkan model: {}   [d] Detail preprocessing: {}   [q] Keluar",
            on_off(show_comparison),
            on_off(show_details)
        )?;

        let Some(choice) = prompt(&mut input, out, "Pilih contoh ulasan: ")? else {
            return Ok(());
        };
        let choice = match choice.trim() {
            "q" | "Q" => return Ok(()),
            "c" | "C" => {
                show_comparison = !show_comparison;
                continue;
            }
            "d" | "D" => {
                show_details = !show_details;
                continue;
            }
            "" => ReviewChoice::Manual,
            other => match other.parse::<usize>() {
                Ok(i) if i < options.len() => options[i].0,
                _ => {
                    writeln!(out, "Pilihan tidak dikenal: {}\n", other)?;
                    continue;
                }
            },
        };

        let default_text = choice.default_text();
        let message = if default_text.is_empty() {
            "Masukkan ulasan film: ".to_string()
        } else {
            format!("Masukkan ulasan film [{}]: ", default_text)
        };
        let Some(entered) = prompt(&mut input, out, &message)? else {
            return Ok(());
        };
        let text = if entered.trim().is_empty() {
            default_text.to_string()
        } else {
            entered
        };

        let submission = Submission::new(text)
            .with_comparison(show_comparison)
            .with_details(show_details);
        let outcome = handle_submission(bundle, &submission);
        writeln!(out)?;
        write!(out, "{}", render_outcome(&outcome, &submission))?;
        writeln!(out)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_options() {
        let options = ReviewChoice::options();
        assert_eq!(options.len(), 7);
        assert_eq!(options[0], (ReviewChoice::Manual, MANUAL_ENTRY));
        assert_eq!(options[1].1, EXAMPLE_REVIEWS[0]);
        assert_eq!(ReviewChoice::Manual.default_text(), "");
        assert_eq!(ReviewChoice::Example(5).default_text(), EXAMPLE_REVIEWS[5]);
        assert_eq!(ReviewChoice::Example(99).default_text(), "");
    }

    #[test]
    fn test_submission_defaults() {
        let s = Submission::new("bagus");
        assert!(s.show_comparison);
        assert!(!s.show_details);
        let s = s.with_comparison(false).with_details(true);
        assert!(!s.show_comparison);
        assert!(s.show_details);
    }
}
