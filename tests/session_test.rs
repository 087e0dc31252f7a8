use std::path::{Path, PathBuf};

use tempfile::TempDir;
use ulasan::app::{self, EMPTY_INPUT_WARNING, EXAMPLE_REVIEWS, MODELS_MISSING_ERROR, TITLE};
use ulasan::{load_artifacts, ArtifactBundle, ArtifactCache, ArtifactPaths};

const MENU: &str = "Masukkan Ulasan Film";

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn shipped_models() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("models")
}

fn setup_bundle() -> ArtifactBundle {
    load_artifacts(&ArtifactPaths::in_dir(shipped_models())).expect("Failed to load models")
}

/// Runs a session over scripted input and returns everything written.
fn run_script(bundle: &ArtifactBundle, script: &str) -> String {
    let mut out = Vec::new();
    app::run_session(bundle, script.as_bytes(), &mut out, true, false)
        .expect("session failed");
    String::from_utf8(out).expect("output is not utf-8")
}

#[test]
fn test_open_screen_with_models() {
    init();
    let cache = ArtifactCache::new();
    let mut out = Vec::new();
    let bundle = app::open_screen(&cache, &ArtifactPaths::in_dir(shipped_models()), &mut out)
        .unwrap();
    assert!(bundle.is_some());
    let screen = String::from_utf8(out).unwrap();
    assert!(screen.starts_with(TITLE));
    assert!(!screen.contains(MODELS_MISSING_ERROR));
}

#[test]
fn test_open_screen_without_models() {
    init();
    let empty = TempDir::new().unwrap();
    let cache = ArtifactCache::new();
    let mut out = Vec::new();

    let bundle = app::open_screen(&cache, &ArtifactPaths::in_dir(empty.path()), &mut out).unwrap();
    assert!(bundle.is_none());
    assert!(!cache.models_loaded());

    let screen = String::from_utf8(out).unwrap();
    assert!(screen.contains(TITLE));
    assert!(screen.contains(MODELS_MISSING_ERROR));
    assert!(!screen.contains(MENU));
}

#[test]
fn test_quit_immediately() {
    init();
    let bundle = setup_bundle();
    let out = run_script(&bundle, "q\n");
    assert_eq!(out.matches(MENU).count(), 1);
    assert!(out.contains(EXAMPLE_REVIEWS[0]));
    assert!(!out.contains("Hasil Analisis"));
}

#[test]
fn test_end_of_input_ends_session() {
    init();
    let bundle = setup_bundle();
    assert_eq!(run_script(&bundle, "").matches(MENU).count(), 1);

    // Input ends while the review prompt is open
    let out = run_script(&bundle, "1\n");
    assert!(out.contains("Masukkan ulasan film ["));
    assert!(!out.contains("Hasil Analisis"));
}

#[test]
fn test_example_choice_uses_default_text() {
    init();
    let bundle = setup_bundle();
    let out = run_script(&bundle, "2\n\nq\n");
    assert!(out.contains(&format!("Masukkan ulasan film [{}]: ", EXAMPLE_REVIEWS[1])));
    assert!(out.contains("Sentimen: NEGATIF"));
    assert!(out.contains("=== Perbandingan Model ==="));
    assert_eq!(out.matches(MENU).count(), 2);
}

#[test]
fn test_typed_text_overrides_example() {
    init();
    let bundle = setup_bundle();
    let out = run_script(&bundle, "2\nKeren, aktingnya mantap sekali\nq\n");
    assert!(out.contains("Sentimen: POSITIF"));
}

#[test]
fn test_manual_entry_left_blank_is_rejected() {
    init();
    let bundle = setup_bundle();
    let out = run_script(&bundle, "0\n   \nq\n");
    assert!(out.contains("Masukkan ulasan film: "));
    assert!(out.contains(EMPTY_INPUT_WARNING));
    assert!(!out.contains("Hasil Analisis"));
}

#[test]
fn test_toggle_keys() {
    init();
    let bundle = setup_bundle();
    let out = run_script(&bundle, "c\nd\n1\n\nq\n");
    assert!(out.contains("Bandingkan model: ya   [d] Detail preprocessing: tidak"));
    assert!(out.contains("Bandingkan model: tidak   [d] Detail preprocessing: ya"));
    assert!(out.contains("=== Detail Preprocessing ==="));
    assert!(out.contains("film bagus banget alur tebak"));
    assert!(!out.contains("=== Perbandingan Model ==="));
}

#[test]
fn test_unknown_choice() {
    init();
    let bundle = setup_bundle();
    let out = run_script(&bundle, "9\nx\nq\n");
    assert!(out.contains("Pilihan tidak dikenal: 9"));
    assert!(out.contains("Pilihan tidak dikenal: x"));
    assert_eq!(out.matches(MENU).count(), 3);
    assert!(!out.contains("Hasil Analisis"));
}
