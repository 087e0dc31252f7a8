use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Builder, Env};
use log::info;

use ulasan::app::{self, Submission, EXAMPLE_REVIEWS};
use ulasan::classifier::ModelInfo;
use ulasan::config::MODELS_DIR_ENV;
use ulasan::{AppConfig, ArtifactBundle, ArtifactCache, ArtifactPaths};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing the model artifacts
    #[arg(short, long, env = MODELS_DIR_ENV)]
    models_dir: Option<PathBuf>,

    /// Analyse this review once and exit
    #[arg(short, long, conflicts_with = "example")]
    text: Option<String>,

    /// Analyse one of the built-in example reviews (1-6) and exit
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=6))]
    example: Option<u8>,

    /// Hide the per-model comparison table
    #[arg(long)]
    no_compare: bool,

    /// Show the preprocessed text
    #[arg(short, long)]
    details: bool,

    /// Print a summary of the loaded artifacts
    #[arg(long)]
    info: bool,
}

fn main() -> Result<ExitCode> {
    Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = AppConfig::resolve(args.models_dir.clone());
    let paths = ArtifactPaths::in_dir(&config.models_dir);

    let mut stdout = io::stdout();
    let start_time = Instant::now();
    let screen = app::open_screen(ArtifactCache::global(), &paths, &mut stdout)
        .context("failed to write to stdout")?;
    let Some(bundle) = screen else {
        return Ok(ExitCode::FAILURE);
    };
    info!("Artifacts loaded in {:.2?}", start_time.elapsed());

    if args.info {
        print_info(bundle, &paths);
    }

    let show_comparison = !args.no_compare;
    let one_shot = match (&args.text, args.example) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(n)) => Some(EXAMPLE_REVIEWS[usize::from(n) - 1].to_string()),
        (None, None) => None,
    };

    match one_shot {
        Some(text) => {
            let submission = Submission::new(text)
                .with_comparison(show_comparison)
                .with_details(args.details);
            let outcome = app::handle_submission(bundle, &submission);
            print!("{}", app::render_outcome(&outcome, &submission));
            Ok(match outcome {
                app::Outcome::Analyzed(_) => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            })
        }
        None if args.info => Ok(ExitCode::SUCCESS),
        None => {
            let stdin = io::stdin();
            app::run_session(
                bundle,
                stdin.lock(),
                &mut stdout,
                show_comparison,
                args.details,
            )
            .context("interactive session failed")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_info(bundle: &ArtifactBundle, paths: &ArtifactPaths) {
    println!("Models directory: {}", paths.dir.display());
    for model in bundle.models() {
        let info = ModelInfo::of(model);
        println!("  {:<12} {} features", info.name, info.n_features);
    }
    println!(
        "  Vectorizer   {} features, ngram range {:?}",
        bundle.vectorizer.n_features(),
        bundle.vectorizer.ngram_range
    );
    println!(
        "  Tools        {} stopwords, {} root words",
        bundle.tools.stopword.len(),
        bundle.tools.stemmer.dictionary_len()
    );
    for (file, hash) in &bundle.fingerprints {
        println!("  {:<28} sha256 {}", file, hash);
    }
    println!();
}
