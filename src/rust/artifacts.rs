use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use crate::classifier::{BernoulliNb, LinearSvm, SentimentModel, TfidfVectorizer, VotingEnsemble};
use crate::preprocessing::PreprocessingTools;

pub const BERNOULLI_FILE: &str = "model_bernoulli_nb.json";
pub const SVM_FILE: &str = "model_linear_svm.json";
pub const ENSEMBLE_FILE: &str = "model_ensemble_voting.json";
pub const VECTORIZER_FILE: &str = "vectorizer_tfidf.json";
pub const TOOLS_FILE: &str = "preprocessing_tools.json";
/// Optional map of artifact file name to hex SHA-256 digest
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid artifact {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
    #[error("Hash mismatch: expected {expected}, got {actual} for {file}")]
    HashMismatch {
        file: String,
        expected: String,
        actual: String,
    },
}

/// Locations of the five artifacts inside one models directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub dir: PathBuf,
    pub bernoulli: PathBuf,
    pub svm: PathBuf,
    pub ensemble: PathBuf,
    pub vectorizer: PathBuf,
    pub tools: PathBuf,
    pub manifest: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref().to_path_buf();
        Self {
            bernoulli: dir.join(BERNOULLI_FILE),
            svm: dir.join(SVM_FILE),
            ensemble: dir.join(ENSEMBLE_FILE),
            vectorizer: dir.join(VECTORIZER_FILE),
            tools: dir.join(TOOLS_FILE),
            manifest: dir.join(MANIFEST_FILE),
            dir,
        }
    }

    /// The five required artifacts, in load order
    pub fn required(&self) -> [&Path; 5] {
        [
            &self.bernoulli,
            &self.svm,
            &self.ensemble,
            &self.vectorizer,
            &self.tools,
        ]
    }

    pub fn all_present(&self) -> bool {
        self.required().iter().all(|p| p.exists())
    }
}

/// Everything the demo needs to score a review. Immutable once loaded.
#[derive(Debug)]
pub struct ArtifactBundle {
    pub bernoulli: BernoulliNb,
    pub svm: LinearSvm,
    pub ensemble: VotingEnsemble,
    pub vectorizer: TfidfVectorizer,
    pub tools: PreprocessingTools,
    /// `(file name, hex SHA-256)` of every artifact that was read
    pub fingerprints: Vec<(String, String)>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<ArtifactBundle>();
    }
};

impl ArtifactBundle {
    /// The three models in display order
    pub fn models(&self) -> [&dyn SentimentModel; 3] {
        [&self.bernoulli, &self.svm, &self.ensemble]
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn read_manifest(path: &Path) -> Result<Option<HashMap<String, String>>, ArtifactError> {
    if !path.exists() {
        log::debug!("No manifest at {:?}, skipping digest checks", path);
        return Ok(None);
    }
    let bytes = fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest = serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(manifest))
}

fn read_artifact<T: DeserializeOwned>(
    path: &Path,
    manifest: Option<&HashMap<String, String>>,
    fingerprints: &mut Vec<(String, String)>,
) -> Result<T, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::Missing(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = file_name(path);
    let hash = sha256_hex(&bytes);
    log::debug!("Read {} bytes from {:?} (sha256 {})", bytes.len(), path, hash);

    if let Some(expected) = manifest.and_then(|m| m.get(&name)) {
        if !expected.eq_ignore_ascii_case(&hash) {
            log::error!("{} hash mismatch: expected {}, got {}", name, expected, hash);
            return Err(ArtifactError::HashMismatch {
                file: name,
                expected: expected.clone(),
                actual: hash,
            });
        }
    }

    let value = serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fingerprints.push((name, hash));
    Ok(value)
}

/// Reads, verifies and deserializes all five artifacts.
pub fn load_artifacts(paths: &ArtifactPaths) -> Result<ArtifactBundle, ArtifactError> {
    log::info!("Loading artifacts from {:?}", paths.dir);
    let manifest = read_manifest(&paths.manifest)?;
    let manifest = manifest.as_ref();
    let mut fingerprints = Vec::with_capacity(5);

    let bernoulli: BernoulliNb = read_artifact(&paths.bernoulli, manifest, &mut fingerprints)?;
    let svm: LinearSvm = read_artifact(&paths.svm, manifest, &mut fingerprints)?;
    let ensemble: VotingEnsemble = read_artifact(&paths.ensemble, manifest, &mut fingerprints)?;
    let vectorizer: TfidfVectorizer =
        read_artifact(&paths.vectorizer, manifest, &mut fingerprints)?;
    vectorizer.validate().map_err(|e| ArtifactError::Invalid {
        path: paths.vectorizer.clone(),
        reason: e.to_string(),
    })?;
    let tools: PreprocessingTools = read_artifact(&paths.tools, manifest, &mut fingerprints)?;

    let bundle = ArtifactBundle {
        bernoulli,
        svm,
        ensemble,
        vectorizer,
        tools,
        fingerprints,
    };

    for model in bundle.models() {
        if model.n_features() != bundle.vectorizer.n_features() {
            log::warn!(
                "{} expects {} features but the vectorizer produces {}",
                model.name(),
                model.n_features(),
                bundle.vectorizer.n_features()
            );
        }
    }
    log::info!(
        "Artifacts ready: {} features, {} stopwords, {} root words",
        bundle.vectorizer.n_features(),
        bundle.tools.stopword.len(),
        bundle.tools.stemmer.dictionary_len()
    );
    Ok(bundle)
}

/// Load-once holder for the artifact bundle.
///
/// The first call to [`ArtifactCache::get_or_load`] decides the outcome for
/// the lifetime of the cache; failures are not retried.
#[derive(Debug, Default)]
pub struct ArtifactCache {
    cell: OnceCell<Result<ArtifactBundle, ArtifactError>>,
}

static GLOBAL_CACHE: ArtifactCache = ArtifactCache::new();

impl ArtifactCache {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Process-wide cache used by the binary
    pub fn global() -> &'static ArtifactCache {
        &GLOBAL_CACHE
    }

    pub fn get_or_load(&self, paths: &ArtifactPaths) -> Result<&ArtifactBundle, &ArtifactError> {
        self.cell
            .get_or_init(|| {
                let result = load_artifacts(paths);
                if let Err(e) = &result {
                    log::error!("Failed to load artifacts: {}", e);
                }
                result
            })
            .as_ref()
    }

    /// The loaded bundle, if loading has happened and succeeded
    pub fn bundle(&self) -> Option<&ArtifactBundle> {
        self.cell.get().and_then(|r| r.as_ref().ok())
    }

    /// Gate for every prediction feature
    pub fn models_loaded(&self) -> bool {
        self.bundle().is_some()
    }
}
