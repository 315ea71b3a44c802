use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Dataset, MetricsDocument};
use super::parser::parse_rows;
use super::registry::ModelId;
use super::stats::SummaryStats;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure that aborts a reload. A missing metrics file is not one of them.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load predictions file {}", path.display())]
    Dataset {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn reader_panicked() -> io::Error {
    io::Error::other("reader panicked")
}

/// Decode file contents as UTF-8, replacing invalid bytes instead of
/// rejecting the whole file.
fn decode_lossy(bytes: &[u8], path: &Path) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => {
            log::warn!(
                "{} is not valid UTF-8; invalid bytes were replaced",
                path.display()
            );
            text
        }
    }
}

// ---------------------------------------------------------------------------
// One complete load
// ---------------------------------------------------------------------------

/// Everything derived from one model's documents.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub model: ModelId,
    pub dataset: Dataset,
    pub stats: SummaryStats,
    pub metrics: Option<MetricsDocument>,
}

/// Read the prediction and metrics documents for `model` under `root`.
///
/// Both files are read concurrently and joined before parsing starts.
/// Only a dataset read failure is an error; metrics problems are logged
/// and yield `metrics: None`.
pub fn load_model(root: &Path, model: ModelId) -> Result<LoadedModel, LoadError> {
    let source = model.source();
    let dataset_path = source.dataset_path(root);
    let metrics_path = source.metrics_path(root);

    let (dataset_bytes, metrics_text) = thread::scope(|s| {
        let dataset = s.spawn(|| std::fs::read(&dataset_path));
        let metrics = s.spawn(|| std::fs::read_to_string(&metrics_path));
        (
            dataset.join().unwrap_or_else(|_| Err(reader_panicked())),
            metrics.join().unwrap_or_else(|_| Err(reader_panicked())),
        )
    });

    let dataset_bytes = dataset_bytes.map_err(|source| LoadError::Dataset {
        path: dataset_path.clone(),
        source,
    })?;
    let dataset_text = decode_lossy(&dataset_bytes, &dataset_path);

    let metrics = match metrics_text {
        Ok(text) => match parse_metrics(&text) {
            Ok(doc) => Some(doc),
            Err(e) => {
                log::warn!("Ignoring metrics file {}: {e:#}", metrics_path.display());
                None
            }
        },
        Err(e) => {
            log::warn!(
                "Metrics file {} not available ({e}), showing placeholder",
                metrics_path.display()
            );
            None
        }
    };

    let dataset = parse_rows(&dataset_text);
    let stats = SummaryStats::from_dataset(&dataset);

    log::info!(
        "Loaded {} predictions for {model} (accept {}, reject {}), metrics {}",
        dataset.len(),
        stats.accept,
        stats.reject,
        if metrics.is_some() { "present" } else { "absent" }
    );

    Ok(LoadedModel {
        model,
        dataset,
        stats,
        metrics,
    })
}

/// Parse a metrics document. It must be a JSON object.
pub fn parse_metrics(text: &str) -> Result<MetricsDocument> {
    let root: JsonValue = serde_json::from_str(text).context("parsing metrics JSON")?;
    match root {
        JsonValue::Object(map) => Ok(MetricsDocument::new(map)),
        other => anyhow::bail!("expected a JSON object, found {}", json_kind(&other)),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Background reloads
// ---------------------------------------------------------------------------

/// A finished reload, tagged with the generation it was requested under.
#[derive(Debug)]
pub struct ReloadOutcome {
    pub generation: u64,
    pub model: ModelId,
    pub result: Result<LoadedModel, LoadError>,
}

/// Runs [`load_model`] off the caller's thread.
///
/// Every request bumps the generation; only the outcome of the latest
/// request is current, so a slow earlier reload can't overwrite a newer one.
pub struct Reloader {
    root: PathBuf,
    generation: u64,
    tx: Sender<ReloadOutcome>,
    rx: Receiver<ReloadOutcome>,
}

impl Reloader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            root: root.into(),
            generation: 0,
            tx,
            rx,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Point later requests at a different data folder.
    pub fn set_root(&mut self, root: impl Into<PathBuf>) {
        self.root = root.into();
    }

    /// Generation of the most recent request (0 before any).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, outcome: &ReloadOutcome) -> bool {
        outcome.generation == self.generation
    }

    /// Start loading `model`. `notify` runs on the worker after the
    /// outcome has been sent (e.g. to wake the UI).
    pub fn request<F>(&mut self, model: ModelId, notify: F) -> u64
    where
        F: FnOnce() + Send + 'static,
    {
        self.generation += 1;
        let generation = self.generation;
        let root = self.root.clone();
        let tx = self.tx.clone();

        log::debug!("Reload #{generation}: {model} from {}", root.display());

        thread::spawn(move || {
            let result = load_model(&root, model);
            // The receiver only disappears when the app shuts down.
            let _ = tx.send(ReloadOutcome {
                generation,
                model,
                result,
            });
            notify();
        });

        generation
    }

    /// Next finished reload, if any, without blocking.
    pub fn poll(&self) -> Option<ReloadOutcome> {
        self.rx.try_recv().ok()
    }

    /// Block until the next reload finishes.
    pub fn wait(&self) -> Option<ReloadOutcome> {
        self.rx.recv().ok()
    }
}
