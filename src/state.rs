use std::path::PathBuf;

use crate::config::Config;
use crate::data::loader::{LoadedModel, ReloadOutcome, Reloader};
use crate::data::model::{Dataset, MetricsDocument, PredictionRecord};
use crate::data::registry::ModelId;
use crate::data::search::{search, SearchOutcome};
use crate::data::stats::SummaryStats;

// ---------------------------------------------------------------------------
// Published data: replaced as a whole after every reload
// ---------------------------------------------------------------------------

/// What the panels render: one model's dataset with everything derived
/// from it. Never patched in place.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub model: ModelId,
    pub dataset: Dataset,
    pub stats: SummaryStats,
    pub metrics: Option<MetricsDocument>,
}

impl Snapshot {
    /// Nothing loaded for `model`: empty rows, zeroed stats, no metrics.
    pub fn empty(model: ModelId) -> Self {
        Self {
            model,
            ..Default::default()
        }
    }
}

impl From<LoadedModel> for Snapshot {
    fn from(loaded: LoadedModel) -> Self {
        Self {
            model: loaded.model,
            dataset: loaded.dataset,
            stats: loaded.stats,
            metrics: loaded.metrics,
        }
    }
}

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

impl Status {
    fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Model picked in the selector; may run ahead of `snapshot.model`
    /// while a reload is in flight.
    pub selected_model: ModelId,

    /// Last published data.
    pub snapshot: Snapshot,

    /// Text in the search box.
    pub query: String,

    /// Record shown in the result card.
    pub result: Option<PredictionRecord>,

    pub status: Status,

    /// Whether a reload is in progress.
    pub loading: bool,

    reloader: Reloader,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            selected_model: config.initial_model,
            snapshot: Snapshot::empty(config.initial_model),
            query: String::new(),
            result: None,
            status: Status::new(StatusKind::Info, "Ready to search..."),
            loading: false,
            reloader: Reloader::new(config.data_root.clone()),
        }
    }

    pub fn data_root(&self) -> PathBuf {
        self.reloader.root().to_path_buf()
    }

    /// Switch to `model` and start loading it. Any previous search result is
    /// cleared; `notify` fires on the worker once the load finishes.
    pub fn select_model<F>(&mut self, model: ModelId, notify: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.selected_model = model;
        self.result = None;
        self.reload(notify);
    }

    /// Use a different data folder and reload the selected model.
    pub fn set_data_root<F>(&mut self, root: PathBuf, notify: F)
    where
        F: FnOnce() + Send + 'static,
    {
        log::info!("Data folder set to {}", root.display());
        self.reloader.set_root(root);
        self.result = None;
        self.reload(notify);
    }

    /// (Re)load the selected model in the background.
    pub fn reload<F>(&mut self, notify: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.loading = true;
        self.status = Status::new(
            StatusKind::Info,
            format!("Loading {} database...", self.selected_model),
        );
        self.reloader.request(self.selected_model, notify);
    }

    /// Apply every finished reload. Returns `true` if the snapshot changed.
    pub fn poll_reload(&mut self) -> bool {
        let mut changed = false;
        while let Some(outcome) = self.reloader.poll() {
            changed |= self.apply_outcome(outcome);
        }
        changed
    }

    /// Block until the next reload finishes and apply it.
    pub fn wait_reload(&mut self) -> bool {
        match self.reloader.wait() {
            Some(outcome) => self.apply_outcome(outcome),
            None => false,
        }
    }

    /// Publish a finished reload, unless a newer one has been requested.
    pub fn apply_outcome(&mut self, outcome: ReloadOutcome) -> bool {
        if !self.reloader.is_current(&outcome) {
            log::debug!(
                "Discarding stale reload #{} for {} (latest is #{})",
                outcome.generation,
                outcome.model,
                self.reloader.generation()
            );
            return false;
        }

        self.loading = false;
        match outcome.result {
            Ok(loaded) => {
                self.snapshot = Snapshot::from(loaded);
                self.status = Status::new(
                    StatusKind::Success,
                    format!(
                        "Loaded {} predictions. Ready to search!",
                        self.snapshot.dataset.len()
                    ),
                );
            }
            Err(e) => {
                log::error!("Error loading data: {e:#}");
                self.snapshot = Snapshot::empty(outcome.model);
                self.status = Status::new(
                    StatusKind::Error,
                    format!("Error loading data for {}", outcome.model),
                );
            }
        }
        true
    }

    /// Look up the current query in the published dataset.
    pub fn perform_search(&mut self) -> SearchOutcome {
        let outcome = search(&self.snapshot.dataset, &self.query);
        let kind = match &outcome {
            SearchOutcome::Found(record) => {
                self.result = Some(record.clone());
                StatusKind::Success
            }
            SearchOutcome::NotFound(_) => {
                self.result = None;
                StatusKind::Error
            }
            SearchOutcome::EmptyQuery | SearchOutcome::NotLoaded => StatusKind::Warning,
        };
        self.status = Status::new(kind, outcome.message());
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    const PREDICTIONS: &str = "id,pred_status,proba_oral,proba_spotlight,proba_poster,proba_reject\n\
                               AB12,oral,0.70,0.10,0.10,0.10\n\
                               CD34,Reject,0.01,0.04,0.05,0.90\n";

    fn write_dataset(root: &Path, model: ModelId) {
        let path = model.source().dataset_path(root);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, PREDICTIONS).unwrap();
    }

    fn state_for(root: &Path) -> AppState {
        AppState::new(&Config {
            data_root: root.to_path_buf(),
            initial_model: ModelId::CatBoost,
        })
    }

    #[test]
    fn test_reload_publishes_snapshot_without_metrics() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), ModelId::CatBoost);

        let mut state = state_for(dir.path());
        state.reload(|| {});
        assert!(state.loading);
        assert!(state.wait_reload());

        assert!(!state.loading);
        assert_eq!(state.snapshot.model, ModelId::CatBoost);
        assert_eq!(state.snapshot.stats.total, 2);
        assert_eq!(state.snapshot.stats.reject, 1);
        assert!(state.snapshot.metrics.is_none());
        assert_eq!(state.status.kind, StatusKind::Success);
        assert_eq!(state.status.text, "Loaded 2 predictions. Ready to search!");
    }

    #[test]
    fn test_failed_reload_resets_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), ModelId::CatBoost);
        let metrics = ModelId::CatBoost.source().metrics_path(dir.path());
        fs::create_dir_all(metrics.parent().unwrap()).unwrap();
        fs::write(metrics, r#"{"model":"catboost","accuracy":0.7}"#).unwrap();

        let mut state = state_for(dir.path());
        state.reload(|| {});
        state.wait_reload();
        assert_eq!(state.snapshot.dataset.len(), 2);
        assert!(state.snapshot.metrics.is_some());

        state.select_model(ModelId::TabPfn, || {});
        assert!(state.wait_reload());
        assert_eq!(state.snapshot.model, ModelId::TabPfn);
        assert!(state.snapshot.dataset.is_empty());
        assert_eq!(state.snapshot.stats, SummaryStats::default());
        assert!(state.snapshot.metrics.is_none());
        assert_eq!(state.status.kind, StatusKind::Error);
        assert_eq!(state.status.text, "Error loading data for tabpfn");
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), ModelId::CatBoost);

        let mut state = state_for(dir.path());
        state.select_model(ModelId::CatBoost, || {});
        state.select_model(ModelId::DecisionTree, || {});

        let mut applied = 0;
        for _ in 0..2 {
            if state.wait_reload() {
                applied += 1;
            }
        }
        assert_eq!(applied, 1);
        assert_eq!(state.snapshot.model, ModelId::DecisionTree);
        assert!(state.snapshot.dataset.is_empty());
    }

    #[test]
    fn test_search_flow() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), ModelId::CatBoost);

        let mut state = state_for(dir.path());
        state.query = "ab12".to_string();
        assert_eq!(state.perform_search(), SearchOutcome::NotLoaded);
        assert_eq!(state.status.kind, StatusKind::Warning);

        state.reload(|| {});
        state.wait_reload();

        let outcome = state.perform_search();
        assert!(matches!(outcome, SearchOutcome::Found(_)));
        assert_eq!(state.result.as_ref().map(|r| r.id.as_str()), Some("AB12"));

        state.query = "  ".to_string();
        assert_eq!(state.perform_search(), SearchOutcome::EmptyQuery);
        assert!(state.result.is_some());

        state.query = "ZZ99".to_string();
        assert!(matches!(state.perform_search(), SearchOutcome::NotFound(_)));
        assert!(state.result.is_none());
        assert_eq!(state.status.text, "No prediction found for ID: ZZ99");
    }

    #[test]
    fn test_switching_models_clears_result() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), ModelId::CatBoost);
        write_dataset(dir.path(), ModelId::LogisticRegression);

        let mut state = state_for(dir.path());
        state.reload(|| {});
        state.wait_reload();
        state.query = "CD34".to_string();
        state.perform_search();
        assert!(state.result.is_some());

        state.select_model(ModelId::LogisticRegression, || {});
        assert!(state.result.is_none());
        assert_eq!(state.status.text, "Loading logreg database...");
        state.wait_reload();
        assert_eq!(state.snapshot.model, ModelId::LogisticRegression);
        assert_eq!(state.snapshot.dataset.len(), 2);
    }
}
