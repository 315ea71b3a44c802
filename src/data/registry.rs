use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Model registry: identifier → prediction + metrics documents
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown model '{0}' (expected one of: catboost, tabpfn, dtree, logreg)")]
    UnknownModel(String),
}

/// The closed set of precomputed prediction sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelId {
    #[default]
    CatBoost,
    TabPfn,
    DecisionTree,
    LogisticRegression,
}

/// Static description of one registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSource {
    pub id: ModelId,
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Prediction CSV, relative to the data root.
    pub dataset: &'static str,
    /// Validation metrics JSON, relative to the data root.
    pub metrics: &'static str,
}

const REGISTRY: [ModelSource; 4] = [
    ModelSource {
        id: ModelId::CatBoost,
        key: "catboost",
        name: "CatBoost",
        description: "Gradient boosting with categorical feature handling",
        dataset: "iclr/iclr2026_catboost_predictions.csv",
        metrics: "metrics/iclr2026_validation_catboost.json",
    },
    ModelSource {
        id: ModelId::TabPfn,
        key: "tabpfn",
        name: "TabPFN",
        description: "Prior-data Fitted Networks for tabular data",
        dataset: "iclr/iclr2026_tabpfn_predictions.csv",
        metrics: "metrics/iclr2026_validation_tabpfn.json",
    },
    ModelSource {
        id: ModelId::DecisionTree,
        key: "dtree",
        name: "Decision Tree",
        description: "Non-parametric decision tree model",
        dataset: "iclr/iclr2026_decision_tree_predictions.csv",
        metrics: "metrics/iclr2026_validation_decision_tree.json",
    },
    ModelSource {
        id: ModelId::LogisticRegression,
        key: "logreg",
        name: "Logistic Regression",
        description: "Linear baseline model",
        dataset: "iclr/iclr2026_logistic_regression_predictions.csv",
        metrics: "metrics/iclr2026_validation_logistic_regression.json",
    },
];

impl ModelId {
    pub const ALL: [ModelId; 4] = [
        ModelId::CatBoost,
        ModelId::TabPfn,
        ModelId::DecisionTree,
        ModelId::LogisticRegression,
    ];

    pub fn source(self) -> &'static ModelSource {
        match self {
            ModelId::CatBoost => &REGISTRY[0],
            ModelId::TabPfn => &REGISTRY[1],
            ModelId::DecisionTree => &REGISTRY[2],
            ModelId::LogisticRegression => &REGISTRY[3],
        }
    }

    pub fn key(self) -> &'static str {
        self.source().key
    }

    pub fn name(self) -> &'static str {
        self.source().name
    }
}

impl FromStr for ModelId {
    type Err = RegistryError;

    /// Exact, lower-case registry key. No fallback to a default model.
    fn from_str(key: &str) -> Result<Self, Self::Err> {
        REGISTRY
            .iter()
            .find(|src| src.key == key)
            .map(|src| src.id)
            .ok_or_else(|| RegistryError::UnknownModel(key.to_string()))
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl ModelSource {
    pub fn dataset_path(&self, root: &Path) -> PathBuf {
        root.join(self.dataset)
    }

    pub fn metrics_path(&self, root: &Path) -> PathBuf {
        root.join(self.metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_model_round_trips_through_its_key() {
        for id in ModelId::ALL {
            assert_eq!(id.source().id, id);
            assert_eq!(id.key().parse::<ModelId>(), Ok(id));
        }
    }

    #[test]
    fn test_unknown_model_is_an_error() {
        assert_eq!(
            "xgboost".parse::<ModelId>(),
            Err(RegistryError::UnknownModel("xgboost".to_string()))
        );
        assert!("CatBoost".parse::<ModelId>().is_err());
        assert!("".parse::<ModelId>().is_err());
    }

    #[test]
    fn test_locators_resolve_under_root() {
        let src = ModelId::DecisionTree.source();
        let root = Path::new("Archiv");
        assert_eq!(
            src.dataset_path(root),
            Path::new("Archiv/iclr/iclr2026_decision_tree_predictions.csv")
        );
        assert_eq!(
            src.metrics_path(root),
            Path::new("Archiv/metrics/iclr2026_validation_decision_tree.json")
        );
    }
}
