use serde::Serialize;
use serde_json::Value as JsonValue;

// ---------------------------------------------------------------------------
// Column names consumed downstream
// ---------------------------------------------------------------------------

pub const ID_COLUMN: &str = "id";
pub const STATUS_COLUMN: &str = "pred_status";
pub const PROBA_ORAL_COLUMN: &str = "proba_oral";
pub const PROBA_SPOTLIGHT_COLUMN: &str = "proba_spotlight";
pub const PROBA_POSTER_COLUMN: &str = "proba_poster";
pub const PROBA_REJECT_COLUMN: &str = "proba_reject";

// ---------------------------------------------------------------------------
// DataRow – one parsed line
// ---------------------------------------------------------------------------

/// Ordered mapping `column name → value` for one data line.
///
/// Keys keep the header's order. Inserting an existing key replaces its
/// value in place, so duplicate header names collapse onto the first slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataRow {
    fields: Vec<(String, String)>,
}

impl DataRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Value of `column`, if the row has that column at all.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Value of `column`, or `""` when the column is absent.
    pub fn get_or_empty(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DataRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = DataRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

// ---------------------------------------------------------------------------
// Dataset – the result of one parse
// ---------------------------------------------------------------------------

/// All rows of one prediction document, in source line order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    /// Header column names (trimmed, in header order).
    pub columns: Vec<String>,
    pub rows: Vec<DataRow>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Category – the closed set of predicted outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Oral,
    Spotlight,
    Poster,
    Reject,
}

impl Category {
    /// Display order used by the chart and the probability bars.
    pub const ALL: [Category; 4] = [
        Category::Oral,
        Category::Spotlight,
        Category::Poster,
        Category::Reject,
    ];

    /// Case-insensitive match of a raw status value.
    pub fn from_status(status: &str) -> Option<Self> {
        match status.to_lowercase().as_str() {
            "oral" => Some(Category::Oral),
            "spotlight" => Some(Category::Spotlight),
            "poster" => Some(Category::Poster),
            "reject" => Some(Category::Reject),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Oral => "oral",
            Category::Spotlight => "spotlight",
            Category::Poster => "poster",
            Category::Reject => "reject",
        }
    }

    /// Short label for chart axes and probability bars.
    pub fn label(self) -> &'static str {
        match self {
            Category::Oral => "Oral",
            Category::Spotlight => "Spotlight",
            Category::Poster => "Poster",
            Category::Reject => "Reject",
        }
    }

    /// Label for a predicted status in the result card.
    pub fn status_label(self) -> &'static str {
        match self {
            Category::Reject => "Rejected",
            other => other.label(),
        }
    }

    pub fn is_accepted(self) -> bool {
        self != Category::Reject
    }
}

// ---------------------------------------------------------------------------
// PredictionRecord – typed view over a DataRow
// ---------------------------------------------------------------------------

/// One submission's prediction. Probabilities are fractions in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRecord {
    pub id: String,
    pub pred_status: String,
    pub proba_oral: f64,
    pub proba_spotlight: f64,
    pub proba_poster: f64,
    pub proba_reject: f64,
}

impl PredictionRecord {
    /// Read the known columns by name. Missing or non-numeric
    /// probabilities read as `0.0`.
    pub fn from_row(row: &DataRow) -> Self {
        Self {
            id: row.get_or_empty(ID_COLUMN).to_string(),
            pred_status: row.get_or_empty(STATUS_COLUMN).to_string(),
            proba_oral: parse_probability(row.get(PROBA_ORAL_COLUMN)),
            proba_spotlight: parse_probability(row.get(PROBA_SPOTLIGHT_COLUMN)),
            proba_poster: parse_probability(row.get(PROBA_POSTER_COLUMN)),
            proba_reject: parse_probability(row.get(PROBA_REJECT_COLUMN)),
        }
    }

    pub fn category(&self) -> Option<Category> {
        Category::from_status(&self.pred_status)
    }

    /// Human label for the predicted status; unknown statuses are shown
    /// lower-cased as-is, an empty one as "unknown".
    pub fn status_label(&self) -> String {
        match self.category() {
            Some(cat) => cat.status_label().to_string(),
            None if self.pred_status.is_empty() => "unknown".to_string(),
            None => self.pred_status.to_lowercase(),
        }
    }

    pub fn probability(&self, category: Category) -> f64 {
        match category {
            Category::Oral => self.proba_oral,
            Category::Spotlight => self.proba_spotlight,
            Category::Poster => self.proba_poster,
            Category::Reject => self.proba_reject,
        }
    }

    /// Probability as a percentage, for display.
    pub fn percent(&self, category: Category) -> f64 {
        self.probability(category) * 100.0
    }
}

fn parse_probability(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// MetricsDocument – per-model validation summary
// ---------------------------------------------------------------------------

/// Keys present in every metrics file that add nothing to the panel.
const HIDDEN_METRIC_KEYS: [&str; 2] = ["model", "split"];

/// Opaque `metric name → value` mapping in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsDocument {
    entries: serde_json::Map<String, JsonValue>,
}

impl MetricsDocument {
    pub fn new(entries: serde_json::Map<String, JsonValue>) -> Self {
        Self { entries }
    }

    /// `(label, value)` pairs for the metrics panel.
    pub fn display_entries(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter(|(key, _)| !HIDDEN_METRIC_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (metric_label(key), metric_value(value)))
            .collect()
    }
}

/// Panel contents when a model has no metrics document.
pub fn placeholder_metrics() -> Vec<(String, String)> {
    vec![
        ("Status".to_string(), "Pending Integration".to_string()),
        ("Note".to_string(), "Predictions coming soon".to_string()),
    ]
}

/// `macro_f1` → `Macro F1`.
pub fn metric_label(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn metric_value(value: &JsonValue) -> String {
    match value {
        JsonValue::Number(n) => match n.as_f64() {
            Some(v) => format!("{v:.4}"),
            None => n.to_string(),
        },
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
