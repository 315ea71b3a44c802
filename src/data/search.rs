use super::model::{Dataset, PredictionRecord, ID_COLUMN};

// ---------------------------------------------------------------------------
// Identifier search
// ---------------------------------------------------------------------------

/// Result of looking up a submission id.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The query was blank after trimming.
    EmptyQuery,
    /// There is no data to search yet.
    NotLoaded,
    /// No row carries this id (query shown normalized to upper case).
    NotFound(String),
    Found(PredictionRecord),
}

impl SearchOutcome {
    /// Status line shown under the search box.
    pub fn message(&self) -> String {
        match self {
            SearchOutcome::EmptyQuery => "Please enter a submission ID".to_string(),
            SearchOutcome::NotLoaded => "Data not loaded yet. Please wait...".to_string(),
            SearchOutcome::NotFound(query) => format!("No prediction found for ID: {query}"),
            SearchOutcome::Found(_) => "Found!".to_string(),
        }
    }

    pub fn record(&self) -> Option<&PredictionRecord> {
        match self {
            SearchOutcome::Found(record) => Some(record),
            _ => None,
        }
    }
}

/// Case-insensitive exact match on the `id` column; the first matching row
/// in dataset order wins.
pub fn search(dataset: &Dataset, query: &str) -> SearchOutcome {
    let query = query.trim().to_uppercase();
    if query.is_empty() {
        return SearchOutcome::EmptyQuery;
    }
    if dataset.is_empty() {
        return SearchOutcome::NotLoaded;
    }

    dataset
        .rows
        .iter()
        .find(|row| {
            row.get(ID_COLUMN)
                .is_some_and(|id| id.to_uppercase() == query)
        })
        .map(|row| SearchOutcome::Found(PredictionRecord::from_row(row)))
        .unwrap_or(SearchOutcome::NotFound(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parser::parse_rows;

    fn sample() -> Dataset {
        parse_rows(
            "id,pred_status,proba_oral,proba_spotlight,proba_poster,proba_reject\n\
             AB12,oral,0.6,0.2,0.1,0.1\n\
             CD34,reject,0.0,0.1,0.2,0.7\n\
             ab12,poster,0.1,0.1,0.7,0.1\n",
        )
    }

    #[test]
    fn test_lowercase_query_finds_first_match() {
        let outcome = search(&sample(), "ab12");
        let record = outcome.record().expect("should find AB12");
        assert_eq!(record.id, "AB12");
        assert_eq!(record.pred_status, "oral");
        assert_eq!(record.proba_oral, 0.6);
        assert_eq!(outcome.message(), "Found!");
    }

    #[test]
    fn test_query_is_trimmed() {
        let outcome = search(&sample(), "  cd34 ");
        assert_eq!(outcome.record().map(|r| r.id.as_str()), Some("CD34"));
    }

    #[test]
    fn test_miss_is_not_found() {
        let outcome = search(&sample(), "ZZ99");
        assert_eq!(outcome, SearchOutcome::NotFound("ZZ99".to_string()));
        assert_eq!(outcome.message(), "No prediction found for ID: ZZ99");
    }

    #[test]
    fn test_no_partial_matching() {
        assert!(matches!(search(&sample(), "AB1"), SearchOutcome::NotFound(_)));
    }

    #[test]
    fn test_empty_query_and_unloaded_data_are_distinct() {
        assert_eq!(search(&sample(), "   "), SearchOutcome::EmptyQuery);
        assert_eq!(search(&Dataset::default(), "AB12"), SearchOutcome::NotLoaded);
        assert_eq!(search(&Dataset::default(), ""), SearchOutcome::EmptyQuery);
    }
}
