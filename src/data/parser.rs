use super::model::{DataRow, Dataset};

// ---------------------------------------------------------------------------
// Row parser: delimited text → Dataset
// ---------------------------------------------------------------------------

const DELIMITER: char = ',';
const QUOTE: char = '"';
const BOM: char = '\u{feff}';

/// Parse comma-separated text whose first line is the header.
///
/// A leading byte-order mark is ignored. Lines whose field count differs
/// from the header's are skipped. This never fails: bad input only yields
/// fewer rows.
pub fn parse_rows(text: &str) -> Dataset {
    let text = text.trim_start_matches(BOM).trim();
    if text.is_empty() {
        return Dataset::default();
    }

    let mut lines = text.split('\n');
    let columns: Vec<String> = match lines.next() {
        Some(header) => split_fields(header)
            .into_iter()
            .map(|name| name.trim().to_string())
            .collect(),
        None => return Dataset::default(),
    };

    let mut rows = Vec::new();
    for line in lines {
        let values = split_fields(line);
        if values.len() != columns.len() {
            continue;
        }
        let row: DataRow = columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let value = values.get(i).map(|v| v.trim()).unwrap_or("");
                (name.as_str(), value)
            })
            .collect();
        rows.push(row);
    }

    Dataset { columns, rows }
}

/// Split one line into raw (untrimmed) fields.
///
/// A `"` toggles quoted mode and is dropped; a comma inside quotes is kept
/// as data. Doubled quotes are two toggles, not an escaped quote.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::search::{search, SearchOutcome};

    fn pairs(row: &DataRow) -> Vec<(&str, &str)> {
        row.iter().collect()
    }

    #[test]
    fn test_rows_keep_line_order() {
        let ds = parse_rows("id,pred_status\nP1,oral\nP2,poster\nP3,reject\n");
        assert_eq!(ds.columns, vec!["id", "pred_status"]);
        assert_eq!(ds.len(), 3);
        let ids: Vec<&str> = ds.rows.iter().map(|r| r.get_or_empty("id")).collect();
        assert_eq!(ids, vec!["P1", "P2", "P3"]);
    }

    #[test]
    fn test_mismatched_field_count_is_dropped() {
        let ds = parse_rows("h1,h2\na,b,c\nx,y\n");
        assert_eq!(ds.len(), 1);
        assert_eq!(pairs(&ds.rows[0]), vec![("h1", "x"), ("h2", "y")]);
    }

    #[test]
    fn test_quoted_delimiter_stays_in_field() {
        assert_eq!(split_fields("\"a,b\",c"), vec!["a,b", "c"]);

        let ds = parse_rows("id,title\nP1,\"Attention, again\"\n");
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.rows[0].get("title"), Some("Attention, again"));
    }

    #[test]
    fn test_doubled_quote_is_two_toggles() {
        assert_eq!(split_fields("\"a\"\"b\""), vec!["ab"]);
        // An unbalanced quote swallows the rest of the line.
        assert_eq!(split_fields("\"a,b,c"), vec!["a,b,c"]);
    }

    #[test]
    fn test_header_is_quote_aware_and_trimmed() {
        let ds = parse_rows(" \"id\" , \"pred, status\" \nP1 , oral \n");
        assert_eq!(ds.columns, vec!["id", "pred, status"]);
        assert_eq!(pairs(&ds.rows[0]), vec![("id", "P1"), ("pred, status", "oral")]);
    }

    #[test]
    fn test_crlf_and_surrounding_whitespace() {
        let ds = parse_rows("\n\n id,pred_status\r\nP1,Oral\r\nP2,Reject\r\n\n");
        assert_eq!(ds.columns, vec!["id", "pred_status"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[1].get("pred_status"), Some("Reject"));
    }

    #[test]
    fn test_leading_bom_is_stripped() {
        let ds = parse_rows("\u{feff}id,pred_status\nAB12,oral\n");
        assert_eq!(ds.columns, vec!["id", "pred_status"]);
        assert_eq!(ds.rows[0].get("id"), Some("AB12"));
        assert!(matches!(search(&ds, "AB12"), SearchOutcome::Found(_)));
    }

    #[test]
    fn test_empty_and_header_only_input() {
        assert!(parse_rows("").is_empty());
        assert!(parse_rows("   \n  ").is_empty());

        let ds = parse_rows("id,pred_status\n");
        assert!(ds.is_empty());
        assert_eq!(ds.columns.len(), 2);
    }

    #[test]
    fn test_empty_values_normalize_to_empty_string() {
        let ds = parse_rows("id,pred_status,proba_oral\nP1,,\n");
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.rows[0].get("pred_status"), Some(""));
        assert_eq!(ds.rows[0].get("proba_oral"), Some(""));
    }

    #[test]
    fn test_duplicate_header_last_value_wins() {
        let ds = parse_rows("id,x,x\nP1,first,second\n");
        assert_eq!(ds.rows[0].len(), 2);
        assert_eq!(ds.rows[0].get("x"), Some("second"));
    }

    #[test]
    fn test_every_row_has_header_keys() {
        let ds = parse_rows("a,b,c\n1,2,3\n4,5\n6,7,8,9\n\"x,y\",z,w\n");
        assert_eq!(ds.len(), 2);
        for row in &ds.rows {
            assert_eq!(row.columns().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn test_matches_csv_crate_on_writer_output() {
        // Files produced by a standard CSV writer never contain embedded
        // quotes, so both readers must agree on them.
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["id", "pred_status", "title", "proba_oral"])
            .unwrap();
        writer.write_record(["AB12", "Oral", "Plain", "0.61"]).unwrap();
        writer
            .write_record(["CD34", "Reject", "Scaling, revisited", "0.02"])
            .unwrap();
        writer.write_record(["EF56", "Poster", "", "0.10"]).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        let ours = parse_rows(&text);

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(|h| h.to_string())
            .collect();
        assert_eq!(ours.columns, headers);

        let theirs: Vec<Vec<String>> = reader
            .records()
            .map(|rec| rec.unwrap().iter().map(|f| f.to_string()).collect())
            .collect();
        assert_eq!(ours.len(), theirs.len());
        for (row, expected) in ours.rows.iter().zip(&theirs) {
            let values: Vec<&str> = row.iter().map(|(_, v)| v).collect();
            assert_eq!(values, *expected);
        }
    }
}
