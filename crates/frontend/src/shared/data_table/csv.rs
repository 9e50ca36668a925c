//! Client-side CSV for the export fallback: only the rows currently loaded.

use super::columns::ColumnDef;
use super::row::TableRow;

/// Quotes a field (doubling inner quotes) when it contains a comma, a quote
/// or a line break; returns it unchanged otherwise.
pub fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Incremental CSV writer. The header row is the column keys in declared
/// order; rows are appended in chunks so the caller can yield between them.
#[derive(Debug, Clone)]
pub struct CsvBuilder {
    keys: Vec<&'static str>,
    buf: String,
    rows: usize,
}

impl CsvBuilder {
    pub fn new(columns: &[ColumnDef]) -> Self {
        let keys: Vec<&'static str> = columns.iter().map(|c| c.key).collect();
        let mut buf = keys
            .iter()
            .map(|k| escape_field(k))
            .collect::<Vec<_>>()
            .join(",");
        buf.push('\n');
        Self { keys, buf, rows: 0 }
    }

    pub fn push_rows<R: TableRow>(&mut self, rows: &[R]) {
        for row in rows {
            let line = self
                .keys
                .iter()
                .map(|k| escape_field(&row.cell(k)))
                .collect::<Vec<_>>()
                .join(",");
            self.buf.push_str(&line);
            self.buf.push('\n');
            self.rows += 1;
        }
    }

    pub fn rows_written(&self) -> usize {
        self.rows
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Whole document in one go.
pub fn rows_to_csv<R: TableRow>(columns: &[ColumnDef], rows: &[R]) -> String {
    let mut builder = CsvBuilder::new(columns);
    builder.push_rows(rows);
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Pair {
        id: String,
        note: String,
    }

    impl TableRow for Pair {
        fn row_id(&self) -> String {
            self.id.clone()
        }
        fn cell(&self, key: &str) -> String {
            match key {
                "id" => self.id.clone(),
                "note" => self.note.clone(),
                _ => String::new(),
            }
        }
    }

    fn columns() -> Vec<ColumnDef> {
        vec![ColumnDef::new("id", "Id"), ColumnDef::new("note", "Note")]
    }

    fn parse(doc: &str) -> Vec<Vec<String>> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(doc.as_bytes())
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_escape_rules() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_document_shape() {
        let rows = vec![
            Pair { id: "1".into(), note: "x, y".into() },
            Pair { id: "2".into(), note: "".into() },
        ];
        let doc = rows_to_csv(&columns(), &rows);
        assert_eq!(doc, "id,note\n1,\"x, y\"\n2,\n");
        let records = parse(&doc);
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], vec!["1", "x, y"]);
    }

    #[test]
    fn test_chunked_equals_whole() {
        let rows: Vec<Pair> = (0..250)
            .map(|i| Pair { id: i.to_string(), note: format!("n{}", i) })
            .collect();
        let mut builder = CsvBuilder::new(&columns());
        for chunk in rows.chunks(100) {
            builder.push_rows(chunk);
        }
        assert_eq!(builder.rows_written(), 250);
        assert_eq!(builder.finish(), rows_to_csv(&columns(), &rows));
    }

    proptest! {
        #[test]
        fn prop_field_round_trips(value in "[a-z ,\"\n\r]{0,24}") {
            let rows = vec![Pair { id: "1".into(), note: value.clone() }];
            let doc = rows_to_csv(&columns(), &rows);
            let records = parse(&doc);
            prop_assert_eq!(records.len(), 2);
            prop_assert_eq!(&records[1][1], &value);
        }
    }
}
