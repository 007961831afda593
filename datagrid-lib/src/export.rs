//! CSV export.
//!
//! Rows are serialized to JSON objects and columns are looked up by key, so
//! any `Serialize` row type can be exported without extra plumbing. Output
//! follows RFC 4180: CRLF line endings, fields quoted when they contain a
//! comma, quote, CR or LF, and embedded quotes doubled.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::config::ExportColumn;
use crate::error::ExportError;

/// A generated CSV file, ready to be handed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// File name including the `.csv` extension.
    pub filename: String,
    /// UTF-8 file contents.
    pub contents: String,
}

impl CsvExport {
    /// Number of data rows (excluding the header).
    pub fn row_count(&self) -> usize {
        csv::ReaderBuilder::new()
            .from_reader(self.contents.as_bytes())
            .records()
            .count()
    }

    /// Write the file into `dir`, returning its path.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        fs::write(&path, self.contents.as_bytes())?;
        log::debug!("Wrote CSV export to {}", path.display());
        Ok(path)
    }
}

/// Build a CSV export of `rows`.
///
/// With no explicit `columns`, the keys of the first row's JSON object are
/// used. Keys missing from a row export as empty fields.
pub fn export_rows<T: Serialize>(
    rows: &[T],
    columns: &[ExportColumn],
    filename_stem: &str,
) -> Result<CsvExport, ExportError> {
    let values = rows
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<Value>, _>>()?;

    let columns = if columns.is_empty() {
        infer_columns(values.first())?
    } else {
        columns.to_vec()
    };

    let filename = format!("{}.csv", filename_stem);
    if columns.is_empty() {
        return Ok(CsvExport {
            filename,
            contents: String::new(),
        });
    }

    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(columns.iter().map(ExportColumn::label))?;
    for value in &values {
        writer.write_record(columns.iter().map(|col| field(value, &col.key)))?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    let contents =
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    Ok(CsvExport { filename, contents })
}

fn infer_columns(first: Option<&Value>) -> Result<Vec<ExportColumn>, ExportError> {
    match first {
        None => Ok(Vec::new()),
        Some(Value::Object(map)) => Ok(map.keys().map(ExportColumn::new).collect()),
        Some(Value::Array(_)) => Err(ExportError::NotAnObject("an array")),
        Some(Value::String(_)) => Err(ExportError::NotAnObject("a string")),
        Some(Value::Number(_)) => Err(ExportError::NotAnObject("a number")),
        Some(Value::Bool(_)) => Err(ExportError::NotAnObject("a boolean")),
        Some(Value::Null) => Err(ExportError::NotAnObject("null")),
    }
}

fn field(row: &Value, key: &str) -> String {
    match row.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Invoice {
        number: String,
        customer: String,
        amount: f64,
        paid: bool,
        note: Option<String>,
    }

    fn invoice(number: &str, customer: &str, note: Option<&str>) -> Invoice {
        Invoice {
            number: number.into(),
            customer: customer.into(),
            amount: 12.5,
            paid: false,
            note: note.map(Into::into),
        }
    }

    #[test]
    fn test_columns_inferred_from_first_row_in_field_order() {
        let export = export_rows(&[invoice("INV-1", "Acme", None)], &[], "invoices").unwrap();

        assert_eq!(export.filename, "invoices.csv");
        assert_eq!(
            export.contents,
            "number,customer,amount,paid,note\r\nINV-1,Acme,12.5,false,\r\n"
        );
        assert_eq!(export.row_count(), 1);
    }

    #[test]
    fn test_rfc4180_escaping() {
        let rows = [invoice(
            "INV-2",
            "Smith, Jones & \"Partners\"",
            Some("line one\nline two"),
        )];
        let columns = [ExportColumn::new("customer"), ExportColumn::new("note")];
        let export = export_rows(&rows, &columns, "x").unwrap();

        assert_eq!(
            export.contents,
            "customer,note\r\n\"Smith, Jones & \"\"Partners\"\"\",\"line one\nline two\"\r\n"
        );

        let mut reader = csv::Reader::from_reader(export.contents.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "Smith, Jones & \"Partners\"");
        assert_eq!(&record[1], "line one\nline two");
    }

    #[test]
    fn test_missing_keys_export_empty() {
        let columns = [
            ExportColumn::new("number").with_header("Invoice #"),
            ExportColumn::new("does_not_exist"),
        ];
        let export = export_rows(&[invoice("INV-3", "Acme", None)], &columns, "x").unwrap();
        assert_eq!(export.contents, "Invoice #,does_not_exist\r\nINV-3,\r\n");
    }

    #[test]
    fn test_empty_export() {
        let export = export_rows::<Invoice>(&[], &[], "empty").unwrap();
        assert!(export.contents.is_empty());
        assert_eq!(export.row_count(), 0);
    }

    #[test]
    fn test_non_object_rows_cannot_infer_columns() {
        let result = export_rows(&["a", "b"], &[], "x");
        assert!(matches!(result, Err(ExportError::NotAnObject("a string"))));
    }

    #[test]
    fn test_write_to_dir() {
        let dir = std::env::temp_dir().join(format!("datagrid-export-{}", std::process::id()));
        let export = export_rows(&[invoice("INV-4", "Acme", None)], &[], "invoices").unwrap();

        let path = export.write_to_dir(&dir).unwrap();
        assert_eq!(path.file_name().unwrap(), "invoices.csv");
        assert_eq!(fs::read_to_string(&path).unwrap(), export.contents);

        let _ = fs::remove_dir_all(&dir);
    }
}
