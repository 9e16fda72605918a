//! Tabular capability for data artifacts.
//!
//! Binary (`pkl`) artifacts work for any serde type. CSV needs a table view,
//! which a type opts into through [`DataArtifact::as_tabular`] and
//! [`DataArtifact::from_table`]. CSV round-trips are lossy: every cell comes
//! back as text and typed views re-parse what they can.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use csv::{ReaderBuilder, WriterBuilder};
use lab_core::errors::{ErrorInfo, LabError};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Read-only table view used to export CSV.
pub trait TabularExport {
    /// Header names, left to right.
    fn columns(&self) -> Vec<String>;
    /// Cells rendered as text, one vector per row.
    fn rows(&self) -> Vec<Vec<String>>;
}

/// A value that can be stored as a data artifact.
pub trait DataArtifact: Serialize + DeserializeOwned {
    /// Table view for CSV export, or `None` when the type has none.
    fn as_tabular(&self) -> Option<&dyn TabularExport> {
        None
    }

    /// Rebuilds the value from a parsed CSV table.
    fn from_table(table: Table) -> Result<Self, LabError> {
        let _ = table;
        Err(LabError::UnsupportedOperation(
            ErrorInfo::new("lab_store.no_tabular", "type cannot be built from a CSV table")
                .with_context("type", std::any::type_name::<Self>()),
        ))
    }
}

/// CSV knobs shared by save and load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataOptions {
    /// Field separator byte.
    pub delimiter: u8,
    /// Whether the first record holds column names.
    pub has_headers: bool,
}

impl Default for DataOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
        }
    }
}

/// Untyped table: a header row and text cells.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Table {
    /// Column names.
    pub columns: Vec<String>,
    /// Text cells; rows may be ragged.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Empty table with the given header.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Position of the named column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Cells of the named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }
}

impl TabularExport for Table {
    fn columns(&self) -> Vec<String> {
        self.columns.clone()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows.clone()
    }
}

impl DataArtifact for Table {
    fn as_tabular(&self) -> Option<&dyn TabularExport> {
        Some(self)
    }

    fn from_table(table: Table) -> Result<Self, LabError> {
        Ok(table)
    }
}

/// Numeric time course as returned by an ODE solver: one row per sample,
/// one column per selection (conventionally `time` first).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Column names.
    pub columns: Vec<String>,
    /// Samples, one vector per row.
    pub rows: Vec<Vec<f64>>,
}

impl TimeSeries {
    /// Empty series with the given header.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a sample row.
    pub fn push_row(&mut self, row: Vec<f64>) {
        self.rows.push(row);
    }

    /// Values of the named column; short rows yield `NaN`.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.columns.iter().position(|column| column == name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).copied().unwrap_or(f64::NAN))
                .collect(),
        )
    }
}

impl TabularExport for TimeSeries {
    fn columns(&self) -> Vec<String> {
        self.columns.clone()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(f64::to_string).collect())
            .collect()
    }
}

impl DataArtifact for TimeSeries {
    fn as_tabular(&self) -> Option<&dyn TabularExport> {
        Some(self)
    }

    fn from_table(table: Table) -> Result<Self, LabError> {
        let mut rows = Vec::with_capacity(table.rows.len());
        for (line, row) in table.rows.iter().enumerate() {
            let parsed = row
                .iter()
                .map(|cell| {
                    cell.trim().parse::<f64>().map_err(|err| {
                        LabError::Parse(
                            ErrorInfo::new("lab_store.csv_number", "cell is not a number")
                                .with_context("row", line.to_string())
                                .with_context("cell", cell.clone())
                                .with_hint(err.to_string()),
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(parsed);
        }
        Ok(TimeSeries {
            columns: table.columns,
            rows,
        })
    }
}

macro_rules! opaque_artifact {
    ($($ty:ty),* $(,)?) => {
        $(impl DataArtifact for $ty {})*
    };
}

opaque_artifact!(
    bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, String, serde_json::Value,
);

impl<T: Serialize + DeserializeOwned> DataArtifact for Vec<T> {}

impl<T: Serialize + DeserializeOwned> DataArtifact for BTreeMap<String, T> {}

impl<T: Serialize + DeserializeOwned> DataArtifact for Option<T> {}

/// Writes `table` as CSV into `writer`.
pub fn write_csv<W: Write>(
    table: &dyn TabularExport,
    writer: W,
    options: &DataOptions,
) -> Result<(), LabError> {
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_writer(writer);
    if options.has_headers {
        writer
            .write_record(table.columns())
            .map_err(|err| wrap_csv("lab_store.csv_header", err))?;
    }
    for row in table.rows() {
        writer
            .write_record(&row)
            .map_err(|err| wrap_csv("lab_store.csv_row", err))?;
    }
    writer
        .flush()
        .map_err(|err| wrap_csv("lab_store.csv_flush", err.into()))
}

/// Parses CSV from `reader` into a [`Table`].
///
/// Without headers the columns are named by position (`"0"`, `"1"`, ...).
pub fn read_csv<R: Read>(reader: R, options: &DataOptions) -> Result<Table, LabError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .flexible(true)
        .from_reader(reader);
    let mut columns = if options.has_headers {
        reader
            .headers()
            .map_err(|err| wrap_csv("lab_store.csv_header", err))?
            .iter()
            .map(str::to_string)
            .collect()
    } else {
        Vec::new()
    };
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| wrap_csv("lab_store.csv_record", err))?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }
    if !options.has_headers {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        columns = (0..width).map(|idx| idx.to_string()).collect();
    }
    Ok(Table { columns, rows })
}

fn wrap_csv(code: &str, err: csv::Error) -> LabError {
    if err.is_io_error() {
        LabError::Filesystem(ErrorInfo::new(code, "CSV I/O failure").with_hint(err.to_string()))
    } else {
        LabError::Parse(ErrorInfo::new(code, "malformed CSV").with_hint(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_series_survives_csv_as_numbers() {
        let mut series = TimeSeries::new(vec!["time".into(), "prey".into()]);
        series.push_row(vec![0.0, 10.0]);
        series.push_row(vec![0.5, 11.25]);
        let mut buffer = Vec::new();
        write_csv(&series, &mut buffer, &DataOptions::default()).unwrap();
        assert_eq!(String::from_utf8(buffer.clone()).unwrap(), "time,prey\n0,10\n0.5,11.25\n");

        let table = read_csv(buffer.as_slice(), &DataOptions::default()).unwrap();
        assert_eq!(table.column("prey"), Some(vec!["10", "11.25"]));
        assert_eq!(TimeSeries::from_table(table).unwrap(), series);
    }

    #[test]
    fn time_series_column_pads_short_rows() {
        let mut series = TimeSeries::new(vec!["time".into(), "prey".into()]);
        series.push_row(vec![0.0, 10.0]);
        series.push_row(vec![1.0]);
        assert_eq!(series.column("time"), Some(vec![0.0, 1.0]));
        let prey = series.column("prey").unwrap();
        assert_eq!(prey[0], 10.0);
        assert!(prey[1].is_nan());
        assert!(series.column("predator").is_none());
    }

    #[test]
    fn headerless_columns_are_positional() {
        let options = DataOptions {
            delimiter: b';',
            has_headers: false,
        };
        let table = read_csv("1;2;3\n4;5;6\n".as_bytes(), &options).unwrap();
        assert_eq!(table.columns, ["0", "1", "2"]);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn non_numeric_cell_fails_time_series() {
        let table = read_csv("time,x\n0,abc\n".as_bytes(), &DataOptions::default()).unwrap();
        let err = TimeSeries::from_table(table).unwrap_err();
        assert_eq!(err.info().code, "lab_store.csv_number");
    }

    #[test]
    fn plain_vectors_have_no_table_view() {
        let data = vec![1_i64, 2, 3];
        assert!(data.as_tabular().is_none());
        assert!(Vec::<i64>::from_table(Table::default()).is_err());
    }
}
