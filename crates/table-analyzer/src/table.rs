//! Table Model and Delimited-Text Loading

use crate::error::TableError;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Delimited-text parsing options
#[derive(Debug, Clone, Copy)]
pub struct CsvOptions {
    /// Field delimiter byte
    pub delimiter: u8,
    /// First record holds column names; otherwise columns are keyed by index
    pub has_headers: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
        }
    }
}

/// One positional field of a table, every cell already stringified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    key: String,
    cells: Vec<String>,
}

impl Column {
    /// Column name, or its index for header-less tables
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// Ordered columns sharing one row count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table from `(key, cells)` pairs.
    ///
    /// Cells of any `ToString` type are converted to text here, so every
    /// metric downstream sees strings. Duplicate keys get `.1`, `.2`, ...
    /// suffixes.
    pub fn from_columns<I, K, C, V>(columns: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<String>,
        C: IntoIterator<Item = V>,
        V: ToString,
    {
        let (keys, cells): (Vec<String>, Vec<Vec<String>>) = columns
            .into_iter()
            .map(|(key, cells)| {
                (
                    key.into(),
                    cells.into_iter().map(|c| c.to_string()).collect(),
                )
            })
            .unzip();

        let row_count = cells.first().map_or(0, Vec::len);
        let columns: Vec<Column> = dedupe_keys(keys)
            .into_iter()
            .zip(cells)
            .map(|(key, cells)| Column { key, cells })
            .collect();

        if let Some(bad) = columns.iter().find(|c| c.cells.len() != row_count) {
            return Err(TableError::Jagged {
                key: bad.key.clone(),
                expected: row_count,
                actual: bad.cells.len(),
            });
        }

        Ok(Self { columns, row_count })
    }

    /// Parse delimited text from any reader.
    ///
    /// Empty fields stay empty strings. Records whose length differs from the
    /// header (or first record) are rejected.
    pub fn from_csv_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(options.has_headers)
            .flexible(false)
            .from_reader(reader);

        let headers: Option<Vec<String>> = if options.has_headers {
            Some(reader.headers()?.iter().map(str::to_string).collect())
        } else {
            None
        };

        let mut cells: Vec<Vec<String>> = headers
            .as_ref()
            .map(|h| vec![Vec::new(); h.len()])
            .unwrap_or_default();

        for result in reader.records() {
            let record = result?;
            if cells.is_empty() {
                cells = vec![Vec::new(); record.len()];
            }
            for (column, field) in cells.iter_mut().zip(record.iter()) {
                column.push(field.to_string());
            }
        }

        let keys = headers.unwrap_or_else(|| (0..cells.len()).map(|i| i.to_string()).collect());
        let table = Self::from_columns(keys.into_iter().zip(cells))?;
        debug!(
            "Parsed table: {} columns x {} rows",
            table.column_count(),
            table.row_count()
        );
        Ok(table)
    }

    /// Open and parse a delimited-text file
    pub fn from_csv_path(path: impl AsRef<Path>, options: &CsvOptions) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_csv_reader(file, options)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }
}

/// Make column keys unique, suffixing repeats with `.N`
fn dedupe_keys(keys: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(keys.len());
    keys.into_iter()
        .map(|key| {
            let mut candidate = key.clone();
            let mut n = 1;
            while seen.contains(&candidate) {
                candidate = format!("{key}.{n}");
                n += 1;
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}
