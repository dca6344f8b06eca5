//! Tabular source data the curves are built from.

use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use wt_core::{Real, parse_cell};

use crate::error::{AppError, AppResult};

/// Header given to the column created by [`DataGrid::split_column`].
pub const SPLIT_COLUMN_HEADER: &str = "Split";

/// How a delimited file is turned into a grid. Row numbers are 1-based and
/// count the non-blank lines of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSettings {
    pub delimiter: u8,
    /// Take column names from `header_row`; otherwise columns are numbered.
    pub use_header: bool,
    pub header_row: usize,
    /// First line read as data. The header line is never data.
    pub start_row: usize,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            use_header: true,
            header_row: 1,
            start_row: 1,
        }
    }
}

impl ImportSettings {
    /// Defaults with the delimiter picked from the extension: comma for
    /// `.csv`, tab otherwise.
    pub fn for_path(path: &Path) -> Self {
        let delimiter = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => b',',
            _ => b'\t',
        };
        Self {
            delimiter,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// A table of text cells with one header per column.
///
/// Cells stay text; numbers are parsed on demand with [`parse_cell`], so a
/// non-numeric cell reads as `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataGrid {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl DataGrid {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Read a delimited table whose first line holds the column names.
    pub fn from_delimited<R: Read>(reader: R, delimiter: u8) -> AppResult<Self> {
        Self::import(
            reader,
            &ImportSettings {
                delimiter,
                ..ImportSettings::default()
            },
        )
    }

    /// Read a delimited table, skipping lines before `start_row` except the
    /// header line.
    pub fn import<R: Read>(reader: R, settings: &ImportSettings) -> AppResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(settings.delimiter)
            .flexible(true)
            .has_headers(false)
            .from_reader(reader);

        let mut headers = None;
        let mut rows = Vec::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            let line = i + 1;
            if settings.use_header && line == settings.header_row {
                headers = Some(record.iter().map(|h| h.trim().to_string()).collect());
            } else if line >= settings.start_row {
                rows.push(record.iter().map(str::to_string).collect());
            }
        }

        let headers = headers.unwrap_or_else(|| {
            let width = rows.iter().map(Vec::len).max().unwrap_or(0);
            (1..=width).map(|c| c.to_string()).collect()
        });
        Ok(Self { headers, rows })
    }

    /// Load a table from disk; see [`ImportSettings::for_path`] for the usual settings.
    pub fn load_with(path: &Path, settings: &ImportSettings) -> AppResult<Self> {
        let file = File::open(path).map_err(|e| AppError::TableRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let grid = Self::import(BufReader::new(file), settings)?;
        tracing::info!(
            path = %path.display(),
            columns = grid.column_count(),
            rows = grid.row_count(),
            "data table loaded"
        );
        Ok(grid)
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn header(&self, col: usize) -> Option<&str> {
        self.headers.get(col).map(String::as_str)
    }

    /// Raw cell text; short rows read as empty.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        let row = self.rows.get(row)?;
        if col >= self.headers.len() {
            return None;
        }
        Some(row.get(col).map(String::as_str).unwrap_or(""))
    }

    pub fn check_column(&self, col: usize) -> AppResult<()> {
        if col < self.column_count() {
            Ok(())
        } else {
            Err(AppError::InvalidColumnSelection {
                column: col,
                available: self.column_count(),
            })
        }
    }

    /// Every row of one column as numbers.
    pub fn column_values(&self, col: usize) -> AppResult<Vec<Real>> {
        self.check_column(col)?;
        Ok((0..self.row_count())
            .map(|row| self.cell(row, col).map_or(0.0, parse_cell))
            .collect())
    }

    /// Rows whose value in `col` is negative. On a pressure column these are
    /// the readings flagged as errors.
    pub fn negative_rows(&self, col: usize) -> AppResult<Vec<usize>> {
        Ok(self
            .column_values(col)?
            .into_iter()
            .enumerate()
            .filter(|&(_, v)| v < 0.0)
            .map(|(row, _)| row)
            .collect())
    }

    /// Pad or cut every row to the column count so edits can index freely.
    fn square_rows(&mut self) {
        let width = self.column_count();
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
    }

    /// Insert an empty row before `at`; `at == row_count()` appends.
    pub fn insert_row(&mut self, at: usize) -> AppResult<()> {
        if at > self.row_count() {
            return Err(AppError::InvalidInput(format!(
                "row {at} is past the end of a {}-row table",
                self.row_count()
            )));
        }
        self.rows.insert(at, vec![String::new(); self.column_count()]);
        Ok(())
    }

    /// Delete the given rows. Duplicates and indices past the end are
    /// ignored; returns how many rows were removed.
    pub fn delete_rows(&mut self, rows: &[usize]) -> usize {
        let doomed = descending_unique(rows, self.row_count());
        for &row in &doomed {
            self.rows.remove(row);
        }
        tracing::debug!(removed = doomed.len(), "rows deleted");
        doomed.len()
    }

    /// Insert an empty column named `header` before `at`; `at == column_count()` appends.
    pub fn insert_column(&mut self, at: usize, header: impl Into<String>) -> AppResult<()> {
        if at > self.column_count() {
            return Err(AppError::InvalidColumnSelection {
                column: at,
                available: self.column_count(),
            });
        }
        self.square_rows();
        self.headers.insert(at, header.into());
        for row in &mut self.rows {
            row.insert(at, String::new());
        }
        Ok(())
    }

    /// Delete the given columns. Duplicates and indices past the end are
    /// ignored; returns how many columns were removed.
    pub fn delete_columns(&mut self, cols: &[usize]) -> usize {
        self.square_rows();
        let doomed = descending_unique(cols, self.column_count());
        for &col in &doomed {
            self.headers.remove(col);
            for row in &mut self.rows {
                row.remove(col);
            }
        }
        tracing::debug!(removed = doomed.len(), "columns deleted");
        doomed.len()
    }

    /// Split every cell of `col` at the first `separator`.
    ///
    /// The trimmed left part stays in `col`, the trimmed right part goes to a
    /// new column inserted after it. Cells without the separator are left
    /// alone and get an empty neighbour.
    pub fn split_column(&mut self, col: usize, separator: &str) -> AppResult<()> {
        self.check_column(col)?;
        if separator.is_empty() {
            return Err(AppError::InvalidInput(
                "split separator must not be empty".to_string(),
            ));
        }
        self.insert_column(col + 1, SPLIT_COLUMN_HEADER)?;
        for row in &mut self.rows {
            let text = std::mem::take(&mut row[col]);
            match text.split_once(separator) {
                Some((left, right)) => {
                    row[col] = left.trim().to_string();
                    row[col + 1] = right.trim().to_string();
                }
                None => row[col] = text,
            }
        }
        Ok(())
    }

    /// Stable sort of the rows by one column.
    ///
    /// Numeric cells compare by value and sort before text cells, which
    /// compare as strings.
    pub fn sort_by_column(&mut self, col: usize, order: SortOrder) -> AppResult<()> {
        self.check_column(col)?;
        self.square_rows();
        self.rows.sort_by(|a, b| {
            let ordering = compare_cells(&a[col], &b[col]);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
        Ok(())
    }
}

fn descending_unique(indices: &[usize], len: usize) -> Vec<usize> {
    let mut sorted: Vec<usize> = indices.iter().copied().filter(|&i| i < len).collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.dedup();
    sorted
}

fn compare_cells(a: &str, b: &str) -> Ordering {
    let number = |s: &str| s.trim().parse::<Real>().ok().filter(|v| !v.is_nan());
    match (number(a), number(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
