//! Delimited-text export of a curve's data.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use wt_core::Real;
use wt_project::{CurveKind, CurveRecord, StackedCurve};

use crate::error::{AppError, AppResult};

/// Which samples to export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportRange {
    Full,
    /// Times within `start..=end`, written relative to `start`.
    Partial { start: Real, end: Real },
}

impl ExportRange {
    /// Partial range from two picked times, in either order.
    pub fn partial(a: Real, b: Real) -> Self {
        let (start, end) = if a > b { (b, a) } else { (a, b) };
        ExportRange::Partial { start, end }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, ExportRange::Full)
    }

    fn contains(&self, t: Real) -> bool {
        match *self {
            ExportRange::Full => true,
            ExportRange::Partial { start, end } => t >= start && t <= end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Comma,
    Tab,
}

impl Separator {
    /// Tab for `.txt` and `.xls` targets, comma otherwise.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("txt") || ext.eq_ignore_ascii_case("xls") => {
                Separator::Tab
            }
            _ => Separator::Comma,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Comma => ",",
            Separator::Tab => "\t",
        }
    }
}

/// Production rate written into every row of a stacked export: the last
/// recorded production value, or `0` when there is no production data.
pub fn production_value(stacked: &StackedCurve) -> Real {
    stacked
        .secondary_series
        .samples()
        .last()
        .map_or(0.0, |s| s.value)
}

/// Write one curve as delimited text. Returns the number of data rows.
///
/// The header line always uses commas.
pub fn export_curve<W: Write>(
    record: &CurveRecord,
    range: ExportRange,
    mut writer: W,
    separator: Separator,
) -> AppResult<usize> {
    let sep = separator.as_str();
    let q = match &record.kind {
        CurveKind::Stacked(stacked) => Some(production_value(stacked)),
        _ => None,
    };

    let header = match (q.is_some(), range.is_full()) {
        (true, true) => "Time,P,Q",
        (true, false) => "AdjTime,P,Q,OrigTime",
        (false, true) => "Time,Value",
        (false, false) => "AdjTime,Value,OrigTime",
    };
    writeln!(writer, "{header}")?;

    let mut rows = 0;
    for sample in record.primary_series.samples() {
        let t = sample.time;
        if !range.contains(t) {
            continue;
        }
        match (range, q) {
            (ExportRange::Full, Some(q)) => {
                writeln!(writer, "{t}{sep}{}{sep}{q}", sample.value)?;
            }
            (ExportRange::Full, None) => {
                writeln!(writer, "{t}{sep}{}", sample.value)?;
            }
            (ExportRange::Partial { start, .. }, Some(q)) => {
                writeln!(writer, "{}{sep}{}{sep}{q}{sep}{t}", t - start, sample.value)?;
            }
            (ExportRange::Partial { start, .. }, None) => {
                writeln!(writer, "{}{sep}{}{sep}{t}", t - start, sample.value)?;
            }
        }
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}

/// Export to a file, choosing the separator from its extension.
pub fn export_to_path(record: &CurveRecord, range: ExportRange, path: &Path) -> AppResult<usize> {
    let file = File::create(path).map_err(|e| AppError::ExportWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    let rows = export_curve(record, range, BufWriter::new(file), Separator::for_path(path))?;
    tracing::info!(curve = %record.name, path = %path.display(), rows, "curve exported");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_range_is_ordered() {
        assert_eq!(
            ExportRange::partial(5.0, 2.0),
            ExportRange::Partial { start: 2.0, end: 5.0 }
        );
        let r = ExportRange::partial(2.0, 5.0);
        assert!(r.contains(2.0) && r.contains(5.0) && !r.contains(5.5));
    }

    #[test]
    fn separator_by_extension() {
        assert_eq!(Separator::for_path(Path::new("out.txt")), Separator::Tab);
        assert_eq!(Separator::for_path(Path::new("out.XLS")), Separator::Tab);
        assert_eq!(Separator::for_path(Path::new("out.csv")), Separator::Comma);
        assert_eq!(Separator::for_path(Path::new("out")), Separator::Comma);
    }
}
