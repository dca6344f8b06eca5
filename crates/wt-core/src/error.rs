use thiserror::Error;

pub type WtResult<T> = Result<T, WtError>;

/// Errors from converting raw columns into samples.
#[derive(Error, Debug)]
pub enum WtError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Column mismatch: {what} (left={left}, right={right})")]
    ColumnMismatch {
        what: &'static str,
        left: usize,
        right: usize,
    },
}
