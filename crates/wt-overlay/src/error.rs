//! Error types for overlay editing.

use crate::overlay::ItemRef;
use thiserror::Error;
use wt_core::OverlayId;

/// Result type for overlay operations.
pub type OverlayResult<T> = Result<T, OverlayError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OverlayError {
    /// The referenced overlay or annotation part does not exist.
    #[error("Unknown overlay item: {item}")]
    UnknownItem { item: ItemRef },

    /// The operation needs a characteristic line.
    #[error("Overlay {id} is not a characteristic line")]
    NotALine { id: OverlayId },

    /// The addressed item carries no editable text.
    #[error("Overlay item {item} has no text")]
    NotText { item: ItemRef },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
