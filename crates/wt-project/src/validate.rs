//! Project validation logic.

use crate::schema::{CurveKind, CurveRecord, ProjectFile};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate curve name: {name}")]
    DuplicateName { name: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Length mismatch in curve '{curve}': {what} (expected {expected}, found {found})")]
    LengthMismatch {
        curve: String,
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &ProjectFile) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut names = HashSet::new();
    for curve in &project.curves {
        if !names.insert(&curve.name) {
            return Err(ValidationError::DuplicateName {
                name: curve.name.clone(),
            });
        }
        validate_curve(curve)?;
    }

    Ok(())
}

pub fn validate_curve(curve: &CurveRecord) -> Result<(), ValidationError> {
    if curve.name.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "curve name".to_string(),
            value: format!("{:?}", curve.name),
            reason: "must not be empty".to_string(),
        });
    }

    match &curve.kind {
        CurveKind::Simple | CurveKind::Stacked(_) => Ok(()),
        CurveKind::Derivative(derivative) => {
            if derivative.derivative_series.len() != curve.primary_series.len() {
                return Err(ValidationError::LengthMismatch {
                    curve: curve.name.clone(),
                    what: "derivative series vs primary series",
                    expected: curve.primary_series.len(),
                    found: derivative.derivative_series.len(),
                });
            }
            if !derivative.l_spacing.is_finite() || derivative.l_spacing <= 0.0 {
                return Err(ValidationError::InvalidValue {
                    field: format!("curve '{}' LSpacing", curve.name),
                    value: derivative.l_spacing.to_string(),
                    reason: "must be positive and finite".to_string(),
                });
            }
            if derivative.smoothing_window == 0 {
                return Err(ValidationError::InvalidValue {
                    field: format!("curve '{}' smoothingWindow", curve.name),
                    value: "0".to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
            Ok(())
        }
    }
}
