//! Schema migration framework.

use crate::ProjectError;
use crate::schema::{CurveKind, ProjectFile};

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut project: ProjectFile) -> Result<ProjectFile, ProjectError> {
    while project.version < LATEST_VERSION {
        project = migrate_one_version(project)?;
    }
    Ok(project)
}

fn migrate_one_version(project: ProjectFile) -> Result<ProjectFile, ProjectError> {
    match project.version {
        0 => migrate_v0_to_v1(project),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 files were written without legend names; legends fall back to
/// the curve name.
fn migrate_v0_to_v1(mut project: ProjectFile) -> Result<ProjectFile, ProjectError> {
    for curve in &mut project.curves {
        if curve.legend_name.is_empty() {
            curve.legend_name = curve.name.clone();
        }
        match &mut curve.kind {
            CurveKind::Simple => {}
            CurveKind::Stacked(stacked) => {
                if stacked.secondary_legend_name.is_empty() {
                    stacked.secondary_legend_name = "Production".to_string();
                }
            }
            CurveKind::Derivative(derivative) => {
                if derivative.derivative_legend_name.is_empty() {
                    derivative.derivative_legend_name = "Derivative".to_string();
                }
            }
        }
    }
    project.version = 1;
    Ok(project)
}
