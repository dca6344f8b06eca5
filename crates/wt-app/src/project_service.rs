//! Project loading and saving around an explicit project context.

use std::path::{Path, PathBuf};

use wt_project::{CurveCollection, LATEST_VERSION, ProjectFile};

use crate::error::{AppError, AppResult};

/// The open project: where it lives and the curves it holds.
#[derive(Debug, Clone, Default)]
pub struct ProjectContext {
    pub path: Option<PathBuf>,
    pub name: String,
    pub curves: CurveCollection,
}

impl ProjectContext {
    /// An unsaved project.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            path: None,
            name: name.into(),
            curves: CurveCollection::new(),
        }
    }

    pub fn open(path: &Path) -> AppResult<Self> {
        let project = load_project(path)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            name: project.name,
            curves: CurveCollection::from_records(project.curves),
        })
    }

    pub fn has_loaded_project(&self) -> bool {
        self.path.is_some()
    }

    /// Save to the path the project was opened from or last saved to.
    pub fn save(&self) -> AppResult<()> {
        let path = self.path.as_deref().ok_or(AppError::NoProjectLoaded)?;
        save_project(path, &self.to_file())
    }

    pub fn save_as(&mut self, path: &Path) -> AppResult<()> {
        save_project(path, &self.to_file())?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    pub fn to_file(&self) -> ProjectFile {
        ProjectFile {
            version: LATEST_VERSION,
            name: self.name.clone(),
            saved_at: Some(chrono::Utc::now()),
            curves: self.curves.to_records(),
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml")
    )
}

/// Load a project file: YAML for `.yaml`/`.yml`, JSON otherwise.
pub fn load_project(path: &Path) -> AppResult<ProjectFile> {
    let project = if is_yaml(path) {
        wt_project::load_yaml(path)?
    } else {
        wt_project::load_json(path)?
    };
    Ok(project)
}

pub fn save_project(path: &Path, project: &ProjectFile) -> AppResult<()> {
    if is_yaml(path) {
        wt_project::save_yaml(path, project)?;
    } else {
        wt_project::save_json(path, project)?;
    }
    Ok(())
}

/// Check a project file without opening it as the current project.
pub fn validate_project(project: &ProjectFile) -> AppResult<()> {
    wt_project::validate_project(project)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_by_extension() {
        assert!(is_yaml(Path::new("p.yaml")));
        assert!(is_yaml(Path::new("p.YML")));
        assert!(!is_yaml(Path::new("p.json")));
        assert!(!is_yaml(Path::new("p")));
    }

    #[test]
    fn saving_without_path_fails() {
        let context = ProjectContext::new("scratch");
        assert!(!context.has_loaded_project());
        assert!(matches!(context.save(), Err(AppError::NoProjectLoaded)));
    }
}
