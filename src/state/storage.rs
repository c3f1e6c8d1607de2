// File system locations for configuration and project stores
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to get config directory")]
    NoConfigDir,
    #[error("Project root {0} is not a directory")]
    NotADirectory(PathBuf),
}

pub type StorageResult<T> = Result<T, StorageError>;

const APP_DIR: &str = "matteid";

/// Default location of `config.toml`
pub fn default_config_path() -> StorageResult<PathBuf> {
    let config_dir = dirs::config_dir().ok_or(StorageError::NoConfigDir)?;
    Ok(config_dir.join(APP_DIR).join("config.toml"))
}

/// Default directory holding project folders
pub fn default_project_root() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join("projects"))
        .unwrap_or_else(|| PathBuf::from("projects"))
}

/// Path of a project's matte ID store
pub fn database_path(project_root: &Path, project: &str, database_file: &Path) -> PathBuf {
    project_root.join(project).join(database_file)
}

/// Project folders under `project_root` whose name contains one of `prefixes`
pub fn list_projects(project_root: &Path, prefixes: &[String]) -> StorageResult<Vec<String>> {
    if !project_root.is_dir() {
        return Err(StorageError::NotADirectory(project_root.to_path_buf()));
    }

    let mut projects = Vec::new();
    for entry in fs::read_dir(project_root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if prefixes.is_empty() || prefixes.iter().any(|prefix| name.contains(prefix.as_str())) {
            projects.push(name);
        }
    }

    projects.sort();
    Ok(projects)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path() {
        let path = database_path(Path::new("/mnt/projects"), "Lego_City", Path::new(".local/vrayMatteID.db"));
        assert_eq!(path, PathBuf::from("/mnt/projects/Lego_City/.local/vrayMatteID.db"));
    }

    #[test]
    fn test_list_projects_filters_prefixes() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["Lego_City", "TVC_Soda", "Archive", "Lego_Space"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("Lego_notes.txt"), b"").unwrap();

        let prefixes = vec!["Lego_".to_string(), "TVC_".to_string()];
        let projects = list_projects(dir.path(), &prefixes).unwrap();
        assert_eq!(projects, vec!["Lego_City", "Lego_Space", "TVC_Soda"]);
    }

    #[test]
    fn test_list_projects_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let result = list_projects(&dir.path().join("missing"), &[]);
        assert!(matches!(result, Err(StorageError::NotADirectory(_))));
    }
}
