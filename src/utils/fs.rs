//! File system utilities.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};

/// Save data to a JSON file with pretty printing
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load JSON from a file, returning None if it doesn't exist
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AppError::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/status.json");

        save_json(&path, &vec![1, 2, 3]).unwrap();
        let loaded: Option<Vec<i32>> = load_json(&path).unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_load_json_missing() {
        let tmp = TempDir::new().unwrap();
        let loaded: Option<Vec<i32>> = load_json(&tmp.path().join("nope.json")).unwrap();
        assert!(loaded.is_none());
    }
}
