use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("path does not exist: {}", .0.display())]
    NotFound(PathBuf),
    #[error("path is not a directory: {}", .0.display())]
    NotDirectory(PathBuf),
}

pub fn validate_directory_exists(path: &Path) -> Result<(), PathError> {
    if !path.exists() {
        return Err(PathError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(PathError::NotDirectory(path.to_path_buf()));
    }
    Ok(())
}

/// 建立資料夾（含所有上層資料夾）
pub fn ensure_directory_exists(path: &Path) -> io::Result<()> {
    if !path.is_dir() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// 判斷兩個路徑是否指向同一個資料夾
///
/// 任一路徑無法正規化（例如尚未建立）時視為不同
#[must_use]
pub fn is_same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        assert!(matches!(
            validate_directory_exists(&missing),
            Err(PathError::NotFound(_))
        ));
    }

    #[test]
    fn test_validate_file_is_not_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.pdf");
        std::fs::write(&file, b"x").unwrap();
        assert!(matches!(
            validate_directory_exists(&file),
            Err(PathError::NotDirectory(_))
        ));
    }

    #[test]
    fn test_ensure_directory_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b").join("c");
        ensure_directory_exists(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_is_same_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dotted = temp_dir.path().join(".");
        assert!(is_same_directory(temp_dir.path(), &dotted));
        assert!(!is_same_directory(
            temp_dir.path(),
            &temp_dir.path().join("not-created")
        ));
    }
}
