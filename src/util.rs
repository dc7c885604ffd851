//! Filesystem and process helpers used by the file channels

use crate::core::{LoggerError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Create every missing parent directory of `file_path`
pub fn ensure_directory_path(file_path: &Path) -> Result<()> {
    let Some(parent) = file_path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(parent).map_err(|e| {
        LoggerError::io_operation(
            "create log directory",
            format!("Failed to create directory '{}'", parent.display()),
            e,
        )
    })
}

/// Delete a file, or a directory and everything under it.
///
/// A path that does not exist is treated as already removed.
pub fn remove_path_recursive(path: &Path) -> Result<()> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(LoggerError::io_operation(
                "remove path",
                format!("Cannot stat '{}'", path.display()),
                e,
            ))
        }
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(LoggerError::io_operation(
            "remove path",
            format!("Failed to remove '{}'", path.display()),
            e,
        )),
    }
}

/// Full path of the running executable, `./` when it cannot be determined
pub fn executable_path() -> PathBuf {
    std::env::current_exe().unwrap_or_else(|_| PathBuf::from("./"))
}

/// Directory containing the running executable
pub fn executable_dir() -> PathBuf {
    let path = executable_path();
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("./"),
    }
}

/// File name of the running executable
pub fn executable_name() -> String {
    executable_path()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_directory_path_creates_parents() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a").join("b").join("c.log");

        ensure_directory_path(&file).unwrap();
        assert!(dir.path().join("a").join("b").is_dir());
        assert!(!file.exists());

        // Second call is a no-op
        ensure_directory_path(&file).unwrap();
    }

    #[test]
    fn test_remove_file_and_tree() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("single.log");
        fs::write(&file, "x").unwrap();
        remove_path_recursive(&file).unwrap();
        assert!(!file.exists());

        let tree = dir.path().join("tree");
        fs::create_dir_all(tree.join("nested")).unwrap();
        fs::write(tree.join("nested").join("f.log"), "x").unwrap();
        remove_path_recursive(&tree).unwrap();
        assert!(!tree.exists());
    }

    #[test]
    fn test_remove_missing_path_is_ok() {
        let dir = tempdir().unwrap();
        assert!(remove_path_recursive(&dir.path().join("missing")).is_ok());
    }

    #[test]
    fn test_executable_helpers() {
        assert!(!executable_name().is_empty());
        assert!(executable_path().starts_with(executable_dir()));
    }
}
