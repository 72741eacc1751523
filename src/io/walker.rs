use crate::core::errors::SourceError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists the Go files of one package directory.
///
/// Only files directly inside `root` are considered; subdirectories are other
/// packages. `_test.go` files are skipped.
pub struct GoFileWalker {
    root: PathBuf,
}

impl GoFileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Matching files sorted by file name.
    pub fn walk(&self) -> Result<Vec<PathBuf>, SourceError> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| SourceError::io(&self.root, e.into()))?;
            let path = entry.path();

            if entry.file_type().is_file() && self.should_process(path) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    fn should_process(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
            return false;
        };

        name.ends_with(".go") && !name.ends_with("_test.go")
    }
}

pub fn go_files(root: &Path) -> Result<Vec<PathBuf>, SourceError> {
    GoFileWalker::new(root.to_path_buf()).walk()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_walk_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["z.go", "a.go", "a_test.go", "README.md"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("b.go"), "").unwrap();

        let names: Vec<String> = go_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.go", "z.go"]);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let err = go_files(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
