#![deny(missing_docs)]

//! # Input Files
//!
//! Resolves command line paths into the list of Go files to rewrite.

use crate::error::{CliError, CliResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn is_go_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "go")
}

/// Expands `paths` into Go files.
///
/// Plain files are taken as given, whatever their extension. Directories
/// are walked only when `recursive` is set; their `.go` files are returned
/// in sorted order. Duplicates are dropped.
pub fn collect_go_files(paths: &[PathBuf], recursive: bool) -> CliResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            if !recursive {
                return Err(CliError::General(format!(
                    "{:?} is a directory (use --recursive)",
                    path
                )));
            }

            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && is_go_file(e.path()))
                .map(|e| e.into_path())
                .collect();
            found.sort();
            files.extend(found);
        } else if path.exists() {
            files.push(path.clone());
        } else {
            return Err(CliError::General(format!("File not found: {:?}", path)));
        }
    }

    let mut seen = std::collections::HashSet::new();
    files.retain(|f| seen.insert(f.clone()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_directory_requires_recursive() {
        let dir = tempdir().unwrap();
        let err = collect_go_files(&[dir.path().to_path_buf()], false).unwrap_err();
        assert!(err.to_string().contains("--recursive"));
    }

    #[test]
    fn test_recursive_walk_finds_go_files() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("pkg/inner");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("a.go"), "package a\n").unwrap();
        fs::write(nested.join("b_test.go"), "package inner\n").unwrap();
        fs::write(nested.join("notes.txt"), "nope").unwrap();

        let files = collect_go_files(&[dir.path().to_path_buf()], true).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.go", "b_test.go"]);
    }

    #[test]
    fn test_explicit_file_and_duplicates() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("gen.go");
        fs::write(&file, "package gen\n").unwrap();

        let files = collect_go_files(&[file.clone(), file.clone()], false).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_missing_file() {
        let err = collect_go_files(&[PathBuf::from("/definitely/not/here.go")], false).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
