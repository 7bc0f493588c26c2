//! Atomic persistence of the compilation database
//!
//! The entry list is serialized fully in memory, staged to a temporary file
//! in the target directory, and renamed into place. A failed write never
//! leaves a truncated artifact behind, and a repeated write with identical
//! input produces byte-identical output.

use json_compilation_db::Entry;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::compiledb::error::CompileDbError;

/// Serialize entries and persist them at `path`, overwriting any existing file
pub fn write_database(entries: &[Entry], path: &Path) -> Result<(), CompileDbError> {
    let payload = serde_json::to_vec_pretty(entries)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|source| CompileDbError::CreateDirectory {
        path: dir.clone(),
        source,
    })?;

    let mut staged = NamedTempFile::new_in(&dir).map_err(|source| CompileDbError::Stage {
        dir: dir.clone(),
        source,
    })?;
    staged
        .write_all(&payload)
        .map_err(|source| CompileDbError::Stage {
            dir: dir.clone(),
            source,
        })?;
    debug!(
        bytes = payload.len(),
        staged = %staged.path().display(),
        "staged compilation database"
    );

    staged
        .persist(path)
        .map_err(|e| CompileDbError::Replace {
            path: path.to_path_buf(),
            source: e.error,
        })?;

    info!(
        entries = entries.len(),
        path = %path.display(),
        "wrote compilation database"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entry(file: &str) -> Entry {
        Entry {
            directory: PathBuf::from("/ws"),
            file: PathBuf::from(file),
            arguments: vec!["cc".to_string(), file.to_string()],
            output: None,
        }
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("compile_commands.json");

        write_database(&[entry("/a.c"), entry("/b.c")], &path).unwrap();

        let content = fs::read(&path).unwrap();
        let parsed: Vec<Entry> = serde_json::from_slice(&content).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].file, PathBuf::from("/a.c"));
        assert_eq!(parsed[1].arguments, vec!["cc", "/b.c"]);
    }

    #[test]
    fn test_idempotent_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("compile_commands.json");
        let entries = [entry("/a.c")];

        write_database(&entries, &path).unwrap();
        let first = fs::read(&path).unwrap();

        write_database(&entries, &path).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("compile_commands.json");
        fs::write(&path, "stale content").unwrap();

        write_database(&[entry("/a.c")], &path).unwrap();

        let parsed: Vec<Entry> = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/build/compile_commands.json");

        write_database(&[entry("/a.c")], &path).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_empty_entry_list_still_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("compile_commands.json");

        write_database(&[], &path).unwrap();

        let parsed: Vec<Entry> = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_no_partial_artifact_on_failure() {
        let dir = tempdir().unwrap();
        // A directory at the target path makes the final rename fail
        let path = dir.path().join("compile_commands.json");
        fs::create_dir(&path).unwrap();

        let result = write_database(&[entry("/a.c")], &path);

        assert!(matches!(result, Err(CompileDbError::Replace { .. })));
        assert!(path.is_dir());
        // The staged temp file must not linger
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.path() != path)
            .collect();
        assert!(leftovers.is_empty());
    }
}
