//! Workspace root resolution and package descriptor discovery

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// File name the build tool uses for package descriptors
pub const DEFAULT_DESCRIPTOR_NAME: &str = "project.yml";

/// How deep descriptor discovery walks below the workspace root
pub const DESCRIPTOR_SCAN_DEPTH: usize = 3;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("could not determine working directory: {0}")]
    WorkingDirectory(std::io::Error),

    #[error("workspace root is not accessible: {path}: {source}")]
    RootNotAccessible {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no {name} found under {root}")]
    NoDescriptor { name: String, root: PathBuf },

    #[error("multiple {name} files under {root}, pass one explicitly: {candidates:?}")]
    AmbiguousDescriptor {
        name: String,
        root: PathBuf,
        candidates: Vec<PathBuf>,
    },
}

/// Resolve the workspace root to an absolute path
///
/// Uses the explicitly given directory when present, the process working
/// directory otherwise.
pub fn resolve_root(explicit: Option<PathBuf>) -> Result<PathBuf, WorkspaceError> {
    let root = match explicit {
        Some(path) => path,
        None => env::current_dir().map_err(WorkspaceError::WorkingDirectory)?,
    };

    root.canonicalize()
        .map_err(|source| WorkspaceError::RootNotAccessible { path: root, source })
}

/// Find package descriptor files under `root`, bounded by `depth`
///
/// Hidden directories are skipped. Traversal errors are logged and skipped
/// rather than failing the whole scan.
pub fn find_descriptors(root: &Path, file_name: &str, depth: usize) -> Vec<PathBuf> {
    let mut descriptors = Vec::new();

    let walker = WalkDir::new(root).max_depth(depth).into_iter();
    for entry in walker.filter_entry(|e| {
        e.depth() == 0
            || !e
                .file_name()
                .to_string_lossy()
                .starts_with('.')
    }) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("failed to access directory entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_file() && entry.file_name() == OsStr::new(file_name) {
            descriptors.push(entry.path().to_path_buf());
        }
    }

    debug!(
        root = %root.display(),
        found = descriptors.len(),
        "descriptor scan finished"
    );
    descriptors
}

/// Pick the single package descriptor under `root`
///
/// Strictly non-interactive: exactly one match is used, anything else is a
/// typed error naming the candidates.
pub fn select_descriptor(root: &Path, file_name: &str) -> Result<PathBuf, WorkspaceError> {
    let mut candidates = find_descriptors(root, file_name, DESCRIPTOR_SCAN_DEPTH);

    match candidates.len() {
        1 => Ok(candidates.remove(0)),
        0 => Err(WorkspaceError::NoDescriptor {
            name: file_name.to_string(),
            root: root.to_path_buf(),
        }),
        _ => {
            candidates.sort();
            Err(WorkspaceError::AmbiguousDescriptor {
                name: file_name.to_string(),
                root: root.to_path_buf(),
                candidates,
            })
        }
    }
}
