//! Generator configuration and output-path resolution

use std::env;
use std::path::{Path, PathBuf};

use crate::compiledb::error::CompileDbError;

/// Compiler executable used when none is configured
pub const DEFAULT_COMPILER: &str = "clang++";

/// Flags prepended to every entry before include and package flags
pub const DEFAULT_FLAGS: &[&str] = &["-std=c++17", "-Wall"];

/// File name of the persisted compilation database
pub const DATABASE_FILE_NAME: &str = "compile_commands.json";

/// Configuration for compile-entry construction
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Compiler executable placed first in every argument vector
    pub compiler: String,

    /// Flags prepended to every entry, before include and package flags
    pub default_flags: Vec<String>,

    /// Directory recorded in each entry; the workspace root when `None`
    pub entry_directory: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            compiler: DEFAULT_COMPILER.to_string(),
            default_flags: DEFAULT_FLAGS.iter().map(|f| f.to_string()).collect(),
            entry_directory: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with the built-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compiler executable
    pub fn with_compiler(mut self, compiler: impl Into<String>) -> Self {
        self.compiler = compiler.into();
        self
    }

    /// Replace the default flag list
    pub fn with_default_flags(
        mut self,
        flags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.default_flags = flags.into_iter().map(Into::into).collect();
        self
    }

    /// Override the directory recorded in each entry
    pub fn with_entry_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.entry_directory = Some(dir.into());
        self
    }
}

/// Resolve where the compilation database is written
///
/// Priority order: an explicitly configured file, then an explicitly
/// configured directory, then the selected package descriptor's directory,
/// then the workspace root, then the process working directory. The winning
/// directory is created by the writer if absent.
pub fn resolve_output_path(
    explicit_file: Option<&Path>,
    explicit_dir: Option<&Path>,
    descriptor: Option<&Path>,
    workspace_root: Option<&Path>,
) -> Result<PathBuf, CompileDbError> {
    if let Some(file) = explicit_file {
        return Ok(file.to_path_buf());
    }

    let dir = if let Some(dir) = explicit_dir {
        dir.to_path_buf()
    } else if let Some(parent) = descriptor
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
    {
        parent.to_path_buf()
    } else if let Some(root) = workspace_root {
        root.to_path_buf()
    } else {
        env::current_dir().map_err(CompileDbError::WorkingDirectory)?
    };

    Ok(dir.join(DATABASE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::new();

        assert_eq!(config.compiler, "clang++");
        assert_eq!(config.default_flags, vec!["-std=c++17", "-Wall"]);
        assert!(config.entry_directory.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = GeneratorConfig::new()
            .with_compiler("gcc")
            .with_default_flags(["-std=c11"])
            .with_entry_directory("/ws");

        assert_eq!(config.compiler, "gcc");
        assert_eq!(config.default_flags, vec!["-std=c11"]);
        assert_eq!(config.entry_directory, Some(PathBuf::from("/ws")));
    }

    #[test]
    fn test_explicit_file_wins() {
        let path = resolve_output_path(
            Some(Path::new("/out/db.json")),
            Some(Path::new("/out-dir")),
            Some(Path::new("/pkg/project.yml")),
            Some(Path::new("/ws")),
        )
        .unwrap();

        assert_eq!(path, PathBuf::from("/out/db.json"));
    }

    #[test]
    fn test_explicit_dir_beats_descriptor() {
        let path = resolve_output_path(
            None,
            Some(Path::new("/out-dir")),
            Some(Path::new("/pkg/project.yml")),
            Some(Path::new("/ws")),
        )
        .unwrap();

        assert_eq!(path, PathBuf::from("/out-dir/compile_commands.json"));
    }

    #[test]
    fn test_descriptor_dir_beats_workspace_root() {
        let path = resolve_output_path(
            None,
            None,
            Some(Path::new("/pkg/project.yml")),
            Some(Path::new("/ws")),
        )
        .unwrap();

        assert_eq!(path, PathBuf::from("/pkg/compile_commands.json"));
    }

    #[test]
    fn test_workspace_root_fallback() {
        let path = resolve_output_path(None, None, None, Some(Path::new("/ws"))).unwrap();

        assert_eq!(path, PathBuf::from("/ws/compile_commands.json"));
    }

    #[test]
    fn test_working_directory_fallback() {
        let path = resolve_output_path(None, None, None, None).unwrap();

        assert_eq!(
            path,
            env::current_dir().unwrap().join("compile_commands.json")
        );
    }
}
