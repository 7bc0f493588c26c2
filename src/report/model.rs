use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Build metadata for a single compilable package
///
/// Field contents come straight from the report: order is preserved and
/// duplicate lines are kept verbatim. De-duplication, if a caller wants it,
/// happens downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Package identifier
    pub name: String,

    /// Location of the package's own build descriptor file
    pub descriptor_path: PathBuf,

    /// Dependency include paths, in report order
    pub dependencies: Vec<PathBuf>,

    /// Absolute source file paths, in report order
    pub sources: Vec<PathBuf>,

    /// Package-specific compiler flags, in report order
    pub flags: Vec<String>,

    /// Output artifact paths, in report order
    pub outputs: Vec<PathBuf>,
}

/// One line of the report's trailing generated-file map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Path of the generated file
    pub generated_path: PathBuf,

    /// Source file the generation was driven by
    pub source_path: PathBuf,

    /// Numeric tag emitted by the build tool, carried through uninterpreted
    pub sequence: String,
}

/// Fully parsed project-info report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Package records, in report order
    pub packages: Vec<PackageRecord>,

    /// Flat generated-file map, in report order
    pub generated_files: Vec<GeneratedFile>,
}

impl ProjectInfo {
    /// Look up a package by name
    #[allow(dead_code)]
    pub fn package(&self, name: &str) -> Option<&PackageRecord> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Total number of source files across all packages
    pub fn source_count(&self) -> usize {
        self.packages.iter().map(|p| p.sources.len()).sum()
    }

    /// Generated files belonging to a package
    ///
    /// A generated file belongs to a package when its `source_path` is an
    /// exact byte-for-byte match of one of the package's sources. Entries
    /// that match no package remain in `generated_files`; this is a query
    /// over the flat map, not a partition of it.
    #[allow(dead_code)]
    pub fn generated_for<'a>(&'a self, package: &PackageRecord) -> Vec<&'a GeneratedFile> {
        self.generated_files
            .iter()
            .filter(|g| {
                package
                    .sources
                    .iter()
                    .any(|s| s.as_os_str() == g.source_path.as_os_str())
            })
            .collect()
    }
}
