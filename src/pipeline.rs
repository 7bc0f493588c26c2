//! End-to-end generation pipeline
//!
//! One invocation: obtain report text, parse it, build compile entries,
//! persist the database, notify the reload sink. Workspace root and output
//! path arrive as explicit arguments; nothing is cached between invocations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::compiledb::{self, CompileDbError, GeneratorConfig};
use crate::notify::ReloadSink;
use crate::report::{self, ReportError};
use crate::tool::{ReportSource, ToolError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    CompileDb(#[from] CompileDbError),
}

/// What a pipeline run produced
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    /// Where the database was written
    pub database_path: PathBuf,

    /// Packages found in the report
    pub package_count: usize,

    /// Compile entries written to the database
    pub entry_count: usize,

    /// When the database was written
    pub generated_at: DateTime<Utc>,
}

/// Run the full pipeline once
pub async fn run(
    source: &dyn ReportSource,
    workspace_root: &Path,
    config: &GeneratorConfig,
    output_path: &Path,
    sink: &dyn ReloadSink,
) -> Result<GenerationOutcome, PipelineError> {
    let report_text = source.produce().await?;

    let info = report::parse(&report_text)?;
    info!(
        packages = info.packages.len(),
        sources = info.source_count(),
        generated_files = info.generated_files.len(),
        "parsed project-info report"
    );

    let entries = compiledb::generate(&info, workspace_root, config);
    compiledb::write_database(&entries, output_path)?;
    sink.database_written(output_path);

    Ok(GenerationOutcome {
        database_path: output_path.to_path_buf(),
        package_count: info.packages.len(),
        entry_count: entries.len(),
        generated_at: Utc::now(),
    })
}
