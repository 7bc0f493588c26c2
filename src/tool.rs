//! Report acquisition
//!
//! The report either already exists on disk or has to be produced by running
//! the build tool first. Both paths sit behind [`ReportSource`] so the
//! pipeline stays independent of where the text came from.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("report file {path} is not readable: {source}")]
    ReportUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{program} produced an empty report at {path}")]
    EmptyReport { program: String, path: PathBuf },
}

/// Something that can hand the pipeline a full report text
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn produce(&self) -> Result<String, ToolError>;
}

/// A report that already exists on disk
pub struct FileReportSource {
    pub path: PathBuf,
}

impl FileReportSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReportSource for FileReportSource {
    async fn produce(&self) -> Result<String, ToolError> {
        debug!(path = %self.path.display(), "reading existing report");
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ToolError::ReportUnreadable {
                path: self.path.clone(),
                source,
            })
    }
}

/// Runs the build tool to produce the report, then reads it back
///
/// Invocation shape is `program <descriptor> <target> <report_path>`. The
/// tool may take arbitrarily long; timeouts and retries are the caller's
/// business, not handled here.
pub struct ToolReportSource {
    pub program: String,
    pub descriptor: PathBuf,
    pub target: String,
    pub report_path: PathBuf,
}

#[async_trait]
impl ReportSource for ToolReportSource {
    async fn produce(&self) -> Result<String, ToolError> {
        info!(
            program = %self.program,
            descriptor = %self.descriptor.display(),
            target = %self.target,
            "running build tool to produce project-info report"
        );

        let output = Command::new(&self.program)
            .arg(&self.descriptor)
            .arg(&self.target)
            .arg(&self.report_path)
            .output()
            .await
            .map_err(|source| ToolError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ToolError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let report = tokio::fs::read_to_string(&self.report_path)
            .await
            .map_err(|source| ToolError::ReportUnreadable {
                path: self.report_path.clone(),
                source,
            })?;

        if report.trim().is_empty() {
            return Err(ToolError::EmptyReport {
                program: self.program.clone(),
                path: self.report_path.clone(),
            });
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_source_reads_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.txt");
        fs::write(&path, "header\n\nmap a b 1\n").unwrap();

        let source = FileReportSource::new(&path);
        let report = source.produce().await.unwrap();

        assert!(report.starts_with("header"));
    }

    #[tokio::test]
    async fn test_file_source_missing_report() {
        let source = FileReportSource::new("/nonexistent/report.txt");
        let result = source.produce().await;

        assert!(matches!(result, Err(ToolError::ReportUnreadable { .. })));
    }

    #[tokio::test]
    async fn test_tool_source_runs_and_reads() {
        let dir = tempdir().unwrap();
        let report_path = dir.path().join("report.txt");

        // Stand-in tool: writes its third argument's path
        let source = ToolReportSource {
            program: "sh".to_string(),
            descriptor: PathBuf::from("-c"),
            target: format!("printf 'header\\n\\nmap a b 1\\n' > {}", report_path.display()),
            report_path: report_path.clone(),
        };

        let report = source.produce().await.unwrap();
        assert!(report.contains("map a b 1"));
    }

    #[tokio::test]
    async fn test_tool_source_nonzero_exit() {
        let source = ToolReportSource {
            program: "sh".to_string(),
            descriptor: PathBuf::from("-c"),
            target: "echo broken >&2; exit 3".to_string(),
            report_path: PathBuf::from("/unused"),
        };

        match source.produce().await {
            Err(ToolError::Failed { stderr, .. }) => assert_eq!(stderr, "broken"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_tool_source_empty_report() {
        let dir = tempdir().unwrap();
        let report_path = dir.path().join("report.txt");

        let source = ToolReportSource {
            program: "sh".to_string(),
            descriptor: PathBuf::from("-c"),
            target: format!(": > {}", report_path.display()),
            report_path: report_path.clone(),
        };

        assert!(matches!(
            source.produce().await,
            Err(ToolError::EmptyReport { .. })
        ));
    }

    #[tokio::test]
    async fn test_tool_source_missing_program() {
        let source = ToolReportSource {
            program: "/definitely/not/a/real/tool".to_string(),
            descriptor: PathBuf::from("project.yml"),
            target: "all".to_string(),
            report_path: PathBuf::from("/unused"),
        };

        assert!(matches!(
            source.produce().await,
            Err(ToolError::Spawn { .. })
        ));
    }
}
