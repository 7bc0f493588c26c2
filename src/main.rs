mod compiledb;
mod logging;
mod notify;
mod pipeline;
mod report;
mod tool;
mod workspace;

#[cfg(test)]
mod test_utils;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use compiledb::GeneratorConfig;
use logging::{LogConfig, init_logging};
use notify::LogReloadSink;
use tool::{FileReportSource, ReportSource, ToolReportSource};

/// CLI arguments for the compile-database generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Workspace root directory (defaults to current directory)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Parse an existing project-info report instead of running the build tool
    #[arg(long, value_name = "FILE", conflicts_with = "tool")]
    report: Option<PathBuf>,

    /// Build tool executable that produces the project-info report
    #[arg(long, value_name = "PATH")]
    tool: Option<String>,

    /// Package descriptor passed to the build tool (discovered when omitted)
    #[arg(long, value_name = "FILE")]
    descriptor: Option<PathBuf>,

    /// Build target name passed to the build tool
    #[arg(long, value_name = "NAME", default_value = "all")]
    target: String,

    /// Descriptor file name used for discovery
    #[arg(long, value_name = "NAME", default_value = workspace::DEFAULT_DESCRIPTOR_NAME)]
    descriptor_name: String,

    /// Exact output file for the compilation database
    #[arg(long, value_name = "FILE", conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Directory the compilation database is written into
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Compiler executable recorded in every entry (overrides PINFO2CCDB_COMPILER)
    #[arg(long, value_name = "CC")]
    compiler: Option<String>,

    /// Flag prepended to every entry; repeatable, replaces the built-in defaults
    #[arg(long = "flag", value_name = "FLAG")]
    flags: Vec<String>,

    /// Directory recorded in each entry instead of the workspace root
    #[arg(long, value_name = "DIR")]
    entry_dir: Option<PathBuf>,

    /// Log level (overrides RUST_LOG env var)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Log file path (overrides PINFO2CCDB_LOG_FILE env var)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

/// Resolve compiler executable from CLI args and environment
fn resolve_compiler(compiler_arg: Option<String>) -> String {
    // Priority: CLI arg > PINFO2CCDB_COMPILER env var > built-in default
    compiler_arg
        .or_else(|| std::env::var("PINFO2CCDB_COMPILER").ok())
        .unwrap_or_else(|| compiledb::DEFAULT_COMPILER.to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let log_config = LogConfig::from_env().with_overrides(args.log_level.clone(), args.log_file.clone());
    if let Err(e) = init_logging(log_config) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let root = match workspace::resolve_root(args.root.clone()) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Failed to resolve workspace root: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(root = %root.display(), "resolved workspace root");

    let mut config = GeneratorConfig::new().with_compiler(resolve_compiler(args.compiler.clone()));
    if !args.flags.is_empty() {
        config = config.with_default_flags(args.flags.clone());
    }
    if let Some(entry_dir) = args.entry_dir.clone() {
        config = config.with_entry_directory(entry_dir);
    }

    // Keeps a tool-produced report alive until the run finishes
    let mut report_scratch = None;
    let mut descriptor = args.descriptor.clone();

    let source: Box<dyn ReportSource> = if let Some(report) = args.report.clone() {
        Box::new(FileReportSource::new(report))
    } else if let Some(tool) = args.tool.clone() {
        let selected = match descriptor {
            Some(path) => path,
            None => match workspace::select_descriptor(&root, &args.descriptor_name) {
                Ok(path) => path,
                Err(e) => {
                    eprintln!("Failed to select package descriptor: {e}");
                    return ExitCode::FAILURE;
                }
            },
        };
        info!(descriptor = %selected.display(), "using package descriptor");
        descriptor = Some(selected.clone());

        let scratch = match tempfile::Builder::new()
            .prefix("project-info-")
            .suffix(".txt")
            .tempfile()
        {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Failed to create report scratch file: {e}");
                return ExitCode::FAILURE;
            }
        };
        let report_path = scratch.path().to_path_buf();
        report_scratch = Some(scratch);

        Box::new(ToolReportSource {
            program: tool,
            descriptor: selected,
            target: args.target.clone(),
            report_path,
        })
    } else {
        eprintln!("Either --report or --tool is required");
        return ExitCode::FAILURE;
    };

    let output_path = match compiledb::resolve_output_path(
        args.output.as_deref(),
        args.output_dir.as_deref(),
        descriptor.as_deref(),
        Some(&root),
    ) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Failed to resolve output path: {e}");
            return ExitCode::FAILURE;
        }
    };

    let sink = LogReloadSink;
    match pipeline::run(source.as_ref(), &root, &config, &output_path, &sink).await {
        Ok(outcome) => {
            info!(
                packages = outcome.package_count,
                entries = outcome.entry_count,
                generated_at = %outcome.generated_at,
                "generation finished"
            );
            println!("{}", outcome.database_path.display());
            drop(report_scratch);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to generate compilation database: {e}");
            ExitCode::FAILURE
        }
    }
}
