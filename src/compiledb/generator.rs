//! Compile-entry construction
//!
//! One entry per source file, in package order then source order. The
//! argument vector layout is fixed: compiler, default flags, one `-I` per
//! dependency, package flags, then the source path last. Downstream tooling
//! parses arguments positionally, so the order must never change.

use json_compilation_db::Entry;
use std::path::Path;
use tracing::debug;

use crate::compiledb::config::GeneratorConfig;
use crate::report::{PackageRecord, ProjectInfo};

/// Build compile entries for every source of every package
pub fn generate(info: &ProjectInfo, workspace_root: &Path, config: &GeneratorConfig) -> Vec<Entry> {
    let directory = config
        .entry_directory
        .clone()
        .unwrap_or_else(|| workspace_root.to_path_buf());

    let mut entries = Vec::with_capacity(info.source_count());
    for package in &info.packages {
        for source in &package.sources {
            entries.push(Entry {
                directory: directory.clone(),
                file: source.clone(),
                arguments: build_arguments(package, source, config),
                output: None,
            });
        }
        debug!(
            package = %package.name,
            sources = package.sources.len(),
            "generated compile entries"
        );
    }

    entries
}

fn build_arguments(package: &PackageRecord, source: &Path, config: &GeneratorConfig) -> Vec<String> {
    let mut arguments = Vec::with_capacity(
        2 + config.default_flags.len() + package.dependencies.len() + package.flags.len(),
    );

    arguments.push(config.compiler.clone());
    arguments.extend(config.default_flags.iter().cloned());
    for dependency in &package.dependencies {
        arguments.push(format!("-I{}", dependency.display()));
    }
    arguments.extend(package.flags.iter().cloned());
    arguments.push(source.display().to_string());

    arguments
}
