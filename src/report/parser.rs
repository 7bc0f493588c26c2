//! Report parser
//!
//! Turns raw report text into a [`ProjectInfo`]. The first chunk is header
//! metadata and is skipped, the final chunk is always the generated-file map,
//! and every chunk in between belongs to a package record. A record's
//! continuation chunks carry sources, flags, and outputs purely by ordinal
//! position; a record with fewer chunks simply has empty trailing fields.
//!
//! The ordinal rule is ambiguous for a package that genuinely has zero
//! sources but nonempty flags: its first continuation chunk is still taken as
//! sources. That is the report format's documented behavior and is preserved
//! here rather than second-guessed.

use std::path::PathBuf;
use tracing::{debug, warn};

use crate::report::chunks::{Chunk, split_chunks};
use crate::report::error::ReportError;
use crate::report::model::{GeneratedFile, PackageRecord, ProjectInfo};

/// Parse a full project-info report
///
/// Fails only when the report is too short to contain a header and a
/// generated-file map. Individual malformed package records are skipped with
/// a warning so one bad record never loses the rest of the report.
pub fn parse(report: &str) -> Result<ProjectInfo, ReportError> {
    let chunks = split_chunks(report);

    if chunks.len() < 2 {
        return Err(ReportError::Malformed {
            chunks: chunks.len(),
        });
    }

    // Chunk 0 is the header; the final chunk is reserved for the
    // generated-file map and never consumed by a record.
    let record_chunks = &chunks[1..chunks.len() - 1];

    let mut packages = Vec::new();
    let mut index = 0;
    while index < record_chunks.len() {
        let chunk = &record_chunks[index];

        if chunk.is_continuation() {
            warn!(
                chunk = index,
                line = %chunk.first_line().trim(),
                "skipping indented chunk at record position"
            );
            index += 1;
            continue;
        }

        match parse_record(&record_chunks[index..]) {
            Some((record, consumed)) => {
                debug!(
                    package = %record.name,
                    dependencies = record.dependencies.len(),
                    sources = record.sources.len(),
                    flags = record.flags.len(),
                    outputs = record.outputs.len(),
                    "parsed package record"
                );
                packages.push(record);
                index += consumed;
            }
            None => {
                warn!(
                    chunk = index,
                    line = %chunk.first_line().trim(),
                    "skipping record chunk with fewer than two header tokens"
                );
                index += 1;
            }
        }
    }

    let generated_files = parse_generated_map(&chunks[chunks.len() - 1]);

    Ok(ProjectInfo {
        packages,
        generated_files,
    })
}

/// Parse one package record from the front of `chunks`
///
/// The first chunk is the record header: name and descriptor path on its
/// first line, one dependency include path per remaining line. Subsequent
/// continuation chunks are claimed ordinally as sources, then flags, then
/// outputs. Returns the record and the number of chunks consumed, or `None`
/// when the header line is missing its second token.
fn parse_record(chunks: &[Chunk]) -> Option<(PackageRecord, usize)> {
    let header = chunks.first()?;
    let mut tokens = header.first_line().split_whitespace();
    let name = tokens.next()?.to_string();
    let descriptor_path = PathBuf::from(tokens.next()?);

    let dependencies = header.lines[1..]
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect();

    let mut sources = Vec::new();
    let mut flags = Vec::new();
    let mut outputs = Vec::new();

    let mut consumed = 1;
    for (ordinal, chunk) in chunks[1..].iter().enumerate() {
        if !chunk.is_continuation() {
            break;
        }
        match ordinal {
            0 => sources = trimmed_paths(chunk),
            1 => {
                flags = chunk
                    .lines
                    .iter()
                    .flat_map(|line| line.split_whitespace())
                    .map(str::to_string)
                    .collect();
            }
            2 => outputs = trimmed_paths(chunk),
            _ => debug!(
                package = %name,
                ordinal, "ignoring surplus continuation chunk"
            ),
        }
        consumed += 1;
    }

    Some((
        PackageRecord {
            name,
            descriptor_path,
            dependencies,
            sources,
            flags,
            outputs,
        },
        consumed,
    ))
}

fn trimmed_paths(chunk: &Chunk) -> Vec<PathBuf> {
    chunk
        .lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Parse the final chunk as the generated-file map
///
/// Each line needs at least three whitespace-separated fields; shorter lines
/// are dropped without failing the parse.
fn parse_generated_map(chunk: &Chunk) -> Vec<GeneratedFile> {
    chunk
        .lines
        .iter()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next(), fields.next()) {
                (Some(generated), Some(source), Some(sequence)) => Some(GeneratedFile {
                    generated_path: PathBuf::from(generated),
                    source_path: PathBuf::from(source),
                    sequence: sequence.to_string(),
                }),
                _ => {
                    debug!(
                        line = %line.trim(),
                        "dropping generated-file line with fewer than three fields"
                    );
                    None
                }
            }
        })
        .collect()
}
