//! Blank-line chunking of report text
//!
//! Chunks are the report's only structural delimiter: a chunk is a maximal
//! run of non-blank lines, and runs are separated by one or more blank lines.
//! A line counts as blank when it contains nothing but whitespace.

/// One maximal run of non-blank lines from a report
///
/// Lines are kept verbatim, including leading whitespace, because indentation
/// of a chunk's first line decides whether the chunk starts a new package
/// record or continues the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Raw lines of the chunk, in report order
    pub lines: Vec<String>,
}

impl Chunk {
    /// First line of the chunk
    ///
    /// Chunks are never empty by construction, but this stays total so the
    /// parser never has to reason about panics.
    pub fn first_line(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or_default()
    }

    /// Whether this chunk continues the current record
    ///
    /// A record's first line is never indented, so any leading whitespace on
    /// a chunk's first line marks it as a continuation chunk.
    pub fn is_continuation(&self) -> bool {
        self.first_line()
            .chars()
            .next()
            .is_some_and(char::is_whitespace)
    }
}

/// Split report text into chunks
///
/// Processes the input line by line, so report size is bounded only by the
/// caller's memory, not by any structure the splitter builds eagerly.
pub fn split_chunks(text: &str) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                chunks.push(Chunk {
                    lines: std::mem::take(&mut current),
                });
            }
        } else {
            current.push(line.to_string());
        }
    }

    if !current.is_empty() {
        chunks.push(Chunk { lines: current });
    }

    chunks
}
