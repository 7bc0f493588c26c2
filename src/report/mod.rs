//! Project-info report parsing
//!
//! The build tool emits a flat text report describing every package in the
//! workspace: its descriptor, dependency include paths, sources, compiler
//! flags, output artifacts, and a trailing map of generated files. This module
//! turns that report into a structured model without touching the filesystem.

pub mod chunks;
pub mod error;
pub mod model;
pub mod parser;

pub use chunks::{Chunk, split_chunks};
pub use error::ReportError;
pub use model::{GeneratedFile, PackageRecord, ProjectInfo};
pub use parser::parse;
