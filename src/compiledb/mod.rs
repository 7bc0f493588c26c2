//! Compile-database generation
//!
//! Consumes a parsed [`crate::report::ProjectInfo`] and produces a
//! clang-compatible `compile_commands.json`: one entry per source file, with
//! an argument vector whose order is fixed for downstream tool compatibility.

pub mod config;
pub mod error;
pub mod generator;
pub mod writer;

pub use config::{
    DATABASE_FILE_NAME, DEFAULT_COMPILER, DEFAULT_FLAGS, GeneratorConfig, resolve_output_path,
};
pub use error::CompileDbError;
pub use generator::generate;
pub use writer::write_database;
