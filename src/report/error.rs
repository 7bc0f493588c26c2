use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(
        "malformed report: found {chunks} chunk(s), need at least a header and a generated-file map"
    )]
    Malformed { chunks: usize },
}
