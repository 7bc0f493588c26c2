//! Reload notification seam
//!
//! After a successful database write, external language tooling needs a nudge
//! to reload. The pipeline only talks to this trait; wiring it to a concrete
//! editor or language-server integration happens at the call site.

use std::path::Path;
use tracing::info;

/// Sink invoked once per successfully written compilation database
pub trait ReloadSink: Send + Sync {
    fn database_written(&self, path: &Path);
}

/// Default sink: announces the new database in the log and nothing else
pub struct LogReloadSink;

impl ReloadSink for LogReloadSink {
    fn database_written(&self, path: &Path) {
        info!(
            path = %path.display(),
            "compilation database updated, tooling may reload it"
        );
    }
}
