//! Test utilities and global setup
//!
//! Provides the canonical report fixture shared across test modules, plus
//! centralized test logging configuration.

/// Canonical two-package report used by parser and pipeline tests
///
/// `alpha` exercises every record field; `beta` ends early and keeps empty
/// flags and outputs. The final chunk is the generated-file map.
pub fn sample_report() -> String {
    "\
project-info format 1

alpha /ws/alpha/project.yml
  /ws/alpha/include
  /ws/deps/common/include

  /ws/alpha/src/main.c
  /ws/alpha/src/util.c

  -O2
  -DNDEBUG

  /ws/build/alpha/main.o
  /ws/build/alpha/util.o

beta /ws/beta/project.yml

  /ws/beta/src/beta.c

gen/parser.c /ws/alpha/src/main.c 1
gen/lexer.c /ws/alpha/src/util.c 2
"
    .to_string()
}

/// Test logging utilities
#[cfg(feature = "test-logging")]
pub mod logging {
    use std::sync::Once;
    use tracing_subscriber::{EnvFilter, fmt};

    static INIT: Once = Once::new();

    /// Initialize test logging globally - safe to call multiple times
    ///
    /// Respects RUST_LOG with a debug-level default and uses the test writer
    /// so log lines do not interfere with test output.
    pub fn init() {
        INIT.call_once(|| {
            let env_filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("debug,tokio=info"));

            fmt()
                .with_env_filter(env_filter)
                .with_test_writer()
                .with_target(true)
                .compact()
                .try_init()
                .ok();
        });
    }
}

/// Global test logging setup
///
/// Add this to any test module where automatic logging initialization is
/// wanted; it runs once before the module's tests via `ctor`.
#[cfg(feature = "test-logging")]
#[macro_export]
macro_rules! setup_test_logging {
    () => {
        #[ctor::ctor]
        fn init_test_logging() {
            $crate::test_utils::logging::init();
        }
    };
}
