// src/utils/logging.rs
//! Logging configuration and utilities
//!
//! Sets up `env_logger` for the binary. The library itself only talks to the
//! `log` facade, so tests and embedding applications can install their own
//! logger instead.

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::env;

/// Initializes logging at Info level unless `RUST_LOG` says otherwise
pub fn init_logging() {
    init_with_default(LevelFilter::Info);
}

/// Initializes logging at Debug level unless `RUST_LOG` says otherwise
///
/// Used by `run --verbose` so per-lane progress and refresh wakeups show up.
pub fn init_verbose_logging() {
    init_with_default(LevelFilter::Debug);
}

fn init_with_default(level: LevelFilter) {
    let mut builder = common_log_config();

    if env::var("RUST_LOG").is_err() {
        builder.filter_level(level);
    } else {
        builder.parse_env("RUST_LOG");
    }

    // A logger may already be installed when embedded; keep the existing one.
    let _ = builder.try_init();
}

/// Creates a base logger builder with the shared line format
///
/// Format: `[timestamp level module:line] message`, written to stdout.
fn common_log_config() -> Builder {
    let mut builder = Builder::new();

    builder
        .format(|buf, record| {
            use std::io::Write;
            let ts = buf.timestamp_seconds();
            let level = record.level();
            let module = record.module_path().unwrap_or_default();
            let line = record.line().unwrap_or(0);

            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                ts,
                level,
                module,
                line,
                record.args()
            )
        })
        .target(Target::Stdout);

    builder
}
