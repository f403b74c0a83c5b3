//! Subscriber setup. The library crates only emit events; this is the one
//! place that decides where they go.
//!
//! `--quiet` shows errors, no flag shows warnings, and each `-v` steps
//! through info, debug and trace. A set `RUST_LOG` wins over the flags.

use std::io::IsTerminal as _;
use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Install the global subscriber: compact lines on stderr, plus a
/// non-blocking file copy when `--log-file` is set. The file copy is only
/// flushed while the returned guard is alive.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::new(filter_directive(derive_level(args))),
    };

    let stderr_layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    let mut guard = None;
    let file_layer = match args.log_file.as_deref() {
        Some(path) => {
            let (writer, file_guard) = file_writer(path)?;
            guard = Some(file_guard);
            Some(fmt::layer().with_ansi(false).with_writer(writer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a tracing subscriber is already installed")?;

    Ok(guard)
}

fn file_writer(path: &Path) -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("'{}' does not name a file", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create log directory '{}'", dir.display()))?;

    Ok(tracing_appender::non_blocking(tracing_appender::rolling::never(
        dir, file_name,
    )))
}

/// One level applied to the binary and both library crates.
fn filter_directive(level: &str) -> String {
    ["appgen", "appgen_core", "appgen_adapters"]
        .map(|target| format!("{target}={level}"))
        .join(",")
}

fn derive_level(args: &GlobalArgs) -> &'static str {
    match (args.quiet, args.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    }
}
