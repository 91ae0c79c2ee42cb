//! Subscriber setup shared by the binaries.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    /// Append to a file (the TUI owns the terminal).
    File(&'a Path),
    Stderr,
    /// No subscriber at all.
    Off,
}

impl<'a> LogTarget<'a> {
    /// The TUI may only log to a file; the line-oriented drivers fall back to
    /// stderr.
    pub fn choose(log_file: Option<&'a Path>, owns_terminal: bool) -> Self {
        match (log_file, owns_terminal) {
            (Some(path), _) => LogTarget::File(path),
            (None, true) => LogTarget::Off,
            (None, false) => LogTarget::Stderr,
        }
    }

    fn default_directive(self) -> &'static str {
        match self {
            LogTarget::File(_) => "info",
            LogTarget::Stderr | LogTarget::Off => "warn",
        }
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default level.
pub fn init_tracing(target: LogTarget<'_>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(target.default_directive()));

    let installed = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(io::stderr))
            .try_init(),
        LogTarget::File(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()
        }
    };
    // A subscriber set earlier (e.g. by a test harness) stays in place
    let _ = installed;
    Ok(())
}
