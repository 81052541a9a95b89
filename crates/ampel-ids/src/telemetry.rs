//! Log output for the `ampel` binary and other hosts of the registries.
//!
//! `ampel` writes command results (IDs, reports, hashes) to stdout, so those
//! can be piped or captured as JSON with `--output json`. Everything the
//! libraries log, such as `identifier.generated`, `link.rejected` or
//! `dictionary.loaded`, goes to stderr instead.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the process-wide subscriber writing registry events to stderr.
///
/// `level` applies when `RUST_LOG` is unset; `RUST_LOG=ampel_tdms=debug`
/// narrows or widens it per crate. With `json` each event is one JSON object
/// per line, keeping the `event` field machine-readable. A second call leaves
/// the first subscriber in place.
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let stderr = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let installed = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr.json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr)
            .try_init()
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
