//! Log output setup

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Map `-v` occurrences to a level filter
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Filter directive used when `RUST_LOG` is unset
///
/// The library and the `wheelwright` binary both log under the `wheelwright` target.
pub fn default_directive(verbosity: u8) -> String {
    format!("wheelwright={}", level_for(verbosity))
}

/// Install the global fmt subscriber writing to stderr
///
/// `RUST_LOG` takes precedence over the verbosity flag.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
