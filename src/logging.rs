//! Logger setup for the command-line tool.

use log::LevelFilter;
use std::env;

/// Environment variable that turns on debug logging, like `--debug`.
pub const DEBUG_ENV: &str = "CRYPTARITH_DEBUG";

/// Initialize logging through `env_logger`.
///
/// Logs at `Info` by default and at `Debug` when `debug_enabled` is set or
/// [`DEBUG_ENV`] is present. An explicit `RUST_LOG` overrides both. Calling
/// this twice is harmless; the second call is ignored.
pub fn init_logger(debug_enabled: bool) {
    let level = if debug_enabled || env::var_os(DEBUG_ENV).is_some() {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(spec) = env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    if builder.try_init().is_ok() {
        log::debug!("logger initialized at {level:?} level");
    }
}
