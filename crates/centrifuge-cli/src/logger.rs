//! Logging setup for the centrifuge CLI.
//!
//! Everything is written to stderr; stdout carries only the JSON result.
//!
//! # Example
//!
//! ```rust,no_run
//! use centrifuge_cli::logger::init_logger;
//! use centrifuge_config::GlobalSettings;
//!
//! init_logger(false, false, false, &GlobalSettings::default());
//! tracing::info!("starting analysis");
//! ```

use centrifuge_config::GlobalSettings;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: [&str; 4] = [
    "centrifuge",
    "centrifuge_cli",
    "centrifuge_config",
    "centrifuge_graph",
];

/// Initialize the global tracing subscriber.
///
/// The level is chosen in this order:
/// 1. `--verbose`: debug for centrifuge crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. `settings.log_level`
/// 5. info for centrifuge crates
///
/// `settings.log_format = "full"` switches from the compact formatter to the
/// full one. The colour decision also applies to `console` styling on stderr.
/// Calling this twice is a no-op.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool, settings: &GlobalSettings) {
    let filter = if verbose {
        crate_filter("debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = settings.log_level.as_deref().unwrap_or("info");
            crate_filter(&level.to_ascii_lowercase())
        })
    };

    let ansi = should_use_colors(no_color);
    console::set_colors_enabled_stderr(ansi);

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(ansi);

    let registry = tracing_subscriber::registry().with(filter);
    let result = if settings.log_format.as_deref() == Some("full") {
        registry.with(fmt_layer).try_init()
    } else {
        registry.with(fmt_layer.compact()).try_init()
    };
    if result.is_err() {
        tracing::debug!("logger already initialized");
    }
}

/// `level` for every centrifuge crate, nothing from dependencies.
fn crate_filter(level: &str) -> EnvFilter {
    let directives: Vec<String> = CRATES.iter().map(|c| format!("{c}={level}")).collect();
    EnvFilter::new(directives.join(","))
}

/// Whether stderr should get ANSI colors.
///
/// `--no-color` and `NO_COLOR` disable them; otherwise the terminal decides.
fn should_use_colors(no_color: bool) -> bool {
    if no_color || std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    console::colors_enabled_stderr()
}
