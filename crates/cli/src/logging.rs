//! Tracing setup. Logs go to stderr so stdout only carries the result line.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable holding a level or a full filter spec.
pub const LOG_ENV: &str = "SSEGEN_LOG";

const CRATES: [&str; 2] = ["ssegen_core", "ssegen_cli"];

/// Install the global stderr subscriber. Call once, before anything logs.
pub fn init_tracing() {
    // SSEGEN_LOG controls log level: "trace", "debug", "info", "warn", "error"
    // or a full tracing filter spec like "ssegen_core=debug"
    let filter = filter_spec(std::env::var(LOG_ENV).ok().as_deref());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn filter_spec(value: Option<&str>) -> String {
    match value {
        Some(level) if is_plain_level(level) => per_crate(&level.to_ascii_lowercase()),
        Some(spec) if !spec.trim().is_empty() => spec.to_string(),
        _ => per_crate("warn"),
    }
}

fn per_crate(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
