use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset: `base` raised by `verbosity` steps.
pub fn level_for(base: &str, verbosity: u8) -> &'static str {
    const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
    let start = LEVELS.iter().position(|level| *level == base).unwrap_or(2);
    LEVELS[(start + verbosity as usize).min(LEVELS.len() - 1)]
}

fn env_filter(base: &str, verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(base, verbosity)))
}

/// Log to stderr. Used by the one-shot commands.
pub fn init_tracing(base: &str, verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(base, verbosity))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(UtcTime::rfc_3339())
        .try_init();
}

/// Log to an appended file so output does not collide with the terminal UI.
pub fn init_file_tracing(path: &Path, base: &str, verbosity: u8) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(base, verbosity))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(UtcTime::rfc_3339())
        .try_init();
    Ok(())
}
