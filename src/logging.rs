use crate::consts;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(consts::LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(consts::DEFAULT_LOG_FILTER))
}

/// Log to standard error.  Used by the score server.
pub(crate) fn init_stderr() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter())
        .init();
}

/// Log to the file at `path`, appending if it already exists.  Used by the
/// game, which owns the terminal.
pub(crate) fn init_file(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?
        .into_parts()
        .0;
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter())
        .init();
    Ok(())
}
