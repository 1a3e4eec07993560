use std::path::Path;

use anyhow::{Context, Result};
use log::LevelFilter;

/// Installs the global logger, appending to `path`.
///
/// The terminal belongs to the renderer, so nothing is logged to stdout or
/// stderr.
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    let file = fern::log_file(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] {}: {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(file)
        .apply()
        .context("failed to install logger")?;

    Ok(())
}
