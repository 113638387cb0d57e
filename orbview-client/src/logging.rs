//! Logger setup.
//!
//! Log lines go to stdout and, when it can be opened, to `orbview.log` in the local
//! data directory.

use std::path::PathBuf;

use log::LevelFilter;

/// Location of the log file, if the platform has a local data directory.
pub fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("orbview").join("orbview.log"))
}

fn format_line(level: log::Level, target: &str, message: &std::fmt::Arguments) -> String {
    format!(
        "[{} {:<5} {}] {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        level,
        target,
        message
    )
}

/// Installs the global logger. Must be called once, before anything logs.
pub fn setup_logger(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}",
                format_line(record.level(), record.target(), message)
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    let mut file_error = None;
    if let Some(path) = log_file_path() {
        let opened = path
            .parent()
            .map_or(Ok(()), std::fs::create_dir_all)
            .and_then(|_| fern::log_file(&path));
        match opened {
            Ok(file) => dispatch = dispatch.chain(file),
            Err(e) => file_error = Some((path, e)),
        }
    }

    dispatch.apply()?;

    if let Some((path, e)) = file_error {
        log::warn!("Could not open log file {}: {e}", path.display());
    }
    Ok(())
}
