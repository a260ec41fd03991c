use std::io::Write;

use colored::{ColoredString, Colorize};
use env_logger::Builder;
use log::{Level, LevelFilter, SetLoggerError};

/// Installs the process logger at `level` ("debug", "info", ...).
///
/// `RUST_LOG`, when set, takes precedence over `level`. An unknown level falls
/// back to info.
pub fn init(level: &str) -> Result<(), SetLoggerError> {
    let filter = level.parse::<LevelFilter>().ok();
    Builder::new()
        .filter_level(filter.unwrap_or(LevelFilter::Info))
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}: {}", level_str(record.level()), record.args()))
        .try_init()?;
    if filter.is_none() {
        log::warn!("unknown log level {:?}, using info", level);
    }
    Ok(())
}

fn level_str(level: Level) -> ColoredString {
    match level {
        Level::Trace => "TRACE".dimmed(),
        Level::Debug => "DEBUG".blue(),
        Level::Info => "INFO".green(),
        Level::Warn => "WARN".yellow(),
        Level::Error => "ERROR".red(),
    }
}
