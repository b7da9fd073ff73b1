use crate::errors::DbError;
use crate::query::RESULTS_TARGET;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const ROLL_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_RETENTION: u32 = 7;

#[must_use]
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    match level.unwrap_or("info").to_ascii_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn rolling(dir: &Path, stem: &str, keep: u32) -> Result<RollingFileAppender, DbError> {
    let roller = FixedWindowRoller::builder()
        .build(&format!("{}", dir.join(format!("{stem}.{{}}.log")).display()), keep)
        .map_err(|e| DbError::Logger(e.to_string()))?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));
    RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(dir.join(format!("{stem}.log")), Box::new(policy))
        .map_err(|e| DbError::Logger(e.to_string()))
}

/// Builds the logging config: stderr always; with `dir`, also `bookstore.log` and a
/// `results.log` that records one line per step.
///
/// # Errors
/// Returns an error if the directory cannot be created or an appender fails to build.
pub fn build_config(dir: Option<&Path>, level: Option<&str>, retention: Option<u32>) -> Result<Config, DbError> {
    let lvl = parse_level(level);
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    let mut builder = Config::builder().appender(Appender::builder().build("stderr", Box::new(stderr)));
    let mut root = Root::builder().appender("stderr");

    if let Some(dir) = dir {
        std::fs::create_dir_all(dir)?;
        let keep = retention.unwrap_or(DEFAULT_RETENTION);
        builder = builder
            .appender(Appender::builder().build("app", Box::new(rolling(dir, "bookstore", keep)?)))
            .appender(Appender::builder().build("results", Box::new(rolling(dir, "results", keep)?)))
            .logger(Logger::builder().appender("results").additive(false).build(RESULTS_TARGET, LevelFilter::Info));
        root = root.appender("app");
    } else {
        // Results already go to stdout; keep them off the console log.
        builder = builder.logger(Logger::builder().additive(false).build(RESULTS_TARGET, LevelFilter::Off));
    }

    builder.build(root.build(lvl)).map_err(|e| DbError::Logger(e.to_string()))
}

/// Like `build_config`, but falls back to console-only output when the file appenders cannot be
/// built. Alongside the config it returns the reason the files were dropped, if they were.
///
/// # Errors
/// Fails only if the console-only config cannot be built either.
pub fn build_config_or_console(
    dir: Option<&Path>,
    level: Option<&str>,
    retention: Option<u32>,
) -> Result<(Config, Option<DbError>), DbError> {
    match build_config(dir, level, retention) {
        Ok(cfg) => Ok((cfg, None)),
        Err(e) if dir.is_some() => Ok((build_config(None, level, retention)?, Some(e))),
        Err(e) => Err(e),
    }
}

/// Installs the global logger, keeping stderr logging even when the log files are unusable.
/// Returns the file error that forced the fallback, if any.
///
/// # Errors
/// Fails if no config can be built or a logger is already installed.
pub fn configure_logging(
    dir: Option<&Path>,
    level: Option<&str>,
    retention: Option<u32>,
) -> Result<Option<DbError>, DbError> {
    let (config, dropped) = build_config_or_console(dir, level, retention)?;
    log4rs::init_config(config).map_err(|e| DbError::Logger(e.to_string()))?;
    Ok(dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parsing_defaults_to_info() {
        assert_eq!(parse_level(Some("DEBUG")), LevelFilter::Debug);
        assert_eq!(parse_level(Some("bogus")), LevelFilter::Info);
        assert_eq!(parse_level(None), LevelFilter::Info);
    }

    #[test]
    fn file_config_creates_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        let cfg = build_config(Some(&logs), Some("warn"), Some(2)).unwrap();
        assert!(logs.is_dir());
        assert_eq!(cfg.root().level(), LevelFilter::Warn);
        assert!(cfg.loggers().iter().any(|l| l.name() == RESULTS_TARGET));
        assert_eq!(cfg.appenders().len(), 3);
    }

    #[test]
    fn console_only_config() {
        let cfg = build_config(None, None, None).unwrap();
        assert_eq!(cfg.appenders().len(), 1);
        assert_eq!(cfg.root().level(), LevelFilter::Info);
    }

    #[test]
    fn unusable_log_dir_falls_back_to_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not_a_dir");
        std::fs::write(&file, "x").unwrap();
        let logs = file.join("logs");
        assert!(build_config(Some(&logs), None, None).is_err());

        let (cfg, dropped) = build_config_or_console(Some(&logs), Some("debug"), None).unwrap();
        assert!(dropped.is_some());
        assert_eq!(cfg.appenders().len(), 1);
        assert_eq!(cfg.appenders()[0].name(), "stderr");
        assert_eq!(cfg.root().level(), LevelFilter::Debug);
    }

    #[test]
    fn usable_log_dir_keeps_files() {
        let dir = tempfile::tempdir().unwrap();
        let (cfg, dropped) = build_config_or_console(Some(dir.path()), None, None).unwrap();
        assert!(dropped.is_none());
        assert_eq!(cfg.appenders().len(), 3);
    }
}
