use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::str::FromStr;

pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
pub const LOG_FILE_ENV: &str = "LOG_FILE";

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}";

/// Logs to stderr and, if `LOG_FILE` is set, to that file as well.
pub fn init_logging() -> Result<()> {
    let level = match dotenv::var(LOG_LEVEL_ENV) {
        Ok(level) => LevelFilter::from_str(level.trim())
            .context(format!("invalid value of {}: {:?}", LOG_LEVEL_ENV, level))?,
        Err(_) => LevelFilter::Info,
    };

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let mut config = Config::builder().appender(Appender::builder().build("stderr", Box::new(stderr)));
    let mut root = Root::builder().appender("stderr");

    if let Ok(log_file) = dotenv::var(LOG_FILE_ENV) {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(&log_file)
            .context(format!("couldn't open the log file {}", log_file))?;

        config = config.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    let config = config
        .build(root.build(level))
        .context("invalid logging configuration")?;

    log4rs::init_config(config).context("logging is already initialized")?;

    Ok(())
}
