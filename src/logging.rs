use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;

// @module: Colored stderr logger for host binaries

// @struct: Custom logger implementation
pub struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    pub fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger, once per process
    pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }

    // @returns: One formatted log line, without the trailing newline
    fn format_line(timestamp: &str, record: &Record) -> String {
        format!(
            "\x1B[{}m{} {:<5} {}\x1B[0m",
            Self::color_for_level(record.level()),
            timestamp,
            record.level(),
            record.args()
        )
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f").to_string();
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}", Self::format_line(&now, record));
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
