//! Console logging: progress lines on stdout, warnings and errors on stderr.

use env_logger::fmt::Formatter;
use env_logger::{Builder, Env, Logger, Target};
use log::{Level, Log, Metadata, Record, SetLoggerError};
use std::io::{self, Write};

pub struct ConsoleLogger {
    stdout: Logger,
    stderr: Logger,
}

impl ConsoleLogger {
    /// Filters come from `RUST_LOG`, defaulting to `info`.
    pub fn from_env() -> Self {
        Self {
            stdout: builder(Target::Stdout).build(),
            stderr: builder(Target::Stderr).build(),
        }
    }

    fn pick(&self, level: Level) -> &Logger {
        if is_diagnostic(level) {
            &self.stderr
        } else {
            &self.stdout
        }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.pick(metadata.level()).enabled(metadata)
    }

    fn log(&self, record: &Record) {
        self.pick(record.level()).log(record);
    }

    fn flush(&self) {
        self.stdout.flush();
        self.stderr.flush();
    }
}

pub fn init() -> Result<(), SetLoggerError> {
    let logger = ConsoleLogger::from_env();
    log::set_max_level(logger.stdout.filter().max(logger.stderr.filter()));
    log::set_boxed_logger(Box::new(logger))
}

/// Warnings and errors go to stderr.
fn is_diagnostic(level: Level) -> bool {
    level <= Level::Warn
}

fn builder(target: Target) -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.target(target).format(format);
    builder
}

fn format(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    writeln!(buf, "{}", line(record.level(), &record.args().to_string()))
}

/// Info lines print bare; everything else carries its level.
fn line(level: Level, message: &str) -> String {
    match level {
        Level::Info => message.to_string(),
        level => format!("[{level}] {message}"),
    }
}
