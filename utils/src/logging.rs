use std::io::{self, Write};

use chrono::Local;
use colored::{ColoredString, Colorize};
use env_logger::{fmt::Formatter, WriteStyle};
use log::{Level, LevelFilter, Record};

trait ColoredLevel {
    fn colored(&self) -> ColoredString;
}

impl ColoredLevel for Level {
    fn colored(&self) -> ColoredString {
        match self {
            Self::Error => self.as_str().red(),
            Self::Warn => self.as_str().yellow(),
            Self::Info => self.as_str().green(),
            Self::Debug => self.as_str().blue(),
            Self::Trace => self.as_str().cyan(),
        }
    }
}

/// Sets up the global logger for the CLI.
///
/// Logs are written to stderr so that resolved
/// references on stdout stay machine readable.
#[derive(Debug, Clone)]
pub struct Logger {
    modules: Vec<(String, LevelFilter)>,
    level: LevelFilter,
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            modules: Vec::new(),
            level: LevelFilter::Info,
        }
    }
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_modules<I, S>(&mut self, filter_modules: I) -> &mut Self
    where
        I: IntoIterator<Item = (S, LevelFilter)>,
        S: AsRef<str>,
    {
        self.modules = filter_modules
            .into_iter()
            .map(|(module, level)| (module.as_ref().to_string(), level))
            .collect();
        self
    }

    pub const fn filter_level(&mut self, filter_level: LevelFilter) -> &mut Self {
        self.level = filter_level;
        self
    }

    /// Installs the logger. Calling this more than once
    /// keeps the first logger.
    pub fn init(&self) {
        let mut builder = env_logger::builder();
        builder
            .filter_level(self.level)
            .format(format_log(self.level))
            .write_style(WriteStyle::Auto);

        for (module, level) in &self.modules {
            builder.filter_module(module, *level);
        }

        if let Err(e) = builder.try_init() {
            eprintln!("Logger already initialized: {e}");
        }
    }
}

/// Given a `LevelFilter`, returns the function
/// used to format logs. The more verbose the log level,
/// the more info is displayed in each log header.
pub fn format_log(
    log_level: LevelFilter,
) -> impl Fn(&mut Formatter, &Record) -> io::Result<()> + Sync + Send {
    move |buf: &mut Formatter, record: &Record| match log_level {
        LevelFilter::Error | LevelFilter::Warn | LevelFilter::Info => writeln!(
            buf,
            "{level:width$} {sep} {args}",
            level = record.level().colored(),
            width = 5,
            sep = "=>".bold(),
            args = record.args(),
        ),
        LevelFilter::Debug => writeln!(
            buf,
            "[{time} {level:>width$}] {sep} {args}",
            time = Local::now().format("%H:%M:%S"),
            level = record.level().colored(),
            sep = "=>".bold(),
            args = record.args(),
            width = 5,
        ),
        LevelFilter::Trace => writeln!(
            buf,
            "[{time} {level:width$} {module}:{line}] {sep} {args}",
            time = Local::now().format("%H:%M:%S"),
            level = record.level().colored(),
            module = record.module_path().unwrap_or_default().bright_yellow(),
            line = record
                .line()
                .map_or_else(String::new, |l| l.to_string())
                .bright_green(),
            sep = "=>".bold(),
            args = record.args(),
            width = 5,
        ),
        LevelFilter::Off => Ok(()),
    }
}
