// src/config.rs
use crate::logger::filter::{parse_name_list, SiteFilter};
use crate::logger::format::{validate_date_format, Formatter, DEFAULT_DATE_FORMAT};
use crate::logger::level::Level;
use crate::utils::error::LogError;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything a [`Logger`](crate::Logger) needs to know.
///
/// `Config::default()` is the process-wide default; each logger takes its
/// own copy by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub threshold: Level,
    pub trace: bool,
    pub log_file: Option<PathBuf>,
    /// Bypass the console; requires `log_file`.
    pub log_only: bool,
    /// Let `out` lines reach the console even with `log_only`.
    pub force_out: bool,
    pub show_date_time: bool,
    pub show_file_line: bool,
    pub date_format: String,
    /// Default for the replay `file:func():line(depth)` prefix.
    pub file_func_line: bool,
    pub file_name_filter: Option<String>,
    /// Comma-delimited function allow-list.
    pub func_name_filter: Option<String>,
    pub line_begin: Option<u32>,
    pub line_end: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: Level::Err,
            trace: false,
            log_file: None,
            log_only: false,
            force_out: true,
            show_date_time: true,
            show_file_line: true,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            file_func_line: false,
            file_name_filter: None,
            func_name_filter: None,
            line_begin: None,
            line_end: None,
        }
    }
}

impl Config {
    /// Default configuration at the named threshold.
    pub fn with_level(name: &str) -> Result<Self, LogError> {
        Ok(Self { threshold: name.parse()?, ..Self::default() })
    }

    pub fn from_json_str(json: &str) -> Result<Self, LogError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, LogError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!("Loaded logger config from {}", path.as_ref().display());
        Self::from_json_str(&text)
    }

    /// Checks the combinations that would make a logger unusable.
    pub fn validate(&self) -> Result<(), LogError> {
        self.validate_for(self.log_file.is_some())
    }

    /// As [`validate`](Self::validate), when the log output may come from
    /// somewhere other than `log_file`.
    pub(crate) fn validate_for(&self, has_log_output: bool) -> Result<(), LogError> {
        if self.log_only && !has_log_output {
            return Err(LogError::LogOnlyWithoutFile);
        }
        if let (Some(begin), Some(end)) = (self.line_begin, self.line_end) {
            if begin > end {
                return Err(LogError::Config(format!(
                    "line_begin {} is after line_end {}",
                    begin, end
                )));
            }
        }
        validate_date_format(&self.date_format)
    }

    pub fn formatter(&self) -> Formatter {
        Formatter {
            show_date_time: self.show_date_time,
            show_file_line: self.show_file_line,
            date_format: self.date_format.clone(),
        }
    }

    pub fn site_filter(&self) -> SiteFilter {
        SiteFilter {
            file_name: self.file_name_filter.clone(),
            func_names: self.func_name_filter.as_deref().map(parse_name_list).unwrap_or_default(),
            line_begin: self.line_begin,
            line_end: self.line_end,
        }
    }
}

/// `--dbg-*` command line flags; flatten into an application's parser.
#[derive(Args, Debug, Clone, Default)]
pub struct DbgArgs {
    /// Enable debug output at the given level (any, out, err, wrn, inf, dbg, db2, idb, log)
    #[arg(long = "dbg-level", value_name = "LEVEL")]
    pub level: Option<Level>,

    /// Display function enter/leave lines
    #[arg(long = "dbg-trace")]
    pub trace: bool,

    /// Append debug output to the named log file
    #[arg(long = "dbg-log-file", value_name = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Suppress terminal output; only write to the log file
    #[arg(long = "dbg-log-only")]
    pub log_only: bool,

    /// Don't prepend the date and time header to log lines
    #[arg(long = "dbg-no-date-time")]
    pub no_date_time: bool,

    /// Don't prepend the file name and line number header to log lines
    #[arg(long = "dbg-no-file-line")]
    pub no_file_line: bool,

    /// Header date format [default: "%Y-%m-%d %H:%M:%S%.6f"]
    #[arg(long = "dbg-date-format", value_name = "FORMAT")]
    pub date_format: Option<String>,

    /// Prefix replayed messages with file:func():line(depth)
    #[arg(long = "dbg-file-func-line")]
    pub file_func_line: bool,

    /// Only show output from the named file
    #[arg(long = "dbg-file-name", value_name = "FILE")]
    pub file_name: Option<String>,

    /// Only show output from the named functions (comma delimited)
    #[arg(long = "dbg-func-name", value_name = "FUNCS")]
    pub func_name: Option<String>,

    /// Only show output from lines at or after this one
    #[arg(long = "dbg-line-begin", value_name = "LINE")]
    pub line_begin: Option<u32>,

    /// Only show output from lines at or before this one
    #[arg(long = "dbg-line-end", value_name = "LINE")]
    pub line_end: Option<u32>,

    /// JSON config file applied before the other flags
    #[arg(long = "dbg-config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl DbgArgs {
    /// Overlays the flags on the config file (if given) or the defaults.
    pub fn into_config(self) -> Result<Config, LogError> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };

        if let Some(level) = self.level {
            config.threshold = level;
        }
        config.trace |= self.trace;
        if self.log_file.is_some() {
            config.log_file = self.log_file;
        }
        config.log_only |= self.log_only;
        if self.no_date_time {
            config.show_date_time = false;
        }
        if self.no_file_line {
            config.show_file_line = false;
        }
        if let Some(date_format) = self.date_format {
            config.date_format = date_format;
        }
        config.file_func_line |= self.file_func_line;
        if self.file_name.is_some() {
            config.file_name_filter = self.file_name;
        }
        if self.func_name.is_some() {
            config.func_name_filter = self.func_name;
        }
        if self.line_begin.is_some() {
            config.line_begin = self.line_begin;
        }
        if self.line_end.is_some() {
            config.line_end = self.line_end;
        }

        config.validate()?;
        Ok(config)
    }
}
