// src/logger/mod.rs
pub mod call_site;
pub mod filter;
pub mod format;
pub mod level;
pub mod recorder;
pub mod sink;
pub mod throw;
pub mod trace;

use crate::config::Config;
use crate::utils::error::LogError;
use call_site::CallSite;
use chrono::Local;
use filter::{parse_name_list, ReplayFilter, SiteFilter};
use format::{validate_date_format, Formatter};
use level::Level;
use recorder::{Message, Recorder};
use sink::{ConsoleMode, Sink};
use std::error::Error;
use std::fmt::Display;
use std::io::Write;
use std::path::Path;
use throw::{error_chain, BoxError, Thrown};
use trace::TraceStack;

/// Leveled line logger writing to the console and an optional log file.
///
/// Every operation takes `&mut self`; share across threads behind a mutex.
pub struct Logger {
    config: Config,
    formatter: Formatter,
    filter: SiteFilter,
    sink: Sink,
    recorder: Recorder,
    trace: TraceStack,
}

impl Logger {
    /// Creates a logger writing to stdout, opening `config.log_file` if set.
    pub fn new(config: Config) -> Result<Self, LogError> {
        Self::with_writers(config, Box::new(std::io::stdout()), None)
    }

    /// Creates a logger with a custom console writer.
    pub fn with_console(config: Config, console: Box<dyn Write>) -> Result<Self, LogError> {
        Self::with_writers(config, console, None)
    }

    /// Creates a logger with a custom console and, optionally, an already
    /// open log writer used instead of `config.log_file`.
    pub fn with_writers(
        config: Config,
        console: Box<dyn Write>,
        log: Option<Box<dyn Write>>,
    ) -> Result<Self, LogError> {
        config.validate_for(config.log_file.is_some() || log.is_some())?;

        let mut sink = Sink::with_console(console);
        match (log, &config.log_file) {
            (Some(writer), _) => sink.set_log_writer(writer)?,
            (None, Some(path)) => sink.open_log_file(path)?,
            (None, None) => {}
        }

        tracing::debug!("Logger created at level '{}'", config.threshold);
        Ok(Self {
            formatter: config.formatter(),
            filter: config.site_filter(),
            config,
            sink,
            recorder: Recorder::new(),
            trace: TraceStack::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// True when a message at `level` passes the threshold.
    pub fn enabled(&self, level: Level) -> bool {
        self.config.threshold.allows(level)
    }

    fn console_mode(&self) -> ConsoleMode {
        ConsoleMode {
            log_only: self.config.log_only,
            force_out: self.config.force_out,
            indent: self.config.trace,
        }
    }

    fn refresh(&mut self) {
        self.formatter = self.config.formatter();
        self.filter = self.config.site_filter();
    }

    fn write_message(&mut self, level: Level, site: &CallSite, text: &str) -> Result<(), LogError> {
        let line = self.formatter.format(level, site, text, &Local::now());
        let mode = self.console_mode();
        self.sink.write(level, &line, &line, site.depth(), mode)
    }

    // --- Level-gated emit ---

    /// Writes `text` now if `level` passes the threshold and `site` passes
    /// the live filter.
    pub fn emit(&mut self, level: Level, site: CallSite, text: impl AsRef<str>) -> Result<(), LogError> {
        if !self.enabled(level) {
            return Ok(());
        }
        let site = site.with_depth(self.trace.depth());
        if self.filter.should_suppress(&site) {
            return Ok(());
        }
        self.write_message(level, &site, text.as_ref())
    }

    pub fn any(&mut self, site: CallSite, text: impl AsRef<str>) -> Result<(), LogError> {
        self.emit(Level::Any, site, text)
    }

    pub fn out(&mut self, site: CallSite, text: impl AsRef<str>) -> Result<(), LogError> {
        self.emit(Level::Out, site, text)
    }

    pub fn err(&mut self, site: CallSite, text: impl AsRef<str>) -> Result<(), LogError> {
        self.emit(Level::Err, site, text)
    }

    pub fn wrn(&mut self, site: CallSite, text: impl AsRef<str>) -> Result<(), LogError> {
        self.emit(Level::Wrn, site, text)
    }

    pub fn inf(&mut self, site: CallSite, text: impl AsRef<str>) -> Result<(), LogError> {
        self.emit(Level::Inf, site, text)
    }

    pub fn dbg(&mut self, site: CallSite, text: impl AsRef<str>) -> Result<(), LogError> {
        self.emit(Level::Dbg, site, text)
    }

    pub fn db2(&mut self, site: CallSite, text: impl AsRef<str>) -> Result<(), LogError> {
        self.emit(Level::Db2, site, text)
    }

    pub fn log(&mut self, site: CallSite, text: impl AsRef<str>) -> Result<(), LogError> {
        self.emit(Level::Log, site, text)
    }

    // --- Recorder ---

    /// Buffers a message for a later [`drain`](Self::drain). Not gated.
    pub fn record(&mut self, level: Level, site: CallSite, text: impl Into<String>) {
        let site = site.with_depth(self.trace.depth());
        self.recorder.record(level, site, text);
    }

    pub fn has_messages(&self) -> bool {
        self.recorder.has_messages()
    }

    pub fn clear_messages(&mut self) {
        self.recorder.clear();
    }

    pub fn recorded(&self) -> &[Message] {
        self.recorder.messages()
    }

    /// Replay filter built from the configuration's file, function and
    /// line filters (with the replay's exclusive line end).
    pub fn replay_defaults(&self) -> ReplayFilter {
        ReplayFilter::from(&self.filter).file_func_line(self.config.file_func_line)
    }

    /// Writes the optional banner as an `out` line from `site`, then every
    /// buffered message that passes `overrides` (or
    /// [`replay_defaults`](Self::replay_defaults)), in order. The buffer is
    /// cleared afterward unless the filter says to retain it.
    pub fn drain(
        &mut self,
        site: CallSite,
        banner: Option<&str>,
        overrides: Option<&ReplayFilter>,
    ) -> Result<(), LogError> {
        let ambient;
        let filter = match overrides {
            Some(filter) => filter,
            None => {
                ambient = self.replay_defaults();
                &ambient
            }
        };

        if let Some(banner) = banner {
            let site = site.with_depth(self.trace.depth());
            self.write_message(Level::Out, &site, banner)?;
        }

        let pending: Vec<(Level, CallSite, String)> = self.recorder.replay(filter).collect();
        tracing::debug!("Replaying {} of {} buffered messages", pending.len(), self.recorder.len());
        for (level, site, text) in &pending {
            self.write_message(*level, site, text)?;
        }

        if !filter.retain {
            self.recorder.clear();
        }
        Ok(())
    }

    // --- Trace ---

    pub fn depth(&self) -> usize {
        self.trace.depth()
    }

    fn write_trace(&mut self, site: &CallSite, text: &str, depth: usize) -> Result<(), LogError> {
        let file_line = self.formatter.format(Level::Dbg, site, text, &Local::now());
        let mode = self.console_mode();
        self.sink.write(Level::Dbg, &file_line, text, depth, mode)
    }

    /// Writes `func(msg) {` and nests one level deeper. No-op unless tracing.
    ///
    /// The frame is pushed even when the live filter hides the line, so the
    /// depth always follows the real nesting.
    pub fn enter(&mut self, site: CallSite, msg: &str) -> Result<(), LogError> {
        if !self.config.trace {
            return Ok(());
        }
        let depth = self.trace.depth();
        let site = site.with_depth(depth);
        self.trace.push(site);
        if self.filter.should_suppress(&site) {
            return Ok(());
        }
        let text = trace::enter_line(&site, msg);
        self.write_trace(&site, &text, depth)
    }

    /// Returns one level and writes `} # func:line msg`. No-op unless tracing.
    pub fn leave(&mut self, site: CallSite, msg: &str) -> Result<(), LogError> {
        if !self.config.trace {
            return Ok(());
        }
        self.trace.pop();
        let depth = self.trace.depth();
        let site = site.with_depth(depth);
        if self.filter.should_suppress(&site) {
            return Ok(());
        }
        let text = trace::leave_line(&site, msg);
        self.write_trace(&site, &text, depth)
    }

    /// Prints the frames currently entered, outermost first, and returns
    /// them innermost first.
    pub fn stack(&mut self, banner: Option<&str>) -> Result<String, LogError> {
        let frames = self.trace.render();
        self.sink.write_console(&format!("stack: {}", banner.unwrap_or_default()))?;
        for frame in frames.iter().rev() {
            self.sink.write_console(&format!("  {}", frame))?;
        }
        Ok(frames.join("\n"))
    }

    // --- Error helpers ---

    fn annotate(&self, site: &CallSite, msg: &mut String) {
        if self.enabled(Level::Inf) {
            msg.push_str(&format!(" [{}]", site.annotation()));
        }
    }

    /// Logs `message` with its call site and wraps `error` for propagation.
    ///
    /// With tracing on, the log line closes the current trace frame as a
    /// `leave` tagged `[<line> throw]`; otherwise it is a `dbg` line. Without
    /// a message nothing is logged.
    pub fn throw<E>(&mut self, site: CallSite, error: E, message: Option<&str>, cause: Option<BoxError>) -> Thrown
    where
        E: Into<BoxError>,
    {
        let error = error.into();
        let Some(message) = message else {
            return Thrown::new(None, site, error, cause);
        };

        let mut msg = message.to_string();
        self.annotate(&site, &mut msg);
        let logged = if self.config.trace {
            self.leave(site, &format!("{} [{} throw]", msg, site.line()))
        } else {
            self.emit(Level::Dbg, site, &msg)
        };
        if let Err(e) = logged {
            tracing::warn!("Failed to log thrown error: {}", e);
        }
        Thrown::new(Some(msg), site, error, cause)
    }

    /// Builds `message [site]; error`, logs it at `dbg`, and returns it.
    pub fn describe(
        &mut self,
        site: CallSite,
        message: Option<&str>,
        error: Option<&dyn Display>,
    ) -> Result<String, LogError> {
        let mut msg = message.unwrap_or_default().to_string();
        self.annotate(&site, &mut msg);
        if let Some(e) = error {
            msg.push_str(&format!("; {}", e));
        }
        self.emit(Level::Dbg, site, &msg)?;
        Ok(msg)
    }

    /// Logs `message` and then every error in `error`'s source chain at `level`.
    pub fn log_error(
        &mut self,
        site: CallSite,
        error: &(dyn Error + 'static),
        message: Option<&str>,
        level: Level,
    ) -> Result<(), LogError> {
        if let Some(message) = message {
            self.emit(level, site, message)?;
        }
        for line in error_chain(error) {
            self.emit(level, site, line)?;
        }
        Ok(())
    }

    /// Records `msg` at `err` (if given), drains the buffer and closes the sink.
    pub fn prepare_exit(&mut self, site: CallSite, msg: Option<&str>) -> Result<(), LogError> {
        if let Some(msg) = msg {
            self.record(Level::Err, site, msg);
        }
        self.drain(site, None, None)?;
        self.sink.close()
    }

    /// [`prepare_exit`](Self::prepare_exit), then exits the process with status 1.
    pub fn exit_with_messages(&mut self, site: CallSite, msg: Option<&str>) -> ! {
        if let Err(e) = self.prepare_exit(site, msg) {
            tracing::warn!("Failed to flush buffered messages before exit: {}", e);
        }
        std::process::exit(1)
    }

    // --- Settings ---

    pub fn level(&self) -> Level {
        self.config.threshold
    }

    pub fn level_name(&self) -> &'static str {
        self.config.threshold.name()
    }

    pub fn set_level(&mut self, level: Level) {
        self.config.threshold = level;
    }

    pub fn set_level_name(&mut self, name: &str) -> Result<(), LogError> {
        self.config.threshold = name.parse()?;
        Ok(())
    }

    pub fn trace_enabled(&self) -> bool {
        self.config.trace
    }

    /// Turning tracing off forgets any open frames.
    pub fn set_trace(&mut self, on: bool) {
        self.config.trace = on;
        if !on {
            self.trace.clear();
        }
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.sink.log_path()
    }

    /// Opens `path` for appending, closing the current log output.
    pub fn set_log_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LogError> {
        self.sink.open_log_file(path.as_ref())?;
        self.config.log_file = Some(path.as_ref().to_path_buf());
        Ok(())
    }

    /// Uses `writer` as the log output, closing the current one.
    pub fn set_log_writer(&mut self, writer: Box<dyn Write>) -> Result<(), LogError> {
        self.sink.set_log_writer(writer)?;
        self.config.log_file = None;
        Ok(())
    }

    pub fn log_only(&self) -> bool {
        self.config.log_only
    }

    pub fn set_log_only(&mut self, on: bool) -> Result<(), LogError> {
        if on && !self.sink.has_log() {
            return Err(LogError::LogOnlyWithoutFile);
        }
        self.config.log_only = on;
        Ok(())
    }

    pub fn force_out(&self) -> bool {
        self.config.force_out
    }

    pub fn set_force_out(&mut self, on: bool) {
        self.config.force_out = on;
    }

    pub fn date_time(&self) -> bool {
        self.config.show_date_time
    }

    pub fn set_date_time(&mut self, on: bool) {
        self.config.show_date_time = on;
        self.refresh();
    }

    pub fn file_line(&self) -> bool {
        self.config.show_file_line
    }

    pub fn set_file_line(&mut self, on: bool) {
        self.config.show_file_line = on;
        self.refresh();
    }

    pub fn date_format(&self) -> &str {
        &self.config.date_format
    }

    pub fn set_date_format(&mut self, date_format: &str) -> Result<(), LogError> {
        validate_date_format(date_format)?;
        self.config.date_format = date_format.to_string();
        self.refresh();
        Ok(())
    }

    pub fn set_file_func_line(&mut self, on: bool) {
        self.config.file_func_line = on;
    }

    pub fn set_file_name_filter(&mut self, name: Option<&str>) {
        self.config.file_name_filter = name.map(str::to_string);
        self.refresh();
    }

    /// Comma-delimited allow-list; `None` or an empty list disables it.
    pub fn set_func_name_filter(&mut self, list: Option<&str>) {
        self.config.func_name_filter = list.filter(|l| !parse_name_list(l).is_empty()).map(str::to_string);
        self.refresh();
    }

    /// Inclusive live range; rejects `begin > end` like the configuration does.
    pub fn set_line_range(&mut self, begin: Option<u32>, end: Option<u32>) -> Result<(), LogError> {
        if let (Some(b), Some(e)) = (begin, end) {
            if b > e {
                return Err(LogError::Config(format!("line_begin {} is after line_end {}", b, e)));
            }
        }
        self.config.line_begin = begin;
        self.config.line_end = end;
        self.refresh();
        Ok(())
    }

    /// Flushes and closes the log output. Also happens on drop.
    pub fn close(&mut self) -> Result<(), LogError> {
        self.sink.close()
    }
}
