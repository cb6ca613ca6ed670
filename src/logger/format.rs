// src/logger/format.rs
use super::call_site::CallSite;
use super::level::Level;
use crate::utils::error::LogError;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};
use std::fmt::{Display, Write};

/// Default header date format, includes microseconds.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Rejects strftime strings chrono cannot render.
pub fn validate_date_format(date_format: &str) -> Result<(), LogError> {
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        return Err(LogError::InvalidDateFormat(date_format.to_string()));
    }
    Ok(())
}

/// Builds output lines from `(level, call site, text)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    pub show_date_time: bool,
    pub show_file_line: bool,
    pub date_format: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            show_date_time: true,
            show_file_line: true,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl Formatter {
    /// Header without brackets, or `None` when both components are off.
    pub fn header<Tz>(&self, level: Level, site: &CallSite, now: &DateTime<Tz>) -> Option<String>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        if !self.show_date_time && !self.show_file_line {
            return None;
        }

        let mut hdr = String::new();
        if self.show_date_time {
            // The format was validated when configured; a failure here only drops the date.
            let _ = write!(hdr, "{} {}", now.format(&self.date_format), level.name());
        }
        if self.show_file_line {
            if self.show_date_time {
                hdr.push(' ');
            }
            hdr.push_str(&site.header());
        }
        Some(hdr)
    }

    /// Final line (without newline): `[<header>] <text>` or just `<text>`.
    pub fn format<Tz>(&self, level: Level, site: &CallSite, text: &str, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self.header(level, site, now) {
            Some(hdr) => format!("[{}] {}", hdr, text),
            None => text.to_string(),
        }
    }
}
