// src/logger/filter.rs
//! Call-site filters.
//!
//! Two filters exist with deliberately different line-range boundaries:
//! [`SiteFilter`] runs on every live emit and treats `[line_begin, line_end]`
//! as inclusive on both ends, while [`ReplayFilter`] runs when buffered
//! messages are drained and treats the range as `[line_begin, line_end)`.

use super::call_site::CallSite;
use super::level::Level;

/// Splits a comma-delimited allow-list, dropping blank entries.
pub fn parse_name_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn function_allowed(allow: &[String], site: &CallSite) -> bool {
    allow.is_empty() || allow.iter().any(|name| name == site.function_or_main())
}

fn file_allowed(file_name: Option<&str>, site: &CallSite) -> bool {
    file_name.map_or(true, |name| name == site.file())
}

/// Live filter applied at emit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteFilter {
    pub file_name: Option<String>,
    pub func_names: Vec<String>,
    pub line_begin: Option<u32>,
    pub line_end: Option<u32>,
}

impl SiteFilter {
    /// True when the message from `site` must not be written.
    pub fn should_suppress(&self, site: &CallSite) -> bool {
        if !file_allowed(self.file_name.as_deref(), site) {
            return true;
        }
        if !function_allowed(&self.func_names, site) {
            return true;
        }
        let line = site.line();
        if self.line_begin.is_some_and(|begin| line < begin) {
            return true;
        }
        // Inclusive end.
        self.line_end.is_some_and(|end| line > end)
    }
}

/// Filter and presentation options for replaying buffered messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayFilter {
    /// Skip messages above this level and write the rest at it.
    pub max_level: Option<Level>,
    pub file_name: Option<String>,
    pub func_names: Vec<String>,
    pub line_begin: Option<u32>,
    /// Exclusive.
    pub line_end: Option<u32>,
    /// Prefix each text with `file:func():line(depth) level `.
    pub file_func_line: bool,
    /// Keep the buffer after draining.
    pub retain: bool,
}

impl ReplayFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_level(mut self, level: Level) -> Self {
        self.max_level = Some(level);
        self
    }

    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Comma-delimited allow-list; an empty string disables the filter.
    pub fn func_names(mut self, list: &str) -> Self {
        self.func_names = parse_name_list(list);
        self
    }

    pub fn lines(mut self, begin: Option<u32>, end: Option<u32>) -> Self {
        self.line_begin = begin;
        self.line_end = end;
        self
    }

    pub fn file_func_line(mut self, on: bool) -> Self {
        self.file_func_line = on;
        self
    }

    pub fn retain(mut self, on: bool) -> Self {
        self.retain = on;
        self
    }

    /// True when a buffered message at `level` from `site` is skipped.
    pub fn should_skip(&self, level: Level, site: &CallSite) -> bool {
        if self.max_level.is_some_and(|max| level > max) {
            return true;
        }
        if !file_allowed(self.file_name.as_deref(), site) {
            return true;
        }
        if !function_allowed(&self.func_names, site) {
            return true;
        }
        let line = site.line();
        if self.line_begin.is_some_and(|begin| line < begin) {
            return true;
        }
        // Exclusive end.
        self.line_end.is_some_and(|end| line >= end)
    }
}

impl From<&SiteFilter> for ReplayFilter {
    fn from(live: &SiteFilter) -> Self {
        Self {
            file_name: live.file_name.clone(),
            func_names: live.func_names.clone(),
            line_begin: live.line_begin,
            line_end: live.line_end,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(func: &'static str, line: u32) -> CallSite {
        CallSite::new("x", Some(func), line)
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let filter = SiteFilter::default();
        assert!(!filter.should_suppress(&site("f", 1)));
        assert!(!filter.should_suppress(&CallSite::top_level("y", 99)));
    }

    #[test]
    fn test_function_allow_list() {
        let filter = SiteFilter { func_names: parse_name_list("f, g"), ..SiteFilter::default() };
        assert!(filter.should_suppress(&site("h", 1)));
        assert!(!filter.should_suppress(&site("f", 1)));
        assert!(!filter.should_suppress(&site("g", 1)));
        assert!(filter.should_suppress(&CallSite::top_level("x", 1)));
    }

    #[test]
    fn test_file_name_filter() {
        let filter = SiteFilter { file_name: Some("x".into()), ..SiteFilter::default() };
        assert!(!filter.should_suppress(&site("f", 1)));
        assert!(filter.should_suppress(&CallSite::new("y", Some("f"), 1)));
    }

    #[test]
    fn test_live_range_is_inclusive() {
        let filter = SiteFilter { line_begin: Some(10), line_end: Some(20), ..SiteFilter::default() };
        assert!(filter.should_suppress(&site("f", 9)));
        assert!(!filter.should_suppress(&site("f", 10)));
        assert!(!filter.should_suppress(&site("f", 20)));
        assert!(filter.should_suppress(&site("f", 21)));
    }

    #[test]
    fn test_replay_range_excludes_end() {
        let filter = ReplayFilter::new().lines(Some(10), Some(20));
        assert!(filter.should_skip(Level::Err, &site("f", 9)));
        assert!(!filter.should_skip(Level::Err, &site("f", 10)));
        assert!(!filter.should_skip(Level::Err, &site("f", 19)));
        assert!(filter.should_skip(Level::Err, &site("f", 20)));
    }

    #[test]
    fn test_replay_max_level_and_empty_func_list() {
        let filter = ReplayFilter::new().max_level(Level::Wrn).func_names("");
        assert!(filter.func_names.is_empty());
        assert!(!filter.should_skip(Level::Err, &site("f", 1)));
        assert!(filter.should_skip(Level::Inf, &site("f", 1)));
    }

    #[test]
    fn test_verdicts_are_idempotent() {
        let live = SiteFilter {
            file_name: Some("x".into()),
            func_names: parse_name_list("f"),
            line_begin: Some(5),
            line_end: Some(8),
        };
        let replay = ReplayFilter::from(&live);
        for line in 0..12 {
            for func in ["f", "g"] {
                let s = site(func, line);
                assert_eq!(live.should_suppress(&s), live.should_suppress(&s));
                assert_eq!(replay.should_skip(Level::Dbg, &s), replay.should_skip(Level::Dbg, &s));
            }
        }
    }
}
