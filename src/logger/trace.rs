// src/logger/trace.rs
use super::call_site::CallSite;

/// Frames opened by `enter` and not yet closed by `leave`.
///
/// The stack length is the nesting depth used for indentation. Pairing is
/// up to the caller: an unmatched `leave` simply leaves depth at zero.
#[derive(Debug, Clone, Default)]
pub struct TraceStack {
    frames: Vec<CallSite>,
}

impl TraceStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push(&mut self, site: CallSite) {
        self.frames.push(site);
    }

    pub fn pop(&mut self) -> Option<CallSite> {
        self.frames.pop()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Innermost frame first, one `file, func(), ln:N` per entry.
    pub fn render(&self) -> Vec<String> {
        self.frames.iter().rev().map(CallSite::annotation).collect()
    }
}

/// `func(msg) {`
pub fn enter_line(site: &CallSite, msg: &str) -> String {
    format!("{}({}) {{", site.function_or_main(), msg)
}

/// `} # func:line msg`
pub fn leave_line(site: &CallSite, msg: &str) -> String {
    format!("}} # {}:{} {}", site.function_or_main(), site.line(), msg)
}
