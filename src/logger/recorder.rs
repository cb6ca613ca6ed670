// src/logger/recorder.rs
use super::call_site::CallSite;
use super::filter::ReplayFilter;
use super::level::Level;

/// A log call captured for later replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub level: Level,
    pub site: CallSite,
    pub text: String,
}

impl Message {
    /// `file:func():line(depth) level text`, the replay "file_func_line" form.
    pub fn annotated_text(&self) -> String {
        format!(
            "{}:{}():{}({}) {} {}",
            self.site.file(),
            self.site.function_or_main(),
            self.site.line(),
            self.site.depth(),
            self.level.name(),
            self.text
        )
    }
}

/// Ordered buffer of messages awaiting replay.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    messages: Vec<Message>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, level: Level, site: CallSite, text: impl Into<String>) {
        self.messages.push(Message { level, site, text: text.into() });
    }

    pub fn has_messages(&self) -> bool {
        !self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages surviving `filter`, in insertion order, ready to write.
    ///
    /// Each result carries the level to write at (the filter's `max_level`
    /// when set), the recorded call site, and the text to format.
    pub fn replay<'a>(
        &'a self,
        filter: &'a ReplayFilter,
    ) -> impl Iterator<Item = (Level, CallSite, String)> + 'a {
        self.messages
            .iter()
            .filter(move |m| !filter.should_skip(m.level, &m.site))
            .map(move |m| {
                let text = if filter.file_func_line { m.annotated_text() } else { m.text.clone() };
                (filter.max_level.unwrap_or(m.level), m.site, text)
            })
    }
}
