//! Request lifecycle tracking.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Lifecycle phases for a streamed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Request received, nothing sent yet.
    Start,
    /// Shell HTML has been flushed to client.
    ShellSent,
    /// A named section has been sent.
    SectionSent(String),
    /// Response completed.
    Completion,
}

/// Timing marks relative to the start of a request.
#[derive(Debug, Clone)]
pub struct TimingContext {
    start: Instant,
    marks: HashMap<String, Instant>,
}

impl TimingContext {
    /// Create a new timing context starting now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            marks: HashMap::new(),
        }
    }

    /// Record a timing mark. Re-marking overwrites.
    pub fn mark(&mut self, name: &str) {
        self.marks.insert(name.to_string(), Instant::now());
    }

    /// Offset of a mark from the request start.
    pub fn offset(&self, name: &str) -> Option<Duration> {
        self.marks.get(name).map(|t| t.duration_since(self.start))
    }

    /// Time between two marks, if both exist and are ordered.
    pub fn between(&self, from: &str, to: &str) -> Option<Duration> {
        let from = self.marks.get(from)?;
        let to = self.marks.get(to)?;
        to.checked_duration_since(*from)
    }

    /// Mark section start.
    pub fn mark_section_start(&mut self, section: &str) {
        self.mark(&format!("section_{}_start", section));
    }

    /// Mark section sent.
    pub fn mark_section_sent(&mut self, section: &str) {
        self.mark(&format!("section_{}_sent", section));
    }

    /// Time until the shell was flushed.
    pub fn time_to_shell(&self) -> Option<Duration> {
        self.offset("shell_sent")
    }

    /// Time spent sending a section.
    pub fn section_duration(&self, section: &str) -> Option<Duration> {
        self.between(
            &format!("section_{}_start", section),
            &format!("section_{}_sent", section),
        )
    }

    /// Elapsed time since start.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for TimingContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_and_offsets() {
        let mut timing = TimingContext::new();
        assert!(timing.time_to_shell().is_none());
        timing.mark("shell_sent");
        assert!(timing.time_to_shell().is_some());
    }

    #[test]
    fn test_section_duration() {
        let mut timing = TimingContext::new();
        timing.mark_section_start("details");
        assert!(timing.section_duration("details").is_none());
        timing.mark_section_sent("details");
        assert!(timing.section_duration("details").is_some());
    }

    #[test]
    fn test_between_missing_mark() {
        let mut timing = TimingContext::new();
        timing.mark("fetch_start");
        assert!(timing.between("fetch_start", "fetch_end").is_none());
    }
}
