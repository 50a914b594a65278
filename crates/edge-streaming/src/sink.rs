//! Platform-controlled streaming sink.

use std::fmt::Display;

use edge_core::{LifecyclePhase, TimingContext, WorkloadError};
use futures::{Sink, SinkExt};

/// State of the streaming sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SinkState {
    /// Shell not yet sent.
    Initial,
    /// Shell has been sent, sections can be streamed.
    ShellSent,
    /// Response has been completed.
    Completed,
}

/// Streaming sink that enforces the shell-first pattern.
///
/// Generic over any `Sink<Vec<u8>>`, including Spin's `OutgoingBody` and a
/// plain `Vec<Vec<u8>>` in tests.
pub struct StreamingSink<S, E>
where
    S: Sink<Vec<u8>, Error = E> + Unpin,
    E: Display,
{
    inner: S,
    state: SinkState,
    timing: TimingContext,
    sections_sent: Vec<String>,
}

impl<S, E> StreamingSink<S, E>
where
    S: Sink<Vec<u8>, Error = E> + Unpin,
    E: Display,
{
    /// Create a new streaming sink.
    pub fn new(sink: S, timing: TimingContext) -> Self {
        Self {
            inner: sink,
            state: SinkState::Initial,
            timing,
            sections_sent: Vec::new(),
        }
    }

    /// Send the shell HTML. Must be called exactly once, before any section.
    pub async fn send_shell(&mut self, html: &str) -> Result<(), WorkloadError> {
        if self.state != SinkState::Initial {
            return Err(WorkloadError::StreamError(
                "Shell already sent or sink completed".to_string(),
            ));
        }

        self.write(html.as_bytes().to_vec()).await?;
        self.timing.mark("shell_sent");
        self.state = SinkState::ShellSent;

        Ok(())
    }

    /// Send a named section. Shell must be sent first.
    pub async fn send_section(&mut self, name: &str, html: &str) -> Result<(), WorkloadError> {
        self.ensure_open()?;

        self.timing.mark_section_start(name);
        self.write(html.as_bytes().to_vec()).await?;
        self.timing.mark_section_sent(name);
        self.sections_sent.push(name.to_string());

        Ok(())
    }

    /// Send the closing HTML and complete the response.
    pub async fn finish(&mut self, closing: &str) -> Result<(), WorkloadError> {
        self.ensure_open()?;

        self.write(closing.as_bytes().to_vec()).await?;
        self.inner
            .flush()
            .await
            .map_err(|e| WorkloadError::StreamError(e.to_string()))?;
        self.timing.mark("complete");
        self.state = SinkState::Completed;

        Ok(())
    }

    fn ensure_open(&self) -> Result<(), WorkloadError> {
        match self.state {
            SinkState::Initial => Err(WorkloadError::ShellNotSent),
            SinkState::Completed => Err(WorkloadError::StreamError(
                "Sink already completed".to_string(),
            )),
            SinkState::ShellSent => Ok(()),
        }
    }

    async fn write(&mut self, bytes: Vec<u8>) -> Result<(), WorkloadError> {
        self.inner
            .send(bytes)
            .await
            .map_err(|e| WorkloadError::StreamError(e.to_string()))
    }

    /// Names of the sections sent, in order.
    pub fn sections_sent(&self) -> &[String] {
        &self.sections_sent
    }

    /// Get the current lifecycle phase.
    pub fn phase(&self) -> LifecyclePhase {
        match (self.state, self.sections_sent.last()) {
            (SinkState::Initial, _) => LifecyclePhase::Start,
            (SinkState::ShellSent, None) => LifecyclePhase::ShellSent,
            (SinkState::ShellSent, Some(last)) => LifecyclePhase::SectionSent(last.clone()),
            (SinkState::Completed, _) => LifecyclePhase::Completion,
        }
    }

    /// Get timing context reference.
    pub fn timing(&self) -> &TimingContext {
        &self.timing
    }

    /// Consume the sink and return the inner value.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::convert::Infallible;

    fn sink() -> StreamingSink<Vec<Vec<u8>>, Infallible> {
        StreamingSink::new(Vec::new(), TimingContext::new())
    }

    #[test]
    fn test_shell_first_ordering() {
        let mut sink = sink();
        assert_eq!(sink.phase(), LifecyclePhase::Start);

        let err = block_on(sink.send_section("details", "<p>x</p>")).unwrap_err();
        assert!(matches!(err, WorkloadError::ShellNotSent));

        block_on(sink.send_shell("<html>")).unwrap();
        assert_eq!(sink.phase(), LifecyclePhase::ShellSent);
        assert!(sink.timing().time_to_shell().is_some());

        block_on(sink.send_section("details", "<p>x</p>")).unwrap();
        assert_eq!(sink.phase(), LifecyclePhase::SectionSent("details".to_string()));

        block_on(sink.finish("</html>")).unwrap();
        assert_eq!(sink.phase(), LifecyclePhase::Completion);
        assert_eq!(sink.sections_sent(), ["details"]);

        let chunks = sink.into_inner();
        assert_eq!(chunks, vec![b"<html>".to_vec(), b"<p>x</p>".to_vec(), b"</html>".to_vec()]);
    }

    #[test]
    fn test_shell_twice_is_rejected() {
        let mut sink = sink();
        block_on(sink.send_shell("a")).unwrap();
        assert!(block_on(sink.send_shell("b")).is_err());
    }

    #[test]
    fn test_nothing_after_finish() {
        let mut sink = sink();
        block_on(sink.send_shell("a")).unwrap();
        block_on(sink.finish("z")).unwrap();
        assert!(block_on(sink.send_section("late", "x")).is_err());
        assert!(block_on(sink.finish("z")).is_err());
    }
}
