//! Session state for one interactive run.

/// One question asked of the assistant and the answer it gave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
}

impl ChatTurn {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// The current transcript and the conversation so far.
///
/// History is append-only: turns are never edited, removed or reordered.
#[derive(Debug, Clone, Default)]
pub struct Session {
    transcript: String,
    history: Vec<ChatTurn>,
}

impl Session {
    /// Start a session for a freshly fetched transcript.
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            history: Vec::new(),
        }
    }

    /// The most recently fetched transcript.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// All turns in the order they were asked.
    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Swap in the transcript of another video. History is kept.
    pub fn replace_transcript(&mut self, transcript: impl Into<String>) {
        self.transcript = transcript.into();
    }

    /// Append a turn to the end of the history.
    pub fn record(&mut self, turn: ChatTurn) {
        self.history.push(turn);
    }
}
