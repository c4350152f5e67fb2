//! Line-based terminal input with Ctrl+C awareness.

use crate::error::Result;
use async_trait::async_trait;
use console::style;
use std::future::Future;
use std::io::{BufRead, Write};
use tokio::sync::mpsc;

/// What the user did at a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// A line of text, without the trailing newline.
    Line(String),
    /// Ctrl+C was pressed.
    Interrupted,
    /// Input was closed (EOF).
    Closed,
}

/// Trait for prompt-and-read sources.
#[async_trait]
pub trait LineInput: Send {
    /// Show `prompt` and wait for one line.
    async fn read_line(&mut self, prompt: &str) -> Result<UserInput>;
}

/// Interactive input from stdin.
///
/// Lines are read on a dedicated thread and handed over through a channel.
/// A read that is still blocked when the controller finishes belongs to that
/// thread, so it never holds up runtime shutdown.
pub struct StdinInput {
    lines: mpsc::Receiver<std::io::Result<String>>,
}

impl StdinInput {
    pub fn new() -> Result<Self> {
        Self::from_reader(std::io::BufReader::new(std::io::stdin()))
    }

    /// Read lines from `reader` instead of stdin.
    pub fn from_reader<R>(reader: R) -> Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(1);

        std::thread::Builder::new()
            .name("stdin-reader".to_string())
            .spawn(move || {
                for line in reader.lines() {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
            })?;

        Ok(Self { lines: rx })
    }
}

#[async_trait]
impl LineInput for StdinInput {
    async fn read_line(&mut self, prompt: &str) -> Result<UserInput> {
        print!("{} ", style(prompt).yellow());
        std::io::stdout().flush()?;

        match until_interrupted(self.lines.recv()).await {
            Some(Some(Ok(line))) => Ok(UserInput::Line(line)),
            Some(Some(Err(e))) => Err(e.into()),
            Some(None) => Ok(UserInput::Closed),
            None => {
                println!();
                Ok(UserInput::Interrupted)
            }
        }
    }
}

/// Run `fut` to completion unless Ctrl+C arrives first.
///
/// Returns `None` on interrupt. If the signal handler cannot be installed the
/// future always runs to completion.
pub async fn until_interrupted<F: Future>(fut: F) -> Option<F::Output> {
    tokio::select! {
        output = fut => Some(output),
        _ = interrupt_signal() => None,
    }
}

async fn interrupt_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;

    /// Input that replays a fixed script, then reports EOF.
    pub struct ScriptedInput {
        script: VecDeque<UserInput>,
        pub prompts: Vec<String>,
    }

    impl ScriptedInput {
        pub fn new(lines: &[&str]) -> Self {
            Self {
                script: lines.iter().map(|l| UserInput::Line(l.to_string())).collect(),
                prompts: Vec::new(),
            }
        }

        pub fn then(mut self, input: UserInput) -> Self {
            self.script.push_back(input);
            self
        }

        pub fn line(self, line: &str) -> Self {
            self.then(UserInput::Line(line.to_string()))
        }
    }

    #[async_trait]
    impl LineInput for ScriptedInput {
        async fn read_line(&mut self, prompt: &str) -> Result<UserInput> {
            self.prompts.push(prompt.to_string());
            Ok(self.script.pop_front().unwrap_or(UserInput::Closed))
        }
    }
}
