//! Interactive menu loop.
//!
//! The [`Controller`] owns the [`Session`] and moves through a small state
//! machine:
//!
//! ```text
//! AwaitingVideo --transcript loaded--> MenuIdle <--> InChat
//!       |                                 |
//!       +------ interrupt / EOF ------> Finished
//! ```
//!
//! Ctrl+C inside the chat sub-loop returns to the menu; anywhere else it ends
//! the session.

use super::input::{until_interrupted, LineInput, UserInput};
use super::menu::MenuAction;
use super::Output;
use crate::assistant::AssistantHandler;
use crate::error::{Result, VidchatError};
use crate::session::{ChatTurn, Session};
use crate::transcript::{extract_video_id, TranscriptHandler};
use console::style;
use std::future::Future;
use std::io::Write;
use tracing::{debug, info, warn};

const URL_PROMPT: &str = "Please enter the YouTube video URL:";
const MENU_PROMPT: &str = "Choose an option:";
const CHAT_PROMPT: &str = "Enter your question (or type 'exit' or CTRL+C to go back):";

#[derive(Debug)]
enum State {
    AwaitingVideo(Option<String>),
    MenuIdle,
    InChat,
    Finished,
}

/// Drives one interactive session from first URL to exit.
pub struct Controller<I, W> {
    transcripts: TranscriptHandler,
    assistant: AssistantHandler,
    session: Session,
    input: I,
    out: W,
}

impl<I: LineInput, W: Write> Controller<I, W> {
    pub fn new(transcripts: TranscriptHandler, assistant: AssistantHandler, input: I, out: W) -> Self {
        Self {
            transcripts,
            assistant,
            session: Session::default(),
            input,
            out,
        }
    }

    /// Current session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Where menu text and answers are written.
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Run until the user exits.
    ///
    /// Fails only if the first transcript cannot be loaded or the terminal
    /// itself fails; errors from menu actions are reported and the menu
    /// continues.
    pub async fn run(&mut self, initial_url: Option<String>) -> Result<()> {
        let mut state = State::AwaitingVideo(initial_url);

        loop {
            debug!("Controller state: {:?}", state);
            state = match state {
                State::AwaitingVideo(url) => self.await_video(url).await?,
                State::MenuIdle => self.menu_step().await?,
                State::InChat => {
                    self.chat_loop().await?;
                    State::MenuIdle
                }
                State::Finished => break,
            };
        }

        writeln!(self.out, "{}", style("Exiting...").red())?;
        Ok(())
    }

    async fn await_video(&mut self, url: Option<String>) -> Result<State> {
        let url = match url {
            Some(url) => url,
            None => match self.input.read_line(URL_PROMPT).await? {
                UserInput::Line(line) => line,
                UserInput::Interrupted | UserInput::Closed => return Ok(State::Finished),
            },
        };

        match until_interrupted(self.load_transcript(&url)).await {
            Some(transcript) => {
                self.session.replace_transcript(transcript?);
                Ok(State::MenuIdle)
            }
            None => Ok(State::Finished),
        }
    }

    /// Extract, fetch and punctuate the transcript behind `url`.
    async fn load_transcript(&self, url: &str) -> Result<String> {
        let video_id = extract_video_id(url)
            .ok_or_else(|| VidchatError::InvalidUrl(url.trim().to_string()))?;
        info!("Loading transcript for video {}", video_id);

        let raw = with_spinner(
            "Fetching transcript...",
            "Transcript fetched.",
            self.transcripts.fetch_transcript(&video_id),
        )
        .await?;

        let text = with_spinner(
            "Adding punctuation...",
            "Punctuation added.",
            self.transcripts.restore_punctuation(&raw),
        )
        .await?;

        if text.is_empty() {
            Output::warning("The transcript is empty; the assistant will have nothing to work with.");
        }
        Ok(text)
    }

    async fn menu_step(&mut self) -> Result<State> {
        self.render_menu()?;

        let choice = match self.input.read_line(MENU_PROMPT).await? {
            UserInput::Line(line) => line,
            UserInput::Interrupted | UserInput::Closed => return Ok(State::Finished),
        };

        match MenuAction::from_choice(&choice) {
            Some(action) => self.dispatch(action).await,
            None => {
                writeln!(self.out, "{}", style("Invalid choice. Please try again.").red())?;
                Ok(State::MenuIdle)
            }
        }
    }

    fn render_menu(&mut self) -> Result<()> {
        writeln!(self.out, "\n{}", style("Menu:").cyan())?;
        for action in MenuAction::ALL {
            writeln!(
                self.out,
                "{}",
                style(format!("{}. {}", action.key(), action.label())).cyan()
            )?;
        }
        Ok(())
    }

    async fn dispatch(&mut self, action: MenuAction) -> Result<State> {
        match action {
            MenuAction::PrintTranscript => {
                writeln!(self.out, "\n{}", style("Punctuated Transcript:").green())?;
                writeln!(self.out, "{}", self.session.transcript())?;
                Ok(State::MenuIdle)
            }
            MenuAction::Ask(canned) => match until_interrupted(self.ask(canned.question())).await {
                Some(Ok(answer)) => {
                    writeln!(self.out, "{}", answer)?;
                    Ok(State::MenuIdle)
                }
                Some(Err(e)) => {
                    report(&e);
                    Ok(State::MenuIdle)
                }
                None => Ok(State::Finished),
            },
            MenuAction::Chat => Ok(State::InChat),
            MenuAction::ChangeVideo => self.change_video().await,
            MenuAction::Exit => Ok(State::Finished),
        }
    }

    async fn change_video(&mut self) -> Result<State> {
        let url = match self.input.read_line(URL_PROMPT).await? {
            UserInput::Line(line) => line,
            UserInput::Interrupted | UserInput::Closed => return Ok(State::Finished),
        };

        match until_interrupted(self.load_transcript(&url)).await {
            Some(Ok(transcript)) => {
                self.session.replace_transcript(transcript);
                Ok(State::MenuIdle)
            }
            Some(Err(e)) => {
                warn!("Keeping previous transcript: {}", e);
                report(&e);
                Ok(State::MenuIdle)
            }
            None => Ok(State::Finished),
        }
    }

    async fn chat_loop(&mut self) -> Result<()> {
        loop {
            let line = match self.input.read_line(CHAT_PROMPT).await? {
                UserInput::Line(line) => line,
                UserInput::Interrupted => return self.chat_interrupted(),
                UserInput::Closed => return Ok(()),
            };

            let question = line.trim();
            if question.is_empty() {
                continue;
            }
            if question.eq_ignore_ascii_case("exit") {
                return Ok(());
            }

            match until_interrupted(self.ask(question)).await {
                Some(Ok(answer)) => {
                    writeln!(self.out, "\n{}\n{}", style("Answer:").green(), answer)?;
                }
                Some(Err(e)) => report(&e),
                None => return self.chat_interrupted(),
            }
        }
    }

    fn chat_interrupted(&mut self) -> Result<()> {
        writeln!(
            self.out,
            "{}",
            style("Chat interrupted. Returning to menu...").red()
        )?;
        Ok(())
    }

    /// Ask about the current transcript and record the turn.
    async fn ask(&mut self, question: &str) -> Result<String> {
        let prompt = self.assistant.build_prompt(
            self.session.transcript(),
            question,
            self.session.history(),
        );

        let answer = with_spinner("Asking AI...", "AI Answer:", self.assistant.ask(&prompt)).await?;

        self.session.record(ChatTurn::new(question, answer.clone()));
        Ok(answer)
    }
}

/// Show a spinner while `fut` runs, then a success marker if it succeeded.
async fn with_spinner<T, F>(message: &str, done: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let spinner = Output::spinner(message);
    let result = fut.await;
    match &result {
        Ok(_) => Output::succeed(spinner, done),
        Err(_) => spinner.finish_and_clear(),
    }
    result
}

fn report(error: &VidchatError) {
    debug!("Action failed: {:?}", error);
    Output::error(&format!("Error: {}", error));
}
