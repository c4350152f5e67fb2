//! vidchat CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vidchat::assistant::{AssistantHandler, AzureChatBackend, ChatBackend};
use vidchat::cli::input::StdinInput;
use vidchat::cli::{preflight, Cli, Controller, Output};
use vidchat::config::{Prompts, Settings};
use vidchat::transcript::{LlmPunctuator, TranscriptHandler, YoutubeTranscriptSource};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Variables from .env fill in whatever the environment leaves unset
    let env_file = or_fail(preflight::load_env_file(None));

    // Load configuration
    let settings = or_fail(Settings::load());

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| {
            format!("vidchat={}", settings.general.log_level)
        })))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Some(path) = env_file {
        debug!("Loaded environment from {}", path.display());
    }

    // Credentials must be present before any work starts
    let credentials = or_fail(preflight::check());

    let prompts = or_fail(Prompts::load(settings.prompts.custom_dir.as_deref()));
    let timeout = settings.assistant.timeout_seconds.map(Duration::from_secs);

    let chat: Arc<dyn ChatBackend> = Arc::new(or_fail(AzureChatBackend::new(
        &credentials,
        &settings.assistant.deployment,
        &settings.assistant.api_version,
        timeout,
    )));
    let punctuation_backend: Arc<dyn ChatBackend> = Arc::new(or_fail(AzureChatBackend::new(
        &credentials,
        settings
            .punctuation
            .deployment_or(&settings.assistant.deployment),
        &settings.assistant.api_version,
        timeout,
    )));

    let punctuator = LlmPunctuator::new(punctuation_backend, &prompts.punctuation)
        .with_max_words(settings.punctuation.max_words_per_request);
    let transcripts = TranscriptHandler::new(
        Arc::new(or_fail(YoutubeTranscriptSource::new())),
        Arc::new(punctuator),
    );
    let assistant = AssistantHandler::new(chat)
        .with_prompts(prompts.assistant)
        .with_temperature(settings.assistant.temperature);

    let input = or_fail(StdinInput::new());
    let mut controller = Controller::new(transcripts, assistant, input, std::io::stdout());

    if let Err(e) = controller.run(cli.video_url()).await {
        fail(&format!("Error: {}", e));
    }

    Ok(())
}

/// Unwrap a startup step, or report it through [`fail`].
fn or_fail<T>(result: vidchat::Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => fail(&e.to_string()),
    }
}

/// Print a short message and exit with status 1.
fn fail(message: &str) -> ! {
    Output::error(message);
    std::process::exit(1);
}
