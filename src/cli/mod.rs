//! CLI module for vidchat.

pub mod controller;
pub mod input;
pub mod menu;
mod output;
pub mod preflight;

pub use controller::Controller;
pub use output::Output;

use clap::Parser;

/// vidchat - Chat with a YouTube video
///
/// Fetches the English transcript of a video, restores punctuation, and
/// answers questions about it with an Azure OpenAI deployment.
#[derive(Parser, Debug)]
#[command(name = "vidchat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// YouTube video URL (prompted for if omitted)
    #[arg(value_name = "URL", conflicts_with = "url_flag")]
    pub url: Option<String>,

    /// YouTube video URL
    #[arg(long = "url", value_name = "URL")]
    pub url_flag: Option<String>,
}

impl Cli {
    /// The video URL, whichever way it was given.
    pub fn video_url(&self) -> Option<String> {
        self.url
            .clone()
            .or_else(|| self.url_flag.clone())
            .filter(|u| !u.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_url() {
        let cli = Cli::try_parse_from(["vidchat", "https://youtu.be/XYZ987"]).unwrap();
        assert_eq!(cli.video_url().as_deref(), Some("https://youtu.be/XYZ987"));
    }

    #[test]
    fn test_url_flag() {
        let cli = Cli::try_parse_from(["vidchat", "--url", "https://youtu.be/XYZ987"]).unwrap();
        assert_eq!(cli.video_url().as_deref(), Some("https://youtu.be/XYZ987"));
    }

    #[test]
    fn test_no_url() {
        let cli = Cli::try_parse_from(["vidchat"]).unwrap();
        assert_eq!(cli.video_url(), None);
    }

    #[test]
    fn test_both_forms_conflict() {
        assert!(Cli::try_parse_from(["vidchat", "a", "--url", "b"]).is_err());
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["vidchat", "--model", "x"]).is_err());
    }
}
