//! YouTube URLs and caption retrieval.

use super::{CaptionEntry, TranscriptSource};
use crate::error::{Result, VidchatError};
use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, instrument};
use url::Url;
use yt_transcript_rs::api::YouTubeTranscriptApi;
use yt_transcript_rs::errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason as Reason};

/// Extract the video ID from a `www.youtube.com/watch?v=` or `youtu.be/` URL.
///
/// Any other host or shape yields `None`.
pub fn extract_video_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;

    let id = match parsed.host_str()? {
        "www.youtube.com" => parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned()),
        "youtu.be" => parsed
            .path_segments()
            .and_then(|mut segments| segments.next())
            .map(str::to_string),
        _ => None,
    }?;

    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// Whether `id` has the shape of a YouTube video ID.
pub fn is_valid_video_id(id: &str) -> bool {
    static VIDEO_ID: OnceLock<Regex> = OnceLock::new();
    VIDEO_ID
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("Invalid regex"))
        .is_match(id)
}

/// Caption source backed by YouTube's public transcript endpoints.
pub struct YoutubeTranscriptSource {
    api: YouTubeTranscriptApi,
}

impl YoutubeTranscriptSource {
    pub fn new() -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            VidchatError::TranscriptUnavailable(format!("Failed to initialise transcript client: {}", e))
        })?;
        Ok(Self { api })
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    #[instrument(skip(self))]
    async fn fetch_entries(&self, video_id: &str, language: &str) -> Result<Vec<CaptionEntry>> {
        if !is_valid_video_id(video_id) {
            return Err(VidchatError::InvalidIdentifier(video_id.to_string()));
        }

        let transcript = self
            .api
            .fetch_transcript(video_id, &[language], false)
            .await
            .map_err(|e| classify_fetch_error(&e))?;

        debug!(
            "Fetched {} caption entries ({})",
            transcript.snippets.len(),
            transcript.language_code
        );

        Ok(transcript
            .snippets
            .into_iter()
            .map(|snippet| CaptionEntry {
                text: snippet.text,
                start: snippet.start,
                duration: snippet.duration,
            })
            .collect())
    }
}

/// Map a transcript client failure onto the error taxonomy.
///
/// Missing, removed or unplayable videos are identifier problems; everything
/// else means the captions could not be obtained. Messages stay one line; the
/// client's full explanation goes to the debug log.
fn classify_fetch_error(error: &CouldNotRetrieveTranscript) -> VidchatError {
    debug!("Transcript client error: {}", error);
    let video_id = &error.video_id;

    let Some(reason) = &error.reason else {
        return VidchatError::TranscriptUnavailable(format!("{}: unknown failure", video_id));
    };

    let cause = match reason {
        Reason::VideoUnavailable => {
            return VidchatError::InvalidIdentifier(format!("{}: the video is no longer available", video_id))
        }
        Reason::InvalidVideoId => return VidchatError::InvalidIdentifier(video_id.clone()),
        Reason::VideoUnplayable { reason, .. } => {
            return VidchatError::InvalidIdentifier(match reason {
                Some(reason) => format!("{}: the video is unplayable ({})", video_id, reason),
                None => format!("{}: the video is unplayable", video_id),
            })
        }
        Reason::TranscriptsDisabled => "subtitles are disabled for this video",
        Reason::NoTranscriptFound { .. } => "no English captions",
        Reason::AgeRestricted => "the video is age-restricted",
        Reason::IpBlocked(_) => "YouTube is blocking requests from this IP address",
        Reason::RequestBlocked(_) => "YouTube blocked the request",
        Reason::FailedToCreateConsentCookie => "could not accept YouTube's consent page",
        Reason::YouTubeRequestFailed(_) => "the request to YouTube failed",
        Reason::YouTubeDataUnparsable(_) => "YouTube returned data that could not be read",
        Reason::TranslationUnavailable(_) | Reason::TranslationLanguageUnavailable(_) => {
            "no translation available"
        }
    };

    VidchatError::TranscriptUnavailable(format!("{}: {}", video_id, cause))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=ABC123"),
            Some("ABC123".to_string())
        );
        assert_eq!(
            extract_video_id("https://youtu.be/XYZ987"),
            Some("XYZ987".to_string())
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?list=PL1&v=dQw4w9WgXcQ&t=42s"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ?feature=shared"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_extract_video_id_rejects_other_shapes() {
        assert_eq!(extract_video_id("https://vimeo.com/123456"), None);
        assert_eq!(extract_video_id("https://youtube.com/watch?v=ABC123"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/playlist?list=PL1"), None);
        assert_eq!(extract_video_id("https://youtu.be/"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v="), None);
        assert_eq!(extract_video_id("dQw4w9WgXcQ"), None);
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn test_extract_video_id_is_deterministic() {
        let url = "https://www.youtube.com/watch?v=ABC123";
        let first = extract_video_id(url);
        for _ in 0..3 {
            assert_eq!(extract_video_id(url), first);
        }
    }

    #[test]
    fn test_is_valid_video_id() {
        assert!(is_valid_video_id("dQw4w9WgXcQ"));
        assert!(is_valid_video_id("5_EJwYeQusM"));
        assert!(!is_valid_video_id("ABC123"));
        assert!(!is_valid_video_id("dQw4w9WgXcQ/extra"));
        assert!(!is_valid_video_id(""));
    }

    fn failure(reason: Option<Reason>) -> CouldNotRetrieveTranscript {
        CouldNotRetrieveTranscript {
            video_id: "dQw4w9WgXcQ".to_string(),
            reason,
        }
    }

    #[test]
    fn test_classify_fetch_error_bad_videos() {
        for reason in [
            Reason::VideoUnavailable,
            Reason::InvalidVideoId,
            Reason::VideoUnplayable {
                reason: Some("This video is private".to_string()),
                sub_reasons: vec!["Sign in".to_string()],
            },
        ] {
            assert!(matches!(
                classify_fetch_error(&failure(Some(reason))),
                VidchatError::InvalidIdentifier(_)
            ));
        }
    }

    #[test]
    fn test_classify_fetch_error_missing_captions() {
        assert!(matches!(
            classify_fetch_error(&failure(Some(Reason::TranscriptsDisabled))),
            VidchatError::TranscriptUnavailable(_)
        ));
        assert!(matches!(
            classify_fetch_error(&failure(None)),
            VidchatError::TranscriptUnavailable(_)
        ));
    }

    #[test]
    fn test_classify_fetch_error_transport_failure_is_not_a_bad_id() {
        let err = classify_fetch_error(&failure(Some(Reason::YouTubeRequestFailed(
            "HTTP status server error (503 Service Unavailable) for url (https://www.youtube.com/watch?v=dQw4w9WgXcQ)"
                .to_string(),
        ))));

        assert!(matches!(err, VidchatError::TranscriptUnavailable(_)));
        assert!(!err.to_string().contains("503"));
    }

    #[test]
    fn test_classify_fetch_error_keeps_message_short() {
        for reason in [Reason::IpBlocked(None), Reason::RequestBlocked(None)] {
            let message = classify_fetch_error(&failure(Some(reason))).to_string();
            assert!(!message.contains('\n'));
            assert!(message.starts_with("Transcript unavailable: dQw4w9WgXcQ: "));
        }
    }

    #[tokio::test]
    async fn test_malformed_id_is_rejected_before_any_request() {
        let source = YoutubeTranscriptSource::new().unwrap();

        let err = source.fetch_entries("ABC123", "en").await.unwrap_err();

        assert!(matches!(err, VidchatError::InvalidIdentifier(ref id) if id == "ABC123"));
    }
}
