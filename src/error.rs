use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single summarization run
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    InvalidInput(String),

    #[error("no Groq API key found (set GROQ_API_KEY, add groq_api_key to the config file, or enter an override)")]
    MissingCredential,

    #[error("YouTube blocked transcript access: {0}")]
    TranscriptBlocked(String),

    #[error("no transcript found: {0}")]
    NoTranscript(String),

    #[error("no readable content found on this webpage: {0}")]
    NoReadableContent(String),

    #[error("retrieved content is empty")]
    EmptyContent,

    #[error("failed to split content into chunks")]
    SplitFailure,

    #[error("invalid chunker settings: {0}")]
    ChunkerConfig(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// User-facing classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    MissingCredential,
    TranscriptBlocked,
    NoTranscript,
    NoReadableContent,
    EmptyContent,
    SplitFailure,
    Unclassified,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_) | Error::ChunkerConfig(_) => ErrorKind::InvalidInput,
            Error::MissingCredential => ErrorKind::MissingCredential,
            Error::TranscriptBlocked(_) => ErrorKind::TranscriptBlocked,
            Error::NoTranscript(_) => ErrorKind::NoTranscript,
            Error::NoReadableContent(_) => ErrorKind::NoReadableContent,
            Error::EmptyContent => ErrorKind::EmptyContent,
            Error::SplitFailure => ErrorKind::SplitFailure,
            Error::Http(_) | Error::Api { .. } | Error::MalformedResponse(_) => ErrorKind::Unclassified,
        }
    }
}

impl ErrorKind {
    /// Remediation text shown under the error message, if any
    pub fn guidance(&self) -> Option<&'static str> {
        match self {
            ErrorKind::TranscriptBlocked => Some(
                "YouTube often blocks transcript requests from hosted servers.\n\n\
                 You can:\n\
                 • Try another YouTube video\n\
                 • Use a website URL\n\
                 • Run from a local machine or another network",
            ),
            ErrorKind::NoTranscript => Some(
                "This YouTube video does not have English captions enabled. \
                 Please try another video with subtitles.",
            ),
            ErrorKind::NoReadableContent => {
                Some("This website may block scraping or render its content dynamically.")
            }
            ErrorKind::MissingCredential => {
                Some("Export GROQ_API_KEY or add `groq_api_key = \"...\"` to the config file.")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unclassified_kinds() {
        let api = Error::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(api.kind(), ErrorKind::Unclassified);
        assert_eq!(Error::MalformedResponse("x".into()).kind(), ErrorKind::Unclassified);
    }

    #[test]
    fn test_guidance_for_known_kinds() {
        assert!(ErrorKind::TranscriptBlocked.guidance().unwrap().contains("website URL"));
        assert!(ErrorKind::NoTranscript.guidance().is_some());
        assert!(ErrorKind::NoReadableContent.guidance().is_some());
        assert!(ErrorKind::Unclassified.guidance().is_none());
        assert!(ErrorKind::InvalidInput.guidance().is_none());
    }
}
