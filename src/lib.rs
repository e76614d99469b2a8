pub mod chunk;
pub mod config;
pub mod error;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod summarize;
pub mod validate;
pub mod web;
pub mod youtube;

use serde::Serialize;
use url::Url;

pub use chunk::Chunker;
pub use error::{Error, ErrorKind, Result};
pub use loader::{ContentLoader, HttpLoader, aggregate_text};
pub use pipeline::{Pipeline, Report, Reporter, RunState, Warning};
pub use summarize::{GroqClient, Summarizer};

/// A unit of retrieved text: one transcript or one fetched page
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub source: String,
    pub title: Option<String>,
    pub content: String,
}

impl Document {
    pub fn new(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            title: None,
            content: content.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Where the content of a URL comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceKind {
    Video,
    Generic,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Video => write!(f, "video"),
            SourceKind::Generic => write!(f, "website"),
        }
    }
}

pub fn is_youtube_host(host: &str) -> bool {
    let h = host.to_ascii_lowercase();
    h == "youtube.com" || h == "youtu.be" || h.ends_with(".youtube.com")
}

/// Classify a validated URL by its host
pub fn classify(url: &Url) -> SourceKind {
    match url.host_str() {
        Some(host) if is_youtube_host(host) => SourceKind::Video,
        _ => SourceKind::Generic,
    }
}

/// Extract the video ID from the supported YouTube URL shapes
pub fn extract_video_id(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_ascii_lowercase();
    if !is_youtube_host(&host) {
        return None;
    }

    // youtu.be/ID
    if host == "youtu.be" {
        return url
            .path_segments()?
            .next()
            .map(str::trim)
            .filter(|s| is_video_id(s))
            .map(str::to_string);
    }

    // youtube.com/watch?v=ID
    if url.path().starts_with("/watch") {
        return url
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| is_video_id(v));
    }

    // youtube.com/{shorts,embed,live}/ID
    let mut segments = url.path_segments()?;
    match (segments.next(), segments.next()) {
        (Some("shorts" | "embed" | "live"), Some(id)) if is_video_id(id) => Some(id.to_string()),
        _ => None,
    }
}

fn is_video_id(s: &str) -> bool {
    s.len() == 11 && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
