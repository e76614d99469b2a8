use log::{info, warn};
use serde::Serialize;
use url::Url;

use crate::validate::validate_url;
use crate::{Chunker, ContentLoader, Error, Result, SourceKind, Summarizer, aggregate_text, classify};

pub const DEFAULT_MAX_CHUNKS: usize = 5;
pub const DEFAULT_WARN_CHUNK_THRESHOLD: usize = 20;

/// Stage of a single summarization run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Validating,
    Fetching,
    Splitting,
    Summarizing,
    Done,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// More chunks than the warning threshold; only `processed` get summarized
    VeryLong { total: usize, processed: usize },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::VeryLong { total, processed } => write!(
                f,
                "Content is very long ({total} chunks). Only the first {processed} are summarized."
            ),
        }
    }
}

/// Receives progress of a run as it happens
pub trait Reporter {
    fn state(&mut self, state: RunState);

    fn warning(&mut self, warning: &Warning);

    fn chunk(&mut self, _index: usize, _of: usize) {}
}

/// Result of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub source: String,
    pub kind: SourceKind,
    /// Title of the first loaded document that carries one
    pub title: Option<String>,
    pub total_chunks: usize,
    pub summaries: Vec<String>,
    pub output: String,
}

impl Report {
    pub fn truncated(&self) -> bool {
        self.total_chunks > self.summaries.len()
    }
}

/// Validate → fetch → split → summarize, one URL per run
pub struct Pipeline<L: ContentLoader, S: Summarizer> {
    loader: L,
    summarizer: S,
    chunker: Chunker,
    max_chunks: usize,
    warn_chunk_threshold: usize,
}

impl<L: ContentLoader, S: Summarizer> Pipeline<L, S> {
    pub fn new(loader: L, summarizer: S) -> Self {
        Self {
            loader,
            summarizer,
            chunker: Chunker::default(),
            max_chunks: DEFAULT_MAX_CHUNKS,
            warn_chunk_threshold: DEFAULT_WARN_CHUNK_THRESHOLD,
        }
    }

    pub fn with_chunker(mut self, chunker: Chunker) -> Self {
        self.chunker = chunker;
        self
    }

    pub fn with_max_chunks(mut self, max_chunks: usize) -> Self {
        self.max_chunks = max_chunks.max(1);
        self
    }

    pub fn with_warn_threshold(mut self, threshold: usize) -> Self {
        self.warn_chunk_threshold = threshold;
        self
    }

    /// Run once for `input`; every failure ends the run in `Failed` without partial output
    pub async fn run<R: Reporter>(&self, input: &str, reporter: &mut R) -> Result<Report> {
        reporter.state(RunState::Idle);
        let result = self.execute(input, reporter).await;
        match &result {
            Ok(report) => {
                info!("Run finished: {} of {} chunks summarized", report.summaries.len(), report.total_chunks);
                reporter.state(RunState::Done);
            }
            Err(e) => {
                warn!("Run failed ({:?}): {e}", e.kind());
                reporter.state(RunState::Failed);
            }
        }
        result
    }

    async fn execute<R: Reporter>(&self, input: &str, reporter: &mut R) -> Result<Report> {
        reporter.state(RunState::Validating);
        let url = validate_url(input)?;
        let kind = classify(&url);
        info!("Summarizing {kind} {url}");

        reporter.state(RunState::Fetching);
        let (title, text) = self.fetch_text(&url, kind).await?;

        reporter.state(RunState::Splitting);
        let chunks = match self.chunker.split(&text) {
            Ok(chunks) if chunks.is_empty() => return Err(Error::SplitFailure),
            other => other?,
        };
        let total_chunks = chunks.len();
        let processed = total_chunks.min(self.max_chunks);

        if total_chunks > self.warn_chunk_threshold {
            reporter.warning(&Warning::VeryLong {
                total: total_chunks,
                processed,
            });
        }

        reporter.state(RunState::Summarizing);
        let mut summaries = Vec::with_capacity(processed);
        for (i, chunk) in chunks.iter().take(processed).enumerate() {
            reporter.chunk(i + 1, processed);
            summaries.push(self.summarizer.summarize(chunk).await?);
        }

        Ok(Report {
            source: url.to_string(),
            kind,
            title,
            total_chunks,
            output: summaries.join("\n\n"),
            summaries,
        })
    }

    async fn fetch_text(&self, url: &Url, kind: SourceKind) -> Result<(Option<String>, String)> {
        let docs = self.loader.load(url, kind).await?;
        let text = aggregate_text(&docs);
        if !text.trim().is_empty() {
            let title = docs
                .iter()
                .filter(|d| !d.is_blank())
                .find_map(|d| d.title.clone());
            return Ok((title, text));
        }

        Err(match kind {
            SourceKind::Video => Error::NoTranscript("the transcript is empty".to_string()),
            SourceKind::Generic if docs.is_empty() => Error::NoReadableContent("the page returned nothing".to_string()),
            SourceKind::Generic => Error::NoReadableContent("the page contains no text".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_wording_counts_chunks() {
        let w = Warning::VeryLong {
            total: 30,
            processed: 5,
        };
        assert_eq!(w.to_string(), "Content is very long (30 chunks). Only the first 5 are summarized.");
    }

    #[test]
    fn test_report_truncated() {
        let report = Report {
            source: "https://example.com/".into(),
            kind: SourceKind::Generic,
            title: None,
            total_chunks: 7,
            summaries: vec!["a".into(); 5],
            output: String::new(),
        };
        assert!(report.truncated());
    }
}
