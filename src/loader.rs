use std::future::Future;

use log::{debug, info};
use url::Url;

use crate::youtube::TranscriptClient;
use crate::{Document, Error, Result, SourceKind, extract_video_id, web};

/// Retrieves the textual content behind a URL
pub trait ContentLoader {
    fn load(&self, url: &Url, kind: SourceKind) -> impl Future<Output = Result<Vec<Document>>>;
}

/// Loader backed by the YouTube caption API and plain page scraping
#[derive(Debug, Clone)]
pub struct HttpLoader {
    client: reqwest::Client,
    transcripts: TranscriptClient,
}

impl HttpLoader {
    pub fn new(lang: impl Into<String>) -> Result<Self> {
        let client = web::create_client()?;
        let transcripts = TranscriptClient::new(client.clone(), lang);
        Ok(Self { client, transcripts })
    }

    pub fn with_youtube_base_url(mut self, url: impl Into<String>) -> Self {
        self.transcripts = self.transcripts.with_base_url(url);
        self
    }
}

impl ContentLoader for HttpLoader {
    async fn load(&self, url: &Url, kind: SourceKind) -> Result<Vec<Document>> {
        match kind {
            SourceKind::Video => {
                let video_id = extract_video_id(url)
                    .ok_or_else(|| Error::NoTranscript(format!("no video ID in {url}")))?;
                info!("Loading transcript for video {video_id}");
                let doc = self.transcripts.fetch(&video_id, url.as_str()).await?;
                Ok(vec![doc])
            }
            SourceKind::Generic => {
                info!("Loading web page {url}");
                let doc = web::fetch_page(&self.client, url.as_str()).await?;
                debug!("Page has readable text: {}", doc.is_some());
                Ok(doc.into_iter().collect())
            }
        }
    }
}

/// Join all non-blank document contents with blank-line separators
pub fn aggregate_text(docs: &[Document]) -> String {
    docs.iter()
        .filter(|d| !d.is_blank())
        .map(|d| d.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
