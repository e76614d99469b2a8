use std::sync::{Arc, Mutex};

use url::Url;
use urlsum::{ContentLoader, Document, Error, Result, SourceKind};

#[derive(Clone)]
pub struct MockLoader {
    pub docs: Vec<Document>,
    pub calls: Arc<Mutex<Vec<(String, SourceKind)>>>,
    pub fail_with: Option<fn() -> Error>,
}

impl MockLoader {
    pub fn with_text(text: &str) -> Self {
        Self::with_docs(vec![Document::new("https://example.com/", text)])
    }

    pub fn with_docs(docs: Vec<Document>) -> Self {
        Self {
            docs,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(err: fn() -> Error) -> Self {
        Self {
            docs: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(err),
        }
    }
}

impl ContentLoader for MockLoader {
    async fn load(&self, url: &Url, kind: SourceKind) -> Result<Vec<Document>> {
        self.calls.lock().unwrap().push((url.to_string(), kind));
        if let Some(err) = self.fail_with {
            return Err(err());
        }
        Ok(self.docs.clone())
    }
}
