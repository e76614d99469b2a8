use std::sync::{Arc, Mutex};

use urlsum::{Error, Result, Summarizer};

#[derive(Clone, Default)]
pub struct MockSummarizer {
    pub calls: Arc<Mutex<Vec<String>>>,
    /// 1-based call number that fails
    pub fail_on: Option<usize>,
}

impl MockSummarizer {
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on: Some(call),
            ..Self::default()
        }
    }
}

impl Summarizer for MockSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(text.to_string());
        let n = calls.len();
        if self.fail_on == Some(n) {
            return Err(Error::Api {
                status: 503,
                message: "model overloaded".to_string(),
            });
        }
        Ok(format!("summary {n} ({} chars)", text.chars().count()))
    }
}
