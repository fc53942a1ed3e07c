use crate::model::{PageRequest, ScraperError};
use crate::scraper::Fetcher;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned pages by URL and remembers what was asked for.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    pub requests: Mutex<Vec<PageRequest>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, req: &PageRequest) -> Result<String, ScraperError> {
        self.requests.lock().unwrap().push(req.clone());
        self.pages
            .get(&req.url)
            .cloned()
            .ok_or_else(|| ScraperError::NotFound(req.url.clone()))
    }
}
