use crate::model::{PageRequest, ScraperError};

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use tracing::info;

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, req: &PageRequest) -> Result<String, ScraperError>;
}

pub struct HttpFetcher {
    client: Client,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, req: &PageRequest) -> Result<String, ScraperError> {
        info!("GET {}", req.url);

        let mut builder = self.client.get(&req.url);
        if req.browser_agent {
            builder = builder.header(USER_AGENT, &self.user_agent);
        }

        let response = builder.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound(req.url.clone()));
        }
        if !status.is_success() {
            return Err(ScraperError::InvalidResponse(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
