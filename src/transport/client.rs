//! HTTP client for the `/entries` API, used by the form/list controller.

use crate::domain::entry::{Entry, EntryFields};
use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("no entry found for srno {0}")]
    NotFound(i32),
    #[error("server responded {status}: {body}")]
    Status { status: u16, body: String },
}

/// The four operations the controller needs from the API service.
#[async_trait]
pub trait EntryApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Entry>, ApiError>;
    async fn create(&self, entry: &Entry) -> Result<(), ApiError>;
    async fn update(&self, srno: i32, fields: &EntryFields) -> Result<(), ApiError>;
    async fn delete(&self, srno: i32) -> Result<(), ApiError>;
}

#[derive(Clone)]
pub struct HttpEntryApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpEntryApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn entries_url(&self) -> String {
        format!("{}/entries", self.base_url)
    }

    fn entry_url(&self, srno: i32) -> String {
        format!("{}/entries/{}", self.base_url, srno)
    }
}

async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl EntryApi for HttpEntryApi {
    async fn list(&self) -> Result<Vec<Entry>, ApiError> {
        let response = self.client.get(self.entries_url()).send().await?;
        let entries = expect_success(response).await?.json::<Vec<Entry>>().await?;
        Ok(entries)
    }

    async fn create(&self, entry: &Entry) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.entries_url())
            .json(entry)
            .send()
            .await?;
        expect_success(response).await?;
        Ok(())
    }

    async fn update(&self, srno: i32, fields: &EntryFields) -> Result<(), ApiError> {
        let response = self
            .client
            .put(self.entry_url(srno))
            .json(fields)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(srno));
        }
        expect_success(response).await?;
        Ok(())
    }

    async fn delete(&self, srno: i32) -> Result<(), ApiError> {
        let response = self.client.delete(self.entry_url(srno)).send().await?;
        expect_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_ignore_trailing_slash() {
        let api = HttpEntryApi::new("http://localhost:3000/");
        assert_eq!(api.base_url(), "http://localhost:3000");
        assert_eq!(api.entries_url(), "http://localhost:3000/entries");
        assert_eq!(api.entry_url(12), "http://localhost:3000/entries/12");
    }
}
