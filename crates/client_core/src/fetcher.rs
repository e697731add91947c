use async_trait::async_trait;
use reqwest::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use shared::domain::Employee;
use tracing::{debug, warn};
use url::Url;

use crate::{
    auth::AuthProof,
    config::ClientSettings,
    error::{ConfigError, FetchError},
};

const JSON_MEDIA_TYPE: &str = "application/json";

/// One authenticated read of the employee collection. No retries, no caching.
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    async fn fetch(&self, proof: &AuthProof, endpoint: &Url) -> Result<Vec<Employee>, FetchError>;
}

pub struct HttpRecordFetcher {
    http: Client,
}

impl HttpRecordFetcher {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ConfigError> {
        let Some(timeout) = settings.request_timeout() else {
            return Ok(Self::new());
        };
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

impl Default for HttpRecordFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordFetcher for HttpRecordFetcher {
    async fn fetch(&self, proof: &AuthProof, endpoint: &Url) -> Result<Vec<Employee>, FetchError> {
        let response = self
            .http
            .get(endpoint.clone())
            .header(AUTHORIZATION, proof.header_value())
            .header(CONTENT_TYPE, JSON_MEDIA_TYPE)
            .header(ACCEPT, JSON_MEDIA_TYPE)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "employee fetch rejected");
            return Err(FetchError::Unauthorized {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let records = decode_records(&body)?;
        debug!(records = records.len(), "employee fetch succeeded");
        Ok(records)
    }
}

/// A body that is valid JSON but not an array of employees is still an error.
pub fn decode_records(body: &[u8]) -> Result<Vec<Employee>, FetchError> {
    serde_json::from_slice::<Vec<Employee>>(body)
        .map_err(|err| FetchError::MalformedResponse(err.to_string()))
}

#[cfg(test)]
#[path = "tests/fetcher_tests.rs"]
mod tests;
