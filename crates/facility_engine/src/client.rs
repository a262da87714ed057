use std::time::Duration;

use facility_logging::{facility_debug, facility_error};
use futures_util::StreamExt;
use serde_json::Value;
use url::Url;

use crate::envelope::unwrap_envelope;
use crate::{Endpoint, FailureKind, FetchError};

/// Default catalog host.
pub const DEFAULT_API_BASE: &str = "https://api.kidvik.com";

#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub api_base: String,
    /// `None` leaves connection setup unbounded.
    pub connect_timeout: Option<Duration>,
    /// `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout: None,
            request_timeout: None,
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Reads one endpoint and returns its unwrapped record list.
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Vec<Value>, FetchError>;
}

/// Runs a fetch and degrades any failure to an empty list after logging it.
pub async fn fetch_or_empty(client: &dyn CatalogClient, endpoint: &Endpoint) -> Vec<Value> {
    match client.fetch(endpoint).await {
        Ok(records) => {
            facility_debug!(
                "{} fetch returned {} records",
                endpoint.label(),
                records.len()
            );
            records
        }
        Err(err) => {
            facility_error!("{} fetch error: {}", endpoint.label(), err);
            Vec::new()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestCatalogClient {
    settings: CatalogSettings,
    base: Url,
    http: reqwest::Client,
}

impl ReqwestCatalogClient {
    pub fn new(settings: CatalogSettings) -> Result<Self, FetchError> {
        let base = parse_base(&settings.api_base)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            base,
            http,
        })
    }

    /// Full request URL: the base, the endpoint path and its query pairs.
    pub fn endpoint_url(&self, endpoint: &Endpoint) -> Result<Url, FetchError> {
        let joined = format!(
            "{}{}",
            self.base.as_str().trim_end_matches('/'),
            endpoint.path()
        );
        let mut url = Url::parse(&joined)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let query = endpoint.query();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

#[async_trait::async_trait]
impl CatalogClient for ReqwestCatalogClient {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Vec<Value>, FetchError> {
        let url = self.endpoint_url(endpoint)?;
        facility_debug!("GET {}", url);

        let response = self.http.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        let body: Value = serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
        Ok(unwrap_envelope(body))
    }
}

fn parse_base(api_base: &str) -> Result<Url, FetchError> {
    let url = Url::parse(api_base.trim())
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(FetchError::new(
            FailureKind::InvalidUrl,
            format!("unsupported scheme {}", url.scheme()),
        ));
    }
    Ok(url)
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
