//! Thin async client over the HubSpot CRM v3 REST API.
//!
//! Every method issues one request (notes: search then fetch) and hands back the
//! parsed payload. Non-success statuses become [`HubSpotError::Status`]; nothing
//! is retried.

pub mod contacts;
pub mod deals;
pub mod models;
pub mod notes;
pub mod owners;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};
use url::Url;

use crate::config::HubSpotConfig;

pub use deals::DealFilter;
pub use models::{CrmObject, Owner, PinnedNote, SearchRequest, SearchResponse};

/// Result cap applied to every search. There is no pagination loop.
pub const SEARCH_LIMIT: u32 = 100;

#[derive(Debug, Error)]
pub enum HubSpotError {
    #[error("Invalid HubSpot base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("HubSpot returned {status} for {endpoint}")]
    Status {
        status: StatusCode,
        endpoint: String,
        body: String,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl HubSpotError {
    /// Upstream status, when HubSpot answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HubSpotError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HubSpotClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl HubSpotClient {
    pub fn new(config: &HubSpotConfig) -> Result<Self, HubSpotError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| HubSpotError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(HubSpotError::InvalidBaseUrl(config.base_url.clone()));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            token: config.token.clone(),
        })
    }

    /// Append path segments to the base URL. Segments are percent-encoded, so
    /// caller-supplied ids cannot escape their position in the path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, HubSpotError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| HubSpotError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    async fn get<T, Q>(&self, segments: &[&str], query: &Q) -> Result<T, HubSpotError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        debug!("HubSpot GET {}", url.path());
        let request = self.request(Method::GET, url.clone()).query(query);
        Self::send(request, url).await
    }

    async fn search<T>(&self, object_type: &str, body: &SearchRequest) -> Result<SearchResponse<T>, HubSpotError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(&["crm", "v3", "objects", object_type, "search"])?;
        debug!("HubSpot POST {} (limit {})", url.path(), body.limit);
        let request = self.request(Method::POST, url.clone()).json(body);
        Self::send(request, url).await
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder, url: Url) -> Result<T, HubSpotError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("HubSpot request to {} failed with {}: {}", url.path(), status, body);
            return Err(HubSpotError::Status {
                status,
                endpoint: url.path().to_string(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }
}
