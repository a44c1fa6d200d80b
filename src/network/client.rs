//! HTTP client wrapper - the four calls of the cities REST contract

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::constants::{APP_NAME, APP_VERSION, CITIES_PATH};
use crate::models::{City, CityId, CityInfo};

/// Errors from talking to the cities backend
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Server responded with {status}")]
    Status { status: StatusCode },

    #[error("Malformed response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    fn from_body(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e)
        } else {
            ApiError::Transport(e)
        }
    }
}

/// Create an HTTP client with default configuration
///
/// No request timeout is set: a request the server never answers stays
/// pending for as long as the server keeps the connection open.
pub fn create_client() -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .user_agent(format!("{}/{}", APP_NAME, APP_VERSION))
        .build()
        .map_err(ApiError::Client)
}

/// Client for the `/cities` collection of one backend
#[derive(Clone, Debug)]
pub struct CitiesClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CitiesClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self::with_client(create_client()?, parse_base_url(base_url)?))
    }

    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        CitiesClient { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/cities`
    pub fn collection_url(&self) -> Url {
        self.url_with(&[CITIES_PATH])
    }

    /// `{base}/cities/{id}`, with the id percent-encoded as one segment
    pub fn city_url(&self, id: &CityId) -> Url {
        self.url_with(&[CITIES_PATH, &id.to_string()])
    }

    fn url_with(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // parse_base_url rejects cannot-be-a-base URLs, so this always succeeds
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `GET /cities`
    pub async fn fetch_cities(&self) -> Result<Vec<City>, ApiError> {
        let response = self.http.get(self.collection_url()).send().await;
        read_json(response).await
    }

    /// `GET /cities/{id}`
    pub async fn fetch_city(&self, id: &CityId) -> Result<City, ApiError> {
        let response = self.http.get(self.city_url(id)).send().await;
        read_json(response).await
    }

    /// `POST /cities`, returns the record with its server-assigned id
    pub async fn create_city(&self, city: &CityInfo) -> Result<City, ApiError> {
        // .json() sets Content-Type: application/json
        let response = self.http.post(self.collection_url()).json(city).send().await;
        read_json(response).await
    }

    /// `DELETE /cities/{id}`, any response body is ignored
    pub async fn delete_city(&self, id: &CityId) -> Result<(), ApiError> {
        let response = self.http.delete(self.city_url(id)).send().await;
        check_status(response)?;
        Ok(())
    }
}

/// Parse and sanity-check a backend root such as `http://localhost:9000`
pub fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
    let url = Url::parse(base_url.trim()).map_err(|e| ApiError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason: "URL cannot have path segments".to_string(),
        });
    }

    Ok(url)
}

fn check_status(
    response: Result<reqwest::Response, reqwest::Error>,
) -> Result<reqwest::Response, ApiError> {
    let response = response.map_err(ApiError::Transport)?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status { status });
    }
    Ok(response)
}

async fn read_json<T: DeserializeOwned>(
    response: Result<reqwest::Response, reqwest::Error>,
) -> Result<T, ApiError> {
    let response = check_status(response)?;
    response.json::<T>().await.map_err(ApiError::from_body)
}
