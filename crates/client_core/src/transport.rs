//! HTTP access to the activities service.

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::Roster,
    error::ErrorBody,
    protocol::{SignupResponse, ACTIVITIES_SEGMENT, EMAIL_QUERY_KEY, SIGNUP_SEGMENT},
};
use tracing::debug;
use url::Url;

use crate::error::ClientError;

#[async_trait]
pub trait ActivityService: Send + Sync {
    async fn fetch_roster(&self) -> Result<Roster, ClientError>;
    async fn signup(&self, activity: &str, email: &str) -> Result<SignupResponse, ClientError>;
    async fn unregister(&self, activity: &str, email: &str) -> Result<(), ClientError>;
}

pub struct HttpActivityService {
    http: Client,
    base: Url,
}

impl HttpActivityService {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(server_url).map_err(|err| ClientError::InvalidServerUrl {
            url: server_url.to_string(),
            reason: err.to_string(),
        })?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::InvalidServerUrl {
                url: server_url.to_string(),
                reason: "expected an http(s) base url".to_string(),
            });
        }
        Ok(Self { http, base })
    }

    fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // `new` rejects cannot-be-a-base urls, so the segments are always available.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn activities_url(&self) -> Url {
        self.url_for(&[ACTIVITIES_SEGMENT])
    }

    /// `/activities/{activity}/signup?email={email}` with both values percent-encoded.
    pub fn signup_url(&self, activity: &str, email: &str) -> Url {
        let mut url = self.url_for(&[ACTIVITIES_SEGMENT, activity, SIGNUP_SEGMENT]);
        url.query_pairs_mut().append_pair(EMAIL_QUERY_KEY, email);
        url
    }

    async fn send(&self, method: Method, url: Url) -> Result<(Response, String), ClientError> {
        let label = url.to_string();
        debug!(%method, url = %label, "sending request");
        let response = self
            .http
            .request(method, url)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: label.clone(),
                source,
            })?;
        Ok((response, label))
    }

    /// Reads the whole body. A non-success status becomes a service failure when
    /// the body is a JSON object, and a decode failure otherwise.
    async fn read_body(response: Response, url: &str) -> Result<Vec<u8>, ClientError> {
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.to_string(),
                source,
            })?;

        if !status.is_success() {
            let body: ErrorBody = Self::decode(&bytes, url)?;
            let detail = body.detail_text().map(str::to_string);
            return Err(ClientError::Service { status, detail });
        }

        Ok(bytes.to_vec())
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8], url: &str) -> Result<T, ClientError> {
        serde_json::from_slice(bytes).map_err(|err| ClientError::Decode {
            url: url.to_string(),
            reason: err.to_string(),
        })
    }
}

#[async_trait]
impl ActivityService for HttpActivityService {
    async fn fetch_roster(&self) -> Result<Roster, ClientError> {
        let (response, url) = self.send(Method::GET, self.activities_url()).await?;
        let bytes = Self::read_body(response, &url).await?;
        Self::decode(&bytes, &url)
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<SignupResponse, ClientError> {
        let (response, url) = self
            .send(Method::POST, self.signup_url(activity, email))
            .await?;
        let bytes = Self::read_body(response, &url).await?;
        Self::decode(&bytes, &url)
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<(), ClientError> {
        let (response, url) = self
            .send(Method::DELETE, self.signup_url(activity, email))
            .await?;
        let bytes = Self::read_body(response, &url).await?;
        Self::decode::<serde_json::Value>(&bytes, &url)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
