//! Thin clients for the public HTTP APIs the fun commands rely on.
//!
//! Every endpoint lives on [`ApiClient`]; base URLs are grouped in
//! [`Endpoints`] so the whole set can be pointed somewhere else at once.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

pub mod animals;
pub mod canvas;
pub mod color;
pub mod identity;
pub mod insult;
pub mod meme;
pub mod translate;
pub mod urban;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = concat!("parrot/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}")]
    Status { status: StatusCode },

    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status returned by the API, if the request got that far
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status } => Some(*status),
            ApiError::Http(err) => err.status(),
            ApiError::Payload(_) => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Base URLs of every external service
#[derive(Clone, Debug)]
pub struct Endpoints {
    pub color: String,
    pub some_random: String,
    pub insult: String,
    pub memes: String,
    pub random_user: String,
    pub translate: String,
    pub urban: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            color: "https://www.thecolorapi.com".to_string(),
            some_random: "https://some-random-api.com".to_string(),
            insult: "https://insult.mattbas.org".to_string(),
            memes: "https://memes.blademaker.tv".to_string(),
            random_user: "https://randomuser.me".to_string(),
            translate: "https://translate-api.ml".to_string(),
            urban: "https://api.urbandictionary.com".to_string(),
        }
    }
}

impl Endpoints {
    /// Points every service at the same base URL; used by tests with a mock server
    pub fn all(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            color: base.clone(),
            some_random: base.clone(),
            insult: base.clone(),
            memes: base.clone(),
            random_user: base.clone(),
            translate: base.clone(),
            urban: base,
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    endpoints: Endpoints,
}

impl ApiClient {
    pub fn new(endpoints: Endpoints) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { http, endpoints })
    }

    #[instrument(skip(self, query), level = "debug")]
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> ApiResult<Response> {
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        debug!(%status, "external API responded");

        if !status.is_success() {
            warn!(%status, url, "external API returned an error status");
            return Err(ApiError::Status { status });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        let body = self.get(url, query).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> ApiResult<String> {
        Ok(self.get(url, query).await?.text().await?)
    }

    async fn get_bytes(&self, url: &str, query: &[(&str, &str)]) -> ApiResult<Vec<u8>> {
        Ok(self.get(url, query).await?.bytes().await?.to_vec())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{ApiClient, Endpoints};
    use wiremock::MockServer;

    pub async fn mock_client() -> (MockServer, ApiClient) {
        let server = MockServer::start().await;
        let client = ApiClient::new(Endpoints::all(server.uri())).unwrap();
        (server, client)
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiError, test_support::mock_client};
    use reqwest::StatusCode;
    use wiremock::{
        Mock, ResponseTemplate,
        matchers::{method, path},
    };

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let url = format!("{}/broken", server.uri());
        let err = client.get_text(&url, &[]).await.unwrap_err();

        assert!(matches!(err, ApiError::Status { .. }));
        assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
    }

    #[tokio::test]
    async fn invalid_json_is_a_payload_error() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let url = format!("{}/json", server.uri());
        let err = client
            .get_json::<serde_json::Value>(&url, &[])
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Payload(_)));
        assert_eq!(err.status(), None);
    }
}
