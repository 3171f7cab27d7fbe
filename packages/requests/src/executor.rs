//! HTTP execution abstraction.
//!
//! The builder never talks to the network itself. It hands a finished
//! [`RequestDescriptor`] to an [`HttpExecutor`], which can be mocked in tests.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};
use crate::types::{Body, RawResponse, RequestDescriptor};

/// Trait for executing HTTP requests.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    /// Issue the request and buffer the response body.
    ///
    /// Implementations only need to read the body of 2xx responses.
    async fn execute(&self, request: &RequestDescriptor) -> Result<RawResponse>;
}

/// Settings for [`ReqwestExecutor`]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// `User-Agent` sent when the request does not set one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Send every request to this origin instead of `https://{host}:443`.
    /// The request path is kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl ExecutorConfig {
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

/// Production executor using reqwest and the platform's TLS stack.
pub struct ReqwestExecutor {
    client: Client,
    origin: Option<Url>,
}

impl ReqwestExecutor {
    pub fn new() -> Result<Self> {
        Self::with_config(&ExecutorConfig::default())
    }

    pub fn with_config(config: &ExecutorConfig) -> Result<Self> {
        // Redirects are surfaced as non-2xx statuses.
        let mut builder = Client::builder().redirect(Policy::none());
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        let client = builder.build()?;

        let origin = config.origin.as_deref().map(Url::parse).transpose()?;

        Ok(Self { client, origin })
    }

    /// Create with a caller-supplied reqwest client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            origin: None,
        }
    }

    fn target_url(&self, request: &RequestDescriptor) -> Result<Url> {
        let mut url = match &self.origin {
            Some(origin) => origin.clone(),
            None => Url::parse(&format!("https://{}:{}", request.host(), request.port()))?,
        };
        url.set_path(request.path());
        Ok(url)
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: &RequestDescriptor) -> Result<RawResponse> {
        let method = http::Method::from_bytes(request.method().as_bytes()).map_err(|_| {
            Error::InvalidMethod {
                method: request.method().to_string(),
            }
        })?;

        let mut headers = HeaderMap::new();
        for (name, value) in request.headers() {
            let header_name = HeaderName::try_from(name.as_str())?;
            let header_value = HeaderValue::try_from(value.as_str())?;
            headers.insert(header_name, header_value);
        }

        let url = self.target_url(request)?;
        let body = request.body().map(Body::as_str).unwrap_or_default().to_string();

        let mut response = self
            .client
            .request(method, url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let mut raw = RawResponse::new(response.status().as_u16());
        if raw.is_success() {
            while let Some(chunk) = response.chunk().await? {
                raw.chunks.push(chunk.to_vec());
            }
        }

        Ok(raw)
    }
}
