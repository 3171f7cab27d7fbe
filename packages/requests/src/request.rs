use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};
use crate::executor::{HttpExecutor, ReqwestExecutor};
use crate::form;
use crate::types::{Body, RequestDescriptor, ResponseBody, HTTPS_PORT};

const CONTENT_LENGTH: &str = "Content-Length";

/// A single HTTPS request under construction
///
/// Configuration methods consume and return the builder so calls chain.
/// [`Request::send`] consumes it for good.
///
/// # Example
///
/// ```ignore
/// use https_requests::Request;
///
/// let token = Request::new("post", "https://auth.example.com/oauth/token")?
///     .set_header("Accept", "application/json")
///     .set_data(&credentials)?
///     .url_encode_data()
///     .send()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    descriptor: RequestDescriptor,
}

impl Request {
    /// Start a request for `url`.
    ///
    /// The method is upper-cased, an empty method becomes `GET`. Only the
    /// host and pathname of the URL are kept.
    pub fn new(method: &str, url: &str) -> Result<Self> {
        let parsed = Url::parse(url)?;
        let host = parsed
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| Error::MissingHost {
                url: url.to_string(),
            })?
            .to_string();

        let method = match method.to_uppercase() {
            m if m.is_empty() => "GET".to_string(),
            m => m,
        };

        Ok(Self {
            descriptor: RequestDescriptor {
                method,
                host,
                path: parsed.path().to_string(),
                port: HTTPS_PORT,
                headers: HashMap::new(),
                body: None,
                stringify: false,
            },
        })
    }

    /// Merge `headers` into the current set; later values win.
    pub fn set_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.descriptor.insert_header(name.into(), value.into());
        }
        self
    }

    pub fn set_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.descriptor.insert_header(name.into(), value.into());
        self
    }

    /// Serialize `data` as the JSON body and set `Content-Length`.
    pub fn set_data<T: Serialize + ?Sized>(self, data: &T) -> Result<Self> {
        let text = serde_json::to_string(data)?;
        let value = serde_json::from_str(&text)?;
        Ok(self.replace_body(Body::Json { value, text }))
    }

    /// Like [`Request::set_data`] for a value that is already JSON.
    pub fn set_json(self, value: Value) -> Self {
        let text = value.to_string();
        self.replace_body(Body::Json { value, text })
    }

    /// Re-encode a JSON body as form data.
    ///
    /// Does nothing when no JSON body has been set.
    pub fn url_encode_data(self) -> Self {
        let encoded = match &self.descriptor.body {
            Some(Body::Json { value, .. }) => form::url_encode(value),
            _ => return self,
        };
        self.replace_body(Body::UrlEncoded(encoded))
    }

    /// Return the response as raw text instead of parsed JSON.
    pub fn stringify_result(mut self) -> Self {
        self.descriptor.stringify = true;
        self
    }

    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    /// Issue the request with a default [`ReqwestExecutor`].
    pub async fn send(self) -> Result<ResponseBody> {
        let executor = ReqwestExecutor::new()?;
        self.send_with(&executor).await
    }

    /// Issue the request through `executor` and decode the response.
    pub async fn send_with<E>(self, executor: &E) -> Result<ResponseBody>
    where
        E: HttpExecutor + ?Sized,
    {
        let request = self.descriptor;
        log::debug!(
            "{} https://{}:{}{}",
            request.method(),
            request.host(),
            request.port(),
            request.path()
        );

        let result = match executor.execute(&request).await {
            Ok(raw) => {
                log::debug!("{} {} -> {}", request.method(), request.path(), raw.status);
                raw.into_body(request.stringify())
            }
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            log::warn!("{} {} failed: {}", request.method(), request.path(), e);
        }
        result
    }

    fn replace_body(mut self, body: Body) -> Self {
        self.descriptor
            .insert_header(CONTENT_LENGTH.to_string(), body.len().to_string());
        self.descriptor.body = Some(body);
        self
    }
}

/// Build a request in one call.
///
/// Equivalent to [`Request::new`] followed by [`Request::set_headers`] and
/// [`Request::set_json`] for whichever of `headers` and `data` are present.
/// A `null` body counts as absent.
pub fn requests(
    method: &str,
    url: &str,
    headers: Option<HashMap<String, String>>,
    data: Option<Value>,
) -> Result<Request> {
    let mut request = Request::new(method, url)?;
    if let Some(headers) = headers {
        request = request.set_headers(headers);
    }
    if let Some(data) = data.filter(|data| !data.is_null()) {
        request = request.set_json(data);
    }
    Ok(request)
}
