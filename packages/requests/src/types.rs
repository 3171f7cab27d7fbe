use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Port every request is issued on.
pub const HTTPS_PORT: u16 = 443;

/// Serialized request body
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// JSON text, with the value it was produced from
    Json { value: Value, text: String },

    /// `application/x-www-form-urlencoded` text
    UrlEncoded(String),
}

impl Body {
    pub fn as_str(&self) -> &str {
        match self {
            Body::Json { text, .. } => text,
            Body::UrlEncoded(text) => text,
        }
    }

    /// Length of the wire text in bytes
    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

/// Everything needed to issue one request.
///
/// Built and mutated only through [`crate::Request`]; executors read it.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub(crate) method: String,
    pub(crate) host: String,
    pub(crate) path: String,
    pub(crate) port: u16,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<Body>,
    pub(crate) stringify: bool,
}

impl RequestDescriptor {
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Look up a header, ignoring ASCII case in the name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Set a header, replacing any entry whose name differs only in case.
    pub(crate) fn insert_header(&mut self, name: String, value: String) {
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value);
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Whether the response will be returned as raw text
    pub fn stringify(&self) -> bool {
        self.stringify
    }
}

/// Status and buffered body chunks as handed back by an executor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub chunks: Vec<Vec<u8>>,
}

impl RawResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            chunks: Vec::new(),
        }
    }

    pub fn with_chunk(mut self, chunk: impl Into<Vec<u8>>) -> Self {
        self.chunks.push(chunk.into());
        self
    }

    /// Check if the response status indicates success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Apply the response contract: reject non-2xx, then decode the body.
    pub fn into_body(self, stringify: bool) -> Result<ResponseBody> {
        if !self.is_success() {
            return Err(Error::Status {
                status: self.status,
            });
        }
        ResponseBody::decode(&self.chunks, stringify)
    }
}

/// Decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Text(String),
    Json(Value),
}

impl ResponseBody {
    /// Decode buffered chunks.
    ///
    /// No chunks yields `""` or `{}`; otherwise the concatenated text is
    /// returned as is or parsed as JSON depending on `stringify`.
    pub fn decode(chunks: &[Vec<u8>], stringify: bool) -> Result<Self> {
        if chunks.is_empty() {
            return Ok(if stringify {
                ResponseBody::Text(String::new())
            } else {
                ResponseBody::Json(Value::Object(Map::new()))
            });
        }

        let text = String::from_utf8_lossy(&chunks.concat()).into_owned();
        if stringify {
            Ok(ResponseBody::Text(text))
        } else {
            Ok(ResponseBody::Json(serde_json::from_str(&text)?))
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            ResponseBody::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    /// Deserialize the body into a specific type.
    ///
    /// Text bodies are parsed as JSON first.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        let value = match self {
            ResponseBody::Json(value) => value,
            ResponseBody::Text(text) => serde_json::from_str(&text)?,
        };
        Ok(serde_json::from_value(value)?)
    }
}
