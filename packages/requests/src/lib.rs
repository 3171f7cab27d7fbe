//! # https-requests
//!
//! Fluent helper for issuing a single HTTPS request and collecting the
//! buffered response.
//!
//! A [`Request`] accumulates method, host, path, headers and body through
//! chainable setters, then [`Request::send`] performs one round trip on
//! port 443 and resolves with the decoded body.
//!
//! ```ignore
//! use https_requests::{requests, Request, ResponseBody};
//!
//! // GET, response parsed as JSON
//! let user = Request::new("GET", "https://api.example.com/users/123")?
//!     .send()
//!     .await?;
//!
//! // POST a form, keep the response as text
//! let page = Request::new("POST", "https://example.com/search")?
//!     .set_headers([("Content-Type", "application/x-www-form-urlencoded")])
//!     .set_data(&query)?
//!     .url_encode_data()
//!     .stringify_result()
//!     .send()
//!     .await?;
//!
//! // Everything up front
//! let created = requests("post", "https://api.example.com/users", Some(headers), Some(body))?
//!     .send()
//!     .await?;
//! ```
//!
//! ## Response contract
//!
//! - status outside `200..300`: [`Error::Status`] carrying the code
//! - empty body: `Json({})`, or `Text("")` after `stringify_result`
//! - otherwise: parsed JSON, or the raw text after `stringify_result`

pub mod error;
pub mod executor;
pub mod form;
pub mod types;

mod request;

// Re-export main types
pub use error::{Error, Result};
pub use executor::{ExecutorConfig, HttpExecutor, ReqwestExecutor};
pub use request::{requests, Request};
pub use types::{Body, RawResponse, RequestDescriptor, ResponseBody, HTTPS_PORT};
