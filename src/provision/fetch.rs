//! Download capability
//!
//! The provisioner only needs "GET this URL and give me a status and a body".
//! Hiding that behind `Fetcher` keeps the streaming and status policy testable
//! without a network.

use crate::core::error::{RelverError, RelverResult};
use std::io::Read;
use std::time::Duration;

/// Response of a fetch: status plus a streaming body
pub struct FetchResponse {
  pub status: u16,
  pub content_length: Option<u64>,
  pub body: Box<dyn Read + Send>,
}

/// Issues a GET request
///
/// An `Err` means the request never produced a response (DNS, connect, TLS,
/// timeout). HTTP error statuses are returned as responses.
pub trait Fetcher {
  fn fetch(&self, url: &str) -> RelverResult<FetchResponse>;
}

/// Blocking HTTP fetcher with a whole-request timeout
pub struct HttpFetcher {
  client: reqwest::blocking::Client,
}

impl HttpFetcher {
  pub fn new(timeout: Duration) -> RelverResult<Self> {
    let client = reqwest::blocking::Client::builder()
      .user_agent(concat!("relver/", env!("CARGO_PKG_VERSION")))
      .timeout(timeout)
      .build()?;

    Ok(Self { client })
  }
}

impl Fetcher for HttpFetcher {
  fn fetch(&self, url: &str) -> RelverResult<FetchResponse> {
    let response = self
      .client
      .get(url)
      .send()
      .map_err(|e| RelverError::message(format!("request to {} failed: {}", url, e)))?;

    Ok(FetchResponse {
      status: response.status().as_u16(),
      content_length: response.content_length(),
      body: Box::new(response),
    })
  }
}
