//! Thin JSON-over-HTTP client used by the account service.
//!
//! Responses are buffered into a plain [`Response`] so callers can inspect the
//! status and body without holding on to the `reqwest` response.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response body as bytes
    pub body: Vec<u8>,
}

impl Response {
    /// Returns true if the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Attempt to parse the body as UTF-8 text.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Attempt to deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Transport-level failure: the request never produced a response.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("HTTP client could not be built: {0}")]
    Build(#[source] reqwest::Error),
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

pub type HttpResult<T> = Result<T, HttpError>;

/// Shared client with a fixed timeout, rooted at the API URL.
#[derive(Debug, Clone)]
pub struct Client {
    inner: reqwest::Client,
    api_url: String,
}

impl Client {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> HttpResult<Self> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(HttpError::Build)?;

        Ok(Self {
            inner,
            api_url: api_url.into(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Joins `path` (which must start with `/`) onto the API URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }

    /// POST a JSON body to `path` and buffer the response.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> HttpResult<Response> {
        let url = self.url(path);

        let response = self
            .inner
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| HttpError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|source| HttpError::Transport { url, source })?
            .to_vec();

        Ok(Response { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_is_success() {
        let response = Response {
            status: 200,
            body: Vec::new(),
        };
        assert!(response.is_success());

        let response = Response {
            status: 204,
            body: Vec::new(),
        };
        assert!(response.is_success());

        let response = Response {
            status: 404,
            body: Vec::new(),
        };
        assert!(!response.is_success());
    }

    #[test]
    fn test_response_text() {
        let response = Response {
            status: 400,
            body: "이미 사용 중인 이메일입니다.".as_bytes().to_vec(),
        };
        assert_eq!(response.text(), Some("이미 사용 중인 이메일입니다."));

        let response = Response {
            status: 400,
            body: vec![0xff, 0xfe],
        };
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_response_json() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct Found {
            email: String,
        }

        let response = Response {
            status: 200,
            body: br#"{"email": "alice@example.com"}"#.to_vec(),
        };

        let found: Found = response.json().expect("Should deserialize");
        assert_eq!(
            found,
            Found {
                email: "alice@example.com".to_owned()
            }
        );
    }

    #[test]
    fn test_client_url_join() {
        let client = Client::new("http://localhost:9410/api", Duration::from_secs(1))
            .expect("client should build");
        assert_eq!(client.api_url(), "http://localhost:9410/api");
        assert_eq!(
            client.url("/auth/find/email"),
            "http://localhost:9410/api/auth/find/email"
        );
    }
}
