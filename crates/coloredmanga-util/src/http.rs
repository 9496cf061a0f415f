use std::{collections::HashMap, num::NonZeroU32};

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub type Headers = HashMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid request method: {0}")]
    InvalidMethod(String),
    #[error("request return error: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    pub url: String,
    pub headers: Option<Headers>,
    pub body: Option<String>,
}

impl Request {
    pub fn get(url: &str) -> Request {
        Request {
            method: "GET".to_string(),
            url: url.to_string(),
            headers: None,
            body: None,
        }
    }

    pub fn body(self, body: &str) -> Request {
        Request {
            body: Some(body.to_string()),
            ..self
        }
    }

    pub fn set(mut self, name: &str, value: &str) -> Request {
        self.headers
            .get_or_insert_with(Headers::new)
            .entry(name.to_string())
            .or_default()
            .push(value.to_string());

        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub headers: Headers,
    pub body: String,
    pub status: u16,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fetch capability handed to a source by its host.
///
/// A source issues one request per operation and never retries, so an
/// implementation only has to report transport failures; non-2xx responses
/// are returned as regular [`Response`]s.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, request: Request) -> Result<Response, HttpError>;
}

/// [`Fetch`] backed by reqwest, spending at most `requests_per_second`
/// requests each second. Callers over budget wait instead of failing.
pub struct HttpClient {
    client: reqwest::Client,
    limiter: Option<DefaultDirectRateLimiter>,
}

impl HttpClient {
    /// A budget of `0` disables rate limiting.
    pub fn new(user_agent: &str, requests_per_second: u32) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .cookie_store(true)
            .brotli(true)
            .deflate(true)
            .gzip(true)
            .build()?;

        let limiter = NonZeroU32::new(requests_per_second)
            .map(|budget| RateLimiter::direct(Quota::per_second(budget)));

        Ok(Self { client, limiter })
    }

    pub fn is_rate_limited(&self) -> bool {
        self.limiter.is_some()
    }
}

#[async_trait]
impl Fetch for HttpClient {
    async fn fetch(&self, req: Request) -> Result<Response, HttpError> {
        if let Some(limiter) = &self.limiter {
            if limiter.check().is_err() {
                info!("request budget exhausted, waiting to fetch {}", req.url);
                limiter.until_ready().await;
            }
        }

        let method = Method::from_bytes(req.method.as_bytes())
            .map_err(|_| HttpError::InvalidMethod(req.method.clone()))?;

        debug!("request => {} {}", method, req.url);

        let mut builder = self.client.request(method, req.url.as_str());
        if let Some(headers) = req.headers.as_ref() {
            for (name, values) in headers {
                for value in values {
                    builder = builder.header(name.as_str(), value.as_str());
                }
            }
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let res = builder.send().await.inspect_err(|err| {
            debug!("response error => {:?}", err);
        })?;

        let status = res.status().as_u16();
        let mut headers = Headers::new();
        for (name, value) in res.headers() {
            headers
                .entry(name.to_string())
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }
        let body = res.text().await?;

        debug!("response => {} {} ({} bytes)", status, req.url, body.len());

        Ok(Response {
            headers,
            body,
            status,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_request_set_appends_headers() {
        let req = Request::get("https://coloredmanga.com")
            .set("Referer", "https://coloredmanga.com/")
            .set("Accept", "text/html")
            .set("Accept", "*/*");

        let headers = req.headers.unwrap();
        assert_eq!(headers["Referer"], vec!["https://coloredmanga.com/"]);
        assert_eq!(headers["Accept"], vec!["text/html", "*/*"]);
    }

    #[test]
    fn test_zero_budget_disables_limiter() {
        let client = HttpClient::new(DEFAULT_USER_AGENT, 0).unwrap();
        assert!(!client.is_rate_limited());

        let client = HttpClient::new(DEFAULT_USER_AGENT, 5).unwrap();
        assert!(client.is_rate_limited());
    }

    #[tokio::test]
    async fn test_fetch_returns_body_and_status() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/manga/solo-leveling")
                    .header("referer", "https://coloredmanga.com/");
                then.status(200)
                    .header("content-type", "text/html")
                    .body("<html><body>ok</body></html>");
            })
            .await;

        let client = HttpClient::new(DEFAULT_USER_AGENT, 5).unwrap();
        let res = client
            .fetch(
                Request::get(&server.url("/manga/solo-leveling"))
                    .set("Referer", "https://coloredmanga.com/"),
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(res.is_success());
        assert_eq!(res.body, "<html><body>ok</body></html>");
        assert_eq!(res.headers["content-type"], vec!["text/html"]);
    }

    #[tokio::test]
    async fn test_fetch_keeps_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/manga/missing");
                then.status(404).body("not found");
            })
            .await;

        let client = HttpClient::new(DEFAULT_USER_AGENT, 0).unwrap();
        let res = client
            .fetch(Request::get(&server.url("/manga/missing")))
            .await
            .unwrap();

        assert_eq!(res.status, 404);
        assert!(!res.is_success());
        assert_eq!(res.body, "not found");
    }

    #[tokio::test]
    async fn test_fetch_sends_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/wp-admin/admin-ajax.php").body("action=manga");
                then.status(200).body("[]");
            })
            .await;

        let client = HttpClient::new(DEFAULT_USER_AGENT, 0).unwrap();
        let mut req = Request::get(&server.url("/wp-admin/admin-ajax.php")).body("action=manga");
        req.method = "POST".to_string();
        client.fetch(req).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_invalid_method() {
        let client = HttpClient::new(DEFAULT_USER_AGENT, 0).unwrap();
        let mut req = Request::get("http://127.0.0.1/");
        req.method = "NOT A METHOD".to_string();

        let err = client.fetch(req).await.unwrap_err();
        assert!(matches!(err, HttpError::InvalidMethod(method) if method == "NOT A METHOD"));
    }

    #[tokio::test]
    async fn test_fetch_transport_failure_is_error() {
        let client = HttpClient::new(DEFAULT_USER_AGENT, 0).unwrap();
        let err = client
            .fetch(Request::get("http://127.0.0.1:1/manga/solo-leveling"))
            .await
            .unwrap_err();

        assert!(matches!(err, HttpError::Request(_)));
    }
}
