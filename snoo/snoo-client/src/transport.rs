use crate::error::Result;
use async_trait::async_trait;
use http::{Method, StatusCode};
use snoo::config::RedditConfig;
use std::sync::Arc;

/// Name of the cookie that carries the login session.
pub const SESSION_COOKIE: &str = "reddit_session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    /// Form fields, sent url-encoded as the body of POST requests.
    pub form: Vec<(String, String)>,
    /// Value of the session cookie, if logged in.
    pub cookie: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Sends a single request and buffers the whole response body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: Request) -> Result<Response> {
        (**self).send(request).await
    }
}

pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &RedditConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response> {
        let mut builder = self.http.request(request.method.clone(), request.url.as_str());
        if let Some(cookie) = request.cookie.as_ref() {
            builder = builder.header(
                reqwest::header::COOKIE,
                format!("{}={}", SESSION_COOKIE, cookie),
            );
        }
        if request.method == Method::POST {
            builder = builder.form(&request.form);
        }
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        Ok(Response { status, body })
    }
}
