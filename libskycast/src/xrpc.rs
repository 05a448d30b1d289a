//! Minimal XRPC client
//!
//! XRPC methods live under `/xrpc/<nsid>` on the service. Queries are GET
//! requests with URL parameters, procedures are POST requests with a JSON
//! body. Anything other than `200 OK` is reported as
//! [`SkycastError::Upstream`] with the response body untouched.

use reqwest::{RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::HttpConfig;
use crate::error::{Result, SkycastError};

pub struct XrpcClient {
    http: reqwest::Client,
    base: Url,
}

impl XrpcClient {
    pub fn new(api: &str, config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            http: config.build_client()?,
            base: Url::parse(api)?,
        })
    }

    /// Full URL of an XRPC method
    pub fn endpoint(&self, nsid: &str) -> Result<Url> {
        join_path(&self.base, &["xrpc", nsid])
    }

    /// Call a query (GET) method
    pub async fn query<T: DeserializeOwned>(
        &self,
        nsid: &str,
        params: &[(&str, &str)],
        token: Option<&SecretString>,
    ) -> Result<T> {
        let mut url = self.endpoint(nsid)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        tracing::debug!(method = "GET", nsid, "XRPC request");
        let request = with_auth(self.http.get(url), token);
        send_json(request).await
    }

    /// Call a procedure (POST) method with a JSON body
    pub async fn procedure<B: Serialize, T: DeserializeOwned>(
        &self,
        nsid: &str,
        body: &B,
        token: Option<&SecretString>,
    ) -> Result<T> {
        let url = self.endpoint(nsid)?;

        tracing::debug!(method = "POST", nsid, "XRPC request");
        let request = with_auth(self.http.post(url).json(body), token);
        send_json(request).await
    }
}

fn with_auth(request: RequestBuilder, token: Option<&SecretString>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token.expose_secret()),
        None => request,
    }
}

/// Append path segments to a base URL, tolerating a trailing slash on the base.
pub(crate) fn join_path(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Send a request and return the body, or the body as an error on non-200.
pub(crate) async fn send(request: RequestBuilder) -> Result<String> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    tracing::debug!(status = status.as_u16(), bytes = body.len(), "Response received");

    if status != StatusCode::OK {
        return Err(SkycastError::Upstream(body));
    }
    Ok(body)
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let body = send(request).await?;
    Ok(serde_json::from_str(&body)?)
}
