//! Signed API request execution and status mapping.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::api::ErrorCode;
use crate::error::{DropboxError, Result};
use crate::http::{HttpClient, HttpResponse};
use crate::oauth::{parse_token_response, percent_encode, Signer, TokenPair};

/// Base URL for metadata and fileops endpoints.
pub const API_URL: &str = "https://api.dropbox.com/1";

/// Base URL for content upload/download endpoints.
pub const CONTENT_URL: &str = "https://api-content.dropbox.com/1";

/// User-facing authorization page; the request token is appended as
/// `?oauth_token=`.
pub const AUTHORIZE_URL: &str = "https://www.dropbox.com/1/oauth/authorize";

/// Path encoding set: RFC 5849 reserved minus '/', which stays a separator.
const PATH_RESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Percent-encode a remote path for use inside an endpoint URL.
///
/// A missing leading '/' is added; segment separators are preserved.
pub(crate) fn encode_path(path: &str) -> String {
    let normalized = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };
    utf8_percent_encode(&normalized, PATH_RESERVED).to_string()
}

/// API client executing OAuth-signed requests.
#[derive(Debug)]
pub struct ApiClient {
    http: HttpClient,
    signer: Signer,
    timeout: Duration,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Arguments
    /// * `signer` - OAuth signer holding the consumer credentials
    /// * `proxy` - Optional proxy URL
    /// * `request_timeout` - Upper bound for each request
    pub fn new(signer: Signer, proxy: Option<&str>, request_timeout: Duration) -> Result<Self> {
        let http = match proxy {
            Some(p) => HttpClient::with_proxy(p)?,
            None => HttpClient::new(),
        };
        Ok(Self {
            http,
            signer,
            timeout: request_timeout,
        })
    }

    /// Signed GET returning a decoded JSON body.
    ///
    /// `params` are appended as the query string and participate in the
    /// signature.
    pub async fn get_json(
        &self,
        url: &str,
        params: &[(String, String)],
        token: &TokenPair,
    ) -> Result<Value> {
        let auth = self
            .signer
            .authorization_header("GET", url, Some(token), params)?;
        let full_url = with_query(url, params);

        debug!(url = %full_url, "api GET");
        let response = self.run(self.http.get(&full_url, &auth, None)).await?;
        debug!(status = response.status, bytes = response.body.len(), "api response");

        check(&response)?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Signed form POST returning a decoded JSON body.
    pub async fn post_form_json(
        &self,
        url: &str,
        params: &[(String, String)],
        token: &TokenPair,
    ) -> Result<Value> {
        let auth = self
            .signer
            .authorization_header("POST", url, Some(token), params)?;

        debug!(url, "api POST");
        let response = self.run(self.http.post_form(url, &auth, params)).await?;
        debug!(status = response.status, bytes = response.body.len(), "api response");

        check(&response)?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// POST to an OAuth token endpoint and parse the returned token pair.
    ///
    /// Any non-success status here means the handshake was rejected and is
    /// reported as `AuthError` regardless of the concrete status.
    pub async fn token_endpoint(&self, url: &str, token: Option<&TokenPair>) -> Result<TokenPair> {
        let auth = self.signer.authorization_header("POST", url, token, &[])?;

        debug!(url, "token endpoint POST");
        let response = self.run(self.http.post_form(url, &auth, &[])).await?;
        debug!(status = response.status, "token endpoint response");

        if !is_http_success(response.status) {
            warn!(status = response.status, "token handshake rejected");
            return Err(DropboxError::ApiError {
                code: ErrorCode::AuthError,
                status: response.status,
                message: error_message(&response.body),
            });
        }

        let body =
            std::str::from_utf8(&response.body).map_err(|_| DropboxError::InvalidResponse)?;
        parse_token_response(body)
    }

    /// Signed PUT of a raw byte body, returning the decoded JSON response.
    ///
    /// `query` is appended to the URL and signed; the body itself is not
    /// part of an OAuth signature.
    pub async fn put_content(
        &self,
        url: &str,
        query: &[(String, String)],
        body: Vec<u8>,
        token: &TokenPair,
    ) -> Result<Value> {
        let auth = self
            .signer
            .authorization_header("PUT", url, Some(token), query)?;
        let full_url = with_query(url, query);

        debug!(url = %full_url, bytes = body.len(), "content PUT");
        let response = self.run(self.http.put(&full_url, &auth, body)).await?;
        debug!(status = response.status, "content response");

        check(&response)?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Signed GET of raw content, optionally with a byte range.
    ///
    /// Returns the raw response so the caller can distinguish full (200)
    /// from partial (206) content; every other status is mapped to an error.
    pub async fn get_content(
        &self,
        url: &str,
        token: &TokenPair,
        range: Option<(u64, u64)>,
    ) -> Result<HttpResponse> {
        let auth = self
            .signer
            .authorization_header("GET", url, Some(token), &[])?;

        debug!(url, ?range, "content GET");
        let response = self.run(self.http.get(url, &auth, range)).await?;
        debug!(status = response.status, bytes = response.body.len(), "content response");

        check(&response)?;
        Ok(response)
    }

    async fn run(
        &self,
        fut: impl std::future::Future<Output = Result<HttpResponse>>,
    ) -> Result<HttpResponse> {
        timeout(self.timeout, fut)
            .await
            .map_err(|_| DropboxError::Timeout)?
    }
}

fn is_http_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Map a non-success response to an `ApiError`.
fn check(response: &HttpResponse) -> Result<()> {
    if is_http_success(response.status) {
        return Ok(());
    }

    let code = ErrorCode::from_status(response.status);
    let message = error_message(&response.body);
    warn!(status = response.status, ?code, %message, "api request failed");

    Err(DropboxError::ApiError {
        code,
        status: response.status,
        message,
    })
}

/// Extract the error text from a v1 error body, `{"error": "..."}` or
/// `{"error": {"field": "..."}}`.
fn error_message(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        match value.get("error") {
            Some(Value::String(s)) => return s.clone(),
            Some(other) => return other.to_string(),
            None => {}
        }
    }
    String::from_utf8_lossy(body).trim().to_string()
}

fn with_query(url: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", url, query)
}
