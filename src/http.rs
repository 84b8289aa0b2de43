//! HTTP client wrapper for signed API requests.

use reqwest::Client;

use crate::error::{DropboxError, Result};

/// Response header carrying entry metadata on content downloads/uploads.
pub(crate) const METADATA_HEADER: &str = "x-dropbox-metadata";

/// Raw response handed back to the API layer.
///
/// Status interpretation happens in [`crate::api::ApiClient`]; this layer
/// only moves bytes.
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Value of the `x-dropbox-metadata` header, if present
    pub metadata_header: Option<String>,
    /// Response body
    pub body: Vec<u8>,
}

/// HTTP client for making requests to the service endpoints.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new HTTP client with a proxy.
    pub fn with_proxy(proxy: &str) -> Result<Self> {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| DropboxError::Custom(format!("Invalid proxy: {}", e)))?;

        let client = Client::builder()
            .proxy(proxy)
            .build()
            .map_err(|e| DropboxError::Custom(format!("Failed to build client: {}", e)))?;

        Ok(Self { client })
    }

    /// Perform a GET request, optionally with a byte-range header.
    ///
    /// # Arguments
    /// * `url` - Full URL including any query string
    /// * `authorization` - Signed `Authorization` header value
    /// * `range` - Optional (offset, length) pair; rendered as an inclusive
    ///   `Range: bytes=` header
    pub async fn get(
        &self,
        url: &str,
        authorization: &str,
        range: Option<(u64, u64)>,
    ) -> Result<HttpResponse> {
        let mut request = self
            .client
            .get(url)
            .header("Authorization", authorization);

        if let Some((offset, length)) = range {
            request = request.header("Range", range_header(offset, length));
        }

        Self::execute(request).await
    }

    /// Perform a POST request with a form-urlencoded body.
    pub async fn post_form(
        &self,
        url: &str,
        authorization: &str,
        form: &[(String, String)],
    ) -> Result<HttpResponse> {
        let request = self
            .client
            .post(url)
            .header("Authorization", authorization)
            .form(form);

        Self::execute(request).await
    }

    /// Perform a PUT request with a raw byte body.
    pub async fn put(&self, url: &str, authorization: &str, body: Vec<u8>) -> Result<HttpResponse> {
        let request = self
            .client
            .put(url)
            .header("Authorization", authorization)
            .header("Content-Type", "application/octet-stream")
            .body(body);

        Self::execute(request).await
    }

    async fn execute(request: reqwest::RequestBuilder) -> Result<HttpResponse> {
        let response = request.send().await?;

        let status = response.status().as_u16();
        let metadata_header = response
            .headers()
            .get(METADATA_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse {
            status,
            metadata_header,
            body,
        })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Render an inclusive HTTP Range header for (offset, length).
pub(crate) fn range_header(offset: u64, length: u64) -> String {
    format!("bytes={}-{}", offset, offset + length.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let _client = HttpClient::new();
        let _default = HttpClient::default();
    }

    #[test]
    fn test_proxy_creation() {
        let client = HttpClient::with_proxy("http://127.0.0.1:8080");
        assert!(client.is_ok());
    }

    #[test]
    fn test_proxy_invalid() {
        let res = HttpClient::with_proxy(":::::::");
        assert!(res.is_err());
    }

    #[test]
    fn test_range_header_is_inclusive() {
        assert_eq!(range_header(0, 10), "bytes=0-9");
        assert_eq!(range_header(1177, 6656), "bytes=1177-7832");
        assert_eq!(range_header(5, 1), "bytes=5-5");
    }
}
