//! OAuth 1.0a request signing (HMAC-SHA1).
//!
//! The v1 API authorizes every call with a signed `Authorization: OAuth ...`
//! header. Signing covers the request method, the base URL, and every
//! request parameter (query or form), per RFC 5849.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::{distributions::Alphanumeric, Rng};
use sha1::Sha1;

use crate::error::{DropboxError, Result};

type HmacSha1 = Hmac<Sha1>;

/// RFC 5849 reserved set: everything except ALPHA / DIGIT / "-" / "." / "_" / "~".
const OAUTH_RESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// An OAuth token/secret pair.
///
/// Used for both the temporary (request) token obtained during the
/// authorization handshake and the permanent access token installed in the
/// session afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Token identifier
    pub token: String,
    /// Token secret used for signing
    pub secret: String,
}

impl TokenPair {
    /// Create a new token pair.
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }
}

/// OAuth 1.0a signer holding the application (consumer) credentials.
#[derive(Debug, Clone)]
pub struct Signer {
    consumer_key: String,
    consumer_secret: String,
}

impl Signer {
    /// Create a signer for the given consumer key/secret.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    /// Build the `Authorization` header value for one request.
    ///
    /// # Arguments
    /// * `method` - HTTP method ("GET", "POST", "PUT")
    /// * `url` - Base URL without query string
    /// * `token` - Token pair to sign with; `None` only for the initial
    ///   request-token call
    /// * `params` - All request parameters (query or form) that travel with
    ///   the request; they participate in the signature
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        token: Option<&TokenPair>,
        params: &[(String, String)],
    ) -> Result<String> {
        let mut oauth_params = vec![
            ("oauth_consumer_key".to_string(), self.consumer_key.clone()),
            ("oauth_nonce".to_string(), nonce()),
            (
                "oauth_signature_method".to_string(),
                "HMAC-SHA1".to_string(),
            ),
            ("oauth_timestamp".to_string(), unix_timestamp()?.to_string()),
            ("oauth_version".to_string(), "1.0".to_string()),
        ];
        if let Some(token) = token {
            oauth_params.push(("oauth_token".to_string(), token.token.clone()));
        }

        let mut signed_params = oauth_params.clone();
        signed_params.extend_from_slice(params);

        let base = signature_base_string(method, url, &signed_params);
        let key = self.signing_key(token.map(|t| t.secret.as_str()));
        let signature = STANDARD.encode(hmac_sha1(key.as_bytes(), base.as_bytes())?);

        oauth_params.push(("oauth_signature".to_string(), signature));
        oauth_params.sort();

        let fields = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {}", fields))
    }

    /// Signing key: `encode(consumer_secret) & encode(token_secret)`.
    fn signing_key(&self, token_secret: Option<&str>) -> String {
        format!(
            "{}&{}",
            percent_encode(&self.consumer_secret),
            percent_encode(token_secret.unwrap_or(""))
        )
    }
}

/// Percent-encode a string with the RFC 5849 reserved set.
pub(crate) fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_RESERVED).to_string()
}

/// Construct the signature base string from method, base URL and parameters.
pub(crate) fn signature_base_string(method: &str, url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let joined = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&joined)
    )
}

fn hmac_sha1(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha1::new_from_slice(key)
        .map_err(|e| DropboxError::SigningError(format!("Invalid HMAC key: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Random 32-character alphanumeric nonce.
fn nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

fn unix_timestamp() -> Result<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| DropboxError::SigningError(format!("System clock error: {}", e)))
}

/// Parse a token-endpoint response body of the form
/// `oauth_token_secret=...&oauth_token=...`.
pub(crate) fn parse_token_response(body: &str) -> Result<TokenPair> {
    let mut token = None;
    let mut secret = None;

    for pair in body.trim().split('&') {
        let (key, value) = match pair.split_once('=') {
            Some(kv) => kv,
            None => continue,
        };
        let value = percent_decode_str(value)
            .decode_utf8()
            .map_err(|_| DropboxError::InvalidResponse)?
            .into_owned();
        match key {
            "oauth_token" => token = Some(value),
            "oauth_token_secret" => secret = Some(value),
            _ => {}
        }
    }

    match (token, secret) {
        (Some(token), Some(secret)) => Ok(TokenPair { token, secret }),
        _ => Err(DropboxError::InvalidResponse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    #[test]
    fn test_percent_encoding_reserved_set() {
        assert_eq!(percent_encode("abcXYZ019"), "abcXYZ019");
        assert_eq!(percent_encode("-._~"), "-._~");
        assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(percent_encode("/testdir/file"), "%2Ftestdir%2Ffile");
        assert_eq!(percent_encode("a=b&c"), "a%3Db%26c");
    }

    #[test]
    fn test_hmac_sha1_rfc2202_vector() {
        // RFC 2202 test case 2
        let out = hmac_sha1(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(hex(&out), "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79");
    }

    #[test]
    fn test_signature_base_string() {
        let params = vec![
            ("oauth_consumer_key".to_string(), "abc".to_string()),
            ("oauth_nonce".to_string(), "xyz".to_string()),
            ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
            ("oauth_timestamp".to_string(), "123".to_string()),
            ("oauth_version".to_string(), "1.0".to_string()),
        ];
        let base = signature_base_string(
            "get",
            "https://api.dropbox.com/1/oauth/request_token",
            &params,
        );
        assert_eq!(
            base,
            "GET&https%3A%2F%2Fapi.dropbox.com%2F1%2Foauth%2Frequest_token&\
             oauth_consumer_key%3Dabc%26oauth_nonce%3Dxyz%26oauth_signature_method%3DHMAC-SHA1%26\
             oauth_timestamp%3D123%26oauth_version%3D1.0"
        );
    }

    #[test]
    fn test_base_string_sorts_and_double_encodes_params() {
        // Parameter values with reserved characters are encoded before
        // sorting and encoded again as part of the parameter string.
        let params = vec![
            ("b".to_string(), "2 2".to_string()),
            ("a".to_string(), "1".to_string()),
        ];
        let base = signature_base_string("POST", "https://example.com/r", &params);
        assert_eq!(base, "POST&https%3A%2F%2Fexample.com%2Fr&a%3D1%26b%3D2%25202");
    }

    #[test]
    fn test_signing_key() {
        let signer = Signer::new("ck", "cs");
        assert_eq!(signer.signing_key(Some("ts")), "cs&ts");
        assert_eq!(signer.signing_key(None), "cs&");
    }

    #[test]
    fn test_authorization_header_shape() {
        let signer = Signer::new("key", "secret");
        let token = TokenPair::new("tok", "toksecret");
        let header = signer
            .authorization_header(
                "POST",
                "https://api.dropbox.com/1/fileops/delete",
                Some(&token),
                &[("path".to_string(), "/x".to_string())],
            )
            .unwrap();

        assert!(header.starts_with("OAuth "));
        assert!(header.contains("oauth_consumer_key=\"key\""));
        assert!(header.contains("oauth_token=\"tok\""));
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(header.contains("oauth_signature=\""));
        assert!(header.contains("oauth_version=\"1.0\""));
        // Request parameters are signed but never placed in the header.
        assert!(!header.contains("path="));
    }

    #[test]
    fn test_nonce_is_alphanumeric_and_unique() {
        let a = nonce();
        let b = nonce();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_token_response() {
        let pair =
            parse_token_response("oauth_token_secret=abcd1234&oauth_token=efgh5678").unwrap();
        assert_eq!(pair.token, "efgh5678");
        assert_eq!(pair.secret, "abcd1234");
    }

    #[test]
    fn test_parse_token_response_ignores_extras() {
        let pair = parse_token_response(
            "oauth_token=t&oauth_token_secret=s&oauth_callback_confirmed=true",
        )
        .unwrap();
        assert_eq!(pair.token, "t");
        assert_eq!(pair.secret, "s");
    }

    #[test]
    fn test_parse_token_response_missing_fields() {
        assert!(parse_token_response("oauth_token=only").is_err());
        assert!(parse_token_response("").is_err());
    }
}
