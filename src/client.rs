//! Client construction, configuration and the session state machine.

use std::sync::OnceLock;
use std::time::Duration;

use tracing::debug;

use crate::api::{ApiClient, API_URL, AUTHORIZE_URL};
use crate::error::{DropboxError, Result};
use crate::fs::AccountInfo;
use crate::oauth::{percent_encode, Signer, TokenPair};

/// Namespace root operations act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Root {
    /// App folder access ("sandbox")
    #[default]
    Sandbox,
    /// Full-Dropbox access ("dropbox")
    Dropbox,
}

impl Root {
    /// Wire name of the root.
    pub fn as_str(&self) -> &'static str {
        match self {
            Root::Sandbox => "sandbox",
            Root::Dropbox => "dropbox",
        }
    }
}

/// Client configuration, passed explicitly at construction.
///
/// Credentials are injected by the caller; the library never reads the
/// process environment.
#[derive(Debug, Clone)]
pub struct DropboxConfig {
    /// Application (consumer) key
    pub consumer_key: String,
    /// Application (consumer) secret
    pub consumer_secret: String,
    /// Namespace root for all file operations
    pub root: Root,
    /// Optional proxy URL, e.g. "http://proxy:8080"
    pub proxy: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl DropboxConfig {
    /// Configuration with default root (sandbox) and a 20 second timeout.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            root: Root::Sandbox,
            proxy: None,
            timeout: Duration::from_secs(20),
        }
    }

    /// Select the namespace root.
    pub fn with_root(mut self, root: Root) -> Self {
        self.root = root;
        self
    }

    /// Route requests through a proxy.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the Dropbox REST API (v1).
///
/// A client starts unauthenticated. Either [`authenticate`](Self::authenticate)
/// (interactive OAuth handshake) or [`set_access_token`](Self::set_access_token)
/// (previously obtained pair) moves it to the authenticated state; the token
/// pair is installed once and only read afterwards, so independent operations
/// may run concurrently on a shared client.
///
/// # Example
/// ```no_run
/// use dropboxlib::{DropboxClient, DropboxConfig};
///
/// # async fn example() -> dropboxlib::Result<()> {
/// let client = DropboxClient::new(DropboxConfig::new("app-key", "app-secret"))?;
/// client.set_access_token("token", "token-secret")?;
///
/// let info = client.account_info().await?;
/// println!("{} <{}>", info.display_name, info.email);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DropboxClient {
    pub(crate) api: ApiClient,
    pub(crate) root: Root,
    tokens: OnceLock<TokenPair>,
}

impl DropboxClient {
    /// Create an unauthenticated client.
    pub fn new(config: DropboxConfig) -> Result<Self> {
        let signer = Signer::new(&config.consumer_key, &config.consumer_secret);
        let api = ApiClient::new(signer, config.proxy.as_deref(), config.timeout)?;
        Ok(Self {
            api,
            root: config.root,
            tokens: OnceLock::new(),
        })
    }

    /// Run the interactive OAuth 1.0a handshake.
    ///
    /// Requests a temporary token, invokes `authorize` with the token and
    /// its secret so the caller can complete the out-of-band authorization
    /// step (see [`authorize_url`]), then exchanges the temporary token for
    /// a permanent access pair and installs it. The callback is synchronous:
    /// the handshake suspends until it returns.
    ///
    /// Fails with `AuthError` if either token endpoint rejects the request
    /// and `AlreadyAuthenticated` if a pair is already installed.
    pub async fn authenticate<F>(&self, authorize: F) -> Result<()>
    where
        F: FnOnce(&str, &str),
    {
        if self.tokens.get().is_some() {
            return Err(DropboxError::AlreadyAuthenticated);
        }

        let request_token = self
            .api
            .token_endpoint(&format!("{}/oauth/request_token", API_URL), None)
            .await?;
        debug!("obtained request token, waiting for out-of-band authorization");

        // Blocking human-in-the-loop step.
        authorize(&request_token.token, &request_token.secret);

        let access = self
            .api
            .token_endpoint(
                &format!("{}/oauth/access_token", API_URL),
                Some(&request_token),
            )
            .await?;
        debug!("access token installed");

        self.tokens
            .set(access)
            .map_err(|_| DropboxError::AlreadyAuthenticated)
    }

    /// Install a previously obtained access token pair, bypassing the
    /// interactive handshake. No network call; a server-side invalid token
    /// surfaces as `AuthError` on the first operation.
    pub fn set_access_token(
        &self,
        token: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<()> {
        self.tokens
            .set(TokenPair::new(token, secret))
            .map_err(|_| DropboxError::AlreadyAuthenticated)
    }

    /// The installed access token, `None` before authentication.
    pub fn access_token(&self) -> Option<&str> {
        self.tokens.get().map(|t| t.token.as_str())
    }

    /// The installed access token secret, `None` before authentication.
    pub fn access_token_secret(&self) -> Option<&str> {
        self.tokens.get().map(|t| t.secret.as_str())
    }

    /// Whether an access token pair is installed.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.get().is_some()
    }

    /// Token pair for signing, or `Unauthenticated`.
    pub(crate) fn session(&self) -> Result<&TokenPair> {
        self.tokens.get().ok_or(DropboxError::Unauthenticated)
    }

    /// Fetch display name, email and quota for the authenticated account.
    pub async fn account_info(&self) -> Result<AccountInfo> {
        let token = self.session()?;
        let value = self
            .api
            .get_json(&format!("{}/account/info", API_URL), &[], token)
            .await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// URL the user must visit to authorize a request token.
pub fn authorize_url(request_token: &str) -> String {
    format!(
        "{}?oauth_token={}",
        AUTHORIZE_URL,
        percent_encode(request_token)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DropboxClient {
        DropboxClient::new(DropboxConfig::new("key", "secret")).unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = DropboxConfig::new("k", "s");
        assert_eq!(config.root, Root::Sandbox);
        assert!(config.proxy.is_none());
        assert_eq!(config.timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_config_builders() {
        let config = DropboxConfig::new("k", "s")
            .with_root(Root::Dropbox)
            .with_proxy("http://127.0.0.1:8080")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.root, Root::Dropbox);
        assert_eq!(config.proxy.as_deref(), Some("http://127.0.0.1:8080"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_root_wire_names() {
        assert_eq!(Root::Sandbox.as_str(), "sandbox");
        assert_eq!(Root::Dropbox.as_str(), "dropbox");
    }

    #[test]
    fn test_unauthenticated_client() {
        let client = client();
        assert!(!client.is_authenticated());
        assert!(client.access_token().is_none());
        assert!(client.access_token_secret().is_none());
        assert!(matches!(
            client.session(),
            Err(DropboxError::Unauthenticated)
        ));
    }

    #[test]
    fn test_set_access_token_installs_once() {
        let client = client();
        client.set_access_token("tok", "sec").unwrap();

        assert!(client.is_authenticated());
        assert_eq!(client.access_token(), Some("tok"));
        assert_eq!(client.access_token_secret(), Some("sec"));

        // Second install is rejected, state unchanged.
        assert!(matches!(
            client.set_access_token("other", "other"),
            Err(DropboxError::AlreadyAuthenticated)
        ));
        assert_eq!(client.access_token(), Some("tok"));
    }

    #[tokio::test]
    async fn test_authenticate_rejected_when_already_authenticated() {
        let client = client();
        client.set_access_token("tok", "sec").unwrap();

        let result = client.authenticate(|_, _| panic!("callback must not run")).await;
        assert!(matches!(result, Err(DropboxError::AlreadyAuthenticated)));
    }

    #[test]
    fn test_authorize_url() {
        assert_eq!(
            authorize_url("abc123"),
            "https://www.dropbox.com/1/oauth/authorize?oauth_token=abc123"
        );
        // Token values are percent-encoded.
        assert_eq!(
            authorize_url("a/b"),
            "https://www.dropbox.com/1/oauth/authorize?oauth_token=a%2Fb"
        );
    }
}
