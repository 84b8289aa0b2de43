//! # dropboxlib
//!
//! Rust client library for the Dropbox REST API (v1, OAuth 1.0a).
//!
//! ## Features
//!
//! - **Authentication**: interactive OAuth 1.0a handshake (request token →
//!   out-of-band user authorization → access token), or direct installation
//!   of a previously obtained token pair. HTTP proxy support.
//! - **Account**: display name, email and quota via `account_info`.
//! - **File operations**:
//!   - Create folders (`create_folder`), delete files/folders recursively
//!     (`delete_file`).
//!   - Server-side copy (`copy_file`) and move/rename (`move_file`).
//!   - Metadata/stat with optional folder listing (`metadata`).
//! - **Content transfer**:
//!   - Upload with overwrite control; a non-overwriting upload to an
//!     occupied path is auto-renamed by the service, not an error.
//!   - Download full content, or a byte range reported as partial content.
//!
//! Every operation reports its outcome through [`Result`]; remote failures
//! carry an [`ErrorCode`] derived from the service's HTTP status, so callers
//! can branch on `NotFound`, `Conflict`, `AuthError` and friends without
//! string matching.
//!
//! ## Example: stored token
//!
//! ```no_run
//! use dropboxlib::{DropboxClient, DropboxConfig, GetRequest, UploadRequest};
//!
//! # async fn example() -> dropboxlib::Result<()> {
//! let client = DropboxClient::new(DropboxConfig::new("app-key", "app-secret"))?;
//! client.set_access_token("access-token", "access-secret")?;
//!
//! // Upload a file
//! let md = client
//!     .upload_file(&UploadRequest::new("/notes.txt", b"hello".to_vec()))
//!     .await?;
//! println!("stored {} bytes at {}", md.size_bytes, md.path);
//!
//! // Fetch part of it back
//! let res = client
//!     .get_file(&GetRequest::new("/notes.txt").with_range(0, 4))
//!     .await?;
//! assert!(res.is_partial());
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: interactive authorization
//!
//! ```no_run
//! use dropboxlib::{authorize_url, DropboxClient, DropboxConfig};
//!
//! # async fn example() -> dropboxlib::Result<()> {
//! let client = DropboxClient::new(DropboxConfig::new("app-key", "app-secret"))?;
//!
//! client
//!     .authenticate(|token, _secret| {
//!         println!("Visit {} and press enter", authorize_url(token));
//!         let mut line = String::new();
//!         let _ = std::io::stdin().read_line(&mut line);
//!     })
//!     .await?;
//!
//! println!("token: {:?}", client.access_token());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod fs;
pub mod http;
pub mod oauth;

// Re-export commonly used types
pub use api::ErrorCode;
pub use client::{authorize_url, DropboxClient, DropboxConfig, Root};
pub use error::{DropboxError, Result};
pub use fs::{AccountInfo, GetRequest, GetResponse, Metadata, QuotaInfo, UploadRequest};
pub use oauth::TokenPair;
