//! Dropbox API client and result codes.

pub mod client;
pub mod error;

pub use client::{ApiClient, API_URL, AUTHORIZE_URL, CONTENT_URL};
pub use error::ErrorCode;
