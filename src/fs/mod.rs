//! Remote filesystem types and operations.

pub mod metadata;
pub mod operations;
pub mod request;

pub use metadata::{AccountInfo, Metadata, QuotaInfo};
pub use request::{GetRequest, GetResponse, UploadRequest};
