//! Request/response value types for content transfer.

use crate::api::ErrorCode;
use crate::fs::Metadata;

/// Parameters for an upload, constructed per call.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    path: String,
    data: Vec<u8>,
    overwrite: bool,
}

impl UploadRequest {
    /// Create an upload request for `path`. Overwrite defaults to true.
    pub fn new(path: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            data,
            overwrite: true,
        }
    }

    /// Control conflict behavior: with overwrite disabled, an upload to an
    /// occupied path is auto-renamed by the service rather than replacing
    /// the existing entry.
    pub fn set_overwrite(&mut self, overwrite: bool) {
        self.overwrite = overwrite;
    }

    /// Builder-style variant of [`set_overwrite`](Self::set_overwrite).
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Target remote path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Payload bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Current overwrite setting.
    pub fn overwrite(&self) -> bool {
        self.overwrite
    }
}

/// Parameters for a download. Without a range the full content is fetched.
#[derive(Debug, Clone)]
pub struct GetRequest {
    path: String,
    range: Option<(u64, u64)>,
}

impl GetRequest {
    /// Create a full-content download request for `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            range: None,
        }
    }

    /// Restrict the fetch to `length` bytes starting at `offset`.
    pub fn set_range(&mut self, offset: u64, length: u64) {
        self.range = Some((offset, length));
    }

    /// Builder-style variant of [`set_range`](Self::set_range).
    pub fn with_range(mut self, offset: u64, length: u64) -> Self {
        self.range = Some((offset, length));
        self
    }

    /// Target remote path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Requested (offset, length) pair, if any.
    pub fn range(&self) -> Option<(u64, u64)> {
        self.range
    }
}

/// Result of a download.
///
/// `code()` is [`ErrorCode::Success`] for a full fetch and
/// [`ErrorCode::PartialContent`] for a range fetch; both are success
/// variants and callers branch on them, not on an error.
#[derive(Debug)]
pub struct GetResponse {
    pub(crate) code: ErrorCode,
    pub(crate) data: Vec<u8>,
    pub(crate) metadata: Metadata,
}

impl GetResponse {
    /// Result code: `Success` (full content) or `PartialContent`.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Downloaded bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of bytes returned.
    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    /// Consume the response, returning the bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Metadata of the fetched entry, decoded from the response header.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Whether this was a byte-range fetch.
    pub fn is_partial(&self) -> bool {
        self.code == ErrorCode::PartialContent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_request_defaults() {
        let req = UploadRequest::new("/testdir/testfile", vec![1, 2, 3]);
        assert_eq!(req.path(), "/testdir/testfile");
        assert_eq!(req.data(), &[1, 2, 3]);
        assert!(req.overwrite());
    }

    #[test]
    fn test_upload_request_overwrite_flag() {
        let mut req = UploadRequest::new("/f", vec![]);
        req.set_overwrite(false);
        assert!(!req.overwrite());

        let req = UploadRequest::new("/f", vec![]).with_overwrite(false);
        assert!(!req.overwrite());
    }

    #[test]
    fn test_get_request_range() {
        let req = GetRequest::new("/testdir/testfile");
        assert!(req.range().is_none());

        let req = req.with_range(1177, 6656);
        assert_eq!(req.range(), Some((1177, 6656)));

        let mut req = GetRequest::new("/f");
        req.set_range(0, 16);
        assert_eq!(req.range(), Some((0, 16)));
    }

    #[test]
    fn test_get_response_accessors() {
        let res = GetResponse {
            code: ErrorCode::PartialContent,
            data: vec![9, 8, 7],
            metadata: Metadata {
                path: "/f".to_string(),
                size_bytes: 100,
                ..Default::default()
            },
        };
        assert!(res.is_partial());
        assert_eq!(res.data_len(), 3);
        assert_eq!(res.metadata().size_bytes, 100);
        assert_eq!(res.into_data(), vec![9, 8, 7]);
    }
}
