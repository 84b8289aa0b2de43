//! Remote file and folder operations.

use tracing::warn;

use crate::api::client::encode_path;
use crate::api::{ErrorCode, API_URL, CONTENT_URL};
use crate::client::DropboxClient;
use crate::error::{DropboxError, Result};
use crate::fs::metadata::Metadata;
use crate::fs::request::{GetRequest, GetResponse, UploadRequest};

impl DropboxClient {
    /// Create a directory at `path`.
    ///
    /// On success the returned metadata has `is_dir` set and `path` equal to
    /// the requested path. An existing entry at the path fails with
    /// `Conflict`.
    pub async fn create_folder(&self, path: &str) -> Result<Metadata> {
        self.fileop("create_folder", &[("path", path)]).await
    }

    /// Delete the file or folder at `path` (recursively for folders).
    ///
    /// The returned metadata has `is_deleted` set and `is_dir` reflecting
    /// the entry's prior kind. An absent path fails with `NotFound`.
    pub async fn delete_file(&self, path: &str) -> Result<Metadata> {
        self.fileop("delete", &[("path", path)]).await
    }

    /// Server-side copy of `from_path` to `to_path`.
    ///
    /// Size, kind and deleted-state are preserved from the source; the
    /// returned metadata's path is `to_path`. Fails with `NotFound` if the
    /// source is absent and `Conflict` if the destination is occupied.
    pub async fn copy_file(&self, from_path: &str, to_path: &str) -> Result<Metadata> {
        self.fileop("copy", &[("from_path", from_path), ("to_path", to_path)])
            .await
    }

    /// Server-side move/rename of `from_path` to `to_path`.
    ///
    /// Same result contract as [`copy_file`](Self::copy_file), but the
    /// source ceases to exist at its old path. Conflict handling for an
    /// occupied destination is service-defined; v1 answers 403, surfaced
    /// as `Conflict`.
    pub async fn move_file(&self, from_path: &str, to_path: &str) -> Result<Metadata> {
        self.fileop("move", &[("from_path", from_path), ("to_path", to_path)])
            .await
    }

    /// Upload `req.data()` to `req.path()`.
    ///
    /// With overwrite enabled (the default) an existing entry at the exact
    /// path is replaced and the returned path equals the request path. With
    /// overwrite disabled a conflicting upload is stored under a renamed
    /// path (numeric suffix) — still a success, the caller sees the actual
    /// path in the returned metadata. Either way the metadata describes the
    /// stored object: a live file of `req.data().len()` bytes.
    pub async fn upload_file(&self, req: &UploadRequest) -> Result<Metadata> {
        let token = self.session()?;
        let url = format!(
            "{}/files_put/{}{}",
            CONTENT_URL,
            self.root.as_str(),
            encode_path(req.path())
        );
        let query = vec![("overwrite".to_string(), req.overwrite().to_string())];

        let value = self
            .api
            .put_content(&url, &query, req.data().to_vec(), token)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Download content from `req.path()`.
    ///
    /// Without a range, returns the full content with code
    /// [`ErrorCode::Success`]. With a range `(offset, length)`, returns
    /// exactly `length` bytes starting at `offset` with code
    /// [`ErrorCode::PartialContent`]. A range beyond the end of the file
    /// fails with `RangeNotSatisfiable`.
    pub async fn get_file(&self, req: &GetRequest) -> Result<GetResponse> {
        if let Some((_, 0)) = req.range() {
            return Err(DropboxError::Custom(
                "Byte range length must be non-zero".to_string(),
            ));
        }

        let token = self.session()?;
        let url = format!(
            "{}/files/{}{}",
            CONTENT_URL,
            self.root.as_str(),
            encode_path(req.path())
        );

        let response = self.api.get_content(&url, token, req.range()).await?;

        let code = ErrorCode::from_status(response.status);
        if !code.is_success() {
            // get_content only passes 2xx through; anything else here is a
            // status outside the documented contract.
            return Err(DropboxError::InvalidResponse);
        }

        let header = response
            .metadata_header
            .ok_or(DropboxError::InvalidResponse)?;
        let metadata: Metadata = serde_json::from_str(&header)?;

        if let Some((_, length)) = req.range() {
            if response.body.len() as u64 != length {
                warn!(
                    requested = length,
                    received = response.body.len(),
                    "partial fetch returned unexpected length"
                );
            }
        }

        Ok(GetResponse {
            code,
            data: response.body,
            metadata,
        })
    }

    /// Fetch metadata for `path`; with `list` set, `contents` holds the
    /// entries of a folder.
    pub async fn metadata(&self, path: &str, list: bool) -> Result<Metadata> {
        let token = self.session()?;
        let url = format!(
            "{}/metadata/{}{}",
            API_URL,
            self.root.as_str(),
            encode_path(path)
        );
        let params = vec![("list".to_string(), list.to_string())];

        let value = self.api.get_json(&url, &params, token).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Shared path for the fileops family: POST with root + params, decode
    /// the resulting metadata.
    async fn fileop(&self, op: &str, params: &[(&str, &str)]) -> Result<Metadata> {
        let token = self.session()?;
        let url = format!("{}/fileops/{}", API_URL, op);

        let mut form = vec![("root".to_string(), self.root.as_str().to_string())];
        form.extend(
            params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );

        let value = self.api.post_form_json(&url, &form, token).await?;
        Ok(serde_json::from_value(value)?)
    }
}
