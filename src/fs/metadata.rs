//! Wire types describing remote entries and accounts.

use serde::Deserialize;

/// Descriptor of a remote entry, returned by every mutating or listing
/// operation.
///
/// `is_dir` and `is_deleted` are independent: a deleted entry keeps the
/// `is_dir` value of its prior kind. `size_bytes` is meaningful only for
/// live files.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    /// Remote path of the entry
    #[serde(default)]
    pub path: String,
    /// Whether the entry is a folder
    #[serde(default)]
    pub is_dir: bool,
    /// Whether the entry has been deleted
    #[serde(default)]
    pub is_deleted: bool,
    /// Size in bytes (wire name `bytes`; 0 for folders)
    #[serde(default, rename = "bytes")]
    pub size_bytes: u64,
    /// Revision identifier
    #[serde(default)]
    pub rev: Option<String>,
    /// Last-modified timestamp, service-formatted
    #[serde(default)]
    pub modified: Option<String>,
    /// MIME type for files
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Namespace root the entry lives under ("sandbox" or "dropbox")
    #[serde(default)]
    pub root: Option<String>,
    /// Child entries; populated by a listing request on a folder
    #[serde(default)]
    pub contents: Vec<Metadata>,
}

impl Metadata {
    /// Whether this entry is a live (not deleted) file.
    pub fn is_live_file(&self) -> bool {
        !self.is_dir && !self.is_deleted
    }
}

/// Storage quota for an account, all values in bytes.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct QuotaInfo {
    /// Total allotted storage
    #[serde(default)]
    pub quota: u64,
    /// Bytes used by the user's own files
    #[serde(default)]
    pub normal: u64,
    /// Bytes used by shared folders
    #[serde(default)]
    pub shared: u64,
}

impl QuotaInfo {
    /// Total used storage in bytes.
    pub fn used(&self) -> u64 {
        self.normal.saturating_add(self.shared)
    }

    /// Free storage in bytes.
    pub fn free(&self) -> u64 {
        self.quota.saturating_sub(self.used())
    }
}

/// Account details for the authenticated user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountInfo {
    /// Numeric account identifier
    #[serde(default)]
    pub uid: u64,
    /// Display name
    #[serde(default)]
    pub display_name: String,
    /// Account email address
    #[serde(default)]
    pub email: String,
    /// Two-letter country code
    #[serde(default)]
    pub country: Option<String>,
    /// Referral link for the account
    #[serde(default)]
    pub referral_link: Option<String>,
    /// Storage quota
    #[serde(default)]
    pub quota_info: QuotaInfo,
}
