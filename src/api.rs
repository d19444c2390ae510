//! Daemon record types
//!
//! Shapes of the records handed over by the API client, plus the derived
//! view entries produced for rendering. Field names follow the daemon's
//! lower-case JSON keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::logic::money::Money;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RemoteFileRecord {
    pub siapath: String,
    #[serde(default)]
    pub filesize: u64,
    /// 0 until the first piece is uploaded, then approaches the target
    #[serde(default)]
    pub redundancy: f64,
    /// May exceed 100 because of upstream rounding
    #[serde(default)]
    pub uploadprogress: f64,
    #[serde(default)]
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HostQuote {
    #[serde(default)]
    pub storageprice: Money,
    #[serde(default)]
    pub uploadbandwidthprice: Money,
    #[serde(default)]
    pub downloadbandwidthprice: Money,
    #[serde(default)]
    pub contractprice: Money,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DownloadRecord {
    pub siapath: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub filesize: u64,
    #[serde(default)]
    pub received: u64,
    pub starttime: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ContractRecord {
    #[serde(default)]
    pub renterfunds: Money,
}

/// Helper function to deserialize null as empty vector
fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Response body of `/renter/files`
#[derive(Debug, Clone, Deserialize)]
pub struct FilesResponse {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub files: Vec<RemoteFileRecord>,
}

/// Response body of `/hostdb/active`
#[derive(Debug, Clone, Deserialize)]
pub struct HostsResponse {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub hosts: Vec<HostQuote>,
}

/// Response body of `/renter/downloads`
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadsResponse {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub downloads: Vec<DownloadRecord>,
}

/// Response body of `/renter/contracts`
#[derive(Debug, Clone, Deserialize)]
pub struct ContractsResponse {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub contracts: Vec<ContractRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Directory,
}

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEntry {
    pub name: String,
    /// Directory entries end with `/`
    pub siapath: String,
    pub size: String,
    pub available: bool,
    pub redundancy: f64,
    pub uploadprogress: u32,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

impl ListEntry {
    pub fn is_directory(&self) -> bool {
        self.entry_type == EntryType::Directory
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransferStatus {
    Downloading,
    Completed,
    Uploading,
    #[serde(rename = "Boosting Redundancy")]
    BoostingRedundancy,
}

impl TransferStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TransferStatus::Downloading => "Downloading",
            TransferStatus::Completed => "Completed",
            TransferStatus::Uploading => "Uploading",
            TransferStatus::BoostingRedundancy => "Boosting Redundancy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferType {
    Download,
    Upload,
}

/// One row of the transfer queue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferEntry {
    pub siapath: String,
    pub name: String,
    /// Whole percent, 0 to 100
    pub progress: u32,
    pub status: TransferStatus,
    #[serde(rename = "type")]
    pub transfer_type: TransferType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starttime: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}
