use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A Graph entity that can be requested with a `$select` projection
pub trait GraphResource: DeserializeOwned {
    /// Graph property names requested for this entity
    const SELECT: &'static [&'static str];

    /// Comma-separated `$select` query value
    fn select_param() -> String {
        Self::SELECT.join(",")
    }
}

/// Collection envelope returned by list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphCollection<T> {
    pub value: Vec<T>,
    #[serde(rename = "@odata.nextLink", default, skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
}

/// Site returned by `get_site_info`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    pub created_date_time: DateTime<Utc>,
    #[serde(default)]
    pub last_modified_date_time: Option<DateTime<Utc>>,
}

impl GraphResource for Site {
    const SELECT: &'static [&'static str] = &[
        "id",
        "name",
        "displayName",
        "webUrl",
        "createdDateTime",
        "lastModifiedDateTime",
    ];
}

/// Hostname and site details returned by `get_hostname_info`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteHost {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub site_collection: Option<SiteCollection>,
    pub created_date_time: DateTime<Utc>,
    #[serde(default)]
    pub last_modified_date_time: Option<DateTime<Utc>>,
}

impl GraphResource for SiteHost {
    const SELECT: &'static [&'static str] = &[
        "id",
        "name",
        "displayName",
        "description",
        "webUrl",
        "siteCollection",
        "createdDateTime",
        "lastModifiedDateTime",
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteCollection {
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub data_location_code: Option<String>,
}

/// Document library returned by `list_drives`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drive {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub drive_type: Option<String>,
    pub created_date_time: DateTime<Utc>,
    #[serde(default)]
    pub last_modified_date_time: Option<DateTime<Utc>>,
}

impl GraphResource for Drive {
    const SELECT: &'static [&'static str] = &[
        "id",
        "name",
        "description",
        "webUrl",
        "driveType",
        "createdDateTime",
        "lastModifiedDateTime",
    ];
}

/// Folder metadata returned by `get_dir_info`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderInfo {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    pub created_date_time: DateTime<Utc>,
    #[serde(default)]
    pub last_modified_date_time: Option<DateTime<Utc>>,
}

impl GraphResource for FolderInfo {
    const SELECT: &'static [&'static str] = &[
        "id",
        "name",
        "webUrl",
        "size",
        "createdDateTime",
        "lastModifiedDateTime",
    ];
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentitySet {
    #[serde(default)]
    pub user: Option<Identity>,
}

impl IdentitySet {
    fn user_name(&self) -> Option<String> {
        self.user.as_ref().and_then(|u| u.display_name.clone())
    }

    fn user_email(&self) -> Option<String> {
        self.user.as_ref().and_then(|u| u.email.clone())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDriveItem {
    id: String,
    name: String,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    web_url: Option<String>,
    #[serde(default)]
    folder: Option<serde_json::Value>,
    created_date_time: DateTime<Utc>,
    #[serde(default)]
    last_modified_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    last_modified_by: Option<IdentitySet>,
    // Flattened fields, present when reading back a serialized `DriveItem`
    #[serde(default)]
    extension: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    is_folder: Option<bool>,
    #[serde(default)]
    last_modified_by_name: Option<String>,
    #[serde(default)]
    last_modified_by_email: Option<String>,
}

/// File or folder returned by `list_dir`
///
/// `extension` is derived from the name for files and is `None` for
/// folders. `path` is the folder that was listed. Serializes to camelCase
/// and reads back either that form or Graph's `driveItem` shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawDriveItem", rename_all = "camelCase")]
pub struct DriveItem {
    pub id: String,
    pub name: String,
    pub extension: Option<String>,
    pub size: Option<u64>,
    pub path: String,
    pub web_url: Option<String>,
    pub is_folder: bool,
    pub created_date_time: DateTime<Utc>,
    pub last_modified_date_time: Option<DateTime<Utc>>,
    pub last_modified_by_name: Option<String>,
    pub last_modified_by_email: Option<String>,
}

impl From<RawDriveItem> for DriveItem {
    fn from(raw: RawDriveItem) -> Self {
        let is_folder = raw.is_folder.unwrap_or(raw.folder.is_some());
        let extension = if is_folder {
            None
        } else {
            raw.extension
                .or_else(|| raw.name.rsplit_once('.').map(|(_, ext)| ext.to_string()))
        };
        let modified_by = raw.last_modified_by.unwrap_or_default();

        Self {
            id: raw.id,
            name: raw.name,
            extension,
            size: raw.size,
            path: raw.path.unwrap_or_else(|| "/".to_string()),
            web_url: raw.web_url,
            is_folder,
            created_date_time: raw.created_date_time,
            last_modified_date_time: raw.last_modified_date_time,
            last_modified_by_name: raw.last_modified_by_name.or_else(|| modified_by.user_name()),
            last_modified_by_email: raw
                .last_modified_by_email
                .or_else(|| modified_by.user_email()),
        }
    }
}

impl GraphResource for DriveItem {
    const SELECT: &'static [&'static str] = &[
        "id",
        "name",
        "size",
        "webUrl",
        "folder",
        "createdDateTime",
        "lastModifiedDateTime",
        "lastModifiedBy",
    ];
}

/// Folder returned by `create_dir`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedFolder {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    pub created_date_time: DateTime<Utc>,
}

impl GraphResource for CreatedFolder {
    const SELECT: &'static [&'static str] = &["id", "name", "webUrl", "createdDateTime"];
}

/// Item returned by rename and move operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    pub created_date_time: DateTime<Utc>,
    #[serde(default)]
    pub last_modified_date_time: Option<DateTime<Utc>>,
}

impl GraphResource for ItemSummary {
    const SELECT: &'static [&'static str] = &[
        "id",
        "name",
        "webUrl",
        "size",
        "createdDateTime",
        "lastModifiedDateTime",
    ];
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFileInfo {
    id: String,
    name: String,
    #[serde(default)]
    web_url: Option<String>,
    #[serde(default)]
    size: Option<u64>,
    created_date_time: DateTime<Utc>,
    #[serde(default)]
    last_modified_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    last_modified_by: Option<IdentitySet>,
    #[serde(default)]
    last_modified_by_email: Option<String>,
}

/// File metadata returned by `get_file_info`
///
/// Serializes to camelCase and reads back either that form or Graph's shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawFileInfo", rename_all = "camelCase")]
pub struct FileInfo {
    pub id: String,
    pub name: String,
    pub web_url: Option<String>,
    pub size: Option<u64>,
    pub created_date_time: DateTime<Utc>,
    pub last_modified_date_time: Option<DateTime<Utc>>,
    pub last_modified_by_email: Option<String>,
}

impl From<RawFileInfo> for FileInfo {
    fn from(raw: RawFileInfo) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            web_url: raw.web_url,
            size: raw.size,
            created_date_time: raw.created_date_time,
            last_modified_date_time: raw.last_modified_date_time,
            last_modified_by_email: raw
                .last_modified_by_email
                .or_else(|| raw.last_modified_by.and_then(|by| by.user_email())),
        }
    }
}

impl GraphResource for FileInfo {
    const SELECT: &'static [&'static str] = &[
        "id",
        "name",
        "webUrl",
        "size",
        "createdDateTime",
        "lastModifiedDateTime",
        "lastModifiedBy",
    ];
}

/// Accepted copy operation returned by `copy_file`
///
/// Graph copies asynchronously; `monitor_url` is the `Location` header
/// that reports progress, when Graph provides one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CopyJob {
    pub monitor_url: Option<String>,
}

/// File returned by `upload_file`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

impl GraphResource for UploadedFile {
    const SELECT: &'static [&'static str] = &["id", "name", "size"];
}

/// SharePoint list returned by `list_lists`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharePointList {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    pub created_date_time: DateTime<Utc>,
    #[serde(default)]
    pub last_modified_date_time: Option<DateTime<Utc>>,
}

impl GraphResource for SharePointList {
    const SELECT: &'static [&'static str] = &[
        "id",
        "name",
        "displayName",
        "description",
        "webUrl",
        "createdDateTime",
        "lastModifiedDateTime",
    ];
}

/// Column definition returned by `list_list_columns`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListColumn {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub column_group: String,
    #[serde(default)]
    pub enforce_unique_values: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub indexed: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub required: bool,
}

impl GraphResource for ListColumn {
    const SELECT: &'static [&'static str] = &[
        "id",
        "name",
        "displayName",
        "description",
        "columnGroup",
        "enforceUniqueValues",
        "hidden",
        "indexed",
        "readOnly",
        "required",
    ];
}

/// List item returned by `add_list_item`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedListItem {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    pub created_date_time: DateTime<Utc>,
}

impl GraphResource for CreatedListItem {
    const SELECT: &'static [&'static str] = &["id", "name", "webUrl", "createdDateTime"];
}

/// `fields` payload of a list item as returned by `list_list_items`
pub type ListItemFields = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Deserialize)]
pub(crate) struct ListItemEnvelope {
    #[serde(default)]
    pub fields: ListItemFields,
}

/// What `create_dir` does when the folder already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictBehavior {
    Fail,
    Rename,
    #[default]
    Replace,
}

/// Outcome of one file in `download_all_files`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    Pass,
    Fail,
}

/// Per-file entry returned by `download_all_files`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadResult {
    pub id: String,
    pub name: String,
    pub extension: Option<String>,
    pub size: Option<u64>,
    pub path: String,
    pub created_date_time: DateTime<Utc>,
    pub last_modified_date_time: Option<DateTime<Utc>>,
    pub last_modified_by_name: Option<String>,
    pub last_modified_by_email: Option<String>,
    pub status: DownloadStatus,
}

impl DownloadResult {
    pub(crate) fn from_item(item: DriveItem, status: DownloadStatus) -> Self {
        Self {
            id: item.id,
            name: item.name,
            extension: item.extension,
            size: item.size,
            path: item.path,
            created_date_time: item.created_date_time,
            last_modified_date_time: item.last_modified_date_time,
            last_modified_by_name: item.last_modified_by_name,
            last_modified_by_email: item.last_modified_by_email,
            status,
        }
    }
}

// Request bodies

#[derive(Debug, Serialize)]
pub(crate) struct CreateFolderRequest<'a> {
    pub name: &'a str,
    pub folder: serde_json::Map<String, serde_json::Value>,
    #[serde(rename = "@microsoft.graph.conflictBehavior")]
    pub conflict_behavior: ConflictBehavior,
}

#[derive(Debug, Serialize)]
pub(crate) struct RenameRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CopyRequest<'a> {
    pub parent_reference: CopyParentReference<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CopyParentReference<'a> {
    pub drive_id: &'a str,
    pub drive_type: &'static str,
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MoveRequest<'a> {
    pub parent_reference: MoveParentReference<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MoveParentReference<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddListItemRequest<'a, T: Serialize> {
    pub fields: &'a T,
}
