//! SharePoint SDK
//!
//! A Rust library for working with SharePoint Online through Microsoft Graph.
//!
//! This SDK provides:
//! - App-only authentication with the Azure AD client-credentials grant and
//!   an in-memory token cache that refreshes before expiry
//! - Site, drive and folder discovery
//! - File metadata, copy, move, rename, delete, upload and streaming download
//! - SharePoint list, column and list item operations
//! - Typed models for Graph responses and a uniform `GraphResponse` wrapper
//!
//! # Example
//!
//! ```no_run
//! use sharepoint_sdk::{SharePointClient, SharePointConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SharePointConfig::new(
//!     "client-id",
//!     "tenant-id",
//!     "client-secret",
//!     "contoso.sharepoint.com",
//! );
//! let client = SharePointClient::connect(config).await?;
//!
//! // Resolve the site and its document library
//! let site = client.get_site_info("Finance").await?.error_for_status()?;
//! let site_id = site.content.map(|s| s.id).unwrap_or_default();
//! let drives = client.list_drives(&site_id).await?;
//! let drive_id = drives
//!     .content
//!     .and_then(|d| d.into_iter().next())
//!     .map(|d| d.id)
//!     .unwrap_or_default();
//!
//! // Download everything in a folder
//! let results = client
//!     .download_all_files(&drive_id, "Reports/2024", "./reports")
//!     .await?;
//! for file in results.content.unwrap_or_default() {
//!     println!("{}: {:?}", file.name, file.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod graph_api;

// Re-export commonly used types
pub use graph_api::{
    client::{RequestBody, SharePointClient},
    config::SharePointConfig,
    resources::{
        ConflictBehavior, CopyJob, CreatedFolder, CreatedListItem, Drive, DriveItem,
        DownloadResult, DownloadStatus, FileInfo, FolderInfo, GraphCollection, GraphResource,
        ItemSummary, ListColumn, ListItemFields, SharePointList, Site, SiteHost, UploadedFile,
    },
    token::AccessToken,
    types::{ApiError, GraphResponse, SharePointError},
};

pub use reqwest::Method;
