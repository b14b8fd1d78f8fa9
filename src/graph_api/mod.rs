/// Microsoft Graph integration for SharePoint
///
/// This module provides the authenticated client and the typed models for
/// the SharePoint site, drive and list endpoints of Microsoft Graph.
///
/// ## Request Flow
///
/// 1. The client exchanges its Azure AD app credentials for a bearer token
///    (client-credentials grant) and caches it in memory
/// 2. Every Graph call reuses the cached token until it is within the
///    refresh margin of expiry, then a single fresh exchange replaces it
/// 3. A 401 from Graph drops the rejected token so the next call re-authenticates
/// 4. Responses come back as `GraphResponse<T>` carrying the status code,
///    the typed content on success and the raw body
pub mod client;
pub mod config;
pub mod paths;
pub mod resources;
pub mod token;
pub mod types;

pub use client::{RequestBody, SharePointClient};
pub use config::SharePointConfig;
pub use resources::*;
pub use token::AccessToken;
pub use types::{ApiError, GraphResponse, SharePointError};
