use crate::graph_api::config::{SharePointConfig, GRAPH_SCOPE};
use crate::graph_api::paths;
use crate::graph_api::resources::{
    AddListItemRequest, ConflictBehavior, CopyJob, CopyParentReference, CopyRequest,
    CreateFolderRequest, CreatedFolder, CreatedListItem, Drive, DriveItem, DownloadResult,
    DownloadStatus, FileInfo, FolderInfo, GraphCollection, GraphResource, ItemSummary,
    ListColumn, ListItemEnvelope, ListItemFields, MoveParentReference, MoveRequest,
    RenameRequest, SharePointList, Site, SiteHost, UploadedFile,
};
use crate::graph_api::token::{AccessToken, TokenResponse};
use crate::graph_api::types::{ApiError, GraphResponse, SharePointError};
use reqwest::header::{ACCEPT, CONTENT_TYPE, LOCATION};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

const JSON: &str = "application/json";
const JSON_NO_METADATA: &str = "application/json;odata.metadata=none";
const OCTET_STREAM: &str = "application/octet-stream";

/// Body of a Graph request
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Bytes(Vec<u8>),
}

impl RequestBody {
    /// Serialize any value into a JSON body
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, SharePointError> {
        serde_json::to_value(value).map(RequestBody::Json).map_err(|e| {
            SharePointError::Api(ApiError::Request(format!(
                "Failed to serialize request body: {}",
                e
            )))
        })
    }
}

/// HTTP client for Microsoft Graph SharePoint endpoints
///
/// Owns the credentials, one pooled HTTP client and the bearer token cache.
/// Cloning is cheap; clones share the pool and the token, so a refresh by
/// one clone is seen by all of them. The token is refreshed by a single
/// writer: concurrent requests that find it missing or expiring wait for
/// the one refresh in flight.
#[derive(Debug, Clone)]
pub struct SharePointClient {
    config: Arc<SharePointConfig>,
    client: reqwest::Client,
    token: Arc<Mutex<Option<AccessToken>>>,
}

impl SharePointClient {
    /// Create a client without contacting Azure AD
    ///
    /// The first request authenticates lazily.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sharepoint_sdk::{SharePointClient, SharePointConfig};
    ///
    /// let config = SharePointConfig::new(
    ///     "client-id",
    ///     "tenant-id",
    ///     "client-secret",
    ///     "contoso.sharepoint.com",
    /// );
    /// let client = SharePointClient::new(config).unwrap();
    /// ```
    pub fn new(config: SharePointConfig) -> Result<Self, SharePointError> {
        config.validate()?;
        tracing::debug!(
            "Creating SharePointClient: api_base={}, sp_domain={}",
            config.api_base(),
            config.sp_domain
        );

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                SharePointError::Config(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            config: Arc::new(config),
            client,
            token: Arc::new(Mutex::new(None)),
        })
    }

    /// Create a client and authenticate immediately
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sharepoint_sdk::{SharePointClient, SharePointConfig};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = SharePointClient::connect(SharePointConfig::from_env()?).await?;
    /// let site = client.get_site_info("Finance").await?;
    /// if let Some(site) = site.content {
    ///     println!("site id: {}", site.id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(config: SharePointConfig) -> Result<Self, SharePointError> {
        let client = Self::new(config)?;
        client.authenticate().await?;
        Ok(client)
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &SharePointConfig {
        &self.config
    }

    /// Currently cached token, if any
    pub async fn access_token(&self) -> Option<AccessToken> {
        self.token.lock().await.clone()
    }

    /// Exchange the client credentials for a fresh bearer token
    ///
    /// Replaces the cached token unconditionally.
    ///
    /// # Errors
    ///
    /// `SharePointError::Auth` when the token endpoint answers with a
    /// non-2xx status or a payload without `access_token`;
    /// `SharePointError::Api(ApiError::Transport)` when it cannot be reached.
    pub async fn authenticate(&self) -> Result<(), SharePointError> {
        let mut slot = self.token.lock().await;
        let token = self.request_token().await?;
        *slot = Some(token);
        Ok(())
    }

    async fn request_token(&self) -> Result<AccessToken, SharePointError> {
        tracing::info!(
            "Authenticating: tenant_id={}, client_id={}",
            self.config.tenant_id,
            self.config.client_id
        );

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret()),
            ("scope", GRAPH_SCOPE),
        ];

        let response = self
            .client
            .post(self.config.token_url())
            .header(ACCEPT, JSON)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send token request: {}", e);
                ApiError::from(e)
            })?;

        let (status, body) = read_response(response).await?;

        if !(200..300).contains(&status) {
            let message = String::from_utf8_lossy(&body).into_owned();
            tracing::error!("Token request failed: HTTP {} - {}", status, message);
            return Err(SharePointError::Auth(format!(
                "token endpoint returned HTTP {}: {}",
                status, message
            )));
        }

        let payload: TokenResponse = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!("Failed to parse token response: {}", e);
            SharePointError::Auth(format!("malformed token response: {}", e))
        })?;

        let token = payload.into_access_token();
        tracing::debug!("Access token acquired: expires_at={}", token.expires_at());
        Ok(token)
    }

    /// Valid bearer value, refreshing under the cache lock when needed
    async fn bearer_token(&self) -> Result<String, SharePointError> {
        let mut slot = self.token.lock().await;
        match slot.as_ref() {
            Some(token) if !token.expires_within(self.config.token_refresh_margin) => {
                return Ok(token.secret().to_string());
            }
            Some(_) => tracing::debug!("Cached access token is expiring; refreshing"),
            None => tracing::debug!("No cached access token; authenticating"),
        }

        let token = self.request_token().await?;
        let secret = token.secret().to_string();
        *slot = Some(token);
        Ok(secret)
    }

    /// Drop the cached token if it is still the one Graph rejected
    async fn invalidate_token(&self, rejected: &str) {
        let mut slot = self.token.lock().await;
        if slot.as_ref().map(|t| t.secret() == rejected).unwrap_or(false) {
            tracing::warn!("Access token rejected by Graph; it will be refreshed on the next request");
            *slot = None;
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        body: RequestBody,
        accept: Option<&str>,
    ) -> Result<reqwest::Response, SharePointError> {
        let token = self.bearer_token().await?;
        let url = format!("{}{}", self.config.api_base(), path);
        tracing::debug!("Sending {} {}", method, url);

        let mut request = self.client.request(method, &url).bearer_auth(&token);
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }
        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Bytes(bytes) => request.header(CONTENT_TYPE, OCTET_STREAM).body(bytes),
        };

        let response = request.send().await.map_err(|e| {
            tracing::error!("Request to {} failed: {}", url, e);
            ApiError::from(e)
        })?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.invalidate_token(&token).await;
        }

        Ok(response)
    }

    /// Issue an authenticated request against the versioned Graph root
    ///
    /// `path` is relative to `{graph_base_url}/{api_version}`, e.g.
    /// `/sites/root`. Non-2xx statuses are returned, not raised. On success
    /// `content` holds the body parsed as JSON when it is JSON; the raw bytes
    /// are always available through [`GraphResponse::raw_body`].
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        body: RequestBody,
    ) -> Result<GraphResponse<serde_json::Value>, SharePointError> {
        let response = self.send(method, path, params, body, Some(JSON)).await?;
        let (status, bytes) = read_response(response).await?;
        let content = if (200..300).contains(&status) && !bytes.is_empty() {
            serde_json::from_slice(&bytes).ok()
        } else {
            None
        };
        Ok(GraphResponse::new(status, content, bytes))
    }

    async fn fetch_one<T: GraphResource>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        accepted: &[u16],
    ) -> Result<GraphResponse<T>, SharePointError> {
        let params = [("$select", T::select_param())];
        let response = self.send(method, path, &params, body, Some(JSON)).await?;
        let (status, bytes) = read_response(response).await?;
        decode(status, bytes, accepted, |b| serde_json::from_slice::<T>(b))
    }

    async fn fetch_many<T: GraphResource>(
        &self,
        path: &str,
    ) -> Result<GraphResponse<Vec<T>>, SharePointError> {
        let params = [("$select", T::select_param())];
        let response = self
            .send(Method::GET, path, &params, RequestBody::Empty, Some(JSON))
            .await?;
        let (status, bytes) = read_response(response).await?;
        decode(status, bytes, &[200], |b| {
            serde_json::from_slice::<GraphCollection<T>>(b).map(|c| c.value)
        })
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        accepted: &[u16],
    ) -> Result<GraphResponse<()>, SharePointError> {
        let response = self
            .send(method, path, &[], RequestBody::Empty, Some(JSON))
            .await?;
        let (status, bytes) = read_response(response).await?;
        decode(status, bytes, accepted, |_| Ok(()))
    }

    // Sites

    /// Look up a site by its name under the configured SharePoint domain
    ///
    /// `GET /sites/{sp_domain}:/sites/{name}`
    pub async fn get_site_info(&self, name: &str) -> Result<GraphResponse<Site>, SharePointError> {
        tracing::info!("Retrieving the site ID for site name={}", name);
        let path = paths::site_by_name(&self.config.sp_domain, name);
        self.fetch_one(Method::GET, &path, RequestBody::Empty, &[200])
            .await
    }

    /// Hostname and site details for a site ID
    pub async fn get_hostname_info(
        &self,
        site_id: &str,
    ) -> Result<GraphResponse<SiteHost>, SharePointError> {
        tracing::info!("Retrieving hostname and site details for site_id={}", site_id);
        self.fetch_one(Method::GET, &paths::site(site_id), RequestBody::Empty, &[200])
            .await
    }

    // Drives

    /// List the document libraries of a site
    pub async fn list_drives(
        &self,
        site_id: &str,
    ) -> Result<GraphResponse<Vec<Drive>>, SharePointError> {
        tracing::info!("Listing drives for site_id={}", site_id);
        self.fetch_many(&paths::site_drives(site_id)).await
    }

    // Folders

    /// Folder metadata; `None` addresses the drive root
    pub async fn get_dir_info(
        &self,
        drive_id: &str,
        path: Option<&str>,
    ) -> Result<GraphResponse<FolderInfo>, SharePointError> {
        tracing::info!(
            "Retrieving folder info: drive_id={}, path={}",
            drive_id,
            path.unwrap_or("/")
        );
        let url = paths::drive_item(drive_id, path);
        self.fetch_one(Method::GET, &url, RequestBody::Empty, &[200])
            .await
    }

    /// List files and folders in a folder; `None` lists the drive root
    ///
    /// Each returned item carries the listed folder in `path`.
    pub async fn list_dir(
        &self,
        drive_id: &str,
        path: Option<&str>,
    ) -> Result<GraphResponse<Vec<DriveItem>>, SharePointError> {
        let listed = path.unwrap_or("/");
        tracing::info!("Listing folder contents: drive_id={}, path={}", drive_id, listed);

        let response = self
            .fetch_many::<DriveItem>(&paths::drive_children(drive_id, path))
            .await?;

        Ok(response.map(|items| {
            items
                .into_iter()
                .map(|mut item| {
                    item.path = listed.to_string();
                    item
                })
                .collect()
        }))
    }

    /// Create a folder under `path`, replacing an existing one of the same name
    pub async fn create_dir(
        &self,
        drive_id: &str,
        path: &str,
        name: &str,
    ) -> Result<GraphResponse<CreatedFolder>, SharePointError> {
        self.create_dir_with(drive_id, path, name, ConflictBehavior::Replace)
            .await
    }

    /// Create a folder under `path` with an explicit conflict behavior
    pub async fn create_dir_with(
        &self,
        drive_id: &str,
        path: &str,
        name: &str,
        conflict_behavior: ConflictBehavior,
    ) -> Result<GraphResponse<CreatedFolder>, SharePointError> {
        tracing::info!(
            "Creating folder: drive_id={}, path={}, name={}",
            drive_id,
            path,
            name
        );
        let body = RequestBody::json(&CreateFolderRequest {
            name,
            folder: serde_json::Map::new(),
            conflict_behavior,
        })?;
        self.fetch_one(
            Method::POST,
            &paths::drive_children(drive_id, Some(path)),
            body,
            &[200, 201],
        )
        .await
    }

    /// Delete a folder and everything in it
    pub async fn delete_dir(
        &self,
        drive_id: &str,
        path: &str,
    ) -> Result<GraphResponse<()>, SharePointError> {
        tracing::info!("Deleting folder: drive_id={}, path={}", drive_id, path);
        self.execute(Method::DELETE, &paths::drive_item(drive_id, Some(path)), &[200, 204])
            .await
    }

    /// Rename a folder in place
    ///
    /// # Arguments
    ///
    /// * `path` - Drive-relative path of the folder
    /// * `new_name` - New last path segment, not a full path
    ///
    /// Only a 200 counts as success.
    pub async fn rename_folder(
        &self,
        drive_id: &str,
        path: &str,
        new_name: &str,
    ) -> Result<GraphResponse<ItemSummary>, SharePointError> {
        tracing::info!(
            "Renaming folder: drive_id={}, path={}, new_name={}",
            drive_id,
            path,
            new_name
        );
        self.rename_item(drive_id, path, new_name).await
    }

    // Files

    /// File metadata for a drive-relative path
    pub async fn get_file_info(
        &self,
        drive_id: &str,
        filename: &str,
    ) -> Result<GraphResponse<FileInfo>, SharePointError> {
        tracing::info!("Retrieving file info: drive_id={}, filename={}", drive_id, filename);
        self.fetch_one(
            Method::GET,
            &paths::drive_item(drive_id, Some(filename)),
            RequestBody::Empty,
            &[200, 202],
        )
        .await
    }

    /// Copy a file into `target_path` within the same drive
    ///
    /// Graph runs the copy asynchronously and answers 202; the returned
    /// [`CopyJob`] carries the monitor URL when Graph sends one.
    pub async fn copy_file(
        &self,
        drive_id: &str,
        filename: &str,
        target_path: &str,
        new_name: Option<&str>,
    ) -> Result<GraphResponse<CopyJob>, SharePointError> {
        tracing::info!(
            "Copying file: drive_id={}, filename={}, target_path={}",
            drive_id,
            filename,
            target_path
        );
        let body = RequestBody::json(&CopyRequest {
            parent_reference: CopyParentReference {
                drive_id,
                drive_type: "documentLibrary",
                path: paths::copy_parent_path(drive_id, target_path),
            },
            name: new_name,
        })?;

        let response = self
            .send(
                Method::POST,
                &paths::drive_item_copy(drive_id, filename),
                &[],
                body,
                Some(JSON),
            )
            .await?;
        let monitor_url = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let (status, bytes) = read_response(response).await?;
        decode(status, bytes, &[200, 202], |_| Ok(CopyJob { monitor_url }))
    }

    /// Move a file into `target_path` within the same drive, optionally renaming it
    ///
    /// Resolves the file and the destination folder first. If either lookup
    /// does not return 200, its status is returned and nothing is moved.
    pub async fn move_file(
        &self,
        drive_id: &str,
        filename: &str,
        target_path: &str,
        new_name: Option<&str>,
    ) -> Result<GraphResponse<ItemSummary>, SharePointError> {
        tracing::info!(
            "Moving file: drive_id={}, filename={}, target_path={}",
            drive_id,
            filename,
            target_path
        );

        let file = self.get_file_info(drive_id, filename).await?;
        let file_id = match file.status_code {
            200 => file.content.as_ref().map(|info| info.id.clone()),
            _ => None,
        };
        let Some(file_id) = file_id else {
            tracing::warn!("Source file lookup failed: HTTP {}", file.status_code);
            return Ok(file.without_content());
        };

        let folder = self.get_dir_info(drive_id, Some(target_path)).await?;
        let folder_id = match folder.status_code {
            200 => folder.content.as_ref().map(|info| info.id.clone()),
            _ => None,
        };
        let Some(folder_id) = folder_id else {
            tracing::warn!("Destination folder lookup failed: HTTP {}", folder.status_code);
            return Ok(folder.without_content());
        };

        let body = RequestBody::json(&MoveRequest {
            parent_reference: MoveParentReference { id: &folder_id },
            name: new_name,
        })?;
        self.fetch_one(
            Method::PATCH,
            &paths::drive_item_by_id(drive_id, &file_id),
            body,
            &[200],
        )
        .await
    }

    /// Delete a file; Graph moves it to the site recycle bin
    ///
    /// Success is a 200 or 204 and yields `content: Some(())`.
    pub async fn delete_file(
        &self,
        drive_id: &str,
        filename: &str,
    ) -> Result<GraphResponse<()>, SharePointError> {
        tracing::info!("Deleting file: drive_id={}, filename={}", drive_id, filename);
        self.execute(
            Method::DELETE,
            &paths::drive_item(drive_id, Some(filename)),
            &[200, 204],
        )
        .await
    }

    /// Rename a file, keeping it in its folder
    ///
    /// `new_name` should carry the extension. Only a 200 counts as success.
    pub async fn rename_file(
        &self,
        drive_id: &str,
        filename: &str,
        new_name: &str,
    ) -> Result<GraphResponse<ItemSummary>, SharePointError> {
        tracing::info!(
            "Renaming file: drive_id={}, filename={}, new_name={}",
            drive_id,
            filename,
            new_name
        );
        self.rename_item(drive_id, filename, new_name).await
    }

    async fn rename_item(
        &self,
        drive_id: &str,
        path: &str,
        new_name: &str,
    ) -> Result<GraphResponse<ItemSummary>, SharePointError> {
        let body = RequestBody::json(&RenameRequest { name: new_name })?;
        self.fetch_one(
            Method::PATCH,
            &paths::drive_item(drive_id, Some(path)),
            body,
            &[200],
        )
        .await
    }

    // Transfers

    /// Stream a remote file to `local_path`
    ///
    /// On success `content` is the number of bytes written. The local file
    /// is only created once Graph has answered 200, and is removed again if
    /// the transfer fails part way.
    pub async fn download_file(
        &self,
        drive_id: &str,
        remote_path: &str,
        local_path: impl AsRef<Path>,
    ) -> Result<GraphResponse<u64>, SharePointError> {
        let local_path = local_path.as_ref();
        tracing::info!(
            "Downloading file: drive_id={}, remote_path={}, local_path={}",
            drive_id,
            remote_path,
            local_path.display()
        );

        let mut response = self
            .send(
                Method::GET,
                &paths::drive_item_content(drive_id, remote_path),
                &[],
                RequestBody::Empty,
                None,
            )
            .await?;

        let status = response.status().as_u16();
        tracing::info!("HTTP Status Code {}", status);
        if status != 200 {
            let body = response.bytes().await.map_err(ApiError::from)?.to_vec();
            return Ok(GraphResponse::new(status, None, body));
        }

        let mut file = tokio::fs::File::create(local_path).await?;
        let written = match stream_to_file(&mut response, &mut file).await {
            Ok(written) => written,
            Err(e) => {
                drop(file);
                tracing::error!("Download of {} interrupted: {}", remote_path, e);
                if let Err(cleanup) = tokio::fs::remove_file(local_path).await {
                    tracing::warn!(
                        "Failed to remove partial file {}: {}",
                        local_path.display(),
                        cleanup
                    );
                }
                return Err(e);
            }
        };

        tracing::info!("{} bytes downloaded", written);
        Ok(GraphResponse::new(status, Some(written), Vec::new()))
    }

    /// Download a remote file into memory
    ///
    /// Holds the whole file in memory; prefer [`download_file`] for large files.
    ///
    /// [`download_file`]: SharePointClient::download_file
    pub async fn download_file_to_memory(
        &self,
        drive_id: &str,
        remote_path: &str,
    ) -> Result<GraphResponse<Vec<u8>>, SharePointError> {
        tracing::info!(
            "Downloading file to memory: drive_id={}, remote_path={}",
            drive_id,
            remote_path
        );

        let response = self
            .send(
                Method::GET,
                &paths::drive_item_content(drive_id, remote_path),
                &[],
                RequestBody::Empty,
                None,
            )
            .await?;
        let (status, bytes) = read_response(response).await?;
        if status != 200 {
            return Ok(GraphResponse::new(status, None, bytes));
        }

        tracing::info!("{} bytes downloaded", bytes.len());
        Ok(GraphResponse::new(status, Some(bytes), Vec::new()))
    }

    /// Download every file (items with an extension) in a remote folder
    ///
    /// Files land in `local_dir`, which is created if missing. A failed
    /// file is recorded as [`DownloadStatus::Fail`] and the rest continue.
    /// If the folder listing itself fails, its status is returned.
    pub async fn download_all_files(
        &self,
        drive_id: &str,
        remote_path: &str,
        local_dir: impl AsRef<Path>,
    ) -> Result<GraphResponse<Vec<DownloadResult>>, SharePointError> {
        let local_dir = local_dir.as_ref();
        tracing::info!(
            "Downloading all files: drive_id={}, remote_path={}, local_dir={}",
            drive_id,
            remote_path,
            local_dir.display()
        );

        let listing = self.list_dir(drive_id, Some(remote_path)).await?;
        if listing.status_code != 200 {
            tracing::error!("Failed to list folder contents: HTTP {}", listing.status_code);
            return Ok(listing.without_content());
        }
        let status = listing.status_code;
        let items = listing.into_content().unwrap_or_default();

        tokio::fs::create_dir_all(local_dir).await?;

        let mut results = Vec::new();
        for item in items.into_iter().filter(|i| i.extension.is_some()) {
            tracing::info!("File {}", item.name);
            let remote = paths::join_remote(remote_path, &item.name);
            let local = local_dir.join(&item.name);

            let outcome = match self.download_file(drive_id, &remote, &local).await {
                Ok(r) if r.status_code == 200 => DownloadStatus::Pass,
                Ok(r) => {
                    tracing::warn!("Failed to download {}: HTTP {}", item.name, r.status_code);
                    DownloadStatus::Fail
                }
                Err(e) => {
                    tracing::warn!("Failed to download {}: {}", item.name, e);
                    DownloadStatus::Fail
                }
            };
            results.push(DownloadResult::from_item(item, outcome));
        }

        Ok(GraphResponse::new(status, Some(results), Vec::new()))
    }

    /// Upload a local file to `remote_path` (including the file name)
    pub async fn upload_file(
        &self,
        drive_id: &str,
        local_path: impl AsRef<Path>,
        remote_path: &str,
    ) -> Result<GraphResponse<UploadedFile>, SharePointError> {
        let local_path = local_path.as_ref();
        tracing::info!(
            "Uploading file: drive_id={}, local_path={}, remote_path={}",
            drive_id,
            local_path.display(),
            remote_path
        );
        let data = tokio::fs::read(local_path).await?;
        self.upload_bytes(drive_id, remote_path, data).await
    }

    /// Upload in-memory content to `remote_path` (including the file name)
    ///
    /// Uses the simple `PUT .../content` endpoint, which Graph limits to
    /// small files.
    pub async fn upload_bytes(
        &self,
        drive_id: &str,
        remote_path: &str,
        data: impl Into<Vec<u8>>,
    ) -> Result<GraphResponse<UploadedFile>, SharePointError> {
        let data = data.into();
        tracing::debug!("Uploading {} bytes to {}", data.len(), remote_path);
        self.fetch_one(
            Method::PUT,
            &paths::drive_item_content(drive_id, remote_path),
            RequestBody::Bytes(data),
            &[200, 201],
        )
        .await
    }

    // Lists

    /// Lists of a site
    pub async fn list_lists(
        &self,
        site_id: &str,
    ) -> Result<GraphResponse<Vec<SharePointList>>, SharePointError> {
        tracing::info!("Listing SharePoint lists for site_id={}", site_id);
        self.fetch_many(&paths::site_lists(site_id)).await
    }

    /// Column definitions of a list, hidden and read-only columns included
    pub async fn list_list_columns(
        &self,
        site_id: &str,
        list_id: &str,
    ) -> Result<GraphResponse<Vec<ListColumn>>, SharePointError> {
        tracing::info!("Listing columns: site_id={}, list_id={}", site_id, list_id);
        self.fetch_many(&paths::list_columns(site_id, list_id)).await
    }

    /// Items of a list, each reduced to its `fields` object
    ///
    /// `fields` restricts the returned columns; an empty slice returns all.
    pub async fn list_list_items(
        &self,
        site_id: &str,
        list_id: &str,
        fields: &[&str],
    ) -> Result<GraphResponse<Vec<ListItemFields>>, SharePointError> {
        tracing::info!("Listing items: site_id={}, list_id={}", site_id, list_id);

        let expand = if fields.is_empty() {
            "fields".to_string()
        } else {
            format!("fields($select={})", fields.join(","))
        };
        let params = [("$expand", expand)];

        let response = self
            .send(
                Method::GET,
                &paths::list_items(site_id, list_id),
                &params,
                RequestBody::Empty,
                Some(JSON_NO_METADATA),
            )
            .await?;
        let (status, bytes) = read_response(response).await?;
        decode(status, bytes, &[200], |b| {
            serde_json::from_slice::<GraphCollection<ListItemEnvelope>>(b)
                .map(|c| c.value.into_iter().map(|item| item.fields).collect())
        })
    }

    /// Delete a list item by id
    ///
    /// Graph answers 204 with no body; any other status leaves `content`
    /// as `None`.
    pub async fn delete_list_item(
        &self,
        site_id: &str,
        list_id: &str,
        item_id: &str,
    ) -> Result<GraphResponse<()>, SharePointError> {
        tracing::info!(
            "Deleting list item: site_id={}, list_id={}, item_id={}",
            site_id,
            list_id,
            item_id
        );
        self.execute(
            Method::DELETE,
            &paths::list_item(site_id, list_id, item_id),
            &[204],
        )
        .await
    }

    /// Add an item to a list; `item` is serialized as the item's `fields`
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use sharepoint_sdk::SharePointClient;
    /// # async fn example(client: SharePointClient) -> Result<(), Box<dyn std::error::Error>> {
    /// let item = serde_json::json!({"Title": "Quarterly review", "Status": "Open"});
    /// let created = client.add_list_item("site-id", "list-id", &item).await?;
    /// assert_eq!(created.status_code, 201);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn add_list_item<T: Serialize>(
        &self,
        site_id: &str,
        list_id: &str,
        item: &T,
    ) -> Result<GraphResponse<CreatedListItem>, SharePointError> {
        tracing::info!("Adding list item: site_id={}, list_id={}", site_id, list_id);
        let body = RequestBody::json(&AddListItemRequest { fields: item })?;
        self.fetch_one(
            Method::POST,
            &paths::list_items(site_id, list_id),
            body,
            &[201],
        )
        .await
    }
}

async fn stream_to_file(
    response: &mut reqwest::Response,
    file: &mut tokio::fs::File,
) -> Result<u64, SharePointError> {
    let mut written: u64 = 0;
    while let Some(chunk) = response.chunk().await.map_err(ApiError::from)? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

async fn read_response(response: reqwest::Response) -> Result<(u16, Vec<u8>), SharePointError> {
    let status = response.status().as_u16();
    tracing::info!("HTTP Status Code {}", status);
    let bytes = response.bytes().await.map_err(|e| {
        tracing::error!("Failed to read response body: {}", e);
        ApiError::from(e)
    })?;
    Ok((status, bytes.to_vec()))
}

fn decode<T, F>(
    status: u16,
    body: Vec<u8>,
    accepted: &[u16],
    parse: F,
) -> Result<GraphResponse<T>, SharePointError>
where
    F: FnOnce(&[u8]) -> Result<T, serde_json::Error>,
{
    if !accepted.contains(&status) {
        return Ok(GraphResponse::new(status, None, body));
    }

    tracing::info!("Request successful");
    let content = parse(&body).map_err(|e| {
        tracing::error!("Failed to parse response: {}", e);
        ApiError::Parse(format!("Failed to parse response: {}", e))
    })?;
    Ok(GraphResponse::new(status, Some(content), body))
}
