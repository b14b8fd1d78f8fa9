use crate::graph_api::types::SharePointError;
use std::fmt;
use std::time::Duration;

/// Microsoft Graph host used for all resource calls
pub const DEFAULT_GRAPH_URL: &str = "https://graph.microsoft.com";
/// Azure AD host used for the client-credentials token exchange
pub const DEFAULT_LOGIN_URL: &str = "https://login.microsoftonline.com";
/// Graph API version segment
pub const DEFAULT_API_VERSION: &str = "v1.0";
/// Scope requested with the client-credentials grant
pub const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

pub const ENV_CLIENT_ID: &str = "SHAREPOINT_CLIENT_ID";
pub const ENV_TENANT_ID: &str = "SHAREPOINT_TENANT_ID";
pub const ENV_CLIENT_SECRET: &str = "SHAREPOINT_CLIENT_SECRET";
pub const ENV_DOMAIN: &str = "SHAREPOINT_DOMAIN";
pub const ENV_GRAPH_URL: &str = "SHAREPOINT_GRAPH_URL";
pub const ENV_LOGIN_URL: &str = "SHAREPOINT_LOGIN_URL";
pub const ENV_API_VERSION: &str = "SHAREPOINT_API_VERSION";

/// Credentials and transport settings for a [`SharePointClient`]
///
/// The four credential fields are required. Everything else has a default
/// suitable for the public Microsoft cloud and can be overridden with the
/// `with_*` builder methods.
///
/// [`SharePointClient`]: crate::SharePointClient
#[derive(Clone)]
pub struct SharePointConfig {
    /// Azure AD application (client) ID
    pub client_id: String,
    /// Azure AD tenant ID
    pub tenant_id: String,
    client_secret: String,
    /// SharePoint host, e.g. `contoso.sharepoint.com`
    pub sp_domain: String,
    /// Graph host base URL, without the version segment
    pub graph_base_url: String,
    /// Azure AD login base URL
    pub login_base_url: String,
    /// Graph API version segment, e.g. `v1.0` or `beta`
    pub api_version: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// A cached token is refreshed once it is this close to expiring
    pub token_refresh_margin: Duration,
}

impl SharePointConfig {
    /// Create a configuration from explicit credentials
    pub fn new(
        client_id: impl Into<String>,
        tenant_id: impl Into<String>,
        client_secret: impl Into<String>,
        sp_domain: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            tenant_id: tenant_id.into(),
            client_secret: client_secret.into(),
            sp_domain: sp_domain.into(),
            graph_base_url: DEFAULT_GRAPH_URL.to_string(),
            login_base_url: DEFAULT_LOGIN_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(30),
            token_refresh_margin: Duration::from_secs(60),
        }
    }

    /// Load a configuration from `SHAREPOINT_*` environment variables
    ///
    /// `SHAREPOINT_CLIENT_ID`, `SHAREPOINT_TENANT_ID`,
    /// `SHAREPOINT_CLIENT_SECRET` and `SHAREPOINT_DOMAIN` are required.
    /// `SHAREPOINT_GRAPH_URL`, `SHAREPOINT_LOGIN_URL` and
    /// `SHAREPOINT_API_VERSION` override the defaults when set.
    pub fn from_env() -> Result<Self, SharePointError> {
        let mut config = Self::new(
            required_env(ENV_CLIENT_ID)?,
            required_env(ENV_TENANT_ID)?,
            required_env(ENV_CLIENT_SECRET)?,
            required_env(ENV_DOMAIN)?,
        );

        if let Some(url) = optional_env(ENV_GRAPH_URL) {
            config = config.with_graph_base_url(url);
        }
        if let Some(url) = optional_env(ENV_LOGIN_URL) {
            config = config.with_login_base_url(url);
        }
        if let Some(version) = optional_env(ENV_API_VERSION) {
            config = config.with_api_version(version);
        }

        tracing::debug!(
            "Loaded SharePoint configuration from environment: tenant_id={}, sp_domain={}",
            config.tenant_id,
            config.sp_domain
        );

        Ok(config)
    }

    /// Set the Graph base URL (builder pattern)
    pub fn with_graph_base_url(mut self, url: impl Into<String>) -> Self {
        self.graph_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the login base URL (builder pattern)
    pub fn with_login_base_url(mut self, url: impl Into<String>) -> Self {
        self.login_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the Graph API version (builder pattern)
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into().trim_matches('/').to_string();
        self
    }

    /// Set the request timeout (builder pattern)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the token refresh margin (builder pattern)
    pub fn with_token_refresh_margin(mut self, margin: Duration) -> Self {
        self.token_refresh_margin = margin;
        self
    }

    /// Azure AD client secret
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Check that every required field is present
    pub fn validate(&self) -> Result<(), SharePointError> {
        let required = [
            ("client_id", &self.client_id),
            ("tenant_id", &self.tenant_id),
            ("client_secret", &self.client_secret),
            ("sp_domain", &self.sp_domain),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(SharePointError::Config(format!("{} must not be empty", name)));
            }
        }
        if self.api_version.is_empty() {
            return Err(SharePointError::Config(
                "api_version must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Token endpoint for this tenant
    pub fn token_url(&self) -> String {
        format!("{}/{}/oauth2/v2.0/token", self.login_base_url, self.tenant_id)
    }

    /// Versioned Graph root every resource path is appended to
    pub fn api_base(&self) -> String {
        format!("{}/{}", self.graph_base_url, self.api_version)
    }
}

impl fmt::Debug for SharePointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharePointConfig")
            .field("client_id", &self.client_id)
            .field("tenant_id", &self.tenant_id)
            .field("client_secret", &"<redacted>")
            .field("sp_domain", &self.sp_domain)
            .field("graph_base_url", &self.graph_base_url)
            .field("login_base_url", &self.login_base_url)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .field("token_refresh_margin", &self.token_refresh_margin)
            .finish()
    }
}

fn required_env(name: &str) -> Result<String, SharePointError> {
    optional_env(name).ok_or_else(|| {
        SharePointError::Config(format!("environment variable {} is not set", name))
    })
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
