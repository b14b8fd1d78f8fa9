use std::fmt;
use std::path::Path;

/// SharePoint SDK error type
///
/// Represents every failure that can occur while authenticating against
/// Azure AD or talking to Microsoft Graph. Non-success HTTP statuses from
/// resource endpoints are *not* errors; they come back inside
/// [`GraphResponse`] so callers can branch on the status code.
#[derive(Debug)]
pub enum SharePointError {
    /// Client-credentials token exchange failed
    Auth(String),
    /// API request failed (network, HTTP, or response parsing error)
    Api(ApiError),
    /// Local file operation failed (upload source, download target, export)
    Io(std::io::Error),
    /// Configuration error
    Config(String),
}

impl fmt::Display for SharePointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SharePointError::Auth(msg) => write!(f, "Authentication failed: {}", msg),
            SharePointError::Api(err) => write!(f, "API error: {}", err),
            SharePointError::Io(err) => write!(f, "IO error: {}", err),
            SharePointError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for SharePointError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SharePointError::Api(err) => Some(err),
            SharePointError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ApiError> for SharePointError {
    fn from(err: ApiError) -> Self {
        SharePointError::Api(err)
    }
}

impl From<std::io::Error> for SharePointError {
    fn from(err: std::io::Error) -> Self {
        SharePointError::Io(err)
    }
}

impl From<reqwest::Error> for SharePointError {
    fn from(err: reqwest::Error) -> Self {
        SharePointError::Api(ApiError::from(err))
    }
}

/// API-specific errors
#[derive(Debug)]
pub enum ApiError {
    /// Network error (connection, timeout, TLS, etc.)
    Transport(String),
    /// HTTP error with status code and upstream body
    Http { status: u16, message: String },
    /// Failed to parse response
    Parse(String),
    /// Request building failed
    Request(String),
}

impl ApiError {
    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ApiError::Http { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            ApiError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ApiError::Request(msg) => write!(f, "Request error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Transport("Request timeout".to_string())
        } else if err.is_connect() {
            ApiError::Transport(format!("Connection failed: {}", err))
        } else if err.is_builder() {
            ApiError::Request(err.to_string())
        } else if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err.to_string())
    }
}

/// Uniform result of every SharePoint operation
///
/// `content` is populated only when the endpoint answered with one of the
/// statuses the operation treats as success. For any other status it is
/// `None` and the upstream body is kept, so [`error_for_status`] can
/// surface it.
///
/// [`error_for_status`]: GraphResponse::error_for_status
#[derive(Debug, Clone)]
pub struct GraphResponse<T> {
    /// HTTP status code returned by Graph
    pub status_code: u16,
    /// Parsed content, if the request succeeded
    pub content: Option<T>,
    body: Vec<u8>,
}

impl<T> GraphResponse<T> {
    pub(crate) fn new(status_code: u16, content: Option<T>, body: Vec<u8>) -> Self {
        Self {
            status_code,
            content,
            body,
        }
    }

    /// Whether the status code is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Raw response body as received from Graph.
    ///
    /// Empty for streaming downloads, whose bytes go to disk or to `content`.
    pub fn raw_body(&self) -> &[u8] {
        &self.body
    }

    /// Consume the response and return its content
    pub fn into_content(self) -> Option<T> {
        self.content
    }

    /// Turn a non-2xx response into `ApiError::Http`
    pub fn error_for_status(self) -> Result<Self, SharePointError> {
        if self.is_success() {
            return Ok(self);
        }
        let message = if self.body.is_empty() {
            "empty response body".to_string()
        } else {
            String::from_utf8_lossy(&self.body).into_owned()
        };
        Err(SharePointError::Api(ApiError::Http {
            status: self.status_code,
            message,
        }))
    }

    /// Map the content to another type, keeping status and body
    pub fn map<U, F>(self, f: F) -> GraphResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        GraphResponse {
            status_code: self.status_code,
            content: self.content.map(f),
            body: self.body,
        }
    }

    /// Carry this response's status and body over to a response with no content
    pub(crate) fn without_content<U>(self) -> GraphResponse<U> {
        GraphResponse {
            status_code: self.status_code,
            content: None,
            body: self.body,
        }
    }

    /// Export the raw JSON body to a file
    ///
    /// Writes nothing and returns `Ok(false)` when the request did not
    /// succeed or the body is empty.
    pub async fn save_as(&self, path: impl AsRef<Path>) -> Result<bool, SharePointError> {
        if !self.is_success() || self.body.is_empty() {
            return Ok(false);
        }
        let path = path.as_ref();
        tracing::info!("Exporting response to JSON file: {}", path.display());
        tokio::fs::write(path, &self.body).await?;
        Ok(true)
    }
}
