use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Lifetime assumed when the token endpoint omits `expires_in`
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;
/// Longest lifetime honoured; larger `expires_in` values are clamped to it
pub const MAX_TOKEN_LIFETIME_SECS: i64 = 365 * 24 * 3600;

/// Bearer token issued by the Azure AD client-credentials grant
///
/// Lives only in the memory of the client that requested it. `Debug`
/// never prints the token value.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    access_token: String,
    token_type: String,
    expires_at: DateTime<Utc>,
    issued_at: DateTime<Utc>,
}

impl AccessToken {
    /// Create a token that expires `expires_in_secs` from now
    ///
    /// The lifetime is clamped to `0..=MAX_TOKEN_LIFETIME_SECS`.
    pub fn new(
        access_token: impl Into<String>,
        token_type: impl Into<String>,
        expires_in_secs: i64,
    ) -> Self {
        let issued_at = Utc::now();
        let lifetime = Duration::seconds(expires_in_secs.clamp(0, MAX_TOKEN_LIFETIME_SECS));
        Self {
            access_token: access_token.into(),
            token_type: token_type.into(),
            expires_at: issued_at.checked_add_signed(lifetime).unwrap_or(issued_at),
            issued_at,
        }
    }

    /// The bearer value sent in the `Authorization` header
    pub fn secret(&self) -> &str {
        &self.access_token
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Check if the token expires within `margin` from now
    pub fn expires_within(&self, margin: std::time::Duration) -> bool {
        let margin = Duration::from_std(margin).unwrap_or_else(|_| Duration::days(36_500));
        match Utc::now().checked_add_signed(margin) {
            Some(deadline) => self.expires_at <= deadline,
            None => true,
        }
    }

    /// Check if the token is still valid (not expired)
    pub fn is_valid(&self) -> bool {
        !self.is_expired()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token_type", &self.token_type)
            .field("length", &self.access_token.len())
            .field("expires_at", &self.expires_at)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

/// Token endpoint payload
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default, deserialize_with = "seconds_from_number_or_string")]
    pub expires_in: Option<i64>,
}

impl TokenResponse {
    pub fn into_access_token(self) -> AccessToken {
        AccessToken::new(
            self.access_token,
            self.token_type.unwrap_or_else(|| "Bearer".to_string()),
            self.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS),
        )
    }
}

/// Azure AD v2 sends `expires_in` as a number; some v1 proxies send a string.
fn seconds_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seconds {
        Number(i64),
        Text(String),
    }

    match Option::<Seconds>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Seconds::Number(n)) => Ok(Some(n)),
        Some(Seconds::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
