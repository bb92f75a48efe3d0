use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by bookstore access tokens.
///
/// Identity fields (`userID`, `username`, `email`) ride alongside the
/// RFC 7519 registered claims. `sub` mirrors the username and `aud` must
/// match the audience the verifying service was configured with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Numeric user identifier
    #[serde(rename = "userID")]
    pub user_id: i64,

    /// Username of the token holder
    pub username: String,

    /// Email address of the token holder
    pub email: String,

    /// Subject (mirrors the username)
    pub sub: String,

    /// Audience the token was issued for
    pub aud: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build the claim set for a freshly authenticated user.
    ///
    /// `iat` and `nbf` are set to the current time, `exp` to the current
    /// time plus `ttl_hours`.
    pub fn for_user(
        user_id: i64,
        username: &str,
        email: &str,
        audience: &str,
        ttl_hours: i64,
    ) -> Self {
        let now = Utc::now();
        let expires_at = now + Duration::hours(ttl_hours);

        Self {
            user_id,
            username: username.to_owned(),
            email: email.to_owned(),
            sub: username.to_owned(),
            aud: audience.to_owned(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }
}
