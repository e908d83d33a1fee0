use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// What a token is allowed to be used for.
///
/// Carried as an ordinary claim; the codec itself is purpose-agnostic and
/// callers check it after parsing. This prevents a session token from being
/// redeemed as a password-reset token and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TokenPurpose {
    #[default]
    Session,
    PasswordReset,
}

/// Claim set embedded in signed tokens.
///
/// `iat` and `exp` are stamped by the codec at issuance; everything else is
/// fixed by the constructor and immutable once embedded in a token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (the bearer's email); present on session tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Unique token identifier
    pub jti: String,

    /// Account the token was issued for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,

    #[serde(default)]
    pub is_admin: bool,

    #[serde(default)]
    pub purpose: TokenPurpose,
}

impl Claims {
    /// Build the claim set for a login session token.
    ///
    /// # Arguments
    /// * `user_id` - Account identifier
    /// * `email` - Account email, stored as the subject
    /// * `is_admin` - Whether the bearer holds admin rights
    ///
    /// # Returns
    /// Claims with a fresh `jti`; `iat`/`exp` are left for the codec
    pub fn for_session(user_id: Uuid, email: impl Into<String>, is_admin: bool) -> Self {
        Self {
            sub: Some(email.into()),
            exp: None,
            iat: None,
            jti: Uuid::new_v4().to_string(),
            user_id: Some(user_id),
            is_admin,
            purpose: TokenPurpose::Session,
        }
    }

    /// Build the claim set for a short-lived password-reset token.
    ///
    /// Deliberately carries no subject and no admin flag; the token can only
    /// be used to rotate the password of the account it names.
    pub fn for_password_reset(user_id: Uuid) -> Self {
        Self {
            sub: None,
            exp: None,
            iat: None,
            jti: Uuid::new_v4().to_string(),
            user_id: Some(user_id),
            is_admin: false,
            purpose: TokenPurpose::PasswordReset,
        }
    }
}
