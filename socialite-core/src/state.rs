use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The tokens returned by a provider's token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthToken {
    /// The access token used for API requests
    pub access_token: String,
    /// Seconds until the access token expires
    pub expires_in: u64,
    /// The refresh token used to obtain new access tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// The user's per-application identifier, when the token endpoint reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_id: Option<String>,
    /// The user's per-platform identifier, when the token endpoint reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub union_id: Option<String>,
    /// The scopes granted by the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// The result of a separate open-id lookup (QQ's `/me` endpoint).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenIdentity {
    /// The application the access token was issued to
    pub client_id: String,
    /// The user's per-application identifier
    pub open_id: String,
}

/// Gender as reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Reported as male
    Male,
    /// Reported as female
    Female,
    /// Not reported, or a value the provider does not document
    #[default]
    Unknown,
}

/// Basic profile information, normalized across providers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The provider identifier (e.g., "qq", "wechat")
    pub provider_id: String,
    /// The user's per-application identifier
    pub open_id: String,
    /// The user's per-platform identifier, if the provider reports one
    pub union_id: Option<String>,
    /// The user's display name
    pub nickname: String,
    /// The user's gender
    pub gender: Gender,
    /// Country, as free text in the provider's locale
    pub country: Option<String>,
    /// Province or state; Weibo reports a numeric region code
    pub province: Option<String>,
    /// City; Weibo reports a numeric region code
    pub city: Option<String>,
    /// URL of the user's avatar image
    pub avatar_url: Option<String>,
    /// Additional provider-specific attributes
    pub attributes: HashMap<String, String>,
}

/// Maps an empty string to `None`.
///
/// Providers send `""` rather than omitting fields they have no value for.
pub fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
