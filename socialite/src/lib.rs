//! Socialite is a set of OAuth2 login clients for Chinese identity providers.
//!
//! This crate serves as a facade, re-exporting functionality from the other `socialite-*`
//! crates based on enabled features, and offers [`build_provider`] for picking a provider
//! at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use socialite_core as core;
pub use socialite_core::{
    AuthError, Gender, HttpClient, HttpConfig, OAuthProvider, OAuthToken, OpenIdentity,
    ProviderConfig, ProviderError, UserProfile,
};

#[cfg(feature = "flow")]
pub use socialite_flow as flow;

#[cfg(feature = "flow")]
pub use socialite_flow::OAuth2Flow;

/// Authentication providers.
pub mod providers {
    #[cfg(feature = "qq")]
    pub use socialite_providers_qq as qq;

    #[cfg(feature = "wechat")]
    pub use socialite_providers_wechat as wechat;

    #[cfg(feature = "weibo")]
    pub use socialite_providers_weibo as weibo;
}

/// The supported identity providers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// QQ Connect
    Qq,
    /// WeChat Open Platform
    #[serde(alias = "wx")]
    Wechat,
    /// Sina Weibo
    Weibo,
}

impl ProviderKind {
    /// The identifier used in configuration and in [`UserProfile::provider_id`].
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Qq => "qq",
            ProviderKind::Wechat => "wechat",
            ProviderKind::Weibo => "weibo",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "qq" => Ok(ProviderKind::Qq),
            "wechat" | "wx" => Ok(ProviderKind::Wechat),
            "weibo" => Ok(ProviderKind::Weibo),
            other => Err(AuthError::InvalidArgument(format!(
                "Unknown provider: {}",
                other
            ))),
        }
    }
}

/// Build the provider for `kind` from its credentials.
///
/// Fails with [`AuthError::InvalidArgument`] if the provider's feature is not enabled.
pub fn build_provider(
    kind: ProviderKind,
    config: &ProviderConfig,
) -> Result<Box<dyn OAuthProvider>, AuthError> {
    build_provider_with_client(kind, config, HttpClient::default())
}

/// Like [`build_provider`], sending requests through `http_client`.
pub fn build_provider_with_client(
    kind: ProviderKind,
    config: &ProviderConfig,
    http_client: HttpClient,
) -> Result<Box<dyn OAuthProvider>, AuthError> {
    match kind {
        #[cfg(feature = "qq")]
        ProviderKind::Qq => Ok(Box::new(
            providers::qq::QqProvider::from_config(config).with_http_client(http_client),
        )),
        #[cfg(feature = "wechat")]
        ProviderKind::Wechat => Ok(Box::new(
            providers::wechat::WechatProvider::from_config(config).with_http_client(http_client),
        )),
        #[cfg(feature = "weibo")]
        ProviderKind::Weibo => Ok(Box::new(
            providers::weibo::WeiboProvider::from_config(config).with_http_client(http_client),
        )),
        #[allow(unreachable_patterns)]
        other => Err(AuthError::InvalidArgument(format!(
            "Provider `{}` is not enabled",
            other
        ))),
    }
}
