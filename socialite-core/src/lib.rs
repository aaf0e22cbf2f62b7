//! # Socialite Core
//!
//! `socialite-core` provides the foundational traits and types shared by the socialite
//! provider crates. It defines the common capability interface, the normalized response
//! records and the HTTP plumbing every provider builds on.
//!
//! ## Key Components
//!
//! - **[`OAuthProvider`]**: The capability interface implemented by every provider.
//! - **[`OAuthToken`]**, **[`OpenIdentity`]**, **[`UserProfile`]**: Normalized response records.
//! - **[`AuthError`]**: The error type for caller, provider, transport and decode failures.
//! - **[`HttpClient`]**: A minimal `GET`/`POST` helper around `reqwest`.

#![warn(missing_docs)]

pub use async_trait::async_trait;

/// Configuration structs for providers and the HTTP client.
pub mod config;
/// Error types.
pub mod error;
/// Shared HTTP helper.
pub mod http;
/// Deterministic query-string encoding.
pub mod query;
/// Normalized response records.
pub mod state;

pub use config::{HttpConfig, ProviderConfig};
pub use error::{AuthError, ProviderError};
pub use http::HttpClient;
pub use state::{Gender, OAuthToken, OpenIdentity, UserProfile};

/// Trait for an OAuth2-style identity provider.
///
/// Not every provider offers every operation. The default implementations of
/// [`refresh_token`](OAuthProvider::refresh_token) and [`get_me`](OAuthProvider::get_me)
/// return [`AuthError::Unsupported`].
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Get the provider identifier.
    fn provider_id(&self) -> &str;

    /// Build the URL the user is redirected to for authorization.
    ///
    /// `params` are positional; their meaning differs per provider. Arguments
    /// beyond the documented slots are ignored.
    fn get_authorize_url(&self, params: &[&str]) -> Result<String, AuthError>;

    /// Exchange an authorization code for an access token.
    async fn token(&self, code: &str) -> Result<OAuthToken, AuthError>;

    /// Refresh an access token using a refresh token.
    async fn refresh_token(&self, _refresh_token: &str) -> Result<OAuthToken, AuthError> {
        Err(AuthError::Unsupported("refresh_token"))
    }

    /// Look up the open id an access token belongs to.
    ///
    /// Only meaningful for providers whose token endpoint does not report it.
    async fn get_me(&self, _access_token: &str) -> Result<OpenIdentity, AuthError> {
        Err(AuthError::Unsupported("get_me"))
    }

    /// Fetch the user's basic profile.
    async fn get_user_info(
        &self,
        access_token: &str,
        open_id: &str,
    ) -> Result<UserProfile, AuthError>;
}

#[async_trait]
impl<P: OAuthProvider + ?Sized> OAuthProvider for Box<P> {
    fn provider_id(&self) -> &str {
        (**self).provider_id()
    }

    fn get_authorize_url(&self, params: &[&str]) -> Result<String, AuthError> {
        (**self).get_authorize_url(params)
    }

    async fn token(&self, code: &str) -> Result<OAuthToken, AuthError> {
        (**self).token(code).await
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<OAuthToken, AuthError> {
        (**self).refresh_token(refresh_token).await
    }

    async fn get_me(&self, access_token: &str) -> Result<OpenIdentity, AuthError> {
        (**self).get_me(access_token).await
    }

    async fn get_user_info(
        &self,
        access_token: &str,
        open_id: &str,
    ) -> Result<UserProfile, AuthError> {
        (**self).get_user_info(access_token, open_id).await
    }
}

/// Log a provider-reported error and wrap it in [`AuthError::Provider`].
pub fn provider_failure(provider_id: &str, code: i64, message: impl Into<String>) -> AuthError {
    let message = message.into();
    tracing::warn!(provider = provider_id, code, message = %message, "provider reported an error");
    AuthError::Provider(ProviderError::new(code, message))
}
