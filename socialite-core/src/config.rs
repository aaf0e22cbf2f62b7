use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Credentials registered with a provider.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The application id (QQ, WeChat) or client id (Weibo).
    pub client_id: String,
    /// The application secret.
    pub client_secret: String,
    /// The callback URL registered with the provider.
    pub redirect_uri: String,
}

impl ProviderConfig {
    /// Create a new provider configuration.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }
}

/// Settings for the shared HTTP client.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Total time allowed for a single request.
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// The `User-Agent` header sent with every request.
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            user_agent: Some(concat!("socialite-rs/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
