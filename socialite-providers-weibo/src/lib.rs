use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde::Deserialize;
use socialite_core::{
    provider_failure, query, state::non_empty, AuthError, Gender, HttpClient, OAuthProvider,
    OAuthToken, ProviderConfig, UserProfile,
};

const PROVIDER_ID: &str = "weibo";

/// Positional authorize parameters, in the order callers pass them.
const AUTHORIZE_SLOTS: [&str; 5] = ["state", "display", "forcelogin", "scope", "language"];

pub struct WeiboProvider {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    http_client: HttpClient,
    authorize_url: String,
    token_url: String,
    user_url: String,
}

impl WeiboProvider {
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uri,
            http_client: HttpClient::default(),
            authorize_url: "https://api.weibo.com/oauth2/authorize".to_string(),
            token_url: "https://api.weibo.com/oauth2/access_token".to_string(),
            user_url: "https://api.weibo.com/2/users/show.json".to_string(),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(
            config.client_id.clone(),
            config.client_secret.clone(),
            config.redirect_uri.clone(),
        )
    }

    pub fn with_http_client(mut self, http_client: HttpClient) -> Self {
        self.http_client = http_client;
        self
    }

    pub fn with_test_urls(mut self, token_url: String, user_url: String) -> Self {
        self.token_url = token_url;
        self.user_url = user_url;
        self
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct WeiboAccessTokenResponse {
    error_code: i64,
    error: String,
    access_token: String,
    expires_in: u64,
    uid: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct WeiboUserResponse {
    error_code: i64,
    error: String,
    id: u64,
    idstr: String,
    screen_name: String,
    name: String,
    province: String,
    city: String,
    location: String,
    description: String,
    url: String,
    profile_image_url: String,
    avatar_large: String,
    domain: String,
    gender: String,
    followers_count: i64,
    friends_count: i64,
    statuses_count: i64,
    verified: bool,
}

impl WeiboUserResponse {
    fn into_profile(self) -> UserProfile {
        let gender = match self.gender.as_str() {
            "m" => Gender::Male,
            "f" => Gender::Female,
            _ => Gender::Unknown,
        };

        let open_id = if self.idstr.is_empty() {
            self.id.to_string()
        } else {
            self.idstr
        };

        let avatar_url = non_empty(self.avatar_large).or_else(|| non_empty(self.profile_image_url));

        let mut attributes = HashMap::new();
        for (key, value) in [
            ("name", self.name),
            ("location", self.location),
            ("description", self.description),
            ("url", self.url),
            ("domain", self.domain),
        ] {
            if !value.is_empty() {
                attributes.insert(key.to_string(), value);
            }
        }
        attributes.insert("followers_count".to_string(), self.followers_count.to_string());
        attributes.insert("friends_count".to_string(), self.friends_count.to_string());
        attributes.insert("statuses_count".to_string(), self.statuses_count.to_string());
        attributes.insert("verified".to_string(), self.verified.to_string());

        UserProfile {
            provider_id: PROVIDER_ID.to_string(),
            open_id,
            union_id: None,
            nickname: self.screen_name,
            gender,
            country: None,
            province: non_empty(self.province),
            city: non_empty(self.city),
            avatar_url,
            attributes,
        }
    }
}

#[async_trait]
impl OAuthProvider for WeiboProvider {
    fn provider_id(&self) -> &str {
        PROVIDER_ID
    }

    fn get_authorize_url(&self, params: &[&str]) -> Result<String, AuthError> {
        let mut query = BTreeMap::new();
        query.insert("client_id", self.client_id.clone());
        query.insert("redirect_uri", self.redirect_uri.clone());
        for (key, value) in AUTHORIZE_SLOTS.into_iter().zip(params) {
            query.insert(key, value.to_string());
        }

        Ok(query::build_url(&self.authorize_url, &query))
    }

    async fn token(&self, code: &str) -> Result<OAuthToken, AuthError> {
        // Weibo only accepts the token exchange as a form POST.
        let token_response: WeiboAccessTokenResponse = self
            .http_client
            .post_json(
                &self.token_url,
                &[
                    ("grant_type", "authorization_code"),
                    ("client_id", self.client_id.as_str()),
                    ("client_secret", self.client_secret.as_str()),
                    ("redirect_uri", self.redirect_uri.as_str()),
                    ("code", code),
                ],
            )
            .await?;

        if token_response.error_code != 0 {
            return Err(provider_failure(
                PROVIDER_ID,
                token_response.error_code,
                token_response.error,
            ));
        }
        if token_response.access_token.is_empty() {
            return Err(AuthError::Decode(
                "Token response is missing `access_token`".to_string(),
            ));
        }

        Ok(OAuthToken {
            access_token: token_response.access_token,
            expires_in: token_response.expires_in,
            refresh_token: None,
            open_id: non_empty(token_response.uid),
            union_id: None,
            scope: None,
        })
    }

    async fn get_user_info(
        &self,
        access_token: &str,
        open_id: &str,
    ) -> Result<UserProfile, AuthError> {
        let user_response: WeiboUserResponse = self
            .http_client
            .get_json(
                &self.user_url,
                &[("access_token", access_token), ("uid", open_id)],
            )
            .await?;

        if user_response.error_code != 0 {
            return Err(provider_failure(
                PROVIDER_ID,
                user_response.error_code,
                user_response.error,
            ));
        }

        Ok(user_response.into_profile())
    }
}
