//! QQ Connect provider.
//!
//! QQ is the only provider whose token endpoint does not report the user's
//! open id; call [`OAuthProvider::get_me`] with the access token first.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde::Deserialize;
use socialite_core::{
    provider_failure, query, state::non_empty, AuthError, Gender, HttpClient, OAuthProvider,
    OAuthToken, OpenIdentity, ProviderConfig, UserProfile,
};

mod wire;

pub(crate) const PROVIDER_ID: &str = "qq";

pub struct QqProvider {
    app_id: String,
    app_secret: String,
    redirect_uri: String,
    http_client: HttpClient,
    authorize_url: String,
    token_url: String,
    me_url: String,
    user_info_url: String,
}

impl QqProvider {
    pub fn new(app_id: String, app_secret: String, redirect_uri: String) -> Self {
        Self {
            app_id,
            app_secret,
            redirect_uri,
            http_client: HttpClient::default(),
            authorize_url: "https://graph.qq.com/oauth2.0/authorize".to_string(),
            token_url: "https://graph.qq.com/oauth2.0/token".to_string(),
            me_url: "https://graph.qq.com/oauth2.0/me".to_string(),
            user_info_url: "https://graph.qq.com/user/get_user_info".to_string(),
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

    pub fn with_test_urls(
        mut self,
        token_url: String,
        me_url: String,
        user_info_url: String,
    ) -> Self {
        self.token_url = token_url;
        self.me_url = me_url;
        self.user_info_url = user_info_url;
        self
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct QqUserInfoResponse {
    ret: i64,
    msg: String,
    nickname: String,
    gender: String,
    province: String,
    city: String,
    year: String,
    constellation: String,
    figureurl: String,
    figureurl_1: String,
    figureurl_2: String,
    figureurl_qq: String,
    figureurl_qq_1: String,
    figureurl_qq_2: String,
    is_yellow_vip: String,
    vip: String,
    yellow_vip_level: String,
    level: String,
    is_yellow_year_vip: String,
}

impl QqUserInfoResponse {
    fn into_profile(self, open_id: &str) -> UserProfile {
        let gender = match self.gender.as_str() {
            "男" => Gender::Male,
            "女" => Gender::Female,
            _ => Gender::Unknown,
        };

        // Largest available avatar first.
        let avatar_url = [
            &self.figureurl_qq_2,
            &self.figureurl_qq_1,
            &self.figureurl_2,
            &self.figureurl_1,
            &self.figureurl,
        ]
        .into_iter()
        .find(|url| !url.is_empty())
        .cloned();

        let mut attributes = HashMap::new();
        for (key, value) in [
            ("year", self.year),
            ("constellation", self.constellation),
            ("figureurl_qq", self.figureurl_qq),
            ("vip", self.vip),
            ("level", self.level),
            ("is_yellow_vip", self.is_yellow_vip),
            ("yellow_vip_level", self.yellow_vip_level),
            ("is_yellow_year_vip", self.is_yellow_year_vip),
        ] {
            if !value.is_empty() {
                attributes.insert(key.to_string(), value);
            }
        }

        UserProfile {
            provider_id: PROVIDER_ID.to_string(),
            open_id: open_id.to_string(),
            union_id: None,
            nickname: self.nickname,
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
impl OAuthProvider for QqProvider {
    fn provider_id(&self) -> &str {
        PROVIDER_ID
    }

    /// `params` are `[state, scope, display]`; `state` is required.
    fn get_authorize_url(&self, params: &[&str]) -> Result<String, AuthError> {
        let (state, rest) = params.split_first().ok_or_else(|| {
            AuthError::InvalidArgument("QQ authorization requires state, [scope], [display]".into())
        })?;

        let mut query = BTreeMap::new();
        query.insert("response_type", "code".to_string());
        query.insert("client_id", self.app_id.clone());
        query.insert("redirect_uri", self.redirect_uri.clone());
        query.insert("state", state.to_string());
        for (key, value) in ["scope", "display"].into_iter().zip(rest) {
            query.insert(key, value.to_string());
        }

        Ok(query::build_url(&self.authorize_url, &query))
    }

    async fn token(&self, code: &str) -> Result<OAuthToken, AuthError> {
        let body = self
            .http_client
            .get(
                &self.token_url,
                &[
                    ("grant_type", "authorization_code"),
                    ("client_id", self.app_id.as_str()),
                    ("client_secret", self.app_secret.as_str()),
                    ("code", code),
                    ("redirect_uri", self.redirect_uri.as_str()),
                ],
            )
            .await?;

        wire::parse_token_body(&body)
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<OAuthToken, AuthError> {
        let body = self
            .http_client
            .get(
                &self.token_url,
                &[
                    ("grant_type", "refresh_token"),
                    ("client_id", self.app_id.as_str()),
                    ("client_secret", self.app_secret.as_str()),
                    ("refresh_token", refresh_token),
                ],
            )
            .await?;

        wire::parse_token_body(&body)
    }

    async fn get_me(&self, access_token: &str) -> Result<OpenIdentity, AuthError> {
        let body = self
            .http_client
            .get(&self.me_url, &[("access_token", access_token)])
            .await?;

        wire::parse_me_body(&body)
    }

    async fn get_user_info(
        &self,
        access_token: &str,
        open_id: &str,
    ) -> Result<UserProfile, AuthError> {
        let user_response: QqUserInfoResponse = self
            .http_client
            .get_json(
                &self.user_info_url,
                &[
                    ("access_token", access_token),
                    ("oauth_consumer_key", self.app_id.as_str()),
                    ("openid", open_id),
                ],
            )
            .await?;

        if user_response.ret != 0 {
            return Err(provider_failure(
                PROVIDER_ID,
                user_response.ret,
                user_response.msg,
            ));
        }

        Ok(user_response.into_profile(open_id))
    }
}
