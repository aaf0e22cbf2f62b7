use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde::Deserialize;
use socialite_core::{
    provider_failure, query, state::non_empty, AuthError, Gender, HttpClient, OAuthProvider,
    OAuthToken, ProviderConfig, UserProfile,
};

const PROVIDER_ID: &str = "wechat";

/// WeChat Open Platform website login (QR code).
pub struct WechatProvider {
    app_id: String,
    app_secret: String,
    redirect_uri: String,
    http_client: HttpClient,
    authorize_url: String,
    token_url: String,
    refresh_url: String,
    userinfo_url: String,
}

impl WechatProvider {
    pub fn new(app_id: String, app_secret: String, redirect_uri: String) -> Self {
        Self {
            app_id,
            app_secret,
            redirect_uri,
            http_client: HttpClient::default(),
            authorize_url: "https://open.weixin.qq.com/connect/qrconnect".to_string(),
            token_url: "https://api.weixin.qq.com/sns/oauth2/access_token".to_string(),
            refresh_url: "https://api.weixin.qq.com/sns/oauth2/refresh_token".to_string(),
            userinfo_url: "https://api.weixin.qq.com/sns/userinfo".to_string(),
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
        refresh_url: String,
        userinfo_url: String,
    ) -> Self {
        self.token_url = token_url;
        self.refresh_url = refresh_url;
        self.userinfo_url = userinfo_url;
        self
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct WechatTokenResponse {
    errcode: i64,
    errmsg: String,
    access_token: String,
    expires_in: u64,
    refresh_token: String,
    openid: String,
    scope: String,
    unionid: String,
}

impl WechatTokenResponse {
    fn into_token(self) -> Result<OAuthToken, AuthError> {
        if self.errcode != 0 {
            return Err(provider_failure(PROVIDER_ID, self.errcode, self.errmsg));
        }
        if self.access_token.is_empty() {
            return Err(AuthError::Decode(
                "Token response is missing `access_token`".to_string(),
            ));
        }

        Ok(OAuthToken {
            access_token: self.access_token,
            expires_in: self.expires_in,
            refresh_token: non_empty(self.refresh_token),
            open_id: non_empty(self.openid),
            union_id: non_empty(self.unionid),
            scope: non_empty(self.scope),
        })
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct WechatUserResponse {
    errcode: i64,
    errmsg: String,
    openid: String,
    nickname: String,
    sex: i64,
    province: String,
    city: String,
    country: String,
    headimgurl: String,
    privilege: Vec<String>,
    unionid: String,
}

impl WechatUserResponse {
    fn into_profile(self) -> UserProfile {
        let gender = match self.sex {
            1 => Gender::Male,
            2 => Gender::Female,
            _ => Gender::Unknown,
        };

        let mut attributes = HashMap::new();
        if !self.privilege.is_empty() {
            attributes.insert("privilege".to_string(), self.privilege.join(","));
        }

        UserProfile {
            provider_id: PROVIDER_ID.to_string(),
            open_id: self.openid,
            union_id: non_empty(self.unionid.trim().to_string()),
            nickname: self.nickname,
            gender,
            country: non_empty(self.country),
            province: non_empty(self.province),
            city: non_empty(self.city),
            avatar_url: non_empty(self.headimgurl),
            attributes,
        }
    }
}

#[async_trait]
impl OAuthProvider for WechatProvider {
    fn provider_id(&self) -> &str {
        PROVIDER_ID
    }

    fn get_authorize_url(&self, params: &[&str]) -> Result<String, AuthError> {
        let mut query = BTreeMap::new();
        query.insert("appid", self.app_id.clone());
        query.insert("response_type", "code".to_string());
        query.insert("redirect_uri", self.redirect_uri.clone());
        query.insert("scope", "snsapi_login".to_string());
        if let Some(state) = params.first() {
            query.insert("state", state.to_string());
        }

        Ok(query::build_url(&self.authorize_url, &query))
    }

    async fn token(&self, code: &str) -> Result<OAuthToken, AuthError> {
        let token_response: WechatTokenResponse = self
            .http_client
            .get_json(
                &self.token_url,
                &[
                    ("grant_type", "authorization_code"),
                    ("appid", self.app_id.as_str()),
                    ("secret", self.app_secret.as_str()),
                    ("code", code),
                ],
            )
            .await?;

        token_response.into_token()
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<OAuthToken, AuthError> {
        let token_response: WechatTokenResponse = self
            .http_client
            .get_json(
                &self.refresh_url,
                &[
                    ("grant_type", "refresh_token"),
                    ("appid", self.app_id.as_str()),
                    ("refresh_token", refresh_token),
                ],
            )
            .await?;

        token_response.into_token()
    }

    async fn get_user_info(
        &self,
        access_token: &str,
        open_id: &str,
    ) -> Result<UserProfile, AuthError> {
        let user_response: WechatUserResponse = self
            .http_client
            .get_json(
                &self.userinfo_url,
                &[("access_token", access_token), ("openid", open_id)],
            )
            .await?;

        if user_response.errcode != 0 {
            return Err(provider_failure(
                PROVIDER_ID,
                user_response.errcode,
                user_response.errmsg,
            ));
        }

        Ok(user_response.into_profile())
    }
}
