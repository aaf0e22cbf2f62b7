use socialite_core::{AuthError, Gender, OAuthProvider};
use socialite_providers_wechat::WechatProvider;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> WechatProvider {
    WechatProvider::new(
        "APPID".to_string(),
        "SECRET".to_string(),
        "REDIRECT_URI".to_string(),
    )
    .with_test_urls(
        format!("{}/sns/oauth2/access_token", server.uri()),
        format!("{}/sns/oauth2/refresh_token", server.uri()),
        format!("{}/sns/userinfo", server.uri()),
    )
}

#[tokio::test]
async fn test_wechat_oauth_flow() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sns/oauth2/access_token"))
        .and(query_param("grant_type", "authorization_code"))
        .and(query_param("appid", "APPID"))
        .and(query_param("secret", "SECRET"))
        .and(query_param("code", "test_code"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "YOUR_ACCESS_TOKEN",
                "expires_in": 7200,
                "refresh_token": "YOUR_REFRESH_TOKEN",
                "openid": "OPENID",
                "scope": "snsapi_login",
                "unionid": "o6_bmasdasdsad6_2sgVt7hMZOPfL"
            })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sns/userinfo"))
        .and(query_param("access_token", "YOUR_ACCESS_TOKEN"))
        .and(query_param("openid", "OPENID"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "openid": "OPENID",
                "nickname": "NICKNAME",
                "sex": 1,
                "province": "PROVINCE",
                "city": "CITY",
                "country": "COUNTRY",
                "headimgurl": "https://thirdwx.qlogo.cn/mmopen/g3MonUZtNHkdmzicIlibx6iaFqAc56vxLSUfpb6n5WKSYVY0ChQKkiaJSgQ1dZuTOgvLLrhJbERQQ4eMsv84eavHiaiceqxibJxCfHe/0",
                "privilege": ["PRIVILEGE1", "PRIVILEGE2"],
                "unionid": " o6_bmasdasdsad6_2sgVt7hMZOPfL"
            })),
        )
        .mount(&server)
        .await;

    let provider = provider(&server);

    let token = provider.token("test_code").await.expect("Failed to exchange code");
    assert_eq!(token.access_token, "YOUR_ACCESS_TOKEN");
    assert_eq!(token.expires_in, 7200);
    assert_eq!(token.refresh_token.as_deref(), Some("YOUR_REFRESH_TOKEN"));
    assert_eq!(token.open_id.as_deref(), Some("OPENID"));
    assert_eq!(
        token.union_id.as_deref(),
        Some("o6_bmasdasdsad6_2sgVt7hMZOPfL")
    );

    let open_id = token.open_id.clone().unwrap();
    let profile = provider
        .get_user_info(&token.access_token, &open_id)
        .await
        .expect("Failed to get user info");

    assert_eq!(profile.provider_id, "wechat");
    assert_eq!(profile.open_id, "OPENID");
    assert_eq!(profile.nickname, "NICKNAME");
    assert_eq!(profile.gender, Gender::Male);
    assert_eq!(profile.country.as_deref(), Some("COUNTRY"));
    assert_eq!(profile.province.as_deref(), Some("PROVINCE"));
    assert_eq!(profile.city.as_deref(), Some("CITY"));
    assert_eq!(
        profile.avatar_url.as_deref(),
        Some("https://thirdwx.qlogo.cn/mmopen/g3MonUZtNHkdmzicIlibx6iaFqAc56vxLSUfpb6n5WKSYVY0ChQKkiaJSgQ1dZuTOgvLLrhJbERQQ4eMsv84eavHiaiceqxibJxCfHe/0")
    );
    assert_eq!(
        profile.union_id.as_deref(),
        Some("o6_bmasdasdsad6_2sgVt7hMZOPfL")
    );
    assert_eq!(
        profile.attributes.get("privilege").map(String::as_str),
        Some("PRIVILEGE1,PRIVILEGE2")
    );
}

#[tokio::test]
async fn test_wechat_token_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sns/oauth2/access_token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"errcode":40029,"errmsg":"invalid code"}"#),
        )
        .mount(&server)
        .await;

    let err = provider(&server).token("").await.unwrap_err();

    let provider_error = err.provider_error().expect("provider error");
    assert_eq!(provider_error.code, 40029);
    assert_eq!(provider_error.message, "invalid code");
}

#[tokio::test]
async fn test_wechat_user_info_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sns/userinfo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"errcode":40003,"errmsg":"invalid openid"}"#),
        )
        .mount(&server)
        .await;

    let err = provider(&server).get_user_info("", "").await.unwrap_err();

    assert_eq!(err.provider_error().map(|e| e.code), Some(40003));
}

#[tokio::test]
async fn test_wechat_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sns/oauth2/access_token"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = provider(&server).token("test_code").await.unwrap_err();

    assert!(matches!(err, AuthError::Decode(_)));
}
