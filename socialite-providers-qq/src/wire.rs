//! Parsers for the non-JSON bodies QQ Connect answers with.
//!
//! The token endpoint answers with `access_token=..&expires_in=..&refresh_token=..`
//! on success and with `callback( {"error":..,"error_description":..} );` on
//! failure. The `/me` endpoint always wraps its JSON in `callback( ... );`.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use socialite_core::{http::decode_json, provider_failure, AuthError, OAuthToken, OpenIdentity};

use crate::PROVIDER_ID;

static CALLBACK_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("callback pattern is valid"));

#[derive(Deserialize)]
struct QqErrorBody {
    error: i64,
    #[serde(default)]
    error_description: String,
}

#[derive(Deserialize)]
struct QqMeBody {
    #[serde(default)]
    error: i64,
    #[serde(default)]
    error_description: String,
    #[serde(default)]
    client_id: String,
    #[serde(default)]
    openid: String,
}

/// Extract the JSON object from a `callback( {...} );` body.
///
/// A bare JSON object is returned unchanged.
pub(crate) fn extract_callback_json(body: &str) -> Result<&str, AuthError> {
    CALLBACK_OBJECT
        .find(body)
        .map(|m| m.as_str())
        .ok_or_else(|| AuthError::Decode(format!("No JSON object in response: {}", body.trim())))
}

/// Parse the body of the token endpoint (used for both code exchange and refresh).
pub(crate) fn parse_token_body(body: &str) -> Result<OAuthToken, AuthError> {
    if body.contains("error") {
        let err: QqErrorBody = decode_json(extract_callback_json(body)?)?;
        if err.error == 0 {
            return Err(AuthError::Decode(format!(
                "Unexpected token response: {}",
                body.trim()
            )));
        }
        return Err(provider_failure(PROVIDER_ID, err.error, err.error_description));
    }

    let fields: HashMap<String, String> = url::form_urlencoded::parse(body.trim().as_bytes())
        .into_owned()
        .collect();
    let field = |name: &str| {
        fields
            .get(name)
            .cloned()
            .ok_or_else(|| AuthError::Decode(format!("Token response is missing `{}`", name)))
    };

    let access_token = field("access_token")?;
    let expires_in = field("expires_in")?
        .parse::<u64>()
        .map_err(|e| AuthError::decode("Invalid `expires_in` in token response", e))?;
    let refresh_token = field("refresh_token")?;

    Ok(OAuthToken {
        access_token,
        expires_in,
        refresh_token: Some(refresh_token),
        open_id: None,
        union_id: None,
        scope: None,
    })
}

/// Parse the body of the `/me` endpoint.
pub(crate) fn parse_me_body(body: &str) -> Result<OpenIdentity, AuthError> {
    let me: QqMeBody = decode_json(extract_callback_json(body)?)?;
    if me.error != 0 {
        return Err(provider_failure(PROVIDER_ID, me.error, me.error_description));
    }
    if me.openid.is_empty() {
        return Err(AuthError::Decode("Me response is missing `openid`".to_string()));
    }

    Ok(OpenIdentity {
        client_id: me.client_id,
        open_id: me.openid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_callback_json() {
        let body = r#"callback( {"client_id":"YOUR_APPID","openid":"YOUR_OPENID"} ); "#;
        assert_eq!(
            extract_callback_json(body).unwrap(),
            r#"{"client_id":"YOUR_APPID","openid":"YOUR_OPENID"}"#
        );
        assert_eq!(extract_callback_json(r#"{"a":1}"#).unwrap(), r#"{"a":1}"#);
        assert!(matches!(
            extract_callback_json("callback();"),
            Err(AuthError::Decode(_))
        ));
    }

    #[test]
    fn test_token_error_body() {
        let body = r#"callback( {"error":100002,"error_description":"param client_secret is wrong or lost "} );"#;

        let err = parse_token_body(body).unwrap_err();

        let provider_error = err.provider_error().expect("provider error");
        assert_eq!(provider_error.code, 100002);
        assert_eq!(provider_error.message, "param client_secret is wrong or lost ");
    }

    #[test]
    fn test_token_success_body() {
        let body = "access_token=FE04************************CCE2&expires_in=7776000&refresh_token=88E4************************BE14";

        let token = parse_token_body(body).unwrap();

        assert_eq!(token.access_token, "FE04************************CCE2");
        assert_eq!(token.expires_in, 7776000);
        assert_eq!(
            token.refresh_token.as_deref(),
            Some("88E4************************BE14")
        );
        assert_eq!(token.open_id, None);
    }

    #[test]
    fn test_token_body_with_missing_field() {
        let err = parse_token_body("access_token=abc&expires_in=7776000").unwrap_err();
        assert!(matches!(err, AuthError::Decode(ref msg) if msg.contains("refresh_token")));
    }

    #[test]
    fn test_token_body_with_bad_expiry() {
        let err = parse_token_body("access_token=abc&expires_in=soon&refresh_token=def").unwrap_err();
        assert!(matches!(err, AuthError::Decode(_)));
    }

    #[test]
    fn test_me_error_body() {
        let body = r#"callback( {"error":100016,"error_description":"access token check failed"} );"#;

        let err = parse_me_body(body).unwrap_err();

        assert_eq!(err.provider_error().map(|e| e.code), Some(100016));
    }

    #[test]
    fn test_me_success_body() {
        let body = r#"callback( {"client_id":"YOUR_APPID","openid":"YOUR_OPENID"} ); "#;

        let me = parse_me_body(body).unwrap();

        assert_eq!(me.client_id, "YOUR_APPID");
        assert_eq!(me.open_id, "YOUR_OPENID");
    }

    #[test]
    fn test_me_body_without_openid() {
        let err = parse_me_body(r#"callback( {"client_id":"YOUR_APPID"} );"#).unwrap_err();
        assert!(matches!(err, AuthError::Decode(_)));
    }
}
