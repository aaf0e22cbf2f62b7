use std::collections::BTreeMap;

/// Encodes parameters as a query string with keys in lexicographic order.
///
/// Keys and values are form-URL-encoded (`/` becomes `%2F`, space becomes `+`),
/// so the same parameter set always produces the same string.
pub fn sorted_query(params: &BTreeMap<&str, String>) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Joins an endpoint and a sorted query string.
pub fn build_url(endpoint: &str, params: &BTreeMap<&str, String>) -> String {
    format!("{}?{}", endpoint, sorted_query(params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_sorted() {
        let mut params = BTreeMap::new();
        params.insert("state", "s".to_string());
        params.insert("client_id", "id".to_string());
        params.insert("response_type", "code".to_string());
        params.insert("display", "pc".to_string());

        assert_eq!(
            sorted_query(&params),
            "client_id=id&display=pc&response_type=code&state=s"
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let mut params = BTreeMap::new();
        params.insert("redirect_uri", "http://localhost/redirect_uri".to_string());
        params.insert("scope", "get_user_info list album".to_string());
        params.insert("state", "a&b=c".to_string());

        assert_eq!(
            build_url("https://example.com/authorize", &params),
            "https://example.com/authorize?redirect_uri=http%3A%2F%2Flocalhost%2Fredirect_uri&scope=get_user_info+list+album&state=a%26b%3Dc"
        );
    }

    #[test]
    fn test_empty_value_is_kept() {
        let mut params = BTreeMap::new();
        params.insert("state", String::new());

        assert_eq!(sorted_query(&params), "state=");
    }
}
