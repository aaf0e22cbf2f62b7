use socialite_core::{AuthError, OAuthProvider, OAuthToken, UserProfile};

/// Orchestrates the authorize → token → profile sequence for one provider.
pub struct OAuth2Flow<P: OAuthProvider> {
    provider: P,
    params: Vec<String>,
}

impl<P: OAuthProvider> OAuth2Flow<P> {
    /// Create a new `OAuth2Flow` with the given provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            params: Vec::new(),
        }
    }

    /// Set the authorize parameters that follow the state (e.g. scope, display).
    pub fn with_params(mut self, params: Vec<impl Into<String>>) -> Self {
        self.params = params.into_iter().map(|p| p.into()).collect();
        self
    }

    /// The wrapped provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Generates the redirect URL and CSRF state.
    ///
    /// The state always occupies the first positional authorize parameter.
    pub fn initiate_login(&self) -> Result<(String, String), AuthError> {
        let state = uuid::Uuid::new_v4().to_string();

        let mut params = Vec::with_capacity(self.params.len() + 1);
        params.push(state.as_str());
        params.extend(self.params.iter().map(String::as_str));

        let url = self.provider.get_authorize_url(&params)?;
        Ok((url, state))
    }

    /// Completes the flow: exchanges the code, resolves the open id and
    /// fetches the user's profile.
    pub async fn finalize_login(
        &self,
        code: &str,
        received_state: &str,
        expected_state: &str,
    ) -> Result<(UserProfile, OAuthToken), AuthError> {
        if received_state != expected_state {
            return Err(AuthError::CsrfMismatch);
        }

        let token = self.provider.token(code).await?;

        let open_id = match &token.open_id {
            Some(open_id) => open_id.clone(),
            None => {
                tracing::debug!(
                    provider = self.provider.provider_id(),
                    "token carries no open id, looking it up"
                );
                self.provider.get_me(&token.access_token).await?.open_id
            }
        };

        let profile = self
            .provider
            .get_user_info(&token.access_token, &open_id)
            .await?;

        Ok((profile, token))
    }

    /// Refresh an access token using a refresh token.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<OAuthToken, AuthError> {
        self.provider.refresh_token(refresh_token).await
    }
}
