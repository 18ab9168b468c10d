use reqwest::{Response, StatusCode, Url, header::AUTHORIZATION};

use crate::{
    Error, Res,
    spotify::SpotifyClient,
    types::{AuthorizationCode, TokenErrorResponse, TokenPair, TokenResponse},
};

impl SpotifyClient {
    /// Builds the URL the browser is sent to for user authorization.
    ///
    /// The query carries `response_type=code`, the client id, the requested
    /// scope and the redirect URI, each form-encoded. Spotify sends the user
    /// back to the redirect URI with a `code` (or an `error`) query parameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the configured authorization URL
    /// is not a valid absolute URL.
    pub fn authorize_url(&self) -> Res<Url> {
        let config = self.config();
        Url::parse_with_params(
            &config.auth_url,
            &[
                ("response_type", "code"),
                ("client_id", config.credential.client_id()),
                ("scope", config.scope.as_str()),
                ("redirect_uri", config.redirect_uri.as_str()),
            ],
        )
        .map_err(|e| Error::Configuration(format!("authorization url '{}': {}", config.auth_url, e)))
    }

    /// Exchanges an authorization code for an access and refresh token.
    ///
    /// Posts `grant_type=authorization_code` together with the code and the
    /// redirect URI to the token endpoint, authenticated with the client's
    /// Basic header. The code is consumed; it is single-use on Spotify's side
    /// too, so a failed exchange is not retried.
    ///
    /// # Errors
    ///
    /// - [`Error::TokenExchange`] if the endpoint rejects the code or the
    ///   response lacks a non-empty `access_token` or `refresh_token`
    /// - [`Error::Http`] on transport failures and timeouts
    pub async fn exchange_code(&self, code: AuthorizationCode) -> Res<TokenPair> {
        let code = code.into_inner();
        let res = self
            .token_request(&[
                ("grant_type", "authorization_code"),
                ("code", code.as_str()),
                ("redirect_uri", self.config().redirect_uri.as_str()),
            ])
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::TokenExchange(rejection(status, res).await));
        }

        let body: TokenResponse = res
            .json()
            .await
            .map_err(|e| Error::TokenExchange(format!("malformed token response: {}", e)))?;

        let access_token = non_empty(body.access_token)
            .ok_or_else(|| Error::TokenExchange("response lacks access_token".to_string()))?;
        let refresh_token = non_empty(body.refresh_token)
            .ok_or_else(|| Error::TokenExchange("response lacks refresh_token".to_string()))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Replaces the access token of `token` using its refresh token.
    ///
    /// Spotify usually keeps the refresh token as is; when the response does
    /// carry a new one, it replaces the old one as well.
    ///
    /// # Errors
    ///
    /// - [`Error::TokenRefresh`] if the refresh token is rejected (revoked,
    ///   expired, unknown) or the response lacks an `access_token`. The
    ///   session cannot recover from this without a new authorization.
    /// - [`Error::Http`] on transport failures and timeouts
    pub async fn refresh(&self, token: &mut TokenPair) -> Res<()> {
        let res = self
            .token_request(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", token.refresh_token.as_str()),
            ])
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::TokenRefresh(rejection(status, res).await));
        }

        let body: TokenResponse = res
            .json()
            .await
            .map_err(|e| Error::TokenRefresh(format!("malformed token response: {}", e)))?;

        token.access_token = non_empty(body.access_token)
            .ok_or_else(|| Error::TokenRefresh("response lacks access_token".to_string()))?;
        if let Some(rotated) = non_empty(body.refresh_token) {
            token.refresh_token = rotated;
        }

        Ok(())
    }

    async fn token_request(&self, params: &[(&str, &str)]) -> Res<Response> {
        let config = self.config();
        let res = self
            .http
            .post(&config.token_url)
            .header(AUTHORIZATION, config.credential.basic_auth_header())
            .form(params)
            .send()
            .await?;

        Ok(res)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

async fn rejection(status: StatusCode, res: Response) -> String {
    match res.json::<TokenErrorResponse>().await {
        Ok(TokenErrorResponse {
            error: Some(error),
            error_description,
        }) => match error_description {
            Some(description) => format!("{} {}: {}", status, error, description),
            None => format!("{} {}", status, error),
        },
        _ => status.to_string(),
    }
}
