//! OAuth2 authorization-code flow for the Dropbox API.

use reqwest::Client;
use tracing::debug;
use urlencoding::encode;

use crate::client::REQUEST_TIMEOUT;
use crate::error::Result;
use crate::models::Token;

/// Page the user visits to grant access to the app.
const AUTHORIZE_URL: &str = "https://www.dropbox.com/1/oauth2/authorize";

/// Dropbox OAuth2 token-exchange endpoint.
const TOKEN_URL: &str = "https://api.dropbox.com/1/oauth2/token";

/// Handler for the one-shot authorization-code-to-access-token exchange.
pub struct OAuth2Handler {
    key: String,
    secret: String,
    redirect_url: String,
    token_url: String,
    http: Client,
}

impl OAuth2Handler {
    /// Create a handler from the app key, app secret, and redirect URL
    /// registered with the Dropbox app console.
    pub fn new(
        key: impl Into<String>,
        secret: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            redirect_url: redirect_url.into(),
            token_url: TOKEN_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Override the token-exchange endpoint. Used by tests to point the
    /// handler at a local mock server.
    pub fn set_token_url(&mut self, url: impl Into<String>) {
        self.token_url = url.into();
    }

    /// URL the user must visit to authorize the app and obtain a code.
    ///
    /// The app key and redirect URL are percent-encoded into the query
    /// string; plain values pass through unchanged.
    pub fn authorize_url(&self) -> String {
        format!(
            "{}?client_id={}&response_type=code&redirect_uri={}",
            AUTHORIZE_URL,
            encode(&self.key),
            encode(&self.redirect_url)
        )
    }

    /// Exchange an authorization code for an access token.
    ///
    /// The HTTP status is not checked: Dropbox reports OAuth failures in
    /// the body, which decodes into a [`Token`] with `error` populated.
    pub async fn exchange_token(&self, code: &str) -> Result<Token> {
        let params = [
            ("code", code),
            ("grant_type", "authorization_code"),
            ("client_id", self.key.as_str()),
            ("client_secret", self.secret.as_str()),
            ("redirect_uri", self.redirect_url.as_str()),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .timeout(REQUEST_TIMEOUT)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), %body, "token exchange response");

        let token: Token = serde_json::from_str(&body)?;
        Ok(token)
    }
}
