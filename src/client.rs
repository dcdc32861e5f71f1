//! Dropbox API client for folder listing, link retrieval, and search.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::auth::OAuth2Handler;
use crate::error::{DropboxError, Result};
use crate::models::{
    ApiErrorBody, Folder, ListFolderArgs, MediaParams, SearchArgs, SearchResult, ShareParams,
    SharedUrl, Token,
};

const LIST_FOLDER_URL: &str = "https://api.dropboxapi.com/2/files/list_folder";
const SEARCH_URL: &str = "https://api.dropboxapi.com/2/files/search";
const MEDIA_URL: &str = "https://api.dropboxapi.com/1/media/auto";
const SHARES_URL: &str = "https://api.dropboxapi.com/1/shares/auto";

const DEFAULT_LOCALE: &str = "en";

/// Per-request timeout. The API answers in one round trip; anything
/// longer than this is a stuck connection.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Dropbox HTTP API.
///
/// Holds the access token and locale shared by all operations. Each
/// operation issues one POST and maps the response; there is no retry,
/// pagination, or state beyond the configuration fields.
pub struct DropboxClient {
    token: Option<Token>,
    locale: String,
    oauth2: Option<OAuth2Handler>,
    http: Client,
    list_folder_url: String,
    search_url: String,
    media_url: String,
    shares_url: String,
}

impl Default for DropboxClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DropboxClient {
    /// Create an unconfigured client with the production endpoints and
    /// the default locale.
    pub fn new() -> Self {
        Self {
            token: None,
            locale: DEFAULT_LOCALE.to_string(),
            oauth2: None,
            http: Client::new(),
            list_folder_url: LIST_FOLDER_URL.to_string(),
            search_url: SEARCH_URL.to_string(),
            media_url: MEDIA_URL.to_string(),
            shares_url: SHARES_URL.to_string(),
        }
    }

    /// Set the app key, app secret, and redirect URL from the Dropbox app
    /// console. Required before [`authorize_url`](Self::authorize_url) and
    /// [`exchange_token`](Self::exchange_token).
    pub fn set_app_info(
        &mut self,
        key: impl Into<String>,
        secret: impl Into<String>,
        redirect_url: impl Into<String>,
    ) {
        self.oauth2 = Some(OAuth2Handler::new(key, secret, redirect_url));
    }

    /// Set the access token used by the authenticated operations.
    pub fn set_access_token(&mut self, access_token: impl Into<String>) {
        self.token = Some(Token {
            access_token: access_token.into(),
            ..Token::default()
        });
    }

    /// The configured access token, if any.
    pub fn access_token(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.access_token.as_str())
    }

    /// Locale sent to the API to translate/format messages.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    /// URL the user must visit to authorize the app.
    pub fn authorize_url(&self) -> Result<String> {
        Ok(self.oauth2()?.authorize_url())
    }

    /// Exchange an authorization code for an access token. The token is
    /// returned, not stored; pass it to
    /// [`set_access_token`](Self::set_access_token).
    pub async fn exchange_token(&self, code: &str) -> Result<Token> {
        self.oauth2()?.exchange_token(code).await
    }

    /// List the entries of a folder.
    pub async fn list_folder(&self, args: &ListFolderArgs) -> Result<Folder> {
        self.call(&self.list_folder_url, args).await
    }

    /// Search for files by name under a path.
    pub async fn search(&self, args: &SearchArgs) -> Result<SearchResult> {
        self.call(&self.search_url, args).await
    }

    /// Get a direct (streamable) link for a file.
    pub async fn get_media_url(&self, path: &str) -> Result<SharedUrl> {
        let url = path_url(&self.media_url, path);
        let params = MediaParams {
            locale: self.locale.clone(),
        };
        self.call(&url, &params).await
    }

    /// Get a shareable link for a file or folder.
    pub async fn get_share_url(&self, path: &str, short_url: bool) -> Result<SharedUrl> {
        let url = path_url(&self.shares_url, path);
        let params = ShareParams {
            locale: self.locale.clone(),
            short_url,
        };
        self.call(&url, &params).await
    }

    /// Override the `files/list_folder` endpoint. Used by tests.
    pub fn set_list_folder_url(&mut self, url: impl Into<String>) {
        self.list_folder_url = url.into();
    }

    /// Override the `files/search` endpoint. Used by tests.
    pub fn set_search_url(&mut self, url: impl Into<String>) {
        self.search_url = url.into();
    }

    /// Override the `media/auto` endpoint prefix. Used by tests.
    pub fn set_media_url(&mut self, url: impl Into<String>) {
        self.media_url = url.into();
    }

    /// Override the `shares/auto` endpoint prefix. Used by tests.
    pub fn set_shares_url(&mut self, url: impl Into<String>) {
        self.shares_url = url.into();
    }

    fn oauth2(&self) -> Result<&OAuth2Handler> {
        self.oauth2
            .as_ref()
            .ok_or(DropboxError::NotConfigured("app credentials"))
    }

    fn bearer_token(&self) -> Result<&str> {
        self.token
            .as_ref()
            .map(|t| t.access_token.as_str())
            .ok_or(DropboxError::NotConfigured("access token"))
    }

    /// Issue one authenticated POST with a JSON body and map the response.
    ///
    /// 401 maps to `Unauthorized` regardless of body content; any other
    /// non-2xx status maps to `Api` with the body's `error_summary` when
    /// it parses, the raw body otherwise.
    async fn call<P, T>(&self, url: &str, params: &P) -> Result<T>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let token = self.bearer_token()?;
        let body = serde_json::to_string(params)?;
        debug!(%url, %body, "dropbox request");

        let response = self
            .http
            .post(url)
            .timeout(REQUEST_TIMEOUT)
            .header("Content-Type", "application/json")
            .bearer_auth(token)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;
        debug!(status = status.as_u16(), body = %raw, "dropbox response");

        if status == StatusCode::UNAUTHORIZED {
            return Err(DropboxError::Unauthorized);
        }

        if !status.is_success() {
            let summary = match serde_json::from_str::<ApiErrorBody>(&raw) {
                Ok(error_body) => error_body.error_summary,
                Err(_) => raw,
            };
            return Err(DropboxError::Api {
                status: status.as_u16(),
                summary,
            });
        }

        Ok(serde_json::from_str(&raw)?)
    }
}

/// Join a link-endpoint prefix and a Dropbox path.
fn path_url(base: &str, path: &str) -> String {
    format!("{}/{}", base, path.trim_start_matches('/'))
}
