use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client as ReqwestClient, Response};
use serde::{de::DeserializeOwned, Deserialize};
use url::Url;

use crate::{
    error::{Error, RemoteError},
    models::{listing::Listing, post::Post},
    result::Result,
    source::{PostSource, TopQuery},
};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "weeklypost/",
    env!("CARGO_PKG_VERSION"),
    " (weekly media picker)"
);

/// Token endpoint for application-only OAuth.
pub const AUTH_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// Base URL for authenticated API requests.
pub const API_BASE: &str = "https://oauth.reddit.com";

/// Largest page the listing endpoints serve.
const PAGE_SIZE: usize = 100;

/// Application credentials issued by the platform.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    /// Wraps a client ID and secret.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Returns the client ID.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Endpoints and identification used by [`Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Sent as the `User-Agent` header on every request.
    pub user_agent: String,
    /// Token endpoint.
    pub auth_url: String,
    /// Base URL for listing requests.
    pub api_base: String,
}

impl ClientConfig {
    /// Default endpoints with a custom user agent.
    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            auth_url: AUTH_URL.to_string(),
            api_base: API_BASE.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct TokenReply {
    access_token: String,
    #[serde(default)]
    token_type: String,
    expires_in: i64,
    #[serde(default)]
    scope: String,
}

/// An authenticated session with the API.
pub struct Client {
    http: ReqwestClient,
    access_token: String,
    expires_at: Option<DateTime<Utc>>,
    api_base: Url,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_base", &self.api_base.as_str())
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Performs the application-only OAuth handshake.
    ///
    /// # Errors
    ///
    /// Returns an error if `config.api_base` is not a usable base URL, the HTTP
    /// client cannot be built, the request fails, the credentials are
    /// rejected, or the token reply cannot be decoded.
    pub async fn authenticate(credentials: &Credentials, config: &ClientConfig) -> Result<Self> {
        let api_base = base_url(&config.api_base)?;
        let http = ReqwestClient::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        log::info!("token request for {} dispatched", config.auth_url);
        let response = http
            .post(&config.auth_url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let token: TokenReply = decode(response).await?;
        let expires_at = Duration::try_seconds(token.expires_in)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime));
        match expires_at {
            Some(at) => log::debug!(
                "granted {} token with scope `{}`, valid until {}",
                token.token_type,
                token.scope,
                at
            ),
            None => log::warn!(
                "granted {} token with scope `{}`, lifetime of {}s is out of range",
                token.token_type,
                token.scope,
                token.expires_in
            ),
        }

        Ok(Self {
            http,
            access_token: token.access_token,
            expires_at,
            api_base,
        })
    }

    /// Returns when the access token stops being accepted, or None if the
    /// lifetime the service reported cannot be represented.
    pub fn token_expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Fetches the top posts of a community, following pagination until
    /// `query.limit()` posts are collected or the listing runs out.
    ///
    /// # Errors
    ///
    /// Fails on the first request that errors, returns a non-success status,
    /// or cannot be decoded. Nothing is retried.
    pub async fn top_posts(&self, query: &TopQuery) -> Result<Vec<Post>> {
        let url = self.listing_url(query.community())?;
        let mut posts = Vec::with_capacity(query.limit());
        let mut after: Option<String> = None;

        while posts.len() < query.limit() {
            let page_size = (query.limit() - posts.len()).min(PAGE_SIZE);
            let mut params = vec![
                ("t", query.period().as_str().to_string()),
                ("limit", page_size.to_string()),
                ("raw_json", "1".to_string()),
            ];
            if let Some(cursor) = &after {
                params.push(("after", cursor.clone()));
            }

            let listing: Listing<Post> = self.fetch_json(url.clone(), &params).await?;
            let fetched = listing.len();
            let next = listing.after().map(ToString::to_string);
            posts.extend(listing.into_items().take(page_size));

            match next {
                Some(cursor) if fetched > 0 => after = Some(cursor),
                _ => break,
            }
        }

        log::debug!("fetched {} posts from r/{}", posts.len(), query.community());
        Ok(posts)
    }

    /// Builds `{api_base}/r/{community}/top`, with the community encoded as a
    /// single path segment.
    fn listing_url(&self, community: &str) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidEndpoint(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(["r", community, "top"]);
        Ok(url)
    }

    async fn fetch_json<T>(&self, url: Url, params: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if let Some(expires_at) = self.expires_at.filter(|at| Utc::now() >= *at) {
            log::warn!("access token expired at {}", expires_at);
        }

        log::info!("request for {} dispatched", url);
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .query(params)
            .send()
            .await?;

        decode(response).await
    }
}

#[async_trait]
impl PostSource for Client {
    async fn top_posts(&self, query: &TopQuery) -> Result<Vec<Post>> {
        Client::top_posts(self, query).await
    }
}

fn base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|err| Error::InvalidEndpoint(format!("{raw}: {err}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidEndpoint(raw.to_string()));
    }
    Ok(url)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    log::info!("response status: {}", response.status());

    match response.status() {
        status if status.is_success() => response.json::<T>().await.map_err(Into::into),
        code => Err(RemoteError::from_status(code).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_hides_secret() {
        let creds = Credentials::new("id", "hunter2");
        let shown = format!("{creds:?}");
        assert!(shown.contains("id"));
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn base_url_rejects_garbage() {
        assert!(matches!(base_url("not a url"), Err(Error::InvalidEndpoint(_))));
        assert!(matches!(
            base_url("mailto:someone@example.com"),
            Err(Error::InvalidEndpoint(_))
        ));
        assert!(base_url("https://oauth.reddit.com").is_ok());
    }

    #[test]
    fn config_defaults_point_at_live_service() {
        let config = ClientConfig::with_user_agent("test-agent/1.0");
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.auth_url, AUTH_URL);
        assert_eq!(config.api_base, API_BASE);
    }
}
