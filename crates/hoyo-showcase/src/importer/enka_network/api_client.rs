//! Module for HTTPS client for https://enka.network/api/zzz/ and the
//! Enka.Network asset store at https://github.com/EnkaNetwork/API-docs/tree/master/store/zzz

use reqwest::{
    header::{HeaderMap, HeaderValue, USER_AGENT},
    StatusCode,
};
use reqwest::{Client as ReqwestClient, ClientBuilder as ReqwestBuilder};
use std::{collections::VecDeque, io::Read};
use tracing::debug;
use url::Url;

use crate::{Error, Result};

pub(crate) const API_BASE: &str = "https://enka.network/";
pub(crate) const ASSETS_BASE: &str =
    "https://raw.githubusercontent.com/EnkaNetwork/API-docs/master/store/zzz/";

// Enka.Network asks that clients identify themselves.
const DEFAULT_USER_AGENT: &str = concat!("hoyo-showcase/", env!("CARGO_PKG_VERSION"));

pub struct ClientBuilder {
    api_base: Option<String>,
    assets_base: Option<String>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    pub fn new() -> ClientBuilder {
        ClientBuilder {
            api_base: None,
            assets_base: None,
            user_agent: None,
        }
    }

    pub fn build(self) -> Result<Client> {
        let mut headers = HeaderMap::default();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))?,
        );
        let reqwest_builder = ReqwestBuilder::new().default_headers(headers);

        Ok(Client {
            client: reqwest_builder.build()?,
            api_base: base_url(self.api_base.as_deref().unwrap_or(API_BASE))?,
            assets_base: base_url(self.assets_base.as_deref().unwrap_or(ASSETS_BASE))?,
        })
    }

    /// Override https://enka.network/, e.g. for a mirror or a local test server.
    pub fn api_base(mut self, api_base: String) -> ClientBuilder {
        self.api_base = Some(api_base);
        self
    }

    pub fn assets_base(mut self, assets_base: String) -> ClientBuilder {
        self.assets_base = Some(assets_base);
        self
    }

    pub fn user_agent(mut self, user_agent: String) -> ClientBuilder {
        self.user_agent = Some(user_agent);
        self
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a base URL, making sure it ends in a slash so `Url::join` appends rather than replaces.
fn base_url(base: &str) -> Result<Url> {
    if base.ends_with('/') {
        Ok(Url::parse(base)?)
    } else {
        Ok(Url::parse(&format!("{base}/"))?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiEndpoint {
    // Per-player data
    ZzzShowcase(u64),

    // Asset store: names, rarities and images for the ids in the showcase
    ZzzAvatars,
    ZzzWeapons,
    ZzzLocs,
    ZzzPfps,

    // User-specified, relative to the API base
    Other(String),
}

pub(crate) fn url_for_endpoint(
    api_base: &Url,
    assets_base: &Url,
    endpoint: &ApiEndpoint,
) -> Result<Url> {
    use ApiEndpoint::*;
    Ok(match endpoint {
        ZzzShowcase(uid) => api_base.join(&format!("api/zzz/uid/{uid}"))?,

        ZzzAvatars => assets_base.join("avatars.json")?,
        ZzzWeapons => assets_base.join("weapons.json")?,
        ZzzLocs => assets_base.join("locs.json")?,
        ZzzPfps => assets_base.join("pfps.json")?,

        Other(raw_path) => api_base.join(raw_path)?,
    })
}

/// Maps the documented Enka.Network status codes onto our error types.
/// See https://api.enka.network/#/api?id=http-response-codes
pub(crate) fn check_showcase_status(status: StatusCode, uid: u64) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    match status.as_u16() {
        400 => Err(Error::InvalidUid(uid.to_string())),
        404 => Err(Error::PlayerDoesNotExist(uid.to_string())),
        424 => Err(Error::GameMaintenance),
        429 => Err(Error::RateLimited),
        code @ (500 | 503) => Err(Error::UpstreamUnavailable(code)),
        // Anything else gets reqwest's own error from error_for_status
        _ => Ok(()),
    }
}

pub struct Client {
    client: ReqwestClient,
    api_base: Url,
    assets_base: Url,
}

impl Client {
    pub async fn fetch(&self, endpoint: &ApiEndpoint) -> Result<Box<dyn Read>> {
        let url = url_for_endpoint(&self.api_base, &self.assets_base, endpoint)?;
        debug!(%url, "fetching");

        let response = self.client.get(url).send().await?;
        debug!(status = %response.status(), "response");

        if let ApiEndpoint::ZzzShowcase(uid) = endpoint {
            check_showcase_status(response.status(), *uid)?;
        }

        let body_text = response.error_for_status()?.text().await?;
        Ok(Box::new(VecDeque::from(body_text.into_bytes())))
    }
}
