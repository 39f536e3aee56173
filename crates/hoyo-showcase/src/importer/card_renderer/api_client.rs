//! Module for HTTPS client for the card rendering service

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client as ReqwestClient, ClientBuilder as ReqwestBuilder};
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::cards::{read_cards, CardSet};
use crate::Result;

const DEFAULT_USER_AGENT: &str = concat!("hoyo-showcase/", env!("CARGO_PKG_VERSION"));

/// Template styles the renderer understands
pub const TEMPLATES: std::ops::RangeInclusive<u8> = 1..=3;
pub const DEFAULT_TEMPLATE: u8 = 2;

pub struct CardClientBuilder {
    base_url: String,
    user_agent: Option<String>,
}

impl CardClientBuilder {
    pub fn new(base_url: String) -> CardClientBuilder {
        CardClientBuilder {
            base_url,
            user_agent: None,
        }
    }

    pub fn build(self) -> Result<CardClient> {
        let mut headers = HeaderMap::default();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))?,
        );

        Ok(CardClient {
            client: ReqwestBuilder::new().default_headers(headers).build()?,
            cards_url: cards_url(&self.base_url)?,
        })
    }

    pub fn user_agent(mut self, user_agent: String) -> CardClientBuilder {
        self.user_agent = Some(user_agent);
        self
    }
}

fn cards_url(base_url: &str) -> Result<Url> {
    let base = if base_url.ends_with('/') {
        Url::parse(base_url)?
    } else {
        Url::parse(&format!("{base_url}/"))?
    };
    Ok(base.join("cards")?)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardRequest<'a> {
    pub uid: &'a str,
    /// Passed through as given, e.g. "cht" or "en"
    pub lang: &'a str,
    pub style: u8,
}

pub struct CardClient {
    client: ReqwestClient,
    cards_url: Url,
}

impl CardClient {
    /// Renders every showcase character for the request.
    pub async fn create(&self, request: &CardRequest<'_>) -> Result<CardSet> {
        debug!(url = %self.cards_url, uid = request.uid, style = request.style, "rendering cards");

        let body_text = self
            .client
            .post(self.cards_url.clone())
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let cards = read_cards(body_text.as_bytes())?;
        debug!(count = cards.cards.len(), "rendered");
        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_url_joins() {
        assert_eq!(
            cards_url("http://127.0.0.1:8000").unwrap().as_str(),
            "http://127.0.0.1:8000/cards"
        );
        assert_eq!(
            cards_url("https://render.example/v1/").unwrap().as_str(),
            "https://render.example/v1/cards"
        );
        cards_url("not a url").unwrap_err();
    }

    #[test]
    fn request_body() {
        let request = CardRequest {
            uid: "800123456",
            lang: "cht",
            style: DEFAULT_TEMPLATE,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"uid": "800123456", "lang": "cht", "style": 2})
        );
    }

    #[test]
    fn template_range() {
        assert!(TEMPLATES.contains(&DEFAULT_TEMPLATE));
        assert!(!TEMPLATES.contains(&0));
        assert!(!TEMPLATES.contains(&4));
    }
}
