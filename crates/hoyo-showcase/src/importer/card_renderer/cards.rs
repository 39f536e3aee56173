//! Module for importer for the card rendering service's response

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer, Serialize};
use std::{fs, io::Read, path::Path};
use tracing::debug;

use crate::{Error, Result};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Parses a rendered card set from the provided JSON reader.
/// Fails if not given a JSON object, or expected data structure does not match.
pub(crate) fn read_cards(cards_reader: impl Read) -> serde_json::Result<CardSet> {
    let result: CardSet = serde_json::from_reader(cards_reader)?;
    Ok(result)
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CardSet {
    #[serde(default)]
    pub cards: Vec<Card>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Card {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
    pub rarity: u8,
    /// Base64-encoded PNG
    image: String,
}

/// Entry in the `list` output
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CardSummary {
    pub id: String,
    pub name: String,
    pub rarity: u8,
}

// Character ids arrive as numbers from some renderer versions and strings from others
fn id_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(u64),
        Text(String),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Number(number) => number.to_string(),
        Id::Text(text) => text,
    })
}

impl CardSet {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn find(&self, character_id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == character_id)
    }

    /// The card for `character_id`, distinguishing "nothing rendered" from "not in this showcase".
    pub fn card_for(&self, character_id: &str) -> Result<&Card> {
        if self.is_empty() {
            return Err(Error::NoCardGenerated(character_id.to_string()));
        }
        self.find(character_id)
            .ok_or_else(|| Error::CharacterNotFound(character_id.to_string()))
    }

    pub fn summaries(&self) -> Result<Vec<CardSummary>> {
        if self.is_empty() {
            return Err(Error::NoCharacters);
        }
        Ok(self.cards.iter().map(Card::summary).collect())
    }
}

impl Card {
    pub fn summary(&self) -> CardSummary {
        CardSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            rarity: self.rarity,
        }
    }

    /// `{id}.png`, provided the id is safe to use as a file name.
    pub fn file_name(&self) -> Result<String> {
        let plain = !self.id.is_empty()
            && self
                .id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !plain {
            return Err(Error::InvalidCharacterId(self.id.clone()));
        }
        Ok(format!("{}.png", self.id))
    }

    /// Decodes the image, checking it really is a PNG.
    pub fn png(&self) -> Result<Vec<u8>> {
        let bytes = STANDARD.decode(self.image.trim())?;
        if !bytes.starts_with(&PNG_SIGNATURE) {
            return Err(Error::NotPng);
        }
        Ok(bytes)
    }

    /// Writes the PNG to `path`, creating any missing parent directories.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let bytes = self.png()?;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;
        debug!(id = %self.id, path = %path.display(), "saved card");
        Ok(())
    }
}
