//! Module for importer for the Enka.Network Zenless Zone Zero asset store:
//! https://github.com/EnkaNetwork/API-docs/tree/master/store/zzz
//!
//! The showcase payload only carries ids; names, rarities and images come from here.

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{Result, Value};
use std::{collections::HashMap, io::Read};
use tracing::debug;

/// avatars.json, keyed by agent id
pub type AvatarStore = HashMap<String, AvatarAsset>;
/// weapons.json, keyed by W-Engine id
pub type WeaponStore = HashMap<String, WeaponAsset>;
/// locs.json, keyed by language then by text key
pub type LocStore = HashMap<String, HashMap<String, String>>;
/// pfps.json, keyed by ProfileId
pub type PfpStore = HashMap<String, PfpAsset>;

/// Reads a JSON object of entries. The object itself must parse, but an entry
/// that doesn't fit `T` is dropped, so it looks the same as an unknown id.
fn read_store<T: DeserializeOwned>(reader: impl Read, store: &str) -> Result<HashMap<String, T>> {
    let entries: HashMap<String, Value> = serde_json::from_reader(reader)?;
    Ok(entries
        .into_iter()
        .filter_map(|(id, entry)| match T::deserialize(entry) {
            Ok(asset) => Some((id, asset)),
            Err(error) => {
                debug!(store, %id, %error, "dropping malformed asset entry");
                None
            }
        })
        .collect())
}

pub(crate) fn read_avatars(reader: impl Read) -> Result<AvatarStore> {
    read_store(reader, "avatars")
}

pub(crate) fn read_weapons(reader: impl Read) -> Result<WeaponStore> {
    read_store(reader, "weapons")
}

pub(crate) fn read_locs(reader: impl Read) -> Result<LocStore> {
    read_store(reader, "locs")
}

pub(crate) fn read_pfps(reader: impl Read) -> Result<PfpStore> {
    read_store(reader, "pfps")
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct AvatarAsset {
    /// Text key into locs.json
    pub name: Option<String>,
    pub rarity: Option<u8>,
    pub profession_type: Option<String>,
    #[serde(default)]
    pub element_types: Vec<String>,
    /// Path relative to https://enka.network
    pub image: Option<String>,
    /// Property id to base value
    #[serde(default)]
    pub base_props: HashMap<String, f64>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WeaponAsset {
    /// Text key into locs.json
    pub item_name: Option<String>,
    pub rarity: Option<u8>,
    pub profession_type: Option<String>,
    pub image_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PfpAsset {
    pub icon: Option<String>,
}

/// The four asset tables, as loaded together for decoding one showcase.
#[derive(Debug, Clone, Default)]
pub struct Assets {
    pub avatars: AvatarStore,
    pub weapons: WeaponStore,
    pub locs: LocStore,
    pub pfps: PfpStore,
}

impl Assets {
    /// Looks up a text key in the given locs.json language table.
    pub fn localize(&self, locs_key: &str, text_key: &str) -> Option<&str> {
        self.locs
            .get(locs_key)
            .and_then(|table| table.get(text_key))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests;
