//! Module for importer for https://enka.network/api/zzz/uid/{uid}
//!
//! Everything below the top level is optional: the payload shape varies with
//! upstream version and with what the player has chosen to show, so unknown
//! fields are ignored and missing ones decode as `None`.

use serde::{Deserialize, Deserializer};
use serde_json::{Result, Value};
use std::io::Read;
use tracing::debug;

/// Parses a showcase response from the provided JSON reader.
/// Fails if not given a JSON object.
pub(crate) fn read_showcase(showcase_reader: impl Read) -> Result<ShowcaseResponse> {
    let result: ShowcaseResponse = serde_json::from_reader(showcase_reader)?;
    Ok(result)
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ShowcaseResponse {
    #[serde(rename = "PlayerInfo")]
    pub player_info: Option<PlayerInfo>,
    pub ttl: Option<u32>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerInfo {
    pub social_detail: Option<SocialDetail>,
    pub showcase_detail: Option<ShowcaseDetail>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct SocialDetail {
    pub profile_detail: Option<ProfileDetail>,
    /// The player's signature
    pub desc: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ProfileDetail {
    pub nickname: Option<String>,
    pub level: Option<u32>,
    /// The agent portrait shown on the profile card
    pub avatar_id: Option<u32>,
    /// Key into pfps.json
    pub profile_id: Option<u32>,
    pub uid: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ShowcaseDetail {
    #[serde(default, deserialize_with = "avatar_slots")]
    pub avatar_list: Vec<AvatarSlot>,
}

/// One `AvatarList` entry, decoded on its own so a bad entry doesn't cost the rest.
pub type AvatarSlot = std::result::Result<ShowcaseAvatar, MalformedAvatar>;

/// An `AvatarList` entry that didn't fit `ShowcaseAvatar`.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedAvatar {
    /// `Id`, if that much was readable
    pub id: Option<u32>,
    pub error: String,
}

fn avatar_slots<'de, D>(deserializer: D) -> std::result::Result<Vec<AvatarSlot>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries.iter().map(avatar_slot).collect())
}

fn avatar_slot(entry: &Value) -> AvatarSlot {
    ShowcaseAvatar::deserialize(entry).map_err(|error| {
        let id = entry
            .get("Id")
            .and_then(Value::as_u64)
            .and_then(|id| u32::try_from(id).ok());
        debug!(?id, %error, "malformed showcase avatar");
        MalformedAvatar {
            id,
            error: error.to_string(),
        }
    })
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ShowcaseAvatar {
    pub id: Option<u32>,
    pub level: Option<u32>,
    /// Mindscape Cinema rank
    pub talent_level: Option<u8>,
    pub promotion_level: Option<u8>,
    pub weapon: Option<ShowcaseWeapon>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ShowcaseWeapon {
    pub id: Option<u32>,
    pub level: Option<u32>,
    pub upgrade_level: Option<u8>,
    pub break_level: Option<u8>,
    // Seen under this name in older payloads
    pub refinement: Option<u8>,
}
