//! Flattening a decoded showcase into the JSON shape handed to callers

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;

use crate::showcase::{Agent, Player, Showcase, WEngine};

const UNKNOWN_ID: &str = "unknown";
const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub uid: String,
    pub nickname: String,
    pub level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Letter grades where the upstream has them, numbers otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rarity {
    Named(String),
    Number(u8),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSummary {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub rank: u8,
    pub rarity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSummary {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub rank: u8,
    pub rarity: Rarity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w_engine: Option<WeaponSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// What's left of an agent we couldn't summarise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedCharacter {
    pub id: String,
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CharacterEntry {
    Summary(CharacterSummary),
    Failed(FailedCharacter),
}

impl CharacterEntry {
    pub fn id(&self) -> &str {
        match self {
            CharacterEntry::Summary(summary) => &summary.id,
            CharacterEntry::Failed(failed) => &failed.id,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CharacterEntry::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Profile {
    player: PlayerProfile,
    characters: Vec<CharacterEntry>,
    ttl: u32,
}

/// Why a single agent could not be summarised
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("malformed agent data: {0}")]
    Malformed(String),
    #[error("agent has no {0}")]
    MissingField(&'static str),
    #[error("agent has no rarity or rarity_num")]
    MissingRarity,
    #[error("w_engine has no {0}")]
    MissingWeaponField(&'static str),
    #[error("stat {0} has non-finite value {1}")]
    NonFiniteStat(String, f64),
}

/// Builds the caller-facing profile. Never fails: agents that can't be
/// summarised are replaced in place by a `FailedCharacter`.
pub fn normalize(uid: &str, showcase: &Showcase) -> Profile {
    let characters = showcase
        .agents
        .iter()
        .map(|agent| match summarize_agent(agent) {
            Ok(summary) => CharacterEntry::Summary(summary),
            Err(error) => {
                warn!(id = ?agent.id, %error, "could not summarise agent");
                CharacterEntry::Failed(failed_agent(agent, &error))
            }
        })
        .collect();

    Profile {
        player: player_profile(uid, showcase.player.as_ref()),
        characters,
        ttl: showcase.ttl.unwrap_or(0),
    }
}

fn player_profile(uid: &str, player: Option<&Player>) -> PlayerProfile {
    let non_empty = |value: Option<&String>| value.filter(|s| !s.is_empty()).cloned();
    PlayerProfile {
        uid: uid.to_string(),
        nickname: player
            .and_then(|player| player.nickname.clone())
            .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        level: player.and_then(|player| player.level).unwrap_or(0),
        signature: non_empty(player.and_then(|player| player.signature.as_ref())),
        avatar_url: non_empty(player.and_then(|player| player.avatar.as_ref())),
    }
}

pub fn summarize_agent(agent: &Agent) -> Result<CharacterSummary, NormalizeError> {
    if let Some(error) = &agent.decode_error {
        return Err(NormalizeError::Malformed(error.clone()));
    }
    let id = agent.id.ok_or(NormalizeError::MissingField("id"))?;
    let name = agent
        .name
        .clone()
        .ok_or(NormalizeError::MissingField("name"))?;
    let level = agent.level.ok_or(NormalizeError::MissingField("level"))?;

    let rarity = match (&agent.rarity, agent.rarity_num) {
        (Some(named), _) => Rarity::Named(named.clone()),
        (None, Some(number)) => Rarity::Number(number),
        (None, None) => return Err(NormalizeError::MissingRarity),
    };

    let stats = if agent.stats.is_empty() {
        None
    } else {
        let mut stats = BTreeMap::new();
        for stat in &agent.stats {
            let label = stat.stat_type.label();
            // serde_json would quietly write these as null
            if !stat.value.is_finite() {
                return Err(NormalizeError::NonFiniteStat(label, stat.value));
            }
            stats.insert(label, stat.value);
        }
        Some(stats)
    };

    Ok(CharacterSummary {
        id: id.to_string(),
        name,
        level,
        rank: agent.mindscape.unwrap_or(0),
        rarity,
        element: agent.elements.first().map(|element| element.label()),
        specialty: agent.specialty.as_ref().map(|specialty| specialty.label()),
        stats,
        w_engine: agent.w_engine.as_ref().map(summarize_w_engine).transpose()?,
        icon: agent.icon.clone().filter(|icon| !icon.is_empty()),
    })
}

fn summarize_w_engine(engine: &WEngine) -> Result<WeaponSummary, NormalizeError> {
    Ok(WeaponSummary {
        id: engine
            .id
            .ok_or(NormalizeError::MissingWeaponField("id"))?
            .to_string(),
        name: engine
            .name
            .clone()
            .ok_or(NormalizeError::MissingWeaponField("name"))?,
        level: engine
            .level
            .ok_or(NormalizeError::MissingWeaponField("level"))?,
        rank: engine.rank.or(engine.refinement).unwrap_or(1),
        rarity: engine.rarity.unwrap_or(4),
    })
}

fn failed_agent(agent: &Agent, error: &NormalizeError) -> FailedCharacter {
    FailedCharacter {
        id: agent
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| UNKNOWN_ID.to_string()),
        name: agent
            .name
            .clone()
            .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        error: error.to_string(),
    }
}
