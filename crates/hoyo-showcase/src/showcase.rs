//! A Zenless Zone Zero showcase, decoded from the Enka.Network payload and asset store
//!
//! Every member the upstream may leave out is an `Option` here. Consumers ask
//! "is this value present" rather than probing the raw payload.

use std::{io::Read, str::FromStr};
use strum::{AsRefStr, Display, EnumString, FromRepr, VariantNames};
use tracing::debug;

use crate::importer::enka_network::{
    self, ApiEndpoint, Assets, AvatarSlot, ClientBuilder, ShowcaseAvatar, ShowcaseResponse,
    ShowcaseWeapon,
};
use crate::language::Language;
use crate::{Error, Result};

/// Images in the asset store are relative to this
pub const ENKA_CDN_BASE: &str = "https://enka.network";

/// An upstream enumeration value: either one we know the symbolic name of,
/// or the raw value as the service sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbolic<K> {
    Known(K),
    Raw(String),
}

impl<K: std::fmt::Display> Symbolic<K> {
    /// The symbolic name if known, otherwise the raw string form.
    pub fn label(&self) -> String {
        match self {
            Symbolic::Known(kind) => kind.to_string(),
            Symbolic::Raw(raw) => raw.clone(),
        }
    }
}

impl<K: FromStr> From<&str> for Symbolic<K> {
    fn from(raw: &str) -> Self {
        raw.parse()
            .map(Symbolic::Known)
            .unwrap_or_else(|_| Symbolic::Raw(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, VariantNames)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ElementKind {
    #[strum(to_string = "PHYSICAL", serialize = "Physics")]
    Physical,
    Fire,
    Ice,
    #[strum(to_string = "ELECTRIC", serialize = "Elec")]
    Electric,
    Ether,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, VariantNames)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum SpecialtyKind {
    Attack,
    Stun,
    Anomaly,
    Support,
    Defense,
    Rupture,
}

/// Property ids used in avatars.json `BaseProps`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, FromRepr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum StatKind {
    HpBase = 11101,
    HpPercent = 11102,
    HpFlat = 11103,
    AtkBase = 12101,
    AtkPercent = 12102,
    AtkFlat = 12103,
    Impact = 12201,
    ImpactPercent = 12202,
    DefBase = 13101,
    DefPercent = 13102,
    DefFlat = 13103,
    CritRateBase = 20101,
    CritRateFlat = 20103,
    CritDmgBase = 21101,
    CritDmgFlat = 21103,
    PenRatioBase = 23101,
    PenRatioFlat = 23103,
    PenBase = 23201,
    PenFlat = 23203,
    EnergyRegenBase = 30501,
    EnergyRegenPercent = 30502,
    AnomalyProficiencyBase = 31201,
    AnomalyProficiencyFlat = 31203,
    AnomalyMasteryBase = 31401,
    AnomalyMasteryPercent = 31402,
    PhysicalDmgBonus = 31503,
    FireDmgBonus = 31603,
    IceDmgBonus = 31703,
    ElectricDmgBonus = 31803,
    EtherDmgBonus = 31903,
}

pub type Element = Symbolic<ElementKind>;
pub type Specialty = Symbolic<SpecialtyKind>;
pub type StatType = Symbolic<StatKind>;

impl StatType {
    /// Property ids we know map to a `StatKind`; anything else keeps the id string.
    pub fn from_prop_id(prop_id: &str) -> StatType {
        prop_id
            .parse::<u32>()
            .ok()
            .and_then(StatKind::from_repr)
            .map(Symbolic::Known)
            .unwrap_or_else(|| Symbolic::Raw(prop_id.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub stat_type: StatType,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
    pub nickname: Option<String>,
    pub level: Option<u32>,
    pub signature: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WEngine {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub level: Option<u32>,
    pub rank: Option<u8>,
    pub refinement: Option<u8>,
    pub rarity: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Agent {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub level: Option<u32>,
    /// Mindscape Cinema rank
    pub mindscape: Option<u8>,
    /// Letter rarity, "S" or "A"
    pub rarity: Option<String>,
    pub rarity_num: Option<u8>,
    pub elements: Vec<Element>,
    pub specialty: Option<Specialty>,
    /// Base values from the asset store's `BaseProps`, as stored there:
    /// level 1, before promotion, W-Engine or Drive Discs, with rates in
    /// basis points. Not the agent's in-game stats.
    pub stats: Vec<Stat>,
    pub w_engine: Option<WEngine>,
    pub icon: Option<String>,
    /// Set when the payload entry for this agent couldn't be read
    pub decode_error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Showcase {
    pub player: Option<Player>,
    pub agents: Vec<Agent>,
    pub ttl: Option<u32>,
}

/// Letter grade for an asset store rarity number.
pub fn rarity_letter(rarity_num: u8) -> Option<&'static str> {
    match rarity_num {
        4 => Some("S"),
        3 => Some("A"),
        2 => Some("B"),
        _ => None,
    }
}

fn cdn_url(path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!("{ENKA_CDN_BASE}{path}")
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

impl Showcase {
    /// Resolves the ids in a showcase payload against the asset store.
    /// Ids missing from the asset store leave the corresponding members as `None`.
    pub fn decode(raw: &ShowcaseResponse, assets: &Assets, language: Language) -> Showcase {
        let locs_key = language.locs_key();

        let player = raw
            .player_info
            .as_ref()
            .and_then(|info| info.social_detail.as_ref())
            .and_then(|social| {
                social.profile_detail.as_ref().map(|profile| Player {
                    nickname: profile.nickname.clone(),
                    level: profile.level,
                    signature: non_empty(&social.desc),
                    // pfps.json is keyed by ProfileId; older payloads only had AvatarId
                    avatar: profile
                        .profile_id
                        .and_then(|id| assets.pfps.get(&id.to_string()))
                        .or_else(|| {
                            profile
                                .avatar_id
                                .and_then(|id| assets.pfps.get(&id.to_string()))
                        })
                        .and_then(|pfp| pfp.icon.as_deref())
                        .map(cdn_url),
                })
            });

        let agents = raw
            .player_info
            .as_ref()
            .and_then(|info| info.showcase_detail.as_ref())
            .map(|showcase| {
                showcase
                    .avatar_list
                    .iter()
                    .map(|slot| decode_slot(slot, assets, locs_key))
                    .collect()
            })
            .unwrap_or_default();

        Showcase {
            player,
            agents,
            ttl: raw.ttl,
        }
    }
}

fn decode_slot(slot: &AvatarSlot, assets: &Assets, locs_key: &str) -> Agent {
    match slot {
        Ok(avatar) => decode_agent(avatar, assets, locs_key),
        Err(malformed) => {
            // Keep whatever the asset store knows, for the failure record
            let avatar = ShowcaseAvatar {
                id: malformed.id,
                ..Default::default()
            };
            Agent {
                decode_error: Some(malformed.error.clone()),
                ..decode_agent(&avatar, assets, locs_key)
            }
        }
    }
}

fn decode_agent(avatar: &ShowcaseAvatar, assets: &Assets, locs_key: &str) -> Agent {
    let asset = avatar
        .id
        .and_then(|id| assets.avatars.get(&id.to_string()));
    if asset.is_none() {
        debug!(id = ?avatar.id, "agent not in asset store");
    }

    let mut agent = Agent {
        id: avatar.id,
        level: avatar.level,
        mindscape: avatar.talent_level,
        w_engine: avatar
            .weapon
            .as_ref()
            .map(|weapon| decode_w_engine(weapon, assets, locs_key)),
        ..Default::default()
    };

    if let Some(asset) = asset {
        agent.name = asset
            .name
            .as_deref()
            .and_then(|key| assets.localize(locs_key, key))
            .map(str::to_string);
        agent.rarity_num = asset.rarity;
        agent.rarity = asset.rarity.and_then(rarity_letter).map(str::to_string);
        agent.elements = asset
            .element_types
            .iter()
            .map(|element| Element::from(element.as_str()))
            .collect();
        agent.specialty = asset
            .profession_type
            .as_deref()
            .map(Specialty::from);
        agent.stats = asset
            .base_props
            .iter()
            .map(|(prop_id, &value)| Stat {
                stat_type: StatType::from_prop_id(prop_id),
                value,
            })
            .collect();
        // HashMap order is arbitrary; keep the decoded list stable
        agent.stats.sort_by_key(|stat| stat.stat_type.label());
        agent.icon = asset.image.as_deref().map(cdn_url);
    }

    agent
}

fn decode_w_engine(weapon: &ShowcaseWeapon, assets: &Assets, locs_key: &str) -> WEngine {
    let asset = weapon
        .id
        .and_then(|id| assets.weapons.get(&id.to_string()));
    WEngine {
        id: weapon.id,
        name: asset
            .and_then(|asset| asset.item_name.as_deref())
            .and_then(|key| assets.localize(locs_key, key))
            .map(str::to_string),
        level: weapon.level,
        rank: weapon.upgrade_level,
        refinement: weapon.refinement,
        rarity: asset.and_then(|asset| asset.rarity),
    }
}

// Based on https://rust-lang.github.io/api-guidelines/type-safety.html#builders-enable-construction-of-complex-values-c-builder
pub struct ShowcaseBuilder {
    uid: Option<u64>,
    language: Language,
    showcase: Option<Box<dyn Read>>,
    avatars: Option<Box<dyn Read>>,
    weapons: Option<Box<dyn Read>>,
    locs: Option<Box<dyn Read>>,
    pfps: Option<Box<dyn Read>>,
    api_client_builder: Option<ClientBuilder>,
}

impl Default for ShowcaseBuilder {
    fn default() -> Self {
        Self::new().enka(ClientBuilder::default())
    }
}

impl ShowcaseBuilder {
    pub fn new() -> ShowcaseBuilder {
        ShowcaseBuilder {
            uid: None,
            language: Language::default(),
            showcase: None,
            avatars: None,
            weapons: None,
            locs: None,
            pfps: None,
            api_client_builder: None,
        }
    }

    /// Fetches anything not supplied by a reader from Enka.Network, then decodes.
    /// Without a client, missing pieces are treated as empty.
    pub async fn build(mut self) -> Result<Showcase> {
        if let Some(api_client_builder) = self.api_client_builder.take() {
            let client = api_client_builder.build()?;
            // Showcase first, so a bad UID fails before we pull the asset store
            if self.showcase.is_none() {
                let uid = self.uid.ok_or_else(|| Error::InvalidUid(String::new()))?;
                self.showcase = Some(client.fetch(&ApiEndpoint::ZzzShowcase(uid)).await?);
            }
            if self.avatars.is_none() {
                self.avatars = Some(client.fetch(&ApiEndpoint::ZzzAvatars).await?);
            }
            if self.weapons.is_none() {
                self.weapons = Some(client.fetch(&ApiEndpoint::ZzzWeapons).await?);
            }
            if self.locs.is_none() {
                self.locs = Some(client.fetch(&ApiEndpoint::ZzzLocs).await?);
            }
            if self.pfps.is_none() {
                self.pfps = Some(client.fetch(&ApiEndpoint::ZzzPfps).await?);
            }
        }

        let raw = match self.showcase {
            Some(reader) => enka_network::read_showcase(reader)?,
            None => ShowcaseResponse::default(),
        };
        let assets = Assets {
            avatars: match self.avatars {
                Some(reader) => enka_network::read_avatars(reader)?,
                None => Default::default(),
            },
            weapons: match self.weapons {
                Some(reader) => enka_network::read_weapons(reader)?,
                None => Default::default(),
            },
            locs: match self.locs {
                Some(reader) => enka_network::read_locs(reader)?,
                None => Default::default(),
            },
            pfps: match self.pfps {
                Some(reader) => enka_network::read_pfps(reader)?,
                None => Default::default(),
            },
        };

        Ok(Showcase::decode(&raw, &assets, self.language))
    }

    pub fn uid(mut self, uid: u64) -> ShowcaseBuilder {
        self.uid = Some(uid);
        self
    }

    pub fn language(mut self, language: Language) -> ShowcaseBuilder {
        self.language = language;
        self
    }

    pub fn showcase_from_reader<R>(mut self, reader: R) -> ShowcaseBuilder
    where
        R: Read + 'static,
    {
        self.showcase = Some(Box::new(reader));
        self
    }

    pub fn avatars_from_reader<R>(mut self, reader: R) -> ShowcaseBuilder
    where
        R: Read + 'static,
    {
        self.avatars = Some(Box::new(reader));
        self
    }

    pub fn weapons_from_reader<R>(mut self, reader: R) -> ShowcaseBuilder
    where
        R: Read + 'static,
    {
        self.weapons = Some(Box::new(reader));
        self
    }

    pub fn locs_from_reader<R>(mut self, reader: R) -> ShowcaseBuilder
    where
        R: Read + 'static,
    {
        self.locs = Some(Box::new(reader));
        self
    }

    pub fn pfps_from_reader<R>(mut self, reader: R) -> ShowcaseBuilder
    where
        R: Read + 'static,
    {
        self.pfps = Some(Box::new(reader));
        self
    }

    /// Fetch missing pieces with this client.
    pub fn enka(mut self, api_client_builder: ClientBuilder) -> ShowcaseBuilder {
        self.api_client_builder = Some(api_client_builder);
        self
    }

    pub fn offline(mut self) -> ShowcaseBuilder {
        self.api_client_builder = None;
        self
    }
}

#[cfg(test)]
mod tests;
