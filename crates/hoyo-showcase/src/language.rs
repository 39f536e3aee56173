//! Language codes accepted on the command line, and their Enka.Network equivalents

use strum::{AsRefStr, Display, EnumString, VariantNames};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display, AsRefStr, VariantNames)]
pub enum Language {
    #[strum(serialize = "en")]
    English,
    #[default]
    #[strum(to_string = "cht", serialize = "zh-TW")]
    TraditionalChinese,
    #[strum(to_string = "chs", serialize = "zh-CN")]
    SimplifiedChinese,
    #[strum(serialize = "ja")]
    Japanese,
    #[strum(serialize = "ko")]
    Korean,
}

impl Language {
    /// Looks up a language code, falling back to Traditional Chinese for anything unrecognised.
    pub fn from_code(code: &str) -> Language {
        code.parse().unwrap_or_default()
    }

    /// Key of this language in the Enka.Network `locs.json` store.
    pub fn locs_key(&self) -> &'static str {
        use Language::*;
        match self {
            English => "en",
            TraditionalChinese => "zh-tw",
            SimplifiedChinese => "zh-cn",
            Japanese => "ja",
            Korean => "ko",
        }
    }
}
