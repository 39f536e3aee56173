pub mod language;
pub mod profile;
pub mod showcase;

pub mod importer {
    pub mod card_renderer;
    pub mod enka_network;
}

pub mod error;
pub use error::{Error, Result};
