//! Module for importer for the character-card rendering service
//!
//! The renderer is an external HTTP service: given a UID, a language and a
//! template style, it returns one rendered card per showcase character.

mod api_client;
pub use api_client::*;

mod cards;
pub use cards::*;
