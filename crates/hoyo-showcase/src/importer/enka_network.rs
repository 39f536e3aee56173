//! Module for importers for https://enka.network/ Zenless Zone Zero resources

mod api_client;
pub use api_client::*;

mod zzz_showcase;
pub use zzz_showcase::*;

mod zzz_assets;
pub use zzz_assets::*;
