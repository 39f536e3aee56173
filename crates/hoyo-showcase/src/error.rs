//! Error and failure handing types

use thiserror::Error;

use base64::DecodeError as Base64Error;
use reqwest::header::InvalidHeaderValue;
use reqwest::Error as ReqwestError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use url::ParseError;

/// A `Result` alias where the `Err` case is `hoyo-showcase::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// The Errors that may occur in the hoyo-showcase crate APIs.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid UID {0}")]
    InvalidUid(String),
    #[error("Player with UID {0} does not exist")]
    PlayerDoesNotExist(String),
    #[error("Game is under maintenance, please try again later")]
    GameMaintenance,
    #[error("Rate limited by the showcase service, please try again later")]
    RateLimited,
    #[error("Showcase service unavailable (HTTP {0})")]
    UpstreamUnavailable(u16),

    #[error("Character {0} not found in showcase")]
    CharacterNotFound(String),
    #[error("No card generated for character {0}")]
    NoCardGenerated(String),
    #[error("No characters found")]
    NoCharacters,
    #[error("Invalid character id {0:?}")]
    InvalidCharacterId(String),
    #[error("Card image is not a PNG")]
    NotPng,

    // Passthroughs from other libraries
    #[error(transparent)]
    ParseError(#[from] ParseError),
    #[error(transparent)]
    InvalidHeaderValue(#[from] InvalidHeaderValue),
    #[error(transparent)]
    ReqwestError(#[from] ReqwestError),
    #[error(transparent)]
    SerdeJsonError(#[from] SerdeJsonError),
    #[error(transparent)]
    Base64Error(#[from] Base64Error),
    #[error(transparent)]
    IoError(#[from] IoError),
}
