//! Media catalog models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use super::MediaId;

/// Kind of recommendable item, stored as the `media_type` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "media_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Film,
    Anime,
    Book,
    Game,
    Series,
}

impl MediaType {
    pub const ALL: [MediaType; 5] = [
        MediaType::Film,
        MediaType::Anime,
        MediaType::Book,
        MediaType::Game,
        MediaType::Series,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Film => "film",
            MediaType::Anime => "anime",
            MediaType::Book => "book",
            MediaType::Game => "game",
            MediaType::Series => "series",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        MediaType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| {
                format!("unknown media type '{s}': expected one of film, anime, book, game, series")
            })
    }
}

/// Media item model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct MediaItem {
    pub media_id: MediaId,
    #[serde(rename = "type")]
    #[sqlx(rename = "item_type")]
    pub media_type: MediaType,
    pub name: String,
    pub year: i32,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Query parameters for media search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaQuery {
    /// Filter by media type
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
}
