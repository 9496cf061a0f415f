use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MangaStatus {
    Ongoing,
    Completed,
    #[default]
    Unknown,
}

impl MangaStatus {
    /// Maps a status label as printed by the site, ignoring case.
    /// Anything that is not ongoing or completed is unknown.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "ONGOING" => MangaStatus::Ongoing,
            "COMPLETED" => MangaStatus::Completed,
            _ => MangaStatus::Unknown,
        }
    }
}

/// A type represent manga details, normalized across source
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manga {
    pub id: String,
    pub titles: Vec<String>,
    pub image: String,
    pub desc: String,
    pub status: MangaStatus,
    /// Average user rating, `NaN` when the site shows something that is not a number
    pub rating: f64,
    pub covers: Vec<String>,
    pub authors: Vec<String>,
    pub artists: Vec<String>,
    pub genres: Vec<String>,
}

/// A single entry of a search result page
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MangaTile {
    pub id: String,
    pub image: String,
    pub title: String,
}
