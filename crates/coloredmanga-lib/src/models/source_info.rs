use serde::{Deserialize, Serialize};

/// How explicit the content served by a source is, used by the host catalog to filter sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentRating {
    Everyone,
    Mature,
    Adult,
}

/// A type represent source
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub description: String,
    pub website_base_url: String,
    pub version: String,
    pub icon: String,
    /// Language tag of the served content, e.g. `en`
    pub language: String,
    pub content_rating: ContentRating,
}
