use async_trait::async_trait;

use crate::models::{Chapter, ChapterDetails, Manga, MangaTile, SourceInfo};
use anyhow::Result;

#[async_trait]
pub trait Extension: Send + Sync {
    fn get_source_info(&self) -> SourceInfo;

    /// Public URL of a title, used by the host when sharing
    fn get_manga_url(&self, manga_id: &str) -> String;

    async fn get_manga_details(&self, manga_id: &str) -> Result<Manga>;

    async fn get_chapters(&self, manga_id: &str) -> Result<Vec<Chapter>>;

    async fn get_chapter_details(&self, manga_id: &str, chapter_id: &str)
    -> Result<ChapterDetails>;

    async fn search_manga(&self, query: Option<&str>) -> Result<Vec<MangaTile>>;
}
