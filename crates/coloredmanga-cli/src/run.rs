use coloredmanga_lib::prelude::Extension;
use serde::Serialize;

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

pub async fn detail<E: Extension>(extension: &E, manga_id: &str) -> anyhow::Result<()> {
    let manga = extension.get_manga_details(manga_id).await?;
    print(&manga)
}

pub async fn chapters<E: Extension>(extension: &E, manga_id: &str) -> anyhow::Result<()> {
    let chapters = extension.get_chapters(manga_id).await?;
    print(&chapters)
}

pub async fn pages<E: Extension>(
    extension: &E,
    manga_id: &str,
    chapter_id: &str,
) -> anyhow::Result<()> {
    let details = extension.get_chapter_details(manga_id, chapter_id).await?;
    print(&details)
}

pub async fn search<E: Extension>(extension: &E, query: Option<&str>) -> anyhow::Result<()> {
    let tiles = extension.search_manga(query).await?;
    print(&tiles)
}

/// Walks search, detail, chapters and the pages of the newest chapter,
/// the same path a reader takes.
pub async fn smoke<E: Extension>(extension: &E, query: &str) -> anyhow::Result<()> {
    let tiles = extension.search_manga(Some(query)).await?;
    let tile = tiles
        .first()
        .ok_or_else(|| anyhow::anyhow!("no result for {:?}", query))?;
    info!("search {:?}: {} results", query, tiles.len());

    let manga = extension.get_manga_details(&tile.id).await?;
    info!("detail {}: {:?} {:?}", manga.id, manga.titles, manga.status);

    let chapters = extension.get_chapters(&manga.id).await?;
    let chapter = chapters
        .first()
        .ok_or_else(|| anyhow::anyhow!("{} has no chapter", manga.id))?;
    info!("chapters {}: {}", manga.id, chapters.len());

    let details = extension.get_chapter_details(&manga.id, &chapter.id).await?;
    info!("pages {}/{}: {}", manga.id, chapter.id, details.pages.len());

    print(&details)
}
