use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use coloredmanga_lib::prelude::*;
use coloredmanga_util::http::{Fetch, HttpClient, Request};
use url::Url;

use crate::config::Config;
use crate::document::{Document, HtmlMarkup, Markup};
use crate::error::SourceError;
use crate::parser;

pub const ID: i64 = 1;
pub const NAME: &str = "ColoredManga";
pub const VERSION: &str = "0.1.0";

pub fn source_info(config: &Config) -> SourceInfo {
    SourceInfo {
        id: ID,
        name: NAME.to_string(),
        author: "Bopol".to_string(),
        description: "Extension that pulls manga from ColoredManga.".to_string(),
        website_base_url: config.base_url().to_string(),
        version: VERSION.to_string(),
        icon: "icon.png".to_string(),
        language: "en".to_string(),
        content_rating: ContentRating::Everyone,
    }
}

/// Source for coloredmanga.com.
///
/// Every operation fetches exactly one page through `F` and parses it with
/// `M`. Request budgeting is left to the fetcher.
pub struct ColoredManga<F = HttpClient, M = HtmlMarkup> {
    config: Config,
    fetch: F,
    markup: M,
}

impl ColoredManga {
    pub fn new(config: Config) -> Result<Self, SourceError> {
        let fetch = HttpClient::new(&config.user_agent, config.requests_per_second)?;

        Ok(Self::with_parts(config, fetch, HtmlMarkup))
    }
}

impl<F, M> ColoredManga<F, M>
where
    F: Fetch,
    M: Markup,
{
    pub fn with_parts(config: Config, fetch: F, markup: M) -> Self {
        Self {
            config,
            fetch,
            markup,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn manga_url(&self, manga_id: &str) -> String {
        format!("{}/manga/{}", self.config.base_url(), manga_id)
    }

    pub fn chapter_url(&self, manga_id: &str, chapter_id: &str) -> String {
        format!("{}/manga/{}/{}", self.config.base_url(), manga_id, chapter_id)
    }

    pub fn search_url(&self, query: &str) -> Result<String, SourceError> {
        let url = Url::parse_with_params(
            self.config.base_url(),
            &[("s", query), ("post_type", "wp-manga")],
        )?;

        Ok(url.to_string())
    }

    async fn get_html(&self, url: &str) -> Result<String, SourceError> {
        let res = self.fetch.fetch(Request::get(url)).await?;
        if !res.is_success() {
            warn!("{} responded with status {}", url, res.status);
        }

        Ok(res.body)
    }
}

#[async_trait]
impl<F, M> Extension for ColoredManga<F, M>
where
    F: Fetch,
    M: Markup,
{
    fn get_source_info(&self) -> SourceInfo {
        source_info(&self.config)
    }

    fn get_manga_url(&self, manga_id: &str) -> String {
        self.manga_url(manga_id)
    }

    async fn get_manga_details(&self, manga_id: &str) -> Result<Manga> {
        let html = self.get_html(&self.manga_url(manga_id)).await?;
        let manga = parser::parse_manga_details(self.markup.parse(&html).root(), manga_id);

        Ok(manga)
    }

    async fn get_chapters(&self, manga_id: &str) -> Result<Vec<Chapter>> {
        let html = self.get_html(&self.manga_url(manga_id)).await?;
        let chapters = parser::parse_chapters(
            self.markup.parse(&html).root(),
            manga_id,
            self.config.chapter_path_offset,
            Utc::now(),
        );
        info!("found {} chapters for {}", chapters.len(), manga_id);

        Ok(chapters)
    }

    async fn get_chapter_details(
        &self,
        manga_id: &str,
        chapter_id: &str,
    ) -> Result<ChapterDetails> {
        let html = self
            .get_html(&self.chapter_url(manga_id, chapter_id))
            .await?;
        let details =
            parser::parse_chapter_details(self.markup.parse(&html).root(), manga_id, chapter_id);
        debug!("{} pages in {}/{}", details.pages.len(), manga_id, chapter_id);

        Ok(details)
    }

    async fn search_manga(&self, query: Option<&str>) -> Result<Vec<MangaTile>> {
        let url = self.search_url(query.unwrap_or_default())?;
        let html = self.get_html(&url).await?;
        let tiles = parser::parse_search_results(self.markup.parse(&html).root());

        Ok(tiles)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use coloredmanga_util::http::{Headers, HttpError, Response};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned pages and remembers every requested url.
    #[derive(Default)]
    struct StaticFetch {
        pages: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl StaticFetch {
        fn page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetch for StaticFetch {
        async fn fetch(&self, request: Request) -> Result<Response, HttpError> {
            self.requests.lock().unwrap().push(request.url.clone());

            let (status, body) = match self.pages.get(&request.url) {
                Some(body) => (200, body.clone()),
                None => (404, "<html><body>Page not found</body></html>".to_string()),
            };

            Ok(Response {
                headers: Headers::new(),
                body,
                status,
            })
        }
    }

    struct BrokenFetch;

    #[async_trait]
    impl Fetch for BrokenFetch {
        async fn fetch(&self, request: Request) -> Result<Response, HttpError> {
            Err(HttpError::InvalidMethod(request.method))
        }
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.base_url = "https://coloredmanga.com/".to_string();
        config
    }

    const MANGA_PAGE: &str = r#"
    <div class="site-content">
      <div class="profile-manga summary-layout-1" style="background-image:url(https://coloredmanga.com/banner.jpg)"></div>
      <div class="post-title"><h1>Berserk</h1></div>
      <div class="tab-summary">
        <div class="summary_image"><img src="https://coloredmanga.com/berserk.jpg"></div>
        <div class="summary_content">
          <span id="averagerate">4.9</span>
          <div class="post-status">
            <div class="post-content_item"><div class="summary-heading">Status</div><div class="summary-content">OnGoing</div></div>
          </div>
        </div>
      </div>
      <div class="summary__content"><p>Guts.</p></div>
      <div class="page-content-listing">
        <ul class="version-chap no-volumn">
          <li class="wp-manga-chapter"><a href="https://coloredmanga.com/manga/berserk/chapter-2/">Chapter 2</a></li>
          <li class="wp-manga-chapter"><a href="https://coloredmanga.com/manga/berserk/chapter-1/">Chapter 1</a></li>
        </ul>
      </div>
    </div>
    "#;

    #[tokio::test]
    async fn test_get_manga_details() {
        let fetch = StaticFetch::default().page("https://coloredmanga.com/manga/berserk", MANGA_PAGE);
        let source = ColoredManga::with_parts(config(), fetch, HtmlMarkup);

        let manga = source.get_manga_details("berserk").await.unwrap();

        assert_eq!(manga.id, "berserk");
        assert_eq!(manga.titles, vec!["Berserk"]);
        assert_eq!(manga.image, "https://coloredmanga.com/berserk.jpg");
        assert_eq!(manga.desc, "Guts.");
        assert_eq!(manga.status, MangaStatus::Ongoing);
        assert_eq!(manga.rating, 4.9);
        assert_eq!(manga.covers, vec!["https://coloredmanga.com/banner.jpg"]);
        assert_eq!(
            source.fetch.requests(),
            vec!["https://coloredmanga.com/manga/berserk"]
        );
    }

    #[tokio::test]
    async fn test_chapter_ids_resolve_to_chapter_urls() {
        let fetch = StaticFetch::default()
            .page("https://coloredmanga.com/manga/berserk", MANGA_PAGE)
            .page(
                "https://coloredmanga.com/manga/berserk/chapter-2",
                r#"<div class="reading-content"><div><img src="https://cdn.coloredmanga.com/2-1.jpg"></div><div><img></div></div>"#,
            );
        let source = ColoredManga::with_parts(config(), fetch, HtmlMarkup);

        let chapters = source.get_chapters("berserk").await.unwrap();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].id, "chapter-2");
        assert_eq!(chapters[0].chap_num, 2.0);
        assert_eq!(chapters[1].id, "chapter-1");

        let details = source
            .get_chapter_details("berserk", &chapters[0].id)
            .await
            .unwrap();
        assert_eq!(
            details,
            ChapterDetails {
                id: "chapter-2".to_string(),
                manga_id: "berserk".to_string(),
                pages: vec![
                    "https://cdn.coloredmanga.com/2-1.jpg".to_string(),
                    "".to_string()
                ],
                long_strip: false,
            }
        );
        assert_eq!(
            source.fetch.requests(),
            vec![
                "https://coloredmanga.com/manga/berserk",
                "https://coloredmanga.com/manga/berserk/chapter-2",
            ]
        );
    }

    #[tokio::test]
    async fn test_search_manga() {
        let search_page = r#"
        <div class="c-tabs-item__content">
          <div class="tab-thumb"><img src="https://coloredmanga.com/berserk-thumb.jpg"></div>
          <div class="post-title"><a href="https://coloredmanga.com/manga/berserk/">Berserk</a></div>
        </div>
        "#;
        let fetch = StaticFetch::default().page(
            "https://coloredmanga.com/?s=berserk+deluxe&post_type=wp-manga",
            search_page,
        );
        let source = ColoredManga::with_parts(config(), fetch, HtmlMarkup);

        let tiles = source.search_manga(Some("berserk deluxe")).await.unwrap();

        assert_eq!(
            tiles,
            vec![MangaTile {
                id: "berserk".to_string(),
                image: "https://coloredmanga.com/berserk-thumb.jpg".to_string(),
                title: "Berserk".to_string(),
            }]
        );
    }

    #[test]
    fn test_urls() {
        let source = ColoredManga::with_parts(config(), StaticFetch::default(), HtmlMarkup);

        assert_eq!(
            source.get_manga_url("berserk"),
            "https://coloredmanga.com/manga/berserk"
        );
        assert_eq!(
            source.chapter_url("berserk", "volume-1/chapter-1"),
            "https://coloredmanga.com/manga/berserk/volume-1/chapter-1"
        );
        assert_eq!(
            source.search_url("").unwrap(),
            "https://coloredmanga.com/?s=&post_type=wp-manga"
        );
    }

    #[tokio::test]
    async fn test_error_status_degrades() {
        let source = ColoredManga::with_parts(config(), StaticFetch::default(), HtmlMarkup);

        let manga = source.get_manga_details("missing").await.unwrap();
        assert_eq!(manga.titles, vec![""]);
        assert_eq!(manga.status, MangaStatus::Unknown);
        assert!(manga.rating.is_nan());
        assert_eq!(manga.covers, vec![""]);

        assert!(source.get_chapters("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_is_propagated() {
        let source = ColoredManga::with_parts(config(), BrokenFetch, HtmlMarkup);

        let err = source.get_manga_details("berserk").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SourceError>(),
            Some(SourceError::Http(HttpError::InvalidMethod(_)))
        ));

        assert!(source.search_manga(None).await.is_err());
    }

    #[test]
    fn test_source_info() {
        let source = ColoredManga::with_parts(config(), StaticFetch::default(), HtmlMarkup);
        let info = source.get_source_info();

        assert_eq!(info.name, "ColoredManga");
        assert_eq!(info.website_base_url, "https://coloredmanga.com");
        assert_eq!(info.language, "en");
        assert_eq!(info.content_rating, ContentRating::Everyone);
    }
}
