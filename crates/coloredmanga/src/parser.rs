//! Page parsers for the Madara markup served by the site.
//!
//! None of these fail: a missing element degrades to an empty string, an
//! unknown status, a `NaN` rating or a positional chapter number.

use chrono::{DateTime, Utc};
use coloredmanga_lib::prelude::*;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::date::parse_release_date;
use crate::document::Node;
use crate::numbering::{flat_chapter_number, number_or, volume_number};

static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)").unwrap()
});

fn trimmed_text<'a, N: Node<'a>>(node: Option<N>) -> String {
    node.map(|node| node.text().trim().to_string())
        .unwrap_or_default()
}

fn texts<'a, N: Node<'a>>(root: N, selector: &str) -> Vec<String> {
    root.select(selector)
        .iter()
        .map(|node| node.text().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Reads a rating the way `parseFloat` does: the longest numeric prefix,
/// `NaN` when there is none.
pub fn parse_rating(text: &str) -> f64 {
    FLOAT_PREFIX
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Url inside a `background-image:url(...)` declaration.
pub fn background_image_url(style: &str) -> String {
    let style = style.trim().replacen("background-image:url(", "", 1);
    style
        .split(')')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'')
        .to_string()
}

/// Chapter id from a chapter link: the trailing slash removed and the first
/// `offset` path segments dropped.
pub fn chapter_id_from_href(href: &str, offset: usize) -> String {
    let href = href.trim();
    let href = href.strip_suffix('/').unwrap_or(href);

    href.split('/').skip(offset).collect::<Vec<_>>().join("/")
}

/// Last path segment of a manga link.
pub fn slug_from_href(href: &str) -> String {
    let href = href.trim();
    let href = href.strip_suffix('/').unwrap_or(href);

    href.rsplit('/').next().unwrap_or(href).to_string()
}

pub fn parse_manga_details<'a, N: Node<'a>>(root: N, manga_id: &str) -> Manga {
    let title = trimmed_text(root.first(".post-title h1"));
    let image = root
        .first_attr(".tab-summary .summary_image img", "src")
        .unwrap_or_default()
        .trim()
        .to_string();
    let desc = root.select_text(".summary__content p").trim().to_string();

    let summary = root.select(".tab-summary .summary_content");

    let mut status = MangaStatus::Unknown;
    for item in summary
        .iter()
        .flat_map(|content| content.select(".post-status .post-content_item"))
    {
        let heading = item.select_text(".summary-heading");
        if heading.trim().eq_ignore_ascii_case("status") {
            status = MangaStatus::from_label(&item.select_text(".summary-content"));
        }
    }

    let average_rate: String = summary
        .iter()
        .map(|content| content.select_text("#averagerate"))
        .collect();
    let rating = parse_rating(average_rate.trim());

    // one banner slot, empty when the page has none
    let covers = vec![background_image_url(
        root.first_attr(".site-content .profile-manga.summary-layout-1", "style")
            .unwrap_or_default(),
    )];

    Manga {
        id: manga_id.to_string(),
        titles: vec![title],
        image,
        desc,
        status,
        rating,
        covers,
        authors: texts(root, ".author-content a"),
        artists: texts(root, ".artist-content a"),
        genres: texts(root, ".genres-content a"),
    }
}

/// Chapters of the manga page in document order.
///
/// A chapter list marked `no-volumn` is flat and falls back to the position
/// of a chapter for its number. Otherwise chapters are grouped per volume;
/// they carry the volume number and fall back to chapter 0.
pub fn parse_chapters<'a, N: Node<'a>>(
    root: N,
    manga_id: &str,
    chapter_path_offset: usize,
    now: DateTime<Utc>,
) -> Vec<Chapter> {
    let lists = root.select(".page-content-listing ul.version-chap");
    let chapter = |elem: N, fallback: f64, volume: Option<f64>| Chapter {
        volume,
        ..parse_chapter(elem, manga_id, fallback, chapter_path_offset, now)
    };

    if lists.iter().any(|list| list.has_class("no-volumn")) {
        let items: Vec<N> = lists
            .iter()
            .flat_map(|list| list.select("li.wp-manga-chapter"))
            .collect();
        let total = items.len();
        debug!("{} chapters without volume for {}", total, manga_id);

        items
            .into_iter()
            .enumerate()
            .map(|(index, elem)| chapter(elem, flat_chapter_number(index, total), None))
            .collect()
    } else {
        let volumes = root.select("li.parent.has-child");
        let total = volumes.len();
        debug!("{} volumes for {}", total, manga_id);

        let mut chapters = vec![];
        for (index, vol) in volumes.into_iter().enumerate() {
            let title = trimmed_text(vol.first("a"));
            let volume = number_or(&title, volume_number(index, total));

            for elem in vol.select("li.wp-manga-chapter") {
                chapters.push(chapter(elem, 0.0, Some(volume)));
            }
        }

        chapters
    }
}

fn parse_chapter<'a, N: Node<'a>>(
    elem: N,
    manga_id: &str,
    fallback: f64,
    chapter_path_offset: usize,
    now: DateTime<Utc>,
) -> Chapter {
    let link = elem.first("a");
    let name = trimmed_text(link);
    let href = link.and_then(|a| a.attr("href")).unwrap_or_default();

    let release_date = elem.select_text(".chapter-release-date");
    let time = parse_release_date(&release_date, now);
    if time.is_none() && !release_date.trim().is_empty() {
        debug!("unrecognized release date {:?} of {}", release_date.trim(), name);
    }

    Chapter {
        id: chapter_id_from_href(href, chapter_path_offset),
        manga_id: manga_id.to_string(),
        chap_num: number_or(&name, fallback),
        name,
        lang_code: LanguageCode::Unknown,
        volume: None,
        time,
    }
}

/// Page images of a chapter. A page without an image keeps its slot as an
/// empty string.
pub fn parse_chapter_details<'a, N: Node<'a>>(
    root: N,
    manga_id: &str,
    chapter_id: &str,
) -> ChapterDetails {
    let pages = root
        .select(".reading-content > div")
        .iter()
        .map(|page| {
            page.first_attr("img", "src")
                .unwrap_or_default()
                .trim()
                .to_string()
        })
        .collect();

    ChapterDetails {
        id: chapter_id.to_string(),
        manga_id: manga_id.to_string(),
        pages,
        long_strip: false,
    }
}

pub fn parse_search_results<'a, N: Node<'a>>(root: N) -> Vec<MangaTile> {
    root.select(".c-tabs-item__content")
        .iter()
        .map(|card| {
            let link = card.first(".post-title a");

            MangaTile {
                id: slug_from_href(link.and_then(|a| a.attr("href")).unwrap_or_default()),
                image: card
                    .first_attr(".tab-thumb img", "src")
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                title: trimmed_text(link),
            }
        })
        .collect()
}
