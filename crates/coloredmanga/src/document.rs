//! Document query interface the page parsers are written against.
//!
//! Parsers only need "parse markup", "select by CSS selector", "text" and
//! "attribute", so they stay independent of the HTML library. [`HtmlMarkup`]
//! implements the interface on top of `scraper`.

use scraper::{ElementRef, Html, Selector};

/// An element of a parsed document, borrowed for `'a`.
pub trait Node<'a>: Copy {
    /// Descendants matching `selector`, in document order.
    fn select(&self, selector: &str) -> Vec<Self>;

    /// Text of the node and all of its descendants.
    fn text(&self) -> String;

    fn attr(&self, name: &str) -> Option<&'a str>;

    fn has_class(&self, class: &str) -> bool;

    fn first(&self, selector: &str) -> Option<Self> {
        self.select(selector).into_iter().next()
    }

    /// Text of every match of `selector` joined together.
    fn select_text(&self, selector: &str) -> String {
        self.select(selector).iter().map(|node| node.text()).collect()
    }

    /// Attribute `name` of the first match of `selector`.
    fn first_attr(&self, selector: &str, name: &str) -> Option<&'a str> {
        self.first(selector).and_then(|node| node.attr(name))
    }
}

pub trait Document {
    type Node<'a>: Node<'a>
    where
        Self: 'a;

    fn root(&self) -> Self::Node<'_>;
}

pub trait Markup: Send + Sync {
    type Document: Document;

    fn parse(&self, html: &str) -> Self::Document;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlMarkup;

impl Markup for HtmlMarkup {
    type Document = Html;

    fn parse(&self, html: &str) -> Html {
        Html::parse_document(html)
    }
}

impl Document for Html {
    type Node<'a>
        = ElementRef<'a>
    where
        Self: 'a;

    fn root(&self) -> ElementRef<'_> {
        self.root_element()
    }
}

impl<'a> Node<'a> for ElementRef<'a> {
    fn select(&self, selector: &str) -> Vec<Self> {
        match Selector::parse(selector) {
            Ok(selector) => ElementRef::select(self, &selector).collect(),
            Err(err) => {
                warn!("invalid selector {:?}: {:?}", selector, err);
                vec![]
            }
        }
    }

    fn text(&self) -> String {
        ElementRef::text(self).collect()
    }

    fn attr(&self, name: &str) -> Option<&'a str> {
        self.value().attr(name)
    }

    fn has_class(&self, class: &str) -> bool {
        self.value().classes().any(|c| c == class)
    }
}
