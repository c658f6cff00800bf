//! Parsed page wrapper
//!
//! Read-only queries over a `scraper::Html` tree. Parsing never fails:
//! malformed markup yields a best-effort, possibly-empty tree, and every
//! query returns `None` on a miss.

use scraper::{Html, Selector};

use crate::schema::StructuredData;

/// A parsed page, constructed once per URL and discarded after one
/// reference is produced
pub struct Page {
    doc: Html,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        Self {
            doc: Html::parse_document(html),
        }
    }

    /// Text of the first `<title>` element
    pub fn title(&self) -> Option<String> {
        select_text(&self.doc, "title")
    }

    /// First `<meta>` content for any candidate name, in candidate
    /// priority order. Each candidate is matched against the `name`
    /// attribute first, then `property`. The first matching element with
    /// a `content` attribute ends the scan, even when the value is empty.
    pub fn meta_content(&self, candidates: &[&str]) -> Option<String> {
        for name in candidates {
            let by_name = format!("meta[name='{}']", name);
            let by_property = format!("meta[property='{}']", name);
            let el =
                select_first(&self.doc, &by_name).or_else(|| select_first(&self.doc, &by_property));
            if let Some(el) = el {
                if let Some(value) = el.value().attr("content") {
                    return Some(value.to_string());
                }
            }
        }
        None
    }

    /// `content` attribute of the first `<link>` element that carries a
    /// non-empty one
    pub fn link_content(&self) -> Option<String> {
        let selector = Selector::parse("link").ok()?;
        self.doc
            .select(&selector)
            .filter_map(|el| el.value().attr("content"))
            .map(|s| s.to_string())
            .find(|s| !s.is_empty())
    }

    /// Text of the first element matching a CSS selector
    pub fn select_first_text(&self, css: &str) -> Option<String> {
        select_text(&self.doc, css)
    }

    /// Decode the first embedded `application/ld+json` block. Absent
    /// block and decode failure both yield `None`.
    pub fn structured_data(&self) -> Option<StructuredData> {
        let selector = Selector::parse("script[type='application/ld+json']").ok()?;
        let el = self.doc.select(&selector).next()?;
        let raw = el.text().collect::<String>();
        serde_json::from_str(raw.trim()).ok()
    }
}

fn select_text(doc: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    doc.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn select_first<'a>(doc: &'a Html, css: &str) -> Option<scraper::ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    doc.select(&selector).next()
}
