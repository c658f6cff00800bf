//! Author and year inference from page metadata
//!
//! Heuristics over heterogeneous, often-missing markup: an explicit
//! link-tag hint beats embedded structured data beats a human-authored
//! byline beats "unknown". Absence is an expected outcome at every step;
//! each extractor returns `Option` and only the pipeline edge converges
//! on the sentinel strings.

use regex::Regex;

use crate::page::Page;
use crate::schema::StructuredData;

/// Sentinel returned when no author heuristic matches
pub const NO_AUTHOR: &str = "No author available";
/// Sentinel returned when no publication date parses
pub const NO_DATE: &str = "No date available";
/// Sentinel returned when the page has no title element
pub const NO_TITLE: &str = "No title available";

/// Metadata names checked for a publication date. Order is trust order
/// across publishing platforms, not configuration.
const DATE_CANDIDATES: &[&str] = &[
    "article:published_time",
    "og:updated_time",
    "date",
    "article:modified_time",
    "lastmod",
];

/// Byline element class marker used by pages without structured data
const BYLINE_SELECTOR: &str = ".blog-entry__date--full.fine-print";

/// Publication year from page metadata, or the "No date available"
/// sentinel
pub fn publication_year(page: &Page) -> String {
    normalize_year(&page.meta_content(DATE_CANDIDATES).unwrap_or_default())
}

/// Reduce a raw date string to its 4-digit year.
///
/// Tries full ISO-8601 first, then a timezone-less timestamp, then a
/// bare date (`lastmod` values are often date-only). Anything else,
/// including empty input, yields the sentinel.
pub fn normalize_year(raw: &str) -> String {
    parse_year(raw).unwrap_or_else(|| NO_DATE.to_string())
}

fn parse_year(raw: &str) -> Option<String> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.format("%Y").to_string());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.format("%Y").to_string());
    }
    if let Ok(d) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d.format("%Y").to_string());
    }
    None
}

/// Resolve the author line for a page. Strict priority, first success
/// wins:
/// 1. `content` attribute of any `<link>` element, verbatim
/// 2. embedded structured data (author name, then publisher)
/// 3. "By <name> published" byline text
/// 4. the "No author available" sentinel
pub fn resolve_author(page: &Page, data: Option<&StructuredData>) -> String {
    if let Some(hint) = page.link_content() {
        return hint;
    }
    if let Some(author) = data.and_then(structured_author) {
        return author;
    }
    if let Some(author) = byline_author(page) {
        return author;
    }
    NO_AUTHOR.to_string()
}

/// Author from an embedded structured-data block: the first object with
/// a usable author name, formatted; otherwise the first nested publisher
/// string, verbatim.
pub fn structured_author(data: &StructuredData) -> Option<String> {
    let objects = data.objects();

    let named = objects.iter().find_map(|obj| {
        obj.author
            .as_ref()
            .and_then(|a| a.first())
            .and_then(|entry| entry.name.as_deref())
    });
    if let Some(name) = named {
        return Some(format_author_name(name));
    }

    objects
        .iter()
        .find_map(|obj| obj.page.as_ref()?.page_info.as_ref()?.publisher.clone())
}

/// Author from the dated byline element. Only plain two-token names are
/// accepted on this path.
pub fn byline_author(page: &Page) -> Option<String> {
    let text = page.select_first_text(BYLINE_SELECTOR)?;
    let re = Regex::new(r"By (.*?) published").unwrap();
    let name = re.captures(&text)?.get(1)?.as_str();

    let tokens: Vec<&str> = name.split(' ').collect();
    match tokens[..] {
        [first, last] => Some(format!("{}, {}.", last, initial(first)?)),
        _ => None,
    }
}

/// "First [Middle] Last" -> "Last, I." Three-token names take the
/// middle initial; anything but two or three tokens passes through
/// unchanged.
pub fn format_author_name(name: &str) -> String {
    let tokens: Vec<&str> = name.split(' ').collect();
    let formatted = match tokens[..] {
        [first, last] => initial(first).map(|i| format!("{}, {}.", last, i)),
        [_, middle, last] => initial(middle).map(|i| format!("{}, {}.", last, i)),
        _ => None,
    };
    formatted.unwrap_or_else(|| name.to_string())
}

fn initial(token: &str) -> Option<char> {
    token.chars().next()
}
