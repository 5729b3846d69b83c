use scraper::{Html, Selector};
use url::Url;

/// Anchors GitHub renders for each file in a directory view.
pub const ENTRY_SELECTOR: &str = "a.js-navigation-open.Link--primary";

/// Host serving the raw bytes behind a `/blob/` page.
pub const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";

/// Optional substring filter on entry links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exclusion<'a> {
    needle: Option<&'a str>,
}

impl<'a> Exclusion<'a> {
    #[allow(unused)]
    pub fn none() -> Self {
        Self::default()
    }

    #[allow(unused)]
    pub fn containing(needle: &'a str) -> Self {
        Self { needle: Some(needle) }
    }

    pub fn excludes(&self, href: &str) -> bool {
        self.needle.is_some_and(|needle| href.contains(needle))
    }
}

impl<'a> From<Option<&'a str>> for Exclusion<'a> {
    fn from(needle: Option<&'a str>) -> Self {
        Self { needle }
    }
}

/// Every file-entry `href` in a directory page, in document order.
///
/// Anchors that match the selector but carry no `href` are ignored.
pub fn entry_links(html: &str) -> Result<Vec<String>, ListingError> {
    let selector = Selector::parse(ENTRY_SELECTOR)
        .map_err(|e| ListingError::Selector(e.to_string()))?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::to_string)
        .collect())
}

/// Rewrite a page-view link into the raw-content URL of the same file.
///
/// `/owner/repo/blob/main/a.json` becomes
/// `https://raw.githubusercontent.com/owner/repo/main/a.json`. Absolute
/// links keep only their path.
pub fn raw_link(href: &str) -> Result<String, ListingError> {
    let path = match Url::parse(href) {
        Ok(absolute) => absolute.path().to_string(),
        Err(_) => href.to_string(),
    };
    let path = path.replacen("/blob/", "/", 1);

    let raw = Url::parse(RAW_CONTENT_BASE)
        .and_then(|base| base.join(&path))
        .map_err(|source| ListingError::Link { href: href.to_string(), source })?;

    Ok(raw.into())
}

/// Parse a directory page into the ordered raw links worth fetching.
pub fn raw_links(html: &str, exclusion: Exclusion<'_>) -> Result<Vec<String>, ListingError> {
    entry_links(html)?
        .iter()
        .filter(|href| !exclusion.excludes(href))
        .map(|href| raw_link(href))
        .collect()
}

#[derive(thiserror::Error, Debug)]
pub enum ListingError {
    #[error("invalid entry selector: {0}")]
    Selector(String),
    #[error("cannot build raw link from '{href}': {source}")]
    Link {
        href: String,
        #[source]
        source: url::ParseError,
    },
}
