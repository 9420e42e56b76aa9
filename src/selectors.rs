//! Shared Selectors

use once_cell::sync::Lazy;
use scraper::Selector;

/// Selector for anchor elements with hrefs.
pub static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("valid link selector"));

/// Selector for JSON-LD script tags.
pub static JSONLD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("script[type='application/ld+json']").expect("valid jsonld selector")
});

/// Selector for `<title>` tags.
pub static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("valid title selector"));

/// Selector for metadata tags with name/property attributes.
pub static META_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[name], meta[property]").expect("valid metadata selector"));

/// Selector for `<img>` tags.
pub static IMG_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("valid img selector"));

/// Selector for elements carrying text-bearing accessibility attributes.
pub static LABELLED_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("[aria-label], [title], [alt]").expect("valid labelled selector")
});

/// Selector for `itemprop="description"` microdata.
pub static ITEMPROP_DESCRIPTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("[itemprop='description']").expect("valid description selector")
});

/// Parse a configured selector, skipping ones that do not parse.
pub fn parse_sel(raw: &str) -> Option<Selector> {
    Selector::parse(raw).ok()
}
