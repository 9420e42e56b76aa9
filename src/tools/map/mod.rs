//! Page classification and listing card extraction.

mod tests;
mod utils;

use utils::*;

use crate::tools::extract::extract_product_from_doc;
use crate::types::{ListingCard, PageKind, ProductRecord, ScrapeOptions, SelectorConfig};
use scraper::Html;
use std::collections::HashSet;
use url::Url;

/// What a rendered seed page turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum InspectedPage {
    Listing(Vec<ListingCard>),
    Detail(ProductRecord),
}

impl InspectedPage {
    pub fn kind(&self) -> PageKind {
        match self {
            InspectedPage::Listing(_) => PageKind::Listing,
            InspectedPage::Detail(_) => PageKind::Detail,
        }
    }
}

/// Extract product cards from a listing page.
///
/// The first card selector with any match wins; later selectors are not
/// merged in. Cards without a resolvable link are dropped and repeated
/// links keep their first card.
pub fn extract_listing_cards(html: &str, base: &Url, sels: &SelectorConfig) -> Vec<ListingCard> {
    read_listing_cards(&Html::parse_document(html), base, sels)
}

/// Same as [`extract_listing_cards`] over an already parsed document.
pub fn read_listing_cards(doc: &Html, base: &Url, sels: &SelectorConfig) -> Vec<ListingCard> {
    let mut seen = HashSet::new();
    card_elements(doc, sels)
        .iter()
        .filter_map(|card| read_card(card, base, sels))
        .filter(|card| seen.insert(card.link.clone()))
        .collect()
}

/// `Listing` once the page carries at least `threshold` cards.
pub fn classify_page(cards: &[ListingCard], threshold: usize) -> PageKind {
    if cards.len() >= threshold {
        PageKind::Listing
    } else {
        PageKind::Detail
    }
}

/// Parse the page once and return either its cards or its product record.
pub fn inspect_page(html: &str, url: &Url, options: &ScrapeOptions) -> InspectedPage {
    let doc = Html::parse_document(html);
    let cards = read_listing_cards(&doc, url, &options.selectors);
    match classify_page(&cards, options.listing_threshold) {
        PageKind::Listing => InspectedPage::Listing(cards),
        PageKind::Detail => InspectedPage::Detail(extract_product_from_doc(&doc, url, options)),
    }
}
