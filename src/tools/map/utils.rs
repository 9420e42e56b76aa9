use crate::selectors::{parse_sel, IMG_SELECTOR, LINK_SELECTOR};
use crate::tools::clean::{clean_text, resolve_url};
use crate::tools::extract::dom::first_value_within;
use crate::types::{ListingCard, SelectorConfig};
use scraper::{ElementRef, Html};
use url::Url;

/// Strip stray quotes some templates leave around attribute values.
pub(super) fn clean_href(href: &str) -> &str {
    href.trim().trim_matches('"').trim_matches('\'').trim()
}

/// The card's own href when it is an anchor, else its first descendant link.
pub(super) fn card_link(card: &ElementRef, base: &Url) -> Option<String> {
    let own = (card.value().name() == "a")
        .then(|| card.value().attr("href"))
        .flatten();
    let href = own.or_else(|| {
        card.select(&LINK_SELECTOR)
            .next()
            .and_then(|a| a.value().attr("href"))
    })?;
    resolve_url(base, clean_href(href))
}

pub(super) fn card_image(card: &ElementRef, base: &Url, attrs: &[String]) -> String {
    card.select(&IMG_SELECTOR)
        .find_map(|img| {
            attrs
                .iter()
                .filter_map(|a| img.value().attr(a))
                .find_map(|src| resolve_url(base, clean_href(src)))
        })
        .unwrap_or_default()
}

/// Elements matched by the first card selector that matches anything.
pub(super) fn card_elements<'a>(doc: &'a Html, sels: &SelectorConfig) -> Vec<ElementRef<'a>> {
    sels.cards
        .iter()
        .filter_map(|s| parse_sel(&s.0))
        .map(|s| doc.select(&s).collect::<Vec<_>>())
        .find(|found| !found.is_empty())
        .unwrap_or_default()
}

pub(super) fn read_card(card: &ElementRef, base: &Url, sels: &SelectorConfig) -> Option<ListingCard> {
    let link = card_link(card, base)?;
    Some(ListingCard {
        name: clean_text(&first_value_within(card, &sels.card_name)),
        link,
        price: clean_text(&first_value_within(card, &sels.card_price)),
        image: card_image(card, base, &sels.image_attrs),
    })
}
