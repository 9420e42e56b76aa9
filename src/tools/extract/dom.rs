//! DOM fallbacks, consulted per field when structured data has nothing.

use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;

use crate::selectors::{parse_sel, IMG_SELECTOR, ITEMPROP_DESCRIPTION_SELECTOR, LABELLED_SELECTOR};
use crate::tools::clean::{drop_trailing_name, format_rating, parse_rating};
use crate::tools::scrape::find_metadata_value;
use crate::types::{Review, Sel, SelectorConfig};

/// "... by Acme Co" at the end of a heading.
static BY_BRAND_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bby\s+([A-Za-z0-9 &.\-]{2,50})$").expect("valid regex"));

static PAGE_RATING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d(?:\.\d)?)\s*(?:/|out of)\s*5").expect("valid regex"));

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

const LABEL_ATTRS: [&str; 3] = ["aria-label", "title", "alt"];

/// Minimum rendered text length for a node to count as a review.
pub const MIN_REVIEW_CHARS: usize = 30;

/// Rendered text of an element: text nodes joined by spaces, whitespace collapsed.
pub fn element_text(el: &ElementRef) -> String {
    let joined = el.text().collect::<Vec<_>>().join(" ");
    WHITESPACE_REGEX.replace_all(&joined, " ").trim().to_string()
}

/// Machine-readable `content` attribute when present, visible text otherwise.
pub fn element_value(el: &ElementRef) -> String {
    match el.value().attr("content").map(str::trim) {
        Some(content) if !content.is_empty() => content.to_string(),
        _ => element_text(el),
    }
}

fn first_value_in<'a, I>(scope: I, sels: &[Sel]) -> String
where
    I: Fn(&scraper::Selector) -> Vec<ElementRef<'a>>,
{
    for sel in sels {
        let Some(selector) = parse_sel(&sel.0) else {
            continue;
        };
        if let Some(value) = scope(&selector)
            .iter()
            .map(element_value)
            .find(|v| !v.is_empty())
        {
            return value;
        }
    }
    String::new()
}

/// First non-empty value over a prioritized selector list.
pub fn first_value(doc: &Html, sels: &[Sel]) -> String {
    first_value_in(|s| doc.select(s).collect(), sels)
}

/// First non-empty value among the descendants of `root`.
pub fn first_value_within(root: &ElementRef, sels: &[Sel]) -> String {
    first_value_in(|s| root.select(s).collect(), sels)
}

pub fn brand_from_dom(doc: &Html, sels: &SelectorConfig) -> String {
    let brand = first_value(doc, &sels.brand);
    if !brand.is_empty() {
        return brand;
    }

    let heading = sels
        .brand_heading
        .iter()
        .filter_map(|s| parse_sel(&s.0))
        .find_map(|s| doc.select(&s).next())
        .map(|el| element_text(&el))
        .unwrap_or_default();

    BY_BRAND_REGEX
        .captures(&heading)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

pub fn price_from_dom(doc: &Html, sels: &SelectorConfig) -> String {
    first_value(doc, &sels.price)
}

/// Meta / Open Graph description, then `itemprop="description"`, then containers.
pub fn description_from_dom(
    doc: &Html,
    metadata: &[(String, String)],
    sels: &SelectorConfig,
) -> String {
    if let Some(meta) = find_metadata_value(metadata, &["og:description", "description"]) {
        return meta;
    }

    let microdata = doc
        .select(&ITEMPROP_DESCRIPTION_SELECTOR)
        .map(|el| {
            let text = element_text(&el);
            if text.is_empty() {
                el.value().attr("content").unwrap_or_default().trim().to_string()
            } else {
                text
            }
        })
        .find(|v| !v.is_empty());
    if let Some(desc) = microdata {
        return desc;
    }

    first_value(doc, &sels.description)
}

/// Up to `max` image URLs from raw `<img>` tags, taken from the configured attributes.
pub fn image_tags(doc: &Html, attrs: &[String], max: usize) -> Vec<String> {
    doc.select(&IMG_SELECTOR)
        .filter_map(|img| {
            attrs
                .iter()
                .filter_map(|a| img.value().attr(a))
                .map(str::trim)
                .find(|v| !v.is_empty())
                .map(str::to_string)
        })
        .take(max)
        .collect()
}

/// Crumb texts from the first breadcrumb container that has any.
pub fn breadcrumbs_from_dom(doc: &Html, sels: &SelectorConfig, name: &str) -> Vec<String> {
    for container_sel in sels.breadcrumbs.iter().filter_map(|s| parse_sel(&s.0)) {
        let Some(container) = doc.select(&container_sel).next() else {
            continue;
        };
        let texts: Vec<String> = sels
            .breadcrumb_items
            .iter()
            .filter_map(|s| parse_sel(&s.0))
            .flat_map(|item_sel| {
                container
                    .select(&item_sel)
                    .map(|el| element_text(&el))
                    .collect::<Vec<_>>()
            })
            .filter(|t| !t.is_empty())
            .collect();

        if texts.is_empty() {
            continue;
        }

        // `li > a` yields the same text twice in a row
        let mut crumbs: Vec<String> = Vec::with_capacity(texts.len());
        for text in texts {
            if crumbs.last() != Some(&text) {
                crumbs.push(text);
            }
        }
        return drop_trailing_name(crumbs, name);
    }
    Vec::new()
}

fn rating_from_labels(el: &ElementRef) -> Option<f64> {
    LABEL_ATTRS
        .iter()
        .filter_map(|attr| el.value().attr(attr))
        .filter(|v| !v.trim().is_empty())
        .find_map(parse_rating)
}

/// Aggregate rating from accessibility labels, then from page text.
pub fn rating_from_dom(doc: &Html) -> Option<f64> {
    if let Some(rating) = doc
        .select(&LABELLED_SELECTOR)
        .find_map(|el| rating_from_labels(&el))
    {
        return Some(rating);
    }

    let text = doc.root_element().text().collect::<Vec<_>>().join(" ");
    PAGE_RATING_REGEX
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Review cards from the first selector that yields any; capped at `max`.
pub fn reviews_from_dom(doc: &Html, sels: &SelectorConfig, max: usize) -> Vec<Review> {
    let mut collected = Vec::new();
    if max == 0 {
        return collected;
    }

    for card_sel in sels.review_cards.iter().filter_map(|s| parse_sel(&s.0)) {
        for card in doc.select(&card_sel) {
            let body = element_text(&card);
            if body.chars().count() < MIN_REVIEW_CHARS {
                continue;
            }

            let rating = rating_from_labels(&card).or_else(|| {
                sels.review_rating
                    .iter()
                    .filter_map(|s| parse_sel(&s.0))
                    .find_map(|s| card.select(&s).next())
                    .and_then(|inner| {
                        let v = inner
                            .value()
                            .attr("aria-label")
                            .or_else(|| inner.value().attr("title"))
                            .map(str::to_string)
                            .unwrap_or_else(|| element_text(&inner));
                        parse_rating(&v)
                    })
            });

            collected.push(Review {
                author: first_value_within(&card, &sels.review_author),
                rating: rating.map(format_rating).unwrap_or_default(),
                body,
            });
            if collected.len() >= max {
                return collected;
            }
        }
        if !collected.is_empty() {
            break;
        }
    }
    collected
}
