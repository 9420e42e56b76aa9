//! Detail-page extraction: structured data first, DOM fallbacks per field.

pub mod dom;
pub mod jsonld;
mod tests;

use dom::*;
use jsonld::*;

use crate::tools::clean::{
    clean_breadcrumbs, clean_description, clean_text, collect_images, format_rating,
};
use crate::tools::scrape::{find_entity_of_type, find_metadata_value, read_jsonld, read_metadata};
use crate::types::{ProductRecord, Review, ScrapeOptions};
use scraper::Html;
use url::Url;

/// Extract a full product record from a rendered detail page.
///
/// `page_url` is both the record's `link` and the base that relative image
/// URLs resolve against.
pub fn extract_product(html: &str, page_url: &Url, options: &ScrapeOptions) -> ProductRecord {
    extract_product_from_doc(&Html::parse_document(html), page_url, options)
}

/// Same as [`extract_product`] over an already parsed document.
pub fn extract_product_from_doc(doc: &Html, page_url: &Url, options: &ScrapeOptions) -> ProductRecord {
    let sels = &options.selectors;
    let blocks = read_jsonld(doc);
    let metadata = read_metadata(doc);

    let product = find_entity_of_type(&blocks, "Product");
    let from_product = |keys: &[&str]| {
        product
            .map(|p| string_field(p, keys))
            .unwrap_or_default()
    };

    let name = first_non_empty!(
        from_product(&["name"]),
        find_metadata_value(&metadata, &["og:title"]).unwrap_or_default(),
        first_value(doc, &sels.title),
    );

    let brand = first_non_empty!(
        product.map(brand_from_entity).unwrap_or_default(),
        brand_from_dom(doc, sels),
    );

    let offer = product.map(offer_from_entity).unwrap_or_default();
    let price = first_non_empty!(offer.price, price_from_dom(doc, sels));

    let description = first_non_empty!(
        from_product(&["description"]),
        description_from_dom(doc, &metadata, sels),
    );

    let og_images: Vec<String> = metadata
        .iter()
        .filter(|(k, v)| k.eq_ignore_ascii_case("og:image") && !v.trim().is_empty())
        .map(|(_, v)| v.trim().to_string())
        .collect();
    let images = collect_images(
        page_url,
        &[
            product.map(images_from_entity).unwrap_or_default(),
            og_images,
            image_tags(doc, &sels.image_attrs, options.max_image_tags),
        ],
    );

    let mut crumbs = breadcrumbs_from_blocks(&blocks);
    if crumbs.is_empty() {
        crumbs = breadcrumbs_from_dom(doc, sels, &name);
    }
    let breadcrumbs = clean_breadcrumbs(&crumbs.join("/"));

    let aggregates = [
        product.map(aggregate_from_entity).unwrap_or_default(),
        find_entity_of_type(&blocks, "AggregateRating")
            .map(aggregate_from_object)
            .unwrap_or_default(),
    ];
    let rating = aggregates
        .iter()
        .find_map(|a| a.rating)
        .or_else(|| rating_from_dom(doc));
    let review_count = aggregates
        .iter()
        .map(|a| a.count.clone())
        .find(|c| !c.is_empty())
        .unwrap_or_default();

    let max_reviews = options.max_reviews_per_product;
    let mut reviews = product
        .map(|p| reviews_from_entity(p, max_reviews))
        .unwrap_or_default();
    if reviews.is_empty() {
        reviews = reviews_from_dom(doc, sels, max_reviews);
    }
    reviews.truncate(max_reviews);

    finalize(ProductRecord {
        name,
        brand,
        price,
        currency: offer.currency,
        link: page_url.to_string(),
        description: clean_description(&description),
        images,
        breadcrumbs,
        rating: rating.map(format_rating).unwrap_or_default(),
        review_count,
        reviews,
    })
}

/// Final text cleanup over every string field.
fn finalize(record: ProductRecord) -> ProductRecord {
    ProductRecord {
        name: clean_text(&record.name),
        brand: clean_text(&record.brand),
        price: clean_text(&record.price),
        currency: clean_text(&record.currency),
        link: record.link,
        description: clean_text(&record.description),
        images: record.images,
        breadcrumbs: clean_text(&record.breadcrumbs),
        rating: record.rating,
        review_count: clean_text(&record.review_count),
        reviews: record
            .reviews
            .into_iter()
            .map(|r| Review {
                author: clean_text(&r.author),
                rating: r.rating,
                body: clean_text(&r.body),
            })
            .collect(),
    }
}
