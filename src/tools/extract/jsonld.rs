//! Field readers over JSON-LD entities (Product, BreadcrumbList, AggregateRating).

use serde_json::Value;

use crate::tools::clean::{format_rating, rating_from_value};
use crate::tools::scrape::find_entity_of_type;
use crate::types::Review;

/// Price and currency read from a Product's offers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Offer {
    pub price: String,
    pub currency: String,
}

/// Aggregate rating and review count from one structured source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateSummary {
    pub rating: Option<f64>,
    pub count: String,
}

/// Text of a scalar JSON value; numbers are rendered, blanks are `None`.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First non-empty scalar among `keys`.
pub fn string_field(entity: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| entity.get(*key))
        .find_map(value_text)
        .unwrap_or_default()
}

/// Objects come as a single object or a list; take the first.
fn first_object(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.iter().find(|v| v.is_object()),
        Value::Object(_) => Some(value),
        _ => None,
    }
}

/// `brand`, `manufacturer` or `maker`, as a string or as an object's `name`/`@id`.
pub fn brand_from_entity(entity: &Value) -> String {
    for key in ["brand", "manufacturer", "maker"] {
        let Some(value) = entity.get(key) else {
            continue;
        };
        let brand = match value {
            Value::Array(_) | Value::Object(_) => first_object(value)
                .map(|obj| string_field(obj, &["name", "@id"]))
                .unwrap_or_default(),
            other => value_text(other).unwrap_or_default(),
        };
        if !brand.is_empty() {
            return brand;
        }
    }
    String::new()
}

pub fn offer_from_entity(entity: &Value) -> Offer {
    let Some(offer) = entity.get("offers").and_then(first_object) else {
        return Offer::default();
    };
    let price_spec = offer.get("priceSpecification").and_then(first_object);

    let mut price = string_field(offer, &["price"]);
    if price.is_empty() {
        price = price_spec.map(|s| string_field(s, &["price"])).unwrap_or_default();
    }
    if price.is_empty() {
        price = string_field(offer, &["lowPrice"]);
    }

    let mut currency = string_field(offer, &["priceCurrency"]);
    if currency.is_empty() {
        currency = price_spec
            .map(|s| string_field(s, &["priceCurrency"]))
            .unwrap_or_default();
    }

    Offer { price, currency }
}

/// `image`, `images` or `thumbnailUrl`: a URL, an ImageObject, or a list of either.
pub fn images_from_entity(entity: &Value) -> Vec<String> {
    fn image_url(value: &Value) -> Option<String> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Object(_) => {
                Some(string_field(value, &["url", "contentUrl"])).filter(|s| !s.is_empty())
            }
            _ => None,
        }
    }

    for key in ["image", "images", "thumbnailUrl"] {
        let urls: Vec<String> = match entity.get(key) {
            Some(Value::Array(items)) => items.iter().filter_map(image_url).collect(),
            Some(other) => image_url(other).into_iter().collect(),
            None => continue,
        };
        if !urls.is_empty() {
            return urls;
        }
    }
    Vec::new()
}

/// Crumb names of the first BreadcrumbList entity, in list order.
pub fn breadcrumbs_from_blocks(blocks: &[Value]) -> Vec<String> {
    let Some(list) = find_entity_of_type(blocks, "BreadcrumbList") else {
        return Vec::new();
    };
    let items = list
        .get("itemListElement")
        .or_else(|| list.get("itemList"))
        .and_then(Value::as_array);

    items
        .into_iter()
        .flatten()
        .filter_map(|item| {
            let name = string_field(item, &["name"]);
            if !name.is_empty() {
                return Some(name);
            }
            item.get("item")
                .map(|inner| string_field(inner, &["name"]))
                .filter(|n| !n.is_empty())
        })
        .collect()
}

/// Rating value plus `reviewCount` (or `ratingCount`) of an aggregate rating object.
pub fn aggregate_from_object(agg: &Value) -> AggregateSummary {
    AggregateSummary {
        rating: ["ratingValue", "rating"]
            .iter()
            .filter_map(|k| agg.get(*k))
            .find_map(rating_from_value),
        count: string_field(agg, &["reviewCount", "ratingCount"]),
    }
}

/// The Product's embedded `aggregateRating`.
pub fn aggregate_from_entity(entity: &Value) -> AggregateSummary {
    entity
        .get("aggregateRating")
        .and_then(first_object)
        .map(aggregate_from_object)
        .unwrap_or_default()
}

/// Up to `max` reviews from `review` / `reviews`.
pub fn reviews_from_entity(entity: &Value, max: usize) -> Vec<Review> {
    let raw: Vec<&Value> = match entity.get("review").or_else(|| entity.get("reviews")) {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(single) => vec![single],
    };

    raw.into_iter().take(max).map(review_from_value).collect()
}

fn review_from_value(value: &Value) -> Review {
    if !value.is_object() {
        return Review {
            body: value_text(value).unwrap_or_default(),
            ..Default::default()
        };
    }

    let author = match value.get("author") {
        Some(author @ (Value::Object(_) | Value::Array(_))) => first_object(author)
            .map(|a| string_field(a, &["name", "@id"]))
            .unwrap_or_default(),
        Some(other) => value_text(other).unwrap_or_default(),
        None => String::new(),
    };

    let rating = match value.get("reviewRating").or_else(|| value.get("rating")) {
        Some(rr @ Value::Object(_)) => rr.get("ratingValue").and_then(rating_from_value),
        Some(other) => rating_from_value(other),
        None => None,
    };

    Review {
        author,
        rating: rating.map(format_rating).unwrap_or_default(),
        body: string_field(value, &["reviewBody", "description", "name"]),
    }
}
