use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Card count at or above which a page is treated as a listing.
pub const LISTING_THRESHOLD: usize = 4;

/// Reviews kept per product unless configured otherwise.
pub const MAX_REVIEWS_PER_PRODUCT: usize = 5;

/// Separator between serialized reviews.
pub const REVIEW_SEPARATOR: &str = " || ";

/// A CSS selector kept as text so selector lists stay plain configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sel(pub String);

impl From<&str> for Sel {
    fn from(s: &str) -> Self {
        Sel(s.to_string())
    }
}

fn sels(list: &[&str]) -> Vec<Sel> {
    list.iter().map(|s| Sel::from(*s)).collect()
}

/// Ordered selector lists for every heuristic tier. Earlier entries win.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub title: Vec<Sel>,
    pub brand: Vec<Sel>,
    pub brand_heading: Vec<Sel>,
    pub price: Vec<Sel>,
    pub description: Vec<Sel>,
    pub breadcrumbs: Vec<Sel>,
    pub breadcrumb_items: Vec<Sel>,
    pub review_cards: Vec<Sel>,
    pub review_rating: Vec<Sel>,
    pub review_author: Vec<Sel>,
    pub cards: Vec<Sel>,
    pub card_name: Vec<Sel>,
    pub card_price: Vec<Sel>,
    pub image_attrs: Vec<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            title: sels(&["h1"]),
            brand: sels(&[
                "[itemprop='brand']",
                ".brand",
                ".product-brand",
                ".brand-name",
                ".manufacturer",
                ".product-manufacturer",
                "meta[name='brand']",
                "meta[property='product:brand']",
            ]),
            brand_heading: sels(&["h1", "h1.title", ".pdp-title"]),
            price: sels(&[
                "[itemprop='price']",
                ".price",
                ".product-price",
                ".selling-price",
                ".a-price",
            ]),
            description: sels(&[
                "div.pdp-description",
                "div.product-description",
                "#description",
                ".pdp-product-more",
                ".productDescription",
            ]),
            breadcrumbs: sels(&[
                "nav[aria-label*='breadcrumb']",
                "nav.breadcrumb",
                ".breadcrumbs",
                ".breadcrumb",
                "ul.breadcrumbs",
                "ol.breadcrumb",
            ]),
            breadcrumb_items: sels(&["a, li, span"]),
            review_cards: sels(&[
                ".review",
                ".reviewCard",
                ".user-review",
                ".comment",
                ".product-review",
                ".rvw",
            ]),
            review_rating: sels(&["[aria-label], .rating, .stars, .ratingValue"]),
            review_author: sels(&[".author, .user-name, .review-author"]),
            cards: sels(&[
                "a.product-base",
                "li.product-base",
                "a.product-card",
                ".product",
                ".s-result-item",
                ".search-result-item",
                ".product-grid-item",
                ".grid-item",
                ".search-result",
                ".productTile",
                ".productListItem",
            ]),
            card_name: sels(&[
                "h4.product-product",
                "h3.product-brand",
                "h3",
                "h4",
                ".product-title",
                ".product-name",
                ".name",
            ]),
            card_price: sels(&[
                ".product-discountedPrice",
                ".product-price",
                ".price",
                ".selling-price",
                ".a-price",
                ".price-block",
            ]),
            image_attrs: vec!["src".into(), "data-src".into(), "data-lazy-src".into()],
        }
    }
}

/// Immutable knobs for one scraper instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeOptions {
    /// Cap on listing cards visited. `None` or `Some(0)` visits every card.
    pub max_products: Option<usize>,
    pub max_reviews_per_product: usize,
    /// Pause between consecutive card visits.
    pub page_delay_ms: u64,
    /// Settle time handed to the navigator for the seed page.
    pub seed_settle_ms: u64,
    /// Settle time handed to the navigator for each detail page.
    pub page_settle_ms: u64,
    pub listing_threshold: usize,
    /// Raw `<img>` URLs considered per page.
    pub max_image_tags: usize,
    pub selectors: SelectorConfig,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            max_products: None,
            max_reviews_per_product: MAX_REVIEWS_PER_PRODUCT,
            page_delay_ms: 1_000,
            seed_settle_ms: 1_200,
            page_settle_ms: 1_000,
            listing_threshold: LISTING_THRESHOLD,
            max_image_tags: 6,
            selectors: SelectorConfig::default(),
        }
    }
}

impl ScrapeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_products(mut self, max: usize) -> Self {
        self.max_products = Some(max);
        self
    }

    pub fn with_max_reviews(mut self, max: usize) -> Self {
        self.max_reviews_per_product = max;
        self
    }

    pub fn with_page_delay_ms(mut self, ms: u64) -> Self {
        self.page_delay_ms = ms;
        self
    }

    pub fn with_settle_ms(mut self, seed_ms: u64, page_ms: u64) -> Self {
        self.seed_settle_ms = seed_ms;
        self.page_settle_ms = page_ms;
        self
    }

    pub fn with_listing_threshold(mut self, threshold: usize) -> Self {
        self.listing_threshold = threshold;
        self
    }

    pub fn with_selectors(mut self, selectors: SelectorConfig) -> Self {
        self.selectors = selectors;
        self
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn seed_settle(&self) -> Duration {
        Duration::from_millis(self.seed_settle_ms)
    }

    pub fn page_settle(&self) -> Duration {
        Duration::from_millis(self.page_settle_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub author: String,
    /// `"<value>/5"` or empty.
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub body: String,
}

impl Review {
    /// `author|rating|body`
    pub fn serialize(&self) -> String {
        format!("{}|{}|{}", self.author, self.rating, self.body)
    }
}

/// Join reviews into the transport form used by the output column.
pub fn serialize_reviews(reviews: &[Review]) -> String {
    reviews
        .iter()
        .map(Review::serialize)
        .collect::<Vec<_>>()
        .join(REVIEW_SEPARATOR)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub breadcrumbs: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review_count: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl ProductRecord {
    /// Record seeded from listing data only.
    pub fn from_card(card: &ListingCard) -> Self {
        Self {
            name: card.name.clone(),
            price: card.price.clone(),
            link: card.link.clone(),
            images: if card.image.is_empty() {
                Vec::new()
            } else {
                vec![card.image.clone()]
            },
            ..Default::default()
        }
    }

    /// Fold a detail-page record into a card-seeded one. Non-empty card
    /// values (name, price, image) win; everything else comes from the detail.
    pub fn merge_detail(self, detail: ProductRecord) -> Self {
        fn pick(card: String, detail: String) -> String {
            if card.is_empty() {
                detail
            } else {
                card
            }
        }

        ProductRecord {
            name: pick(self.name, detail.name),
            price: pick(self.price, detail.price),
            images: if self.images.is_empty() {
                detail.images
            } else {
                self.images
            },
            link: self.link,
            brand: detail.brand,
            currency: detail.currency,
            description: detail.description,
            breadcrumbs: detail.breadcrumbs,
            rating: detail.rating,
            review_count: detail.review_count,
            reviews: detail.reviews,
        }
    }

    pub fn serialized_reviews(&self) -> String {
        serialize_reviews(&self.reviews)
    }
}

/// Lightweight product summary scraped from a listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingCard {
    pub name: String,
    pub link: String,
    pub price: String,
    pub image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageKind {
    Listing,
    Detail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeReport {
    pub seed_url: String,
    pub kind: PageKind,
    pub records: Vec<ProductRecord>,
    /// Card links whose detail visit failed; their records carry listing data only.
    #[serde(default)]
    pub failed_links: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
