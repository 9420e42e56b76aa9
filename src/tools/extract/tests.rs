#[cfg(test)]
mod tests {
    use crate::tools::extract::dom::*;
    use crate::tools::extract::jsonld::*;
    use crate::tools::extract::*;
    use crate::types::{ScrapeOptions, SelectorConfig};
    use scraper::Html;
    use serde_json::json;
    use url::Url;

    fn page_url() -> Url {
        Url::parse("https://shop.example.com/p/mug-42").unwrap()
    }

    fn review_json(n: usize) -> serde_json::Value {
        json!({
            "@type": "Review",
            "author": {"@type": "Person", "name": format!("Reader {n}")},
            "reviewRating": {"@type": "Rating", "ratingValue": "4"},
            "reviewBody": format!("Review body number {n}")
        })
    }

    #[test]
    fn test_extract_product_structured_first() {
        let html = r#"
            <html><head>
                <meta property="og:title" content="OG Mug">
                <meta property="og:image" content="/img/og.jpg">
                <script type="application/ld+json">
                {
                    "@context": "https://schema.org",
                    "@type": "Product",
                    "name": "Stoneware Mug",
                    "brand": {"@type": "Brand", "name": "Kiln &amp; Co"},
                    "image": ["https://cdn.example.com/mug.jpg", "/img/og.jpg"],
                    "description": "A glazed stoneware mug that holds 350 ml of coffee.",
                    "offers": {"@type": "Offer", "price": "24.00", "priceCurrency": "USD"},
                    "aggregateRating": {"@type": "AggregateRating", "ratingValue": "4.5", "reviewCount": "87"}
                }
                </script>
            </head><body>
                <h1>Heading Mug</h1>
                <span class="price">$99</span>
                <img src="/img/gallery-1.jpg">
            </body></html>
        "#;

        let record = extract_product(html, &page_url(), &ScrapeOptions::default());
        assert_eq!(record.name, "Stoneware Mug");
        assert_eq!(record.brand, "Kiln & Co");
        assert_eq!(record.price, "24.00");
        assert_eq!(record.currency, "USD");
        assert_eq!(record.rating, "4.5/5");
        assert_eq!(record.review_count, "87");
        assert_eq!(
            record.description,
            "A glazed stoneware mug that holds 350 ml of coffee."
        );
        assert_eq!(
            record.images,
            vec![
                "https://cdn.example.com/mug.jpg".to_string(),
                "https://shop.example.com/img/og.jpg".to_string(),
                "https://shop.example.com/img/gallery-1.jpg".to_string(),
            ]
        );
        assert_eq!(record.link, "https://shop.example.com/p/mug-42");
    }

    #[test]
    fn test_extract_product_dom_fallbacks() {
        let html = r#"
            <html><head>
                <meta name="description" content="Hand-thrown mug with a speckled glaze finish.">
            </head><body>
                <nav aria-label="breadcrumb">
                    <a>Home</a><a>Kitchen</a><a>Mugs</a><a>Speckled Mug</a>
                </nav>
                <h1>Speckled Mug by Clayworks</h1>
                <span itemprop="price" content="18.50">$18.50 today</span>
                <div aria-label="Rated 4.2 out of 5 stars"></div>
                <div class="review">
                    <span class="author">Sam</span>
                    <span class="stars" aria-label="5 out of 5">*****</span>
                    Keeps coffee warm for a long time, love it.
                </div>
            </body></html>
        "#;

        let record = extract_product(html, &page_url(), &ScrapeOptions::default());
        assert_eq!(record.name, "Speckled Mug by Clayworks");
        assert_eq!(record.brand, "Clayworks");
        assert_eq!(record.price, "18.50");
        assert_eq!(
            record.description,
            "Hand-thrown mug with a speckled glaze finish."
        );
        assert_eq!(record.breadcrumbs, "Home/Kitchen/Mugs/Speckled Mug");
        assert_eq!(record.rating, "4.2/5");
        assert_eq!(record.review_count, "");
        assert_eq!(record.reviews.len(), 1);
        assert_eq!(record.reviews[0].author, "Sam");
        assert_eq!(record.reviews[0].rating, "5.0/5");
        assert!(record.reviews[0].body.contains("Keeps coffee warm"));
    }

    #[test]
    fn test_extract_product_empty_page() {
        let record = extract_product("<html><body></body></html>", &page_url(), &ScrapeOptions::default());
        assert_eq!(record.name, "");
        assert_eq!(record.rating, "");
        assert!(record.images.is_empty());
        assert!(record.reviews.is_empty());
    }

    #[test]
    fn test_reviews_capped_at_five() {
        let reviews: Vec<_> = (1..=9).map(review_json).collect();
        let product = json!({"@type": "Product", "name": "Mug", "review": reviews});
        let html = format!(
            r#"<html><head><script type="application/ld+json">{product}</script></head></html>"#
        );

        let record = extract_product(&html, &page_url(), &ScrapeOptions::default());
        assert_eq!(record.reviews.len(), 5);
        assert_eq!(record.reviews[0].author, "Reader 1");
        assert_eq!(record.reviews[0].rating, "4.0/5");
        assert_eq!(record.reviews[4].body, "Review body number 5");
        assert_eq!(record.serialized_reviews().matches(" || ").count(), 4);
    }

    #[test]
    fn test_extract_product_iri_typed_product() {
        let html = r#"
            <script type="application/ld+json">
            {"@context": "https://schema.org", "@type": "https://schema.org/Product",
             "name": "IRI Mug", "offers": {"price": "12.00"},
             "aggregateRating": {"ratingValue": "4.1", "reviewCount": "9"}}
            </script>
            <h1>Page heading</h1>
        "#;
        let record = extract_product(html, &page_url(), &ScrapeOptions::default());
        assert_eq!(record.name, "IRI Mug");
        assert_eq!(record.price, "12.00");
        assert_eq!(record.rating, "4.1/5");
        assert_eq!(record.review_count, "9");
    }

    #[test]
    fn test_review_count_falls_back_to_aggregate_block() {
        let html = r#"
            <script type="application/ld+json">
            [{"@type": "Product", "name": "Mug"},
             {"@type": "AggregateRating", "ratingValue": 3.8, "ratingCount": 12}]
            </script>
        "#;
        let record = extract_product(html, &page_url(), &ScrapeOptions::default());
        assert_eq!(record.rating, "3.8/5");
        assert_eq!(record.review_count, "12");
    }

    #[test]
    fn test_breadcrumb_list_preferred() {
        let html = r#"
            <script type="application/ld+json">
            {"@type": "BreadcrumbList", "itemListElement": [
                {"@type": "ListItem", "position": 1, "name": "Home"},
                {"@type": "ListItem", "position": 2, "item": {"name": "Drinkware"}},
                {"@type": "ListItem", "position": 3, "name": "Add to Bag"}
            ]}
            </script>
            <nav class="breadcrumb"><a>Elsewhere</a></nav>
        "#;
        let record = extract_product(html, &page_url(), &ScrapeOptions::default());
        assert_eq!(record.breadcrumbs, "Home/Drinkware");
    }

    #[test]
    fn test_brand_from_entity_shapes() {
        assert_eq!(brand_from_entity(&json!({"brand": "Acme"})), "Acme");
        assert_eq!(
            brand_from_entity(&json!({"brand": [{"name": "Acme"}, {"name": "Other"}]})),
            "Acme"
        );
        assert_eq!(
            brand_from_entity(&json!({"manufacturer": {"@id": "acme-id"}})),
            "acme-id"
        );
        assert_eq!(brand_from_entity(&json!({"name": "Mug"})), "");
    }

    #[test]
    fn test_offer_from_entity_fallbacks() {
        let offer = offer_from_entity(&json!({
            "offers": [{"priceSpecification": {"price": 12.5, "priceCurrency": "EUR"}}]
        }));
        assert_eq!(offer.price, "12.5");
        assert_eq!(offer.currency, "EUR");

        let offer = offer_from_entity(&json!({"offers": {"lowPrice": "9.99"}}));
        assert_eq!(offer.price, "9.99");
        assert_eq!(offer.currency, "");
    }

    #[test]
    fn test_images_from_entity_objects() {
        let images = images_from_entity(&json!({
            "image": [{"@type": "ImageObject", "url": "a.jpg"}, "b.jpg", 7]
        }));
        assert_eq!(images, vec!["a.jpg".to_string(), "b.jpg".to_string()]);
    }

    #[test]
    fn test_reviews_from_dom_first_selector_only() {
        let doc = Html::parse_document(
            r#"
            <div class="review">This is a long enough review body to count.</div>
            <div class="review">short</div>
            <div class="comment">A comment that is also long enough to count.</div>
            "#,
        );
        let reviews = reviews_from_dom(&doc, &SelectorConfig::default(), 5);
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].rating, "");
        assert_eq!(reviews[0].author, "");
    }

    #[test]
    fn test_image_tags_limit_and_lazy_attrs() {
        let doc = Html::parse_document(
            r#"
            <img data-src="/lazy.jpg">
            <img src="/1.jpg"><img src="/2.jpg"><img src="/3.jpg">
            "#,
        );
        let attrs = SelectorConfig::default().image_attrs;
        assert_eq!(
            image_tags(&doc, &attrs, 2),
            vec!["/lazy.jpg".to_string(), "/1.jpg".to_string()]
        );
    }

    #[test]
    fn test_rating_from_dom_page_text() {
        let doc = Html::parse_document("<p>Customers rate this 4.6/5 overall</p>");
        assert_eq!(rating_from_dom(&doc), Some(4.6));

        let doc = Html::parse_document("<p>No ratings yet</p>");
        assert_eq!(rating_from_dom(&doc), None);
    }
}
