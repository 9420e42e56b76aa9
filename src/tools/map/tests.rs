#[cfg(test)]
mod tests {
    use crate::tools::map::utils::*;
    use crate::tools::map::*;
    use crate::types::{PageKind, ScrapeOptions, SelectorConfig};
    use scraper::Html;
    use url::Url;

    fn base() -> Url {
        Url::parse("https://shop.example.com/c/mugs?page=2").unwrap()
    }

    fn listing(n: usize) -> String {
        let cards: String = (1..=n)
            .map(|i| {
                format!(
                    r#"<li class="product-base">
                        <a href="/p/mug-{i}"><img src="/img/{i}.jpg"></a>
                        <h3>Mug {i}</h3>
                        <span class="price">${i}0.00</span>
                    </li>"#
                )
            })
            .collect();
        format!("<html><body><ul>{cards}</ul></body></html>")
    }

    #[test]
    fn test_extract_listing_cards_fields() {
        let cards = extract_listing_cards(&listing(2), &base(), &SelectorConfig::default());
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name, "Mug 1");
        assert_eq!(cards[0].link, "https://shop.example.com/p/mug-1");
        assert_eq!(cards[0].price, "$10.00");
        assert_eq!(cards[0].image, "https://shop.example.com/img/1.jpg");
    }

    #[test]
    fn test_anchor_card_uses_own_href() {
        let html = r#"
            <a class="product-card" href="'/p/quoted'"><h4>Quoted</h4><a href="/p/inner">x</a></a>
        "#;
        let doc = Html::parse_document(html);
        let sel = scraper::Selector::parse("a.product-card").unwrap();
        let card = doc.select(&sel).next().unwrap();
        assert_eq!(
            card_link(&card, &base()),
            Some("https://shop.example.com/p/quoted".to_string())
        );
    }

    #[test]
    fn test_linkless_and_duplicate_cards_dropped() {
        let html = r#"
            <div class="product"><a href="/p/a">A</a></div>
            <div class="product"><span>No link</span></div>
            <div class="product"><a href="/p/a#reviews">A again</a></div>
            <div class="product"><a href="/p/a">A third time</a></div>
            <div class="product"><a href="javascript:void(0)">Bad</a></div>
        "#;
        let cards = extract_listing_cards(html, &base(), &SelectorConfig::default());
        let links: Vec<_> = cards.iter().map(|c| c.link.as_str()).collect();
        assert_eq!(
            links,
            vec![
                "https://shop.example.com/p/a",
                "https://shop.example.com/p/a#reviews",
            ]
        );
    }

    #[test]
    fn test_first_matching_selector_wins() {
        let html = r#"
            <li class="product-base"><a href="/p/1">One</a></li>
            <div class="product"><a href="/p/2">Two</a></div>
            <div class="product"><a href="/p/3">Three</a></div>
        "#;
        let cards = extract_listing_cards(html, &base(), &SelectorConfig::default());
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].link, "https://shop.example.com/p/1");
    }

    #[test]
    fn test_classify_page_boundary() {
        let four = extract_listing_cards(&listing(4), &base(), &SelectorConfig::default());
        let three = extract_listing_cards(&listing(3), &base(), &SelectorConfig::default());
        assert_eq!(classify_page(&four, 4), PageKind::Listing);
        assert_eq!(classify_page(&three, 4), PageKind::Detail);
        assert_eq!(classify_page(&[], 4), PageKind::Detail);
    }

    #[test]
    fn test_inspect_page_listing_and_detail() {
        let options = ScrapeOptions::default();
        match inspect_page(&listing(5), &base(), &options) {
            InspectedPage::Listing(cards) => assert_eq!(cards.len(), 5),
            other => panic!("expected listing, got {other:?}"),
        }

        let detail = r#"<html><body><h1>Single Mug</h1></body></html>"#;
        let page = inspect_page(detail, &base(), &options);
        assert_eq!(page.kind(), PageKind::Detail);
        if let InspectedPage::Detail(record) = page {
            assert_eq!(record.name, "Single Mug");
        }
    }

    #[test]
    fn test_listing_threshold_override() {
        let options = ScrapeOptions::default().with_listing_threshold(2);
        let page = inspect_page(&listing(2), &base(), &options);
        assert_eq!(page.kind(), PageKind::Listing);
    }
}
