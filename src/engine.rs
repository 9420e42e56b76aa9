//! Scrape orchestrator: seed page, classification, card enrichment.

use crate::error::{Result, ScrapeError};
use crate::sink::RecordSink;
use crate::tools::extract::extract_product;
use crate::tools::fetch::Navigator;
use crate::tools::map::{inspect_page, InspectedPage};
use crate::types::{ListingCard, ProductRecord, ScrapeOptions, ScrapeReport};
use chrono::Utc;
use std::time::Instant;
use url::Url;

/// Drives one navigator through seed pages, one page at a time.
///
/// A listing seed yields one record per visited card, with listing values
/// folded together with the card's detail page. A detail seed yields a
/// single record. Options are fixed for the lifetime of the scraper.
pub struct Scraper<N: Navigator> {
    navigator: N,
    options: ScrapeOptions,
}

impl<N: Navigator> Scraper<N> {
    pub fn new(navigator: N, options: ScrapeOptions) -> Self {
        Self { navigator, options }
    }

    pub fn options(&self) -> &ScrapeOptions {
        &self.options
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Scrape a seed URL.
    ///
    /// Fails only when the seed URL is invalid or its page cannot be
    /// rendered (`SeedFetch`). Card pages that fail keep their listing data
    /// and are reported in `failed_links`.
    pub async fn scrape(&self, seed_url: &str) -> Result<ScrapeReport> {
        let started_at = Utc::now();
        let start = Instant::now();

        let seed_url = seed_url.trim();
        let seed = Url::parse(seed_url).map_err(|_| ScrapeError::InvalidUrl(seed_url.into()))?;
        if !matches!(seed.scheme(), "http" | "https") {
            return Err(ScrapeError::InvalidUrl(seed_url.into()));
        }

        tracing::info!(url = seed_url, navigator = self.navigator.name(), "scrape started");

        let html = match self
            .navigator
            .render(seed_url, self.options.seed_settle())
            .await
        {
            Ok(html) => html,
            Err(e) => {
                tracing::error!(
                    url = seed_url,
                    "scrape failed in {}ms: {}",
                    start.elapsed().as_millis(),
                    e
                );
                return Err(ScrapeError::seed(seed_url, e));
            }
        };

        let page = inspect_page(&html, &seed, &self.options);
        let kind = page.kind();

        let (records, failed_links) = match page {
            InspectedPage::Listing(cards) => {
                tracing::info!(url = seed_url, cards = cards.len(), "classified as listing");
                self.enrich_cards(&cards).await
            }
            InspectedPage::Detail(record) => {
                tracing::info!(url = seed_url, "classified as detail");
                let record = ProductRecord {
                    link: seed_url.to_string(),
                    ..record
                };
                (vec![record], Vec::new())
            }
        };

        tracing::info!(
            url = seed_url,
            records = records.len(),
            failed = failed_links.len(),
            "scrape succeeded in {}ms",
            start.elapsed().as_millis()
        );

        Ok(ScrapeReport {
            seed_url: seed_url.to_string(),
            kind,
            records,
            failed_links,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Scrape, then hand every record to `sink` in visitation order.
    ///
    /// The sink sees nothing when the scrape fails.
    pub async fn scrape_into<S>(&self, seed_url: &str, sink: &mut S) -> Result<ScrapeReport>
    where
        S: RecordSink + ?Sized,
    {
        let report = self.scrape(seed_url).await?;
        write_report(&report, sink)?;
        Ok(report)
    }

    async fn enrich_cards(&self, cards: &[ListingCard]) -> (Vec<ProductRecord>, Vec<String>) {
        let limit = match self.options.max_products {
            Some(max) if max > 0 => max,
            _ => cards.len(),
        };
        let mut records = Vec::new();
        let mut failed = Vec::new();

        for (i, card) in cards.iter().take(limit).enumerate() {
            if i > 0 && !self.options.page_delay().is_zero() {
                tokio::time::sleep(self.options.page_delay()).await;
            }

            let start = Instant::now();
            let base = ProductRecord::from_card(card);
            match self.visit(card).await {
                Ok(detail) => {
                    tracing::debug!(
                        link = %card.link,
                        "card visit succeeded in {}ms",
                        start.elapsed().as_millis()
                    );
                    records.push(base.merge_detail(detail));
                }
                Err(e) => {
                    tracing::warn!(
                        link = %card.link,
                        "card visit failed in {}ms: {}",
                        start.elapsed().as_millis(),
                        e
                    );
                    failed.push(card.link.clone());
                    records.push(base);
                }
            }
        }

        (records, failed)
    }

    async fn visit(&self, card: &ListingCard) -> Result<ProductRecord> {
        let url = Url::parse(&card.link).map_err(|_| ScrapeError::InvalidUrl(card.link.clone()))?;
        let html = self
            .navigator
            .render(&card.link, self.options.page_settle())
            .await?;
        Ok(extract_product(&html, &url, &self.options))
    }
}

/// Write a finished report's records to `sink`, then finish it.
pub fn write_report<S>(report: &ScrapeReport, sink: &mut S) -> Result<()>
where
    S: RecordSink + ?Sized,
{
    let start = Instant::now();
    for record in &report.records {
        sink.write_record(record)?;
    }
    sink.finish()?;
    tracing::info!(
        rows = report.records.len(),
        "sink write succeeded in {}ms",
        start.elapsed().as_millis()
    );
    Ok(())
}
