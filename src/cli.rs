use anyhow::Context as _;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::engine::{write_report, Scraper};
use crate::sink::{CsvSink, JsonLinesSink, RecordSink};
use crate::tools::fetch::{FetchConfig, HttpNavigator, Navigator};
use crate::types::{ScrapeOptions, ScrapeReport};

#[derive(Parser, Debug)]
#[command(name = "shelfscrape", version, about = "Extract product records from e-commerce pages")]
pub struct Cli {
    /// Listing or product page to start from.
    pub url: String,

    /// Output file. `-` writes to stdout.
    #[arg(short, long, default_value = "products.csv")]
    pub out: PathBuf,

    /// Write JSON lines instead of CSV.
    #[arg(long)]
    pub json: bool,

    /// JSON file with `scrape` and `fetch` sections; flags below override it.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub max_products: Option<usize>,

    #[arg(long)]
    pub max_reviews: Option<usize>,

    /// Pause between product page visits.
    #[arg(long)]
    pub delay_ms: Option<u64>,

    #[arg(long)]
    pub timeout_ms: Option<u64>,

    #[arg(long)]
    pub user_agent: Option<String>,

    /// Ask for a visible browser session where the navigator supports one.
    #[arg(long)]
    pub headed: bool,
}

/// Contents of a `--config` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub scrape: ScrapeOptions,
    pub fetch: FetchConfig,
}

impl RunConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn resolve(&self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        if let Some(max) = self.max_products {
            config.scrape = config.scrape.with_max_products(max);
        }
        if let Some(max) = self.max_reviews {
            config.scrape = config.scrape.with_max_reviews(max);
        }
        if let Some(ms) = self.delay_ms {
            config.scrape = config.scrape.with_page_delay_ms(ms);
        }
        if let Some(ms) = self.timeout_ms {
            config.fetch = config.fetch.with_timeout_ms(ms);
        }
        if let Some(ua) = &self.user_agent {
            config.fetch = config.fetch.with_user_agent(ua.clone());
        }
        if self.headed {
            config.fetch = config.fetch.with_headless(false);
        }
        Ok(config)
    }

    fn open_sink(&self) -> anyhow::Result<Box<dyn RecordSink>> {
        let writer: Box<dyn std::io::Write> = if self.out.as_os_str() == "-" {
            Box::new(std::io::stdout().lock())
        } else {
            let file = std::fs::File::create(&self.out)
                .with_context(|| format!("creating {}", self.out.display()))?;
            Box::new(std::io::BufWriter::new(file))
        };
        Ok(if self.json {
            Box::new(JsonLinesSink::new(writer))
        } else {
            Box::new(CsvSink::new(writer))
        })
    }
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve()?;

    let navigator = HttpNavigator::new(config.fetch)?;
    let report = execute(&cli, navigator, config.scrape).await?;

    eprintln!(
        "{:?} page: {} record(s), {} failed card visit(s)",
        report.kind,
        report.records.len(),
        report.failed_links.len()
    );
    Ok(())
}

/// Scrape `cli.url` and write the records. The output is only opened once
/// the scrape has succeeded, so a failed seed leaves any existing file alone.
pub async fn execute<N: Navigator>(
    cli: &Cli,
    navigator: N,
    options: ScrapeOptions,
) -> anyhow::Result<ScrapeReport> {
    let scraper = Scraper::new(navigator, options);
    let report = scraper.scrape(&cli.url).await?;

    let mut sink = cli.open_sink()?;
    write_report(&report, sink.as_mut())?;
    Ok(report)
}
