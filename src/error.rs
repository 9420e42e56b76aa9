use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// The seed page could not be rendered; no records exist for the run.
    #[error("seed page {url} could not be loaded: {source}")]
    SeedFetch {
        url: String,
        #[source]
        source: Box<ScrapeError>,
    },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    pub fn navigation(url: impl Into<String>, reason: impl Into<String>) -> Self {
        ScrapeError::Navigation {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn seed(url: impl Into<String>, source: ScrapeError) -> Self {
        ScrapeError::SeedFetch {
            url: url.into(),
            source: Box::new(source),
        }
    }

    /// True when the error came from loading the seed URL.
    pub fn is_seed_failure(&self) -> bool {
        matches!(self, ScrapeError::SeedFetch { .. })
    }
}
