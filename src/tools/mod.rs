// Shared types
pub mod types;

// Extraction stages
pub mod clean;
pub mod extract;
pub mod fetch;
pub mod map;
pub mod scrape;
