#![doc = include_str!("../README.md")]

#[macro_use]
mod macros;

pub mod cli;
pub mod engine;
pub mod error;
pub mod selectors;
pub mod sink;
pub mod tools;
pub mod types;


pub use engine::Scraper;
pub use error::{Result, ScrapeError};
pub use sink::{CsvSink, JsonLinesSink, ProductRow, RecordSink};
pub use tools::fetch::{FetchConfig, HttpNavigator, Navigator};
pub use tools::map::InspectedPage;
pub use types::*;
