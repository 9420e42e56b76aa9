//! Output sinks for scraped records.

use crate::error::{Result, ScrapeError};
use crate::types::ProductRecord;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column order of tabular output.
pub const COLUMNS: [&str; 10] = [
    "name",
    "brand",
    "price",
    "link",
    "image",
    "description",
    "breadcrumbs",
    "rating",
    "review_count",
    "reviews",
];

/// One flat output row. Field order is the column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRow {
    pub name: String,
    pub brand: String,
    pub price: String,
    pub link: String,
    /// Image URLs joined with `", "`.
    pub image: String,
    pub description: String,
    pub breadcrumbs: String,
    pub rating: String,
    pub review_count: String,
    /// Serialized reviews, `author|rating|body` joined by `" || "`.
    pub reviews: String,
}

impl From<&ProductRecord> for ProductRow {
    fn from(record: &ProductRecord) -> Self {
        Self {
            name: record.name.clone(),
            brand: record.brand.clone(),
            price: record.price.clone(),
            link: record.link.clone(),
            image: record.images.join(", "),
            description: record.description.clone(),
            breadcrumbs: record.breadcrumbs.clone(),
            rating: record.rating.clone(),
            review_count: record.review_count.clone(),
            reviews: record.serialized_reviews(),
        }
    }
}

/// Receives records in visitation order.
pub trait RecordSink {
    fn write_record(&mut self, record: &ProductRecord) -> Result<()>;

    /// Flush buffered output. Called once after the last record.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// CSV with a header row in [`COLUMNS`] order.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
    header_written: bool,
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
            rows: 0,
            header_written: false,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.finish()?;
        self.writer
            .into_inner()
            .map_err(|e| ScrapeError::Io(e.into_error()))
    }
}

impl CsvSink<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_record(&mut self, record: &ProductRecord) -> Result<()> {
        self.writer.serialize(ProductRow::from(record))?;
        self.rows += 1;
        self.header_written = true;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        // serialize() only emits the header alongside the first row
        if !self.header_written {
            self.writer.write_record(COLUMNS)?;
            self.header_written = true;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// One JSON object per line, with reviews and images kept structured.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn write_record(&mut self, record: &ProductRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Collects records in memory.
impl RecordSink for Vec<ProductRecord> {
    fn write_record(&mut self, record: &ProductRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Review;

    fn record() -> ProductRecord {
        ProductRecord {
            name: "Mug, large".into(),
            brand: "Kiln".into(),
            price: "24.00".into(),
            link: "https://shop.example.com/p/1".into(),
            images: vec!["https://a/1.jpg".into(), "https://a/2.jpg".into()],
            rating: "4.5/5".into(),
            review_count: "3".into(),
            reviews: vec![
                Review {
                    author: "Ana".into(),
                    rating: "5.0/5".into(),
                    body: "Great".into(),
                },
                Review {
                    author: "".into(),
                    rating: "".into(),
                    body: "Fine".into(),
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn csv_header_follows_column_order() {
        let mut sink = CsvSink::new(Vec::new());
        sink.write_record(&record()).unwrap();
        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some(COLUMNS.join(",").as_str()));
        let row = lines.next().unwrap();
        assert!(row.starts_with("\"Mug, large\",Kiln,24.00,https://shop.example.com/p/1,"));
        assert!(row.contains("\"https://a/1.jpg, https://a/2.jpg\""));
        assert!(row.ends_with("4.5/5,3,Ana|5.0/5|Great || |Fine"));
    }

    #[test]
    fn csv_empty_run_still_has_header() {
        let sink = CsvSink::new(Vec::new());
        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(out.trim_end(), COLUMNS.join(","));
    }

    #[test]
    fn json_lines_one_object_per_record() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.write_record(&record()).unwrap();
        sink.write_record(&ProductRecord::default()).unwrap();
        sink.finish().unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: ProductRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, record());
    }

    #[test]
    fn product_row_joins_images_and_reviews() {
        let row = ProductRow::from(&record());
        assert_eq!(row.image, "https://a/1.jpg, https://a/2.jpg");
        assert_eq!(row.reviews, "Ana|5.0/5|Great || |Fine");
    }
}
