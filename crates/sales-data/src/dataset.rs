//! The cleaned, immutable record set for one input file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use sales_core::error::Result;
use sales_core::models::Record;
use serde::Serialize;

use crate::reader::load_records;

/// Metadata produced alongside a loaded dataset.
#[derive(Debug, Clone, Serialize)]
pub struct LoadMetadata {
    /// ISO-8601 timestamp when the file was loaded.
    pub loaded_at: String,
    /// Number of cleaned records.
    pub rows: usize,
    /// Wall-clock seconds spent reading and cleaning the file.
    pub load_time_seconds: f64,
}

/// Cleaned records plus the article list derived from them.
///
/// Never mutated after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: PathBuf,
    records: Vec<Record>,
    articles: Vec<String>,
    metadata: LoadMetadata,
}

impl Dataset {
    /// Read and clean the CSV at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let start = Instant::now();
        let records = load_records(path)?;
        let elapsed = start.elapsed().as_secs_f64();

        let mut dataset = Self::from_records(path, records);
        dataset.metadata.load_time_seconds = elapsed;

        tracing::info!(
            rows = dataset.metadata.rows,
            articles = dataset.articles.len(),
            seconds = elapsed,
            "loaded {}",
            path.display()
        );
        Ok(dataset)
    }

    /// Wrap already-cleaned records.
    pub fn from_records(source: impl Into<PathBuf>, records: Vec<Record>) -> Self {
        let articles = unique_articles(&records);
        let metadata = LoadMetadata {
            loaded_at: Utc::now().to_rfc3339(),
            rows: records.len(),
            load_time_seconds: 0.0,
        };
        Self {
            source: source.into(),
            records,
            articles,
            metadata,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Distinct articles in order of first appearance.
    pub fn articles(&self) -> &[String] {
        &self.articles
    }

    pub fn metadata(&self) -> &LoadMetadata {
        &self.metadata
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first `n` records, for the data preview table.
    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }
}

fn unique_articles(records: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.article()))
        .map(|r| r.article().to_string())
        .collect()
}
