//! Summary pipeline for the sales dashboard.
//!
//! Runs every aggregation the dashboard shows over one dataset and article
//! selection, returning a [`SalesSummary`] ready for the UI layer.

use std::time::Instant;

use chrono::Utc;
use sales_core::error::{Result, SalesError};
use sales_core::models::{
    ArticleFilter, ArticleSales, ArticleShare, DailySales, SalesTotals, TicketCount,
};
use sales_core::settings::{DEFAULT_TOP_TICKETS, DEFAULT_TRIM_BOTTOM};
use serde::Serialize;

use crate::aggregator::SalesAggregator;
use crate::dataset::Dataset;

// ── Public types ──────────────────────────────────────────────────────────────

/// Knobs for [`summarize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryConfig {
    /// Lowest-selling articles dropped from the per-article ranking.
    pub trim_bottom: usize,
    /// Number of most frequent tickets to report.
    pub top_tickets: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            trim_bottom: DEFAULT_TRIM_BOTTOM,
            top_tickets: DEFAULT_TOP_TICKETS,
        }
    }
}

/// Metadata produced alongside the summary.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryMetadata {
    /// ISO-8601 timestamp when this summary was generated.
    pub generated_at: String,
    /// Records the summary was computed over.
    pub records_processed: usize,
    /// Articles in the selection at the time of computation.
    pub selected_articles: Vec<String>,
    /// Wall-clock seconds spent aggregating.
    pub compute_time_seconds: f64,
}

/// Every aggregate the dashboard displays for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct SalesSummary {
    /// Totals over the unfiltered record set.
    pub totals: SalesTotals,
    /// Totals over the selected articles. All zero when the selection is empty.
    pub filtered: SalesTotals,
    /// `true` when no article is selected.
    pub empty_selection: bool,
    /// Per-article sales, descending, bottom articles trimmed.
    pub ranking: Vec<ArticleSales>,
    /// `ranking` restricted to the selection.
    pub filtered_ranking: Vec<ArticleSales>,
    /// Percentage of each `filtered_ranking` entry.
    pub shares: Vec<ArticleShare>,
    /// Sales per day over the unfiltered set, ascending.
    pub daily: Vec<DailySales>,
    /// Most frequent tickets, for the ticket selector.
    pub top_tickets: Vec<TicketCount>,
    pub metadata: SummaryMetadata,
}

impl SalesSummary {
    /// The filtered totals, or [`SalesError::EmptySelection`] when nothing is
    /// selected.
    pub fn require_selection(&self) -> Result<&SalesTotals> {
        if self.empty_selection {
            return Err(SalesError::EmptySelection);
        }
        Ok(&self.filtered)
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Compute the full summary for `dataset` under `filter`.
pub fn summarize(dataset: &Dataset, filter: &ArticleFilter, config: SummaryConfig) -> SalesSummary {
    let start = Instant::now();
    let records = dataset.records();

    let totals = SalesAggregator::totals(records);
    let filtered = SalesAggregator::filtered_totals(records, filter);
    let ranking = SalesAggregator::article_ranking(records, config.trim_bottom);
    let filtered_ranking = SalesAggregator::restrict_ranking(&ranking, filter);
    let shares = SalesAggregator::article_shares(&filtered_ranking);
    let daily = SalesAggregator::daily_sales(records);
    let top_tickets = SalesAggregator::top_tickets(records, config.top_tickets);

    let metadata = SummaryMetadata {
        generated_at: Utc::now().to_rfc3339(),
        records_processed: records.len(),
        selected_articles: filter.articles().to_vec(),
        compute_time_seconds: start.elapsed().as_secs_f64(),
    };

    tracing::debug!(
        records = records.len(),
        selected = filter.len(),
        ranked = ranking.len(),
        "summary recomputed"
    );

    SalesSummary {
        totals,
        filtered,
        empty_selection: filter.is_empty(),
        ranking,
        filtered_ranking,
        shares,
        daily,
        top_tickets,
        metadata,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sales_core::error::ErrorKind;
    use sales_core::models::Record;

    fn make_record(day: u32, ticket: &str, article: &str, qty: f64, price: f64) -> Record {
        let date = NaiveDate::from_ymd_opt(2021, 1, day).unwrap();
        Record::new(date, None, ticket, article, qty, price)
    }

    fn end_to_end_dataset() -> Dataset {
        Dataset::from_records(
            "sales.csv",
            vec![
                make_record(2, "1", "BAGUETTE", 2.0, 1.20),
                make_record(2, "2", "CROISSANT", 1.0, 1.10),
            ],
        )
    }

    fn wide_dataset() -> Dataset {
        Dataset::from_records(
            "sales.csv",
            vec![
                make_record(2, "1", "TRADITIONAL BAGUETTE", 10.0, 1.20),
                make_record(2, "1", "CROISSANT", 4.0, 1.10),
                make_record(3, "2", "PAIN AU CHOCOLAT", 3.0, 1.20),
                make_record(3, "2", "COOKIE", 1.0, 0.65),
                make_record(4, "3", "COUPE", 2.0, 0.15),
            ],
        )
    }

    // ── summarize ─────────────────────────────────────────────────────────────

    #[test]
    fn test_summarize_end_to_end() {
        let dataset = end_to_end_dataset();
        let filter = ArticleFilter::new(["BAGUETTE"]);
        let summary = summarize(&dataset, &filter, SummaryConfig::default());

        assert!((summary.totals.sales - 3.50).abs() < 1e-9);
        assert!((summary.filtered.sales - 2.40).abs() < 1e-9);
        assert_eq!(summary.filtered.quantity, 2.0);
        assert!(!summary.empty_selection);
        // Only two articles, so the bottom-3 trim empties the ranking.
        assert!(summary.ranking.is_empty());
        assert!(summary.shares.is_empty());
        assert_eq!(summary.daily.len(), 1);
        assert_eq!(summary.metadata.selected_articles, vec!["BAGUETTE"]);
    }

    #[test]
    fn test_summarize_empty_selection() {
        let summary =
            summarize(&wide_dataset(), &ArticleFilter::default(), SummaryConfig::default());

        assert!(summary.empty_selection);
        assert_eq!(summary.filtered.sales, 0.0);
        assert_eq!(summary.filtered.quantity, 0.0);
        assert!(summary.filtered_ranking.is_empty());

        let err = summary.require_selection().unwrap_err();
        assert!(matches!(err, SalesError::EmptySelection));
        assert_eq!(err.kind(), ErrorKind::EmptySelection);
    }

    #[test]
    fn test_summarize_shares_follow_filtered_ranking() {
        let filter = ArticleFilter::new(["CROISSANT", "TRADITIONAL BAGUETTE"]);
        let summary = summarize(&wide_dataset(), &filter, SummaryConfig::default());

        assert_eq!(summary.ranking.len(), 2);
        let labels: Vec<&str> = summary.shares.iter().map(|s| s.article.as_str()).collect();
        assert_eq!(labels, vec!["TRADITIONAL BAGUETTE", "CROISSANT"]);
        assert!(summary.require_selection().is_ok());
    }

    #[test]
    fn test_summarize_custom_trim_and_tickets() {
        let config = SummaryConfig {
            trim_bottom: 0,
            top_tickets: 2,
        };
        let summary = summarize(&wide_dataset(), &ArticleFilter::default(), config);
        assert_eq!(summary.ranking.len(), 5);
        assert_eq!(summary.top_tickets.len(), 2);
    }

    #[test]
    fn test_summarize_total_quantity_independent_of_filter() {
        let dataset = wide_dataset();
        let none = summarize(&dataset, &ArticleFilter::default(), SummaryConfig::default());
        let some = summarize(&dataset, &ArticleFilter::new(["COUPE"]), SummaryConfig::default());
        assert_eq!(none.totals.quantity, some.totals.quantity);
    }

    #[test]
    fn test_summary_serializes_to_json() {
        let summary = summarize(
            &end_to_end_dataset(),
            &ArticleFilter::default(),
            SummaryConfig::default(),
        );
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["empty_selection"], true);
        assert_eq!(json["daily"][0]["date"], "2021-01-02");
    }
}
