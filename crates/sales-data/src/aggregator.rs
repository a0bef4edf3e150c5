//! Group-by aggregation over cleaned sales records.
//!
//! All sums are plain `f64` accumulations and are returned unrounded;
//! rounding is a display concern.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use sales_core::models::{
    ArticleFilter, ArticleSales, ArticleShare, DailySales, Record, SalesTotals, TicketCount,
};

// ── SalesAggregator ───────────────────────────────────────────────────────────

/// Stateless helper computing totals and rollups over a record slice.
pub struct SalesAggregator;

impl SalesAggregator {
    /// Totals over every record.
    pub fn totals(records: &[Record]) -> SalesTotals {
        Self::totals_where(records, |_| true)
    }

    /// Totals over the records whose article is in `filter`.
    ///
    /// An empty filter selects nothing, so every total is zero.
    pub fn filtered_totals(records: &[Record], filter: &ArticleFilter) -> SalesTotals {
        if filter.is_empty() {
            return SalesTotals::default();
        }
        Self::totals_where(records, |r| filter.contains(r.article()))
    }

    /// Sum of sales per article, highest first, with the `trim_bottom`
    /// lowest-selling articles removed.
    ///
    /// Ties are ordered by article name. Fewer than `trim_bottom` articles
    /// yields an empty ranking.
    pub fn article_ranking(records: &[Record], trim_bottom: usize) -> Vec<ArticleSales> {
        let mut sums: HashMap<&str, f64> = HashMap::new();
        for record in records {
            *sums.entry(record.article()).or_insert(0.0) += record.sales();
        }

        let mut ranking: Vec<ArticleSales> = sums
            .into_iter()
            .map(|(article, sales)| ArticleSales {
                article: article.to_string(),
                sales,
            })
            .collect();
        ranking.sort_by(|a, b| {
            b.sales
                .partial_cmp(&a.sales)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.article.cmp(&b.article))
        });

        let keep = ranking.len().saturating_sub(trim_bottom);
        ranking.truncate(keep);
        ranking
    }

    /// Keep only the ranking entries whose article is in `filter`, preserving
    /// the ranking order.
    pub fn restrict_ranking(ranking: &[ArticleSales], filter: &ArticleFilter) -> Vec<ArticleSales> {
        ranking
            .iter()
            .filter(|entry| filter.contains(&entry.article))
            .cloned()
            .collect()
    }

    /// Each entry's percentage of the summed sales in `ranking`.
    ///
    /// A zero total gives every entry a zero share.
    pub fn article_shares(ranking: &[ArticleSales]) -> Vec<ArticleShare> {
        let total: f64 = ranking.iter().map(|e| e.sales).sum();
        ranking
            .iter()
            .map(|e| ArticleShare {
                article: e.article.clone(),
                sales: e.sales,
                percentage: if total > 0.0 {
                    e.sales / total * 100.0
                } else {
                    0.0
                },
            })
            .collect()
    }

    /// Sum of sales per calendar day in ascending date order.
    pub fn daily_sales(records: &[Record]) -> Vec<DailySales> {
        let mut map = BTreeMap::new();
        for record in records {
            *map.entry(record.date()).or_insert(0.0) += record.sales();
        }
        map.into_iter()
            .map(|(date, sales)| DailySales { date, sales })
            .collect()
    }

    /// The `n` most frequent ticket numbers, by record count descending.
    ///
    /// Ties keep the order in which tickets first appear.
    pub fn top_tickets(records: &[Record], n: usize) -> Vec<TicketCount> {
        // ticket -> (first position, count)
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (pos, record) in records.iter().enumerate() {
            counts.entry(record.ticket_number()).or_insert((pos, 0)).1 += 1;
        }

        let mut tickets: Vec<(&str, usize, usize)> = counts
            .into_iter()
            .map(|(ticket, (first, count))| (ticket, first, count))
            .collect();
        tickets.sort_by(|a, b| b.2.cmp(&a.2).then(a.1.cmp(&b.1)));

        tickets
            .into_iter()
            .take(n)
            .map(|(ticket, _, count)| TicketCount {
                ticket_number: ticket.to_string(),
                count,
            })
            .collect()
    }

    // ── Private ───────────────────────────────────────────────────────────────

    fn totals_where(records: &[Record], keep: impl Fn(&Record) -> bool) -> SalesTotals {
        let mut totals = SalesTotals::default();
        let mut articles: HashSet<&str> = HashSet::new();
        for record in records.iter().filter(|r| keep(r)) {
            totals.sales += record.sales();
            totals.quantity += record.quantity();
            totals.records += 1;
            articles.insert(record.article());
        }
        totals.distinct_articles = articles.len();
        totals
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_record(date: &str, ticket: &str, article: &str, qty: f64, price: f64) -> Record {
        Record::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            None,
            ticket,
            article,
            qty,
            price,
        )
    }

    fn sample_records() -> Vec<Record> {
        vec![
            make_record("2021-01-02", "1", "BAGUETTE", 2.0, 1.20),
            make_record("2021-01-02", "2", "CROISSANT", 1.0, 1.10),
        ]
    }

    /// Five articles with distinct sales totals spread over three days.
    fn bakery_records() -> Vec<Record> {
        vec![
            make_record("2021-01-03", "10", "TRADITIONAL BAGUETTE", 10.0, 1.20),
            make_record("2021-01-02", "10", "CROISSANT", 4.0, 1.10),
            make_record("2021-01-02", "11", "PAIN AU CHOCOLAT", 3.0, 1.20),
            make_record("2021-01-04", "11", "COOKIE", 1.0, 0.65),
            make_record("2021-01-04", "12", "COUPE", 2.0, 0.15),
            make_record("2021-01-03", "10", "CROISSANT", 1.0, 1.10),
        ]
    }

    // ── totals ────────────────────────────────────────────────────────────────

    #[test]
    fn test_totals_end_to_end() {
        let totals = SalesAggregator::totals(&sample_records());
        assert!((totals.sales - 3.50).abs() < 1e-9);
        assert_eq!(totals.quantity, 3.0);
        assert_eq!(totals.distinct_articles, 2);
        assert_eq!(totals.records, 2);
    }

    #[test]
    fn test_totals_empty() {
        let totals = SalesAggregator::totals(&[]);
        assert_eq!(totals, SalesTotals::default());
    }

    // ── filtered_totals ───────────────────────────────────────────────────────

    #[test]
    fn test_filtered_totals_single_article() {
        let filter = ArticleFilter::new(["BAGUETTE"]);
        let totals = SalesAggregator::filtered_totals(&sample_records(), &filter);
        assert!((totals.sales - 2.40).abs() < 1e-9);
        assert_eq!(totals.quantity, 2.0);
        assert_eq!(totals.distinct_articles, 1);
    }

    #[test]
    fn test_filtered_totals_empty_filter_is_zero() {
        let totals = SalesAggregator::filtered_totals(&sample_records(), &ArticleFilter::default());
        assert_eq!(totals.sales, 0.0);
        assert_eq!(totals.quantity, 0.0);
        assert_eq!(totals.distinct_articles, 0);
    }

    #[test]
    fn test_filtered_totals_unknown_article() {
        let filter = ArticleFilter::new(["ECLAIR"]);
        let totals = SalesAggregator::filtered_totals(&sample_records(), &filter);
        assert_eq!(totals.records, 0);
    }

    #[test]
    fn test_total_quantity_unaffected_by_filter() {
        let records = bakery_records();
        let before = SalesAggregator::totals(&records).quantity;
        let _ = SalesAggregator::filtered_totals(&records, &ArticleFilter::new(["COOKIE"]));
        let after = SalesAggregator::totals(&records).quantity;
        assert_eq!(before, after);
    }

    // ── article_ranking ───────────────────────────────────────────────────────

    #[test]
    fn test_ranking_drops_bottom_three() {
        let records = bakery_records();
        let distinct = SalesAggregator::totals(&records).distinct_articles;
        let ranking = SalesAggregator::article_ranking(&records, 3);

        assert_eq!(ranking.len(), distinct - 3);
        assert_eq!(ranking[0].article, "TRADITIONAL BAGUETTE");
        assert!((ranking[0].sales - 12.0).abs() < 1e-9);
        assert_eq!(ranking[1].article, "CROISSANT");
        assert!((ranking[1].sales - 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_ranking_sorted_descending() {
        let ranking = SalesAggregator::article_ranking(&bakery_records(), 0);
        assert_eq!(ranking.len(), 5);
        assert!(ranking.windows(2).all(|w| w[0].sales >= w[1].sales));
        assert_eq!(ranking.last().unwrap().article, "COUPE");
    }

    #[test]
    fn test_ranking_fewer_articles_than_trim_is_empty() {
        assert!(SalesAggregator::article_ranking(&sample_records(), 3).is_empty());
    }

    #[test]
    fn test_ranking_ties_ordered_by_name() {
        let records = vec![
            make_record("2021-01-02", "1", "PAIN", 1.0, 1.0),
            make_record("2021-01-02", "2", "COUPE", 1.0, 1.0),
        ];
        let ranking = SalesAggregator::article_ranking(&records, 0);
        assert_eq!(ranking[0].article, "COUPE");
        assert_eq!(ranking[1].article, "PAIN");
    }

    #[test]
    fn test_restrict_ranking_applies_after_trim() {
        let ranking = SalesAggregator::article_ranking(&bakery_records(), 3);
        // COOKIE was trimmed from the ranking, so selecting it adds nothing.
        let filter = ArticleFilter::new(["COOKIE", "CROISSANT"]);
        let restricted = SalesAggregator::restrict_ranking(&ranking, &filter);
        assert_eq!(restricted.len(), 1);
        assert_eq!(restricted[0].article, "CROISSANT");
    }

    // ── article_shares ────────────────────────────────────────────────────────

    #[test]
    fn test_article_shares_sum_to_hundred() {
        let ranking = SalesAggregator::article_ranking(&bakery_records(), 3);
        let shares = SalesAggregator::article_shares(&ranking);
        let total: f64 = shares.iter().map(|s| s.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert!((shares[0].percentage - 12.0 / 17.5 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_article_shares_zero_total() {
        let ranking = vec![ArticleSales {
            article: "COUPE".to_string(),
            sales: 0.0,
        }];
        let shares = SalesAggregator::article_shares(&ranking);
        assert_eq!(shares[0].percentage, 0.0);
    }

    // ── daily_sales ───────────────────────────────────────────────────────────

    #[test]
    fn test_daily_sales_sorted_by_date() {
        let daily = SalesAggregator::daily_sales(&bakery_records());
        let dates: Vec<String> = daily.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, vec!["2021-01-02", "2021-01-03", "2021-01-04"]);
        // 4 * 1.10 + 3 * 1.20
        assert!((daily[0].sales - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_daily_sales_empty() {
        assert!(SalesAggregator::daily_sales(&[]).is_empty());
    }

    // ── top_tickets ───────────────────────────────────────────────────────────

    #[test]
    fn test_top_tickets_by_frequency() {
        let tickets = SalesAggregator::top_tickets(&bakery_records(), 10);
        assert_eq!(tickets.len(), 3);
        assert_eq!(tickets[0].ticket_number, "10");
        assert_eq!(tickets[0].count, 3);
        assert_eq!(tickets[1].ticket_number, "11");
        assert_eq!(tickets[2].ticket_number, "12");
    }

    #[test]
    fn test_top_tickets_ties_keep_first_appearance() {
        let records = vec![
            make_record("2021-01-02", "B", "PAIN", 1.0, 1.0),
            make_record("2021-01-02", "A", "PAIN", 1.0, 1.0),
            make_record("2021-01-02", "C", "PAIN", 1.0, 1.0),
        ];
        let tickets = SalesAggregator::top_tickets(&records, 2);
        let ids: Vec<&str> = tickets.iter().map(|t| t.ticket_number.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }
}
