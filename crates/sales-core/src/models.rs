use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One cleaned transaction line: a single article sold within a ticket.
///
/// Fields are private so that `sales` can only be produced by [`Record::new`],
/// which keeps it equal to `quantity * unit_price`. Deserialization goes
/// through the same constructor; a serialized `sales` value is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecordFields")]
pub struct Record {
    date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time: Option<NaiveTime>,
    ticket_number: String,
    article: String,
    quantity: f64,
    unit_price: f64,
    sales: f64,
}

impl Record {
    /// Build a record and derive its `sales` value.
    pub fn new(
        date: NaiveDate,
        time: Option<NaiveTime>,
        ticket_number: impl Into<String>,
        article: impl Into<String>,
        quantity: f64,
        unit_price: f64,
    ) -> Self {
        Self {
            date,
            time,
            ticket_number: ticket_number.into(),
            article: article.into(),
            quantity,
            unit_price,
            sales: quantity * unit_price,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    /// Opaque ticket label. Never interpreted as a number.
    pub fn ticket_number(&self) -> &str {
        &self.ticket_number
    }

    pub fn article(&self) -> &str {
        &self.article
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    /// Revenue for this line, `quantity * unit_price`.
    pub fn sales(&self) -> f64 {
        self.sales
    }
}

/// Serialized form of a [`Record`] without the derived `sales`.
#[derive(Deserialize)]
struct RecordFields {
    date: NaiveDate,
    #[serde(default)]
    time: Option<NaiveTime>,
    ticket_number: String,
    article: String,
    quantity: f64,
    unit_price: f64,
}

impl From<RecordFields> for Record {
    fn from(f: RecordFields) -> Self {
        Record::new(f.date, f.time, f.ticket_number, f.article, f.quantity, f.unit_price)
    }
}

// ── ArticleFilter ─────────────────────────────────────────────────────────────

/// The user-chosen subset of articles restricting filtered aggregates.
///
/// Keeps the selection order for display while membership checks go through
/// an ordered set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArticleFilter {
    selected: Vec<String>,
    #[serde(skip)]
    lookup: BTreeSet<String>,
}

impl ArticleFilter {
    /// Build a filter from article names, dropping duplicates.
    pub fn new<I, S>(articles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut filter = Self::default();
        for article in articles {
            filter.insert(article.into());
        }
        filter
    }

    /// `true` when no article is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn contains(&self, article: &str) -> bool {
        self.lookup.contains(article)
    }

    /// Selected articles in the order they were chosen.
    pub fn articles(&self) -> &[String] {
        &self.selected
    }

    /// Add `article`; returns `false` when it was already selected.
    pub fn insert(&mut self, article: String) -> bool {
        if !self.lookup.insert(article.clone()) {
            return false;
        }
        self.selected.push(article);
        true
    }

    /// Remove `article`; returns `false` when it was not selected.
    pub fn remove(&mut self, article: &str) -> bool {
        if !self.lookup.remove(article) {
            return false;
        }
        self.selected.retain(|a| a != article);
        true
    }

    /// Select `article` when absent, deselect it otherwise.
    pub fn toggle(&mut self, article: &str) {
        if !self.remove(article) {
            self.insert(article.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.lookup.clear();
    }
}

// ── Aggregate view types ──────────────────────────────────────────────────────

/// Sum of sales, sum of quantity and distinct-article count over a record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesTotals {
    pub sales: f64,
    pub quantity: f64,
    pub distinct_articles: usize,
    /// Number of records that contributed to the totals.
    pub records: usize,
}

/// Summed sales for one article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSales {
    pub article: String,
    pub sales: f64,
}

/// Summed sales for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub sales: f64,
}

/// How many records share one ticket number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketCount {
    pub ticket_number: String,
    pub count: usize,
}

/// An article's portion of the filtered per-article sales, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleShare {
    pub article: String,
    pub sales: f64,
    pub percentage: f64,
}
