//! UI-agnostic dashboard state.
//!
//! [`DashboardState`] owns the loaded dataset, the article selection, the
//! ticket choice and the random sample, and recomputes the [`SalesSummary`]
//! whenever the selection changes. Both the terminal UI and the headless
//! summary view read from it.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sales_core::formatting::{format_two_decimals, format_whole_units};
use sales_core::models::{ArticleFilter, Record};
use sales_core::settings::{
    Settings, DEFAULT_PREVIEW_ROWS, DEFAULT_SAMPLE_SIZE, DEFAULT_TOP_TICKETS, DEFAULT_TRIM_BOTTOM,
};
use sales_data::analysis::{summarize, SalesSummary, SummaryConfig};
use sales_data::dataset::Dataset;

/// Positions of the articles pre-selected when none are given.
const DEFAULT_SELECTION_POSITIONS: [usize; 2] = [0, 20];

// ── DashboardConfig ───────────────────────────────────────────────────────────

/// Sizes and seed controlling what the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub trim_bottom: usize,
    pub top_tickets: usize,
    pub sample_size: usize,
    pub preview_rows: usize,
    /// Fixed seed for the sample RNG; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Articles to select initially; empty means the default selection.
    pub initial_articles: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            trim_bottom: DEFAULT_TRIM_BOTTOM,
            top_tickets: DEFAULT_TOP_TICKETS,
            sample_size: DEFAULT_SAMPLE_SIZE,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            seed: None,
            initial_articles: Vec::new(),
        }
    }
}

impl From<&Settings> for DashboardConfig {
    fn from(s: &Settings) -> Self {
        Self {
            trim_bottom: s.trim_bottom,
            top_tickets: s.top_ticket_count(),
            sample_size: s.sample_size,
            preview_rows: s.preview_rows,
            seed: s.seed,
            initial_articles: s.articles.clone(),
        }
    }
}

impl DashboardConfig {
    fn summary_config(&self) -> SummaryConfig {
        SummaryConfig {
            trim_bottom: self.trim_bottom,
            top_tickets: self.top_tickets,
        }
    }
}

// ── MetricTile ────────────────────────────────────────────────────────────────

/// One headline number with its label, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricTile {
    pub label: &'static str,
    pub value: String,
}

// ── DashboardState ────────────────────────────────────────────────────────────

/// Selection-dependent view over one dataset.
pub struct DashboardState {
    dataset: Arc<Dataset>,
    config: DashboardConfig,
    filter: ArticleFilter,
    /// Ticket chosen in the ticket selector. Displayed only; it does not
    /// filter anything.
    selected_ticket: Option<String>,
    rng: StdRng,
    summary: SalesSummary,
    /// Indices into `dataset.records()` of the current random sample.
    sample: Vec<usize>,
}

impl DashboardState {
    /// Build the state with the initial selection and a first sample.
    pub fn new(dataset: Arc<Dataset>, config: DashboardConfig) -> Self {
        let filter = initial_selection(&dataset, &config.initial_articles);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let summary = summarize(&dataset, &filter, config.summary_config());
        let selected_ticket = summary.top_tickets.first().map(|t| t.ticket_number.clone());

        let mut state = Self {
            dataset,
            config,
            filter,
            selected_ticket,
            rng,
            summary,
            sample: Vec::new(),
        };
        state.resample();
        state
    }

    // ── Selection ─────────────────────────────────────────────────────────

    /// Select `article` when unselected, deselect it otherwise.
    pub fn toggle_article(&mut self, article: &str) {
        self.filter.toggle(article);
        self.refresh();
    }

    /// Replace the selection. Articles not in the dataset are ignored.
    pub fn set_selection<I, S>(&mut self, articles: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.filter = known_articles(&self.dataset, articles);
        self.refresh();
    }

    pub fn clear_selection(&mut self) {
        self.filter.clear();
        self.refresh();
    }

    /// Record the chosen ticket. Returns `false` when `ticket` is not one of
    /// the listed top tickets.
    pub fn select_ticket(&mut self, ticket: &str) -> bool {
        let listed = self
            .summary
            .top_tickets
            .iter()
            .any(|t| t.ticket_number == ticket);
        if listed {
            tracing::debug!(ticket, "ticket selected");
            self.selected_ticket = Some(ticket.to_string());
        }
        listed
    }

    /// Draw a fresh random sample from the selected articles' records.
    pub fn resample(&mut self) {
        if self.filter.is_empty() {
            self.sample.clear();
            return;
        }
        let candidates: Vec<usize> = self
            .dataset
            .records()
            .iter()
            .enumerate()
            .filter(|(_, r)| self.filter.contains(r.article()))
            .map(|(idx, _)| idx)
            .collect();

        let amount = self.config.sample_size.min(candidates.len());
        self.sample = rand::seq::index::sample(&mut self.rng, candidates.len(), amount)
            .into_iter()
            .map(|i| candidates[i])
            .collect();
    }

    // ── Views ─────────────────────────────────────────────────────────────

    pub fn summary(&self) -> &SalesSummary {
        &self.summary
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn selection(&self) -> &ArticleFilter {
        &self.filter
    }

    pub fn selected_ticket(&self) -> Option<&str> {
        self.selected_ticket.as_deref()
    }

    /// The random sample, or `None` when no article is selected.
    pub fn sample_rows(&self) -> Option<Vec<&Record>> {
        if self.filter.is_empty() {
            return None;
        }
        let records = self.dataset.records();
        Some(self.sample.iter().map(|&i| &records[i]).collect())
    }

    /// The first records of the dataset, for the preview table.
    pub fn preview_rows(&self) -> &[Record] {
        self.dataset.head(self.config.preview_rows)
    }

    /// The three headline tiles.
    ///
    /// Total Sales is whole units without a selection and two decimals with
    /// one. Quantity always shows the unfiltered total.
    pub fn metric_tiles(&self) -> [MetricTile; 3] {
        let s = &self.summary;
        let (sales, products) = match s.require_selection() {
            Ok(filtered) => (format_two_decimals(filtered.sales), filtered.distinct_articles),
            Err(_) => (format_whole_units(s.totals.sales), s.totals.distinct_articles),
        };
        [
            MetricTile {
                label: "Total Sales",
                value: sales,
            },
            MetricTile {
                label: "Quantity",
                value: format_whole_units(s.totals.quantity),
            },
            MetricTile {
                label: "No. of Products",
                value: products.to_string(),
            },
        ]
    }

    // ── Private ───────────────────────────────────────────────────────────

    fn refresh(&mut self) {
        self.summary = summarize(&self.dataset, &self.filter, self.config.summary_config());
        self.resample();
    }
}

/// The selection the dashboard opens with: the requested articles that exist,
/// or else the 1st and 21st articles of the dataset.
fn initial_selection(dataset: &Dataset, requested: &[String]) -> ArticleFilter {
    if !requested.is_empty() {
        return known_articles(dataset, requested);
    }
    let articles = dataset.articles();
    ArticleFilter::new(
        DEFAULT_SELECTION_POSITIONS
            .iter()
            .filter_map(|&i| articles.get(i).cloned()),
    )
}

fn known_articles<I, S>(dataset: &Dataset, articles: I) -> ArticleFilter
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let available = dataset.articles();
    let mut filter = ArticleFilter::default();
    for article in articles {
        let article = article.as_ref().trim();
        if available.iter().any(|a| a == article) {
            filter.insert(article.to_string());
        } else {
            tracing::warn!(article, "ignoring unknown article in selection");
        }
    }
    filter
}

// ── Tests ─────────────────────────────────────────────────────────────────────
