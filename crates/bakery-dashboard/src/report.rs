//! Plain-text and JSON rendering of the headless summary view.

use std::fmt::Write;

use sales_core::formatting::{format_euro, format_share, format_whole_units};
use sales_runtime::dashboard::DashboardState;

const RULE_WIDTH: usize = 60;

/// Render the summary for `state` as a text report.
pub fn render_text(state: &DashboardState) -> String {
    let summary = state.summary();
    let dataset = state.dataset();
    let mut out = String::new();

    let _ = writeln!(out, "BAKERY SALES DASHBOARD");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(
        out,
        "[ {} | {} records ]",
        dataset.source().display(),
        dataset.len()
    );
    let _ = writeln!(out);

    for tile in state.metric_tiles() {
        let _ = writeln!(out, "{:<18}{:>16}", tile.label, tile.value);
    }
    let _ = writeln!(out, "{:<18}{:>16}", "All Sales", format_whole_units(summary.totals.sales));

    if summary.empty_selection {
        let _ = writeln!(out);
        let _ = writeln!(out, "No article selected.");
    } else {
        section(&mut out, "Sales by Article");
        for entry in &summary.filtered_ranking {
            let _ = writeln!(out, "  {:<28}{:>16}", entry.article, format_euro(entry.sales));
        }

        section(&mut out, "Share of Sales");
        for share in &summary.shares {
            let _ = writeln!(out, "  {:<28}{:>8}", share.article, format_share(share.percentage));
        }
    }

    section(&mut out, "Sales by Date");
    for day in &summary.daily {
        let _ = writeln!(
            out,
            "  {:<28}{:>16}",
            day.date.format("%Y-%m-%d"),
            format_euro(day.sales)
        );
    }

    section(&mut out, "Top Tickets");
    for ticket in &summary.top_tickets {
        let _ = writeln!(out, "  {:<28}{:>8}", ticket.ticket_number, ticket.count);
    }

    out
}

/// Render the summary for `state` as pretty-printed JSON.
pub fn render_json(state: &DashboardState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(state.summary())
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(title.len()));
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sales_core::models::Record;
    use sales_data::dataset::Dataset;
    use sales_runtime::dashboard::DashboardConfig;
    use std::sync::Arc;

    fn state(articles: &[&str]) -> DashboardState {
        let d1 = NaiveDate::from_ymd_opt(2021, 1, 2).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2021, 1, 3).unwrap();
        let records = vec![
            Record::new(d1, None, "150040.0", "BAGUETTE", 1.0, 0.90),
            Record::new(d1, None, "150040.0", "PAIN AU CHOCOLAT", 3.0, 1.20),
            Record::new(d2, None, "150041.0", "PAIN AU CHOCOLAT", 2.0, 1.20),
            Record::new(d2, None, "150042.0", "TRADITIONAL BAGUETTE", 5.0, 1.20),
            Record::new(d2, None, "150042.0", "COOKIE", 1.0, 0.65),
            Record::new(d2, None, "150043.0", "COUPE", 1.0, 0.15),
        ];
        let config = DashboardConfig {
            trim_bottom: 1,
            seed: Some(7),
            initial_articles: articles.iter().map(|a| a.to_string()).collect(),
            ..DashboardConfig::default()
        };
        DashboardState::new(Arc::new(Dataset::from_records("sales.csv", records)), config)
    }

    // ── render_text ───────────────────────────────────────────────────────────

    #[test]
    fn test_text_report_sections() {
        let text = render_text(&state(&["PAIN AU CHOCOLAT", "BAGUETTE"]));

        assert!(text.starts_with("BAKERY SALES DASHBOARD\n"));
        assert!(text.contains("[ sales.csv | 6 records ]"));
        assert!(text.contains("Total Sales"));
        assert!(text.contains("6.90"));
        assert!(text.contains("Share of Sales"));
        assert!(text.contains("PAIN AU CHOCOLAT"));
        assert!(text.contains("2021-01-02"));
        assert!(text.contains("150042.0"));
    }

    #[test]
    fn test_text_report_empty_selection() {
        let mut s = state(&["COOKIE"]);
        s.clear_selection();
        let text = render_text(&s);

        assert!(text.contains("No article selected."));
        assert!(!text.contains("Share of Sales"));
        assert!(text.contains("Sales by Date"));
    }

    // ── render_json ───────────────────────────────────────────────────────────

    #[test]
    fn test_json_report_parses() {
        let json = render_json(&state(&["COOKIE"])).expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["totals"]["records"], 6);
        assert_eq!(value["empty_selection"], false);
        assert_eq!(value["daily"].as_array().map(Vec::len), Some(2));
    }
}
