//! Per-article bar chart and per-day trend chart.

use ratatui::{
    layout::Rect,
    symbols,
    text::{Line, Span, Text},
    widgets::{Axis, Block, Borders, Chart, Dataset as ChartDataset, GraphType, Paragraph},
    Frame,
};
use sales_core::formatting::{format_euro, format_whole_units};
use sales_core::models::{ArticleSales, DailySales};

use crate::components::pad_to_width;
use crate::themes::Theme;

/// Columns reserved for the article name in front of each bar.
const BAR_LABEL_WIDTH: usize = 22;
/// Columns reserved for the value after each bar.
const BAR_VALUE_WIDTH: usize = 14;

// ── Article bars ──────────────────────────────────────────────────────────────

/// One line per article: name, a bar scaled to the largest value, and the
/// euro amount.
pub fn build_bar_lines<'a>(
    ranking: &[ArticleSales],
    bar_width: usize,
    theme: &'a Theme,
) -> Vec<Line<'a>> {
    let max = ranking.iter().map(|e| e.sales).fold(0.0_f64, f64::max);

    ranking
        .iter()
        .map(|entry| {
            let filled = if max > 0.0 {
                ((entry.sales / max) * bar_width as f64).round() as usize
            } else {
                0
            };
            Line::from(vec![
                Span::styled(pad_to_width(&entry.article, BAR_LABEL_WIDTH), theme.label),
                Span::raw(" "),
                Span::styled("█".repeat(filled.min(bar_width)), theme.bar),
                Span::raw(" ".repeat(bar_width.saturating_sub(filled) + 1)),
                Span::styled(
                    format!("{:>width$}", format_euro(entry.sales), width = BAR_VALUE_WIDTH),
                    theme.value,
                ),
            ])
        })
        .collect()
}

/// Render the per-article sales bars for the filtered selection.
pub fn render_article_bars(frame: &mut Frame, area: Rect, ranking: &[ArticleSales], theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border)
        .title(" Sales by Article ");

    let lines = if ranking.is_empty() {
        vec![Line::from(Span::styled(
            "No ranked article selected",
            theme.dim,
        ))]
    } else {
        let inner = area.width.saturating_sub(2) as usize;
        let bar_width = inner.saturating_sub(BAR_LABEL_WIDTH + BAR_VALUE_WIDTH + 2);
        build_bar_lines(ranking, bar_width, theme)
    };

    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

// ── Daily trend ───────────────────────────────────────────────────────────────

/// `(x, y)` points for the trend chart: x is the day index, y the sales.
pub fn trend_points(daily: &[DailySales]) -> Vec<(f64, f64)> {
    daily
        .iter()
        .enumerate()
        .map(|(i, d)| (i as f64, d.sales))
        .collect()
}

/// Render the sales-per-day line chart.
pub fn render_daily_trend(frame: &mut Frame, area: Rect, daily: &[DailySales], theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border)
        .title(" Sales by Date ");

    let (Some(first), Some(last)) = (daily.first(), daily.last()) else {
        let empty = Paragraph::new(Line::from(Span::styled("No sales recorded", theme.dim)));
        frame.render_widget(empty.block(block), area);
        return;
    };

    let points = trend_points(daily);
    let max_sales = daily.iter().map(|d| d.sales).fold(0.0_f64, f64::max);
    let x_max = (daily.len().saturating_sub(1) as f64).max(1.0);
    let y_max = if max_sales > 0.0 { max_sales * 1.1 } else { 1.0 };

    let dataset = ChartDataset::default()
        .name("sales")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.line)
        .data(&points);

    let x_labels = vec![
        first.date.format("%Y-%m-%d").to_string(),
        last.date.format("%Y-%m-%d").to_string(),
    ];
    let y_labels = vec![
        "0".to_string(),
        format_whole_units(y_max / 2.0),
        format_whole_units(y_max),
    ];

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([0.0, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
