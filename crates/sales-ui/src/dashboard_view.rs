//! Full-screen dashboard view.
//!
//! Lays out the header, the sidebar filters, the record tables, the metric
//! tiles and the charts for one [`DashboardState`].

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};
use sales_runtime::dashboard::DashboardState;

use crate::components::charts::{render_article_bars, render_daily_trend};
use crate::components::header::Header;
use crate::components::metrics::render_metric_tiles;
use crate::components::share_bar::render_share_chart;
use crate::components::sidebar::{render_sidebar, SidebarState};
use crate::table_view::{render_no_data, render_record_table, render_selection_prompt};
use crate::themes::Theme;

/// Width of the sidebar column.
const SIDEBAR_WIDTH: u16 = 34;
/// Height of the metric tile row.
const TILE_HEIGHT: u16 = 4;

/// Key hints shown on the last line.
pub fn footer_line(theme: &Theme) -> Line<'_> {
    let hints = [
        ("Tab", "focus"),
        ("↑/↓", "move"),
        ("Space", "toggle"),
        ("c", "clear"),
        ("r", "resample"),
        ("q", "quit"),
    ];
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", theme.separator));
        }
        spans.push(Span::styled(*key, theme.info));
        spans.push(Span::styled(format!(" {action}"), theme.dim));
    }
    Line::from(spans)
}

/// Render the whole dashboard into `area`.
pub fn render_dashboard(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    sidebar: &SidebarState,
    theme: &Theme,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let source = state
        .dataset()
        .source()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let header = Header::new(&source, state.dataset().len(), theme);
    frame.render_widget(Paragraph::new(Text::from(header.to_lines())), rows[0]);
    frame.render_widget(Paragraph::new(footer_line(theme)), rows[2]);

    if state.dataset().is_empty() {
        render_no_data(frame, rows[1], theme);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(rows[1]);

    render_sidebar(frame, columns[0], state, sidebar, theme);
    render_main(frame, columns[1], state, theme);
}

/// Height of a record table with `rows` body rows: the rows plus the header
/// and two borders, saturating at `u16::MAX`.
pub fn table_height(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(3)
}

fn render_main(frame: &mut Frame, area: Rect, state: &DashboardState, theme: &Theme) {
    let config = state.config();
    let preview_height = table_height(config.preview_rows);
    let sample_height = table_height(config.sample_size.max(2));

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(preview_height),
            Constraint::Length(sample_height),
            Constraint::Length(TILE_HEIGHT),
            Constraint::Min(6),
            Constraint::Min(6),
        ])
        .split(area);

    render_record_table(frame, sections[0], "Data Preview", state.preview_rows(), theme);

    match state.sample_rows() {
        Some(rows) => render_record_table(frame, sections[1], "Sample", rows, theme),
        None => render_selection_prompt(frame, sections[1], theme),
    }

    render_metric_tiles(frame, sections[2], &state.metric_tiles(), theme);

    let summary = state.summary();
    let chart_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(sections[3]);
    render_article_bars(frame, chart_row[0], &summary.filtered_ranking, theme);
    render_share_chart(frame, chart_row[1], &summary.shares, theme);

    render_daily_trend(frame, sections[4], &summary.daily, theme);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
