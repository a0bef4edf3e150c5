//! Record tables for the dashboard: the data preview and the filtered sample.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per record and
//! alternating row styles.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use sales_core::formatting;
use sales_core::models::Record;

use crate::themes::Theme;

const HEADERS: [&str; 7] = ["Date", "Time", "Ticket", "Article", "Qty", "Unit Price", "Sales"];

/// Display values for one record row.
pub fn record_cells(record: &Record) -> [String; 7] {
    [
        record.date().format("%Y-%m-%d").to_string(),
        record
            .time()
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default(),
        record.ticket_number().to_string(),
        record.article().to_string(),
        formatting::format_number(record.quantity(), 0),
        formatting::format_euro(record.unit_price()),
        formatting::format_euro(record.sales()),
    ]
}

/// Render `records` as a table titled `title` into `area`.
pub fn render_record_table<'r, I>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    records: I,
    theme: &Theme,
) where
    I: IntoIterator<Item = &'r Record>,
{
    let header_cells = HEADERS
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(record_cells(record).map(Cell::from)).style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(5),
        Constraint::Length(10),
        Constraint::Min(16),
        Constraint::Length(5),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Placeholder shown instead of the sample table and filtered figures when no
/// article is selected.
pub fn render_selection_prompt(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(Span::styled("Select an article to see its sales", theme.warning)),
        Line::from(Span::styled(
            "Use Space or Enter in the Products list",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Sample "),
        ),
        area,
    );
}

/// Render a "no data" placeholder when the dataset has no records.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No sales records found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Check that the CSV file has rows below its header.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Bakery Sales "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
