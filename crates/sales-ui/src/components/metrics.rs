use crate::themes::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use sales_runtime::dashboard::MetricTile;

// ── MetricTileView ───────────────────────────────────────────────────────────

/// One headline number: a dim label line over a bold value line.
pub struct MetricTileView<'a> {
    pub tile: &'a MetricTile,
    pub theme: &'a Theme,
}

impl<'a> MetricTileView<'a> {
    pub fn new(tile: &'a MetricTile, theme: &'a Theme) -> Self {
        Self { tile, theme }
    }

    /// Render the tile as two lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(Span::styled(self.tile.label, self.theme.metric_label)),
            Line::from(Span::styled(
                self.tile.value.as_str(),
                self.theme.metric_value,
            )),
        ]
    }
}

/// Render the tiles side by side, each in its own bordered box.
pub fn render_metric_tiles(frame: &mut Frame, area: Rect, tiles: &[MetricTile], theme: &Theme) {
    if tiles.is_empty() {
        return;
    }
    let constraints = vec![Constraint::Ratio(1, tiles.len() as u32); tiles.len()];
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (tile, column) in tiles.iter().zip(columns.iter()) {
        let view = MetricTileView::new(tile, theme);
        let paragraph = Paragraph::new(Text::from(view.to_lines())).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.panel_border),
        );
        frame.render_widget(paragraph, *column);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
