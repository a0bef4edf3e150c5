use crate::components::pad_to_width;
use crate::themes::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use sales_core::formatting::format_share;
use sales_core::models::ArticleShare;

/// Configuration controlling the appearance of a share bar.
pub struct ShareBarConfig {
    /// Width in terminal columns of the bar portion.
    pub width: u16,
    /// Character used for every segment.
    pub segment_char: char,
    /// Character used when there is nothing to show.
    pub empty_char: char,
    /// Columns reserved for article names in the legend.
    pub legend_label_width: usize,
}

impl Default for ShareBarConfig {
    fn default() -> Self {
        Self {
            width: 50,
            segment_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',   // ░  LIGHT SHADE
            legend_label_width: 24,
        }
    }
}

// ── ShareBar ─────────────────────────────────────────────────────────────────

/// Horizontal stacked bar splitting the filtered sales between articles,
/// the terminal counterpart of a pie chart.
///
/// Each article gets a coloured segment proportional to its share; a legend
/// lists the shares as one-decimal percentages.
pub struct ShareBar<'a> {
    pub shares: &'a [ArticleShare],
    pub theme: &'a Theme,
    pub config: ShareBarConfig,
}

impl<'a> ShareBar<'a> {
    pub fn new(shares: &'a [ArticleShare], theme: &'a Theme) -> Self {
        Self {
            shares,
            theme,
            config: ShareBarConfig::default(),
        }
    }

    /// Use a bar of `width` columns.
    pub fn width(mut self, width: u16) -> Self {
        self.config.width = width;
        self
    }

    /// Column count of each segment. The last non-empty segment absorbs the
    /// rounding remainder so the segments always fill the bar exactly.
    pub fn segment_widths(&self) -> Vec<usize> {
        let width = self.config.width as usize;
        let total: f64 = self.shares.iter().map(|s| s.percentage).sum();
        if total <= 0.0 {
            return vec![0; self.shares.len()];
        }

        let mut widths: Vec<usize> = self
            .shares
            .iter()
            .map(|s| ((s.percentage / total) * width as f64).floor() as usize)
            .collect();
        let used: usize = widths.iter().sum();
        if let Some(last) = self.shares.iter().rposition(|s| s.percentage > 0.0) {
            widths[last] += width.saturating_sub(used);
        }
        widths
    }

    /// Render the stacked bar as a [`Line`].
    pub fn to_line(&self) -> Line<'a> {
        let widths = self.segment_widths();
        let filled: usize = widths.iter().sum();

        let mut spans: Vec<Span<'a>> = Vec::with_capacity(self.shares.len() + 3);
        spans.push(Span::styled("[", self.theme.dim));
        for (i, w) in widths.into_iter().enumerate().filter(|(_, w)| *w > 0) {
            let segment: String = std::iter::repeat_n(self.config.segment_char, w).collect();
            spans.push(Span::styled(segment, self.theme.share_style(i)));
        }
        let empty = (self.config.width as usize).saturating_sub(filled);
        if empty > 0 {
            let rest: String = std::iter::repeat_n(self.config.empty_char, empty).collect();
            spans.push(Span::styled(rest, self.theme.dim));
        }
        spans.push(Span::styled("]", self.theme.dim));
        Line::from(spans)
    }

    /// One legend line per article: colour swatch, name, percentage.
    pub fn legend_lines(&self) -> Vec<Line<'a>> {
        self.shares
            .iter()
            .enumerate()
            .map(|(i, share)| {
                Line::from(vec![
                    Span::styled("■ ", self.theme.share_style(i)),
                    Span::styled(
                        pad_to_width(&share.article, self.config.legend_label_width),
                        self.theme.label,
                    ),
                    Span::styled(
                        format!("{:>6}", format_share(share.percentage)),
                        self.theme.value,
                    ),
                ])
            })
            .collect()
    }
}

/// Render the share chart (bar plus legend) in a bordered box.
pub fn render_share_chart(frame: &mut Frame, area: Rect, shares: &[ArticleShare], theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border)
        .title(" Sales Share ");

    let lines = if shares.is_empty() {
        vec![Line::from(Span::styled(
            "No ranked article selected",
            theme.dim,
        ))]
    } else {
        let inner_width = area.width.saturating_sub(4).max(1);
        let bar = ShareBar::new(shares, theme).width(inner_width);
        let mut lines = vec![bar.to_line(), Line::from("")];
        lines.extend(bar.legend_lines());
        lines
    };

    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
