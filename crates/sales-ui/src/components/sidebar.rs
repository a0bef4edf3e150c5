//! Sidebar with the two filter controls: the product multi-select and the
//! top-ticket single-select.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use sales_runtime::dashboard::DashboardState;

use crate::themes::Theme;

/// Which sidebar control receives the arrow and toggle keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarFocus {
    #[default]
    Articles,
    Tickets,
}

/// Focus and cursor positions of the sidebar controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidebarState {
    pub focus: SidebarFocus,
    pub article_cursor: usize,
    pub ticket_cursor: usize,
}

impl SidebarState {
    /// Move focus to the other control.
    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            SidebarFocus::Articles => SidebarFocus::Tickets,
            SidebarFocus::Tickets => SidebarFocus::Articles,
        };
    }

    /// Move the focused cursor up, stopping at the first row.
    pub fn cursor_up(&mut self) {
        let cursor = self.cursor_mut();
        *cursor = cursor.saturating_sub(1);
    }

    /// Move the focused cursor down, stopping at the last of `len` rows.
    pub fn cursor_down(&mut self, len: usize) {
        let cursor = self.cursor_mut();
        if *cursor + 1 < len {
            *cursor += 1;
        }
    }

    /// Cursor position of the focused control.
    pub fn cursor(&self) -> usize {
        match self.focus {
            SidebarFocus::Articles => self.article_cursor,
            SidebarFocus::Tickets => self.ticket_cursor,
        }
    }

    fn cursor_mut(&mut self) -> &mut usize {
        match self.focus {
            SidebarFocus::Articles => &mut self.article_cursor,
            SidebarFocus::Tickets => &mut self.ticket_cursor,
        }
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render both controls stacked vertically, articles on top.
pub fn render_sidebar(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    sidebar: &SidebarState,
    theme: &Theme,
) {
    let ticket_rows = state.summary().top_tickets.len() as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(ticket_rows)])
        .split(area);

    render_article_list(frame, chunks[0], state, sidebar, theme);
    render_ticket_list(frame, chunks[1], state, sidebar, theme);
}

/// Product list rows: a checkbox per article, checked when selected.
pub fn article_items<'a>(state: &DashboardState, theme: &'a Theme) -> Vec<ListItem<'a>> {
    state
        .dataset()
        .articles()
        .iter()
        .map(|article| {
            let selected = state.selection().contains(article);
            let (mark, style) = if selected {
                ("[x] ", theme.selected)
            } else {
                ("[ ] ", theme.text)
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, style),
                Span::styled(article.clone(), style),
            ]))
        })
        .collect()
}

/// Ticket list rows: a radio mark per ticket and its line count.
pub fn ticket_items<'a>(state: &DashboardState, theme: &'a Theme) -> Vec<ListItem<'a>> {
    let chosen = state.selected_ticket();
    state
        .summary()
        .top_tickets
        .iter()
        .map(|ticket| {
            let is_chosen = chosen == Some(ticket.ticket_number.as_str());
            let (mark, style) = if is_chosen {
                ("(•) ", theme.selected)
            } else {
                ("( ) ", theme.text)
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, style),
                Span::styled(ticket.ticket_number.clone(), style),
                Span::styled(format!("  ×{}", ticket.count), theme.dim),
            ]))
        })
        .collect()
}

fn render_article_list(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    sidebar: &SidebarState,
    theme: &Theme,
) {
    let focused = sidebar.focus == SidebarFocus::Articles;
    let title = format!(" Products ({} selected) ", state.selection().len());
    let list = List::new(article_items(state, theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(focused))
                .title(title),
        )
        .highlight_style(theme.cursor);

    let mut list_state = ListState::default();
    if focused {
        list_state.select(Some(sidebar.article_cursor));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_ticket_list(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    sidebar: &SidebarState,
    theme: &Theme,
) {
    let focused = sidebar.focus == SidebarFocus::Tickets;
    let list = List::new(ticket_items(state, theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(focused))
                .title(" Top Tickets "),
        )
        .highlight_style(theme.cursor);

    let mut list_state = ListState::default();
    if focused {
        list_state.select(Some(sidebar.ticket_cursor));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
