//! Reusable UI widget helpers

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, List, ListState, Paragraph},
    Frame,
};

use crate::state::LoadState;

/// Render a list that keeps the selected item in view
pub fn render_scrollable_list(frame: &mut Frame, area: Rect, list: List, selected_index: usize) {
    let mut list_state = ListState::default().with_selected(Some(selected_index));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Placeholder for a list that is still loading or failed.
///
/// Returns `false` when the list is loaded and the caller should draw it.
pub fn render_load_state(
    frame: &mut Frame,
    area: Rect,
    state: &LoadState,
    what: &str,
    block: Block,
) -> bool {
    let (message, color) = match state {
        LoadState::Loaded => return false,
        LoadState::Loading => (format!("Loading {what}..."), Color::DarkGray),
        LoadState::Failed(err) => (format!("Error: {err}"), Color::Red),
    };

    let content = Paragraph::new(message)
        .style(Style::default().fg(color))
        .block(block);
    frame.render_widget(content, area);
    true
}

/// Bordered block whose border shows focus
pub fn focus_block(title: String, is_focused: bool) -> Block<'static> {
    let border_color = if is_focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}
