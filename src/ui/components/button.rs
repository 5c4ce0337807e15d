//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a generic button with border
fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    accent: Color,
    is_selected: bool,
    is_enabled: bool,
) {
    let border_style = if is_selected {
        Style::default().fg(accent)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if is_selected {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(format!(" {content} "))
        .style(text_style)
        .alignment(Alignment::Center);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Render a sidebar button with key and label
pub fn render_sidebar_button(
    frame: &mut Frame,
    area: Rect,
    key: char,
    label: &str,
    is_selected: bool,
) {
    let content = format!("{key} {label}");
    render_button(frame, area, &content, Color::Cyan, is_selected, true);
}

/// Render a button in a form's action panel
pub fn render_action_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_selected: bool,
    is_enabled: bool,
    color: Option<Color>,
) {
    render_button(
        frame,
        area,
        label,
        color.unwrap_or(Color::Cyan),
        is_selected,
        is_enabled,
    );
}
