//! Field rendering for schema-driven forms

use crate::state::{FieldDescriptor, FieldError, FieldKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: bordered control plus an error line
pub const FIELD_HEIGHT: u16 = 4;

/// Draw one field with its label, control and error line
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FieldDescriptor,
    value: &str,
    error: Option<&FieldError>,
    is_active: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let border_color = match (is_active, error.is_some()) {
        (true, _) => Color::Cyan,
        (false, true) => Color::Red,
        (false, false) => Color::DarkGray,
    };

    let block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let control = match field.kind {
        FieldKind::Text => text_line(value, is_active),
        FieldKind::SingleSelect => select_line(field, value, is_active),
        FieldKind::ExclusiveChoice => choice_line(field, value, is_active),
    };
    frame.render_widget(Paragraph::new(control).block(block), chunks[0]);

    if let Some(error) = error {
        let message = Paragraph::new(Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(message, chunks[1]);
    }
}

fn text_line(value: &str, is_active: bool) -> Line<'static> {
    if value.is_empty() && !is_active {
        return Line::from(Span::styled("(empty)", Style::default().fg(Color::DarkGray)));
    }
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let mut spans = vec![Span::styled(value.to_string(), style)];
    if is_active {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}

fn select_line(field: &FieldDescriptor, value: &str, is_active: bool) -> Line<'static> {
    let label = field.display_value(value);
    let label_style = match (field.selected_index(value), is_active) {
        (None, _) => Style::default().fg(Color::DarkGray),
        (Some(_), true) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        (Some(_), false) => Style::default(),
    };
    let arrow_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Line::from(vec![
        Span::styled("◂ ", arrow_style),
        Span::styled(label, label_style),
        Span::styled(" ▸", arrow_style),
    ])
}

fn choice_line(field: &FieldDescriptor, value: &str, is_active: bool) -> Line<'static> {
    let selected = field.selected_index(value);
    let mut spans = Vec::with_capacity(field.options.len() * 2);

    for (idx, option) in field.options.iter().enumerate() {
        let is_selected = selected == Some(idx);
        let marker = if is_selected { "(•) " } else { "( ) " };
        let style = match (is_selected, is_active) {
            (true, true) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            (true, false) => Style::default().add_modifier(Modifier::BOLD),
            (false, _) => Style::default().fg(Color::Gray),
        };
        spans.push(Span::styled(format!("{marker}{option}"), style));
        spans.push(Span::raw("   "));
    }
    spans.pop();

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_select_shows_placeholder_without_value() {
        let field = FieldDescriptor::single_select(1, "country", &["India", "Germany"]);
        assert_eq!(text_of(&select_line(&field, "", false)), "◂ Select ▸");
        assert_eq!(text_of(&select_line(&field, "2", true)), "◂ Germany ▸");
    }

    #[test]
    fn test_choice_marks_selected_option() {
        let field = FieldDescriptor::exclusive_choice(1, "plan", &["Basic", "Pro"]);
        assert_eq!(text_of(&choice_line(&field, "2", false)), "( ) Basic   (•) Pro");
    }

    #[test]
    fn test_choice_out_of_range_marks_nothing() {
        let field = FieldDescriptor::exclusive_choice(1, "plan", &["Basic", "Pro"]);
        assert_eq!(text_of(&choice_line(&field, "7", false)), "( ) Basic   ( ) Pro");
    }

    #[test]
    fn test_text_line_cursor_only_when_active() {
        assert_eq!(text_of(&text_line("abc", true)), "abc▌");
        assert_eq!(text_of(&text_line("", false)), "(empty)");
    }
}
