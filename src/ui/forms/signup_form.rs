//! Sign-up form rendering with action sidebar

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::state::{DynamicForm, FormButton};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the sign-up form with its action panel
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(24), // Action panel
        ])
        .split(area);

    draw_form(frame, main_chunks[0], &app.form);
    draw_action_panel(frame, main_chunks[1], &app.form);
}

fn draw_form(frame: &mut Frame, area: Rect, form: &DynamicForm) {
    let fields_focused = !form.is_buttons_row_active();
    let border_color = if fields_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Sign up ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if form.schema().is_empty() {
        let empty = Paragraph::new("This form has no fields.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let fields = form.schema().fields();
    // Keep the active field on screen when the form is taller than the area
    let per_page = (inner.height / FIELD_HEIGHT).max(1) as usize;
    let active = form.active_field_index.min(fields.len() - 1);
    let first = active.saturating_sub(per_page - 1);

    let mut constraints: Vec<Constraint> = fields
        .iter()
        .skip(first)
        .take(per_page)
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    let state = form.state();
    let page = fields.iter().enumerate().skip(first).take(per_page);
    for (slot, (idx, field)) in page.enumerate() {
        draw_field(
            frame,
            chunks[slot],
            field,
            state.value(&field.name),
            state.error(&field.name),
            idx == form.active_field_index,
        );
    }
}

fn draw_action_panel(frame: &mut Frame, area: Rect, form: &DynamicForm) {
    let is_focused = form.is_buttons_row_active();
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Save (primary)
            Constraint::Length(BUTTON_HEIGHT), // Reset
            Constraint::Min(0),                // Last saved
        ])
        .split(inner_area);

    let selected = form.selected_form_button();
    for (idx, button) in FormButton::ALL.iter().enumerate() {
        let (enabled, color) = match button {
            FormButton::Save => (form.is_submittable(), Color::Green),
            FormButton::Reset => (true, Color::Gray),
        };
        render_action_button(
            frame,
            chunks[idx],
            button.label(),
            is_focused && selected == *button,
            enabled,
            Some(color),
        );
    }

    draw_last_committed(frame, chunks[2], form);
}

fn draw_last_committed(frame: &mut Frame, area: Rect, form: &DynamicForm) {
    let Some(committed) = form.last_committed() else {
        return;
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Last saved",
            Style::default().fg(Color::Green),
        )),
    ];
    for (name, value) in &committed.values {
        let shown = form
            .schema()
            .field(name)
            .map(|f| f.display_value(value))
            .unwrap_or_else(|| value.clone());
        lines.push(Line::from(vec![
            Span::styled(format!("{name}: "), Style::default().fg(Color::DarkGray)),
            Span::raw(shown),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}
