//! Layout components (sidebar, status bar)

use super::components::{render_sidebar_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::platform::{COPY_SHORTCUT, PASTE_SHORTCUT, RESET_SHORTCUT, SAVE_SHORTCUT};
use crate::state::{ProductsFocus, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Create the main layout with sidebar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16), // Sidebar
            Constraint::Min(0),     // Main content
        ])
        .split(area);

    // Reserve bottom line for status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[0]);

    (sidebar_chunks[0], main_chunks[0])
}

/// Draw the sidebar with one boxed button per view
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(View::ALL.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (idx, view) in View::ALL.iter().enumerate() {
        let key = char::from(b'1' + idx as u8);
        render_sidebar_button(
            frame,
            chunks[idx + 1],
            key,
            view.label(),
            app.state.current_view == *view,
        );
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::raw(" ")];
    spans.push(Span::styled(
        view_hints(app),
        Style::default().fg(Color::Gray),
    ));

    if app.state.current_view == View::Signup {
        let invalid = app.form.state().errors().len();
        if invalid > 0 {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("{invalid} invalid"),
                Style::default().fg(Color::Red),
            ));
        }
    }

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let quit_hint = " q:quit ";
    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current view
fn view_hints(app: &App) -> String {
    match app.state.current_view {
        View::Products => match app.state.products_focus {
            ProductsFocus::List => {
                "j/k:nav  /:search  m:max price  c:category  i:in stock  s:sort  x:reset  o:order  r:reload"
                    .to_string()
            }
            ProductsFocus::Search | ProductsFocus::MaxPrice => {
                "type to filter  Enter/Esc:done".to_string()
            }
        },
        View::Orders => "j/k:nav  r:reload".to_string(),
        View::Signup => {
            let field_hint = match app.form.active_descriptor().map(|f| f.kind.has_options()) {
                Some(true) => "←/→ or 1-9:choose",
                Some(false) => "type to edit",
                None => "←/→:button  Enter:press",
            };
            format!(
                "Tab:next  {field_hint}  {SAVE_SHORTCUT}:save  {RESET_SHORTCUT}:reset  {COPY_SHORTCUT}/{PASTE_SHORTCUT}:copy/paste  Esc:back"
            )
        }
    }
}
