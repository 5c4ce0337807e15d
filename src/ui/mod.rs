//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod orders;
mod products;
mod widgets;

use crate::app::App;
use crate::state::View;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (sidebar_area, main_area) = layout::create_layout(area);

    layout::draw_sidebar(frame, sidebar_area, app);

    match app.state.current_view {
        View::Products => products::draw(frame, main_area, app),
        View::Orders => orders::draw(frame, main_area, app),
        View::Signup => forms::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error, app.state.errors.len());
    }
}
