//! Orders view

use super::products::format_price;
use super::widgets::{focus_block, render_load_state};
use crate::app::App;
use chrono::Local;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Draw the recent orders table
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let orders = &app.state.orders;
    let block = focus_block(format!(" Recent Orders ({}) ", orders.len()), true);

    if render_load_state(frame, area, &app.state.orders_load, "orders", block.clone()) {
        return;
    }

    if orders.is_empty() {
        let content = Paragraph::new("No orders yet. Press 'o' on a product to place one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let header = Row::new(["Order", "Product", "Qty", "Total", "Status", "Created"])
        .style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let rows = orders.iter().map(|order| {
        let status_color = if order.is_delivered() {
            Color::Green
        } else {
            Color::Yellow
        };
        Row::new(vec![
            Cell::from(order.short_id().to_string()).style(Style::default().fg(Color::Cyan)),
            Cell::from(order.product_label().to_string()),
            Cell::from(order.quantity.to_string()),
            Cell::from(format_price(order.total)),
            Cell::from(order.status.clone()).style(Style::default().fg(status_color)),
            Cell::from(
                order
                    .created_at
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string(),
            ),
        ])
    });

    let widths = [
        Constraint::Length(10),
        Constraint::Min(16),
        Constraint::Length(5),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(17),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▸ ");

    let mut table_state = TableState::default().with_selected(Some(app.state.orders_selected_index));
    frame.render_stateful_widget(table, area, &mut table_state);
}
