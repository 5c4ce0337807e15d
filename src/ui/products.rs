//! Products view: filter panel and product list

use super::widgets::{focus_block, render_load_state, render_scrollable_list};
use crate::app::App;
use crate::state::{Product, ProductsFocus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Draw the products view
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    draw_filters(frame, chunks[0], app);
    draw_list(frame, chunks[1], app);
}

fn draw_filters(frame: &mut Frame, area: Rect, app: &App) {
    let filter = &app.state.filter;
    let focus = app.state.products_focus;

    let input = |label: &'static str, value: &str, active: bool| -> Vec<Span<'static>> {
        let style = if active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let shown = if value.is_empty() && !active {
            "-".to_string()
        } else {
            value.to_string()
        };
        let mut spans = vec![
            Span::styled(label, Style::default().fg(Color::DarkGray)),
            Span::styled(shown, style),
        ];
        if active {
            spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
        }
        spans
    };

    let mut first = input("Search: ", &filter.query, focus == ProductsFocus::Search);
    first.push(Span::raw("   "));
    first.extend(input(
        "Max price: ",
        &filter.max_price_input,
        focus == ProductsFocus::MaxPrice,
    ));

    let second = Line::from(vec![
        Span::styled("Category: ", Style::default().fg(Color::DarkGray)),
        Span::styled(filter.category.clone(), Style::default().fg(Color::Cyan)),
        Span::raw("   "),
        Span::styled("In stock only: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            if filter.in_stock_only { "yes" } else { "no" },
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("   "),
        Span::styled("Sort: ", Style::default().fg(Color::DarkGray)),
        Span::styled(filter.sort.label(), Style::default().fg(Color::Cyan)),
    ]);

    let block = focus_block(" Filters ".to_string(), focus.is_text_entry());
    frame.render_widget(
        Paragraph::new(vec![Line::from(first), second]).block(block),
        area,
    );
}

fn draw_list(frame: &mut Frame, area: Rect, app: &App) {
    let visible = app.state.visible_products();
    let title = format!(" Products ({} of {}) ", visible.len(), app.state.products.len());
    let block = focus_block(title, !app.state.products_focus.is_text_entry());

    if render_load_state(frame, area, &app.state.products_load, "products", block.clone()) {
        return;
    }

    if visible.is_empty() {
        let content = Paragraph::new("No products match the current filters. Press 'x' to reset.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(idx, product)| product_item(product, idx == app.state.selected_index))
        .collect();

    let list = List::new(items).block(block);
    render_scrollable_list(frame, area, list, app.state.selected_index);
}

fn product_item(product: &Product, is_selected: bool) -> ListItem<'static> {
    let prefix = if is_selected { "▸ " } else { "  " };
    let name_style = if is_selected {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let stock = if product.available {
        Span::styled("[In stock]", Style::default().fg(Color::Green))
    } else {
        Span::styled("[Out of stock]", Style::default().fg(Color::Red))
    };

    let mut lines = vec![Line::from(vec![
        Span::raw(prefix),
        Span::styled(product.name.clone(), name_style),
        Span::raw("  "),
        Span::styled(format_price(product.price), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        stock,
        Span::raw("  "),
        Span::styled(
            product.category.clone().unwrap_or_default(),
            Style::default().fg(Color::DarkGray),
        ),
    ])];

    if let Some(description) = product.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(Line::from(Span::styled(
            format!("    {description}"),
            Style::default().fg(Color::DarkGray),
        )));
    }

    ListItem::new(lines)
}

/// Rupee amount with two decimals
pub fn format_price(amount: f64) -> String {
    format!("₹{amount:.2}")
}
