//! Application state definitions

use super::catalog::{categories, LoadState, Order, Product, ProductFilter};

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Products,
    Orders,
    Signup,
}

impl View {
    pub const ALL: [View; 3] = [View::Products, View::Orders, View::Signup];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Products => "Products",
            Self::Orders => "Orders",
            Self::Signup => "Sign up",
        }
    }

    /// View bound to a number key (`1`..`3`)
    pub fn from_digit(c: char) -> Option<Self> {
        let idx = c.to_digit(10)? as usize;
        idx.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Which part of the products view receives key input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductsFocus {
    #[default]
    List,
    Search,
    MaxPrice,
}

impl ProductsFocus {
    /// Whether keys are typed into an input
    pub fn is_text_entry(&self) -> bool {
        !matches!(self, Self::List)
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Data
    pub products: Vec<Product>,
    pub products_load: LoadState,
    pub orders: Vec<Order>,
    pub orders_load: LoadState,

    // Products view
    pub filter: ProductFilter,
    pub products_focus: ProductsFocus,
    pub selected_index: usize,

    // Orders view
    pub orders_selected_index: usize,

    // UI state
    pub status_message: Option<String>,
    pub errors: Vec<String>,
}

impl AppState {
    /// Products after filters and sort
    pub fn visible_products(&self) -> Vec<&Product> {
        self.filter.apply(&self.products)
    }

    pub fn categories(&self) -> Vec<String> {
        categories(&self.products)
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.visible_products().get(self.selected_index).copied()
    }

    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_order_selection_down(&mut self) {
        if !self.orders.is_empty() && self.orders_selected_index < self.orders.len() - 1 {
            self.orders_selected_index += 1;
        }
    }

    pub fn move_order_selection_up(&mut self) {
        self.orders_selected_index = self.orders_selected_index.saturating_sub(1);
    }

    /// Reset selection
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
    }

    /// Keep the product selection inside the visible list after a filter change
    pub fn clamp_selection(&mut self) {
        let len = self.visible_products().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn cycle_category(&mut self) {
        let categories = self.categories();
        self.filter.cycle_category(&categories);
        self.reset_selection();
    }

    pub fn toggle_in_stock(&mut self) {
        self.filter.in_stock_only = !self.filter.in_stock_only;
        self.reset_selection();
    }

    pub fn cycle_sort(&mut self) {
        self.filter.sort = self.filter.sort.next();
        self.reset_selection();
    }

    pub fn reset_filters(&mut self) {
        self.filter.reset();
        self.products_focus = ProductsFocus::List;
        self.reset_selection();
    }

    /// Handle character input in the focused products filter input
    pub fn filter_input_char(&mut self, c: char) {
        match self.products_focus {
            ProductsFocus::Search => self.filter.query.push(c),
            ProductsFocus::MaxPrice => {
                if c.is_ascii_digit() || (c == '.' && !self.filter.max_price_input.contains('.'))
                {
                    self.filter.max_price_input.push(c);
                }
            }
            ProductsFocus::List => return,
        }
        self.reset_selection();
    }

    /// Handle backspace in the focused products filter input
    pub fn filter_backspace(&mut self) {
        match self.products_focus {
            ProductsFocus::Search => {
                self.filter.query.pop();
            }
            ProductsFocus::MaxPrice => {
                self.filter.max_price_input.pop();
            }
            ProductsFocus::List => return,
        }
        self.reset_selection();
    }

    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
        self.products_load = LoadState::Loaded;
        self.clamp_selection();
    }

    pub fn set_orders(&mut self, orders: Vec<Order>) {
        self.orders = orders;
        self.orders_load = LoadState::Loaded;
        if self.orders_selected_index >= self.orders.len() {
            self.orders_selected_index = self.orders.len().saturating_sub(1);
        }
    }

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{message}");
        self.errors.push(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        if !self.errors.is_empty() {
            self.errors.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: None,
            price,
            category: Some(if price > 20.0 { "Big" } else { "Small" }.to_string()),
            available: price < 50.0,
            image: None,
        }
    }

    fn state_with_products() -> AppState {
        let mut state = AppState::default();
        state.set_products(vec![product("1", 10.0), product("2", 30.0), product("3", 60.0)]);
        state
    }

    mod view {
        use super::*;

        #[test]
        fn test_from_digit() {
            assert_eq!(View::from_digit('1'), Some(View::Products));
            assert_eq!(View::from_digit('3'), Some(View::Signup));
            assert_eq!(View::from_digit('0'), None);
            assert_eq!(View::from_digit('4'), None);
            assert_eq!(View::from_digit('x'), None);
        }

        #[test]
        fn test_default_is_products() {
            assert_eq!(View::default(), View::Products);
        }
    }

    mod selection {
        use super::*;

        #[test]
        fn test_move_selection_bounds() {
            let mut state = state_with_products();
            state.move_selection_up();
            assert_eq!(state.selected_index, 0);
            state.move_selection_down(3);
            state.move_selection_down(3);
            state.move_selection_down(3);
            assert_eq!(state.selected_index, 2);
        }

        #[test]
        fn test_selected_product_follows_sort() {
            let state = state_with_products();
            // Newest first
            assert_eq!(state.selected_product().unwrap().id, "3");
        }

        #[test]
        fn test_filter_change_resets_selection() {
            let mut state = state_with_products();
            state.selected_index = 2;
            state.toggle_in_stock();
            assert_eq!(state.selected_index, 0);
            assert_eq!(state.visible_products().len(), 2);
        }

        #[test]
        fn test_set_products_clamps_selection() {
            let mut state = state_with_products();
            state.selected_index = 2;
            state.set_products(vec![product("9", 1.0)]);
            assert_eq!(state.selected_index, 0);
            assert_eq!(state.products_load, LoadState::Loaded);
        }

        #[test]
        fn test_order_selection_bounds() {
            let mut state = AppState::default();
            state.move_order_selection_down();
            assert_eq!(state.orders_selected_index, 0);
            state.move_order_selection_up();
            assert_eq!(state.orders_selected_index, 0);
        }
    }

    mod filter_input {
        use super::*;

        #[test]
        fn test_search_input() {
            let mut state = state_with_products();
            state.products_focus = ProductsFocus::Search;
            state.filter_input_char('2');
            assert_eq!(state.filter.query, "2");
            assert_eq!(state.visible_products().len(), 1);
            state.filter_backspace();
            assert_eq!(state.filter.query, "");
        }

        #[test]
        fn test_max_price_accepts_digits_and_single_dot() {
            let mut state = state_with_products();
            state.products_focus = ProductsFocus::MaxPrice;
            for c in "3a0.5.0".chars() {
                state.filter_input_char(c);
            }
            assert_eq!(state.filter.max_price_input, "30.50");
            assert_eq!(state.filter.max_price(), Some(30.5));
        }

        #[test]
        fn test_list_focus_ignores_input() {
            let mut state = state_with_products();
            state.filter_input_char('x');
            assert_eq!(state.filter.query, "");
        }

        #[test]
        fn test_cycle_category_and_reset() {
            let mut state = state_with_products();
            state.cycle_category();
            assert_eq!(state.filter.category, "Small");
            state.products_focus = ProductsFocus::Search;
            state.reset_filters();
            assert_eq!(state.filter.category, "All");
            assert_eq!(state.products_focus, ProductsFocus::List);
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn test_error_queue_is_fifo() {
            let mut state = AppState::default();
            assert!(!state.has_errors());
            state.push_error("first".to_string());
            state.push_error("second".to_string());
            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
            state.dismiss_error();
        }
    }
}
