//! Application state and core logic

use crate::api::{NewOrder, StorefrontApi, StorefrontClient};
use crate::config::TuiConfig;
use crate::platform;
use crate::state::{
    AppState, DynamicForm, FieldInput, FileStore, Form, FormButton, FormSchema, LoadState,
    MemoryStore, ProductsFocus, SnapshotStore, SubmitError, View,
};
use anyhow::{Context, Result};
use arboard::Clipboard;
use crossterm::event::{KeyCode, KeyEvent};
use serde_json::Value;
use std::fs;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Client for the products and orders services
    api: Box<dyn StorefrontApi>,
    /// The sign-up form
    pub form: DynamicForm,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App from user configuration
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let api = StorefrontClient::new(config)?;

        let mut startup_error = None;
        let schema = match load_schema(config) {
            Ok(schema) => schema,
            Err(err) => {
                tracing::warn!("Falling back to the built-in form: {err:#}");
                startup_error = Some(format!("{err:#}"));
                FormSchema::builtin()?
            }
        };

        let key = config.form_storage_key();
        let form = DynamicForm::mount(schema, key, open_store(config));

        let mut app = Self::with_parts(Box::new(api), form);
        if let Some(message) = startup_error {
            app.state.push_error(message);
        }
        Ok(app)
    }

    /// Assemble an App from already-built parts
    pub fn with_parts(api: Box<dyn StorefrontApi>, form: DynamicForm) -> Self {
        Self {
            state: AppState::default(),
            api,
            form,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether key presses are currently typed into an input
    pub fn in_text_entry(&self) -> bool {
        match self.state.current_view {
            View::Products => self.state.products_focus.is_text_entry(),
            View::Orders => false,
            View::Signup => !self.form.is_buttons_row_active(),
        }
    }

    /// Reload the product list
    pub async fn refresh_products(&mut self) {
        self.state.products_load = LoadState::Loading;
        match self.api.list_products().await {
            Ok(products) => {
                tracing::debug!("Loaded {} products", products.len());
                self.state.set_products(products);
            }
            Err(err) => {
                tracing::warn!("Products unavailable: {err:#}");
                self.state.products_load = LoadState::Failed(err.to_string());
            }
        }
    }

    /// Reload the order list
    pub async fn refresh_orders(&mut self) {
        self.state.orders_load = LoadState::Loading;
        match self.api.list_orders().await {
            Ok(orders) => {
                tracing::debug!("Loaded {} orders", orders.len());
                self.state.set_orders(orders);
            }
            Err(err) => {
                tracing::warn!("Orders unavailable: {err:#}");
                self.state.orders_load = LoadState::Failed(err.to_string());
            }
        }
    }

    pub async fn refresh_all(&mut self) {
        self.refresh_products().await;
        self.refresh_orders().await;
    }

    /// Order one unit of the selected product, then reload orders
    pub async fn place_order_for_selected(&mut self) {
        let Some(product) = self.state.selected_product().cloned() else {
            return;
        };
        if !product.available {
            self.state.status_message = Some(format!("{} is out of stock", product.name));
            return;
        }

        let order = NewOrder::for_product(&product, 1);
        match self.api.create_order(&order).await {
            Ok(_) => {
                self.state.status_message = Some(format!("Order placed for {}", product.name));
                self.refresh_orders().await;
            }
            Err(err) => self.state.push_error(err.to_string()),
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        if !self.in_text_entry() {
            match key.code {
                KeyCode::Char('q') => {
                    self.quit = true;
                    return Ok(());
                }
                KeyCode::Char(c) => {
                    if let Some(view) = View::from_digit(c) {
                        self.switch_view(view);
                        return Ok(());
                    }
                }
                _ => {}
            }
        }

        match self.state.current_view {
            View::Products => self.handle_products_key(key).await,
            View::Orders => self.handle_orders_key(key).await,
            View::Signup => self.handle_signup_key(key),
        }
        Ok(())
    }

    fn switch_view(&mut self, view: View) {
        self.state.current_view = view;
        self.state.products_focus = ProductsFocus::List;
    }

    async fn handle_products_key(&mut self, key: KeyEvent) {
        if self.state.products_focus.is_text_entry() {
            match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => {
                    self.state.products_focus = ProductsFocus::List;
                }
                KeyCode::Backspace => self.state.filter_backspace(),
                KeyCode::Char(c) => self.state.filter_input_char(c),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.state.visible_products().len();
                self.state.move_selection_down(len);
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Char('/') => self.state.products_focus = ProductsFocus::Search,
            KeyCode::Char('m') => self.state.products_focus = ProductsFocus::MaxPrice,
            KeyCode::Char('c') => self.state.cycle_category(),
            KeyCode::Char('i') => self.state.toggle_in_stock(),
            KeyCode::Char('s') => self.state.cycle_sort(),
            KeyCode::Char('x') => self.state.reset_filters(),
            KeyCode::Char('o') => self.place_order_for_selected().await,
            KeyCode::Char('r') => self.refresh_all().await,
            _ => {}
        }
    }

    async fn handle_orders_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.state.move_order_selection_down(),
            KeyCode::Up | KeyCode::Char('k') => self.state.move_order_selection_up(),
            KeyCode::Char('r') => self.refresh_orders().await,
            KeyCode::Esc => self.switch_view(View::Products),
            _ => {}
        }
    }

    fn handle_signup_key(&mut self, key: KeyEvent) {
        let on_action_panel = self.form.is_buttons_row_active();
        let shortcut = platform::is_shortcut(key.modifiers);

        match key.code {
            KeyCode::Tab => self.form.next_field(),
            KeyCode::BackTab => self.form.prev_field(),
            // Keyboard shortcuts (work from anywhere)
            KeyCode::Char('s') if shortcut => self.save_form(),
            KeyCode::Char('r') if shortcut => self.reset_form(),
            KeyCode::Char('y') if shortcut => self.copy_last_committed(),
            KeyCode::Char('v') if shortcut => self.paste_snapshot(),
            KeyCode::Esc => self.switch_view(View::Products),
            // Action panel
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k')
                if on_action_panel =>
            {
                self.form.prev_button()
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j')
                if on_action_panel =>
            {
                self.form.next_button()
            }
            KeyCode::Enter if on_action_panel => match self.form.selected_form_button() {
                FormButton::Save => self.save_form(),
                FormButton::Reset => self.reset_form(),
            },
            // Field input
            KeyCode::Char(c) if !shortcut => {
                self.form.handle_input(FieldInput::Char(c));
            }
            KeyCode::Backspace => {
                self.form.handle_input(FieldInput::Backspace);
            }
            KeyCode::Left => {
                self.form.handle_input(FieldInput::Prev);
            }
            KeyCode::Right => {
                self.form.handle_input(FieldInput::Next);
            }
            KeyCode::Enter | KeyCode::Down => self.form.next_field(),
            KeyCode::Up => self.form.prev_field(),
            _ => {}
        }
    }

    /// Validate and persist the form
    fn save_form(&mut self) {
        match self.form.submit() {
            Ok(committed) => {
                tracing::info!(
                    "Sign-up form saved under '{}' with {} value(s)",
                    self.form.key(),
                    committed.values.len()
                );
                self.state.status_message = Some("Saved".to_string());
            }
            Err(SubmitError::Invalid(failed)) => {
                // Focus the first field needing attention
                let first = self
                    .form
                    .schema()
                    .fields()
                    .iter()
                    .position(|f| failed.errors.contains_key(&f.name));
                if let Some(idx) = first {
                    let name = self.form.schema().fields()[idx].name.clone();
                    self.form.set_active_field(idx);
                    self.state.status_message = failed
                        .message(&name)
                        .map(|message| format!("{name}: {message}"));
                }
            }
            Err(err @ SubmitError::Storage(_)) => self.state.push_error(err.to_string()),
        }
    }

    fn reset_form(&mut self) {
        match self.form.reset() {
            Ok(()) => self.state.status_message = Some("Form reset".to_string()),
            Err(err) => self.state.push_error(format!("Could not clear saved form: {err}")),
        }
    }

    /// Copy the last saved snapshot as JSON
    fn copy_last_committed(&mut self) {
        let Some(committed) = self.form.last_committed() else {
            self.state.status_message = Some("Nothing saved yet".to_string());
            return;
        };

        let result = serde_json::to_string_pretty(&committed.values)
            .context("Failed to encode snapshot")
            .and_then(|json| copy_to_clipboard(&json));

        match result {
            Ok(()) => self.state.status_message = Some("Copied saved form".to_string()),
            Err(err) => self.state.push_error(format!("{err:#}")),
        }
    }

    /// Overlay form values from a JSON snapshot on the clipboard
    fn paste_snapshot(&mut self) {
        let text = match paste_from_clipboard() {
            Ok(text) => text,
            Err(err) => {
                self.state.push_error(format!("{err:#}"));
                return;
            }
        };

        let pasted = serde_json::from_str::<Value>(&text)
            .map(|value| self.form.overlay_json(&value))
            .unwrap_or(false);
        self.state.status_message = Some(if pasted {
            "Pasted form values".to_string()
        } else {
            "Clipboard does not hold a form snapshot".to_string()
        });
    }
}

/// Form schema from the configured file, or the built-in one
fn load_schema(config: &TuiConfig) -> Result<FormSchema> {
    let Some(path) = &config.schema_path else {
        return Ok(FormSchema::builtin()?);
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read form schema {}", path.display()))?;
    let schema = FormSchema::from_json(&text)
        .with_context(|| format!("Invalid form schema {}", path.display()))?;
    tracing::info!("Loaded {} field(s) from {}", schema.len(), path.display());
    Ok(schema)
}

/// File store in the configured or default data directory, memory as a last resort
fn open_store(config: &TuiConfig) -> Box<dyn SnapshotStore> {
    let store = match &config.form_storage_dir {
        Some(dir) => Some(FileStore::new(dir)),
        None => FileStore::default_location(),
    };

    match store {
        Some(store) => {
            tracing::debug!("Form snapshots stored in {}", store.dir().display());
            Box::new(store)
        }
        None => {
            tracing::warn!("No data directory available; form values will not survive restarts");
            Box::new(MemoryStore::new())
        }
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Clipboard unavailable")?;
    clipboard.set_text(text)?;
    Ok(())
}

fn paste_from_clipboard() -> Result<String> {
    let mut clipboard = Clipboard::new().context("Clipboard unavailable")?;
    Ok(clipboard.get_text()?)
}
