//! Product and order listings with client-side filtering

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Category entry that disables category filtering
pub const ALL_CATEGORIES: &str = "All";

/// Product as listed by the products service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
    pub available: bool,
    pub image: Option<String>,
}

/// Order as listed by the orders service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub product_id: String,
    pub product_name: Option<String>,
    pub quantity: u32,
    pub total: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// First 8 characters of the id
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }

    pub fn product_label(&self) -> &str {
        self.product_name.as_deref().unwrap_or(&self.product_id)
    }

    pub fn is_delivered(&self) -> bool {
        self.status == "delivered"
    }
}

/// Loading state of one remote list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    Failed(String),
}

/// Sort order for products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
}

impl ProductSort {
    pub fn next(&self) -> Self {
        match self {
            Self::Newest => Self::Oldest,
            Self::Oldest => Self::PriceAsc,
            Self::PriceAsc => Self::PriceDesc,
            Self::PriceDesc => Self::Newest,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Newest => "Newest",
            Self::Oldest => "Oldest",
            Self::PriceAsc => "Price: Low → High",
            Self::PriceDesc => "Price: High → Low",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let by_price = || a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal);
        match self {
            Self::PriceAsc => by_price(),
            Self::PriceDesc => by_price().reverse(),
            // Ids are issued in creation order
            Self::Oldest => a.id.cmp(&b.id),
            Self::Newest => b.id.cmp(&a.id),
        }
    }
}

/// Product list filters
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    pub query: String,
    pub category: String,
    pub in_stock_only: bool,
    /// Raw max-price input; parsed on use
    pub max_price_input: String,
    pub sort: ProductSort,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: ALL_CATEGORIES.to_string(),
            in_stock_only: false,
            max_price_input: String::new(),
            sort: ProductSort::default(),
        }
    }
}

impl ProductFilter {
    /// Parsed max price, `None` when empty or not a number
    pub fn max_price(&self) -> Option<f64> {
        let trimmed = self.max_price_input.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse().ok()
    }

    /// Restore all filters to their defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Move to the next entry of `categories`, wrapping to the first
    pub fn cycle_category(&mut self, categories: &[String]) {
        if categories.is_empty() {
            self.category = ALL_CATEGORIES.to_string();
            return;
        }
        let next = categories
            .iter()
            .position(|c| *c == self.category)
            .map(|idx| (idx + 1) % categories.len())
            .unwrap_or(0);
        self.category = categories[next].clone();
    }

    /// Filter and sort `products`
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let query = self.query.trim().to_lowercase();
        let max_price = self.max_price();

        let mut list: Vec<&Product> = products
            .iter()
            .filter(|p| {
                query.is_empty()
                    || p.name.to_lowercase().contains(&query)
                    || p.description
                        .as_deref()
                        .unwrap_or("")
                        .to_lowercase()
                        .contains(&query)
            })
            .filter(|p| {
                self.category == ALL_CATEGORIES || p.category.as_deref() == Some(self.category.as_str())
            })
            .filter(|p| !self.in_stock_only || p.available)
            .filter(|p| max_price.map_or(true, |max| p.price <= max))
            .collect();

        list.sort_by(|a, b| self.sort.compare(a, b));
        list
    }
}

/// `"All"` followed by distinct categories in first-seen order
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut result = vec![ALL_CATEGORIES.to_string()];
    for category in products.iter().filter_map(|p| p.category.as_ref()) {
        if !result.contains(category) {
            result.push(category.clone());
        }
    }
    result
}
