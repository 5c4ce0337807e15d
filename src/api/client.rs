//! HTTP client for the storefront products and orders services
//!
//! Both services speak plain JSON over HTTP. Wire records are decoded into
//! loose DTOs first and then mapped onto the typed `Product` / `Order`
//! models, so ids and prices tolerate being sent as numbers or strings.

use crate::config::TuiConfig;
use crate::state::{Order, Product};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::traits::StorefrontApi;

/// Request timeout for every call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Body of `POST /orders`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub total: f64,
    pub status: String,
}

impl NewOrder {
    /// A pending order for `quantity` units of `product`
    pub fn for_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            total: product.price * f64::from(quantity),
            status: "pending".to_string(),
        }
    }
}

/// Client for the products and orders services
pub struct StorefrontClient {
    http: reqwest::Client,
    products_url: String,
    orders_url: String,
}

impl StorefrontClient {
    /// Create a client for the service URLs in `config`
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            products_url: config.products_url(),
            orders_url: config.orders_url(),
        })
    }

    fn endpoint(base: &str, path: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), path)
    }

    async fn get_json(&self, url: String, what: &str) -> Result<Value> {
        tracing::debug!("GET {url}");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("{what} fetch failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("{what} fetch failed: {}", status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| anyhow!("{what} fetch failed: {e}"))
    }
}

#[async_trait]
impl StorefrontApi for StorefrontClient {
    async fn list_products(&self) -> Result<Vec<Product>> {
        let body = self
            .get_json(Self::endpoint(&self.products_url, "products"), "Products")
            .await?;
        decode_products(body)
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let body = self
            .get_json(Self::endpoint(&self.orders_url, "orders"), "Orders")
            .await?;
        decode_orders(body)
    }

    async fn create_order(&self, order: &NewOrder) -> Result<Vec<Order>> {
        let url = Self::endpoint(&self.orders_url, "orders");
        tracing::info!("POST {url} for product {}", order.product_id);

        let response = self
            .http
            .post(&url)
            .json(order)
            .send()
            .await
            .map_err(|e| anyhow!("Order failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Order failed: {}", status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| anyhow!("Order failed: {e}"))?;
        decode_orders(body)
    }
}

/// Wire shape of a product
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductDto {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    #[serde(default)]
    name: String,
    description: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    price: f64,
    category: Option<String>,
    #[serde(default)]
    available: Option<bool>,
    image: Option<String>,
}

/// Wire shape of an order
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderDto {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    product_id: String,
    product_name: Option<String>,
    #[serde(default)]
    quantity: u32,
    #[serde(default, deserialize_with = "number_or_string")]
    total: f64,
    #[serde(default)]
    status: String,
    #[serde(default)]
    created_at: String,
}

/// A response that is either a single record or a list of them
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

fn decode_products(body: Value) -> Result<Vec<Product>> {
    if body.is_null() {
        return Ok(Vec::new());
    }
    let dtos: Vec<ProductDto> =
        serde_json::from_value(body).context("Unexpected products response")?;

    Ok(dtos
        .into_iter()
        .map(|p| Product {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            category: p.category.filter(|c| !c.is_empty()),
            available: p.available.unwrap_or(false),
            image: p.image,
        })
        .collect())
}

fn decode_orders(body: Value) -> Result<Vec<Order>> {
    if body.is_null() {
        return Ok(Vec::new());
    }
    let dtos: OneOrMany<OrderDto> =
        serde_json::from_value(body).context("Unexpected orders response")?;

    Ok(Vec::from(dtos)
        .into_iter()
        .map(|o| Order {
            id: o.id,
            product_id: o.product_id,
            product_name: o.product_name.filter(|n| !n.is_empty()),
            quantity: o.quantity,
            total: o.total,
            status: o.status,
            created_at: parse_timestamp(&o.created_at),
        })
        .collect())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("number out of range")),
        Value::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
        Value::Null => Ok(0.0),
        other => Err(serde::de::Error::custom(format!(
            "expected number, got {other}"
        ))),
    }
}

/// Parse an ISO timestamp string to DateTime<Utc>
fn parse_timestamp(s: &str) -> DateTime<Utc> {
    if s.is_empty() {
        return Utc::now();
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
