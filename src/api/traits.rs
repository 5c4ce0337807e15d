//! Trait abstraction for the storefront services to enable mocking in tests

use crate::state::{Order, Product};
use anyhow::Result;
use async_trait::async_trait;

use super::client::NewOrder;

/// Operations against the products and orders services
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// `GET /products`
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// `GET /orders`
    async fn list_orders(&self) -> Result<Vec<Order>>;

    /// `POST /orders`; the service may echo one record or an array
    async fn create_order(&self, order: &NewOrder) -> Result<Vec<Order>>;
}
