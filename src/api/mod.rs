//! HTTP client module for the products and orders services

mod client;
mod traits;

pub use client::{NewOrder, StorefrontClient};
pub use traits::StorefrontApi;

#[cfg(test)]
pub use traits::MockStorefrontApi;
