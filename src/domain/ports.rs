use async_trait::async_trait;
use chrono::NaiveDate;

use super::errors::CatalogError;
use super::product::Product;

/// Read-only product lookup.
pub trait Catalog: Send + Sync + 'static {
    fn find(&self, id: i32) -> Result<Product, CatalogError>;
    /// First gift-flagged product in storage order.
    fn find_gift(&self) -> Result<Product, CatalogError>;
}

/// Source of per-product discount fractions.
///
/// Implementations never fail: an unavailable backend yields `0.0`, so a
/// discount outage charges full price instead of blocking the checkout.
#[async_trait]
pub trait DiscountResolver: Send + Sync + 'static {
    /// Returns a fraction in `[0.0, 1.0]`.
    async fn get_discount(&self, product_id: i32) -> f32;
}

pub trait Clock: Send + Sync + 'static {
    fn today(&self) -> NaiveDate;
}
