use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product with id={0} not found in catalog")]
    ProductNotFound(i32),
    #[error("No gift product found in catalog")]
    NoGiftAvailable,
    #[error("Failed to load catalog from {path}: {reason}")]
    Load { path: String, reason: String },
    #[error("Catalog is not sorted by id: id={current} follows id={previous}")]
    Unsorted { previous: i32, current: i32 },
}
