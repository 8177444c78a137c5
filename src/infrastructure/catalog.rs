use std::fs;
use std::path::Path;

use crate::domain::errors::CatalogError;
use crate::domain::ports::Catalog;
use crate::domain::product::Product;

// ── Catalog ───────────────────────────────────────────────────────────────────

/// Product catalog held in memory, sorted ascending by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    /// Wraps `products` as-is. The caller guarantees they are sorted by id;
    /// lookups are wrong otherwise.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Loads a JSON array of products and rejects it unless ids are strictly
    /// ascending.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let load_error = |reason: String| CatalogError::Load {
            path: path.display().to_string(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        let products: Vec<Product> =
            serde_json::from_str(&content).map_err(|e| load_error(e.to_string()))?;

        if let Some(pair) = products.windows(2).find(|w| w[0].id >= w[1].id) {
            return Err(CatalogError::Unsorted {
                previous: pair[0].id,
                current: pair[1].id,
            });
        }

        Ok(Self::new(products))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Catalog for InMemoryCatalog {
    fn find(&self, id: i32) -> Result<Product, CatalogError> {
        self.products
            .binary_search_by_key(&id, |p| p.id)
            .map(|idx| self.products[idx].clone())
            .map_err(|_| CatalogError::ProductNotFound(id))
    }

    fn find_gift(&self) -> Result<Product, CatalogError> {
        self.products
            .iter()
            .find(|p| p.is_gift)
            .cloned()
            .ok_or(CatalogError::NoGiftAvailable)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn product(id: i32, amount: i64, is_gift: bool) -> Product {
        Product {
            id,
            title: format!("title {id}"),
            description: format!("description {id}"),
            amount,
            is_gift,
        }
    }

    fn write_catalog(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(json.as_bytes()).expect("write failed");
        file
    }

    #[test]
    fn find_returns_product_by_id() {
        let catalog = InMemoryCatalog::new((1..=50).map(|id| product(id, 10, false)).collect());
        for id in [1, 2, 25, 49, 50] {
            assert_eq!(catalog.find(id).expect("should exist").id, id);
        }
    }

    #[test]
    fn find_handles_gaps_in_ids() {
        let catalog = InMemoryCatalog::new(vec![
            product(2, 10, false),
            product(5, 20, false),
            product(9, 30, false),
        ]);
        assert_eq!(catalog.find(5).expect("should exist").amount, 20);
        for missing in [0, 1, 3, 6, 10] {
            assert!(matches!(
                catalog.find(missing),
                Err(CatalogError::ProductNotFound(id)) if id == missing
            ));
        }
    }

    #[test]
    fn find_on_empty_catalog_is_not_found() {
        let catalog = InMemoryCatalog::default();
        assert!(matches!(
            catalog.find(1),
            Err(CatalogError::ProductNotFound(1))
        ));
    }

    #[test]
    fn find_gift_returns_first_gift_in_storage_order() {
        let catalog = InMemoryCatalog::new(vec![
            product(1, 10, false),
            product(4, 20, true),
            product(7, 30, true),
        ]);
        assert_eq!(catalog.find_gift().expect("gift exists").id, 4);
    }

    #[test]
    fn find_gift_without_gifts_is_no_gift_available() {
        let catalog = InMemoryCatalog::new(vec![product(1, 10, false)]);
        assert!(matches!(
            catalog.find_gift(),
            Err(CatalogError::NoGiftAvailable)
        ));
    }

    #[test]
    fn from_json_file_loads_products() {
        let file = write_catalog(
            r#"[
                {"id": 1, "title": "Ergonomic Wooden Pants", "description": "Deleniti beatae porro.", "amount": 15157, "is_gift": false},
                {"id": 6, "title": "Ergonomic Cotton Keyboard", "description": "Iste est ratione.", "amount": 6000, "is_gift": true}
            ]"#,
        );

        let catalog = InMemoryCatalog::from_json_file(file.path()).expect("load failed");

        assert_eq!(catalog.len(), 2);
        let pants = catalog.find(1).expect("should exist");
        assert_eq!(pants.title, "Ergonomic Wooden Pants");
        assert_eq!(pants.amount, 15157);
        assert!(catalog.find(6).expect("should exist").is_gift);
    }

    #[test]
    fn from_json_file_rejects_unsorted_ids() {
        let file = write_catalog(
            r#"[
                {"id": 3, "title": "a", "description": "a", "amount": 1, "is_gift": false},
                {"id": 2, "title": "b", "description": "b", "amount": 1, "is_gift": false}
            ]"#,
        );

        let err = InMemoryCatalog::from_json_file(file.path()).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Unsorted {
                previous: 3,
                current: 2
            }
        ));
    }

    #[test]
    fn from_json_file_rejects_duplicate_ids() {
        let file = write_catalog(
            r#"[
                {"id": 2, "title": "a", "description": "a", "amount": 1, "is_gift": false},
                {"id": 2, "title": "b", "description": "b", "amount": 1, "is_gift": false}
            ]"#,
        );

        assert!(matches!(
            InMemoryCatalog::from_json_file(file.path()),
            Err(CatalogError::Unsorted { .. })
        ));
    }

    #[test]
    fn from_json_file_reports_malformed_json() {
        let file = write_catalog("not json");
        assert!(matches!(
            InMemoryCatalog::from_json_file(file.path()),
            Err(CatalogError::Load { .. })
        ));
    }

    #[test]
    fn from_json_file_reports_missing_file() {
        let err = InMemoryCatalog::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
