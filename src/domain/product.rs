use serde::Deserialize;

/// A catalog entry. Amounts are in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Product {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub amount: i64,
    pub is_gift: bool,
}
