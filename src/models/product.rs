//! Product model

use serde::{Deserialize, Serialize};

/// Product entity of the shop catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique identifier
    pub id: String,
    /// Product name
    pub name: String,
    /// Product description
    pub description: String,
    /// Price, never negative
    pub price: f64,
    /// Image URL
    pub image_url: String,
    /// Units in stock
    #[serde(default)]
    pub stock_quantity: u32,
    /// Free-text category label
    #[serde(default)]
    pub category: Option<String>,
    /// Search-only keywords curated by editors; never rendered
    #[serde(default, skip_serializing)]
    pub hidden_keywords: Vec<String>,
    /// Whether the product is listed
    pub is_active: bool,
}

impl Product {
    /// Create an active product with no stock, category or keywords
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price: price.max(0.0),
            image_url: String::new(),
            stock_quantity: 0,
            category: None,
            hidden_keywords: Vec::new(),
            is_active: true,
        }
    }

    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}
