use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Product entity - matches SQL schema
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image_url: Option<String>,
}

impl Product {
    /// The free-text projection stored in the similarity index.
    ///
    /// One document per product; the product id travels as payload metadata
    /// so retrieved snippets can be traced back to catalog entries.
    pub fn document_text(&self) -> String {
        format!(
            "{}. {}. Price: {:.2}",
            self.name, self.description, self.price
        )
    }
}

/// Input for inserting a catalog entry (used by the seeder)
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image_url: Option<String>,
}

/// Query filters for listing products
#[derive(Debug, Clone, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct ProductFilter {
    pub category: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    50
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_text_projection() {
        let product = Product {
            id: Uuid::now_v7(),
            name: "Laptop 7".to_string(),
            description: "Slim ultrabook with 16GB RAM".to_string(),
            price: 899.0,
            category: "laptops".to_string(),
            image_url: None,
        };

        assert_eq!(
            product.document_text(),
            "Laptop 7. Slim ultrabook with 16GB RAM. Price: 899.00"
        );
    }
}
