//! Catalog Domain
//!
//! Product storage and the read API the chat frontend browses. Each product
//! is also projected into a free-text document ([`Product::document_text`])
//! that the seeder feeds to the similarity index.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use handlers::CatalogApiDoc;
pub use models::{NewProduct, Product, ProductFilter};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::CatalogService;
