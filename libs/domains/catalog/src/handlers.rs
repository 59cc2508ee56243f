use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{Product, ProductFilter};
use crate::repository::ProductRepository;
use crate::service::CatalogService;

/// OpenAPI documentation for the catalog API
#[derive(utoipa::OpenApi)]
#[openapi(
    paths(list_products, get_product),
    components(schemas(Product, ProductFilter))
)]
pub struct CatalogApiDoc;

/// Create the catalog router
pub fn router<R: ProductRepository + 'static>(service: CatalogService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
        .with_state(shared_service)
}

/// List products
///
/// GET /products?category=laptops&limit=10&offset=0
#[utoipa::path(
    get,
    path = "/products",
    tag = "catalog",
    params(ProductFilter),
    responses(
        (status = 200, description = "Products", body = [Product])
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Query(filter): Query<ProductFilter>,
) -> CatalogResult<Json<Vec<Product>>> {
    let products = service.list_products(filter).await?;
    Ok(Json(products))
}

/// Get a product by ID
///
/// GET /products/:id
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "catalog",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 404, description = "Unknown product")
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<Uuid>,
) -> CatalogResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewProduct;
    use crate::repository::InMemoryProductRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn seeded_app() -> (Router, Uuid) {
        let service = CatalogService::new(InMemoryProductRepository::new());
        let product = service
            .add_product(NewProduct {
                name: "Laptop 7".to_string(),
                description: "Slim ultrabook".to_string(),
                price: 899.0,
                category: "laptops".to_string(),
                image_url: None,
            })
            .await
            .unwrap();
        (router(service), product.id)
    }

    #[tokio::test]
    async fn test_list_products() {
        let (app, _) = seeded_app().await;

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let products: Vec<Product> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn test_get_product_by_id() {
        let (app, id) = seeded_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_product_is_404() {
        let (app, _) = seeded_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/{}", Uuid::now_v7()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
