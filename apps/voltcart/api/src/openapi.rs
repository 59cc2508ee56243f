use utoipa::OpenApi;

/// Root OpenAPI document; domain docs are merged in below.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Voltcart API",
        description = "Retrieval-augmented chat backend for the Voltcart electronics catalog"
    ),
    paths(axum_helpers::health::health_handler),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "chat", description = "Grounded chat sessions"),
        (name = "catalog", description = "Product catalog"),
        (name = "health", description = "Liveness")
    )
)]
struct ApiDoc;

/// The merged OpenAPI document served at /api-docs/openapi.json
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.merge(domain_users::AuthApiDoc::openapi());
    doc.merge(domain_chat::ChatApiDoc::openapi());
    doc.merge(domain_catalog::CatalogApiDoc::openapi());
    doc
}
