use axum::{Extension, Router};
use futures::FutureExt;
use std::sync::Arc;

use domain_catalog::{CatalogService, PgProductRepository};
use domain_chat::{
    ChatOrchestrator, ChatService, ChatState, OpenRouterProvider, PgChatRepository,
    SimilarityRetriever, handlers as chat_handlers,
};
use domain_users::{AuthState, PgUserRepository, UserService, auth_handlers};
use domain_vector::{
    EmbeddingConfig, IndexConfig, LazyIndex, OpenAIProvider, QdrantConfig, QdrantRepository,
    SimilarityIndex,
};

use core_config::FromEnv;

use crate::state::AppState;

/// Build the similarity index behind single-flight lazy initialization.
///
/// The Qdrant client and embedding provider are constructed once, by the
/// first chat request; concurrent first requests wait on the same
/// construction instead of duplicating it.
fn lazy_similarity_index() -> Arc<LazyIndex<QdrantRepository>> {
    Arc::new(LazyIndex::new(|| {
        async {
            let repository = QdrantRepository::new(QdrantConfig::from_env()?)?;
            let embedder = Arc::new(OpenAIProvider::new(EmbeddingConfig::from_env()?));
            SimilarityIndex::new(repository, embedder, IndexConfig::from_env()?).await
        }
        .boxed()
    }))
}

/// Creates the public routes (`/auth`, `/chat`, `/products`).
///
/// Each domain router applies its own state; only the JWT extension is
/// shared, feeding the `AuthUser` extractor on the chat routes.
pub fn routes(state: &AppState) -> eyre::Result<Router> {
    let auth_router = auth_handlers::router(AuthState {
        service: UserService::new(PgUserRepository::new(state.db.clone())),
        jwt: state.jwt_auth.clone(),
    });

    let catalog_router = domain_catalog::handlers::router(CatalogService::new(
        PgProductRepository::new(state.db.clone()),
    ));

    let retriever = Arc::new(SimilarityRetriever::new(lazy_similarity_index()));
    let completion = Arc::new(
        OpenRouterProvider::from_env().map_err(|e| eyre::eyre!("completion client: {}", e))?,
    );
    let orchestrator = ChatOrchestrator::new(
        ChatService::new(PgChatRepository::new(state.db.clone())),
        retriever,
        completion,
    );
    let chat_router = chat_handlers::router(ChatState::new(orchestrator));

    Ok(Router::new()
        .nest("/auth", auth_router)
        .nest("/chat", chat_router)
        .nest("/products", catalog_router)
        .layer(Extension(state.jwt_auth.clone())))
}
