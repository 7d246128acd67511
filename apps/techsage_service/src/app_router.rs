use axum::{routing::get, Router};

use crate::{
    collection::collection_controller::collection_router,
    generation::generation_controller::generation_router, health::health_controller,
    session::session_controller::session_router, web::index_page,
};

pub fn application_router() -> Router {
    Router::new()
        .route("/", get(index_page::index))
        .route("/v1/health", get(health_controller::health))
        .nest(
            "/v1",
            session_router()
                .merge(generation_router())
                .merge(collection_router()),
        )
}
