use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::{make_span_with_request_id, request_id_middleware},
    state::AppState,
};

pub mod auth;
pub mod browse;
pub mod library;
pub mod movies;
pub mod profiles;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Session
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::session))
        // Profiles
        .route("/profiles", get(profiles::list).post(profiles::create))
        .route("/profiles/:id/select", post(profiles::select))
        // Browsing
        .route("/home", get(browse::home))
        .route("/home/load", post(browse::load_initial))
        .route("/view", put(browse::set_view))
        .route("/views/:view", get(browse::view_page))
        .route("/rows", get(browse::rows))
        .route("/rows/:key/more", post(browse::load_more_row))
        .route("/genres", get(browse::genres))
        .route("/catalog", get(browse::catalog))
        .route("/catalog/more", post(browse::load_more_catalog))
        .route("/catalog/refresh", post(browse::refresh_catalog))
        .route("/catalog/filters", put(browse::set_filters))
        .route("/catalog/query", put(browse::set_query))
        .route("/catalog/kids-mode", put(browse::set_kids_mode))
        .route(
            "/suggestions",
            get(browse::suggestions).delete(browse::close_suggestions),
        )
        .route("/suggestions/pick", post(browse::pick_suggestion))
        // Library
        .route(
            "/library/watchlist",
            get(library::watchlist).post(library::toggle_watchlist),
        )
        .route("/library/likes", get(library::likes).post(library::toggle_like))
        .route(
            "/library/history",
            get(library::history).post(library::add_history),
        )
        .route("/library/history/:id/progress", put(library::set_progress))
        .route("/library/continue-watching", get(library::continue_watching))
        .route("/recommendations", get(library::recommendations))
        // Titles
        .route("/movies/:id", get(movies::details))
        .route("/movies/:id/trailer", get(movies::trailer))
        .route("/trending-searches", get(movies::trending_searches))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
