// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{comments, games},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Public reads: games catalog and per-game comment listings.
/// * Authenticated writes: the comment lifecycle (create/edit/delete/restore),
///   each guarded by the `Principal` extractor on its handler.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let game_routes = Router::new()
        .route("/", get(games::list_games))
        .route("/{id}", get(games::get_game))
        .route(
            "/{id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        );

    let comment_routes = Router::new()
        .route(
            "/{id}",
            put(comments::edit_comment).delete(comments::delete_comment),
        )
        .route("/{id}/restore", post(comments::restore_comment));

    Router::new()
        .nest("/api/games", game_routes)
        .nest("/api/comments", comment_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
