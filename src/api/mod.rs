//! API handlers for the rental REST endpoints

pub mod books;
pub mod health;
pub mod openapi;
pub mod transactions;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Service banner served at the root path
pub async fn index() -> Json<&'static str> {
    Json("Books Management Project")
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Catalog
        .route("/books", get(books::list_books).put(books::put_book))
        .route("/books/range", get(books::books_in_rate_range))
        .route("/books/search", get(books::search_books))
        .route("/books/:name", get(books::get_book))
        .route("/books/:name/holders", get(books::book_holders))
        .route("/books/:name/rent", get(books::book_total_rent))
        // Ledger
        .route("/transactions", get(transactions::list_transactions))
        .route("/transactions/issue", post(transactions::issue_book))
        .route("/transactions/return", post(transactions::return_book))
        .route(
            "/transactions/:book/:person",
            get(transactions::get_transaction),
        )
        .route("/people/:name/books", get(transactions::person_books))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .route("/", get(index))
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
