//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, transactions};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Book Rental API",
        version = "1.0.0",
        description = "Book catalog and rental ledger REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Catalog
        books::list_books,
        books::books_in_rate_range,
        books::search_books,
        books::get_book,
        books::put_book,
        // Ledger
        books::book_holders,
        books::book_total_rent,
        transactions::issue_book,
        transactions::return_book,
        transactions::list_transactions,
        transactions::get_transaction,
        transactions::person_books,
    ),
    components(
        schemas(
            // Catalog
            crate::models::book::Book,
            books::PutBookRequest,
            books::HoldersResponse,
            books::TotalRentResponse,
            // Ledger
            crate::models::transaction::Transaction,
            crate::models::transaction::HoldingStatus,
            transactions::IssueRequest,
            transactions::IssueResponse,
            transactions::ReturnRequest,
            transactions::ReturnResponse,
            transactions::PersonBooksResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog"),
        (name = "ledger", description = "Rental transactions and aggregates")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
