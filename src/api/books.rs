//! Catalog endpoints and per-book ledger aggregates

use axum::{
    extract::{Path, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{book::Book, transaction::HoldingStatus},
};

/// Name substring query
#[derive(Debug, Deserialize, IntoParams)]
pub struct BookNameQuery {
    /// Substring of the book name; omitted matches every book
    pub book: Option<String>,
}

/// Inclusive rate range query
#[derive(Debug, Deserialize, IntoParams)]
pub struct RateRangeQuery {
    #[param(value_type = String)]
    pub min: Decimal,
    #[param(value_type = String)]
    pub max: Decimal,
}

/// Combined catalog search
#[derive(Debug, Deserialize, IntoParams)]
pub struct BookSearchQuery {
    pub book: Option<String>,
    pub category: Option<String>,
    #[param(value_type = String)]
    pub min: Decimal,
    #[param(value_type = String)]
    pub max: Decimal,
}

/// Holder status filter
#[derive(Debug, Deserialize, IntoParams)]
pub struct HoldingQuery {
    /// `all` (default), `open` or `closed`
    pub status: Option<HoldingStatus>,
}

/// Create or replace a book
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PutBookRequest {
    #[validate(length(min = 1, message = "Book name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[schema(value_type = String, example = "2.50")]
    pub rent_per_day: Decimal,
}

/// People who borrowed a book
#[derive(Serialize, ToSchema)]
pub struct HoldersResponse {
    pub book: String,
    pub people: Vec<String>,
}

/// Rent collected for a book
#[derive(Serialize, ToSchema)]
pub struct TotalRentResponse {
    pub book: String,
    #[schema(value_type = String, example = "40")]
    pub total_rent: Decimal,
}

/// List books by name substring
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookNameQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookNameQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state
        .services
        .catalog
        .find_by_name_contains(query.book.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(books))
}

/// List books whose daily rate lies in a range
#[utoipa::path(
    get,
    path = "/books/range",
    tag = "books",
    params(RateRangeQuery),
    responses(
        (status = 200, description = "Books in range", body = Vec<Book>),
        (status = 400, description = "min greater than max", body = crate::error::ErrorResponse)
    )
)]
pub async fn books_in_rate_range(
    State(state): State<crate::AppState>,
    Query(query): Query<RateRangeQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state
        .services
        .catalog
        .find_by_rate_range(query.min, query.max)
        .await?;
    Ok(Json(books))
}

/// Search books by name, category and rate
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(BookSearchQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>),
        (status = 400, description = "min greater than max", body = crate::error::ErrorResponse)
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookSearchQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state
        .services
        .catalog
        .find_by_name_category_and_rate(
            query.book.as_deref().unwrap_or_default(),
            query.category.as_deref().unwrap_or_default(),
            query.min,
            query.max,
        )
        .await?;
    Ok(Json(books))
}

/// Get a book by exact name
#[utoipa::path(
    get,
    path = "/books/{name}",
    tag = "books",
    params(
        ("name" = String, Path, description = "Book name")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_by_name(&name).await?;
    book.map(Json).ok_or(AppError::BookNotFound(name))
}

/// Create or replace a book
#[utoipa::path(
    put,
    path = "/books",
    tag = "books",
    request_body = PutBookRequest,
    responses(
        (status = 200, description = "Book stored", body = Book),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn put_book(
    State(state): State<crate::AppState>,
    Json(request): Json<PutBookRequest>,
) -> AppResult<Json<Book>> {
    request.validate()?;

    let book = state
        .services
        .catalog
        .put_book(Book {
            name: request.name,
            category: request.category,
            rent_per_day: request.rent_per_day,
        })
        .await?;
    Ok(Json(book))
}

/// People who borrowed a book
#[utoipa::path(
    get,
    path = "/books/{name}/holders",
    tag = "ledger",
    params(
        ("name" = String, Path, description = "Book name"),
        HoldingQuery
    ),
    responses(
        (status = 200, description = "Borrowers of the book", body = HoldersResponse)
    )
)]
pub async fn book_holders(
    State(state): State<crate::AppState>,
    Path(name): Path<String>,
    Query(query): Query<HoldingQuery>,
) -> AppResult<Json<HoldersResponse>> {
    let people = state
        .services
        .ledger
        .holders_of(&name, query.status.unwrap_or_default())
        .await?;
    Ok(Json(HoldersResponse { book: name, people }))
}

/// Total rent a book has generated
#[utoipa::path(
    get,
    path = "/books/{name}/rent",
    tag = "ledger",
    params(
        ("name" = String, Path, description = "Book name")
    ),
    responses(
        (status = 200, description = "Rent collected", body = TotalRentResponse)
    )
)]
pub async fn book_total_rent(
    State(state): State<crate::AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<TotalRentResponse>> {
    let total_rent = state.services.ledger.total_rent_for(&name).await?;
    Ok(Json(TotalRentResponse {
        book: name,
        total_rent,
    }))
}
