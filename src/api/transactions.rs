//! Rental transaction endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{date::parse_iso_date, transaction::Transaction},
};

use super::books::HoldingQuery;

/// Issue request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct IssueRequest {
    #[validate(length(min = 1, message = "Book name must not be empty"))]
    pub book: String,
    #[validate(length(min = 1, message = "Person name must not be empty"))]
    pub person: String,
    /// YYYY-MM-DD
    #[schema(example = "2024-01-01")]
    pub issue_date: String,
}

/// Issue outcome
#[derive(Serialize, ToSchema)]
pub struct IssueResponse {
    /// Always `true`; failures are reported as error responses
    pub issued: bool,
    pub transaction: Transaction,
}

/// Return request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReturnRequest {
    #[validate(length(min = 1, message = "Book name must not be empty"))]
    pub book: String,
    #[validate(length(min = 1, message = "Person name must not be empty"))]
    pub person: String,
    /// YYYY-MM-DD
    #[schema(example = "2024-01-05")]
    pub return_date: String,
}

/// Rent charged for the loan just closed
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    pub book: String,
    pub person: String,
    #[schema(value_type = String, example = "40")]
    pub rent: Decimal,
}

/// Issue-date window, both ends inclusive
#[derive(Debug, Deserialize, IntoParams)]
pub struct DateRangeQuery {
    /// YYYY-MM-DD
    pub start_date: String,
    /// YYYY-MM-DD
    pub end_date: String,
}

/// Books borrowed by a person
#[derive(Serialize, ToSchema)]
pub struct PersonBooksResponse {
    pub person: String,
    pub books: Vec<String>,
}

/// Issue a book to a person
#[utoipa::path(
    post,
    path = "/transactions/issue",
    tag = "ledger",
    request_body = IssueRequest,
    responses(
        (status = 201, description = "Book issued", body = IssueResponse),
        (status = 400, description = "Invalid input or date", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn issue_book(
    State(state): State<crate::AppState>,
    Json(request): Json<IssueRequest>,
) -> AppResult<(StatusCode, Json<IssueResponse>)> {
    request.validate()?;
    let issue_date = parse_iso_date(&request.issue_date)?;

    let transaction = state
        .services
        .ledger
        .issue(&request.book, &request.person, issue_date)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(IssueResponse {
            issued: true,
            transaction,
        }),
    ))
}

/// Return a borrowed book and charge its rent
#[utoipa::path(
    post,
    path = "/transactions/return",
    tag = "ledger",
    request_body = ReturnRequest,
    responses(
        (status = 200, description = "Book returned", body = ReturnResponse),
        (status = 400, description = "Invalid date", body = crate::error::ErrorResponse),
        (status = 404, description = "No such transaction", body = crate::error::ErrorResponse),
        (status = 409, description = "Already returned", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Json(request): Json<ReturnRequest>,
) -> AppResult<Json<ReturnResponse>> {
    request.validate()?;
    let return_date = parse_iso_date(&request.return_date)?;

    let rent = state
        .services
        .ledger
        .return_book(&request.book, &request.person, return_date)
        .await?;

    Ok(Json(ReturnResponse {
        book: request.book,
        person: request.person,
        rent,
    }))
}

/// Transactions issued within a date window
#[utoipa::path(
    get,
    path = "/transactions",
    tag = "ledger",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Transactions in window", body = Vec<Transaction>),
        (status = 400, description = "Invalid date or window", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_transactions(
    State(state): State<crate::AppState>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<Transaction>>> {
    let start = parse_iso_date(&query.start_date)?;
    let end = parse_iso_date(&query.end_date)?;

    let transactions = state
        .services
        .ledger
        .transactions_issued_between(start, end)
        .await?;
    Ok(Json(transactions))
}

/// Get the transaction of a person on a book
#[utoipa::path(
    get,
    path = "/transactions/{book}/{person}",
    tag = "ledger",
    params(
        ("book" = String, Path, description = "Book name"),
        ("person" = String, Path, description = "Person name")
    ),
    responses(
        (status = 200, description = "Transaction", body = Transaction),
        (status = 404, description = "No such transaction", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_transaction(
    State(state): State<crate::AppState>,
    Path((book, person)): Path<(String, String)>,
) -> AppResult<Json<Transaction>> {
    let transaction = state.services.ledger.get_transaction(&book, &person).await?;
    transaction.map(Json).ok_or(AppError::TransactionNotFound {
        book_name: book,
        person_name: person,
    })
}

/// Books borrowed by a person
#[utoipa::path(
    get,
    path = "/people/{name}/books",
    tag = "ledger",
    params(
        ("name" = String, Path, description = "Person name"),
        HoldingQuery
    ),
    responses(
        (status = 200, description = "Books of the person", body = PersonBooksResponse)
    )
)]
pub async fn person_books(
    State(state): State<crate::AppState>,
    Path(name): Path<String>,
    Query(query): Query<HoldingQuery>,
) -> AppResult<Json<PersonBooksResponse>> {
    let books = state
        .services
        .ledger
        .books_held_by(&name, query.status.unwrap_or_default())
        .await?;
    Ok(Json(PersonBooksResponse {
        person: name,
        books,
    }))
}
