use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, add_book, available_books, borrow_book, categories, dashboard, list_books,
    list_loans, list_members, return_book, search,
};

/// Creates the API router with the catalog and circulation endpoints
///
/// Command endpoints (Write operations):
/// - POST /books - Add a book to the catalog
/// - POST /loans - Borrow a book
/// - POST /loans/:isbn/return - Return a borrowed book
///
/// Query endpoints (Read operations, plain data - the browser owns markup):
/// - GET /dashboard - Totals, per-type counts, recent additions
/// - GET /categories - Category histogram
/// - GET /books - Catalog listing with filter/sort
/// - GET /books/available - Selection list for the borrow form
/// - GET /search - Cross-field search
/// - GET /loans - Open loans, oldest first
/// - GET /members - Member roster for the borrow form
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Command endpoints (Write operations)
        .route("/books", get(list_books).post(add_book))
        .route("/loans", get(list_loans).post(borrow_book))
        .route("/loans/:isbn/return", post(return_book))
        // Query endpoints (Read operations)
        .route("/books/available", get(available_books))
        .route("/dashboard", get(dashboard))
        .route("/categories", get(categories))
        .route("/search", get(search))
        .route("/members", get(list_members))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
