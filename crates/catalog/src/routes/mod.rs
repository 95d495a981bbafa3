//! HTTP route handlers.

pub mod auth;
pub mod guitars;
pub mod home;
pub mod pages;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::{error::AppError, state::AppState};

/// Assemble the application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/about", get(pages::about))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
        .route("/add-guitar", get(guitars::new_page).post(guitars::create))
        .route("/guitar/{id}", get(guitars::detail))
        .route(
            "/guitar/{id}/edit",
            get(guitars::edit_page).put(guitars::update),
        )
        .route("/guitar/{id}/delete", delete(guitars::remove))
        .fallback(not_found)
}

/// Fallback for unmapped paths. Renders the not-found page.
async fn not_found() -> AppError {
    AppError::NotFound("page".to_string())
}
