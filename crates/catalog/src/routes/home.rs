//! Home page: the guitar listing.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::{
    db::GuitarRepository,
    error::Result,
    filters,
    middleware::OptionalAuth,
    models::CurrentUser,
    routes::guitars::GuitarView,
    state::AppState,
};

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    user: Option<CurrentUser>,
    guitars: Vec<GuitarView>,
}

/// `GET /` - list every guitar in the catalog.
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<HomeTemplate> {
    let repo = GuitarRepository::new(state.pool());
    let guitars = repo.list_all().await?.into_iter().map(GuitarView::from).collect();

    Ok(HomeTemplate { user, guitars })
}
