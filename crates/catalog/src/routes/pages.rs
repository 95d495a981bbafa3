//! Static informational pages.

use askama::Template;
use askama_web::WebTemplate;

use crate::{filters, middleware::OptionalAuth, models::CurrentUser};

#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    user: Option<CurrentUser>,
}

/// `GET /about`
pub async fn about(OptionalAuth(user): OptionalAuth) -> AboutTemplate {
    AboutTemplate { user }
}
