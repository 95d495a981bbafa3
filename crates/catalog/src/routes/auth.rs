//! Login, registration, and logout.
//!
//! Failed submissions redirect back to the form with a short error code in
//! the query string rather than re-rendering with inline state. The form
//! pages translate those codes into human-readable messages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::{
    error::Result,
    filters,
    middleware::{clear_current_user, set_current_user},
    models::CurrentUser,
    services::{AuthService, auth::AuthError},
    state::AppState,
};

#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    user: Option<CurrentUser>,
    error: Option<String>,
    success: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    user: Option<CurrentUser>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    error: Option<String>,
    success: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    username: String,
    password: String,
    password_confirm: String,
}

fn login_error_message(code: &str) -> String {
    match code {
        "credentials" => "Invalid username or password.".to_string(),
        "session" => "Could not start a session. Please try again.".to_string(),
        _ => "Login failed. Please try again.".to_string(),
    }
}

fn register_error_message(code: &str) -> String {
    match code {
        "password_mismatch" => "The passwords do not match.".to_string(),
        "username_taken" => "That username is already taken.".to_string(),
        "password_too_short" => "Password must be at least 8 characters long.".to_string(),
        "invalid_username" => {
            "Usernames may only contain letters, digits, dots, dashes and underscores."
                .to_string()
        }
        _ => "Registration failed. Please try again.".to_string(),
    }
}

/// `GET /login`
pub async fn login_page(Query(query): Query<MessageQuery>) -> LoginTemplate {
    let success = query.success.as_deref().map(|code| match code {
        "registered" => "Account created. You can log in now.".to_string(),
        _ => "Done.".to_string(),
    });

    LoginTemplate {
        user: None,
        error: query.error.as_deref().map(login_error_message),
        success,
    }
}

/// `POST /login`
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let auth = AuthService::new(state.pool());

    let user = match auth.login(&form.username, &form.password).await {
        Ok(user) => user,
        Err(AuthError::InvalidCredentials | AuthError::InvalidUsername(_)) => {
            info!(username = %form.username, "failed login attempt");
            return Ok(Redirect::to("/login?error=credentials"));
        }
        Err(e) => return Err(e.into()),
    };

    let current = CurrentUser {
        id: user.id,
        username: user.username,
    };

    if let Err(e) = set_current_user(&session, &current).await {
        warn!(error = %e, "failed to persist login session");
        return Ok(Redirect::to("/login?error=session"));
    }

    info!(user_id = %current.id, "user logged in");
    Ok(Redirect::to("/"))
}

/// `GET /register`
pub async fn register_page(Query(query): Query<MessageQuery>) -> RegisterTemplate {
    RegisterTemplate {
        user: None,
        error: query.error.as_deref().map(register_error_message),
    }
}

/// `POST /register`
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect> {
    if form.password != form.password_confirm {
        return Ok(Redirect::to("/register?error=password_mismatch"));
    }

    let auth = AuthService::new(state.pool());

    match auth.register(&form.username, &form.password).await {
        Ok(user) => {
            info!(user_id = %user.id, "new user registered");
            Ok(Redirect::to("/login?success=registered"))
        }
        Err(AuthError::UserAlreadyExists) => Ok(Redirect::to("/register?error=username_taken")),
        Err(AuthError::WeakPassword(_)) => {
            Ok(Redirect::to("/register?error=password_too_short"))
        }
        Err(AuthError::InvalidUsername(_)) => {
            Ok(Redirect::to("/register?error=invalid_username"))
        }
        Err(e) => Err(e.into()),
    }
}

/// `GET /logout`
///
/// Destroys the whole session, not just the user key, so nothing stale
/// survives into the anonymous session.
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_current_user(&session).await {
        warn!(error = %e, "failed to clear session user");
    }
    if let Err(e) = session.flush().await {
        warn!(error = %e, "failed to flush session");
    }

    Redirect::to("/")
}
