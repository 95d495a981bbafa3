//! Guitar listing CRUD.
//!
//! Create and edit submit as `multipart/form-data` because of the optional
//! image upload. Browsers cannot submit PUT or DELETE forms, so the edit and
//! delete forms post with a `_method` query override (see the middleware).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::info;

use fretwork_core::{GuitarId, Price};

use crate::{
    db::GuitarRepository,
    error::{AppError, Result},
    filters,
    middleware::{OptionalAuth, RequireAuth},
    models::{CurrentUser, Guitar, GuitarUpdate, NewGuitar},
    state::AppState,
};

/// Template-facing projection of a [`Guitar`].
pub struct GuitarView {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub price: String,
    pub description: String,
    pub image_path: Option<String>,
}

impl From<Guitar> for GuitarView {
    fn from(guitar: Guitar) -> Self {
        Self {
            id: guitar.id.as_i64(),
            name: guitar.name,
            brand: guitar.brand,
            price: guitar.price.to_string(),
            description: guitar.description,
            image_path: guitar.image_path,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "guitars/new.html")]
pub struct NewGuitarTemplate {
    user: Option<CurrentUser>,
    error: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "guitars/detail.html")]
pub struct GuitarDetailTemplate {
    user: Option<CurrentUser>,
    guitar: GuitarView,
}

#[derive(Template, WebTemplate)]
#[template(path = "guitars/edit.html")]
pub struct EditGuitarTemplate {
    user: Option<CurrentUser>,
    guitar: GuitarView,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorQuery {
    error: Option<String>,
}

fn form_error_message(code: &str) -> String {
    match code {
        "missing_name" => "A listing needs a name.".to_string(),
        "invalid_price" => "Enter a valid, non-negative price.".to_string(),
        "bad_image" => "Images must be png, jpg, jpeg, gif or webp.".to_string(),
        _ => "Could not save the listing. Please try again.".to_string(),
    }
}

/// Fields collected from the multipart listing form.
struct GuitarForm {
    name: String,
    brand: String,
    price: String,
    description: String,
    /// Original file name and bytes of the uploaded image, if one was sent.
    image: Option<(String, Vec<u8>)>,
}

/// Drain the multipart stream into a [`GuitarForm`].
///
/// Unknown fields are ignored. An image part with an empty file name or no
/// bytes counts as "no image", which is how browsers submit an untouched
/// file input.
async fn read_guitar_form(mut multipart: Multipart) -> Result<GuitarForm> {
    let mut form = GuitarForm {
        name: String::new(),
        brand: String::new(),
        price: String::new(),
        description: String::new(),
        image: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed form data: {e}")))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            "name" => {
                form.name = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("malformed form data: {e}")))?;
            }
            "brand" => {
                form.brand = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("malformed form data: {e}")))?;
            }
            "price" => {
                form.price = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("malformed form data: {e}")))?;
            }
            "description" => {
                form.description = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("malformed form data: {e}")))?;
            }
            "image" => {
                // File name must be captured before the bytes are consumed
                let file_name = field.file_name().map(str::to_owned);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("malformed form data: {e}")))?;

                if let Some(file_name) = file_name
                    && !file_name.is_empty()
                    && !data.is_empty()
                {
                    form.image = Some((file_name, data.to_vec()));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Parse the `{id}` path segment.
///
/// Anything that isn't a listing ID renders the not-found page, the same as
/// a well-formed ID that matches no row.
fn parse_id(raw: &str) -> Result<GuitarId> {
    raw.parse::<i64>()
        .map(GuitarId::new)
        .map_err(|_| AppError::NotFound(format!("guitar {raw}")))
}

/// Store the form's image, if any, returning its public path.
async fn store_image(
    state: &AppState,
    image: Option<(String, Vec<u8>)>,
) -> Result<Option<String>> {
    match image {
        Some((file_name, data)) => {
            let path = state.uploads().save(&file_name, &data).await?;
            Ok(Some(path))
        }
        None => Ok(None),
    }
}

/// `GET /add-guitar` - the new-listing form. Requires login.
pub async fn new_page(
    RequireAuth(user): RequireAuth,
    Query(query): Query<ErrorQuery>,
) -> NewGuitarTemplate {
    NewGuitarTemplate {
        user: Some(user),
        error: query.error.as_deref().map(form_error_message),
    }
}

/// `POST /add-guitar` - create a listing. Requires login.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    multipart: Multipart,
) -> Result<Redirect> {
    let form = read_guitar_form(multipart).await?;

    if form.name.trim().is_empty() {
        return Ok(Redirect::to("/add-guitar?error=missing_name"));
    }
    let Ok(price) = Price::parse(&form.price) else {
        return Ok(Redirect::to("/add-guitar?error=invalid_price"));
    };

    let image_path = match store_image(&state, form.image).await {
        Ok(path) => path,
        Err(AppError::Upload(crate::services::uploads::UploadError::UnsupportedType(_))) => {
            return Ok(Redirect::to("/add-guitar?error=bad_image"));
        }
        Err(e) => return Err(e),
    };

    let repo = GuitarRepository::new(state.pool());
    let guitar = repo
        .create(&NewGuitar {
            name: form.name.trim().to_owned(),
            brand: form.brand.trim().to_owned(),
            price,
            description: form.description,
            image_path,
        })
        .await?;

    info!(guitar_id = %guitar.id, user_id = %user.id, "guitar listed");
    Ok(Redirect::to("/"))
}

/// `GET /guitar/{id}` - a single listing. Unknown IDs render the
/// not-found page.
pub async fn detail(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<String>,
) -> Result<GuitarDetailTemplate> {
    let id = parse_id(&id)?;
    let repo = GuitarRepository::new(state.pool());
    let guitar = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("guitar {id}")))?;

    Ok(GuitarDetailTemplate {
        user,
        guitar: guitar.into(),
    })
}

/// `GET /guitar/{id}/edit` - the edit form. Requires login.
pub async fn edit_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Query(query): Query<ErrorQuery>,
) -> Result<EditGuitarTemplate> {
    let id = parse_id(&id)?;
    let repo = GuitarRepository::new(state.pool());
    let guitar = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("guitar {id}")))?;

    Ok(EditGuitarTemplate {
        user: Some(user),
        guitar: guitar.into(),
        error: query.error.as_deref().map(form_error_message),
    })
}

/// `PUT /guitar/{id}/edit` - replace a listing's fields. Requires login.
///
/// The stored image is kept unless the form carries a new one.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Redirect> {
    let id = parse_id(&id)?;
    let form = read_guitar_form(multipart).await?;

    if form.name.trim().is_empty() {
        return Ok(Redirect::to(&format!(
            "/guitar/{id}/edit?error=missing_name"
        )));
    }
    let Ok(price) = Price::parse(&form.price) else {
        return Ok(Redirect::to(&format!(
            "/guitar/{id}/edit?error=invalid_price"
        )));
    };

    let image_path = match store_image(&state, form.image).await {
        Ok(path) => path,
        Err(AppError::Upload(crate::services::uploads::UploadError::UnsupportedType(_))) => {
            return Ok(Redirect::to(&format!("/guitar/{id}/edit?error=bad_image")));
        }
        Err(e) => return Err(e),
    };

    let repo = GuitarRepository::new(state.pool());
    let guitar = repo
        .update(
            id,
            &GuitarUpdate {
                name: form.name.trim().to_owned(),
                brand: form.brand.trim().to_owned(),
                price,
                description: form.description,
                image_path,
            },
        )
        .await?;

    info!(guitar_id = %guitar.id, user_id = %user.id, "guitar updated");
    Ok(Redirect::to(&format!("/guitar/{}", guitar.id)))
}

/// `DELETE /guitar/{id}/delete` - remove a listing. Requires login.
///
/// Deleting an already-absent listing renders the not-found page.
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id = parse_id(&id)?;
    let repo = GuitarRepository::new(state.pool());
    repo.delete(id).await?;

    info!(guitar_id = %id, user_id = %user.id, "guitar removed");
    Ok(Redirect::to("/"))
}
