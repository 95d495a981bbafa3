//! Guitar domain types.

use chrono::{DateTime, Utc};

use fretwork_core::{GuitarId, Price};

/// A guitar listing (domain type).
#[derive(Debug, Clone)]
pub struct Guitar {
    /// Unique guitar ID, stable across all later reads/updates/deletes.
    pub id: GuitarId,
    /// Model name (e.g., "Stratocaster").
    pub name: String,
    /// Manufacturer (e.g., "Fender").
    pub brand: String,
    /// Asking price.
    pub price: Price,
    /// Free-form description.
    pub description: String,
    /// Public path of the uploaded image, if one was attached.
    pub image_path: Option<String>,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
    /// When the listing was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a new guitar listing.
#[derive(Debug, Clone)]
pub struct NewGuitar {
    pub name: String,
    pub brand: String,
    pub price: Price,
    pub description: String,
    /// Public path of an already-stored upload, if any.
    pub image_path: Option<String>,
}

/// Fields for updating an existing listing.
///
/// All descriptive fields are replaced; `image_path: None` keeps the stored
/// image, `Some(path)` replaces it.
#[derive(Debug, Clone)]
pub struct GuitarUpdate {
    pub name: String,
    pub brand: String,
    pub price: Price,
    pub description: String,
    pub image_path: Option<String>,
}
