//! Guitar repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use fretwork_core::{GuitarId, Price};

use super::RepositoryError;
use crate::models::{Guitar, GuitarUpdate, NewGuitar};

#[derive(sqlx::FromRow)]
struct GuitarRow {
    id: i64,
    name: String,
    brand: String,
    price: String,
    description: String,
    image_path: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<GuitarRow> for Guitar {
    type Error = RepositoryError;

    fn try_from(row: GuitarRow) -> Result<Self, Self::Error> {
        let price = Price::parse(&row.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(Self {
            id: GuitarId::new(row.id),
            name: row.name,
            brand: row.brand,
            price,
            description: row.description,
            image_path: row.image_path,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const GUITAR_COLUMNS: &str = "id, name, brand, price, description, image_path, created_at, updated_at";

/// Repository for guitar database operations.
pub struct GuitarRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> GuitarRepository<'a> {
    /// Create a new guitar repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new listing, returning it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, guitar: &NewGuitar) -> Result<Guitar, RepositoryError> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, GuitarRow>(&format!(
            r"
            INSERT INTO guitars (name, brand, price, description, image_path, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {GUITAR_COLUMNS}
            ",
        ))
        .bind(&guitar.name)
        .bind(&guitar.brand)
        .bind(guitar.price.to_string())
        .bind(&guitar.description)
        .bind(&guitar.image_path)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Get a single listing by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored price is invalid.
    pub async fn get_by_id(&self, id: GuitarId) -> Result<Option<Guitar>, RepositoryError> {
        let row = sqlx::query_as::<_, GuitarRow>(&format!(
            "SELECT {GUITAR_COLUMNS} FROM guitars WHERE id = ?"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(Guitar::try_from).transpose()
    }

    /// Get the full collection in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Guitar>, RepositoryError> {
        let rows = sqlx::query_as::<_, GuitarRow>(&format!(
            "SELECT {GUITAR_COLUMNS} FROM guitars ORDER BY id ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Guitar::try_from).collect()
    }

    /// Replace a listing's descriptive fields; keep the stored image unless
    /// the update carries a new one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the listing doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: GuitarId,
        update: &GuitarUpdate,
    ) -> Result<Guitar, RepositoryError> {
        let row = sqlx::query_as::<_, GuitarRow>(&format!(
            r"
            UPDATE guitars
            SET name = ?,
                brand = ?,
                price = ?,
                description = ?,
                image_path = COALESCE(?, image_path),
                updated_at = ?
            WHERE id = ?
            RETURNING {GUITAR_COLUMNS}
            ",
        ))
        .bind(&update.name)
        .bind(&update.brand)
        .bind(update.price.to_string())
        .bind(&update.description)
        .bind(&update.image_path)
        .bind(Utc::now())
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map_or(Err(RepositoryError::NotFound), Guitar::try_from)
    }

    /// Remove a listing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if it was already absent.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: GuitarId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM guitars WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::test_pool;

    fn new_guitar(name: &str, price: &str) -> NewGuitar {
        NewGuitar {
            name: name.to_owned(),
            brand: "Fender".to_owned(),
            price: Price::parse(price).unwrap(),
            description: "Sunburst finish, light wear.".to_owned(),
            image_path: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let pool = test_pool().await;
        let repo = GuitarRepository::new(&pool);

        let created = repo.create(&new_guitar("Stratocaster", "1299.99")).await.unwrap();
        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(fetched.name, "Stratocaster");
        assert_eq!(fetched.price.to_string(), "1299.99");
        assert!(fetched.image_path.is_none());
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let pool = test_pool().await;
        let repo = GuitarRepository::new(&pool);

        let missing = repo.get_by_id(GuitarId::new(999)).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_all_in_insertion_order() {
        let pool = test_pool().await;
        let repo = GuitarRepository::new(&pool);

        repo.create(&new_guitar("Stratocaster", "1299.99")).await.unwrap();
        repo.create(&new_guitar("Telecaster", "1149.00")).await.unwrap();
        repo.create(&new_guitar("Jazzmaster", "1999.50")).await.unwrap();

        let names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, ["Stratocaster", "Telecaster", "Jazzmaster"]);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_image() {
        let pool = test_pool().await;
        let repo = GuitarRepository::new(&pool);

        let mut initial = new_guitar("Stratocaster", "1299.99");
        initial.image_path = Some("/uploads/strat.png".to_owned());
        let created = repo.create(&initial).await.unwrap();

        // No new image: stored image survives the update.
        let updated = repo
            .update(
                created.id,
                &GuitarUpdate {
                    name: "Stratocaster '72".to_owned(),
                    brand: "Fender".to_owned(),
                    price: Price::parse("1100").unwrap(),
                    description: "Price drop.".to_owned(),
                    image_path: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Stratocaster '72");
        assert_eq!(updated.image_path.as_deref(), Some("/uploads/strat.png"));

        // New image replaces the old reference.
        let updated = repo
            .update(
                created.id,
                &GuitarUpdate {
                    name: updated.name.clone(),
                    brand: updated.brand.clone(),
                    price: updated.price,
                    description: updated.description.clone(),
                    image_path: Some("/uploads/strat-new.png".to_owned()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.image_path.as_deref(), Some("/uploads/strat-new.png"));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let pool = test_pool().await;
        let repo = GuitarRepository::new(&pool);

        let err = repo
            .update(
                GuitarId::new(404),
                &GuitarUpdate {
                    name: "Ghost".to_owned(),
                    brand: String::new(),
                    price: Price::parse("1").unwrap(),
                    description: String::new(),
                    image_path: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_none() {
        let pool = test_pool().await;
        let repo = GuitarRepository::new(&pool);

        let created = repo.create(&new_guitar("Stratocaster", "1299.99")).await.unwrap();
        repo.delete(created.id).await.unwrap();

        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
        assert!(repo.list_all().await.unwrap().is_empty());

        // Second delete reports absence.
        let err = repo.delete(created.id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
