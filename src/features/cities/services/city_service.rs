use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::cities::dtos::CityInput;
use crate::features::cities::models::City;

/// Classify a failed write by its constraint class instead of leaking raw
/// store errors: `23505` is the `(name, state_uf)` uniqueness constraint,
/// `23503` the foreign key to `states.uf`. The referenced-state check lives
/// entirely in the database, so both outcomes surface from the single
/// write statement.
fn map_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Unique constraint violation (PostgreSQL error code 23505)
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            return AppError::Conflict("City already exists in this state".to_string());
        }

        // Foreign key violation (PostgreSQL error code 23503)
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23503")) {
            return AppError::ReferenceNotFound("UF does not exist".to_string());
        }
    }

    tracing::error!("City write failed: {:?}", e);
    AppError::Database(e)
}

/// Service for city CRUD operations
pub struct CityService {
    pool: PgPool,
}

impl CityService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List cities ordered by name with a bounded LIMIT/OFFSET window
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<City>> {
        let cities = sqlx::query_as::<_, City>(
            r#"
            SELECT id, name, state_uf
            FROM cities
            ORDER BY name
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list cities: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(cities)
    }

    /// Get a city by its id
    pub async fn get_by_id(&self, id: i32) -> Result<City> {
        let city = sqlx::query_as::<_, City>(
            r#"
            SELECT id, name, state_uf
            FROM cities
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch city {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("City not found".to_string()))?;

        Ok(city)
    }

    /// Insert a new city. Duplicate `(name, state_uf)` pairs and unknown
    /// UFs are rejected by the store's constraints and mapped to the
    /// conflict / reference-not-found outcomes.
    pub async fn create(&self, input: CityInput) -> Result<City> {
        let city = sqlx::query_as::<_, City>(
            r#"
            INSERT INTO cities (name, state_uf)
            VALUES ($1, $2)
            RETURNING id, name, state_uf
            "#,
        )
        .bind(&input.name)
        .bind(&input.state_uf)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        tracing::info!(
            "City created: id={}, name={}, state_uf={}",
            city.id,
            city.name,
            city.state_uf
        );

        Ok(city)
    }

    /// Full-field update of a city by id
    pub async fn update(&self, id: i32, input: CityInput) -> Result<City> {
        let city = sqlx::query_as::<_, City>(
            r#"
            UPDATE cities
            SET name = $1, state_uf = $2
            WHERE id = $3
            RETURNING id, name, state_uf
            "#,
        )
        .bind(&input.name)
        .bind(&input.state_uf)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| AppError::NotFound("City not found".to_string()))?;

        tracing::info!("City updated: id={}", city.id);

        Ok(city)
    }

    /// Delete a city by id. Zero affected rows means the city was absent.
    pub async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete city {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("City not found".to_string()));
        }

        tracing::info!("City deleted: id={}", id);

        Ok(())
    }
}
