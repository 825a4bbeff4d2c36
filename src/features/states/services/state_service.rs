use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::states::models::State;
use crate::shared::validation::{normalize_uf, UF_REGEX};

/// Service for the read-only state catalog
pub struct StateService {
    pool: PgPool,
}

impl StateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all states ordered by name
    pub async fn list(&self) -> Result<Vec<State>> {
        let states = sqlx::query_as::<_, State>(
            r#"
            SELECT id, name, uf
            FROM states
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list states: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(states)
    }

    /// Get a state by its UF code (normalized to uppercase first).
    ///
    /// The format check runs before any query: a UF that cannot exist is a
    /// 400, not a 404.
    pub async fn get_by_uf(&self, raw_uf: &str) -> Result<State> {
        let uf = normalize_uf(Some(raw_uf));
        if !UF_REGEX.is_match(&uf) {
            return Err(AppError::Validation("Invalid UF".to_string()));
        }

        let state = sqlx::query_as::<_, State>(
            r#"
            SELECT id, name, uf
            FROM states
            WHERE uf = $1
            "#,
        )
        .bind(&uf)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch state by uf {}: {:?}", uf, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("State not found".to_string()))?;

        Ok(state)
    }
}
