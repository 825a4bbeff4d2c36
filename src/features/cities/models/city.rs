use serde::Serialize;
use sqlx::FromRow;

/// City model; `(name, state_uf)` is unique and `state_uf` references
/// `states.uf`
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct City {
    pub id: i32,
    pub name: String,
    pub state_uf: String,
}
