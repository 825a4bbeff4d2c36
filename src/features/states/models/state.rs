use serde::Serialize;
use sqlx::FromRow;

/// State model (federative unit), keyed by the two-letter UF code
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct State {
    pub id: i32,
    pub name: String,
    pub uf: String,
}
