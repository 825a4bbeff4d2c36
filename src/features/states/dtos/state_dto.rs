use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::states::models::State;

/// Response DTO for state data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StateResponseDto {
    pub id: i32,
    pub name: String,
    pub uf: String,
}

impl From<State> for StateResponseDto {
    fn from(state: State) -> Self {
        Self {
            id: state.id,
            name: state.name,
            uf: state.uf,
        }
    }
}
