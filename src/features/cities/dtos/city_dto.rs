use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::cities::models::City;
use crate::shared::validation::{normalize_name, normalize_uf};

/// Request DTO for creating or updating a city.
///
/// Fields arrive as optional raw strings; normalization and the required
/// checks happen in [`CityPayloadDto::normalized`] so that " SP " and "sp"
/// are accepted and absent fields fail the same way empty ones do.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CityPayloadDto {
    /// City name
    #[validate(length(max = 255, message = "name must not exceed 255 characters"))]
    pub name: Option<String>,

    /// Two-letter code of an existing state
    pub state_uf: Option<String>,
}

/// Canonical city input: trimmed name, uppercased UF, both non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityInput {
    pub name: String,
    pub state_uf: String,
}

impl CityPayloadDto {
    pub fn normalized(self) -> Result<CityInput> {
        let name = normalize_name(self.name.as_deref());
        let state_uf = normalize_uf(self.state_uf.as_deref());

        if name.is_empty() || state_uf.is_empty() {
            return Err(AppError::Validation(
                "name and state_uf are required".to_string(),
            ));
        }

        Ok(CityInput { name, state_uf })
    }
}

/// Response DTO for city data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CityResponseDto {
    pub id: i32,
    pub name: String,
    pub state_uf: String,
}

impl From<City> for CityResponseDto {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            name: city.name,
            state_uf: city.state_uf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: Option<&str>, uf: Option<&str>) -> CityPayloadDto {
        CityPayloadDto {
            name: name.map(String::from),
            state_uf: uf.map(String::from),
        }
    }

    #[test]
    fn test_normalized_trims_and_uppercases() {
        let input = payload(Some("  Campinas "), Some(" sp ")).normalized().unwrap();
        assert_eq!(
            input,
            CityInput {
                name: "Campinas".to_string(),
                state_uf: "SP".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        assert!(payload(None, Some("SP")).normalized().is_err());
        assert!(payload(Some("Campinas"), None).normalized().is_err());
        assert!(payload(None, None).normalized().is_err());
    }

    #[test]
    fn test_whitespace_only_fields_are_rejected() {
        assert!(payload(Some("   "), Some("SP")).normalized().is_err());
        assert!(payload(Some("Campinas"), Some("  ")).normalized().is_err());
    }
}
