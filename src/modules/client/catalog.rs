use crate::features::cities::dtos::CityResponseDto;
use crate::features::states::dtos::StateResponseDto;
use crate::modules::client::api_client::{ApiClient, ClientError};

/// How many cities the UI loads at once; the server clamps this to its
/// own maximum.
const CITY_LOAD_LIMIT: i64 = 1000;

/// Case-insensitive filter over the cached city list, matching on city
/// name or UF. An empty query keeps everything.
pub fn filter_cities<'a>(cities: &'a [CityResponseDto], query: &str) -> Vec<&'a CityResponseDto> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return cities.iter().collect();
    }
    cities
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&query) || c.state_uf.to_lowercase().contains(&query)
        })
        .collect()
}

/// UI-side controller owning the local State/City caches.
///
/// The caches are only ever refreshed through the API; every mutating call
/// invalidates the city cache by reloading it, so the UI never renders a
/// stale list after a write.
pub struct CatalogController {
    client: ApiClient,
    states: Vec<StateResponseDto>,
    cities: Vec<CityResponseDto>,
}

impl CatalogController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            states: Vec::new(),
            cities: Vec::new(),
        }
    }

    /// Initial load: states for the UF selector, then the city list
    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.refresh_states().await?;
        self.refresh_cities().await
    }

    pub async fn refresh_states(&mut self) -> Result<(), ClientError> {
        self.states = self.client.list_states().await?;
        Ok(())
    }

    pub async fn refresh_cities(&mut self) -> Result<(), ClientError> {
        self.cities = self.client.list_cities(Some(CITY_LOAD_LIMIT)).await?;
        Ok(())
    }

    pub fn states(&self) -> &[StateResponseDto] {
        &self.states
    }

    pub fn cities(&self) -> &[CityResponseDto] {
        &self.cities
    }

    pub fn filter(&self, query: &str) -> Vec<&CityResponseDto> {
        filter_cities(&self.cities, query)
    }

    pub async fn add_city(
        &mut self,
        name: &str,
        state_uf: &str,
    ) -> Result<CityResponseDto, ClientError> {
        let city = self.client.create_city(name, state_uf).await?;
        self.refresh_cities().await?;
        Ok(city)
    }

    pub async fn edit_city(
        &mut self,
        id: i32,
        name: &str,
        state_uf: &str,
    ) -> Result<CityResponseDto, ClientError> {
        let city = self.client.update_city(id, name, state_uf).await?;
        self.refresh_cities().await?;
        Ok(city)
    }

    pub async fn remove_city(&mut self, id: i32) -> Result<(), ClientError> {
        self.client.delete_city(id).await?;
        self.refresh_cities().await
    }
}
