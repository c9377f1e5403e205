use crate::apis::GeocodingApi;
use crate::constants;
use crate::error::{GeoError, Result};
use crate::types::{AddressDocument, PlaceDocument};
use std::sync::Arc;
use tracing::{debug, info};

/// Front door for the two search modes and the device-location path.
/// Wraps a provider client and normalizes its outcomes: an empty document
/// list is a successful "no results", only transport/provider failures and
/// zero-document reverse lookups are errors.
#[derive(Clone)]
pub struct GeocodingGateway {
    api: Arc<dyn GeocodingApi>,
}

impl GeocodingGateway {
    pub fn new(api: Arc<dyn GeocodingApi>) -> Self {
        Self { api }
    }

    pub fn provider_name(&self) -> &'static str {
        self.api.provider_name()
    }

    /// Structured-address search. Blank queries short-circuit to an empty
    /// list without touching the network.
    pub async fn resolve_structured(&self, query: &str) -> Result<Vec<AddressDocument>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let response = self.api.search_address(query).await?;
        debug!(
            "Structured search returned {} candidates",
            response.documents.len()
        );
        Ok(response.documents)
    }

    /// Keyword (place name) search. Same blank-query and empty-result
    /// semantics as the structured path.
    pub async fn resolve_keyword(&self, query: &str) -> Result<Vec<PlaceDocument>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let response = self.api.search_keyword(query).await?;
        debug!(
            "Keyword search returned {} candidates",
            response.documents.len()
        );
        Ok(response.documents)
    }

    /// Converts device coordinates into a single display address: the first
    /// document's road-form address, else its lot-form address, else the
    /// literal not-found string. Zero documents is an error, never a silent
    /// empty success.
    pub async fn reverse_geocode(&self, longitude: f64, latitude: f64) -> Result<String> {
        let response = self.api.coord_to_address(longitude, latitude).await?;

        let Some(document) = response.documents.first() else {
            return Err(GeoError::NotFound(
                constants::MSG_NO_ADDRESS_AT_LOCATION.to_string(),
            ));
        };

        let road = document
            .road_address
            .as_ref()
            .map(|r| r.address_name.clone());
        let lot = document.address.as_ref().map(|a| a.address_name.clone());

        let resolved = road
            .filter(|s| !s.is_empty())
            .or(lot.filter(|s| !s.is_empty()))
            .unwrap_or_else(|| constants::MSG_ADDRESS_NOT_FOUND.to_string());
        info!("Reverse geocoded device position");
        Ok(resolved)
    }
}
