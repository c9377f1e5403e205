use crate::config::KakaoConfig;
use crate::constants;
use crate::error::{GeoError, Result};
use crate::types::{AddressDocument, CoordDocument, DocumentsResponse, PlaceDocument};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Provider seam for the three geocoding operations. The gateway and the
/// HTTP surface only ever see this trait, so tests can script responses
/// without a network.
#[async_trait::async_trait]
pub trait GeocodingApi: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Structured address search (address text to documents with coordinates).
    async fn search_address(&self, query: &str) -> Result<DocumentsResponse<AddressDocument>>;

    /// Keyword search (place or business name to place documents).
    async fn search_keyword(&self, query: &str) -> Result<DocumentsResponse<PlaceDocument>>;

    /// Reverse geocoding (longitude/latitude to address documents).
    async fn coord_to_address(
        &self,
        longitude: f64,
        latitude: f64,
    ) -> Result<DocumentsResponse<CoordDocument>>;
}

pub struct KakaoClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl KakaoClient {
    pub fn new(config: &KakaoConfig, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn get_documents<D>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        fallback: &str,
    ) -> Result<DocumentsResponse<D>>
    where
        D: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("KakaoAK {}", self.api_key))
            .query(params)
            .send()
            .await
            .map_err(|e| {
                warn!("Kakao request to {} failed: {}", path, e);
                GeoError::Upstream {
                    status: None,
                    message: fallback.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Kakao API error: {} - {}", status, body);
            return Err(upstream_error(status.as_u16(), &body, fallback));
        }

        let parsed = response.json::<DocumentsResponse<D>>().await.map_err(|e| {
            warn!("Kakao response from {} did not parse: {}", path, e);
            GeoError::Upstream {
                status: None,
                message: fallback.to_string(),
            }
        })?;
        debug!(
            "Kakao {} returned {} documents (total_count={})",
            path,
            parsed.documents.len(),
            parsed.meta.total_count
        );
        Ok(parsed)
    }
}

/// Builds an Upstream error carrying the provider's own message when its
/// error body has one, else the localized fallback.
fn upstream_error(status: u16, body: &str, fallback: &str) -> GeoError {
    let provider_message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("msg"))
                .and_then(|m| m.as_str())
                .map(|s| s.to_string())
        })
        .filter(|m| !m.is_empty());

    GeoError::Upstream {
        status: Some(status),
        message: provider_message.unwrap_or_else(|| fallback.to_string()),
    }
}

#[async_trait::async_trait]
impl GeocodingApi for KakaoClient {
    fn provider_name(&self) -> &'static str {
        "kakao_local"
    }

    #[instrument(skip(self))]
    async fn search_address(&self, query: &str) -> Result<DocumentsResponse<AddressDocument>> {
        debug!("Searching structured address");
        self.get_documents(
            constants::ADDRESS_SEARCH_PATH,
            &[("query", query)],
            constants::MSG_ADDRESS_SEARCH_FAILED,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn search_keyword(&self, query: &str) -> Result<DocumentsResponse<PlaceDocument>> {
        debug!("Searching by keyword");
        self.get_documents(
            constants::KEYWORD_SEARCH_PATH,
            &[("query", query)],
            constants::MSG_KEYWORD_SEARCH_FAILED,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn coord_to_address(
        &self,
        longitude: f64,
        latitude: f64,
    ) -> Result<DocumentsResponse<CoordDocument>> {
        debug!("Reverse geocoding coordinates");
        let x = longitude.to_string();
        let y = latitude.to_string();
        self.get_documents(
            constants::COORD_TO_ADDRESS_PATH,
            &[("x", x.as_str()), ("y", y.as_str())],
            constants::MSG_COORD_CONVERT_FAILED,
        )
        .await
    }
}
