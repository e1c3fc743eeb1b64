//! USDA FoodData Central API client.

use tracing::{debug, instrument};

use crate::error::UpstreamError;
use crate::upstream;

use super::types::{FoodDetails, FoodHit, FoodSearchResponse};

/// Service label used in errors, logs, and metrics.
pub const SERVICE: &str = "usda";

/// FoodData Central REST client.
#[derive(Debug, Clone)]
pub struct UsdaClient {
    /// Shared HTTP client.
    http: reqwest::Client,
    /// Base URL, without trailing slash.
    base_url: String,
    /// API key forwarded as `api_key`.
    api_key: String,
}

impl UsdaClient {
    /// Create a client against `base_url` using `api_key`.
    pub fn new(http: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Search foods by free text.
    ///
    /// Each entry of `data_types` is sent as its own `dataType` parameter.
    #[instrument(skip(self), fields(service = SERVICE))]
    pub async fn search_foods(
        &self,
        query: &str,
        page_size: u64,
        data_types: &[String],
    ) -> Result<Vec<FoodHit>, UpstreamError> {
        let url = format!("{}/foods/search", self.base_url);

        let mut params = vec![
            ("api_key", self.api_key.clone()),
            ("query", query.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        params.extend(data_types.iter().map(|dt| ("dataType", dt.clone())));

        let response: FoodSearchResponse =
            upstream::get_json(&self.http, SERVICE, &url, &params).await?;
        let foods = response.foods.unwrap_or_default();

        debug!(count = foods.len(), "Food search returned");
        Ok(foods)
    }

    /// Fetch the full record for one food.
    #[instrument(skip(self), fields(service = SERVICE))]
    pub async fn get_food_details(&self, fdc_id: u64) -> Result<FoodDetails, UpstreamError> {
        let url = format!("{}/food/{fdc_id}", self.base_url);
        upstream::get_json(&self.http, SERVICE, &url, &[("api_key", self.api_key.clone())]).await
    }
}
