//! Food search: one search call, then one detail call per hit.

use tracing::{debug, info, instrument, warn};

use crate::error::UpstreamError;
use crate::metrics;

use super::client::UsdaClient;
use super::nutrients::{extract_nutrients, from_food_nutrients, NutrientMap};
use super::types::{FoodHit, FoodResult};

/// Results returned when no limit is given.
pub const DEFAULT_LIMIT: u64 = 5;

/// Parameters of one food search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodSearchRequest {
    /// Free-text query.
    pub query: String,
    /// Upstream page size.
    pub limit: u64,
    /// Data type filter tokens.
    pub data_types: Vec<String>,
    /// Fetch per-item detail records. When off, nutrients come from the
    /// abridged list embedded in each search hit.
    pub details: bool,
}

impl FoodSearchRequest {
    /// A request for `query` with default limit, no filter, details on.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: DEFAULT_LIMIT,
            data_types: Vec::new(),
            details: true,
        }
    }

    /// Set the page size.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Set the data type filter from a comma-separated string.
    pub fn with_data_types(mut self, raw: Option<&str>) -> Self {
        self.data_types = raw.map(parse_data_types).unwrap_or_default();
        self
    }

    /// Turn per-item detail lookups on or off.
    pub fn with_details(mut self, details: bool) -> Self {
        self.details = details;
        self
    }
}

/// Split a comma-separated data type filter into trimmed, non-empty tokens.
pub fn parse_data_types(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Run a food search.
///
/// Detail records are fetched one at a time in upstream order; FoodData
/// Central has no batch lookup by ID. A failed detail lookup leaves that
/// item with empty nutrients instead of failing the search.
#[instrument(skip(client, request), fields(query = %request.query, limit = request.limit))]
pub async fn search(
    client: &UsdaClient,
    request: &FoodSearchRequest,
) -> Result<Vec<FoodResult>, UpstreamError> {
    let hits = client
        .search_foods(&request.query, request.limit, &request.data_types)
        .await?;

    let mut results = Vec::with_capacity(hits.len());
    for hit in &hits {
        let nutrients = if request.details {
            match hit.fdc_id {
                Some(fdc_id) => load_nutrients(client, fdc_id).await,
                None => NutrientMap::new(),
            }
        } else {
            search_hit_nutrients(hit)
        };
        results.push(FoodResult::from_hit(hit, nutrients));
    }

    info!(count = results.len(), "Food search complete");
    Ok(results)
}

async fn load_nutrients(client: &UsdaClient, fdc_id: u64) -> NutrientMap {
    match client.get_food_details(fdc_id).await {
        Ok(details) => {
            let source = extract_nutrients(&details);
            debug!(fdc_id, source = %source, count = source.map().len(), "Extracted nutrients");
            source.into_map()
        }
        Err(e) => {
            warn!(fdc_id, error = %e, "Food detail lookup failed, returning empty nutrients");
            metrics::inc_food_detail_failures();
            NutrientMap::new()
        }
    }
}

fn search_hit_nutrients(hit: &FoodHit) -> NutrientMap {
    from_food_nutrients(hit.food_nutrients.as_deref().unwrap_or_default())
}
