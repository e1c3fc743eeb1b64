//! FoodData Central payloads and the normalized food result.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::nutrients::NutrientMap;

/// Placeholder for a missing description or data type.
pub const NOT_AVAILABLE: &str = "N/A";

/// Response from `GET /foods/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodSearchResponse {
    /// Matching foods; absent or null on empty searches.
    #[serde(default)]
    pub foods: Option<Vec<FoodHit>>,
}

/// A single search hit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodHit {
    /// FoodData Central ID.
    #[serde(default)]
    pub fdc_id: Option<u64>,
    /// Food description.
    #[serde(default)]
    pub description: Option<String>,
    /// Brand owner (branded foods only).
    #[serde(default)]
    pub brand_owner: Option<String>,
    /// Data type (e.g. "Branded", "SR Legacy", "Survey (FNDDS)").
    #[serde(default)]
    pub data_type: Option<String>,
    /// Abridged nutrients embedded in the search hit.
    #[serde(default)]
    pub food_nutrients: Option<Vec<FoodNutrient>>,
}

/// Response from `GET /food/{fdcId}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodDetails {
    /// Branded label nutrients keyed by field name (`calories`, `protein`, ...).
    #[serde(default)]
    pub label_nutrients: Option<Map<String, Value>>,
    /// Full nutrient list.
    #[serde(default)]
    pub food_nutrients: Option<Vec<FoodNutrient>>,
}

/// One entry of a `foodNutrients` list.
///
/// Search hits use the flat `nutrientName`/`value`/`unitName` shape while
/// detail records nest the name and unit under `nutrient` with an `amount`.
/// Both are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodNutrient {
    #[serde(default)]
    pub nutrient_name: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub unit_name: Option<String>,
    #[serde(default)]
    pub nutrient: Option<NutrientInfo>,
    #[serde(default)]
    pub amount: Option<Value>,
}

/// Nested nutrient descriptor in detail records.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub unit_name: Option<String>,
}

impl FoodNutrient {
    /// Nutrient name, flat field first.
    pub fn name(&self) -> Option<&str> {
        self.nutrient_name
            .as_deref()
            .or_else(|| self.nutrient.as_ref()?.name.as_deref())
    }

    /// Nutrient amount, flat field first.
    pub fn amount(&self) -> Option<&Value> {
        self.value
            .as_ref()
            .filter(|v| !v.is_null())
            .or(self.amount.as_ref())
    }

    /// Unit name, flat field first.
    pub fn unit(&self) -> Option<&str> {
        self.unit_name
            .as_deref()
            .or_else(|| self.nutrient.as_ref()?.unit_name.as_deref())
    }
}

/// Normalized food record returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fdc_id: Option<u64>,
    pub description: String,
    pub brand_owner: Option<String>,
    pub data_type: String,
    pub nutrients: NutrientMap,
}

impl FoodResult {
    /// Build a result from a search hit and its extracted nutrients.
    pub fn from_hit(hit: &FoodHit, nutrients: NutrientMap) -> Self {
        let non_empty = |s: &Option<String>| s.as_deref().filter(|s| !s.is_empty()).map(str::to_string);

        Self {
            fdc_id: hit.fdc_id,
            description: non_empty(&hit.description).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            brand_owner: non_empty(&hit.brand_owner),
            data_type: non_empty(&hit.data_type).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            nutrients,
        }
    }
}
