//! Nutrient extraction from FoodData Central records.
//!
//! Two mutually exclusive strategies produce a [`NutrientMap`]:
//!
//! - **Label**: branded products carry `labelNutrients`, read through the
//!   fixed [`LABEL_FIELDS`] table with table-defined units.
//! - **Food nutrients**: everything else is scanned from `foodNutrients`,
//!   keeping only names in [`NUTRIENTS_OF_INTEREST`] with upstream units.
//!
//! The label strategy wins whenever it yields at least one entry.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use strum::Display;

use super::types::{FoodDetails, FoodNutrient};

/// Nutrient name -> `"<value> <unit>"`.
pub type NutrientMap = BTreeMap<String, String>;

/// Mapping of one branded label field onto an output name and unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelField {
    /// Key under `labelNutrients`.
    pub field: &'static str,
    /// Name in the output map.
    pub name: &'static str,
    /// Unit appended to the value.
    pub unit: &'static str,
}

const fn label(field: &'static str, name: &'static str, unit: &'static str) -> LabelField {
    LabelField { field, name, unit }
}

/// Branded label fields. Core macros are renamed to their standard nutrient
/// names; extras keep their label key.
pub const LABEL_FIELDS: &[LabelField] = &[
    label("calories", "Energy", "kcal"),
    label("protein", "Protein", "g"),
    label("fat", "Total lipid (fat)", "g"),
    label("carbohydrates", "Carbohydrate, by difference", "g"),
    label("sugars", "sugars", "g"),
    label("fiber", "fiber", "g"),
    label("saturatedFat", "saturatedFat", "g"),
    label("transFat", "transFat", "g"),
    label("sodium", "sodium", "mg"),
];

/// Nutrient names kept when scanning a `foodNutrients` list.
pub const NUTRIENTS_OF_INTEREST: &[&str] = &[
    "Energy",
    "Energy, kcal",
    "Protein",
    "Carbohydrate, by difference",
    "Total lipid (fat)",
];

/// Which strategy produced a nutrient map.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum NutrientSource {
    /// Built from branded `labelNutrients`.
    #[strum(serialize = "label")]
    Label(NutrientMap),
    /// Built from the `foodNutrients` allow-list scan.
    #[strum(serialize = "food_nutrients")]
    FoodNutrients(NutrientMap),
}

impl NutrientSource {
    /// The extracted map, whichever strategy produced it.
    pub fn into_map(self) -> NutrientMap {
        match self {
            NutrientSource::Label(map) | NutrientSource::FoodNutrients(map) => map,
        }
    }

    /// Borrow the extracted map.
    pub fn map(&self) -> &NutrientMap {
        match self {
            NutrientSource::Label(map) | NutrientSource::FoodNutrients(map) => map,
        }
    }
}

/// Pick the extraction strategy for a detail record.
pub fn extract_nutrients(details: &FoodDetails) -> NutrientSource {
    let branded = from_label_nutrients(details.label_nutrients.as_ref());
    if !branded.is_empty() {
        return NutrientSource::Label(branded);
    }

    let entries = details.food_nutrients.as_deref().unwrap_or_default();
    NutrientSource::FoodNutrients(from_food_nutrients(entries))
}

/// Read branded label nutrients through [`LABEL_FIELDS`].
///
/// A field counts as present when its entry is truthy: `null`, `false`, `0`
/// and `""` are skipped.
pub fn from_label_nutrients(label_nutrients: Option<&Map<String, Value>>) -> NutrientMap {
    let Some(label_nutrients) = label_nutrients else {
        return NutrientMap::new();
    };

    LABEL_FIELDS
        .iter()
        .filter_map(|field| {
            let entry = label_nutrients.get(field.field).filter(|v| is_truthy(v))?;
            let amount = format_amount(entry.get("value"));
            Some((field.name.to_string(), format!("{amount} {}", field.unit)))
        })
        .collect()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Scan a `foodNutrients` list, keeping [`NUTRIENTS_OF_INTEREST`] only.
///
/// Later entries with the same name overwrite earlier ones.
pub fn from_food_nutrients(entries: &[FoodNutrient]) -> NutrientMap {
    entries
        .iter()
        .filter_map(|entry| {
            let name = entry
                .name()
                .filter(|n| NUTRIENTS_OF_INTEREST.iter().any(|k| k == n))?;
            let amount = format_amount(entry.amount());
            let unit = entry.unit().unwrap_or("null");
            Some((name.to_string(), format!("{amount} {unit}")))
        })
        .collect()
}

/// Render an upstream amount the way it appears in the JSON.
///
/// Whole floats drop their fractional part (`230.0` -> `230`); a missing or
/// null amount renders as `null`.
pub fn format_amount(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "null".to_string(),
        Some(Value::Number(n)) => {
            if n.is_i64() || n.is_u64() {
                return n.to_string();
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                    format!("{}", f as i64)
                }
                Some(f) => f.to_string(),
                None => n.to_string(),
            }
        }
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
