//! Food search proxy over USDA FoodData Central.
//!
//! This module handles:
//! - FoodData Central payload types
//! - The REST client (search and per-item detail)
//! - Nutrient extraction strategies
//! - The search flow that ties them together

pub mod client;
pub mod nutrients;
pub mod search;
pub mod types;

pub use client::UsdaClient;
pub use nutrients::{extract_nutrients, NutrientMap, NutrientSource};
pub use search::{search, FoodSearchRequest, DEFAULT_LIMIT};
pub use types::FoodResult;
