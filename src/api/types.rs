//! API view-models
//!
//! Request and response bodies of the ClawHealth REST API. Every type here is
//! transient: decoded from a response, rendered, then dropped.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Aggregated health figures over the last N days
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthSummary {
    #[serde(default)]
    pub days: Option<u32>,
    #[serde(default)]
    pub total_records: Option<u64>,
    #[serde(default)]
    pub avg_steps: Option<f64>,
    #[serde(default)]
    pub avg_heart_rate: Option<f64>,
    #[serde(default)]
    pub avg_calories_burned: Option<f64>,
    #[serde(default)]
    pub avg_sleep_hours: Option<f64>,
    #[serde(default)]
    pub avg_blood_oxygen: Option<f64>,
    #[serde(default)]
    pub avg_active_minutes: Option<f64>,
}

/// One day of the health trend; days without records carry nulls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthTrendPoint {
    /// ISO date (`YYYY-MM-DD`)
    pub date: String,
    #[serde(default)]
    pub steps: Option<f64>,
    #[serde(default)]
    pub heart_rate: Option<f64>,
    #[serde(default)]
    pub calories_burned: Option<f64>,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub active_minutes: Option<f64>,
}

/// A watch sync record, as posted by the sync form and listed by `/api/health/data`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchSyncRecord {
    /// Assigned by the server; never sent
    #[serde(default, skip_serializing)]
    pub id: Option<i64>,
    pub recorded_at: String,
    #[serde(default)]
    pub steps: i64,
    #[serde(default)]
    pub heart_rate: Option<f64>,
    #[serde(default)]
    pub calories_burned: i64,
    #[serde(default)]
    pub active_minutes: i64,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub blood_oxygen: Option<f64>,
    #[serde(default)]
    pub workout_type: Option<String>,
    #[serde(default)]
    pub workout_duration: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Meal category used to group food entries
///
/// Variant order is display order: breakfast, lunch, dinner, snack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    /// Label shown in the food table
    pub fn label(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            other => Err(format!(
                "unknown meal type '{}', expected breakfast, lunch, dinner or snack",
                other
            )),
        }
    }
}

/// A logged food item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    /// Assigned by the server; never sent
    #[serde(default, skip_serializing)]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_at: Option<String>,
    pub meal_type: MealType,
    pub food_name: String,
    #[serde(default = "default_amount_g")]
    pub amount_g: f64,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fat_g: f64,
    #[serde(default)]
    pub fiber_g: f64,
}

fn default_amount_g() -> f64 {
    100.0
}

/// Nutritional breakdown of one day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodAnalysis {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub calorie_goal: Option<f64>,
    #[serde(default)]
    pub total_calories: f64,
    #[serde(default)]
    pub total_protein_g: f64,
    #[serde(default)]
    pub total_carbs_g: f64,
    #[serde(default)]
    pub total_fat_g: f64,
    #[serde(default)]
    pub total_fiber_g: f64,
    /// Entries grouped by meal; iteration follows meal order
    #[serde(default)]
    pub entries_by_meal: BTreeMap<MealType, Vec<FoodEntry>>,
}

/// One day of the calorie-intake trend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodTrendPoint {
    pub date: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fat_g: f64,
}

/// Daily targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    pub daily_steps: i64,
    pub daily_calories_intake: i64,
    pub daily_calories_burn: i64,
    pub sleep_hours: f64,
    pub active_minutes: i64,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            daily_steps: 10_000,
            daily_calories_intake: 2_000,
            daily_calories_burn: 500,
            sleep_hours: 8.0,
            active_minutes: 30,
        }
    }
}

/// Response of `POST /api/health/sync`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncReceipt {
    #[serde(default)]
    pub synced: u32,
    #[serde(default)]
    pub records: Vec<WatchSyncRecord>,
}

/// Error body returned with non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
