//! ClawHealth REST API
//!
//! Client side of the health API consumed by the dashboard.
//!
//! # Endpoints
//!
//! ## Watch data
//! - `GET /api/health/summary?days=N` - Averages over the last N days
//! - `GET /api/health/trend?days=N` - Day-by-day trend
//! - `GET /api/health/data?limit=N` - Most recent sync records
//! - `POST /api/health/sync` - Upload a watch record
//!
//! ## Food
//! - `GET /api/food/analysis?date=YYYY-MM-DD` - Nutrition breakdown of a day
//! - `GET /api/food/trend?days=N` - Daily calorie intake
//! - `POST /api/food/entries` - Log a food entry
//! - `DELETE /api/food/entries/:id` - Remove a food entry
//!
//! ## Goals
//! - `GET /api/goals` - Current targets
//! - `PUT /api/goals` - Replace targets
//!
//! The view layer only talks to [`HealthApi`]; [`HttpHealthApi`] is the
//! reqwest-backed implementation used by the binary.

pub mod client;
pub mod error;
pub mod types;

pub use client::{HttpHealthApi, HttpHealthApiConfig, DEFAULT_API_BASE};
pub use error::{ApiError, ApiResult};
pub use types::{
    ErrorBody, FoodAnalysis, FoodEntry, FoodTrendPoint, Goals, HealthSummary, HealthTrendPoint,
    MealType, SyncReceipt, WatchSyncRecord,
};

use async_trait::async_trait;

/// Every call the dashboard makes against the backend
#[async_trait]
pub trait HealthApi: Send + Sync {
    /// Averages over the last `days` days
    async fn health_summary(&self, days: u32) -> ApiResult<HealthSummary>;

    /// One point per day over the last `days` days
    async fn health_trend(&self, days: u32) -> ApiResult<Vec<HealthTrendPoint>>;

    /// Most recent sync records, newest first
    async fn health_records(&self, limit: u32) -> ApiResult<Vec<WatchSyncRecord>>;

    /// Upload one watch record; the receipt is `None` when the reply carries none
    async fn sync_health(&self, record: &WatchSyncRecord) -> ApiResult<Option<SyncReceipt>>;

    /// Nutrition breakdown of one day (`YYYY-MM-DD`)
    async fn food_analysis(&self, date: &str) -> ApiResult<FoodAnalysis>;

    /// Daily calorie intake over the last `days` days
    async fn food_trend(&self, days: u32) -> ApiResult<Vec<FoodTrendPoint>>;

    /// Log a food entry, returning the stored entry when the reply echoes it
    async fn add_food_entry(&self, entry: &FoodEntry) -> ApiResult<Option<FoodEntry>>;

    /// Remove a food entry
    async fn delete_food_entry(&self, id: i64) -> ApiResult<()>;

    /// Current targets
    async fn goals(&self) -> ApiResult<Goals>;

    /// Replace targets
    async fn save_goals(&self, goals: &Goals) -> ApiResult<Option<Goals>>;
}
