//! # ClawHealth
//!
//! Client for the ClawHealth dashboard: Apple Watch sync records, food
//! logging with nutrition analysis, and daily goals.
//!
//! ## Modules
//!
//! - [`api`]: Typed REST client for the ClawHealth backend
//! - [`view`]: Tab controller, form handling, rendering and chart lifecycle
//! - [`terminal`]: Text surface used by the command line
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clawhealth::{HttpHealthApi, HttpHealthApiConfig, Tab, TerminalSurface, ViewController, ViewSettings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpHealthApi::new(HttpHealthApiConfig::default())?;
//!     let view = ViewController::new(api, TerminalSurface::new(), ViewSettings::default());
//!
//!     view.show_tab(Tab::Food).await?;
//!     println!("{}", view.with_surface(|s| s.render(Tab::Food)).await);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod terminal;
pub mod view;

pub use api::{
    ApiError, ApiResult, FoodAnalysis, FoodEntry, FoodTrendPoint, Goals, HealthApi,
    HealthSummary, HealthTrendPoint, HttpHealthApi, HttpHealthApiConfig, MealType, SyncReceipt,
    WatchSyncRecord,
};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, ViewConfig};

pub use terminal::{TerminalChart, TerminalSurface};

pub use view::{
    ChartRegistry, ChartSpec, LoadOutcome, Notice, Severity, Surface, Tab, ViewController,
    ViewError, ViewResult, ViewSettings,
};
