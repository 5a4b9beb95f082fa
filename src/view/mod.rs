//! Dashboard View Controller
//!
//! Owns the active tab and drives every tab's loader and mutation against a
//! [`HealthApi`], drawing results onto a [`Surface`].
//!
//! # Staleness
//!
//! Each tab switch bumps a generation counter. A loader remembers the
//! generation it started under and applies its response only if no switch
//! happened meanwhile; otherwise the response is dropped and the loader
//! reports [`LoadOutcome::Stale`]. The check and the update happen under the
//! same lock.
//!
//! # Notices
//!
//! Notices hide themselves after [`ViewSettings::notice_duration`]. A timer
//! only hides the notice it was started for.

pub mod chart;
pub mod forms;
pub mod notice;
pub mod render;
pub mod surface;
pub mod tab;

#[cfg(test)]
pub(crate) mod fakes;

pub use chart::{ChartKind, ChartRegistry, ChartSpec, Dataset};
pub use notice::{Notice, Severity};
pub use render::{RowAction, Table, TableRow};
pub use surface::{ids, Surface};
pub use tab::Tab;

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::api::{ApiError, ApiResult, HealthApi};

/// Tunables of the controller
#[derive(Debug, Clone)]
pub struct ViewSettings {
    /// Dashboard range used when the day selector holds nothing usable
    pub dashboard_days: u32,
    /// Rows requested for the watch records table
    pub watch_record_limit: u32,
    /// Days covered by the calorie-intake chart
    pub food_trend_days: u32,
    /// How long a notice stays visible
    pub notice_duration: Duration,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            dashboard_days: 7,
            watch_record_limit: 20,
            food_trend_days: 7,
            notice_duration: Duration::from_millis(3000),
        }
    }
}

/// What happened to a loader's response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Drawn onto the surface
    Applied,
    /// Dropped because the user switched tabs meanwhile
    Stale,
}

/// Errors surfaced by controller operations
///
/// Every error has already been shown as a notice when it is returned.
#[derive(Error, Debug)]
pub enum ViewError {
    /// Client-side validation failed; no request was sent
    #[error("{0}")]
    Invalid(String),

    /// The API call failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type for controller operations
pub type ViewResult<T> = Result<T, ViewError>;

struct ViewState<S: Surface> {
    surface: S,
    charts: ChartRegistry<S::Chart>,
    active: Tab,
    generation: u64,
    /// Latest notice shown per region
    notice_seq: HashMap<&'static str, u64>,
}

/// Drives the four dashboard tabs
pub struct ViewController<A, S: Surface> {
    api: A,
    state: Arc<Mutex<ViewState<S>>>,
    settings: ViewSettings,
}

impl<A: HealthApi, S: Surface> ViewController<A, S> {
    /// Create a controller; form defaults are written onto the surface
    pub fn new(api: A, mut surface: S, settings: ViewSettings) -> Self {
        if surface.input(ids::DASH_DAYS).is_empty() {
            surface.set_input(ids::DASH_DAYS, &settings.dashboard_days.to_string());
        }
        forms::init_watch_form(&mut surface, Utc::now());

        let state = ViewState {
            surface,
            charts: ChartRegistry::new(),
            active: Tab::default(),
            generation: 0,
            notice_seq: HashMap::new(),
        };

        Self {
            api,
            state: Arc::new(Mutex::new(state)),
            settings,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn active_tab(&self) -> Tab {
        self.state.lock().await.active
    }

    /// Inspect the surface
    pub async fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.lock().await.surface)
    }

    /// Edit the surface, e.g. to type into inputs
    pub async fn with_surface_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.state.lock().await.surface)
    }

    /// Set an input value
    pub async fn set_input(&self, id: &str, value: &str) {
        self.state.lock().await.surface.set_input(id, value);
    }

    // ============ Tabs ============

    /// Make `tab` the only visible tab and load its data
    pub async fn show_tab(&self, tab: Tab) -> ViewResult<LoadOutcome> {
        let token = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            for t in Tab::ALL {
                state.surface.set_region_visible(t.region(), t == tab);
                state.surface.set_nav_active(t, t == tab);
            }
            state.active = tab;
            tracing::debug!(tab = %tab, generation = state.generation, "switched tab");
            state.generation
        };

        self.load_tab_at(tab, token).await
    }

    /// Run the loader of `tab`
    pub async fn load_tab(&self, tab: Tab) -> ViewResult<LoadOutcome> {
        let token = self.generation().await;
        self.load_tab_at(tab, token).await
    }

    async fn load_tab_at(&self, tab: Tab, token: u64) -> ViewResult<LoadOutcome> {
        match tab {
            Tab::Dashboard => self.dashboard_at(token).await,
            Tab::Watch => self.watch_records_at(token).await,
            Tab::Food => self.refresh_food(token).await,
            Tab::Goals => self.goals_at(token).await,
        }
    }

    async fn generation(&self) -> u64 {
        self.state.lock().await.generation
    }

    // ============ Loaders ============

    /// Summary figures and the four trend charts
    pub async fn load_dashboard(&self) -> ViewResult<LoadOutcome> {
        let token = self.generation().await;
        self.dashboard_at(token).await
    }

    async fn dashboard_at(&self, token: u64) -> ViewResult<LoadOutcome> {
        let days = {
            let state = self.state.lock().await;
            forms::read_days(&state.surface, self.settings.dashboard_days)
        };

        let result = futures_util::future::try_join(
            self.api.health_summary(days),
            self.api.health_trend(days),
        )
        .await;

        self.apply(token, Tab::Dashboard, "dashboard", result, |state, (summary, trend)| {
            for (id, text) in render::summary_cells(&summary) {
                state.surface.set_text(id, &text);
            }
            for (canvas, spec) in render::trend_charts(&trend) {
                state.charts.replace(&mut state.surface, canvas, &spec);
            }
        })
        .await
    }

    /// Most recent watch records
    pub async fn load_watch_records(&self) -> ViewResult<LoadOutcome> {
        let token = self.generation().await;
        self.watch_records_at(token).await
    }

    async fn watch_records_at(&self, token: u64) -> ViewResult<LoadOutcome> {
        let result = self.api.health_records(self.settings.watch_record_limit).await;

        self.apply(token, Tab::Watch, "watch records", result, |state, records| {
            state
                .surface
                .set_table(ids::WATCH_TABLE, render::watch_table(&records));
        })
        .await
    }

    /// Analysis of the selected day, then the calorie trend
    pub async fn load_food(&self) -> ViewResult<LoadOutcome> {
        let token = self.generation().await;
        self.refresh_food(token).await
    }

    async fn refresh_food(&self, token: u64) -> ViewResult<LoadOutcome> {
        let analysis = self.load_food_analysis(token).await;
        let trend = self.load_food_trend(token).await;

        match (analysis?, trend?) {
            (LoadOutcome::Applied, LoadOutcome::Applied) => Ok(LoadOutcome::Applied),
            _ => Ok(LoadOutcome::Stale),
        }
    }

    async fn load_food_analysis(&self, token: u64) -> ViewResult<LoadOutcome> {
        let date = {
            let mut state = self.state.lock().await;
            forms::ensure_food_date(&mut state.surface, Utc::now().date_naive())
        };
        let result = self.api.food_analysis(&date).await;

        self.apply(token, Tab::Food, "food analysis", result, |state, analysis| {
            for (id, text) in render::food_totals(&analysis) {
                state.surface.set_text(id, &text);
            }
            state
                .surface
                .set_progress(ids::FOOD_CALORIE_BAR, render::calorie_progress(&analysis));
            state
                .charts
                .replace(&mut state.surface, ids::CHART_MACROS, &render::macro_chart(&analysis));
            state
                .surface
                .set_table(ids::FOOD_TABLE, render::food_table(&analysis));
        })
        .await
    }

    async fn load_food_trend(&self, token: u64) -> ViewResult<LoadOutcome> {
        let result = self.api.food_trend(self.settings.food_trend_days).await;

        self.apply(token, Tab::Food, "calorie trend", result, |state, trend| {
            state.charts.replace(
                &mut state.surface,
                ids::CHART_FOOD_TREND,
                &render::food_trend_chart(&trend),
            );
        })
        .await
    }

    /// Current goals into the goal inputs
    pub async fn load_goals(&self) -> ViewResult<LoadOutcome> {
        let token = self.generation().await;
        self.goals_at(token).await
    }

    async fn goals_at(&self, token: u64) -> ViewResult<LoadOutcome> {
        let result = self.api.goals().await;

        self.apply(token, Tab::Goals, "goals", result, |state, goals| {
            forms::write_goals_form(&mut state.surface, &goals);
        })
        .await
    }

    /// Draw a loader's result unless a tab switch made it stale
    async fn apply<T>(
        &self,
        token: u64,
        tab: Tab,
        what: &str,
        result: ApiResult<T>,
        draw: impl FnOnce(&mut ViewState<S>, T),
    ) -> ViewResult<LoadOutcome> {
        let mut guard = self.state.lock().await;
        if guard.generation != token {
            tracing::debug!(
                tab = %tab,
                what,
                started = token,
                current = guard.generation,
                "dropping stale response"
            );
            return Ok(LoadOutcome::Stale);
        }

        match result {
            Ok(value) => {
                draw(&mut *guard, value);
                Ok(LoadOutcome::Applied)
            }
            Err(err) => {
                drop(guard);
                tracing::warn!(tab = %tab, what, error = %err, "load failed");
                self.notify(
                    tab.notice_region(),
                    Notice::danger(format!("Could not load {}: {}", what, err)),
                )
                .await;
                Err(ViewError::Api(err))
            }
        }
    }

    // ============ Mutations ============

    /// Fill the sync form with demo readings
    pub async fn fill_demo_watch_form(&self) {
        let mut state = self.state.lock().await;
        forms::fill_demo_watch_form(&mut state.surface, &mut rand::thread_rng(), Utc::now());
    }

    /// Submit the sync form
    pub async fn sync_watch_data(&self) -> ViewResult<()> {
        let region = Tab::Watch.notice_region();
        let record = {
            let state = self.state.lock().await;
            forms::read_watch_form(&state.surface)
        };
        let record = match record {
            Ok(record) => record,
            Err(message) => return Err(self.reject_input(region, message).await),
        };

        match self.api.sync_health(&record).await {
            Ok(receipt) => {
                tracing::info!(synced = ?receipt.map(|r| r.synced), recorded_at = %record.recorded_at, "watch data synced");
                self.notify(region, Notice::success("✓ Data synced")).await;
                // A failed reload has already been reported
                let _ = self.load_watch_records().await;
                Ok(())
            }
            Err(err) => Err(self.report_failure(region, "Sync", err).await),
        }
    }

    /// Submit the food form
    pub async fn add_food_entry(&self) -> ViewResult<()> {
        let region = Tab::Food.notice_region();
        let entry = {
            let state = self.state.lock().await;
            forms::read_food_form(&state.surface, Utc::now().date_naive())
        };
        let entry = match entry {
            Ok(entry) => entry,
            Err(message) => return Err(self.reject_input(region, message).await),
        };

        match self.api.add_food_entry(&entry).await {
            Ok(created) => {
                tracing::info!(id = ?created.and_then(|c| c.id), food = %entry.food_name, meal = %entry.meal_type, "food entry added");
                self.notify(region, Notice::success("✓ Food entry added")).await;
                {
                    let mut state = self.state.lock().await;
                    forms::clear_food_form(&mut state.surface);
                }
                let token = self.generation().await;
                let _ = self.refresh_food(token).await;
                Ok(())
            }
            Err(err) => Err(self.report_failure(region, "Add", err).await),
        }
    }

    /// Delete a food entry and refresh the food tab
    pub async fn delete_food_entry(&self, id: i64) -> ViewResult<()> {
        let region = Tab::Food.notice_region();

        match self.api.delete_food_entry(id).await {
            Ok(()) => {
                tracing::info!(id, "food entry deleted");
                let token = self.generation().await;
                let _ = self.refresh_food(token).await;
                Ok(())
            }
            Err(err) => Err(self.report_failure(region, "Delete", err).await),
        }
    }

    /// Handle a click on a table row action
    pub async fn on_row_action(&self, action: RowAction) -> ViewResult<()> {
        match action {
            RowAction::DeleteFood(id) => self.delete_food_entry(id).await,
        }
    }

    /// Submit the goals form
    pub async fn save_goals(&self) -> ViewResult<()> {
        let region = Tab::Goals.notice_region();
        let goals = {
            let state = self.state.lock().await;
            forms::read_goals_form(&state.surface)
        };
        let goals = match goals {
            Ok(goals) => goals,
            Err(message) => return Err(self.reject_input(region, message).await),
        };

        match self.api.save_goals(&goals).await {
            Ok(_) => {
                tracing::info!(?goals, "goals saved");
                self.notify(region, Notice::success("✓ Goals saved")).await;
                let _ = self.load_goals().await;
                Ok(())
            }
            Err(err) => Err(self.report_failure(region, "Save", err).await),
        }
    }

    async fn reject_input(&self, region: &'static str, message: String) -> ViewError {
        tracing::debug!(region, %message, "form rejected");
        self.notify(region, Notice::warning(message.clone())).await;
        ViewError::Invalid(message)
    }

    async fn report_failure(&self, region: &'static str, action: &str, err: ApiError) -> ViewError {
        tracing::warn!(region, action, error = %err, "mutation failed");
        self.notify(region, Notice::danger(format!("{} failed: {}", action, err)))
            .await;
        ViewError::Api(err)
    }

    // ============ Notices ============

    /// Show a notice and schedule it to hide
    pub async fn notify(&self, region: &'static str, notice: Notice) {
        let seq = {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;
            let seq = state.notice_seq.entry(region).or_insert(0);
            *seq += 1;
            state.surface.show_notice(region, &notice);
            *seq
        };

        let shared = Arc::clone(&self.state);
        let duration = self.settings.notice_duration;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let mut guard = shared.lock().await;
            let state = &mut *guard;
            if state.notice_seq.get(region) == Some(&seq) {
                state.surface.hide_notice(region);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::fakes::{Call, FakeApi, FakeSurface};
    use super::*;
    use crate::api::{FoodAnalysis, FoodEntry, HealthSummary, HealthTrendPoint, MealType};
    use std::collections::BTreeMap;

    fn controller(api: FakeApi) -> ViewController<FakeApi, FakeSurface> {
        ViewController::new(api, FakeSurface::default(), ViewSettings::default())
    }

    fn food(id: i64, meal: MealType, name: &str) -> FoodEntry {
        FoodEntry {
            id: Some(id),
            logged_at: None,
            meal_type: meal,
            food_name: name.to_string(),
            amount_g: 100.0,
            calories: 200.0,
            protein_g: 10.0,
            carbs_g: 20.0,
            fat_g: 5.0,
            fiber_g: 1.0,
        }
    }

    #[tokio::test]
    async fn test_show_tab_exactly_one_visible() {
        let view = controller(FakeApi::default());

        for tab in Tab::ALL {
            view.show_tab(tab).await.unwrap();

            let (regions, navs) = view
                .with_surface(|s| (s.visible_regions(), s.active_navs()))
                .await;
            assert_eq!(regions, vec![tab.region().to_string()]);
            assert_eq!(navs, vec![tab]);
            assert_eq!(view.active_tab().await, tab);
        }
    }

    #[tokio::test]
    async fn test_show_tab_runs_its_loader() {
        let view = controller(FakeApi::default());

        view.show_tab(Tab::Dashboard).await.unwrap();
        assert_eq!(view.api().calls(), vec![Call::Summary(7), Call::Trend(7)]);

        view.api().clear_calls();
        view.show_tab(Tab::Watch).await.unwrap();
        assert_eq!(view.api().calls(), vec![Call::Records(20)]);

        view.api().clear_calls();
        view.show_tab(Tab::Food).await.unwrap();
        assert_eq!(view.api().call_names(), vec!["analysis", "food_trend"]);

        view.api().clear_calls();
        view.show_tab(Tab::Goals).await.unwrap();
        assert_eq!(view.api().calls(), vec![Call::Goals]);
    }

    #[tokio::test]
    async fn test_dashboard_renders_summary_and_charts() {
        let api = FakeApi {
            summary: HealthSummary {
                avg_steps: Some(8123.4),
                ..Default::default()
            },
            trend: vec![HealthTrendPoint {
                date: "2024-03-01".to_string(),
                steps: Some(8000.0),
                ..Default::default()
            }],
            ..Default::default()
        };
        let view = controller(api);
        view.set_input(ids::DASH_DAYS, "30").await;

        assert_eq!(view.load_dashboard().await.unwrap(), LoadOutcome::Applied);
        assert_eq!(view.api().calls(), vec![Call::Summary(30), Call::Trend(30)]);

        view.with_surface(|s| {
            assert_eq!(s.text(ids::SUM_STEPS), Some("8123.4"));
            assert_eq!(s.text(ids::SUM_HEART_RATE), Some(render::PLACEHOLDER));
            for canvas in [
                ids::CHART_STEPS,
                ids::CHART_HEART_RATE,
                ids::CHART_CALORIES,
                ids::CHART_SLEEP,
            ] {
                assert_eq!(s.live_charts(canvas), 1);
            }
        })
        .await;
    }

    #[tokio::test]
    async fn test_reloading_never_leaves_two_charts_on_a_canvas() {
        let view = controller(FakeApi::default());

        view.show_tab(Tab::Dashboard).await.unwrap();
        view.show_tab(Tab::Food).await.unwrap();
        view.show_tab(Tab::Dashboard).await.unwrap();
        view.load_dashboard().await.unwrap();
        view.load_food().await.unwrap();

        view.with_surface(|s| {
            assert_eq!(s.max_live_on_create, 0);
            assert_eq!(s.live_charts(ids::CHART_STEPS), 1);
            assert_eq!(s.live_charts(ids::CHART_MACROS), 1);
            assert_eq!(s.live_charts(ids::CHART_FOOD_TREND), 1);
        })
        .await;
    }

    #[tokio::test]
    async fn test_sync_success_reloads_records() {
        let view = controller(FakeApi::default());
        view.with_surface_mut(|s| {
            s.set_input(ids::SW_DATETIME, "2024-03-01T08:00");
            s.set_input(ids::SW_STEPS, "8000");
            s.set_input(ids::SW_HEART_RATE, "72");
            s.set_input(ids::SW_SLEEP, "7.5");
        })
        .await;

        view.sync_watch_data().await.unwrap();

        let calls = view.api().calls();
        assert_eq!(calls.len(), 2);
        match &calls[0] {
            Call::Sync(record) => {
                assert_eq!(record.steps, 8000);
                assert_eq!(record.heart_rate, Some(72.0));
                assert_eq!(record.sleep_hours, Some(7.5));
            }
            other => panic!("expected sync, got {:?}", other),
        }
        assert_eq!(calls[1], Call::Records(20));

        view.with_surface(|s| {
            let notice = &s.notices["syncAlert"];
            assert_eq!(notice.severity, Severity::Success);
            assert!(s.tables.contains_key(ids::WATCH_TABLE));
        })
        .await;
    }

    #[tokio::test]
    async fn test_sync_rejection_shows_server_message() {
        let mut api = FakeApi::default();
        api.rejections.insert("sync", "Invalid recorded_at: soon");
        let view = controller(api);

        let err = view.sync_watch_data().await.unwrap_err();
        assert!(matches!(err, ViewError::Api(_)));
        assert_eq!(view.api().call_names(), vec!["sync"]);

        view.with_surface(|s| {
            let notice = &s.notices["syncAlert"];
            assert_eq!(notice.severity, Severity::Danger);
            assert_eq!(notice.message, "Sync failed: Invalid recorded_at: soon");
        })
        .await;
    }

    #[tokio::test]
    async fn test_empty_food_name_sends_nothing() {
        let view = controller(FakeApi::default());
        view.set_input(ids::FOOD_CALORIES, "300").await;

        let err = view.add_food_entry().await.unwrap_err();
        assert!(matches!(err, ViewError::Invalid(_)));
        assert!(view.api().calls().is_empty());

        view.with_surface(|s| {
            assert_eq!(s.notices["foodAlert"], Notice::warning("Please enter a food name"));
        })
        .await;
    }

    #[tokio::test]
    async fn test_unknown_meal_sends_nothing() {
        let view = controller(FakeApi::default());
        view.set_input(ids::FOOD_NAME, "Pancakes").await;
        view.set_input(ids::FOOD_MEAL, "brunch").await;

        let err = view.add_food_entry().await.unwrap_err();
        assert!(matches!(err, ViewError::Invalid(_)));
        assert!(view.api().calls().is_empty());

        view.with_surface(|s| {
            let notice = &s.notices["foodAlert"];
            assert_eq!(notice.severity, Severity::Warning);
            assert!(notice.message.contains("brunch"), "{}", notice.message);
            assert_eq!(s.input(ids::FOOD_NAME), "Pancakes");
        })
        .await;
    }

    #[tokio::test]
    async fn test_add_food_clears_form_and_refreshes() {
        let view = controller(FakeApi::default());
        view.with_surface_mut(|s| {
            s.set_input(ids::FOOD_DATE, "2024-03-01");
            s.set_input(ids::FOOD_MEAL, "lunch");
            s.set_input(ids::FOOD_NAME, "Rice");
            s.set_input(ids::FOOD_CALORIES, "200");
        })
        .await;

        view.add_food_entry().await.unwrap();

        assert_eq!(view.api().call_names(), vec!["add_food", "analysis", "food_trend"]);
        assert_eq!(view.api().calls()[1], Call::Analysis("2024-03-01".to_string()));
        view.with_surface(|s| {
            assert_eq!(s.input(ids::FOOD_NAME), "");
            assert_eq!(s.input(ids::FOOD_MEAL), "lunch");
            assert_eq!(s.notices["foodAlert"].severity, Severity::Success);
        })
        .await;
    }

    #[tokio::test]
    async fn test_delete_food_refreshes_analysis_and_trend() {
        let view = controller(FakeApi::default());

        view.on_row_action(RowAction::DeleteFood(5)).await.unwrap();

        let calls = view.api().calls();
        assert_eq!(calls[0], Call::DeleteFood(5));
        let refreshes: Vec<_> = calls[1..].iter().map(Call::name).collect();
        assert_eq!(refreshes, vec!["analysis", "food_trend"]);
    }

    #[tokio::test]
    async fn test_failed_delete_does_not_refresh() {
        let mut api = FakeApi::default();
        api.rejections.insert("delete_food", "Entry not found");
        let view = controller(api);

        assert!(view.delete_food_entry(5).await.is_err());
        assert_eq!(view.api().call_names(), vec!["delete_food"]);
        view.with_surface(|s| {
            assert_eq!(s.notices["foodAlert"].message, "Delete failed: Entry not found");
        })
        .await;
    }

    #[tokio::test]
    async fn test_food_table_in_meal_order() {
        let mut by_meal = BTreeMap::new();
        by_meal.insert(MealType::Breakfast, vec![food(1, MealType::Breakfast, "Oats")]);
        by_meal.insert(MealType::Lunch, vec![]);
        by_meal.insert(MealType::Dinner, vec![food(2, MealType::Dinner, "Soup")]);
        by_meal.insert(MealType::Snack, vec![]);
        let api = FakeApi {
            analysis: FoodAnalysis {
                total_calories: 400.0,
                calorie_goal: Some(1600.0),
                entries_by_meal: by_meal,
                ..Default::default()
            },
            ..Default::default()
        };
        let view = controller(api);

        view.show_tab(Tab::Food).await.unwrap();

        view.with_surface(|s| {
            let table = &s.tables[ids::FOOD_TABLE];
            let meals: Vec<&str> = table.rows.iter().map(|r| r.cells[0].as_str()).collect();
            assert_eq!(meals, vec!["Breakfast", "Dinner"]);
            assert_eq!(s.progress[ids::FOOD_CALORIE_BAR], 25);
            assert_eq!(s.text(ids::FOOD_TOTAL_CALORIES), Some("400"));
            // Empty date picker defaults to today
            assert!(!s.input(ids::FOOD_DATE).is_empty());
        })
        .await;
    }

    #[tokio::test]
    async fn test_save_goals_then_reload() {
        let view = controller(FakeApi::default());
        view.show_tab(Tab::Goals).await.unwrap();
        view.set_input(ids::GOAL_STEPS, "12000").await;
        view.api().clear_calls();

        view.save_goals().await.unwrap();

        let calls = view.api().calls();
        match &calls[0] {
            Call::SaveGoals(goals) => assert_eq!(goals.daily_steps, 12000),
            other => panic!("expected save, got {:?}", other),
        }
        assert_eq!(calls[1], Call::Goals);
    }

    #[tokio::test]
    async fn test_invalid_goals_send_nothing() {
        let view = controller(FakeApi::default());
        view.set_input(ids::GOAL_STEPS, "many").await;

        assert!(matches!(
            view.save_goals().await,
            Err(ViewError::Invalid(_))
        ));
        assert!(view.api().calls().is_empty());
        view.with_surface(|s| {
            assert_eq!(s.notices["goalsAlert"].severity, Severity::Warning);
        })
        .await;
    }

    #[tokio::test]
    async fn test_save_goals_rejection_shows_danger() {
        let mut api = FakeApi::default();
        api.rejections.insert("save_goals", "daily_steps must be positive");
        let view = controller(api);
        view.set_input(ids::GOAL_STEPS, "12000").await;

        let err = view.save_goals().await.unwrap_err();
        assert!(matches!(err, ViewError::Api(ApiError::Rejected { status: 400, .. })));
        assert_eq!(view.api().call_names(), vec!["save_goals"]);

        view.with_surface(|s| {
            assert_eq!(
                s.notices["goalsAlert"],
                Notice::danger("Save failed: daily_steps must be positive")
            );
            assert_eq!(s.input(ids::GOAL_STEPS), "12000");
        })
        .await;
    }

    #[tokio::test]
    async fn test_read_failure_is_surfaced() {
        let api = FakeApi {
            offline: vec!["records"],
            ..Default::default()
        };
        let view = controller(api);

        let err = view.show_tab(Tab::Watch).await.unwrap_err();
        assert!(matches!(err, ViewError::Api(ApiError::Unavailable)));

        view.with_surface(|s| {
            let notice = &s.notices["syncAlert"];
            assert_eq!(notice.severity, Severity::Danger);
            assert_eq!(notice.message, "Could not load watch records: API unavailable");
            assert!(!s.tables.contains_key(ids::WATCH_TABLE));
        })
        .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_dashboard_response_is_dropped() {
        let mut api = FakeApi {
            summary: HealthSummary {
                avg_steps: Some(9000.0),
                ..Default::default()
            },
            ..Default::default()
        };
        api.delays.insert("summary", Duration::from_millis(500));
        let view = controller(api);

        let (dashboard, goals) = tokio::join!(view.show_tab(Tab::Dashboard), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            view.show_tab(Tab::Goals).await
        });

        assert_eq!(dashboard.unwrap(), LoadOutcome::Stale);
        assert_eq!(goals.unwrap(), LoadOutcome::Applied);
        assert_eq!(view.active_tab().await, Tab::Goals);

        view.with_surface(|s| {
            assert_eq!(s.text(ids::SUM_STEPS), None);
            assert_eq!(s.live_charts(ids::CHART_STEPS), 0);
            assert_eq!(s.visible_regions(), vec![Tab::Goals.region().to_string()]);
        })
        .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_dashboard_failure_shows_no_notice() {
        let mut api = FakeApi {
            offline: vec!["summary"],
            ..Default::default()
        };
        api.delays.insert("summary", Duration::from_millis(500));
        let view = controller(api);

        let (dashboard, goals) = tokio::join!(view.show_tab(Tab::Dashboard), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            view.show_tab(Tab::Goals).await
        });

        assert_eq!(dashboard.unwrap(), LoadOutcome::Stale);
        assert_eq!(goals.unwrap(), LoadOutcome::Applied);

        view.with_surface(|s| {
            assert!(!s.notices.contains_key("dashAlert"));
            assert!(s.notice_log.is_empty(), "{:?}", s.notice_log);
        })
        .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_notice_hides_after_duration() {
        let view = controller(FakeApi::default());

        view.notify("foodAlert", Notice::success("saved")).await;
        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(view.with_surface(|s| s.notices.contains_key("foodAlert")).await);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!view.with_surface(|s| s.notices.contains_key("foodAlert")).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_notice_outlives_older_timer() {
        let view = controller(FakeApi::default());

        view.notify("syncAlert", Notice::success("first")).await;
        tokio::time::sleep(Duration::from_millis(2000)).await;
        view.notify("syncAlert", Notice::danger("second")).await;

        tokio::time::sleep(Duration::from_millis(1500)).await;
        let shown = view.with_surface(|s| s.notices.get("syncAlert").cloned()).await;
        assert_eq!(shown, Some(Notice::danger("second")));

        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert!(!view.with_surface(|s| s.notices.contains_key("syncAlert")).await);
    }

    #[tokio::test]
    async fn test_new_prefills_forms() {
        let view = controller(FakeApi::default());
        view.with_surface(|s| {
            assert_eq!(s.input(ids::DASH_DAYS), "7");
            assert_eq!(s.input(ids::SW_DATETIME).len(), "2024-03-01T08:00".len());
        })
        .await;
    }

    #[tokio::test]
    async fn test_form_defaults_share_one_clock() {
        let view = controller(FakeApi::default());
        view.show_tab(Tab::Food).await.unwrap();

        view.with_surface(|s| {
            let synced_at = s.input(ids::SW_DATETIME);
            assert_eq!(s.input(ids::FOOD_DATE), &synced_at[..10]);
        })
        .await;
    }

    #[tokio::test]
    async fn test_fill_demo_then_sync() {
        let view = controller(FakeApi::default());
        view.fill_demo_watch_form().await;
        view.sync_watch_data().await.unwrap();

        match &view.api().calls()[0] {
            Call::Sync(record) => {
                assert!(record.steps >= 6000);
                assert!(record.workout_type.is_some());
            }
            other => panic!("expected sync, got {:?}", other),
        }
    }
}
