//! Test doubles for the view layer

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use super::chart::ChartSpec;
use super::notice::Notice;
use super::render::Table;
use super::surface::Surface;
use super::tab::Tab;
use crate::api::{
    ApiError, ApiResult, FoodAnalysis, FoodEntry, FoodTrendPoint, Goals, HealthApi, HealthSummary,
    HealthTrendPoint, SyncReceipt, WatchSyncRecord,
};

/// Chart handle of the fake surface
#[derive(Debug)]
pub struct FakeChart {
    canvas: String,
}

/// Surface that records everything it is told
#[derive(Default)]
pub struct FakeSurface {
    pub visible: HashMap<String, bool>,
    pub nav: HashMap<Tab, bool>,
    pub texts: HashMap<String, String>,
    pub inputs: HashMap<String, String>,
    pub tables: HashMap<String, Table>,
    pub progress: HashMap<String, u8>,
    pub notices: HashMap<String, Notice>,
    pub notice_log: Vec<(String, Notice)>,
    pub chart_specs: HashMap<String, ChartSpec>,
    pub live: HashMap<String, usize>,
    pub charts_created: usize,
    /// Highest number of live charts seen on a canvas right before a create
    pub max_live_on_create: usize,
}

impl FakeSurface {
    pub fn live_charts(&self, canvas: &str) -> usize {
        self.live.get(canvas).copied().unwrap_or(0)
    }

    pub fn visible_regions(&self) -> Vec<String> {
        self.visible
            .iter()
            .filter(|(_, v)| **v)
            .map(|(k, _)| k.clone())
            .collect()
    }

    pub fn active_navs(&self) -> Vec<Tab> {
        self.nav.iter().filter(|(_, v)| **v).map(|(k, _)| *k).collect()
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.texts.get(id).map(String::as_str)
    }
}

impl Surface for FakeSurface {
    type Chart = FakeChart;

    fn set_region_visible(&mut self, region: &str, visible: bool) {
        self.visible.insert(region.to_string(), visible);
    }

    fn set_nav_active(&mut self, tab: Tab, active: bool) {
        self.nav.insert(tab, active);
    }

    fn set_text(&mut self, id: &str, text: &str) {
        self.texts.insert(id.to_string(), text.to_string());
    }

    fn input(&self, id: &str) -> String {
        self.inputs.get(id).cloned().unwrap_or_default()
    }

    fn set_input(&mut self, id: &str, value: &str) {
        self.inputs.insert(id.to_string(), value.to_string());
    }

    fn set_table(&mut self, id: &str, table: Table) {
        self.tables.insert(id.to_string(), table);
    }

    fn set_progress(&mut self, id: &str, percent: u8) {
        self.progress.insert(id.to_string(), percent);
    }

    fn show_notice(&mut self, region: &str, notice: &Notice) {
        self.notices.insert(region.to_string(), notice.clone());
        self.notice_log.push((region.to_string(), notice.clone()));
    }

    fn hide_notice(&mut self, region: &str) {
        self.notices.remove(region);
    }

    fn create_chart(&mut self, canvas: &str, spec: &ChartSpec) -> FakeChart {
        let live = self.live.entry(canvas.to_string()).or_insert(0);
        self.max_live_on_create = self.max_live_on_create.max(*live);
        *live += 1;
        self.charts_created += 1;
        self.chart_specs.insert(canvas.to_string(), spec.clone());
        FakeChart {
            canvas: canvas.to_string(),
        }
    }

    fn destroy_chart(&mut self, chart: FakeChart) {
        if let Some(live) = self.live.get_mut(&chart.canvas) {
            *live = live.saturating_sub(1);
        }
    }
}

/// A call received by [`FakeApi`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Summary(u32),
    Trend(u32),
    Records(u32),
    Sync(WatchSyncRecord),
    Analysis(String),
    FoodTrend(u32),
    AddFood(FoodEntry),
    DeleteFood(i64),
    Goals,
    SaveGoals(Goals),
}

impl Call {
    pub fn name(&self) -> &'static str {
        match self {
            Call::Summary(_) => "summary",
            Call::Trend(_) => "trend",
            Call::Records(_) => "records",
            Call::Sync(_) => "sync",
            Call::Analysis(_) => "analysis",
            Call::FoodTrend(_) => "food_trend",
            Call::AddFood(_) => "add_food",
            Call::DeleteFood(_) => "delete_food",
            Call::Goals => "goals",
            Call::SaveGoals(_) => "save_goals",
        }
    }
}

/// In-memory backend with canned responses
#[derive(Default)]
pub struct FakeApi {
    pub summary: HealthSummary,
    pub trend: Vec<HealthTrendPoint>,
    pub records: Vec<WatchSyncRecord>,
    pub analysis: FoodAnalysis,
    pub food_trend: Vec<FoodTrendPoint>,
    pub goals: Goals,
    /// Calls (by name) answered with a 400 carrying this message
    pub rejections: HashMap<&'static str, &'static str>,
    /// Calls (by name) that fail as if the backend were down
    pub offline: Vec<&'static str>,
    /// Calls (by name) that take this long to answer
    pub delays: HashMap<&'static str, Duration>,
    pub(crate) calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls().iter().map(Call::name).collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    async fn answer<T>(&self, call: Call, value: T) -> ApiResult<T> {
        let name = call.name();
        self.calls.lock().unwrap().push(call);

        if let Some(delay) = self.delays.get(name) {
            tokio::time::sleep(*delay).await;
        }
        if self.offline.contains(&name) {
            return Err(ApiError::Unavailable);
        }
        if let Some(message) = self.rejections.get(name) {
            return Err(ApiError::Rejected {
                status: 400,
                message: message.to_string(),
            });
        }
        Ok(value)
    }
}

#[async_trait]
impl HealthApi for FakeApi {
    async fn health_summary(&self, days: u32) -> ApiResult<HealthSummary> {
        self.answer(Call::Summary(days), self.summary.clone()).await
    }

    async fn health_trend(&self, days: u32) -> ApiResult<Vec<HealthTrendPoint>> {
        self.answer(Call::Trend(days), self.trend.clone()).await
    }

    async fn health_records(&self, limit: u32) -> ApiResult<Vec<WatchSyncRecord>> {
        self.answer(Call::Records(limit), self.records.clone()).await
    }

    async fn sync_health(&self, record: &WatchSyncRecord) -> ApiResult<Option<SyncReceipt>> {
        let receipt = SyncReceipt {
            synced: 1,
            records: vec![record.clone()],
        };
        self.answer(Call::Sync(record.clone()), Some(receipt)).await
    }

    async fn food_analysis(&self, date: &str) -> ApiResult<FoodAnalysis> {
        self.answer(Call::Analysis(date.to_string()), self.analysis.clone())
            .await
    }

    async fn food_trend(&self, days: u32) -> ApiResult<Vec<FoodTrendPoint>> {
        self.answer(Call::FoodTrend(days), self.food_trend.clone()).await
    }

    async fn add_food_entry(&self, entry: &FoodEntry) -> ApiResult<Option<FoodEntry>> {
        let mut created = entry.clone();
        created.id = Some(100);
        self.answer(Call::AddFood(entry.clone()), Some(created)).await
    }

    async fn delete_food_entry(&self, id: i64) -> ApiResult<()> {
        self.answer(Call::DeleteFood(id), ()).await
    }

    async fn goals(&self) -> ApiResult<Goals> {
        self.answer(Call::Goals, self.goals.clone()).await
    }

    async fn save_goals(&self, goals: &Goals) -> ApiResult<Option<Goals>> {
        self.answer(Call::SaveGoals(goals.clone()), None).await
    }
}
