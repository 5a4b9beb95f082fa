//! Rendering surface
//!
//! The page the controller draws into. A browser implementation maps these
//! calls onto DOM elements and a charting library; [`crate::terminal`]
//! keeps everything in memory and prints it.

use super::chart::ChartSpec;
use super::notice::Notice;
use super::render::Table;
use super::tab::Tab;

/// Element identifiers shared by the controller and every surface
pub mod ids {
    // Dashboard
    pub const DASH_DAYS: &str = "dashDays";
    pub const SUM_STEPS: &str = "sum-steps";
    pub const SUM_HEART_RATE: &str = "sum-hr";
    pub const SUM_CALORIES: &str = "sum-cal";
    pub const SUM_SLEEP: &str = "sum-sleep";
    pub const SUM_SPO2: &str = "sum-spo2";
    pub const SUM_ACTIVE: &str = "sum-active";
    pub const CHART_STEPS: &str = "chartSteps";
    pub const CHART_HEART_RATE: &str = "chartHR";
    pub const CHART_CALORIES: &str = "chartCal";
    pub const CHART_SLEEP: &str = "chartSleep";

    // Watch sync form
    pub const SW_DATETIME: &str = "sw-datetime";
    pub const SW_STEPS: &str = "sw-steps";
    pub const SW_HEART_RATE: &str = "sw-hr";
    pub const SW_CALORIES: &str = "sw-cal";
    pub const SW_ACTIVE: &str = "sw-active";
    pub const SW_SLEEP: &str = "sw-sleep";
    pub const SW_SPO2: &str = "sw-spo2";
    pub const SW_WORKOUT: &str = "sw-workout";
    pub const SW_WORKOUT_DURATION: &str = "sw-workout-dur";
    pub const WATCH_TABLE: &str = "watchTableBody";

    // Food
    pub const FOOD_DATE: &str = "food-date";
    pub const FOOD_MEAL: &str = "food-meal";
    pub const FOOD_NAME: &str = "food-name";
    pub const FOOD_AMOUNT: &str = "food-amount";
    pub const FOOD_CALORIES: &str = "food-cal";
    pub const FOOD_PROTEIN: &str = "food-protein";
    pub const FOOD_CARBS: &str = "food-carbs";
    pub const FOOD_FAT: &str = "food-fat";
    pub const FOOD_FIBER: &str = "food-fiber";
    pub const FOOD_TOTAL_CALORIES: &str = "food-total-cal";
    pub const FOOD_TOTAL_PROTEIN: &str = "food-total-protein";
    pub const FOOD_TOTAL_CARBS: &str = "food-total-carbs";
    pub const FOOD_TOTAL_FAT: &str = "food-total-fat";
    pub const FOOD_CALORIE_BAR: &str = "food-cal-bar";
    pub const FOOD_TABLE: &str = "foodTableBody";
    pub const CHART_MACROS: &str = "chartMacros";
    pub const CHART_FOOD_TREND: &str = "chartFoodTrend";

    // Goals
    pub const GOAL_STEPS: &str = "goal-steps";
    pub const GOAL_CALORIES_IN: &str = "goal-cal-in";
    pub const GOAL_CALORIES_BURN: &str = "goal-cal-burn";
    pub const GOAL_SLEEP: &str = "goal-sleep";
    pub const GOAL_ACTIVE: &str = "goal-active";
}

/// Everything the controller needs from a page
pub trait Surface: Send + 'static {
    /// Handle of a live chart bound to a canvas
    type Chart: Send + 'static;

    /// Show or hide a content region
    fn set_region_visible(&mut self, region: &str, visible: bool);

    /// Highlight (or un-highlight) the navigation entry of a tab
    fn set_nav_active(&mut self, tab: Tab, active: bool);

    /// Replace the text content of an element
    fn set_text(&mut self, id: &str, text: &str);

    /// Current value of an input; empty when unset
    fn input(&self, id: &str) -> String;

    /// Set the value of an input
    fn set_input(&mut self, id: &str, value: &str);

    /// Replace the body of a table
    fn set_table(&mut self, id: &str, table: Table);

    /// Set the fill of a progress bar, 0-100
    fn set_progress(&mut self, id: &str, percent: u8);

    /// Show a notice in a notice region
    fn show_notice(&mut self, region: &str, notice: &Notice);

    /// Hide whatever the notice region shows
    fn hide_notice(&mut self, region: &str);

    /// Draw a chart on a canvas
    fn create_chart(&mut self, canvas: &str, spec: &ChartSpec) -> Self::Chart;

    /// Dispose of a chart and release its canvas
    fn destroy_chart(&mut self, chart: Self::Chart);
}
