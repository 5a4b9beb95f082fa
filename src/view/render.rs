//! View rendering
//!
//! Pure functions turning API view-models into text, table rows and chart
//! specs. Nothing here touches a surface.

use chrono::{DateTime, Local, NaiveDateTime};

use super::chart::ChartSpec;
use super::surface::ids;
use crate::api::{
    FoodAnalysis, FoodEntry, FoodTrendPoint, HealthSummary, HealthTrendPoint, WatchSyncRecord,
};

/// Shown wherever a value is missing
pub const PLACEHOLDER: &str = "—";

/// Calorie goal assumed when the analysis carries none
pub const DEFAULT_CALORIE_GOAL: f64 = 2000.0;

/// Action attached to a table row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    DeleteFood(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub action: Option<RowAction>,
}

/// Body of a table; `empty_message` is shown when there are no rows
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<TableRow>,
    pub empty_message: &'static str,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Format a number the way a page would print it: no trailing `.0`
pub fn fmt_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(fmt_number).unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// `YYYY-MM-DD HH:MM` in local time for zoned stamps, as-is for naive ones
pub fn fmt_date(iso: &str) -> String {
    if iso.is_empty() {
        return PLACEHOLDER.to_string();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string();
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(iso, format).ok())
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| iso.to_string())
}

/// Chart axis label for an ISO date: `MM-DD`
pub fn day_label(date: &str) -> String {
    date.get(5..).unwrap_or(date).to_string()
}

/// Text of the six summary figures, keyed by element id
pub fn summary_cells(summary: &HealthSummary) -> Vec<(&'static str, String)> {
    vec![
        (ids::SUM_STEPS, fmt_opt(summary.avg_steps)),
        (ids::SUM_HEART_RATE, fmt_opt(summary.avg_heart_rate)),
        (ids::SUM_CALORIES, fmt_opt(summary.avg_calories_burned)),
        (ids::SUM_SLEEP, fmt_opt(summary.avg_sleep_hours)),
        (ids::SUM_SPO2, fmt_opt(summary.avg_blood_oxygen)),
        (ids::SUM_ACTIVE, fmt_opt(summary.avg_active_minutes)),
    ]
}

/// The four dashboard line charts, keyed by canvas id
pub fn trend_charts(trend: &[HealthTrendPoint]) -> Vec<(&'static str, ChartSpec)> {
    let labels: Vec<String> = trend.iter().map(|p| day_label(&p.date)).collect();
    let series = |f: fn(&HealthTrendPoint) -> Option<f64>| trend.iter().map(f).collect::<Vec<_>>();

    vec![
        (
            ids::CHART_STEPS,
            ChartSpec::line(labels.clone(), "Steps", series(|p| p.steps), "#0d6efd"),
        ),
        (
            ids::CHART_HEART_RATE,
            ChartSpec::line(labels.clone(), "Heart rate (bpm)", series(|p| p.heart_rate), "#dc3545"),
        ),
        (
            ids::CHART_CALORIES,
            ChartSpec::line(labels.clone(), "Calories burned", series(|p| p.calories_burned), "#fd7e14"),
        ),
        (
            ids::CHART_SLEEP,
            ChartSpec::line(labels, "Sleep (h)", series(|p| p.sleep_hours), "#0dcaf0"),
        ),
    ]
}

/// Recent watch records, newest first as returned
pub fn watch_table(records: &[WatchSyncRecord]) -> Table {
    let rows = records
        .iter()
        .map(|r| TableRow {
            cells: vec![
                fmt_date(&r.recorded_at),
                r.steps.to_string(),
                fmt_opt(r.heart_rate),
                r.calories_burned.to_string(),
                r.sleep_hours
                    .map(|h| format!("{} h", fmt_number(h)))
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
                r.blood_oxygen
                    .map(|o| format!("{}%", fmt_number(o)))
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
                workout_cell(r),
            ],
            action: None,
        })
        .collect();

    Table {
        headers: vec!["Time", "Steps", "Heart rate", "Calories", "Sleep", "SpO2", "Workout"],
        rows,
        empty_message: "No data",
    }
}

fn workout_cell(record: &WatchSyncRecord) -> String {
    match record.workout_type.as_deref() {
        Some(kind) if !kind.is_empty() => {
            if record.workout_duration > 0 {
                format!("{} {}min", kind, record.workout_duration)
            } else {
                kind.to_string()
            }
        }
        _ => PLACEHOLDER.to_string(),
    }
}

/// Food entries of a day in meal order; meals without entries add no rows
pub fn food_table(analysis: &FoodAnalysis) -> Table {
    let mut entries: Vec<&FoodEntry> = analysis.entries_by_meal.values().flatten().collect();
    // Stable: entries keep their server order within a meal
    entries.sort_by_key(|e| e.meal_type);

    let rows = entries
        .into_iter()
        .map(|e| TableRow {
            cells: vec![
                e.meal_type.label().to_string(),
                e.food_name.clone(),
                fmt_number(e.amount_g),
                fmt_number(e.calories),
                format!("{}g", fmt_number(e.protein_g)),
                format!("{}g", fmt_number(e.carbs_g)),
                format!("{}g", fmt_number(e.fat_g)),
            ],
            action: e.id.map(RowAction::DeleteFood),
        })
        .collect();

    Table {
        headers: vec!["Meal", "Food", "Amount (g)", "kcal", "Protein", "Carbs", "Fat"],
        rows,
        empty_message: "No entries",
    }
}

/// Totals text of the food tab, keyed by element id
pub fn food_totals(analysis: &FoodAnalysis) -> Vec<(&'static str, String)> {
    vec![
        (ids::FOOD_TOTAL_CALORIES, fmt_number(analysis.total_calories)),
        (ids::FOOD_TOTAL_PROTEIN, format!("{}g", fmt_number(analysis.total_protein_g))),
        (ids::FOOD_TOTAL_CARBS, format!("{}g", fmt_number(analysis.total_carbs_g))),
        (ids::FOOD_TOTAL_FAT, format!("{}g", fmt_number(analysis.total_fat_g))),
    ]
}

/// Share of the calorie goal eaten so far, capped at 100
pub fn calorie_progress(analysis: &FoodAnalysis) -> u8 {
    let goal = analysis
        .calorie_goal
        .filter(|g| *g > 0.0)
        .unwrap_or(DEFAULT_CALORIE_GOAL);
    let percent = (analysis.total_calories / goal * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

pub fn macro_chart(analysis: &FoodAnalysis) -> ChartSpec {
    ChartSpec::doughnut(&[
        ("Protein", analysis.total_protein_g, "#0d6efd"),
        ("Carbs", analysis.total_carbs_g, "#198754"),
        ("Fat", analysis.total_fat_g, "#dc3545"),
    ])
    .titled("Macronutrient split")
}

pub fn food_trend_chart(trend: &[FoodTrendPoint]) -> ChartSpec {
    ChartSpec::bar(
        trend.iter().map(|p| day_label(&p.date)).collect(),
        "Calorie intake (kcal)",
        trend.iter().map(|p| p.calories).collect(),
        "#ffc107",
    )
    .titled(format!("Calorie intake, last {} days", trend.len()))
}
