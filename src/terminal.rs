//! Terminal Surface
//!
//! An in-memory [`Surface`] for the command line. The controller draws into
//! it exactly as it would into a page; [`TerminalSurface::render`] then
//! prints a tab as plain text, with charts drawn as sparklines and bars.

use std::collections::HashMap;
use std::fmt::Write;

use crate::view::render::fmt_number;
use crate::view::{ids, ChartKind, ChartSpec, Notice, Surface, Table, Tab};

const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const BAR_WIDTH: usize = 30;

/// Handle of a chart drawn on a [`TerminalSurface`]
#[derive(Debug)]
pub struct TerminalChart {
    id: u64,
    canvas: String,
}

/// Surface keeping the page model in memory
#[derive(Debug, Default)]
pub struct TerminalSurface {
    visible: HashMap<String, bool>,
    nav: HashMap<Tab, bool>,
    texts: HashMap<String, String>,
    inputs: HashMap<String, String>,
    tables: HashMap<String, Table>,
    progress: HashMap<String, u8>,
    notices: HashMap<String, Notice>,
    shown: Vec<Notice>,
    charts: HashMap<String, (u64, ChartSpec)>,
    next_chart: u64,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tab whose region is visible, if any
    pub fn visible_tab(&self) -> Option<Tab> {
        Tab::ALL
            .into_iter()
            .find(|t| self.visible.get(t.region()).copied().unwrap_or(false))
    }

    pub fn is_nav_active(&self, tab: Tab) -> bool {
        self.nav.get(&tab).copied().unwrap_or(false)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.texts.get(id).map(String::as_str)
    }

    pub fn table(&self, id: &str) -> Option<&Table> {
        self.tables.get(id)
    }

    pub fn chart(&self, canvas: &str) -> Option<&ChartSpec> {
        self.charts.get(canvas).map(|(_, spec)| spec)
    }

    /// Notice currently displayed in a region
    pub fn notice(&self, region: &str) -> Option<&Notice> {
        self.notices.get(region)
    }

    /// Every notice shown so far, hidden or not
    pub fn notices_shown(&self) -> &[Notice] {
        &self.shown
    }

    /// Render the visible tab
    pub fn render_visible(&self) -> String {
        self.visible_tab()
            .map(|tab| self.render(tab))
            .unwrap_or_default()
    }

    /// Render one tab as text
    pub fn render(&self, tab: Tab) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== {} ==", tab.title());
        let _ = writeln!(out, "{}", self.nav_bar());
        if let Some(notice) = self.notices.get(tab.notice_region()) {
            let _ = writeln!(out, "[{}] {}", notice.severity.as_str(), notice.message);
        }
        out.push('\n');

        match tab {
            Tab::Dashboard => self.render_dashboard(&mut out),
            Tab::Watch => self.render_watch(&mut out),
            Tab::Food => self.render_food(&mut out),
            Tab::Goals => self.render_goals(&mut out),
        }
        out
    }

    /// Tab names, the highlighted one in brackets
    fn nav_bar(&self) -> String {
        Tab::ALL
            .into_iter()
            .map(|t| {
                if self.is_nav_active(t) {
                    format!("[{}]", t.title())
                } else {
                    t.title().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    }

    fn render_dashboard(&self, out: &mut String) {
        let days = self.input(ids::DASH_DAYS);
        let _ = writeln!(out, "Averages over the last {} days", days);
        for (label, id) in [
            ("Steps", ids::SUM_STEPS),
            ("Heart rate", ids::SUM_HEART_RATE),
            ("Calories burned", ids::SUM_CALORIES),
            ("Sleep (h)", ids::SUM_SLEEP),
            ("SpO2 (%)", ids::SUM_SPO2),
            ("Active minutes", ids::SUM_ACTIVE),
        ] {
            let _ = writeln!(out, "  {:<16} {}", label, self.text(id).unwrap_or(""));
        }

        for canvas in [
            ids::CHART_STEPS,
            ids::CHART_HEART_RATE,
            ids::CHART_CALORIES,
            ids::CHART_SLEEP,
        ] {
            if let Some(spec) = self.chart(canvas) {
                out.push('\n');
                out.push_str(&render_chart(spec));
            }
        }
    }

    fn render_watch(&self, out: &mut String) {
        let _ = writeln!(out, "Recent records");
        if let Some(table) = self.table(ids::WATCH_TABLE) {
            out.push_str(&render_table(table));
        }
    }

    fn render_food(&self, out: &mut String) {
        let _ = writeln!(out, "Date: {}", self.input(ids::FOOD_DATE));
        let _ = writeln!(
            out,
            "  Calories {}  Protein {}  Carbs {}  Fat {}",
            self.text(ids::FOOD_TOTAL_CALORIES).unwrap_or(""),
            self.text(ids::FOOD_TOTAL_PROTEIN).unwrap_or(""),
            self.text(ids::FOOD_TOTAL_CARBS).unwrap_or(""),
            self.text(ids::FOOD_TOTAL_FAT).unwrap_or(""),
        );
        if let Some(percent) = self.progress.get(ids::FOOD_CALORIE_BAR) {
            let filled = usize::from(*percent) * BAR_WIDTH / 100;
            let _ = writeln!(
                out,
                "  Goal [{}{}] {}%",
                "#".repeat(filled),
                ".".repeat(BAR_WIDTH - filled),
                percent
            );
        }

        if let Some(spec) = self.chart(ids::CHART_MACROS) {
            out.push('\n');
            out.push_str(&render_chart(spec));
        }
        if let Some(table) = self.table(ids::FOOD_TABLE) {
            out.push('\n');
            out.push_str(&render_table(table));
        }
        if let Some(spec) = self.chart(ids::CHART_FOOD_TREND) {
            out.push('\n');
            out.push_str(&render_chart(spec));
        }
    }

    fn render_goals(&self, out: &mut String) {
        for (label, id) in [
            ("Daily steps", ids::GOAL_STEPS),
            ("Calorie intake", ids::GOAL_CALORIES_IN),
            ("Calorie burn", ids::GOAL_CALORIES_BURN),
            ("Sleep hours", ids::GOAL_SLEEP),
            ("Active minutes", ids::GOAL_ACTIVE),
        ] {
            let _ = writeln!(out, "  {:<16} {}", label, self.input(id));
        }
    }
}

impl Surface for TerminalSurface {
    type Chart = TerminalChart;

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
        self.progress.insert(id.to_string(), percent.min(100));
    }

    fn show_notice(&mut self, region: &str, notice: &Notice) {
        self.notices.insert(region.to_string(), notice.clone());
        self.shown.push(notice.clone());
    }

    fn hide_notice(&mut self, region: &str) {
        self.notices.remove(region);
    }

    fn create_chart(&mut self, canvas: &str, spec: &ChartSpec) -> TerminalChart {
        self.next_chart += 1;
        let id = self.next_chart;
        self.charts.insert(canvas.to_string(), (id, spec.clone()));
        TerminalChart {
            id,
            canvas: canvas.to_string(),
        }
    }

    fn destroy_chart(&mut self, chart: TerminalChart) {
        // A newer chart may already own the canvas
        if self.charts.get(&chart.canvas).map(|(id, _)| *id) == Some(chart.id) {
            self.charts.remove(&chart.canvas);
        }
    }
}

/// Render a table with padded columns
pub fn render_table(table: &Table) -> String {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (i, cell) in row.cells.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    let mut out = String::new();
    let has_actions = table.rows.iter().any(|r| r.action.is_some());
    let header = pad_line(table.headers.iter().copied(), &widths);
    if has_actions {
        let _ = writeln!(out, "{}  ID", header);
    } else {
        let _ = writeln!(out, "{}", header);
    }
    let _ = writeln!(out, "{}", "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len()));

    if table.is_empty() {
        let _ = writeln!(out, "{}", table.empty_message);
        return out;
    }

    for row in &table.rows {
        let text = pad_line(row.cells.iter().map(String::as_str), &widths);
        match row.action {
            Some(crate::view::RowAction::DeleteFood(id)) => {
                let _ = writeln!(out, "{}  #{}", text, id);
            }
            None => {
                let _ = writeln!(out, "{}", text);
            }
        }
    }
    out
}

fn pad_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    padded.join("  ").trim_end().to_string()
}

/// Render a chart as text
pub fn render_chart(spec: &ChartSpec) -> String {
    let mut out = String::new();
    let title = spec
        .title
        .clone()
        .or_else(|| spec.datasets.first().map(|d| d.label.clone()))
        .unwrap_or_default();
    let _ = writeln!(out, "{}", title);

    let Some(dataset) = spec.datasets.first() else {
        return out;
    };
    if dataset.values.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return out;
    }

    match spec.kind {
        ChartKind::Line => {
            let _ = writeln!(out, "  {}", sparkline(&dataset.values));
            let first = spec.labels.first().map(String::as_str).unwrap_or("");
            let last = spec.labels.last().map(String::as_str).unwrap_or("");
            let _ = writeln!(out, "  {} .. {}", first, last);
        }
        ChartKind::Bar => {
            let max = dataset
                .values
                .iter()
                .flatten()
                .fold(0.0_f64, |acc, v| acc.max(*v));
            for (label, value) in spec.labels.iter().zip(&dataset.values) {
                let value = value.unwrap_or(0.0);
                let len = if max > 0.0 {
                    ((value / max) * BAR_WIDTH as f64).round() as usize
                } else {
                    0
                };
                let _ = writeln!(out, "  {:<6} {} {}", label, "█".repeat(len), fmt_number(value));
            }
        }
        ChartKind::Doughnut => {
            let total: f64 = dataset.values.iter().flatten().sum();
            for (label, value) in spec.labels.iter().zip(&dataset.values) {
                let value = value.unwrap_or(0.0);
                let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
                let _ = writeln!(out, "  {:<8} {:>5.1}%  ({})", label, share, fmt_number(value));
            }
        }
    }
    out
}

/// Sparkline of a series; gaps render as spaces
pub fn sparkline(values: &[Option<f64>]) -> String {
    let present = values.iter().flatten();
    let min = present.clone().fold(f64::INFINITY, |a, v| a.min(*v));
    let max = present.fold(f64::NEG_INFINITY, |a, v| a.max(*v));
    let span = max - min;

    values
        .iter()
        .map(|v| match v {
            None => ' ',
            Some(_) if span <= 0.0 => SPARKS[SPARKS.len() / 2],
            Some(v) => {
                let level = ((v - min) / span * (SPARKS.len() - 1) as f64).round() as usize;
                SPARKS[level.min(SPARKS.len() - 1)]
            }
        })
        .collect()
}
