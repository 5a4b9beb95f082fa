//! Charts
//!
//! [`ChartSpec`] describes what to draw; [`ChartRegistry`] owns the live
//! handle of every canvas and disposes of it before a replacement is drawn.

use std::collections::HashMap;

use super::surface::Surface;

/// Chart type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    Doughnut,
}

/// One data series
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    /// Gaps are `None` and are spanned by line charts
    pub values: Vec<Option<f64>>,
    /// One color for the series, or one per value for doughnuts
    pub colors: Vec<&'static str>,
}

/// Everything needed to draw a chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: Option<String>,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartSpec {
    /// Single-series line chart
    pub fn line(labels: Vec<String>, label: &str, values: Vec<Option<f64>>, color: &'static str) -> Self {
        Self {
            kind: ChartKind::Line,
            title: None,
            labels,
            datasets: vec![Dataset {
                label: label.to_string(),
                values,
                colors: vec![color],
            }],
        }
    }

    /// Single-series bar chart
    pub fn bar(labels: Vec<String>, label: &str, values: Vec<f64>, color: &'static str) -> Self {
        Self {
            kind: ChartKind::Bar,
            title: None,
            labels,
            datasets: vec![Dataset {
                label: label.to_string(),
                values: values.into_iter().map(Some).collect(),
                colors: vec![color],
            }],
        }
    }

    /// Doughnut of labelled parts
    pub fn doughnut(parts: &[(&str, f64, &'static str)]) -> Self {
        Self {
            kind: ChartKind::Doughnut,
            title: None,
            labels: parts.iter().map(|(label, _, _)| label.to_string()).collect(),
            datasets: vec![Dataset {
                label: String::new(),
                values: parts.iter().map(|(_, value, _)| Some(*value)).collect(),
                colors: parts.iter().map(|(_, _, color)| *color).collect(),
            }],
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Live chart handles keyed by canvas id
pub struct ChartRegistry<H> {
    charts: HashMap<String, H>,
}

impl<H> Default for ChartRegistry<H> {
    fn default() -> Self {
        Self {
            charts: HashMap::new(),
        }
    }
}

impl<H> ChartRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `spec` on `canvas`, destroying whatever chart was bound to it first
    pub fn replace<S>(&mut self, surface: &mut S, canvas: &str, spec: &ChartSpec)
    where
        S: Surface<Chart = H>,
    {
        self.destroy(surface, canvas);
        let handle = surface.create_chart(canvas, spec);
        self.charts.insert(canvas.to_string(), handle);
    }

    /// Destroy the chart bound to `canvas`; returns whether there was one
    pub fn destroy<S>(&mut self, surface: &mut S, canvas: &str) -> bool
    where
        S: Surface<Chart = H>,
    {
        match self.charts.remove(canvas) {
            Some(handle) => {
                surface.destroy_chart(handle);
                true
            }
            None => false,
        }
    }

    /// Destroy every chart
    pub fn clear<S>(&mut self, surface: &mut S)
    where
        S: Surface<Chart = H>,
    {
        for (_, handle) in self.charts.drain() {
            surface.destroy_chart(handle);
        }
    }

    pub fn contains(&self, canvas: &str) -> bool {
        self.charts.contains_key(canvas)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}
