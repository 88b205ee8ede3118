//! Chart specification derivation and the charting backend seam
//!
//! Derivation is pure: a [`ChartSpec`] is computed from the report and handed
//! unmodified to a [`ChartBackend`]. The bundled backend, [`ChartJsBackend`],
//! turns specs into Chart.js configurations for the HTML writer.

use crate::error::{RenderError, Result};
use crate::report::ReportModel;
use crate::viewport::{Document, Slot};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeSet;

/// Divisor applied to population so it sits on the same axis as the other counts
pub const POPULATION_SCALE: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    Pie,
    Bar,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Pie => "pie",
            ChartType::Bar => "bar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl LegendPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            LegendPosition::Top => "top",
            LegendPosition::Bottom => "bottom",
            LegendPosition::Left => "left",
            LegendPosition::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: Option<String>,
    pub data: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Tooltip label template; `{label}` and `{value}` are substituted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipFormat(pub String);

impl TooltipFormat {
    pub fn percent() -> Self {
        TooltipFormat("{label}: {value}%".to_string())
    }

    pub fn apply(&self, label: &str, value: i64) -> String {
        self.0
            .replace("{label}", label)
            .replace("{value}", &value.to_string())
    }
}

/// Value axis settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axis {
    pub begin_at_zero: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub responsive: bool,
    pub legend_position: Option<LegendPosition>,
    pub tooltip: Option<TooltipFormat>,
    pub axis: Option<Axis>,
}

/// Backend-agnostic description of one visualization
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub chart_type: ChartType,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartSpec {
    /// Values of the first dataset
    pub fn values(&self) -> &[i64] {
        self.data
            .datasets
            .first()
            .map(|d| d.data.as_slice())
            .unwrap_or(&[])
    }
}

/// Display options shared by both charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartStyle {
    #[serde(default = "default_true")]
    pub responsive: bool,
    #[serde(default)]
    pub legend_position: LegendPosition,
}

fn default_true() -> bool {
    true
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            responsive: true,
            legend_position: LegendPosition::Bottom,
        }
    }
}

/// Divide `count` by `factor`, rounding halves up.
///
/// This is the only rounding rule used for scaled counts.
pub fn scale_count(count: u64, factor: u64) -> u64 {
    if factor == 0 {
        return count;
    }
    let quotient = count / factor;
    let remainder = count % factor;
    if remainder >= factor - remainder {
        quotient + 1
    } else {
        quotient
    }
}

/// Damaged vs. undamaged share of the analyzed area
pub fn composition_spec(report: &ReportModel, style: &ChartStyle) -> ChartSpec {
    ChartSpec {
        chart_type: ChartType::Pie,
        data: ChartData {
            labels: vec!["Damaged Area".to_string(), "Undamaged Area".to_string()],
            datasets: vec![Dataset {
                label: None,
                data: vec![
                    report.clamped_damage_percent(),
                    report.clamped_undamaged_percent(),
                ],
            }],
        },
        options: ChartOptions {
            responsive: style.responsive,
            legend_position: Some(style.legend_position),
            tooltip: Some(TooltipFormat::percent()),
            axis: None,
        },
    }
}

/// Buildings, blocked roads and scaled population on a zero-based axis
pub fn impact_spec(report: &ReportModel, style: &ChartStyle) -> ChartSpec {
    let population = scale_count(report.clamped_population_at_risk(), POPULATION_SCALE);

    ChartSpec {
        chart_type: ChartType::Bar,
        data: ChartData {
            labels: vec![
                "Buildings".to_string(),
                "Road Segments".to_string(),
                "Population (x100)".to_string(),
            ],
            datasets: vec![Dataset {
                label: Some("Impact".to_string()),
                data: vec![
                    saturating_i64(report.clamped_buildings_affected()),
                    saturating_i64(report.clamped_roads_blocked()),
                    saturating_i64(population),
                ],
            }],
        },
        options: ChartOptions {
            responsive: style.responsive,
            legend_position: None,
            tooltip: None,
            axis: Some(Axis {
                begin_at_zero: true,
            }),
        },
    }
}

fn saturating_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// External charting collaborator. The return value carries no chart handle;
/// construction is fire-and-forget configuration.
pub trait ChartBackend {
    fn construct(&mut self, canvas: Slot, spec: &ChartSpec) -> Result<()>;
}

/// A chart handed to the Chart.js backend
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructedChart {
    pub canvas: Slot,
    pub config: Value,
}

/// Collects Chart.js configurations for canvases present in the layout
#[derive(Debug, Clone, Default)]
pub struct ChartJsBackend {
    canvases: BTreeSet<Slot>,
    charts: Vec<ConstructedChart>,
}

impl ChartJsBackend {
    pub fn new(canvases: &[Slot]) -> Self {
        Self {
            canvases: canvases.iter().copied().collect(),
            charts: Vec::new(),
        }
    }

    /// Backend whose canvases are the chart slots present in `doc`
    pub fn for_document(doc: &Document) -> Self {
        let canvases: Vec<Slot> = [Slot::DamagePieChart, Slot::ImpactBarChart]
            .into_iter()
            .filter(|slot| doc.contains(*slot))
            .collect();
        Self::new(&canvases)
    }

    pub fn charts(&self) -> &[ConstructedChart] {
        &self.charts
    }

    pub fn chart(&self, canvas: Slot) -> Option<&ConstructedChart> {
        self.charts.iter().find(|c| c.canvas == canvas)
    }
}

impl ChartBackend for ChartJsBackend {
    fn construct(&mut self, canvas: Slot, spec: &ChartSpec) -> Result<()> {
        if !self.canvases.contains(&canvas) {
            return Err(RenderError::missing(canvas));
        }
        let config = chartjs_config(spec);
        // Constructing on the same canvas again replaces the earlier chart
        self.charts.retain(|c| c.canvas != canvas);
        self.charts.push(ConstructedChart { canvas, config });
        Ok(())
    }
}

/// Translate a spec into a Chart.js configuration object.
///
/// The tooltip template travels as `plugins.tooltip.labelTemplate`; the page
/// script turns it into a label callback.
pub fn chartjs_config(spec: &ChartSpec) -> Value {
    let datasets: Vec<Value> = spec
        .data
        .datasets
        .iter()
        .map(|d| match &d.label {
            Some(label) => json!({ "label": label, "data": d.data }),
            None => json!({ "data": d.data }),
        })
        .collect();

    let mut plugins = serde_json::Map::new();
    if let Some(position) = spec.options.legend_position {
        plugins.insert("legend".into(), json!({ "position": position.as_str() }));
    }
    if let Some(tooltip) = &spec.options.tooltip {
        plugins.insert("tooltip".into(), json!({ "labelTemplate": tooltip.0 }));
    }

    let mut options = serde_json::Map::new();
    options.insert("responsive".into(), json!(spec.options.responsive));
    if !plugins.is_empty() {
        options.insert("plugins".into(), Value::Object(plugins));
    }
    if let Some(axis) = spec.options.axis {
        options.insert(
            "scales".into(),
            json!({ "y": { "beginAtZero": axis.begin_at_zero } }),
        );
    }

    json!({
        "type": spec.chart_type.as_str(),
        "data": {
            "labels": spec.data.labels,
            "datasets": datasets,
        },
        "options": Value::Object(options),
    })
}
