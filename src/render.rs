//! Render pass orchestration
//!
//! A [`Renderer`] reads one [`ReportModel`] and drives every sub-renderer
//! against a [`ViewPort`] and a [`ChartBackend`], in a fixed order:
//! scalar bindings, badge, insights, timeline, composition chart, impact chart.
//!
//! Each step is its own failure boundary. A missing slot or bad value is
//! logged and recorded in the [`RenderOutcome`], and the pass moves on.

use crate::chart::{self, ChartBackend, ChartStyle};
use crate::error::{RenderError, Result};
use crate::format::{format_number, format_percent, format_score, Locale};
use crate::list;
use crate::report::ReportModel;
use crate::severity::classify;
use crate::timeline;
use crate::viewport::{Slot, ViewPort};
use std::fmt;

/// One isolated unit of the render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStep {
    ScalarBindings,
    SeverityBadge,
    Insights,
    Timeline,
    CompositionChart,
    ImpactChart,
}

impl fmt::Display for RenderStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderStep::ScalarBindings => "scalar bindings",
            RenderStep::SeverityBadge => "severity badge",
            RenderStep::Insights => "insights list",
            RenderStep::Timeline => "severity timeline",
            RenderStep::CompositionChart => "composition chart",
            RenderStep::ImpactChart => "impact chart",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepFailure {
    pub step: RenderStep,
    pub error: RenderError,
}

/// What happened during one pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOutcome {
    /// Invariant violations found in the record; rendering continued
    pub warnings: Vec<RenderError>,
    /// Bindings or steps that could not be completed
    pub failures: Vec<StepFailure>,
}

impl RenderOutcome {
    /// True when every binding landed
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, step: RenderStep, result: Result<()>) {
        match result {
            Ok(()) => log::debug!("{}: ok", step),
            Err(error) => {
                log::warn!("{} skipped: {}", step, error);
                self.failures.push(StepFailure { step, error });
            }
        }
    }
}

/// Drives a single render pass over a borrowed report
#[derive(Debug, Clone)]
pub struct Renderer<'a> {
    report: &'a ReportModel,
    locale: Locale,
    chart_style: ChartStyle,
}

impl<'a> Renderer<'a> {
    pub fn new(report: &'a ReportModel) -> Self {
        Self {
            report,
            locale: Locale::default(),
            chart_style: ChartStyle::default(),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_chart_style(mut self, style: ChartStyle) -> Self {
        self.chart_style = style;
        self
    }

    /// Text bindings in layout order, formatted for display
    pub fn scalar_bindings(&self) -> Vec<(Slot, String)> {
        let r = self.report;
        vec![
            (
                Slot::LocationLabel,
                format!("{} • {}", r.location, r.event_type),
            ),
            (Slot::SevScore, format_score(r.severity_score)),
            (Slot::DamagePercent, format_percent(r.damage_percent)),
            (
                Slot::BuildingsAffected,
                format_number(r.clamped_buildings_affected(), self.locale),
            ),
            (
                Slot::PopulationAtRisk,
                format_number(r.clamped_population_at_risk(), self.locale),
            ),
            (Slot::CaptureTime, format!("Captured: {}", r.captured_at)),
        ]
    }

    /// Run the full pass. Never aborts early.
    pub fn render(&self, view: &mut dyn ViewPort, charts: &mut dyn ChartBackend) -> RenderOutcome {
        let r = self.report;
        let mut outcome = RenderOutcome::default();

        for warning in r.validate() {
            log::warn!("{}", warning);
            outcome.warnings.push(warning);
        }

        for (slot, text) in self.scalar_bindings() {
            outcome.record(RenderStep::ScalarBindings, view.bind_text(slot, &text));
        }
        outcome.record(
            RenderStep::ScalarBindings,
            view.bind_attribute(Slot::OriginalImage, "src", &r.images.original),
        );
        outcome.record(
            RenderStep::ScalarBindings,
            view.bind_attribute(Slot::MaskedImage, "src", &r.images.masked),
        );

        outcome.record(RenderStep::SeverityBadge, self.render_badge(view));

        outcome.record(
            RenderStep::Insights,
            list::render(view, Slot::InsightsList, &r.insights),
        );
        outcome.record(
            RenderStep::Timeline,
            timeline::render(view, Slot::SeverityTimeline, &r.severity_timeline),
        );

        let composition = chart::composition_spec(r, &self.chart_style);
        outcome.record(
            RenderStep::CompositionChart,
            charts.construct(Slot::DamagePieChart, &composition),
        );
        let impact = chart::impact_spec(r, &self.chart_style);
        outcome.record(
            RenderStep::ImpactChart,
            charts.construct(Slot::ImpactBarChart, &impact),
        );

        outcome
    }

    fn render_badge(&self, view: &mut dyn ViewPort) -> Result<()> {
        let classification = classify(&self.report.severity_label);
        view.bind_text(Slot::SeverityBadge, &classification.display_text)?;
        view.set_variant(Slot::SeverityBadge, classification.variant)
    }
}
