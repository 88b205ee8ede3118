//! Floodview - flood damage assessment dashboards
//!
//! Renders one post-disaster analysis record into a dashboard: labeled
//! statistics, a severity badge, an insight list, a severity timeline, and two
//! derived charts.
//!
//! # Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Record | [`report`] |
//! | Number formatting | [`format`] |
//! | Severity badge | [`severity`] |
//! | Output slots | [`viewport`] |
//! | Insights / timeline | [`list`], [`timeline`] |
//! | Chart specs | [`chart`] |
//! | Orchestration | [`render`] |
//! | Page output | [`html`] |
//!
//! # Quick Start
//!
//! ```no_run
//! use floodview::{ChartJsBackend, Document, ReportModel, Renderer};
//!
//! let report = ReportModel::load("report.json".as_ref()).unwrap();
//! let mut doc = Document::dashboard();
//! let mut charts = ChartJsBackend::for_document(&doc);
//!
//! let outcome = Renderer::new(&report).render(&mut doc, &mut charts);
//! println!("complete: {}", outcome.is_complete());
//!
//! floodview::html::generate("dashboard.html".as_ref(), &doc, charts.charts(), "Flood Report").unwrap();
//! ```

pub mod chart;
pub mod config;
pub mod error;
pub mod format;
pub mod html;
pub mod list;
pub mod render;
pub mod report;
pub mod severity;
pub mod timeline;
pub mod viewport;

pub use chart::{
    composition_spec, impact_spec, scale_count, ChartBackend, ChartJsBackend, ChartSpec,
    ChartStyle, ChartType, ConstructedChart, LegendPosition, POPULATION_SCALE,
};
pub use config::Config;
pub use error::{LoadError, RenderError};
pub use format::{format_number, Locale};
pub use render::{RenderOutcome, RenderStep, Renderer, StepFailure};
pub use report::{ReportImages, ReportModel, TimelineEntry};
pub use severity::{classify, Classification, SeverityVariant};
pub use viewport::{Document, Node, Slot, SlotState, ViewPort};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Verify core types are re-exported from crate root
        assert_eq!(POPULATION_SCALE, 100);
        assert_eq!(Slot::ALL.len(), 13);
    }
}
