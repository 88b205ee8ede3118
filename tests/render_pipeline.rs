//! End-to-end render pass over the bundled sample record
//!
//! Drives the public API only: load, render into a `Document`, derive
//! charts, serialize to HTML.

use floodview::{
    ChartBackend, ChartJsBackend, ChartSpec, Document, Locale, RenderError, RenderStep,
    ReportModel, Renderer, SeverityVariant, Slot,
};

/// Test double recording every spec handed to the backend
#[derive(Default)]
struct RecordingBackend {
    constructed: Vec<(Slot, ChartSpec)>,
}

impl ChartBackend for RecordingBackend {
    fn construct(&mut self, canvas: Slot, spec: &ChartSpec) -> Result<(), RenderError> {
        self.constructed.push((canvas, spec.clone()));
        Ok(())
    }
}

fn child_title(doc: &Document, index: usize) -> String {
    doc.children(Slot::SeverityTimeline)[index].children[1]
        .text
        .clone()
        .unwrap()
}

#[test]
fn test_sample_record_end_to_end() {
    let report = ReportModel::sample().expect("sample parses");
    let mut doc = Document::dashboard();
    let mut backend = RecordingBackend::default();

    let outcome = Renderer::new(&report).render(&mut doc, &mut backend);
    assert!(outcome.is_complete(), "failures: {:?}", outcome.failures);

    // Scalars
    assert_eq!(doc.text(Slot::SevScore), Some("0.91"));
    assert_eq!(doc.text(Slot::DamagePercent), Some("74%"));
    assert_eq!(doc.text(Slot::BuildingsAffected), Some("412"));
    assert_eq!(doc.text(Slot::PopulationAtRisk), Some("5,620"));

    // Badge
    assert_eq!(doc.text(Slot::SeverityBadge), Some("Severity: High"));
    assert_eq!(doc.variant(Slot::SeverityBadge), Some(SeverityVariant::High));

    // Collections, in original order
    let insights = doc.children(Slot::InsightsList);
    assert_eq!(insights.len(), 8);
    for (node, text) in insights.iter().zip(&report.insights) {
        assert_eq!(node.text.as_ref(), Some(text));
    }
    assert_eq!(doc.children(Slot::SeverityTimeline).len(), 5);
    assert_eq!(child_title(&doc, 0), "Flood Intensity Assessment");
    assert_eq!(child_title(&doc, 4), "Urgency Level");

    // Charts, handed over in order and unmodified
    assert_eq!(backend.constructed.len(), 2);
    let (pie_slot, pie) = &backend.constructed[0];
    let (bar_slot, bar) = &backend.constructed[1];
    assert_eq!(*pie_slot, Slot::DamagePieChart);
    assert_eq!(pie.values(), &[74, 26]);
    assert_eq!(*bar_slot, Slot::ImpactBarChart);
    assert_eq!(bar.values(), &[412, 23, 56]);
}

#[test]
fn test_enhanced_image_is_not_bound() {
    let report = ReportModel::sample().unwrap();
    let mut doc = Document::dashboard();
    let mut charts = ChartJsBackend::for_document(&doc);
    Renderer::new(&report).render(&mut doc, &mut charts);

    for slot in Slot::ALL {
        assert_ne!(doc.attribute(slot, "src"), Some(report.images.enhanced.as_str()));
    }
}

#[test]
fn test_international_locale_end_to_end() {
    let mut report = ReportModel::sample().unwrap();
    report.population_at_risk = 1_234_567;
    let mut doc = Document::dashboard();
    let mut charts = ChartJsBackend::for_document(&doc);
    Renderer::new(&report)
        .with_locale(Locale::International)
        .render(&mut doc, &mut charts);

    assert_eq!(doc.text(Slot::PopulationAtRisk), Some("1,234,567"));
    let bar = charts.chart(Slot::ImpactBarChart).unwrap();
    assert_eq!(
        bar.config["data"]["datasets"][0]["data"],
        serde_json::json!([412, 23, 12346])
    );
}

#[test]
fn test_layout_without_timeline_still_renders_rest() {
    let report = ReportModel::sample().unwrap();
    let present: Vec<Slot> = Slot::ALL
        .into_iter()
        .filter(|s| *s != Slot::SeverityTimeline)
        .collect();
    let mut doc = Document::with_slots(&present);
    let mut charts = ChartJsBackend::for_document(&doc);
    let outcome = Renderer::new(&report).render(&mut doc, &mut charts);

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].step, RenderStep::Timeline);
    assert_eq!(doc.children(Slot::InsightsList).len(), 8);
    assert_eq!(charts.charts().len(), 2);

    let mut html = Vec::new();
    floodview::html::write(&mut html, &doc, charts.charts(), "Partial").unwrap();
    let html = String::from_utf8(html).unwrap();
    assert!(!html.contains(r#"id="severityTimeline""#));
    assert!(html.contains(r#"id="impactBarChart""#));
}
