//! Flood damage assessment record
//!
//! A `ReportModel` is materialized once (from JSON or the bundled sample) and
//! only ever read afterwards. Derived values such as the undamaged share are
//! recomputed on demand and never stored.

use crate::error::{LoadError, RenderError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sample record bundled with the binary (`floodview sample`)
const SAMPLE_REPORT_JSON: &str = include_str!("sample_report.json");

/// Asset references produced by the upstream imagery pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportImages {
    pub original: String,
    /// Carried for completeness; the dashboard has no slot for it
    pub enhanced: String,
    pub masked: String,
}

/// One narrative step of the severity breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub label: String,
    pub description: String,
}

impl TimelineEntry {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
        }
    }
}

/// One post-disaster analysis record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawReport")]
pub struct ReportModel {
    pub location: String,
    pub event_type: String,
    pub captured_at: String,

    /// Logically High / Medium / Low, but any string is accepted
    pub severity_label: String,
    /// Expected within 0.0..=1.0
    pub severity_score: f64,

    /// Expected within 0..=100; signed so out-of-range input can be reported
    pub damage_percent: i64,
    /// Counts are expected non-negative; signed for the same reason
    pub buildings_affected: i64,
    pub roads_blocked: i64,
    pub population_at_risk: i64,

    pub insights: Vec<String>,
    pub severity_timeline: Vec<TimelineEntry>,
    pub images: ReportImages,
}

/// Wire shape: accepts both the nested `images` object and the flat
/// `imageOriginal` / `imageEnhanced` / `imageMasked` keys.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReport {
    #[serde(alias = "locationName")]
    location: String,
    event_type: String,
    captured_at: String,
    severity_label: String,
    severity_score: f64,
    damage_percent: i64,
    buildings_affected: i64,
    roads_blocked: i64,
    population_at_risk: i64,
    #[serde(default)]
    insights: Vec<String>,
    #[serde(default)]
    severity_timeline: Vec<TimelineEntry>,
    images: Option<ReportImages>,
    image_original: Option<String>,
    image_enhanced: Option<String>,
    image_masked: Option<String>,
}

impl TryFrom<RawReport> for ReportModel {
    type Error = String;

    fn try_from(raw: RawReport) -> std::result::Result<Self, Self::Error> {
        let images = match raw.images {
            Some(images) => images,
            None => ReportImages {
                original: raw
                    .image_original
                    .ok_or("missing field `images` (or `imageOriginal`)")?,
                enhanced: raw.image_enhanced.unwrap_or_default(),
                masked: raw
                    .image_masked
                    .ok_or("missing field `images` (or `imageMasked`)")?,
            },
        };

        Ok(ReportModel {
            location: raw.location,
            event_type: raw.event_type,
            captured_at: raw.captured_at,
            severity_label: raw.severity_label,
            severity_score: raw.severity_score,
            damage_percent: raw.damage_percent,
            buildings_affected: raw.buildings_affected,
            roads_blocked: raw.roads_blocked,
            population_at_risk: raw.population_at_risk,
            insights: raw.insights,
            severity_timeline: raw.severity_timeline,
            images,
        })
    }
}

impl ReportModel {
    /// Parse a record from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a record from a JSON file
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// The bundled Kandivali West sample record
    pub fn sample() -> Result<Self, LoadError> {
        Self::from_json(SAMPLE_REPORT_JSON)
    }

    /// Share of the analyzed area not classified as damaged: `100 - damage_percent`
    pub fn undamaged_percent(&self) -> i64 {
        100i64.saturating_sub(self.damage_percent)
    }

    /// Damage percent forced into 0..=100, for chart derivation
    pub fn clamped_damage_percent(&self) -> i64 {
        self.damage_percent.clamp(0, 100)
    }

    /// Complement of [`Self::clamped_damage_percent`]; the two always sum to 100
    pub fn clamped_undamaged_percent(&self) -> i64 {
        100 - self.clamped_damage_percent()
    }

    pub fn clamped_buildings_affected(&self) -> u64 {
        clamp_count(self.buildings_affected)
    }

    pub fn clamped_roads_blocked(&self) -> u64 {
        clamp_count(self.roads_blocked)
    }

    pub fn clamped_population_at_risk(&self) -> u64 {
        clamp_count(self.population_at_risk)
    }

    /// Collect every invariant violation in the record.
    ///
    /// Findings are warnings: callers log them and keep rendering.
    pub fn validate(&self) -> Vec<RenderError> {
        let mut findings = Vec::new();

        if !self.severity_score.is_finite() || !(0.0..=1.0).contains(&self.severity_score) {
            findings.push(RenderError::InvalidData {
                field: "severityScore",
                value: self.severity_score.to_string(),
                reason: "must be within 0..=1",
            });
        }

        if !(0..=100).contains(&self.damage_percent) {
            findings.push(RenderError::InvalidData {
                field: "damagePercent",
                value: self.damage_percent.to_string(),
                reason: "must be within 0..=100",
            });
        }

        let counts = [
            ("buildingsAffected", self.buildings_affected),
            ("roadsBlocked", self.roads_blocked),
            ("populationAtRisk", self.population_at_risk),
        ];
        for (field, value) in counts {
            if value < 0 {
                findings.push(RenderError::InvalidData {
                    field,
                    value: value.to_string(),
                    reason: "must not be negative",
                });
            }
        }

        findings
    }
}

/// Negative counts display and chart as zero
fn clamp_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_json(damage: i64, score: f64) -> String {
        format!(
            r#"{{
                "location": "Test Ward",
                "eventType": "Flash Flood",
                "capturedAt": "2025-07-22 09:47 IST",
                "severityLabel": "Medium",
                "severityScore": {score},
                "damagePercent": {damage},
                "buildingsAffected": 10,
                "roadsBlocked": 2,
                "populationAtRisk": 150,
                "images": {{"original": "a.png", "enhanced": "b.png", "masked": "c.png"}}
            }}"#
        )
    }

    #[test]
    fn test_sample_parses() {
        let report = ReportModel::sample().unwrap();
        assert_eq!(report.location, "Kandivali West, Mumbai");
        assert_eq!(report.severity_label, "High");
        assert_eq!(report.damage_percent, 74);
        assert_eq!(report.buildings_affected, 412);
        assert_eq!(report.roads_blocked, 23);
        assert_eq!(report.population_at_risk, 5620);
        assert_eq!(report.insights.len(), 8);
        assert_eq!(report.severity_timeline.len(), 5);
        assert_eq!(report.images.enhanced, "assets/enhanced_sample.png");
        assert!(report.validate().is_empty());
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let report = ReportModel::from_json(&minimal_json(40, 0.5)).unwrap();
        assert!(report.insights.is_empty());
        assert!(report.severity_timeline.is_empty());
    }

    #[test]
    fn test_flat_image_keys_and_location_alias() {
        let json = r#"{
            "locationName": "Kurla",
            "eventType": "Urban Flooding",
            "capturedAt": "now",
            "severityLabel": "Low",
            "severityScore": 0.2,
            "damagePercent": 5,
            "buildingsAffected": 1,
            "roadsBlocked": 0,
            "populationAtRisk": 12,
            "imageOriginal": "o.png",
            "imageEnhanced": "e.png",
            "imageMasked": "m.png"
        }"#;
        let report = ReportModel::from_json(json).unwrap();
        assert_eq!(report.location, "Kurla");
        assert_eq!(report.images.original, "o.png");
        assert_eq!(report.images.masked, "m.png");
    }

    #[test]
    fn test_missing_images_is_rejected() {
        let json = minimal_json(10, 0.1).replace(
            r#""images": {"original": "a.png", "enhanced": "b.png", "masked": "c.png"}"#,
            r#""imageEnhanced": "b.png""#,
        );
        let err = ReportModel::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("images"));
    }

    #[test]
    fn test_undamaged_is_complement() {
        let report = ReportModel::from_json(&minimal_json(74, 0.9)).unwrap();
        assert_eq!(report.undamaged_percent(), 26);
        assert_eq!(report.damage_percent + report.undamaged_percent(), 100);
    }

    #[test]
    fn test_undamaged_does_not_overflow_at_extremes() {
        let mut report = ReportModel::from_json(&minimal_json(74, 0.9)).unwrap();
        report.damage_percent = i64::MIN;
        assert_eq!(report.undamaged_percent(), i64::MAX);
        assert_eq!(report.clamped_damage_percent(), 0);
        assert_eq!(report.clamped_undamaged_percent(), 100);
    }

    #[test]
    fn test_validate_reports_out_of_range_values() {
        let report = ReportModel::from_json(&minimal_json(140, 1.4)).unwrap();
        let findings = report.validate();
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| matches!(f, RenderError::InvalidData { .. })));
        assert_eq!(report.clamped_damage_percent(), 100);
        assert_eq!(report.clamped_undamaged_percent(), 0);
    }

    #[test]
    fn test_negative_counts_are_reported_not_rejected() {
        let json = minimal_json(40, 0.5)
            .replace(r#""roadsBlocked": 2"#, r#""roadsBlocked": -1"#)
            .replace(r#""populationAtRisk": 150"#, r#""populationAtRisk": -300"#);
        let report = ReportModel::from_json(&json).unwrap();

        let fields: Vec<&str> = report
            .validate()
            .iter()
            .filter_map(|f| match f {
                RenderError::InvalidData { field, .. } => Some(*field),
                _ => None,
            })
            .collect();
        assert_eq!(fields, vec!["roadsBlocked", "populationAtRisk"]);
        assert_eq!(report.clamped_roads_blocked(), 0);
        assert_eq!(report.clamped_population_at_risk(), 0);
        assert_eq!(report.clamped_buildings_affected(), 10);
    }

    #[test]
    fn test_negative_damage_is_clamped_not_rejected() {
        let report = ReportModel::from_json(&minimal_json(-5, 0.3)).unwrap();
        assert_eq!(report.validate().len(), 1);
        assert_eq!(report.clamped_damage_percent(), 0);
    }
}
