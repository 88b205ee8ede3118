//! Named output slots and the in-memory document that backs them
//!
//! The renderer never addresses output targets directly; everything goes
//! through the [`ViewPort`] trait using a [`Slot`] identifier. [`Document`]
//! is the concrete implementation: it holds the dashboard's slot tree in
//! memory, which the HTML writer then serializes and tests inspect.

use crate::error::{RenderError, Result};
use crate::severity::SeverityVariant;
use std::collections::BTreeMap;
use std::fmt;

/// Every output target of the dashboard layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    LocationLabel,
    SevScore,
    DamagePercent,
    BuildingsAffected,
    PopulationAtRisk,
    CaptureTime,
    OriginalImage,
    MaskedImage,
    SeverityBadge,
    InsightsList,
    SeverityTimeline,
    DamagePieChart,
    ImpactBarChart,
}

impl Slot {
    pub const ALL: [Slot; 13] = [
        Slot::LocationLabel,
        Slot::SevScore,
        Slot::DamagePercent,
        Slot::BuildingsAffected,
        Slot::PopulationAtRisk,
        Slot::CaptureTime,
        Slot::OriginalImage,
        Slot::MaskedImage,
        Slot::SeverityBadge,
        Slot::InsightsList,
        Slot::SeverityTimeline,
        Slot::DamagePieChart,
        Slot::ImpactBarChart,
    ];

    /// Element id used in the page layout
    pub fn id(&self) -> &'static str {
        match self {
            Slot::LocationLabel => "locationLabel",
            Slot::SevScore => "sevScore",
            Slot::DamagePercent => "damagePercent",
            Slot::BuildingsAffected => "buildingsAffected",
            Slot::PopulationAtRisk => "populationAtRisk",
            Slot::CaptureTime => "captureTime",
            Slot::OriginalImage => "originalImage",
            Slot::MaskedImage => "maskedImage",
            Slot::SeverityBadge => "severityBadge",
            Slot::InsightsList => "insightsList",
            Slot::SeverityTimeline => "severityTimeline",
            Slot::DamagePieChart => "damagePieChart",
            Slot::ImpactBarChart => "impactBarChart",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A detached element built by a sub-renderer before insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub tag: String,
    pub classes: Vec<String>,
    pub text: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Add space-separated classes
    pub fn with_class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(|c| c.to_string()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Binding operations the renderer relies on.
///
/// Implementations report a slot they cannot resolve as
/// [`RenderError::MissingTarget`].
pub trait ViewPort {
    /// Replace the slot's visible text content
    fn bind_text(&mut self, slot: Slot, value: &str) -> Result<()>;

    /// Set a single attribute (image sources)
    fn bind_attribute(&mut self, slot: Slot, attr: &str, value: &str) -> Result<()>;

    /// Apply exactly one severity variant, clearing any previous one
    fn set_variant(&mut self, slot: Slot, variant: SeverityVariant) -> Result<()>;

    /// Clear the slot's children and insert `nodes` in the given order
    fn replace_children(&mut self, slot: Slot, nodes: Vec<Node>) -> Result<()>;
}

/// Current state of one slot in a [`Document`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotState {
    pub text: Option<String>,
    pub attributes: BTreeMap<String, String>,
    pub classes: Vec<String>,
    pub children: Vec<Node>,
}

/// In-memory dashboard: one [`SlotState`] per resolvable slot
#[derive(Debug, Clone, Default)]
pub struct Document {
    slots: BTreeMap<Slot, SlotState>,
}

impl Document {
    /// Full dashboard layout with every slot present
    pub fn dashboard() -> Self {
        Self::with_slots(&Slot::ALL)
    }

    /// Layout containing only the given slots
    pub fn with_slots(slots: &[Slot]) -> Self {
        Self {
            slots: slots
                .iter()
                .map(|slot| (*slot, SlotState::default()))
                .collect(),
        }
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.slots.contains_key(&slot)
    }

    pub fn slot(&self, slot: Slot) -> Option<&SlotState> {
        self.slots.get(&slot)
    }

    pub fn text(&self, slot: Slot) -> Option<&str> {
        self.slot(slot).and_then(|s| s.text.as_deref())
    }

    pub fn attribute(&self, slot: Slot, attr: &str) -> Option<&str> {
        self.slot(slot)
            .and_then(|s| s.attributes.get(attr))
            .map(|v| v.as_str())
    }

    pub fn children(&self, slot: Slot) -> &[Node] {
        self.slot(slot).map(|s| s.children.as_slice()).unwrap_or(&[])
    }

    /// Variant currently applied to the slot, if any
    pub fn variant(&self, slot: Slot) -> Option<SeverityVariant> {
        let state = self.slot(slot)?;
        SeverityVariant::ALL
            .iter()
            .copied()
            .find(|v| state.classes.iter().any(|c| c == v.class_name()))
    }

    fn slot_mut(&mut self, slot: Slot) -> Result<&mut SlotState> {
        self.slots
            .get_mut(&slot)
            .ok_or_else(|| RenderError::missing(slot))
    }
}

impl ViewPort for Document {
    fn bind_text(&mut self, slot: Slot, value: &str) -> Result<()> {
        self.slot_mut(slot)?.text = Some(value.to_string());
        Ok(())
    }

    fn bind_attribute(&mut self, slot: Slot, attr: &str, value: &str) -> Result<()> {
        self.slot_mut(slot)?
            .attributes
            .insert(attr.to_string(), value.to_string());
        Ok(())
    }

    fn set_variant(&mut self, slot: Slot, variant: SeverityVariant) -> Result<()> {
        let state = self.slot_mut(slot)?;
        state
            .classes
            .retain(|c| !SeverityVariant::ALL.iter().any(|v| c == v.class_name()));
        state.classes.push(variant.class_name().to_string());
        Ok(())
    }

    fn replace_children(&mut self, slot: Slot, nodes: Vec<Node>) -> Result<()> {
        self.slot_mut(slot)?.children = nodes;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_ids_are_unique() {
        let ids: std::collections::HashSet<&str> = Slot::ALL.iter().map(|s| s.id()).collect();
        assert_eq!(ids.len(), Slot::ALL.len());
    }

    #[test]
    fn test_bind_text_replaces_content() {
        let mut doc = Document::dashboard();
        doc.bind_text(Slot::SevScore, "0.10").unwrap();
        doc.bind_text(Slot::SevScore, "0.91").unwrap();
        assert_eq!(doc.text(Slot::SevScore), Some("0.91"));
    }

    #[test]
    fn test_missing_slot_is_reported() {
        let mut doc = Document::with_slots(&[Slot::SevScore]);
        let err = doc.bind_text(Slot::CaptureTime, "x").unwrap_err();
        assert_eq!(err, RenderError::missing(Slot::CaptureTime));
        assert!(doc
            .replace_children(Slot::InsightsList, Vec::new())
            .is_err());
    }

    #[test]
    fn test_variant_is_exclusive() {
        let mut doc = Document::dashboard();
        doc.set_variant(Slot::SeverityBadge, SeverityVariant::High).unwrap();
        doc.set_variant(Slot::SeverityBadge, SeverityVariant::Low).unwrap();
        doc.set_variant(Slot::SeverityBadge, SeverityVariant::Low).unwrap();

        let classes = &doc.slot(Slot::SeverityBadge).unwrap().classes;
        assert_eq!(classes, &vec!["severity-low".to_string()]);
        assert_eq!(doc.variant(Slot::SeverityBadge), Some(SeverityVariant::Low));
    }

    #[test]
    fn test_replace_children_is_atomic() {
        let mut doc = Document::dashboard();
        doc.replace_children(Slot::InsightsList, vec![Node::new("li").with_text("a")])
            .unwrap();
        doc.replace_children(Slot::InsightsList, vec![Node::new("li").with_text("b")])
            .unwrap();
        let children = doc.children(Slot::InsightsList);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].text.as_deref(), Some("b"));
    }

    #[test]
    fn test_node_classes_split_on_whitespace() {
        let node = Node::new("div").with_class("fw-semibold mb-1");
        assert!(node.has_class("fw-semibold"));
        assert!(node.has_class("mb-1"));
    }
}
