//! Severity timeline rendering

use crate::error::Result;
use crate::report::TimelineEntry;
use crate::viewport::{Node, Slot, ViewPort};

/// Build the composite node for one entry: marker dot, title, description
pub fn entry_node(entry: &TimelineEntry) -> Node {
    Node::new("div")
        .with_class("timeline-item")
        .with_child(Node::new("div").with_class("timeline-dot"))
        .with_child(
            Node::new("div")
                .with_class("fw-semibold mb-1")
                .with_text(entry.label.as_str()),
        )
        .with_child(
            Node::new("div")
                .with_class("text-muted")
                .with_text(entry.description.as_str()),
        )
}

/// Project `entries` onto `slot` in chronological (input) order
pub fn render<V: ViewPort + ?Sized>(
    view: &mut V,
    slot: Slot,
    entries: &[TimelineEntry],
) -> Result<()> {
    let nodes: Vec<Node> = entries.iter().map(entry_node).collect();
    view.replace_children(slot, nodes)
}
