//! Insight list rendering

use crate::error::Result;
use crate::viewport::{Node, Slot, ViewPort};

/// Project `items` onto `slot` as one `li` per item, in input order.
///
/// Re-rendering the same items yields identical children; an empty slice
/// leaves the container empty.
pub fn render<V: ViewPort + ?Sized>(view: &mut V, slot: Slot, items: &[String]) -> Result<()> {
    let nodes: Vec<Node> = items
        .iter()
        .map(|text| Node::new("li").with_text(text.as_str()))
        .collect();
    view.replace_children(slot, nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::Document;

    fn items(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_empty_items_yield_no_children() {
        let mut doc = Document::dashboard();
        render(&mut doc, Slot::InsightsList, &items(&["stale"])).unwrap();
        render(&mut doc, Slot::InsightsList, &[]).unwrap();
        assert!(doc.children(Slot::InsightsList).is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let mut doc = Document::dashboard();
        render(&mut doc, Slot::InsightsList, &items(&["c", "a", "b"])).unwrap();
        let texts: Vec<_> = doc
            .children(Slot::InsightsList)
            .iter()
            .map(|n| n.text.clone().unwrap())
            .collect();
        assert_eq!(texts, vec!["c", "a", "b"]);
        assert!(doc.children(Slot::InsightsList).iter().all(|n| n.tag == "li"));
    }

    #[test]
    fn test_rendering_twice_is_idempotent() {
        let mut doc = Document::dashboard();
        let input = items(&["one", "two"]);
        render(&mut doc, Slot::InsightsList, &input).unwrap();
        let first = doc.children(Slot::InsightsList).to_vec();
        render(&mut doc, Slot::InsightsList, &input).unwrap();
        assert_eq!(doc.children(Slot::InsightsList), first.as_slice());
    }

    #[test]
    fn test_missing_container_is_an_error() {
        let mut doc = Document::with_slots(&[]);
        assert!(render(&mut doc, Slot::InsightsList, &items(&["x"])).is_err());
    }
}
