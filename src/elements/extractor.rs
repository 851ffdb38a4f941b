use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, trace};

use crate::elements::bounds::parse_bounds;
use crate::elements::element_model::{Element, ExtractConfig, UiNode};
use crate::elements::identity::element_id;
use crate::error::Result;

/// Walk a uiautomator dump and return every node whose `attrib` is `"true"`,
/// collapsing nodes whose centers fall within `config.min_dist` of an element
/// that was already accepted. Earlier nodes in document order win.
pub fn traverse_tree(xml: &str, attrib: &str, config: &ExtractConfig) -> Result<Vec<Element>> {
    let mut reader = Reader::from_str(xml);
    let mut path: Vec<UiNode> = Vec::new();
    let mut elements: Vec<Element> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let node = parse_node(&start)?;
                visit(&node, path.last(), attrib, config, &mut elements)?;
                path.push(node);
            }
            Event::Empty(start) => {
                let node = parse_node(&start)?;
                visit(&node, path.last(), attrib, config, &mut elements)?;
            }
            Event::End(_) => {
                path.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    debug!(
        attrib,
        count = elements.len(),
        min_dist = config.min_dist,
        "extracted elements"
    );
    Ok(elements)
}

pub fn traverse_tree_file(
    path: impl AsRef<Path>,
    attrib: &str,
    config: &ExtractConfig,
) -> Result<Vec<Element>> {
    let xml = std::fs::read_to_string(path)?;
    traverse_tree(&xml, attrib, config)
}

/// Run one pass per configured attribute and merge them in order.
pub fn collect_elements(xml: &str, config: &ExtractConfig) -> Result<Vec<Element>> {
    let mut merged = Vec::new();
    for attrib in &config.attributes {
        let found = traverse_tree(xml, attrib, config)?;
        merged = merge_elements(merged, found, config.min_dist);
    }
    Ok(merged)
}

/// Append the `secondary` elements that are not within `min_dist` of anything
/// already kept. `primary` is taken as-is.
pub fn merge_elements(primary: Vec<Element>, secondary: Vec<Element>, min_dist: u32) -> Vec<Element> {
    let mut merged = primary;
    for el in secondary {
        if !is_close(&merged, &el, min_dist) {
            merged.push(el);
        }
    }
    merged
}

fn visit(
    node: &UiNode,
    parent: Option<&UiNode>,
    attrib: &str,
    config: &ExtractConfig,
    elements: &mut Vec<Element>,
) -> Result<()> {
    if !node.flag(attrib) {
        return Ok(());
    }

    let mut id = element_id(node)?;
    if let Some(parent) = parent.filter(|p| p.bounds.is_some()) {
        id = format!("{}_{}", element_id(parent)?, id);
    }
    if config.add_index {
        id = format!("{}_{}", id, node.index);
    }

    let bbox = parse_bounds(node.bounds.as_deref().unwrap_or_default())?;
    let candidate = Element {
        id,
        bbox,
        attrib: attrib.to_string(),
    };

    if is_close(elements, &candidate, config.min_dist) {
        trace!(id = %candidate.id, "dropping element near an accepted one");
    } else {
        elements.push(candidate);
    }
    Ok(())
}

fn is_close(accepted: &[Element], candidate: &Element, min_dist: u32) -> bool {
    let center = candidate.center();
    accepted
        .iter()
        .any(|e| e.center().distance(&center) <= f64::from(min_dist))
}

fn parse_node(start: &BytesStart<'_>) -> Result<UiNode> {
    let mut node = UiNode::default();

    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();

        match key.as_str() {
            "bounds" => node.bounds = Some(value),
            "class" => node.class_name = value,
            "resource-id" => node.resource_id = value,
            "content-desc" => node.content_desc = value,
            "index" => {
                node.index = match value.trim().parse() {
                    Ok(index) => index,
                    Err(_) => {
                        trace!(index = %value, "non-numeric index, using 0");
                        0
                    }
                }
            }
            _ => {
                if value == "true" || value == "false" {
                    node.flags.insert(key, value == "true");
                }
            }
        }
    }

    Ok(node)
}
