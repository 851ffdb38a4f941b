use crate::elements::bounds::{format_bounds, parse_bounds};
use crate::elements::element_model::{Element, UiNode};
use crate::error::{AutomationError, Result};

const MAX_DESC_LEN: usize = 20;

/// Derive the identifier of a single node.
///
/// Resource ids win over the `{class}_{w}_{h}` fallback; a short content
/// description is appended either way.
pub fn element_id(node: &UiNode) -> Result<String> {
    let raw_bounds = node
        .bounds
        .as_deref()
        .ok_or_else(|| AutomationError::malformed_bounds(""))?;
    let bbox = parse_bounds(raw_bounds)?;

    let mut id = if node.resource_id.is_empty() {
        format!("{}_{}_{}", node.class_name, bbox.width(), bbox.height())
    } else {
        node.resource_id.replace(':', ".").replace('/', "_")
    };

    if !node.content_desc.is_empty() && node.content_desc.chars().count() < MAX_DESC_LEN {
        id.push('_');
        id.push_str(&sanitize_desc(&node.content_desc));
    }

    Ok(id)
}

pub fn sanitize_desc(desc: &str) -> String {
    desc.replace('/', "_").replace(' ', "").replace(':', "_")
}

/// Fingerprint of an extracted element set; equal layouts hash equal.
pub fn screen_signature(elements: &[Element]) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    for el in elements {
        hasher.update(el.id.as_bytes());
        hasher.update(format_bounds(&el.bbox).as_bytes());
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}
