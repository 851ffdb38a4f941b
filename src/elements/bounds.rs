use crate::elements::element_model::{Point, Rect};
use crate::error::{AutomationError, Result};

/// Parse a uiautomator bounds string such as `[0,210][1080,2274]`.
pub fn parse_bounds(raw: &str) -> Result<Rect> {
    let malformed = || AutomationError::malformed_bounds(raw);

    let inner = raw
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(malformed)?;
    let (first, second) = inner.split_once("][").ok_or_else(malformed)?;

    let top_left = parse_point(first).ok_or_else(malformed)?;
    let bottom_right = parse_point(second).ok_or_else(malformed)?;

    Ok(Rect {
        top_left,
        bottom_right,
    })
}

fn parse_point(pair: &str) -> Option<Point> {
    let (x, y) = pair.split_once(',')?;
    Some(Point::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

pub fn format_bounds(rect: &Rect) -> String {
    format!(
        "[{},{}][{},{}]",
        rect.top_left.x, rect.top_left.y, rect.bottom_right.x, rect.bottom_right.y
    )
}
