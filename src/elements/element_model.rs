use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = (i64::from(self.x) - i64::from(other.x)) as f64;
        let dy = (i64::from(self.y) - i64::from(other.y)) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned rectangle in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Rect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            top_left: Point::new(x1, y1),
            bottom_right: Point::new(x2, y2),
        }
    }

    // i64 so a full-range i32 span cannot overflow
    pub fn width(&self) -> i64 {
        i64::from(self.bottom_right.x) - i64::from(self.top_left.x)
    }

    pub fn height(&self) -> i64 {
        i64::from(self.bottom_right.y) - i64::from(self.top_left.y)
    }

    /// Center rounded towards negative infinity.
    pub fn center(&self) -> Point {
        Point::new(
            midpoint(self.top_left.x, self.bottom_right.x),
            midpoint(self.top_left.y, self.bottom_right.y),
        )
    }
}

// The floor of the mean of two i32 values always lies between them.
fn midpoint(a: i32, b: i32) -> i32 {
    (i64::from(a) + i64::from(b)).div_euclid(2) as i32
}

/// A single `<node>` of a uiautomator dump, alive only while the walk is inside it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiNode {
    /// Raw `bounds` attribute; `None` for nodes without geometry (e.g. `<hierarchy>`).
    pub bounds: Option<String>,
    pub class_name: String,
    pub resource_id: String,
    pub content_desc: String,
    pub index: usize,
    pub flags: HashMap<String, bool>,
}

impl UiNode {
    pub fn flag(&self, attribute: &str) -> bool {
        self.flags.get(attribute).copied().unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    pub bbox: Rect,
    /// Boolean attribute that selected this element (`clickable`, `focusable`, ...).
    pub attrib: String,
}

impl Element {
    pub fn center(&self) -> Point {
        self.bbox.center()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Elements whose centers are at most this many pixels apart collapse into one.
    #[serde(default = "default_min_dist")]
    pub min_dist: u32,

    #[serde(default = "default_attributes")]
    pub attributes: Vec<String>,

    #[serde(default)]
    pub add_index: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            min_dist: default_min_dist(),
            attributes: default_attributes(),
            add_index: false,
        }
    }
}

fn default_min_dist() -> u32 { 30 }
fn default_attributes() -> Vec<String> { vec!["clickable".to_string(), "focusable".to_string()] }
