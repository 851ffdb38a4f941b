use std::fmt;
use std::str::FromStr;

use crate::elements::bounds::parse_bounds;
use crate::elements::element_model::Rect;
use crate::error::AutomationError;

pub const DEFAULT_LONG_PRESS_MS: u64 = 1000;
pub const DEFAULT_SWIPE_MS: u64 = 400;
pub const QUICK_SWIPE_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    /// Offset in multiples of the unit distance. Vertical swipes travel twice as far.
    pub fn offset(&self, unit: i32) -> (i32, i32) {
        match self {
            SwipeDirection::Up => (0, -2 * unit),
            SwipeDirection::Down => (0, 2 * unit),
            SwipeDirection::Left => (-unit, 0),
            SwipeDirection::Right => (unit, 0),
        }
    }
}

impl FromStr for SwipeDirection {
    type Err = AutomationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(SwipeDirection::Up),
            "down" => Ok(SwipeDirection::Down),
            "left" => Ok(SwipeDirection::Left),
            "right" => Ok(SwipeDirection::Right),
            other => Err(AutomationError::InvalidArgument(format!(
                "unknown swipe direction '{}' (expected up, down, left or right)",
                other
            ))),
        }
    }
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SwipeDirection::Up => "up",
            SwipeDirection::Down => "down",
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwipeDistance {
    #[default]
    Short,
    Medium,
    Long,
}

impl SwipeDistance {
    pub fn multiplier(&self) -> i32 {
        match self {
            SwipeDistance::Short => 1,
            SwipeDistance::Medium => 2,
            SwipeDistance::Long => 3,
        }
    }
}

impl FromStr for SwipeDistance {
    type Err = AutomationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(SwipeDistance::Short),
            "medium" => Ok(SwipeDistance::Medium),
            "long" => Ok(SwipeDistance::Long),
            other => Err(AutomationError::InvalidArgument(format!(
                "unknown swipe distance '{}' (expected short, medium or long)",
                other
            ))),
        }
    }
}

/// Where an input event lands: a pixel rectangle (its center is used) or a
/// point normalized to the screen size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputTarget {
    Bounds(Rect),
    Point { x: f64, y: f64 },
}

impl FromStr for InputTarget {
    type Err = AutomationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('[') {
            return Ok(InputTarget::Bounds(parse_bounds(s)?));
        }

        let invalid = || {
            AutomationError::InvalidArgument(format!(
                "invalid target '{}' (expected \"[x1,y1][x2,y2]\" or \"x,y\" in 0..1)",
                s
            ))
        };
        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        let x: f64 = x.trim().parse().map_err(|_| invalid())?;
        let y: f64 = y.trim().parse().map_err(|_| invalid())?;
        if !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y) {
            return Err(invalid());
        }
        Ok(InputTarget::Point { x, y })
    }
}

/// `input text` treats `%s` as a space and the device shell chokes on quotes.
pub fn escape_text(text: &str) -> String {
    text.replace(' ', "%s").replace('\'', "")
}

/// Scale a normalized coordinate to pixels, truncating toward zero.
pub fn scale(value: f64, extent: u32) -> i32 {
    (value * f64::from(extent)) as i32
}
