use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::device::bridge::DeviceBridge;
use crate::device::input::{
    InputTarget, QUICK_SWIPE_MS, DEFAULT_SWIPE_MS, SwipeDirection, SwipeDistance, escape_text, scale,
};
use crate::elements::element_model::{Point, Rect};
use crate::error::{AutomationError, Result};
use crate::trace::{logger::TraceLogger, trace::TraceEvent};

/// Where the bridge binary lives and where captures are staged on the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSettings {
    #[serde(default = "default_adb_path")]
    pub adb_path: String,

    #[serde(default = "default_device_dir")]
    pub screenshot_dir: String,

    #[serde(default = "default_device_dir")]
    pub xml_dir: String,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            adb_path: default_adb_path(),
            screenshot_dir: default_device_dir(),
            xml_dir: default_device_dir(),
        }
    }
}

fn default_adb_path() -> String { "adb".to_string() }
fn default_device_dir() -> String { "/sdcard".to_string() }

/// Drives one device through a [`DeviceBridge`].
///
/// The screen size is queried once in [`AndroidController::new`] and used to
/// scale normalized coordinates and swipe distances for the rest of the session.
pub struct AndroidController<B: DeviceBridge> {
    bridge: B,
    device: String,
    screenshot_dir: String,
    xml_dir: String,
    width: u32,
    height: u32,
    tracer: TraceLogger,
}

impl<B: DeviceBridge> AndroidController<B> {
    pub fn new(bridge: B, device: &str, settings: &DeviceSettings) -> Result<Self> {
        let mut controller = AndroidController {
            bridge,
            device: device.to_string(),
            screenshot_dir: settings.screenshot_dir.clone(),
            xml_dir: settings.xml_dir.clone(),
            width: 0,
            height: 0,
            tracer: TraceLogger::disabled(),
        };

        let (width, height) = controller.get_device_size()?;
        info!(device, width, height, "connected to device");
        controller.width = width;
        controller.height = height;
        Ok(controller)
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn tracer(&self) -> &TraceLogger {
        &self.tracer
    }

    pub fn get_device_size(&self) -> Result<(u32, u32)> {
        let output = self.exec("size", &["shell", "wm", "size"])?;
        parse_device_size(&output).ok_or_else(|| AutomationError::UnexpectedOutput {
            command: "wm size".into(),
            output,
        })
    }

    /// Capture a PNG on the device and pull it to `save_dir/{prefix}.png`.
    pub fn get_screenshot(&self, prefix: &str, save_dir: &Path) -> Result<PathBuf> {
        let file_name = format!("{}.png", prefix);
        let remote = remote_path(&self.screenshot_dir, &file_name);
        self.exec("screencap", &["shell", "screencap", "-p", remote.as_str()])?;
        self.pull(&remote, save_dir.join(&file_name))
    }

    /// Dump the accessibility tree on the device and pull it to `save_dir/{prefix}.xml`.
    pub fn get_xml(&self, prefix: &str, save_dir: &Path) -> Result<PathBuf> {
        let file_name = format!("{}.xml", prefix);
        let remote = remote_path(&self.xml_dir, &file_name);
        self.exec("uiautomator_dump", &["shell", "uiautomator", "dump", remote.as_str()])?;
        self.pull(&remote, save_dir.join(&file_name))
    }

    pub fn back(&self) -> Result<String> {
        self.exec("back", &["shell", "input", "keyevent", "KEYCODE_BACK"])
    }

    pub fn tap(&self, bbox: &Rect) -> Result<String> {
        self.input_tap(bbox.center())
    }

    pub fn tap_point(&self, x: f64, y: f64) -> Result<String> {
        self.input_tap(self.to_pixels(x, y))
    }

    pub fn text(&self, input: &str) -> Result<String> {
        let escaped = escape_text(input);
        self.exec("text", &["shell", "input", "text", escaped.as_str()])
    }

    pub fn long_press(&self, bbox: &Rect, duration_ms: u64) -> Result<String> {
        self.input_long_press(bbox.center(), duration_ms)
    }

    pub fn long_press_point(&self, x: f64, y: f64, duration_ms: u64) -> Result<String> {
        self.input_long_press(self.to_pixels(x, y), duration_ms)
    }

    pub fn swipe(
        &self,
        bbox: &Rect,
        direction: SwipeDirection,
        distance: SwipeDistance,
        quick: bool,
    ) -> Result<String> {
        self.swipe_from(bbox.center(), direction, distance, quick)
    }

    pub fn swipe_point(&self, start: (f64, f64), end: (f64, f64), duration_ms: u64) -> Result<String> {
        let from = self.to_pixels(start.0, start.1);
        let to = self.to_pixels(end.0, end.1);
        self.input_swipe("swipe", from, to, duration_ms)
    }

    pub fn tap_target(&self, target: &InputTarget) -> Result<String> {
        self.input_tap(self.resolve(target))
    }

    pub fn long_press_target(&self, target: &InputTarget, duration_ms: u64) -> Result<String> {
        self.input_long_press(self.resolve(target), duration_ms)
    }

    pub fn swipe_target(
        &self,
        target: &InputTarget,
        direction: SwipeDirection,
        distance: SwipeDistance,
        quick: bool,
    ) -> Result<String> {
        self.swipe_from(self.resolve(target), direction, distance, quick)
    }

    /// Pixel position an input target lands on.
    pub fn resolve(&self, target: &InputTarget) -> Point {
        match target {
            InputTarget::Bounds(bbox) => bbox.center(),
            InputTarget::Point { x, y } => self.to_pixels(*x, *y),
        }
    }

    fn swipe_from(
        &self,
        from: Point,
        direction: SwipeDirection,
        distance: SwipeDistance,
        quick: bool,
    ) -> Result<String> {
        let unit = (self.width / 10) as i32 * distance.multiplier();
        let (dx, dy) = direction.offset(unit);
        let to = Point::new(from.x.saturating_add(dx), from.y.saturating_add(dy));
        let duration = if quick { QUICK_SWIPE_MS } else { DEFAULT_SWIPE_MS };
        self.input_swipe("swipe", from, to, duration)
    }

    fn to_pixels(&self, x: f64, y: f64) -> Point {
        Point::new(scale(x, self.width), scale(y, self.height))
    }

    fn input_tap(&self, at: Point) -> Result<String> {
        let (x, y) = (at.x.to_string(), at.y.to_string());
        self.exec("tap", &["shell", "input", "tap", x.as_str(), y.as_str()])
    }

    // a zero-length swipe held for `duration_ms`
    fn input_long_press(&self, at: Point, duration_ms: u64) -> Result<String> {
        self.input_swipe("long_press", at, at, duration_ms)
    }

    fn input_swipe(&self, action: &str, from: Point, to: Point, duration_ms: u64) -> Result<String> {
        let coords = [
            from.x.to_string(),
            from.y.to_string(),
            to.x.to_string(),
            to.y.to_string(),
            duration_ms.to_string(),
        ];
        let mut args = vec!["shell", "input", "swipe"];
        args.extend(coords.iter().map(String::as_str));
        self.exec(action, &args)
    }

    fn pull(&self, remote: &str, local: PathBuf) -> Result<PathBuf> {
        let local_str = local.to_string_lossy().into_owned();
        self.exec("pull", &["pull", remote, local_str.as_str()])?;
        Ok(local)
    }

    fn exec(&self, action: &str, args: &[&str]) -> Result<String> {
        let mut full: Vec<String> = vec!["-s".to_string(), self.device.clone()];
        full.extend(args.iter().map(|a| a.to_string()));

        let result = self.bridge.run(&full);

        let event = TraceEvent::now(&self.device, action).with_args(&full);
        match &result {
            Ok(stdout) if !stdout.is_empty() => self.tracer.log(&event.with_detail(stdout)),
            Ok(_) => self.tracer.log(&event),
            Err(e) => self.tracer.log(&event.with_failure(e)),
        }

        result
    }
}

/// Parse `wm size` output. Only the first line (`Physical size: 1080x2400`) is used;
/// an `Override size` line may follow it.
pub fn parse_device_size(output: &str) -> Option<(u32, u32)> {
    let first = output.lines().next()?;
    let (_, dims) = first.split_once(": ")?;
    let (w, h) = dims.trim().split_once('x')?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}

/// Device-side paths always use forward slashes.
pub fn remote_path(dir: &str, file_name: &str) -> String {
    let dir = dir.replace('\\', "/");
    format!("{}/{}", dir.trim_end_matches('/'), file_name)
}
