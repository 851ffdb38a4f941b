use std::path::Path;

use tracing::info;

use crate::capture_screen;
use crate::device::bridge::{DeviceBridge, list_devices};
use crate::device::controller::{AndroidController, DeviceSettings};
use crate::device::input::{InputTarget, SwipeDirection, SwipeDistance};
use crate::elements::element_model::{Element, ExtractConfig};
use crate::elements::extractor::collect_elements;
use crate::elements::identity::screen_signature;
use crate::trace::logger::TraceLogger;

type CmdResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Device-facing options shared by every subcommand that talks to a device.
pub struct DeviceContext<'a> {
    pub device: &'a str,
    pub settings: &'a DeviceSettings,
    pub trace_file: Option<&'a str>,
}

impl<'a> DeviceContext<'a> {
    pub fn new(device: &'a str, settings: &'a DeviceSettings, trace_file: Option<&'a str>) -> Self {
        Self {
            device,
            settings,
            trace_file,
        }
    }
}

fn connect<B: DeviceBridge>(bridge: B, ctx: &DeviceContext<'_>) -> CmdResult<AndroidController<B>> {
    let tracer = match ctx.trace_file {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };
    Ok(AndroidController::new(bridge, ctx.device, ctx.settings)?.with_tracer(tracer))
}

// ============================================================================
// devices subcommand
// ============================================================================

pub fn cmd_devices<B: DeviceBridge>(bridge: &B) -> CmdResult<Vec<String>> {
    let devices = list_devices(bridge)?;
    if devices.is_empty() {
        eprintln!("No devices attached");
    }
    for device in &devices {
        println!("{}", device);
    }
    Ok(devices)
}

// ============================================================================
// capture / extract subcommands
// ============================================================================

pub fn cmd_capture<B: DeviceBridge>(
    bridge: B,
    ctx: &DeviceContext<'_>,
    prefix: &str,
    output_dir: &str,
    config: &ExtractConfig,
) -> CmdResult<Vec<Element>> {
    let controller = connect(bridge, ctx)?;
    let capture = capture_screen(&controller, prefix, Path::new(output_dir), config)?;

    eprintln!(
        "Captured {} and {} ({} elements, signature {})",
        capture.screenshot.display(),
        capture.xml.display(),
        capture.elements.len(),
        capture.signature
    );
    println!("{}", serde_json::to_string_pretty(&capture.elements)?);
    Ok(capture.elements)
}

pub fn cmd_extract(xml_path: &str, config: &ExtractConfig) -> CmdResult<Vec<Element>> {
    let document = std::fs::read_to_string(xml_path)?;
    let elements = collect_elements(&document, config)?;

    info!(
        path = xml_path,
        elements = elements.len(),
        signature = %screen_signature(&elements),
        "extracted elements from dump"
    );
    println!("{}", serde_json::to_string_pretty(&elements)?);
    Ok(elements)
}

// ============================================================================
// input subcommands
// ============================================================================

pub fn cmd_tap<B: DeviceBridge>(bridge: B, ctx: &DeviceContext<'_>, target: &str) -> CmdResult<()> {
    let target: InputTarget = target.parse()?;
    let controller = connect(bridge, ctx)?;
    controller.tap_target(&target)?;
    Ok(())
}

pub fn cmd_long_press<B: DeviceBridge>(
    bridge: B,
    ctx: &DeviceContext<'_>,
    target: &str,
    duration_ms: u64,
) -> CmdResult<()> {
    let target: InputTarget = target.parse()?;
    let controller = connect(bridge, ctx)?;
    controller.long_press_target(&target, duration_ms)?;
    Ok(())
}

pub fn cmd_swipe<B: DeviceBridge>(
    bridge: B,
    ctx: &DeviceContext<'_>,
    target: &str,
    direction: &str,
    distance: &str,
    quick: bool,
) -> CmdResult<()> {
    // Validate everything before touching the device.
    let target: InputTarget = target.parse()?;
    let direction: SwipeDirection = direction.parse()?;
    let distance: SwipeDistance = distance.parse()?;

    let controller = connect(bridge, ctx)?;
    controller.swipe_target(&target, direction, distance, quick)?;
    Ok(())
}

pub fn cmd_text<B: DeviceBridge>(bridge: B, ctx: &DeviceContext<'_>, text: &str) -> CmdResult<()> {
    let controller = connect(bridge, ctx)?;
    controller.text(text)?;
    Ok(())
}

pub fn cmd_back<B: DeviceBridge>(bridge: B, ctx: &DeviceContext<'_>) -> CmdResult<()> {
    let controller = connect(bridge, ctx)?;
    controller.back()?;
    Ok(())
}
