use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::{
    device::{bridge::DeviceBridge, controller::AndroidController},
    elements::{
        element_model::{Element, ExtractConfig},
        extractor::collect_elements,
        identity::screen_signature,
    },
    error::Result,
    trace::trace::TraceEvent,
};

pub mod cli;
pub mod device;
pub mod elements;
pub mod error;
pub mod trace;

/// Everything one capture cycle produced.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenCapture {
    pub screenshot: PathBuf,
    pub xml: PathBuf,
    pub elements: Vec<Element>,
    pub signature: String,
}

/// Take a snapshot: screenshot, accessibility dump, element extraction.
///
/// Any failure aborts the whole cycle; callers retry with a fresh prefix.
pub fn capture_screen<B: DeviceBridge>(
    controller: &AndroidController<B>,
    prefix: &str,
    save_dir: &Path,
    config: &ExtractConfig,
) -> Result<ScreenCapture> {
    std::fs::create_dir_all(save_dir)?;

    let screenshot = controller.get_screenshot(prefix, save_dir)?;
    let xml = controller.get_xml(prefix, save_dir)?;

    let document = std::fs::read_to_string(&xml)?;
    let elements = match collect_elements(&document, config) {
        Ok(elements) => elements,
        Err(e) => {
            controller
                .tracer()
                .log(&TraceEvent::now(controller.device(), "capture").with_failure(&e));
            return Err(e);
        }
    };
    let signature = screen_signature(&elements);

    info!(
        device = controller.device(),
        prefix,
        elements = elements.len(),
        %signature,
        "captured screen"
    );
    controller.tracer().log(
        &TraceEvent::now(controller.device(), "capture")
            .with_detail(xml.display())
            .with_elements(elements.len(), &signature),
    );

    Ok(ScreenCapture {
        screenshot,
        xml,
        elements,
        signature,
    })
}
