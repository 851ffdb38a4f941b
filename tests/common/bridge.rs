use std::cell::RefCell;
use std::path::Path;

use android_automation::device::bridge::DeviceBridge;
use android_automation::error::{AutomationError, Result};

/// In-memory stand-in for adb. Records every argument vector and fakes the
/// handful of commands the controller relies on.
pub struct MockBridge {
    pub calls: RefCell<Vec<Vec<String>>>,
    pub size_output: String,
    pub devices_output: String,
    /// Written to the local path of any pulled `.xml` file.
    pub xml: String,
    /// Any command containing this token fails.
    pub fail_on: Option<String>,
}

impl MockBridge {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            size_output: "Physical size: 1080x2400".to_string(),
            devices_output: "List of devices attached\nemulator-5554\tdevice\n".to_string(),
            xml: String::new(),
            fail_on: None,
        }
    }

    pub fn with_xml(mut self, xml: &str) -> Self {
        self.xml = xml.to_string();
        self
    }

    pub fn failing_on(mut self, token: &str) -> Self {
        self.fail_on = Some(token.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    pub fn last_call(&self) -> Vec<String> {
        self.calls.borrow().last().cloned().unwrap_or_default()
    }
}

impl DeviceBridge for MockBridge {
    fn run(&self, args: &[String]) -> Result<String> {
        self.calls.borrow_mut().push(args.to_vec());

        if let Some(token) = &self.fail_on {
            if args.iter().any(|a| a == token) {
                return Err(AutomationError::UnexpectedOutput {
                    command: args.join(" "),
                    output: "error: device offline".to_string(),
                });
            }
        }

        let joined = args.join(" ");
        if joined.ends_with("shell wm size") {
            return Ok(self.size_output.clone());
        }
        if joined == "devices" {
            return Ok(self.devices_output.trim().to_string());
        }
        if args.get(2).map(String::as_str) == Some("pull") {
            let local = Path::new(&args[4]);
            if local.extension().is_some_and(|e| e == "xml") {
                std::fs::write(local, &self.xml)?;
            } else {
                std::fs::write(local, b"\x89PNG\r\n\x1a\n")?;
            }
        }
        Ok(String::new())
    }
}
