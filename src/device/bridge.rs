use std::process::Command;

use tracing::{debug, warn};

use crate::error::{AutomationError, Result};

/// The "run-command" seam to the device. Implementations return trimmed stdout
/// on success and an error for anything else.
pub trait DeviceBridge {
    fn run(&self, args: &[String]) -> Result<String>;
}

impl<B: DeviceBridge + ?Sized> DeviceBridge for &B {
    fn run(&self, args: &[String]) -> Result<String> {
        (**self).run(args)
    }
}

/// Runs the `adb` binary directly (no shell) with an argument vector.
#[derive(Debug, Clone)]
pub struct AdbBridge {
    program: String,
}

impl AdbBridge {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for AdbBridge {
    fn default() -> Self {
        Self::new("adb")
    }
}

impl DeviceBridge for AdbBridge {
    fn run(&self, args: &[String]) -> Result<String> {
        let command_line = format!("{} {}", self.program, args.join(" "));
        debug!(command = %command_line, "running bridge command");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| AutomationError::SubprocessSpawn {
                program: self.program.clone(),
                source: e,
            })?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        warn!(command = %command_line, status = %output.status, "command execution failed: {}", stderr);
        Err(AutomationError::CommandFailed {
            command: command_line,
            status: output.status,
            stderr,
        })
    }
}

/// Serials of every attached device, whatever state adb reports them in.
pub fn list_devices<B: DeviceBridge>(bridge: &B) -> Result<Vec<String>> {
    let output = bridge.run(&["devices".to_string()])?;
    Ok(parse_device_list(&output))
}

pub fn parse_device_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        // header and daemon start-up chatter ("* daemon not running; ...")
        .filter(|line| !line.starts_with("List of devices") && !line.starts_with('*'))
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}
