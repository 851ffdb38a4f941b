use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
    sync::Mutex,
};

use tracing::warn;

use crate::trace::trace::TraceEvent;

/// Append-only JSONL sink for controller actions. A logger that failed to open
/// its file (or was built with `disabled`) silently drops events.
pub struct TraceLogger {
    file: Option<Mutex<File>>,
}

impl TraceLogger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path);

        match file {
            Ok(f) => Self {
                file: Some(Mutex::new(f)),
            },
            Err(e) => {
                warn!("could not open trace file '{}': {}", path.display(), e);
                Self { file: None }
            }
        }
    }

    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    pub fn log(&self, event: &TraceEvent) {
        let Some(file) = &self.file else { return };
        if let Err(reason) = append_line(file, event) {
            warn!(action = %event.action, "dropping trace event: {}", reason);
        }
    }
}

fn append_line(file: &Mutex<File>, event: &TraceEvent) -> Result<(), String> {
    let json = serde_json::to_string(event).map_err(|e| format!("serialize: {}", e))?;
    let mut file = file.lock().map_err(|_| "trace file lock poisoned".to_string())?;
    writeln!(file, "{}", json).map_err(|e| format!("write: {}", e))
}
