use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub device: String,

    /// Controller-level action name, e.g. "tap", "swipe", "capture".
    pub action: String,
    pub args: Vec<String>,

    pub success: bool,
    pub detail: Option<String>,

    pub element_count: Option<usize>,
    pub signature: Option<String>,
}

impl TraceEvent {
    pub fn now(device: &str, action: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            device: device.to_string(),
            action: action.to_string(),
            args: vec![],
            success: true,
            detail: None,
            element_count: None,
            signature: None,
        }
    }

    pub fn with_args(mut self, args: &[String]) -> Self {
        self.args = args.to_vec();
        self
    }

    pub fn with_failure(mut self, detail: impl ToString) -> Self {
        self.success = false;
        self.detail = Some(detail.to_string());
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn with_elements(mut self, count: usize, signature: &str) -> Self {
        self.element_count = Some(count);
        self.signature = Some(signature.to_string());
        self
    }
}
