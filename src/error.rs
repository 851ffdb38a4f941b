use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AutomationError>;

#[derive(Error, Debug)]
pub enum AutomationError {
    /// A node's bounds attribute is missing or not of the form `[x1,y1][x2,y2]`.
    #[error("Malformed bounds '{bounds}' (expected \"[x1,y1][x2,y2]\")")]
    MalformedBounds { bounds: String },

    /// The accessibility-tree document is not well-formed XML.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// The bridge binary could not be started at all.
    #[error("Failed to spawn {program} (is it installed and on PATH?): {source}")]
    SubprocessSpawn {
        program: String,
        source: std::io::Error,
    },

    /// The bridge ran but exited with a non-zero status.
    #[error("Command `{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The bridge succeeded but its output could not be interpreted.
    #[error("Unexpected output from `{command}`: {output}")]
    UnexpectedOutput { command: String, output: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AutomationError {
    pub fn malformed_bounds(bounds: impl Into<String>) -> Self {
        AutomationError::MalformedBounds {
            bounds: bounds.into(),
        }
    }
}
