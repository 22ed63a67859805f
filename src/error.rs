use crate::geometry::Side;
use thiserror::Error;

/// Errors raised while editing the canvas graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CanvasError {
    #[error("Node '{0}' not found on the canvas")]
    NodeNotFound(String),

    #[error("Edge '{0}' not found on the canvas")]
    EdgeNotFound(String),

    #[error("A node with id '{0}' already exists")]
    DuplicateNode(String),

    #[error("Node '{0}' cannot be connected to itself")]
    SelfConnection(String),

    #[error("Nodes '{from}' and '{to}' are already connected through the same ports")]
    DuplicateConnection { from: String, to: String },

    #[error("Node '{node_id}' has no connection point on its {side} side")]
    UnknownPort { node_id: String, side: Side },

    #[error("Module '{0}' is not present in the catalog")]
    UnknownModule(String),

    #[error("Failed to parse canvas JSON: {0}")]
    JsonParseError(String),

    #[error("Grid size must be a positive number, got {0}")]
    InvalidGrid(f64),
}

/// Errors that can occur while turning a canvas into a workflow document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Parent references form a cycle through '{0}'")]
    ParentCycle(String),

    #[error("Failed to (de)serialize workflow JSON: {0}")]
    Json(String),
}

/// A single referential-integrity failure found by `validate_workflow`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Workflow name is required")]
    MissingName,

    #[error("Workflow id is required")]
    MissingId,

    #[error("At least one trigger is required")]
    NoTrigger,

    #[error("Action '{action}' references unknown parent '{parent}'")]
    UnknownParent { action: String, parent: String },
}

/// Errors reading or writing editor and client settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write settings file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings JSON in '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors returned by the REST backend client.
#[cfg(feature = "http-client")]
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request to '{url}' failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Backend returned status {status} for '{url}': {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Workflow failed validation: {}", .0.errors_joined())]
    Invalid(crate::workflow::ValidationReport),
}
