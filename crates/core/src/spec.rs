//! OpenAPI document structs for serde deserialization.
//!
//! Only the `components.x-sse-events` extension is modelled; everything else
//! in the document (paths, schemas, info, ...) is ignored by serde.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};

/// Root of the OpenAPI document.
#[derive(Debug, Default, Deserialize)]
pub struct ApiDocument {
    /// `None` when the document has no (or a null) `components` section.
    pub components: Option<Components>,
}

/// Components section holding the SSE extension.
#[derive(Debug, Default, Deserialize)]
pub struct Components {
    /// Event entries keyed by their source name.
    #[serde(rename = "x-sse-events")]
    pub sse_events: Option<HashMap<String, SseEventSpec>>,
}

/// One value of the `x-sse-events` mapping, as written in the document.
#[derive(Debug, Clone, Deserialize)]
pub struct SseEventSpec {
    /// Wire value before normalization.
    pub event: String,
    /// Free text, possibly spanning several lines.
    pub description: Option<String>,
    /// Absent and null both mean not deprecated.
    pub deprecated: Option<bool>,
}

/// An event as it flows through the pipeline and into the templates.
///
/// Straight out of the loader `key` is the raw mapping key and `wire_name`
/// the raw `event` value; after normalization they hold the member name and
/// the serialized string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDescriptor {
    /// Mapping key, later the member name (`MessageStart`).
    pub key: String,
    /// The `event` value, later the serialized string (`messageStart`).
    pub wire_name: String,
    pub description: Option<String>,
    pub deprecated: bool,
}

impl ApiDocument {
    /// Parse a document from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Read and parse the document at `path`.
    pub fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml(&contents).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Consume the document, yielding its SSE events in no particular order.
    ///
    /// A missing `components` or `x-sse-events` section yields no events.
    pub fn into_events(self) -> Vec<EventDescriptor> {
        self.components
            .and_then(|components| components.sse_events)
            .unwrap_or_default()
            .into_iter()
            .map(|(key, spec)| EventDescriptor {
                key,
                wire_name: spec.event,
                description: spec.description,
                deprecated: spec.deprecated.unwrap_or_default(),
            })
            .collect()
    }
}

/// Load the raw (not yet normalized) events from the document at `path`.
pub fn load_events(path: &Path) -> Result<Vec<EventDescriptor>> {
    let events = ApiDocument::read(path)?.into_events();
    debug!(
        input = %path.display(),
        events = events.len(),
        "Loaded x-sse-events."
    );
    Ok(events)
}
