//! Generate typed server-sent event enums from an OpenAPI document.
//!
//! The pipeline is:
//! 1. Load: OpenAPI YAML -> raw `components.x-sse-events` entries
//! 2. Normalize: UpperCamel member names, lowerCamel wire names, sorted by member
//! 3. Render: tera template per language (Go output goes through `gofmt`)
//! 4. Write: create parent directories, write the file
//!
//! Every stage is synchronous and the first error aborts the run before
//! anything is written.

pub mod error;
pub mod format;
pub mod generator;
pub mod normalize;
pub mod render;
pub mod spec;

pub use error::{Error, ErrorKind, Result};
pub use format::{GoFmt, SourceFormatter};
pub use generator::{
    DEFAULT_PACKAGE, DEFAULT_TYPE_NAME, GenerationRequest, generate, generate_with,
};
pub use normalize::{normalize_events, to_lower_camel, to_upper_camel};
pub use render::{Lang, Renderer, TemplateData};
pub use spec::{ApiDocument, EventDescriptor, load_events};
