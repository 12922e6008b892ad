use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::format::SourceFormatter;
use crate::normalize::normalize_events;
use crate::render::{Lang, Renderer, TemplateData};
use crate::spec::load_events;

/// Default `-type` value.
pub const DEFAULT_TYPE_NAME: &str = "SSEEvent";
/// Default `-package` value.
pub const DEFAULT_PACKAGE: &str = "events";

/// Fully resolved configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// OpenAPI YAML document to read.
    pub input: PathBuf,
    /// File to write; missing parent directories are created.
    pub output: PathBuf,
    pub lang: Lang,
    pub type_name: String,
    pub package: String,
}

impl GenerationRequest {
    /// Request with the default type and package names.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, lang: Lang) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            lang,
            type_name: DEFAULT_TYPE_NAME.to_string(),
            package: DEFAULT_PACKAGE.to_string(),
        }
    }
}

/// Run the whole pipeline with the embedded templates and `gofmt`.
///
/// Returns the number of events written.
pub fn generate(request: &GenerationRequest) -> Result<usize> {
    generate_with(request, &Renderer::new()?)
}

/// Run the whole pipeline with a caller-supplied renderer.
///
/// Nothing is written unless every stage succeeds.
pub fn generate_with<F: SourceFormatter>(
    request: &GenerationRequest,
    renderer: &Renderer<F>,
) -> Result<usize> {
    let events = normalize_events(load_events(&request.input)?)?;

    let data = TemplateData {
        package: &request.package,
        type_name: &request.type_name,
        events: &events,
    };
    let code = renderer.render(request.lang, &data)?;

    debug!(
        output = %request.output.display(),
        bytes = code.len(),
        "Resolved generated source."
    );

    if let Some(parent) = request.output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&request.output, &code).map_err(|source| Error::Write {
        path: request.output.clone(),
        source,
    })?;

    info!(
        lang = %request.lang,
        output = %request.output.display(),
        events = events.len(),
        "Generated SSE event enum."
    );

    Ok(events.len())
}
