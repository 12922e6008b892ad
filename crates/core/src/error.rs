use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result alias used throughout the generator.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every way a generation run can fail. All of them are terminal.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input document could not be read.
    #[error("error reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input is not YAML, or `x-sse-events` has the wrong shape.
    #[error("error parsing YAML in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Two source keys map to the same member name. `first` and `second` are
    /// in byte order.
    #[error("event keys `{first}` and `{second}` both normalize to `{key}`")]
    DuplicateKey {
        /// The shared member name.
        key: String,
        first: String,
        second: String,
    },

    /// A source key whose member name is empty or starts with a digit.
    #[error("event key `{key}` normalizes to `{normalized}`, which is not a valid member name")]
    InvalidKey { key: String, normalized: String },

    /// A template missing from the embedded set.
    #[error("template `{name}` is not embedded in this build")]
    Template { name: String },

    /// A template failed to parse or referenced something it was not given.
    #[error("error rendering {template} template: {message}")]
    Render { template: String, message: String },

    /// The source formatter rejected the output or could not be run.
    #[error("error formatting generated source: {0}")]
    Format(String),

    #[error("error creating directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Coarse classification of [`Error`], one per pipeline failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reading the input, creating directories or writing the output.
    Io,
    /// Malformed YAML or event keys that cannot be normalized.
    Parse,
    /// Template lookup or rendering.
    Render,
    /// Go formatting.
    Format,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Io => "io",
            ErrorKind::Parse => "parse",
            ErrorKind::Render => "render",
            ErrorKind::Format => "format",
        };
        f.write_str(name)
    }
}

impl Error {
    /// Which stage of the pipeline failed.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Read { .. } | Error::CreateDir { .. } | Error::Write { .. } => ErrorKind::Io,
            Error::Parse { .. } | Error::DuplicateKey { .. } | Error::InvalidKey { .. } => {
                ErrorKind::Parse
            }
            Error::Template { .. } | Error::Render { .. } => ErrorKind::Render,
            Error::Format(_) => ErrorKind::Format,
        }
    }

    /// Build a [`Error::Render`] from a tera error, flattening its source chain.
    ///
    /// tera only puts the outermost context in `Display`; the actual cause
    /// ("Variable `x` not found", a syntax error position, ...) sits further
    /// down the chain.
    pub(crate) fn render(template: &str, err: &tera::Error) -> Self {
        Error::Render {
            template: template.to_string(),
            message: error_chain(err),
        }
    }
}

/// Join an error and all of its sources with `: `.
pub(crate) fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        current = cause.source();
    }
    message
}
