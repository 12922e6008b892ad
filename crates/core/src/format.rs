//! Pretty-printing of generated source.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

use crate::error::{Error, Result};

/// A canonical source formatter for one target language.
pub trait SourceFormatter {
    /// Format `source`, failing if it is not syntactically valid.
    fn format(&self, source: &str) -> Result<String>;
}

/// `gofmt`, run as a child process with the source on stdin.
#[derive(Debug, Clone, Default)]
pub struct GoFmt {
    binary: Option<PathBuf>,
}

impl GoFmt {
    /// Resolve `gofmt` from `PATH` at format time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific `gofmt` binary.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: Some(binary.into()),
        }
    }

    fn resolve(&self) -> Result<PathBuf> {
        match &self.binary {
            Some(binary) => Ok(binary.clone()),
            None => which::which("gofmt")
                .map_err(|err| Error::Format(format!("gofmt not found on PATH: {err}"))),
        }
    }
}

impl SourceFormatter for GoFmt {
    fn format(&self, source: &str) -> Result<String> {
        let binary = self.resolve()?;
        debug!(gofmt = %binary.display(), bytes = source.len(), "Running gofmt.");

        let mut child = Command::new(&binary)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| Error::Format(format!("failed to run {}: {err}", binary.display())))?;

        // gofmt reads all of stdin before writing, so writing first cannot block.
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .map_err(|err| Error::Format(format!("failed to write to gofmt: {err}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|err| Error::Format(format!("failed to wait for gofmt: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Format(format!(
                "gofmt exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|err| Error::Format(format!("gofmt produced invalid UTF-8: {err}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    /// Prints a skip notice when `gofmt` is missing; fails instead when
    /// `SSEGEN_REQUIRE_GOFMT` is set.
    fn gofmt_available(test: &str) -> bool {
        if which::which("gofmt").is_ok() {
            return true;
        }
        assert!(
            std::env::var_os("SSEGEN_REQUIRE_GOFMT").is_none(),
            "{test}: gofmt is not on PATH but SSEGEN_REQUIRE_GOFMT is set"
        );
        eprintln!("skipping {test}: gofmt is not on PATH");
        false
    }

    #[test]
    fn missing_binary_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GoFmt::with_binary(dir.path().join("no-such-gofmt"))
            .format("package x\n")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.to_string().contains("no-such-gofmt"), "{err}");
    }

    #[test]
    fn gofmt_normalizes_layout() {
        if !gofmt_available("gofmt_normalizes_layout") {
            return;
        }
        let formatted = GoFmt::new()
            .format("package x\nconst (\nA = 1\nBB = 2\n)\n")
            .unwrap();
        assert_eq!(formatted, "package x\n\nconst (\n\tA  = 1\n\tBB = 2\n)\n");
    }

    #[test]
    fn gofmt_rejects_invalid_source() {
        if !gofmt_available("gofmt_rejects_invalid_source") {
            return;
        }
        let err = GoFmt::new().format("package x\nconst (\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.to_string().contains("gofmt exited"), "{err}");
    }
}
