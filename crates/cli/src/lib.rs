//! Command-line front end for `ssegen`.
//!
//! Parses the Go-style flag surface (`-i`, `-o`, `-lang`, `-type`,
//! `-package`), runs the generator and maps the outcome to an exit code.

use clap::builder::{NonEmptyStringValueParser, TypedValueParser};
use clap::error::ErrorKind as ClapErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::debug;

mod common;
mod logging;

pub use common::LangArg;
pub use logging::init_tracing;

use ssegen_core::{DEFAULT_PACKAGE, DEFAULT_TYPE_NAME, GenerationRequest};

/// Flags spelled with a single dash and a multi-letter name, Go style.
const LONG_FLAGS: [&str; 3] = ["lang", "type", "package"];
/// Single-letter flags, also accepted with two dashes.
const SHORT_FLAGS: [&str; 2] = ["i", "o"];

#[derive(Parser, Debug)]
#[command(
    name = "ssegen",
    version,
    about = "Generate a typed server-sent event enum from OpenAPI x-sse-events"
)]
pub struct Args {
    /// Input OpenAPI YAML file
    #[arg(
        short = 'i',
        value_name = "FILE",
        value_parser = NonEmptyStringValueParser::new().map(PathBuf::from)
    )]
    pub input: PathBuf,

    /// Output file path (parent directories are created)
    #[arg(
        short = 'o',
        value_name = "FILE",
        value_parser = NonEmptyStringValueParser::new().map(PathBuf::from)
    )]
    pub output: PathBuf,

    /// Target language
    #[arg(long = "lang", value_enum)]
    pub lang: LangArg,

    /// Type name for the enum
    #[arg(long = "type", value_name = "NAME", default_value = DEFAULT_TYPE_NAME)]
    pub type_name: String,

    /// Package (Go) or module (TypeScript) name
    #[arg(long = "package", value_name = "NAME", default_value = DEFAULT_PACKAGE)]
    pub package: String,
}

impl Args {
    /// Convert parsed flags into a core [`GenerationRequest`].
    pub fn into_request(self) -> GenerationRequest {
        GenerationRequest {
            input: self.input,
            output: self.output,
            lang: self.lang.into(),
            type_name: self.type_name,
            package: self.package,
        }
    }
}

/// Rewrite Go-style flags into the spelling clap understands.
///
/// `-lang go` / `-lang=go` become `--lang go` / `--lang=go`, and `--i` /
/// `--o` become `-i` / `-o`. Everything after a bare `--` is left alone.
pub fn normalize_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(index, arg)| {
            if index == 0 || passthrough {
                return arg;
            }
            if arg == "--" {
                passthrough = true;
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(flag) = text.strip_prefix("--").or_else(|| text.strip_prefix('-')) else {
                return arg;
            };
            let (name, value) = match flag.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (flag, None),
            };
            let dashes = if LONG_FLAGS.contains(&name) {
                "--"
            } else if SHORT_FLAGS.contains(&name) {
                "-"
            } else {
                return arg;
            };
            match value {
                Some(value) => format!("{dashes}{name}={value}").into(),
                None => format!("{dashes}{name}").into(),
            }
        })
        .collect()
}

/// Run the CLI with `args` (including the program name) and return the exit code.
pub fn run<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args = match Args::try_parse_from(normalize_flags(args)) {
        Ok(args) => args,
        Err(err) => return report_usage_error(&err),
    };

    let request = args.into_request();
    debug!(?request, "Resolved generation request.");

    match ssegen_core::generate(&request) {
        Ok(_) => {
            println!(
                "Successfully generated {} enum in {}",
                request.lang,
                request.output.display()
            );
            0
        }
        Err(err) => {
            eprintln!("Error: {err}");
            1
        }
    }
}

fn report_usage_error(err: &clap::Error) -> i32 {
    match err.kind() {
        ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
            let _ = err.print();
            0
        }
        _ => {
            eprintln!("{}", err.render());
            eprintln!("{}", Args::command().render_help());
            1
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use ssegen_core::Lang;
    use std::fs;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(normalize_flags(args.iter().copied()))
    }

    #[test]
    fn test_normalize_flags() {
        let normalized = normalize_flags([
            "ssegen", "-i", "in.yaml", "--o=out.go", "-lang=go", "-type", "T", "--package", "p",
        ]);
        assert_eq!(
            normalized,
            vec![
                "ssegen",
                "-i",
                "in.yaml",
                "-o=out.go",
                "--lang=go",
                "--type",
                "T",
                "--package",
                "p"
            ]
        );
    }

    #[test]
    fn normalize_flags_leaves_values_and_unknown_flags_alone() {
        let normalized = normalize_flags(["ssegen", "-lang", "-x", "--help", "--", "-type"]);
        assert_eq!(
            normalized,
            vec!["ssegen", "--lang", "-x", "--help", "--", "-type"]
        );
    }

    #[test]
    fn go_style_flags_parse() {
        let args = parse(&[
            "ssegen", "-i", "api.yaml", "-o", "gen/events.go", "-lang", "go", "-type",
            "StreamEvent", "-package", "stream",
        ])
        .unwrap();
        let request = args.into_request();

        assert_eq!(request.input, PathBuf::from("api.yaml"));
        assert_eq!(request.output, PathBuf::from("gen/events.go"));
        assert_eq!(request.lang, Lang::Go);
        assert_eq!(request.type_name, "StreamEvent");
        assert_eq!(request.package, "stream");
    }

    #[test]
    fn defaults_apply() {
        let args = parse(&["ssegen", "-i", "a.yaml", "-o", "b.ts", "-lang=ts"]).unwrap();
        assert_eq!(args.type_name, "SSEEvent");
        assert_eq!(args.package, "events");
        assert_eq!(args.lang, LangArg::Ts);
    }

    #[test]
    fn missing_or_invalid_flags_are_usage_errors() {
        for args in [
            &["ssegen", "-o", "b.ts", "-lang", "ts"][..],
            &["ssegen", "-i", "a.yaml", "-lang", "ts"][..],
            &["ssegen", "-i", "a.yaml", "-o", "b.ts"][..],
            &["ssegen", "-i", "a.yaml", "-o", "b.ts", "-lang", "rust"][..],
            &["ssegen", "-i", "", "-o", "b.ts", "-lang", "ts"][..],
        ] {
            assert!(parse(args).is_err(), "expected usage error for {args:?}");
        }
    }

    #[test]
    fn usage_error_exits_one_without_io() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out/events.ts");
        let output_arg = output.to_str().unwrap();

        let code = run(["ssegen", "-o", output_arg, "-lang", "kotlin"]);

        assert_eq!(code, 1);
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn help_exits_zero() {
        assert_eq!(run(["ssegen", "-h"]), 0);
    }

    #[test]
    fn run_generates_typescript() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("openapi.yaml");
        fs::write(
            &input,
            "components:\n  x-sse-events:\n    done:\n      event: done\n",
        )
        .unwrap();
        let output = dir.path().join("events.ts");

        let code = run([
            "ssegen",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "-lang",
            "ts",
        ]);

        assert_eq!(code, 0);
        assert!(fs::read_to_string(&output)
            .unwrap()
            .contains("Done = \"done\","));
    }

    #[test]
    fn run_reports_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("events.ts");

        let code = run([
            "ssegen",
            "-i",
            dir.path().join("missing.yaml").to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "-lang",
            "ts",
        ]);

        assert_eq!(code, 1);
        assert!(!output.exists());
    }
}
