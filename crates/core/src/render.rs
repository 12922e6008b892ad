//! Template rendering for the supported target languages.
//!
//! Each language has one tera template embedded from `templates/`. Templates
//! see exactly [`TemplateData`]: `package`, `type_name` and `events` (each
//! with `key`, `wire_name`, `description` and `deprecated`). Go output is then
//! run through [`SourceFormatter`]; TypeScript output is returned as is.
//!
//! Besides tera's builtins, templates get a `lines` filter that splits a
//! string into its lines, for prefixing multi-line descriptions.

use rust_embed::RustEmbed;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tera::{Context, Tera, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::format::{GoFmt, SourceFormatter};
use crate::spec::EventDescriptor;

#[derive(RustEmbed)]
#[folder = "templates/"]
struct Templates;

/// Target language of the generated enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    /// A named string type with constants, formatted by `gofmt`.
    Go,
    /// A string enum plus a type guard.
    Ts,
}

impl Lang {
    /// Every supported language.
    pub const ALL: [Lang; 2] = [Lang::Go, Lang::Ts];

    /// Tag used on the command line (`go`, `ts`).
    pub fn tag(self) -> &'static str {
        match self {
            Lang::Go => "go",
            Lang::Ts => "ts",
        }
    }

    /// Name of the embedded template for this language.
    pub fn template_name(self) -> &'static str {
        match self {
            Lang::Go => "go.tmpl",
            Lang::Ts => "ts.tmpl",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Lang::ALL
            .into_iter()
            .find(|lang| lang.tag() == s)
            .ok_or_else(|| format!("unsupported language: {s}"))
    }
}

/// Everything a template may reference.
#[derive(Debug, Serialize)]
pub struct TemplateData<'a> {
    /// Go package, or the module named in the TypeScript header.
    pub package: &'a str,
    /// Name of the generated type and prefix of Go constants.
    pub type_name: &'a str,
    /// Normalized events, sorted by member name.
    pub events: &'a [EventDescriptor],
}

/// Renders [`TemplateData`] through the per-language templates.
#[derive(Debug)]
pub struct Renderer<F = GoFmt> {
    tera: Tera,
    go_formatter: F,
}

impl Renderer<GoFmt> {
    /// Renderer with the embedded templates, formatting Go with `gofmt`.
    pub fn new() -> Result<Self> {
        Self::with_formatter(GoFmt::new())
    }
}

impl<F: SourceFormatter> Renderer<F> {
    /// Renderer with the embedded templates and a custom Go formatter.
    pub fn with_formatter(go_formatter: F) -> Result<Self> {
        let mut tera = Tera::default();
        tera.register_filter("lines", lines_filter);
        for lang in Lang::ALL {
            let name = lang.template_name();
            let file = Templates::get(name).ok_or_else(|| Error::Template {
                name: name.to_string(),
            })?;
            let source = std::str::from_utf8(&file.data).map_err(|err| Error::Render {
                template: name.to_string(),
                message: format!("template is not valid UTF-8: {err}"),
            })?;
            tera.add_raw_template(name, source)
                .map_err(|err| Error::render(name, &err))?;
        }
        Ok(Self { tera, go_formatter })
    }

    /// Replace the template used for `lang`.
    pub fn with_template(mut self, lang: Lang, source: &str) -> Result<Self> {
        let name = lang.template_name();
        self.tera
            .add_raw_template(name, source)
            .map_err(|err| Error::render(name, &err))?;
        Ok(self)
    }

    /// Render `data` for `lang`. Go output is formatted before it is returned.
    pub fn render(&self, lang: Lang, data: &TemplateData<'_>) -> Result<String> {
        let name = lang.template_name();
        let context = Context::from_serialize(data).map_err(|err| Error::render(name, &err))?;
        let rendered = self
            .tera
            .render(name, &context)
            .map_err(|err| Error::render(name, &err))?;

        debug!(
            lang = %lang,
            events = data.events.len(),
            bytes = rendered.len(),
            "Rendered template."
        );

        match lang {
            Lang::Go => self.go_formatter.format(&rendered),
            Lang::Ts => Ok(rendered),
        }
    }
}

fn lines_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("`lines` expects a string, got {value}")))?;
    Ok(Value::Array(
        text.lines().map(|line| Value::String(line.to_string())).collect(),
    ))
}
