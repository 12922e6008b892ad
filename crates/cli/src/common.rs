//! Flag value types shared by the CLI

use clap::ValueEnum;
use ssegen_core::Lang;

/// Target language accepted by `-lang`
#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
#[value(rename_all = "lower")]
pub enum LangArg {
    /// Go, formatted with gofmt
    Go,
    /// TypeScript, written verbatim
    Ts,
}

impl From<LangArg> for Lang {
    fn from(arg: LangArg) -> Self {
        match arg {
            LangArg::Go => Lang::Go,
            LangArg::Ts => Lang::Ts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_names_match_language_tags() {
        for arg in LangArg::value_variants() {
            let name = arg.to_possible_value().map(|v| v.get_name().to_string());
            assert_eq!(name.as_deref(), Some(Lang::from(*arg).tag()));
        }
    }
}
