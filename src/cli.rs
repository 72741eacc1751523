use clap::builder::BoolishValueParser;
use clap::{CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::PartialSettings;
use crate::formatting::FormatterChoice;

const NO_ENV_FLAG: &str = "--no-env";

#[derive(Parser, Debug)]
#[command(name = "pkgdmp")]
#[command(about = "Dump the declarations of Go packages", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directories containing Go packages
    #[arg(value_name = "DIRECTORY", required = true)]
    pub dirs: Vec<PathBuf>,

    /// Only include symbols whose name matches the regular expression
    #[arg(long, env = "PKGDMP_MATCHING", value_name = "REGEXP")]
    pub matching: Option<String>,

    /// Exclude symbols whose name matches the regular expression
    #[arg(long, env = "PKGDMP_EXCLUDE_MATCHING", value_name = "REGEXP")]
    pub exclude_matching: Option<String>,

    /// Include unexported symbols
    #[arg(long, env = "PKGDMP_UNEXPORTED", value_parser = BoolishValueParser::new())]
    pub unexported: bool,

    /// Only include symbols of these kinds (comma-separated)
    #[arg(long, env = "PKGDMP_ONLY", value_delimiter = ',', value_name = "KINDS")]
    pub only: Vec<String>,

    /// Exclude symbols of these kinds (comma-separated)
    #[arg(long, env = "PKGDMP_EXCLUDE", value_delimiter = ',', value_name = "KINDS")]
    pub exclude: Vec<String>,

    /// Only include these packages (comma-separated)
    #[arg(
        long,
        env = "PKGDMP_ONLY_PACKAGES",
        value_delimiter = ',',
        value_name = "NAMES"
    )]
    pub only_packages: Vec<String>,

    /// Exclude these packages (comma-separated)
    #[arg(
        long,
        env = "PKGDMP_EXCLUDE_PACKAGES",
        value_delimiter = ',',
        value_name = "NAMES"
    )]
    pub exclude_packages: Vec<String>,

    /// Exclude doc comments
    #[arg(long, env = "PKGDMP_NO_DOCS", value_parser = BoolishValueParser::new())]
    pub no_docs: bool,

    /// Keep full doc comments instead of the first sentence
    #[arg(long, env = "PKGDMP_FULL_DOCS", value_parser = BoolishValueParser::new())]
    pub full_docs: bool,

    /// Exclude struct field tags
    #[arg(long, env = "PKGDMP_NO_TAGS", value_parser = BoolishValueParser::new())]
    pub no_tags: bool,

    /// Output packages as JSON
    #[arg(long, env = "PKGDMP_JSON", value_parser = BoolishValueParser::new())]
    pub json: bool,

    /// Disable syntax highlighting
    #[arg(long, env = "PKGDMP_NO_HIGHLIGHT", value_parser = BoolishValueParser::new())]
    pub no_highlight: bool,

    /// Syntax highlighting theme
    #[arg(long, env = "PKGDMP_THEME", value_name = "NAME")]
    pub theme: Option<String>,

    /// Source formatter
    #[arg(long, env = "PKGDMP_FORMATTER", value_enum)]
    pub formatter: Option<FormatterChoice>,

    /// Config file (defaults to .pkgdmp.toml in the working directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ignore PKGDMP_* environment variables
    #[arg(long = "no-env")]
    pub no_env: bool,

    /// Increase log verbosity (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    /// Parses the process arguments, exiting on error or `--help`.
    pub fn parse_args() -> Self {
        Self::try_parse_args(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    /// Parses `args`, honoring `--no-env` before environment fallbacks apply.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

        let mut command = Self::command();
        if wants_no_env(&args) {
            command = command.mut_args(|arg| arg.env(None::<&'static str>));
        }

        let matches = command.try_get_matches_from(args)?;
        Self::from_arg_matches(&matches).map_err(|e| e.format(&mut Self::command()))
    }

    /// The settings layer given on the command line. Flags that were not
    /// set leave lower layers in charge.
    pub fn settings_layer(&self) -> PartialSettings {
        PartialSettings {
            matching: self.matching.clone(),
            exclude_matching: self.exclude_matching.clone(),
            unexported: self.unexported.then_some(true),
            only: non_empty(&self.only),
            exclude: non_empty(&self.exclude),
            only_packages: non_empty(&self.only_packages),
            exclude_packages: non_empty(&self.exclude_packages),
            no_docs: self.no_docs.then_some(true),
            full_docs: self.full_docs.then_some(true),
            no_tags: self.no_tags.then_some(true),
            json: self.json.then_some(true),
            no_highlight: self.no_highlight.then_some(true),
            theme: self.theme.clone(),
            formatter: self.formatter,
        }
    }
}

fn wants_no_env(args: &[OsString]) -> bool {
    args.iter()
        .skip(1)
        .take_while(|arg| *arg != "--")
        .any(|arg| arg == NO_ENV_FLAG)
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    let values: Vec<String> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();

    (!values.is_empty()).then_some(values)
}
