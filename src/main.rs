use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

use pkgdmp::analyzers::load_dir;
use pkgdmp::cli::Cli;
use pkgdmp::config::{load_config, Settings};
use pkgdmp::core::Package;
use pkgdmp::extract::Parser;
use pkgdmp::formatting::{ColorMode, Highlighter};
use pkgdmp::io::{JsonWriter, OutputWriter, SourceWriter};

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    pkgdmp::observability::init_tracing(cli.verbosity);

    let color = ColorMode::from_env();
    color.apply_to_colored();

    match run(cli, color) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, color: ColorMode) -> Result<()> {
    let cwd = std::env::current_dir().context("resolving working directory")?;
    let file_layer = load_config(cli.config.as_deref(), &cwd)?;
    let settings = Settings::default()
        .apply(file_layer)
        .apply(cli.settings_layer());
    debug!(?settings, "resolved settings");

    // Bad patterns and kind names fail here, before any file is read.
    let parser = Parser::new(settings.parser_options()?);
    debug!(options = %parser.options(), "parser ready");

    let packages = extract_packages(&parser, &cli.dirs)?;
    let out = BufWriter::new(io::stdout().lock());

    if settings.json {
        return JsonWriter::new(out).write_packages(&packages);
    }

    let highlighter = if settings.no_highlight || !color.should_use_color() {
        None
    } else {
        Some(Highlighter::new(&settings.theme)?)
    };

    SourceWriter::new(out, settings.formatter.formatter()?)
        .with_highlighter(highlighter)
        .write_packages(&packages)
}

fn extract_packages(parser: &Parser, dirs: &[PathBuf]) -> Result<Vec<Package>> {
    let mut packages = Vec::new();

    for dir in dirs {
        let docs =
            load_dir(dir).with_context(|| format!("parsing files in {}", dir.display()))?;

        for doc in docs {
            if !parser.accepts_package(&doc.name) {
                debug!(package = %doc.name, "package excluded");
                continue;
            }

            let package = parser
                .package(&doc)
                .with_context(|| format!("extracting {} package", doc.name))?;
            packages.push(package);
        }
    }

    info!(count = packages.len(), "extracted packages");
    Ok(packages)
}
