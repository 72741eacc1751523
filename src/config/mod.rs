//! Settings resolution.
//!
//! Settings come in layers: built-in defaults, then `.pkgdmp.toml`, then
//! command-line flags (which already carry their `PKGDMP_*` environment
//! fallbacks). Each layer is a [`PartialSettings`]; later layers win.

mod loader;

pub use loader::{load_config, parse_config, CONFIG_FILE_NAME};

use serde::Deserialize;

use crate::core::errors::ConfigError;
use crate::core::filter::{FilterAction, SymbolFilter};
use crate::core::symbol::SymbolKind;
use crate::extract::ParserOptions;
use crate::formatting::{FormatterChoice, DEFAULT_THEME};

/// One settings layer. Unset keys defer to lower layers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialSettings {
    pub matching: Option<String>,
    pub exclude_matching: Option<String>,
    pub unexported: Option<bool>,
    pub only: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub only_packages: Option<Vec<String>>,
    pub exclude_packages: Option<Vec<String>>,
    pub no_docs: Option<bool>,
    pub full_docs: Option<bool>,
    pub no_tags: Option<bool>,
    pub json: Option<bool>,
    pub no_highlight: Option<bool>,
    pub theme: Option<String>,
    pub formatter: Option<FormatterChoice>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Keep only symbols whose name matches.
    pub matching: Option<String>,
    /// Drop symbols whose name matches.
    pub exclude_matching: Option<String>,
    /// Keep unexported symbols.
    pub unexported: bool,
    pub only: Vec<String>,
    pub exclude: Vec<String>,
    pub only_packages: Vec<String>,
    pub exclude_packages: Vec<String>,
    pub no_docs: bool,
    pub full_docs: bool,
    pub no_tags: bool,
    pub json: bool,
    pub no_highlight: bool,
    pub theme: String,
    pub formatter: FormatterChoice,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            matching: None,
            exclude_matching: None,
            unexported: false,
            only: Vec::new(),
            exclude: Vec::new(),
            only_packages: Vec::new(),
            exclude_packages: Vec::new(),
            no_docs: false,
            full_docs: false,
            no_tags: false,
            json: false,
            no_highlight: false,
            theme: DEFAULT_THEME.to_string(),
            formatter: FormatterChoice::Auto,
        }
    }
}

impl Settings {
    /// Overrides every value `layer` sets.
    pub fn apply(mut self, layer: PartialSettings) -> Self {
        fn set<T>(target: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *target = value;
            }
        }

        if layer.matching.is_some() {
            self.matching = layer.matching;
        }
        if layer.exclude_matching.is_some() {
            self.exclude_matching = layer.exclude_matching;
        }
        set(&mut self.unexported, layer.unexported);
        set(&mut self.only, layer.only);
        set(&mut self.exclude, layer.exclude);
        set(&mut self.only_packages, layer.only_packages);
        set(&mut self.exclude_packages, layer.exclude_packages);
        set(&mut self.no_docs, layer.no_docs);
        set(&mut self.full_docs, layer.full_docs);
        set(&mut self.no_tags, layer.no_tags);
        set(&mut self.json, layer.json);
        set(&mut self.no_highlight, layer.no_highlight);
        set(&mut self.theme, layer.theme);
        set(&mut self.formatter, layer.formatter);
        self
    }

    /// Filters in evaluation order: unexported, kind exclude, kind include,
    /// name include, name exclude, package include, package exclude.
    pub fn symbol_filters(&self) -> Result<Vec<SymbolFilter>, ConfigError> {
        let mut filters = Vec::new();

        if !self.unexported {
            filters.push(SymbolFilter::unexported(FilterAction::Exclude));
        }

        if !self.exclude.is_empty() {
            let kinds = parse_kinds(&self.exclude, "exclude")?;
            filters.push(SymbolFilter::kinds(FilterAction::Exclude, kinds));
        }

        if !self.only.is_empty() {
            let kinds = parse_kinds(&self.only, "only")?;
            filters.push(SymbolFilter::kinds(FilterAction::Include, kinds));
        }

        if let Some(pattern) = &self.matching {
            let filter = SymbolFilter::matching_idents(FilterAction::Include, pattern)
                .map_err(|source| ConfigError::Filter {
                    setting: "matching",
                    source,
                })?;
            filters.push(filter);
        }

        if let Some(pattern) = &self.exclude_matching {
            let filter = SymbolFilter::matching_idents(FilterAction::Exclude, pattern)
                .map_err(|source| ConfigError::Filter {
                    setting: "exclude-matching",
                    source,
                })?;
            filters.push(filter);
        }

        if !self.only_packages.is_empty() {
            filters.push(SymbolFilter::packages(
                FilterAction::Include,
                self.only_packages.iter().cloned(),
            ));
        }

        if !self.exclude_packages.is_empty() {
            filters.push(SymbolFilter::packages(
                FilterAction::Exclude,
                self.exclude_packages.iter().cloned(),
            ));
        }

        Ok(filters)
    }

    pub fn parser_options(&self) -> Result<ParserOptions, ConfigError> {
        Ok(ParserOptions {
            exclude_docs: self.no_docs,
            full_docs: self.full_docs,
            exclude_tags: self.no_tags,
            filters: self.symbol_filters()?.into_iter().collect(),
        })
    }
}

fn parse_kinds(names: &[String], setting: &'static str) -> Result<Vec<SymbolKind>, ConfigError> {
    names
        .iter()
        .filter(|name| !name.trim().is_empty())
        .map(|name| {
            name.parse::<SymbolKind>()
                .map_err(|source| ConfigError::Filter { setting, source })
        })
        .collect()
}
