//! Symbol filters.
//!
//! Each filter is a stateless predicate over a [`Symbol`]. A [`FilterChain`]
//! includes a symbol only when every filter in it does, checking filters in
//! insertion order and stopping at the first rejection.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use xxhash_rust::xxh64::xxh64;

use super::errors::FilterError;
use super::symbol::{Symbol, SymbolKind};

/// Configures whether a filter keeps or drops the symbols it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterAction {
    Exclude,
    Include,
}

impl fmt::Display for FilterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exclude => f.write_str("Exclude"),
            Self::Include => f.write_str("Include"),
        }
    }
}

/// A single filter criterion.
#[derive(Debug, Clone)]
pub enum SymbolFilter {
    /// Drops unexported symbols when the action is [`FilterAction::Exclude`].
    Unexported { action: FilterAction },
    /// Keeps or drops symbols by kind.
    Kinds {
        action: FilterAction,
        kinds: BTreeSet<SymbolKind>,
    },
    /// Keeps or drops symbols whose identifier matches a pattern.
    MatchingIdents {
        action: FilterAction,
        pattern: Regex,
    },
    /// Keeps or drops packages by name. Other symbols always pass.
    Packages {
        action: FilterAction,
        names: BTreeSet<String>,
    },
}

impl SymbolFilter {
    pub fn unexported(action: FilterAction) -> Self {
        Self::Unexported { action }
    }

    pub fn kinds(action: FilterAction, kinds: impl IntoIterator<Item = SymbolKind>) -> Self {
        Self::Kinds {
            action,
            kinds: kinds.into_iter().collect(),
        }
    }

    /// Compiles `pattern` into a name filter.
    pub fn matching_idents(action: FilterAction, pattern: &str) -> Result<Self, FilterError> {
        let pattern = Regex::new(pattern).map_err(|source| FilterError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self::from_regex(action, pattern))
    }

    pub fn from_regex(action: FilterAction, pattern: Regex) -> Self {
        Self::MatchingIdents { action, pattern }
    }

    pub fn packages<I, S>(action: FilterAction, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Packages {
            action,
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `symbol` should be included.
    pub fn include<S: Symbol + ?Sized>(&self, symbol: &S) -> bool {
        let kind = symbol.symbol_kind();

        match self {
            Self::Packages { action, names } => {
                if kind != SymbolKind::Package {
                    return true;
                }
                apply(*action, names.contains(symbol.ident()))
            }
            _ if kind.is_unfilterable() => true,
            Self::Unexported { action } => {
                *action == FilterAction::Include || symbol.is_exported()
            }
            Self::Kinds { action, kinds } => apply(*action, kinds.contains(&kind)),
            Self::MatchingIdents { action, pattern } => {
                apply(*action, pattern.is_match(symbol.ident()))
            }
        }
    }

    /// Stable hash of the filter's configuration.
    pub fn fingerprint(&self) -> u64 {
        xxh64(self.to_string().as_bytes(), 0)
    }
}

fn apply(action: FilterAction, matched: bool) -> bool {
    match action {
        FilterAction::Include => matched,
        FilterAction::Exclude => !matched,
    }
}

impl fmt::Display for SymbolFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unexported { action } => write!(f, "filterUnexported(action={action})"),
            Self::Kinds { action, kinds } => {
                let kinds: Vec<&str> = kinds.iter().map(SymbolKind::as_str).collect();
                write!(
                    f,
                    "filterSymbolTypes(action={action},symbolTypes={})",
                    kinds.join(",")
                )
            }
            Self::MatchingIdents { action, pattern } => {
                write!(f, "filterMatchingIdents(action={action},pattern={pattern})")
            }
            Self::Packages { action, names } => {
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                write!(f, "filterPackages(action={action},names={})", names.join(","))
            }
        }
    }
}

/// Ordered all-of combination of filters.
#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    filters: Vec<SymbolFilter>,
}

impl FilterChain {
    pub fn new(filters: Vec<SymbolFilter>) -> Self {
        Self { filters }
    }

    pub fn push(&mut self, filter: SymbolFilter) {
        self.filters.push(filter);
    }

    pub fn extend(&mut self, filters: impl IntoIterator<Item = SymbolFilter>) {
        self.filters.extend(filters);
    }

    pub fn filters(&self) -> &[SymbolFilter] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn include<S: Symbol + ?Sized>(&self, symbol: &S) -> bool {
        self.filters.iter().all(|filter| filter.include(symbol))
    }

    pub fn fingerprint(&self) -> u64 {
        xxh64(self.to_string().as_bytes(), 0)
    }
}

impl FromIterator<SymbolFilter> for FilterChain {
    fn from_iter<T: IntoIterator<Item = SymbolFilter>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, filter) in self.filters.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{filter}")?;
        }
        f.write_str("]")
    }
}
