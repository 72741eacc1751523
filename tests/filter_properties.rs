//! Property tests for the filter engine.

use pkgdmp::core::{FilterAction, FilterChain, Symbol, SymbolFilter, SymbolKind};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Named {
    ident: String,
    kind: SymbolKind,
}

impl Symbol for Named {
    fn ident(&self) -> &str {
        &self.ident
    }

    fn symbol_kind(&self) -> SymbolKind {
        self.kind
    }
}

const ALL_KINDS: [SymbolKind; 15] = [
    SymbolKind::Package,
    SymbolKind::Const,
    SymbolKind::IdentType,
    SymbolKind::FuncType,
    SymbolKind::StructType,
    SymbolKind::InterfaceType,
    SymbolKind::MapType,
    SymbolKind::ChanType,
    SymbolKind::ArrayType,
    SymbolKind::Func,
    SymbolKind::Method,
    SymbolKind::StructField,
    SymbolKind::ParamField,
    SymbolKind::ResultField,
    SymbolKind::ReceiverField,
];

fn kind() -> impl Strategy<Value = SymbolKind> {
    prop::sample::select(ALL_KINDS.to_vec())
}

fn action() -> impl Strategy<Value = FilterAction> {
    prop_oneof![Just(FilterAction::Exclude), Just(FilterAction::Include)]
}

fn symbol() -> impl Strategy<Value = Named> {
    ("[a-zA-Z_][a-zA-Z0-9_]{0,8}", kind()).prop_map(|(ident, kind)| Named { ident, kind })
}

fn filter() -> impl Strategy<Value = SymbolFilter> {
    prop_oneof![
        action().prop_map(SymbolFilter::unexported),
        (action(), prop::collection::vec(kind(), 0..4))
            .prop_map(|(action, kinds)| SymbolFilter::kinds(action, kinds)),
        (action(), prop::sample::select(vec!["^My", "Test$", "^[A-Z]", "x"])).prop_map(
            |(action, pattern)| SymbolFilter::matching_idents(action, pattern).unwrap()
        ),
        (action(), prop::collection::vec("[a-z]{1,5}", 0..3))
            .prop_map(|(action, names)| SymbolFilter::packages(action, names)),
    ]
}

proptest! {
    #[test]
    fn prop_filter_order_does_not_matter(
        filters in prop::collection::vec(filter(), 0..5),
        symbols in prop::collection::vec(symbol(), 1..20),
    ) {
        let forward: FilterChain = filters.iter().cloned().collect();
        let backward: FilterChain = filters.iter().rev().cloned().collect();

        for sym in &symbols {
            prop_assert_eq!(forward.include(sym), backward.include(sym));
        }
    }

    #[test]
    fn prop_unfilterable_kinds_always_pass(
        filter in filter(),
        ident in "[a-zA-Z_][a-zA-Z0-9_]{0,8}",
        kind in prop::sample::select(vec![
            SymbolKind::ParamField,
            SymbolKind::ResultField,
            SymbolKind::ReceiverField,
            SymbolKind::Package,
        ]),
    ) {
        // Packages are only subject to package name filters.
        prop_assume!(!(kind == SymbolKind::Package && matches!(filter, SymbolFilter::Packages { .. })));

        let sym = Named { ident, kind };
        prop_assert!(filter.include(&sym));
    }

    #[test]
    fn prop_chain_is_conjunction(
        filters in prop::collection::vec(filter(), 0..5),
        sym in symbol(),
    ) {
        let chain: FilterChain = filters.iter().cloned().collect();
        let expected = filters.iter().all(|f| f.include(&sym));
        prop_assert_eq!(chain.include(&sym), expected);
    }
}

#[test]
fn test_export_casing() {
    assert!(pkgdmp::is_exported_ident("MyExported"));
    assert!(!pkgdmp::is_exported_ident("myUnexported"));
}
