//! Property-based round-trip tests for fragments.
//!
//! Random signatures are generated from the human-readable grammar and checked
//! for:
//! 1. JSON round trip: parse(format(f, json)) == f
//! 2. Full-format fixed point: format(parse(format(f, full)), full) == format(f, full)
//! 3. Sighash output carries no names or modifiers

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use abi_lexer::{is_elementary_type, Keyword};
use abi_parse::{FormatType, Fragment, ParamType};
use proptest::prelude::*;

// -- Strategies --

/// A parameter or fragment name that lexes as an identifier.
fn identifier_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z_$][a-zA-Z0-9_$]{0,8}")
        .expect("valid regex")
        .prop_filter("not reserved", |s| {
            Keyword::lookup(s).is_none() && !is_elementary_type(s)
        })
}

fn elementary_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("address".to_owned()),
        Just("bool".to_owned()),
        Just("string".to_owned()),
        Just("bytes".to_owned()),
        Just("uint".to_owned()),
        (1u32..=32).prop_map(|n| format!("bytes{n}")),
        (1u32..=32).prop_map(|n| format!("uint{}", n * 8)),
        (1u32..=32).prop_map(|n| format!("int{}", n * 8)),
    ]
}

/// A type expression: elementary, array of a type, or tuple of named members.
fn type_strategy() -> impl Strategy<Value = String> {
    elementary_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            (inner.clone(), prop::option::of(1usize..4)).prop_map(|(ty, length)| match length {
                Some(n) => format!("{ty}[{n}]"),
                None => format!("{ty}[]"),
            }),
            prop::collection::vec((inner, identifier_strategy()), 0..4).prop_map(|members| {
                let members: Vec<String> =
                    members.iter().map(|(ty, name)| format!("{ty} {name}")).collect();
                format!("tuple({})", members.join(", "))
            }),
        ]
    })
}

/// A parameter list such as `(uint256 a, (bool b)[] c)`.
fn params_strategy(indexable: bool) -> impl Strategy<Value = String> {
    prop::collection::vec((type_strategy(), any::<bool>(), identifier_strategy()), 0..4).prop_map(
        move |params| {
            let params: Vec<String> = params
                .iter()
                .map(|(ty, indexed, name)| {
                    if indexable && *indexed {
                        format!("{ty} indexed {name}")
                    } else {
                        format!("{ty} {name}")
                    }
                })
                .collect();
            format!("({})", params.join(", "))
        },
    )
}

fn mutability_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just(""),
        Just(" view"),
        Just(" pure"),
        Just(" payable"),
        Just(" external"),
        Just(" public view"),
    ]
}

fn function_strategy() -> impl Strategy<Value = String> {
    (
        identifier_strategy(),
        params_strategy(false),
        mutability_strategy(),
        prop::option::of(params_strategy(false)),
        prop::option::of(1u64..10_000_000),
    )
        .prop_map(|(name, inputs, mutability, outputs, gas)| {
            let mut source = format!("function {name}{inputs}{mutability}");
            if let Some(outputs) = outputs {
                source.push_str(" returns ");
                source.push_str(&outputs);
            }
            if let Some(gas) = gas {
                source.push_str(&format!(" @{gas}"));
            }
            source
        })
}

fn fragment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        function_strategy(),
        (identifier_strategy(), params_strategy(true), any::<bool>()).prop_map(
            |(name, params, anonymous)| {
                let suffix = if anonymous { " anonymous" } else { "" };
                format!("event {name}{params}{suffix}")
            }
        ),
        (identifier_strategy(), params_strategy(false))
            .prop_map(|(name, params)| format!("error {name}{params}")),
        (identifier_strategy(), params_strategy(false))
            .prop_map(|(name, params)| format!("struct {name}{params}")),
        (params_strategy(false), any::<bool>()).prop_map(|(params, payable)| {
            let suffix = if payable { " payable" } else { "" };
            format!("constructor{params}{suffix}")
        }),
        Just("receive() payable".to_owned()),
        Just("fallback() payable".to_owned()),
        Just("fallback(bytes)".to_owned()),
    ]
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn json_round_trip(source in fragment_strategy()) {
        let fragment = Fragment::parse(&source).unwrap();
        let json = fragment.format(FormatType::Json).unwrap();
        let back = Fragment::parse(&json).unwrap();
        prop_assert_eq!(back, fragment);
    }

    #[test]
    fn full_format_is_a_fixed_point(source in fragment_strategy()) {
        let fragment = Fragment::parse(&source).unwrap();
        let full = fragment.format(FormatType::Full).unwrap();
        let reparsed = Fragment::parse(&full).unwrap();
        prop_assert_eq!(reparsed.format(FormatType::Full).unwrap(), full);
        prop_assert_eq!(reparsed, fragment);
    }

    #[test]
    fn sighash_has_no_names(source in type_strategy(), name in identifier_strategy()) {
        let param = ParamType::parse(&format!("{source} {name}"), false).unwrap();
        let sighash = param.format(FormatType::Sighash);
        prop_assert!(!sighash.contains(' '));
        prop_assert!(!sighash.contains("tuple"));
        let reparsed = ParamType::parse(&sighash, false).unwrap();
        prop_assert_eq!(reparsed.ty(), param.ty());
    }

    #[test]
    fn parsing_never_panics(source in "[a-z0-9(),\\[\\]@ ]{0,40}") {
        let _ = Fragment::parse(&source);
    }
}
