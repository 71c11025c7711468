#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use abi_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

use super::*;

fn param(source: &str) -> ParamType {
    ParamType::parse(source, false).unwrap()
}

fn json_param(json: &str, allow_indexed: bool) -> Result<ParamType, AbiError> {
    let obj: JsonParam = serde_json::from_str(json).unwrap();
    ParamType::from_json(&obj, allow_indexed)
}

// === Canonicalization ===

#[test]
fn implicit_integer_widths() {
    assert_eq!(param("uint").ty(), "uint256");
    assert_eq!(param("int").ty(), "int256");
    assert_eq!(param("uint[2]").ty(), "uint256[2]");
}

#[test]
fn sized_types() {
    for ok in ["uint8", "int256", "bytes1", "bytes32", "bytes", "address", "string", "bool"] {
        assert_eq!(verify_basic_type(ok).unwrap(), ok);
    }
    for bad in ["uint7", "uint264", "uint0", "int9", "bytes0", "bytes33", "uint08", "float"] {
        assert!(
            matches!(verify_basic_type(bad), Err(AbiError::InvalidType { .. })),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn huge_width_is_rejected_not_overflowed() {
    assert!(verify_basic_type("uint99999999999999999999999").is_err());
}

#[test]
fn identifiers() {
    assert!(is_identifier("_x$1"));
    assert!(is_identifier("$"));
    assert!(!is_identifier("1x"));
    assert!(!is_identifier(""));
    assert!(!is_identifier("a-b"));
}

// === Text path ===

#[test]
fn elementary_with_name() {
    let p = param("address to");
    assert_eq!(p.name(), "to");
    assert_eq!(p.base_type(), BaseType::Elementary);
    assert_eq!(p.indexed(), None);
    assert!(p.components().is_none());
    assert!(p.array_children().is_none());
}

#[test]
fn array_nesting_reads_left_to_right() {
    let p = param("uint8[3][]");
    assert_eq!(p.ty(), "uint8[3][]");
    assert_eq!(p.array_length_signed(), Some(-1));
    assert_eq!(p.array_length(), None);

    let inner = p.array_children().unwrap();
    assert_eq!(inner.ty(), "uint8[3]");
    assert_eq!(inner.array_length(), Some(3));

    let leaf = inner.array_children().unwrap();
    assert_eq!(leaf.ty(), "uint8");
    assert_eq!(leaf.array_length_signed(), None);
}

#[test]
fn dynamic_and_fixed_lengths() {
    assert_eq!(param("uint8[]").array_length_signed(), Some(-1));
    assert_eq!(param("uint8[3]").array_length_signed(), Some(3));
}

#[test]
fn tuple_components_keep_names_in_order() {
    let p = param("tuple(address a, uint256 b)");
    assert_eq!(p.ty(), "tuple(address,uint256)");
    let names: Vec<_> = p.components().unwrap().iter().map(ParamType::name).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn bare_paren_tuple_and_tuple_arrays() {
    let p = param("(uint, (bool, bytes4)[2])[] items");
    assert_eq!(p.ty(), "tuple(uint256,(bool,bytes4)[2])[]");
    assert_eq!(p.name(), "items");
    assert!(p.is_array());
    let element = p.array_children().unwrap();
    assert!(element.is_tuple());
    assert_eq!(element.name(), "");
    assert_eq!(element.components().unwrap()[1].array_length(), Some(2));
}

#[test]
fn data_location_modifiers_are_dropped() {
    let p = param("bytes calldata data");
    assert_eq!(p.format(FormatType::Full), "bytes data");
    assert!(param("address payable to").ty() == "address");
}

#[test]
fn indexed_gating() {
    assert!(matches!(
        ParamType::parse("address indexed a", false),
        Err(AbiError::NotIndexable)
    ));
    let p = ParamType::parse("address indexed a", true).unwrap();
    assert_eq!(p.indexed(), Some(true));
    assert_eq!(ParamType::parse("address a", true).unwrap().indexed(), Some(false));
}

#[test]
fn tuple_members_never_inherit_indexing() {
    assert!(matches!(
        ParamType::parse("(address indexed a) indexed t", true),
        Err(AbiError::NotIndexable)
    ));
    let p = ParamType::parse("(address a) indexed t", true).unwrap();
    assert_eq!(p.components().unwrap()[0].indexed(), None);
}

#[test]
fn leftovers_and_malformed_input() {
    assert!(matches!(
        ParamType::parse("uint8 a b", false),
        Err(AbiError::LeftoverTokens { .. })
    ));
    assert!(matches!(
        ParamType::parse("(uint8,)", false),
        Err(AbiError::UnexpectedEnd { .. })
    ));
    assert!(matches!(
        ParamType::parse("uint8 memory memory", false),
        Err(AbiError::DuplicateKeyword { .. })
    ));
    assert!(matches!(ParamType::parse("(uint8", false), Err(AbiError::Lex(_))));
    assert!(ParamType::parse("tuple", false).is_err());
}

#[test]
fn from_str_disallows_indexed() {
    assert!("uint256 indexed x".parse::<ParamType>().is_err());
    assert_eq!("uint x".parse::<ParamType>().unwrap().ty(), "uint256");
}

#[test]
fn indexable_types() {
    assert!(param("string").is_indexable());
    assert!(param("bytes").is_indexable());
    assert!(param("uint8[]").is_indexable());
    assert!(param("(uint8)").is_indexable());
    assert!(!param("bytes32").is_indexable());
}

// === Formatting ===

#[test]
fn formats() {
    let p = ParamType::parse("tuple(uint256 a, bool[2] b)[] indexed t", true).unwrap();
    assert_eq!(p.format(FormatType::Sighash), "(uint256,bool[2])[]");
    assert_eq!(p.format(FormatType::Minimal), "tuple(uint256,bool[2])[] indexed");
    assert_eq!(
        p.format(FormatType::Full),
        "tuple(uint256 a, bool[2] b)[] indexed t"
    );
    assert_eq!(p.to_string(), p.format(FormatType::Full));
}

#[test]
fn json_format_nests_components_under_arrays() {
    let p = param("(address owner, uint8[] ids)[2] pairs");
    assert_eq!(
        p.format(FormatType::Json),
        concat!(
            r#"{"name":"pairs","type":"tuple[2]","components":["#,
            r#"{"name":"owner","type":"address"},"#,
            r#"{"name":"ids","type":"uint8[]"}]}"#
        )
    );
}

// === Interchange path ===

#[test]
fn json_round_trip() {
    let p = ParamType::parse("(address owner, uint[2][] grid) indexed x", true).unwrap();
    let back = ParamType::from_json(&p.to_json(), true).unwrap();
    assert_eq!(back, p);
}

#[test]
fn json_canonicalizes() {
    let p = json_param(r#"{"name":"v","type":"uint[]"}"#, false).unwrap();
    assert_eq!(p.ty(), "uint256[]");
    assert_eq!(p.array_children().unwrap().ty(), "uint256");
}

#[test]
fn json_tuple_from_type_string() {
    let p = json_param(r#"{"name":"t","type":"tuple(address,uint)"}"#, false).unwrap();
    assert_eq!(p.ty(), "tuple(address,uint256)");
    assert_eq!(p.name(), "t");

    assert!(json_param(r#"{"type":"tuple"}"#, false).is_err());

    // The type string is a type, not a declaration.
    for ty in [
        "tuple(uint256) memory junk",
        "tuple(uint256) junk",
        "(bool)[] calldata",
    ] {
        let json = format!(r#"{{"name":"a","type":"{ty}"}}"#);
        assert!(
            matches!(json_param(&json, false), Err(AbiError::LeftoverTokens { .. })),
            "{ty}"
        );
    }
}

// === Nesting limit ===

#[test]
fn deep_paren_nesting_is_an_error_not_an_abort() {
    let source = format!("{}uint256{}", "(".repeat(20_000), ")".repeat(20_000));
    let err = ParamType::parse(&source, false).unwrap_err();
    assert!(matches!(err, AbiError::NestingTooDeep { limit: MAX_NESTING_DEPTH }));
    assert_eq!(err.code(), ErrorCode::E2004);
}

#[test]
fn deep_array_suffixes_are_bounded() {
    let source = format!("uint256{}", "[]".repeat(20_000));
    assert!(matches!(
        ParamType::parse(&source, false),
        Err(AbiError::NestingTooDeep { .. })
    ));

    let json = format!(r#"{{"type":"uint256{}"}}"#, "[]".repeat(20_000));
    assert!(matches!(
        json_param(&json, false),
        Err(AbiError::NestingTooDeep { .. })
    ));
}

#[test]
fn nesting_limit_counts_tuples_and_arrays_together() {
    let at_limit = format!("{}uint256{}", "(".repeat(32), ")[]".repeat(32));
    assert!(ParamType::parse(&at_limit, false).is_ok());

    let past_limit = format!("{}uint256{}", "(".repeat(32), ")[][]".repeat(32));
    assert!(matches!(
        ParamType::parse(&past_limit, false),
        Err(AbiError::NestingTooDeep { .. })
    ));
}

#[test]
fn deep_tuple_type_string_in_json() {
    let ty = format!("{}uint256{}", "tuple(".repeat(200), ")".repeat(200));
    let json = format!(r#"{{"type":"{ty}"}}"#);
    assert!(matches!(
        json_param(&json, false),
        Err(AbiError::NestingTooDeep { .. })
    ));
}

#[test]
fn json_validation() {
    assert!(matches!(
        json_param(r#"{"name":"1bad","type":"uint8"}"#, false),
        Err(AbiError::InvalidIdentifier { .. })
    ));
    assert!(matches!(
        json_param(r#"{"name":"x","type":"uint8","indexed":true}"#, false),
        Err(AbiError::NotIndexable)
    ));
    assert!(matches!(
        json_param(r#"{"type":"uint8[x]"}"#, false),
        Err(AbiError::InvalidType { .. })
    ));
    let missing_name = json_param(r#"{"type":"bool","indexed":true}"#, true).unwrap();
    assert_eq!(missing_name.name(), "");
    assert_eq!(missing_name.indexed(), Some(true));
}
