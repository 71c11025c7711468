#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;

fn param(source: &str) -> ParamType {
    ParamType::parse(source, false).unwrap()
}

/// Tags every leaf with its type so the output shows what was visited.
fn tag(ty: &str, value: &Value) -> Result<Value, AbiError> {
    Ok(json!(format!("{ty}:{value}")))
}

// === Synchronous ===

#[test]
fn fixed_array_length_is_enforced() {
    let p = param("uint256[2]");
    assert!(matches!(
        p.walk(&json!([1, 2, 3]), tag),
        Err(AbiError::ShapeMismatch { .. })
    ));
    assert_eq!(
        p.walk(&json!([1, 2]), tag).unwrap(),
        json!(["uint256:1", "uint256:2"])
    );
}

#[test]
fn dynamic_arrays_take_any_length() {
    let p = param("bool[]");
    assert_eq!(p.walk(&json!([]), tag).unwrap(), json!([]));
    assert_eq!(
        p.walk(&json!([true, false, true]), tag).unwrap(),
        json!(["bool:true", "bool:false", "bool:true"])
    );
    assert!(p.walk(&json!(true), tag).is_err());
}

#[test]
fn nested_shapes_are_preserved() {
    let p = param("(address owner, uint8[][2] grid)[]");
    let value = json!([["0xab", [[1], [2, 3]]]]);
    let out = p.walk(&value, tag).unwrap();
    assert_eq!(
        out,
        json!([[r#"address:"0xab""#, [["uint8:1"], ["uint8:2", "uint8:3"]]]])
    );
}

#[test]
fn tuples_accept_keyed_objects() {
    let p = param("(address to, uint256 amount)");
    let out = p
        .walk(&json!({"amount": 5, "to": "bob", "extra": 1}), tag)
        .unwrap();
    assert_eq!(out, json!({"to": r#"address:"bob""#, "amount": "uint256:5"}));
}

#[test]
fn keyed_tuple_errors() {
    let named = param("(address to, uint256 amount)");
    assert!(matches!(
        named.walk(&json!({"to": "bob"}), tag),
        Err(AbiError::ShapeMismatch { .. })
    ));
    assert!(named.walk(&json!(["bob"]), tag).is_err());

    let unnamed = param("(address, uint256)");
    assert!(unnamed.walk(&json!({"0": 1, "1": 2}), tag).is_err());
    assert!(unnamed.walk(&json!(["a", 1]), tag).is_ok());
}

#[test]
fn leaf_errors_abort_the_walk() {
    let p = param("uint8[]");
    let mut seen = 0;
    let result: Result<Value, AbiError> = p.walk(&json!([1, 2, 3]), |_, value| {
        seen += 1;
        if value == &json!(2) {
            Err(AbiError::UnsupportedOperation {
                operation: "two",
            })
        } else {
            Ok(value.clone())
        }
    });
    assert!(result.is_err());
    assert_eq!(seen, 2);
}

// === Asynchronous ===

#[tokio::test]
async fn async_fan_in_keeps_component_order() {
    let p = param("(uint256 a, uint256 b, uint256 c)");
    // The first leaf finishes last.
    let out = p
        .walk_async(&json!([30, 20, 10]), |_, value| async move {
            let millis = value.as_u64().unwrap();
            tokio::time::sleep(Duration::from_millis(millis)).await;
            Ok::<_, AbiError>(json!(millis * 2))
        })
        .await
        .unwrap();
    assert_eq!(out, json!([60, 40, 20]));
}

#[tokio::test]
async fn async_leaves_may_borrow_the_type() {
    let p = param("(address to, bytes32[2] keys)");
    let out = p
        .walk_async(&json!({"to": "x", "keys": ["k1", "k2"]}), |ty, value| async move {
            Ok::<_, AbiError>(json!(format!("{ty}={}", value.as_str().unwrap_or("?"))))
        })
        .await
        .unwrap();
    assert_eq!(
        out,
        json!({"to": "address=x", "keys": ["bytes32=k1", "bytes32=k2"]})
    );
}

#[tokio::test]
async fn async_shape_errors_precede_any_leaf() {
    let p = param("uint8[2]");
    let mut calls = 0;
    let result = p
        .walk_async(&json!([1]), |_, value| {
            calls += 1;
            async move { Ok::<_, AbiError>(value) }
        })
        .await;
    assert!(matches!(result, Err(AbiError::ShapeMismatch { .. })));
    assert_eq!(calls, 0);
}

#[tokio::test]
async fn async_failure_returns_no_partial_tree() {
    let p = param("uint8[]");
    let result = p
        .walk_async(&json!([1, 2, 3]), |_, value| async move {
            if value == json!(3) {
                Err(AbiError::UnsupportedOperation { operation: "three" })
            } else {
                Ok(value)
            }
        })
        .await;
    assert!(result.is_err());
}
