//! Elementary type canonicalization and identifier checks.

use abi_lexer::is_elementary_type;

use crate::AbiError;

/// Canonicalize an elementary type name.
///
/// `uint`/`int` gain their implicit `256` width; sized types are checked
/// against their legal widths. Anything outside the elementary grammar fails.
pub fn verify_basic_type(ty: &str) -> Result<String, AbiError> {
    if !is_elementary_type(ty) {
        return Err(AbiError::invalid_type(ty, "not an elementary type"));
    }
    match ty {
        "uint" => return Ok("uint256".to_owned()),
        "int" => return Ok("int256".to_owned()),
        _ => {}
    }

    if let Some(width) = ty.strip_prefix("bytes") {
        if !width.is_empty() {
            let size = parse_width(ty, width)?;
            if !(1..=32).contains(&size) {
                return Err(AbiError::invalid_type(ty, "bytes length must be 1..=32"));
            }
        }
    } else if let Some(width) = ty.strip_prefix("uint").or_else(|| ty.strip_prefix("int")) {
        let bits = parse_width(ty, width)?;
        if bits == 0 || bits > 256 || bits % 8 != 0 {
            return Err(AbiError::invalid_type(
                ty,
                "integer width must be a multiple of 8 in 8..=256",
            ));
        }
    }
    Ok(ty.to_owned())
}

fn parse_width(ty: &str, width: &str) -> Result<usize, AbiError> {
    if width.len() > 1 && width.starts_with('0') {
        return Err(AbiError::invalid_type(ty, "width has leading zeros"));
    }
    width
        .parse()
        .map_err(|_| AbiError::invalid_type(ty, "width out of range"))
}

/// Check `name` against `[A-Za-z$_][A-Za-z0-9$_]*`.
pub fn is_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() || first == b'$' || first == b'_' => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'$' || b == b'_')
}

pub(crate) fn verify_identifier(name: &str) -> Result<(), AbiError> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(AbiError::InvalidIdentifier {
            name: name.to_owned(),
        })
    }
}
