//! Whole ABIs: lists of fragments.

use serde::Deserialize;
use serde_json::Value;

use crate::json::JsonFragment;
use crate::{AbiError, Fragment, FormatType};

/// Parse a JSON array whose entries are fragment objects or human-readable
/// signatures (the two may be mixed).
pub fn parse_abi(source: &str) -> Result<Vec<Fragment>, AbiError> {
    let entries: Vec<Value> = serde_json::from_str(source)?;
    tracing::debug!(entries = entries.len(), "parsing ABI");
    entries
        .iter()
        .map(|entry| match entry {
            Value::String(signature) => Fragment::parse_text(signature),
            object => Fragment::from_json(&JsonFragment::deserialize(object)?),
        })
        .collect()
}

/// Render a list of fragments as a JSON array.
///
/// `Json` yields an array of objects; the text formats yield an array of
/// signature strings. Either form is accepted by [`parse_abi`].
pub fn format_abi(fragments: &[Fragment], format: FormatType) -> Result<String, AbiError> {
    if format == FormatType::Json {
        let objects: Vec<JsonFragment> = fragments.iter().map(Fragment::to_json).collect();
        return Ok(serde_json::to_string(&objects)?);
    }
    let signatures = fragments
        .iter()
        .map(|fragment| fragment.format(format))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(serde_json::to_string(&signatures)?)
}
