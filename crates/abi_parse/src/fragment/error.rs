use abi_lexer::{tokenize, Keyword};

use super::{
    consume_name, consume_params, expect_json_kind, join_params, json_name, json_params,
    to_json_params,
};
use crate::digest::{self, Keccak256, SignatureDigest};
use crate::json::JsonFragment;
use crate::param_type::ParamType;
use crate::stream::TokenStream;
use crate::{AbiError, FormatType};

/// A custom error, e.g. `error InsufficientBalance(uint256 available)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ErrorFragment {
    name: String,
    inputs: Box<[ParamType]>,
}

impl ErrorFragment {
    pub fn parse(source: &str) -> Result<Self, AbiError> {
        let tokens = tokenize(source)?;
        Self::from_stream(&mut TokenStream::new(&tokens))
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn from_stream(stream: &mut TokenStream<'_>) -> Result<Self, AbiError> {
        let name = consume_name(stream, Keyword::Error)?.to_owned();
        let inputs = consume_params(stream, false)?;
        stream.expect_end()?;
        Ok(ErrorFragment { name, inputs })
    }

    pub fn from_json(json: &JsonFragment) -> Result<Self, AbiError> {
        expect_json_kind(json, &["error"])?;
        Ok(ErrorFragment {
            name: json_name(json)?,
            inputs: json_params(json.inputs.as_deref(), false)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inputs(&self) -> &[ParamType] {
        &self.inputs
    }

    /// Keccak-256 selector, e.g. `0x08c379a0` for `Error(string)`.
    pub fn selector(&self) -> String {
        self.selector_with(&Keccak256)
    }

    pub fn selector_with(&self, hasher: &impl SignatureDigest) -> String {
        digest::selector(&self.format(FormatType::Sighash), hasher)
    }

    pub fn format(&self, format: FormatType) -> String {
        if format == FormatType::Json {
            return self.to_json().to_string();
        }
        let params = join_params(&self.inputs, format);
        if format == FormatType::Sighash {
            format!("{}{params}", self.name)
        } else {
            format!("error {}{params}", self.name)
        }
    }

    pub fn to_json(&self) -> JsonFragment {
        JsonFragment {
            kind: Some("error".to_owned()),
            name: Some(self.name.clone()),
            inputs: Some(to_json_params(&self.inputs)),
            ..JsonFragment::default()
        }
    }
}
