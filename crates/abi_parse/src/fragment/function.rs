use abi_lexer::{tokenize, Keyword};

use super::{
    consume_gas, consume_mutability, consume_name, consume_params, expect_json_kind,
    gas_suffix, join_params, json_gas, json_name, json_params, to_json_params, StateMutability,
};
use crate::digest::{self, Keccak256, SignatureDigest};
use crate::json::{JsonFragment, JsonGas};
use crate::param_type::ParamType;
use crate::stream::TokenStream;
use crate::{AbiError, FormatType};

/// A callable contract function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionFragment {
    name: String,
    inputs: Box<[ParamType]>,
    outputs: Box<[ParamType]>,
    state_mutability: StateMutability,
    gas: Option<u64>,
}

impl FunctionFragment {
    pub fn parse(source: &str) -> Result<Self, AbiError> {
        let tokens = tokenize(source)?;
        Self::from_stream(&mut TokenStream::new(&tokens))
    }

    /// `function? name(params) <mutability> (returns (params))? (@gas)?`
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn from_stream(stream: &mut TokenStream<'_>) -> Result<Self, AbiError> {
        let name = consume_name(stream, Keyword::Function)?.to_owned();
        let inputs = consume_params(stream, false)?;
        let state_mutability = consume_mutability(stream)?;

        let outputs = if stream.peek_keyword(&[Keyword::Returns]).is_some() {
            stream.pop()?;
            consume_params(stream, false)?
        } else {
            Box::default()
        };

        let gas = consume_gas(stream)?;
        stream.expect_end()?;
        Ok(FunctionFragment {
            name,
            inputs,
            outputs,
            state_mutability,
            gas,
        })
    }

    pub fn from_json(json: &JsonFragment) -> Result<Self, AbiError> {
        expect_json_kind(json, &["function"])?;
        Ok(FunctionFragment {
            name: json_name(json)?,
            inputs: json_params(json.inputs.as_deref(), false)?,
            outputs: json_params(json.outputs.as_deref(), false)?,
            state_mutability: StateMutability::from_json(json)?,
            gas: json_gas(json)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inputs(&self) -> &[ParamType] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[ParamType] {
        &self.outputs
    }

    pub fn state_mutability(&self) -> StateMutability {
        self.state_mutability
    }

    /// `view` or `pure`.
    pub fn constant(&self) -> bool {
        self.state_mutability.is_constant()
    }

    pub fn payable(&self) -> bool {
        self.state_mutability.is_payable()
    }

    pub fn gas(&self) -> Option<u64> {
        self.gas
    }

    /// Keccak-256 selector, e.g. `0xa9059cbb` for `transfer(address,uint256)`.
    pub fn selector(&self) -> String {
        self.selector_with(&Keccak256)
    }

    pub fn selector_with(&self, hasher: &impl SignatureDigest) -> String {
        digest::selector(&self.format(FormatType::Sighash), hasher)
    }

    /// Selector of `name(params)` without building a fragment.
    pub fn selector_for(name: &str, params: &[ParamType]) -> String {
        let signature = format!("{name}{}", join_params(params, FormatType::Sighash));
        digest::selector(&signature, &Keccak256)
    }

    pub fn format(&self, format: FormatType) -> String {
        if format == FormatType::Json {
            return self.to_json().to_string();
        }
        let params = join_params(&self.inputs, format);
        if format == FormatType::Sighash {
            return format!("{}{params}", self.name);
        }

        let mut out = format!("function {}{params}", self.name);
        if self.state_mutability != StateMutability::Nonpayable {
            out.push(' ');
            out.push_str(self.state_mutability.as_str());
        }
        if !self.outputs.is_empty() {
            out.push_str(" returns ");
            out.push_str(&join_params(&self.outputs, format));
        }
        out.push_str(&gas_suffix(self.gas));
        out
    }

    pub fn to_json(&self) -> JsonFragment {
        JsonFragment {
            kind: Some("function".to_owned()),
            name: Some(self.name.clone()),
            constant: Some(self.constant()),
            state_mutability: Some(self.state_mutability.as_str().to_owned()),
            payable: Some(self.payable()),
            gas: self.gas.map(JsonGas::Number),
            inputs: Some(to_json_params(&self.inputs)),
            outputs: Some(to_json_params(&self.outputs)),
            ..JsonFragment::default()
        }
    }
}
