use abi_lexer::{tokenize, Keyword};

use super::{
    consume_gas, consume_kind, consume_params, expect_json_kind, gas_suffix, join_params,
    json_gas, json_params, to_json_params, StateMutability,
};
use crate::json::{JsonFragment, JsonGas};
use crate::param_type::ParamType;
use crate::stream::TokenStream;
use crate::{AbiError, FormatType};

/// A contract constructor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConstructorFragment {
    inputs: Box<[ParamType]>,
    payable: bool,
    gas: Option<u64>,
}

impl ConstructorFragment {
    pub fn parse(source: &str) -> Result<Self, AbiError> {
        let tokens = tokenize(source)?;
        Self::from_stream(&mut TokenStream::new(&tokens))
    }

    /// `constructor? (params) <deploy keywords>* (@gas)?`
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn from_stream(stream: &mut TokenStream<'_>) -> Result<Self, AbiError> {
        consume_kind(stream, Keyword::Constructor)?;
        let inputs = consume_params(stream, false)?;
        let payable = stream
            .pop_keywords(Keyword::DEPLOY_VISIBILITY)?
            .contains(&Keyword::Payable);
        let gas = consume_gas(stream)?;
        stream.expect_end()?;
        Ok(ConstructorFragment {
            inputs,
            payable,
            gas,
        })
    }

    pub fn from_json(json: &JsonFragment) -> Result<Self, AbiError> {
        expect_json_kind(json, &["constructor"])?;
        let mutability = StateMutability::from_json(json)?;
        if mutability.is_constant() {
            return Err(AbiError::invalid_fragment(format!(
                "constructor cannot be {mutability}"
            )));
        }
        Ok(ConstructorFragment {
            inputs: json_params(json.inputs.as_deref(), false)?,
            payable: mutability.is_payable(),
            gas: json_gas(json)?,
        })
    }

    pub fn inputs(&self) -> &[ParamType] {
        &self.inputs
    }

    pub fn payable(&self) -> bool {
        self.payable
    }

    pub fn gas(&self) -> Option<u64> {
        self.gas
    }

    /// Fails for `Sighash`: a constructor has no selector.
    pub fn format(&self, format: FormatType) -> Result<String, AbiError> {
        match format {
            FormatType::Sighash => Err(AbiError::UnsupportedOperation {
                operation: "cannot format a constructor for sighash",
            }),
            FormatType::Json => Ok(self.to_json().to_string()),
            FormatType::Minimal | FormatType::Full => Ok(format!(
                "constructor{}{}{}",
                join_params(&self.inputs, format),
                if self.payable { " payable" } else { "" },
                gas_suffix(self.gas)
            )),
        }
    }

    pub fn to_json(&self) -> JsonFragment {
        let mutability = if self.payable { "payable" } else { "nonpayable" };
        JsonFragment {
            kind: Some("constructor".to_owned()),
            state_mutability: Some(mutability.to_owned()),
            payable: Some(self.payable),
            gas: self.gas.map(JsonGas::Number),
            inputs: Some(to_json_params(&self.inputs)),
            ..JsonFragment::default()
        }
    }
}
