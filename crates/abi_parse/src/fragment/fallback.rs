use abi_lexer::{tokenize, Keyword};

use super::{
    consume_mutability, consume_params, expect_json_kind, json_params, StateMutability,
};
use crate::json::JsonFragment;
use crate::param_type::ParamType;
use crate::stream::TokenStream;
use crate::{AbiError, FormatType};

/// A `fallback` or `receive` function.
///
/// A receive function has no inputs and is always payable. A fallback has
/// exactly one unnamed `bytes` input, implied when none is written.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FallbackFragment {
    inputs: Box<[ParamType]>,
    payable: bool,
}

impl FallbackFragment {
    pub fn parse(source: &str) -> Result<Self, AbiError> {
        let tokens = tokenize(source)?;
        Self::from_stream(&mut TokenStream::new(&tokens))
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn from_stream(stream: &mut TokenStream<'_>) -> Result<Self, AbiError> {
        let keyword = stream.pop_keyword(&[Keyword::Fallback, Keyword::Receive])?;
        let params = consume_params(stream, false)?;

        if keyword == Keyword::Receive {
            if !params.is_empty() {
                return Err(AbiError::invalid_fragment("receive cannot have inputs"));
            }
            stream.pop_keywords(&[Keyword::Payable])?;
            stream.expect_end()?;
            return Ok(Self::receive());
        }

        if !(params.is_empty() || is_single_bytes(&params)) {
            return Err(AbiError::invalid_fragment(
                "fallback input must be a single unnamed bytes",
            ));
        }
        let mutability = consume_mutability(stream)?;
        if mutability.is_constant() {
            return Err(AbiError::invalid_fragment(format!(
                "fallback cannot be {mutability}"
            )));
        }
        if stream.peek_keyword(&[Keyword::Returns]).is_some() {
            stream.pop()?;
            let outputs = consume_params(stream, false)?;
            if !is_single_bytes(&outputs) {
                return Err(AbiError::invalid_fragment(
                    "fallback output must be a single unnamed bytes",
                ));
            }
        }
        stream.expect_end()?;
        Ok(Self::fallback(mutability.is_payable()))
    }

    /// Inputs and outputs, when listed, obey the same rules as the text form.
    pub fn from_json(json: &JsonFragment) -> Result<Self, AbiError> {
        expect_json_kind(json, &["fallback", "receive"])?;
        let inputs = json_params(json.inputs.as_deref(), false)?;
        let outputs = json_params(json.outputs.as_deref(), false)?;

        if json.kind.as_deref() == Some("receive") {
            if !inputs.is_empty() || !outputs.is_empty() {
                return Err(AbiError::invalid_fragment(
                    "receive cannot have inputs or outputs",
                ));
            }
            if let Some(text) = &json.state_mutability {
                let mutability: StateMutability = text.parse()?;
                if !mutability.is_payable() {
                    return Err(AbiError::invalid_fragment(format!(
                        "receive cannot be {mutability}"
                    )));
                }
            }
            return Ok(Self::receive());
        }

        if !(inputs.is_empty() || is_single_bytes(&inputs)) {
            return Err(AbiError::invalid_fragment(
                "fallback input must be a single unnamed bytes",
            ));
        }
        if !(outputs.is_empty() || is_single_bytes(&outputs)) {
            return Err(AbiError::invalid_fragment(
                "fallback output must be a single unnamed bytes",
            ));
        }
        let mutability = StateMutability::from_json(json)?;
        if mutability.is_constant() {
            return Err(AbiError::invalid_fragment(format!(
                "fallback cannot be {mutability}"
            )));
        }
        Ok(Self::fallback(mutability.is_payable()))
    }

    fn receive() -> Self {
        FallbackFragment {
            inputs: Box::default(),
            payable: true,
        }
    }

    fn fallback(payable: bool) -> Self {
        FallbackFragment {
            inputs: Box::new([ParamType::elementary("bytes".to_owned())]),
            payable,
        }
    }

    pub fn inputs(&self) -> &[ParamType] {
        &self.inputs
    }

    pub fn payable(&self) -> bool {
        self.payable
    }

    /// Whether this is a `receive` function.
    pub fn is_receive(&self) -> bool {
        self.inputs.is_empty()
    }

    fn keyword(&self) -> &'static str {
        if self.is_receive() {
            "receive"
        } else {
            "fallback"
        }
    }

    /// Every text format renders the same `fallback()` / `receive()` form.
    pub fn format(&self, format: FormatType) -> String {
        if format == FormatType::Json {
            return self.to_json().to_string();
        }
        let payable = if self.payable { " payable" } else { "" };
        format!("{}(){payable}", self.keyword())
    }

    pub fn to_json(&self) -> JsonFragment {
        let mutability = if self.payable {
            StateMutability::Payable
        } else {
            StateMutability::Nonpayable
        };
        JsonFragment {
            kind: Some(self.keyword().to_owned()),
            state_mutability: Some(mutability.as_str().to_owned()),
            ..JsonFragment::default()
        }
    }
}

fn is_single_bytes(params: &[ParamType]) -> bool {
    matches!(params, [only] if only.ty() == "bytes" && only.name().is_empty())
}
