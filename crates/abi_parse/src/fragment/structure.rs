use abi_lexer::{tokenize, Keyword};

use super::{
    consume_name, consume_params, expect_json_kind, join_params, json_name, json_params,
    to_json_params,
};
use crate::json::JsonFragment;
use crate::param_type::ParamType;
use crate::stream::TokenStream;
use crate::{AbiError, FormatType};

/// A named struct; its inputs are the members.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StructFragment {
    name: String,
    inputs: Box<[ParamType]>,
}

impl StructFragment {
    pub fn parse(source: &str) -> Result<Self, AbiError> {
        let tokens = tokenize(source)?;
        Self::from_stream(&mut TokenStream::new(&tokens))
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn from_stream(stream: &mut TokenStream<'_>) -> Result<Self, AbiError> {
        let name = consume_name(stream, Keyword::Struct)?.to_owned();
        let inputs = consume_params(stream, false)?;
        stream.expect_end()?;
        Ok(StructFragment { name, inputs })
    }

    pub fn from_json(json: &JsonFragment) -> Result<Self, AbiError> {
        expect_json_kind(json, &["struct"])?;
        Ok(StructFragment {
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

    pub fn format(&self, format: FormatType) -> String {
        match format {
            FormatType::Json => self.to_json().to_string(),
            FormatType::Sighash => format!("{}{}", self.name, join_params(&self.inputs, format)),
            FormatType::Minimal | FormatType::Full => {
                format!("struct {}{}", self.name, join_params(&self.inputs, format))
            }
        }
    }

    pub fn to_json(&self) -> JsonFragment {
        JsonFragment {
            kind: Some("struct".to_owned()),
            name: Some(self.name.clone()),
            inputs: Some(to_json_params(&self.inputs)),
            ..JsonFragment::default()
        }
    }
}
