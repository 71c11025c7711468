use abi_lexer::{tokenize, Keyword, TokenKind};

use super::{
    consume_name, consume_params, expect_json_kind, join_params, json_name, json_params,
    to_json_params,
};
use crate::digest::{self, Keccak256, SignatureDigest};
use crate::json::JsonFragment;
use crate::param_type::ParamType;
use crate::stream::TokenStream;
use crate::{AbiError, FormatType};

/// An event; its inputs may be `indexed`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventFragment {
    name: String,
    inputs: Box<[ParamType]>,
    anonymous: bool,
}

impl EventFragment {
    pub fn parse(source: &str) -> Result<Self, AbiError> {
        let tokens = tokenize(source)?;
        Self::from_stream(&mut TokenStream::new(&tokens))
    }

    /// `event? Name(params) anonymous?`
    ///
    /// `anonymous` is an identifier, not a keyword, so it stays usable as a
    /// parameter name.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn from_stream(stream: &mut TokenStream<'_>) -> Result<Self, AbiError> {
        let name = consume_name(stream, Keyword::Event)?.to_owned();
        let inputs = consume_params(stream, true)?;
        let anonymous = stream.check(TokenKind::Ident) && stream.peek()?.text == "anonymous";
        if anonymous {
            stream.pop()?;
        }
        stream.expect_end()?;
        Ok(EventFragment {
            name,
            inputs,
            anonymous,
        })
    }

    pub fn from_json(json: &JsonFragment) -> Result<Self, AbiError> {
        expect_json_kind(json, &["event"])?;
        Ok(EventFragment {
            name: json_name(json)?,
            inputs: json_params(json.inputs.as_deref(), true)?,
            anonymous: json.anonymous.unwrap_or(false),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inputs(&self) -> &[ParamType] {
        &self.inputs
    }

    pub fn anonymous(&self) -> bool {
        self.anonymous
    }

    /// Keccak-256 of the sighash signature, `0x` + 64 hex digits.
    pub fn topic_hash(&self) -> String {
        self.topic_hash_with(&Keccak256)
    }

    pub fn topic_hash_with(&self, hasher: &impl SignatureDigest) -> String {
        digest::topic(&self.format(FormatType::Sighash), hasher)
    }

    /// Topic hash of `name(params)` without building a fragment.
    pub fn topic_hash_for(name: &str, params: &[ParamType]) -> String {
        let signature = format!("{name}{}", join_params(params, FormatType::Sighash));
        digest::topic(&signature, &Keccak256)
    }

    pub fn format(&self, format: FormatType) -> String {
        if format == FormatType::Json {
            return self.to_json().to_string();
        }
        let params = join_params(&self.inputs, format);
        if format == FormatType::Sighash {
            return format!("{}{params}", self.name);
        }
        let anonymous = if self.anonymous { " anonymous" } else { "" };
        format!("event {}{params}{anonymous}", self.name)
    }

    pub fn to_json(&self) -> JsonFragment {
        JsonFragment {
            kind: Some("event".to_owned()),
            name: Some(self.name.clone()),
            anonymous: Some(self.anonymous),
            inputs: Some(to_json_params(&self.inputs)),
            ..JsonFragment::default()
        }
    }
}
