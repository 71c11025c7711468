//! Rendering of parameter types.

use std::fmt;

use super::{array_suffix, ParamKind, ParamType};
use crate::json::JsonParam;
use crate::FormatType;

impl ParamType {
    /// Render in the given format.
    ///
    /// `Json` yields the serialized interchange object; the text formats
    /// yield a parameter as it would appear inside a signature.
    pub fn format(&self, format: FormatType) -> String {
        if format == FormatType::Json {
            return self.to_json().to_string();
        }
        let mut out = String::with_capacity(self.ty.len());
        self.write_type(&mut out, format);
        if format != FormatType::Sighash {
            if self.indexed == Some(true) {
                out.push_str(" indexed");
            }
            if format == FormatType::Full && !self.name.is_empty() {
                out.push(' ');
                out.push_str(&self.name);
            }
        }
        out
    }

    fn write_type(&self, out: &mut String, format: FormatType) {
        match &self.kind {
            ParamKind::Elementary => out.push_str(&self.ty),
            ParamKind::Array { length, children } => {
                children.write_type(out, format);
                out.push_str(&array_suffix(*length));
            }
            ParamKind::Tuple { components } => {
                if format != FormatType::Sighash {
                    out.push_str("tuple");
                }
                out.push('(');
                for (i, component) in components.iter().enumerate() {
                    if i > 0 {
                        out.push_str(format.separator());
                    }
                    out.push_str(&component.format(format));
                }
                out.push(')');
            }
        }
    }

    /// The interchange object for this type.
    ///
    /// `name` is always present; `indexed` only when the type was built in an
    /// indexable context.
    pub fn to_json(&self) -> JsonParam {
        let mut json = match &self.kind {
            ParamKind::Elementary => JsonParam {
                ty: self.ty.clone(),
                ..JsonParam::default()
            },
            ParamKind::Array { length, children } => {
                let mut inner = children.to_json();
                inner.ty.push_str(&array_suffix(*length));
                inner
            }
            ParamKind::Tuple { components } => JsonParam {
                ty: "tuple".to_owned(),
                components: Some(components.iter().map(ParamType::to_json).collect()),
                ..JsonParam::default()
            },
        };
        json.name = Some(self.name.clone());
        json.indexed = self.indexed;
        json
    }
}

impl fmt::Display for ParamType {
    /// Formats as `FormatType::Full`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(FormatType::Full))
    }
}
