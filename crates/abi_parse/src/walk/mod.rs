//! Shape-preserving traversal of values against a [`ParamType`].
//!
//! Values are `serde_json::Value` trees: arrays are sequences, tuples are
//! sequences or keyed objects. The walker checks the shape at every node and
//! hands each elementary leaf to a caller-supplied transform; the result has
//! exactly the shape of the input.
//!
//! The async walker plans the whole tree first, collecting one future per
//! leaf in depth-first order, then awaits them together. Completion order
//! does not matter: results are put back by position.

use std::future::Future;

use futures::future::try_join_all;
use serde_json::{Map, Value};

use crate::param_type::{ParamKind, ParamType};
use crate::AbiError;

/// The elements of a tuple value, and whether it arrived keyed by name.
struct TupleValues<'v> {
    values: Vec<&'v Value>,
    keyed: bool,
}

impl ParamType {
    /// Rebuild `value` with every elementary leaf replaced by
    /// `leaf(type, value)`.
    ///
    /// Fails with [`AbiError::ShapeMismatch`] (converted into `E`) when the
    /// value does not fit the type.
    pub fn walk<F, E>(&self, value: &Value, mut leaf: F) -> Result<Value, E>
    where
        F: FnMut(&str, &Value) -> Result<Value, E>,
        E: From<AbiError>,
    {
        self.walk_node(value, &mut leaf)
    }

    fn walk_node<F, E>(&self, value: &Value, leaf: &mut F) -> Result<Value, E>
    where
        F: FnMut(&str, &Value) -> Result<Value, E>,
        E: From<AbiError>,
    {
        match self.kind() {
            ParamKind::Elementary => leaf(self.ty(), value),
            ParamKind::Array { length, children } => {
                let items = self.sequence(value, *length)?;
                items
                    .iter()
                    .map(|item| children.walk_node(item, leaf))
                    .collect::<Result<Vec<_>, E>>()
                    .map(Value::Array)
            }
            ParamKind::Tuple { components } => {
                let entries = self.tuple_values(components, value)?;
                let results = components
                    .iter()
                    .zip(entries.values)
                    .map(|(component, item)| component.walk_node(item, leaf))
                    .collect::<Result<Vec<_>, E>>()?;
                Ok(reassemble(components, results, entries.keyed))
            }
        }
    }

    /// Async form of [`walk`](Self::walk).
    ///
    /// Every leaf future is created during a single pass over the value and
    /// then awaited jointly. The first failing leaf fails the whole walk and
    /// no partial value is returned.
    pub async fn walk_async<'a, F, Fut, E>(
        &'a self,
        value: &Value,
        mut leaf: F,
    ) -> Result<Value, E>
    where
        F: FnMut(&'a str, Value) -> Fut,
        Fut: Future<Output = Result<Value, E>>,
        E: From<AbiError>,
    {
        let mut pending = Vec::new();
        let plan = self.plan(value, &mut leaf, &mut pending)?;
        tracing::trace!(leaves = pending.len(), "awaiting leaf transforms");
        let mut resolved = try_join_all(pending).await?;
        Ok(plan.assemble(&mut resolved))
    }

    fn plan<'a, F, Fut>(
        &'a self,
        value: &Value,
        leaf: &mut F,
        pending: &mut Vec<Fut>,
    ) -> Result<Slot, AbiError>
    where
        F: FnMut(&'a str, Value) -> Fut,
    {
        match self.kind() {
            ParamKind::Elementary => {
                pending.push(leaf(self.ty(), value.clone()));
                Ok(Slot::Leaf(pending.len() - 1))
            }
            ParamKind::Array { length, children } => self
                .sequence(value, *length)?
                .iter()
                .map(|item| children.plan(item, leaf, pending))
                .collect::<Result<Vec<_>, _>>()
                .map(Slot::Seq),
            ParamKind::Tuple { components } => {
                let entries = self.tuple_values(components, value)?;
                let slots = components
                    .iter()
                    .zip(entries.values)
                    .map(|(component, item)| component.plan(item, leaf, pending))
                    .collect::<Result<Vec<_>, _>>()?;
                if entries.keyed {
                    let names = components.iter().map(|c| c.name().to_owned());
                    Ok(Slot::Keyed(names.zip(slots).collect()))
                } else {
                    Ok(Slot::Seq(slots))
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Shape checks
    // ─────────────────────────────────────────────────────────────────────────

    fn sequence<'v>(
        &self,
        value: &'v Value,
        length: Option<usize>,
    ) -> Result<&'v [Value], AbiError> {
        let Value::Array(items) = value else {
            return Err(AbiError::shape(self.ty(), "expected an array"));
        };
        match length {
            Some(expected) if items.len() != expected => Err(AbiError::shape(
                self.ty(),
                format!("expected {expected} elements, found {}", items.len()),
            )),
            _ => Ok(items),
        }
    }

    fn tuple_values<'v>(
        &self,
        components: &[ParamType],
        value: &'v Value,
    ) -> Result<TupleValues<'v>, AbiError> {
        match value {
            Value::Array(items) => {
                if items.len() != components.len() {
                    return Err(AbiError::shape(
                        self.ty(),
                        format!(
                            "expected {} components, found {}",
                            components.len(),
                            items.len()
                        ),
                    ));
                }
                Ok(TupleValues {
                    values: items.iter().collect(),
                    keyed: false,
                })
            }
            Value::Object(map) => {
                let values = components
                    .iter()
                    .map(|component| {
                        let name = component.name();
                        if name.is_empty() {
                            return Err(AbiError::shape(
                                self.ty(),
                                "cannot use object values with unnamed components",
                            ));
                        }
                        map.get(name).ok_or_else(|| {
                            AbiError::shape(self.ty(), format!("missing key {name:?}"))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TupleValues {
                    values,
                    keyed: true,
                })
            }
            _ => Err(AbiError::shape(self.ty(), "expected an array or object")),
        }
    }
}

fn reassemble(components: &[ParamType], results: Vec<Value>, keyed: bool) -> Value {
    if keyed {
        let map: Map<String, Value> = components
            .iter()
            .map(|c| c.name().to_owned())
            .zip(results)
            .collect();
        Value::Object(map)
    } else {
        Value::Array(results)
    }
}

/// Where each resolved leaf goes back into the value tree.
enum Slot {
    Leaf(usize),
    Seq(Vec<Slot>),
    Keyed(Vec<(String, Slot)>),
}

impl Slot {
    fn assemble(self, resolved: &mut [Value]) -> Value {
        match self {
            Slot::Leaf(index) => std::mem::take(&mut resolved[index]),
            Slot::Seq(slots) => {
                Value::Array(slots.into_iter().map(|s| s.assemble(resolved)).collect())
            }
            Slot::Keyed(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(name, slot)| (name, slot.assemble(resolved)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests;
