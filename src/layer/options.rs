//! Layer configuration records
//!
//! An `Options` record is the mapping of named, non-structural settings
//! attached to a layer or renderer. Values fall into four categories with
//! distinct copy semantics:
//! - plain data: copied by value
//! - shared references: passed through by reference (aliasing intended)
//! - custom clonable objects: delegated to their own `duplicate`
//! - embedded layers: recursively cloned through the clone engine
//!
//! The record itself never carries group membership; the `"layers"` key is
//! reserved for that and is stripped before configuration copy.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::layer::Layer;

/// The option name reserved for group membership
pub const LAYERS_OPTION: &str = "layers";

/// A value object that knows how to duplicate itself
///
/// The clone engine delegates to `duplicate` rather than reimplementing the
/// value's copy semantics. `as_any` exists so callers can get the concrete
/// type back out of a cloned record.
pub trait Clonable: fmt::Debug + Send + Sync {
    fn duplicate(&self) -> Box<dyn Clonable>;
    fn as_any(&self) -> &dyn Any;
}

/// A single option value
pub enum OptionValue {
    /// Primitives and plain JSON data, copied by value
    Plain(Value),
    /// An opaque reference shared between source and clone
    Shared(Arc<dyn Any + Send + Sync>),
    /// A self-duplicating value object
    Custom(Box<dyn Clonable>),
    /// An embedded layer used as an option (e.g. a bound renderer)
    Layer(Box<Layer>),
}

impl OptionValue {
    pub fn as_plain(&self) -> Option<&Value> {
        match self {
            OptionValue::Plain(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_shared(&self) -> Option<&Arc<dyn Any + Send + Sync>> {
        match self {
            OptionValue::Shared(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn as_custom(&self) -> Option<&dyn Clonable> {
        match self {
            OptionValue::Custom(value) => Some(value.as_ref()),
            _ => None,
        }
    }

    pub fn as_layer(&self) -> Option<&Layer> {
        match self {
            OptionValue::Layer(layer) => Some(layer),
            _ => None,
        }
    }
}

impl fmt::Debug for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Plain(value) => f.debug_tuple("Plain").field(value).finish(),
            OptionValue::Shared(_) => f.write_str("Shared(..)"),
            OptionValue::Custom(value) => f.debug_tuple("Custom").field(value).finish(),
            OptionValue::Layer(layer) => f.debug_tuple("Layer").field(layer).finish(),
        }
    }
}

impl From<Value> for OptionValue {
    fn from(value: Value) -> Self {
        OptionValue::Plain(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Plain(Value::Bool(value))
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Plain(Value::from(value))
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Plain(Value::String(value.to_string()))
    }
}

impl From<Layer> for OptionValue {
    fn from(layer: Layer) -> Self {
        OptionValue::Layer(Box::new(layer))
    }
}

/// A layer configuration record
///
/// An unordered name-to-value mapping. Reading entries never mutates the
/// record; deep-copying one goes through the clone engine so that clonable
/// and layer-typed values detach properly.
#[derive(Debug, Default)]
pub struct Options {
    entries: BTreeMap<String, OptionValue>,
}

impl Options {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing any previous value under the same name
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> &mut Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` entries
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl FromIterator<(String, OptionValue)> for Options {
    fn from_iter<I: IntoIterator<Item = (String, OptionValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
