//! Validated property descriptors.
//!
//! A descriptor is the schema-level definition of one property: its name,
//! its choices and its initial value. It is shared by every declaration of
//! the schema; the per-declaration value lives in the declaration's sparse
//! value map, keyed by the property name.

use std::collections::HashMap;

use crate::choices::ChoiceSet;
use crate::error::{Result, StyleError};
use crate::value::{Value, ValueList};

/// Per-declaration storage: explicitly set values keyed by property name.
///
/// Absence means "unset", which reads as the descriptor's initial value.
pub type Values = HashMap<String, Value>;

/// Whether a property holds a single value or a sequence of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// One value validated against the choices.
    Scalar,
    /// A non-empty sequence, each element validated against the choices.
    List,
}

/// A named, validated property of a style schema.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    name: String,
    kind: PropertyKind,
    choices: ChoiceSet,
    initial: Value,
}

impl PropertyDescriptor {
    /// Declare a scalar property.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidInitial`] if `initial` is not one of
    /// the choices.
    pub fn scalar(name: &str, choices: ChoiceSet, initial: Option<Value>) -> Result<Self> {
        Self::declare(name, PropertyKind::Scalar, choices, initial)
    }

    /// Declare a list property.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidInitial`] if `initial` is not a valid
    /// list for the choices.
    pub fn list(name: &str, choices: ChoiceSet, initial: Option<Value>) -> Result<Self> {
        Self::declare(name, PropertyKind::List, choices, initial)
    }

    fn declare(
        name: &str,
        kind: PropertyKind,
        choices: ChoiceSet,
        initial: Option<Value>,
    ) -> Result<Self> {
        let mut descriptor = Self {
            name: name.to_string(),
            kind,
            choices,
            initial: Value::None,
        };
        if let Some(initial) = initial.filter(|v| !v.is_none()) {
            descriptor.initial =
                descriptor
                    .validate(&initial)
                    .map_err(|_| StyleError::InvalidInitial {
                        options: descriptor.choices.to_string(),
                        value: initial,
                    })?;
        }
        Ok(descriptor)
    }

    /// The property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scalar or list.
    #[must_use]
    pub const fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// The property's choices.
    #[must_use]
    pub const fn choices(&self) -> &ChoiceSet {
        &self.choices
    }

    /// The value read while the property is unset.
    #[must_use]
    pub const fn initial(&self) -> &Value {
        &self.initial
    }

    /// Validate and normalize a value for this property.
    ///
    /// # Errors
    ///
    /// Scalars fail with [`StyleError::InvalidValue`]. Lists fail with
    /// [`StyleError::NotASequence`], [`StyleError::EmptySequenceNotAllowed`]
    /// or [`StyleError::InvalidListItem`] naming the offending element.
    pub fn validate(&self, value: &Value) -> Result<Value> {
        match self.kind {
            PropertyKind::Scalar => {
                self.choices
                    .validate(value)
                    .map_err(|err| StyleError::InvalidValue {
                        property: self.name.clone(),
                        value: err.0,
                        options: self.choices.to_string(),
                    })
            }
            PropertyKind::List => self.validate_list(value),
        }
    }

    fn validate_list(&self, value: &Value) -> Result<Value> {
        // A bare string is one item, never a sequence of characters.
        let single;
        let items: &[Value] = match value {
            Value::String(_) | Value::Keyword(_) => {
                single = [value.clone()];
                &single
            }
            Value::List(_) | Value::Tuple(_) => value.as_slice().unwrap_or_default(),
            _ => {
                return Err(StyleError::NotASequence {
                    property: self.name.clone(),
                });
            }
        };

        if items.is_empty() {
            return Err(StyleError::EmptySequenceNotAllowed {
                property: self.name.clone(),
            });
        }

        let normalized = items
            .iter()
            .map(|item| {
                self.choices
                    .validate(item)
                    .map_err(|err| StyleError::InvalidListItem {
                        property: self.name.clone(),
                        value: err.0,
                        options: self.choices.to_string(),
                    })
            })
            .collect::<Result<ValueList>>()?;
        Ok(Value::List(normalized))
    }

    /// The stored value, or the initial value when unset.
    #[must_use]
    pub fn read(&self, values: &Values) -> Value {
        values
            .get(&self.name)
            .cloned()
            .unwrap_or_else(|| self.initial.clone())
    }

    /// Validate and store a value.
    ///
    /// `None` means no value was supplied and is a no-op. Returns the
    /// normalized value when the stored value changed, which the owner must
    /// then apply; writing an unchanged value returns `None`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::NullNotAllowed`] for [`Value::None`] and any
    /// validation error; the stored value is untouched on failure.
    pub fn write(&self, values: &mut Values, value: Option<Value>) -> Result<Option<Value>> {
        let Some(value) = value else {
            return Ok(None);
        };
        if value.is_none() {
            return Err(StyleError::NullNotAllowed {
                property: self.name.clone(),
            });
        }

        let normalized = self.validate(&value)?;
        if values.get(&self.name) == Some(&normalized) {
            return Ok(None);
        }
        let _ = values.insert(self.name.clone(), normalized.clone());
        Ok(Some(normalized))
    }

    /// Forget the stored value, if any.
    ///
    /// Returns the initial value, which the owner applies whether or not a
    /// value was stored.
    pub fn delete(&self, values: &mut Values) -> Value {
        let _ = values.remove(&self.name);
        self.initial.clone()
    }

    /// Whether a value is explicitly stored, even one equal to the initial.
    #[must_use]
    pub fn is_set(&self, values: &Values) -> bool {
        values.contains_key(&self.name)
    }
}
