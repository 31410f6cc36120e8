//! Composite shorthand properties.
//!
//! [§ 3.7 font shorthand](https://www.w3.org/TR/css-fonts-4/#font-prop)
//!
//! A composite property such as `font` is a view over several existing
//! properties: some optional, which may be given in any order, followed by
//! some required, which must be given in order.

use crate::error::{Result, StyleError};
use crate::property::{PropertyDescriptor, Values};
use crate::value::Value;

/// Splits a shorthand string into the values of a composite property.
pub type ShorthandParser = fn(&str) -> Result<Vec<Value>>;

/// The effect of writing a composite property: properties to reset, then
/// normalized values to write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositePlan {
    /// Optional properties that were not mentioned.
    pub resets: Vec<String>,
    /// Properties and their normalized values.
    pub writes: Vec<(String, Value)>,
}

/// A virtual property over optional and required sub-properties.
#[derive(Debug, Clone)]
pub struct CompositeProperty {
    name: String,
    optional: Vec<String>,
    required: Vec<String>,
    parse: Option<ShorthandParser>,
}

impl CompositeProperty {
    /// Define a composite property.
    ///
    /// `parse` splits string assignments into values; without it a string is
    /// treated as a single value.
    #[must_use]
    pub fn new(
        name: &str,
        optional: &[&str],
        required: &[&str],
        parse: Option<ShorthandParser>,
    ) -> Self {
        Self {
            name: name.to_string(),
            optional: optional.iter().map(ToString::to_string).collect(),
            required: required.iter().map(ToString::to_string).collect(),
            parse,
        }
    }

    /// The shorthand name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every sub-property, optional ones first.
    pub fn sub_properties(&self) -> impl Iterator<Item = &str> {
        self.optional
            .iter()
            .chain(&self.required)
            .map(String::as_str)
    }

    /// Read every sub-property into a tuple, optional ones first.
    #[must_use]
    pub fn read<'a, F>(&self, values: &Values, lookup: F) -> Value
    where
        F: Fn(&str) -> Option<&'a PropertyDescriptor>,
    {
        Value::Tuple(
            self.sub_properties()
                .map(|name| lookup(name).map_or(Value::None, |d| d.read(values)))
                .collect(),
        )
    }

    /// Work out which sub-properties a value assigns, validating everything
    /// before anything is written.
    ///
    /// Trailing values go to the required properties in order. Each leading
    /// value goes to an optional property that accepts it; the values with
    /// the fewest candidates are placed first, each taking its first free
    /// candidate.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidShorthand`] for the wrong number of
    /// values, [`StyleError::InvalidValue`] when an optional value fits no
    /// free property, and any error of the shorthand parser or of the
    /// required properties' validation.
    pub fn plan<'a, F>(&self, value: &Value, lookup: F) -> Result<CompositePlan>
    where
        F: Fn(&str) -> Option<&'a PropertyDescriptor>,
    {
        let items = match (value, self.parse) {
            (Value::String(text), Some(parse)) => parse(text)?,
            (Value::Tuple(items), _) => items.clone(),
            (other, _) => vec![other.clone()],
        };

        let max = self.optional.len() + self.required.len();
        if !(self.required.len()..=max).contains(&items.len()) {
            return Err(StyleError::InvalidShorthand {
                property: self.name.clone(),
                len: items.len(),
            });
        }

        let descriptor = |name: &str| {
            lookup(name).ok_or_else(|| StyleError::UnknownProperty(name.to_string()))
        };

        let (optional_vals, required_vals) = items.split_at(items.len() - self.required.len());

        let mut writes: Vec<(String, Value)> = Vec::with_capacity(items.len());
        for (name, item) in self.required.iter().zip(required_vals) {
            writes.push((name.clone(), descriptor(name)?.validate(item)?));
        }

        let mut candidates: Vec<(&Value, Vec<(&str, Value)>)> = Vec::new();
        for item in optional_vals {
            let mut valid = Vec::new();
            for name in &self.optional {
                if let Ok(normalized) = descriptor(name)?.validate(item) {
                    valid.push((name.as_str(), normalized));
                }
            }
            if valid.is_empty() {
                return Err(self.unplaceable(item));
            }
            candidates.push((item, valid));
        }
        candidates.sort_by_key(|(_, valid)| valid.len());

        let mut staged: Vec<&str> = Vec::new();
        for (item, valid) in candidates {
            let (name, normalized) = valid
                .into_iter()
                .find(|(name, _)| !staged.contains(name))
                .ok_or_else(|| self.unplaceable(item))?;
            staged.push(name);
            writes.push((name.to_string(), normalized));
        }

        let resets = self
            .optional
            .iter()
            .filter(|name| !staged.contains(&name.as_str()))
            .cloned()
            .collect();

        Ok(CompositePlan { resets, writes })
    }

    fn unplaceable(&self, item: &Value) -> StyleError {
        StyleError::InvalidValue {
            property: self.name.clone(),
            value: item.clone(),
            options: format!("one value each for {}", self.optional.join(", ")),
        }
    }

    /// Whether any sub-property is explicitly set.
    #[must_use]
    pub fn is_set(&self, values: &Values) -> bool {
        self.sub_properties().any(|name| values.contains_key(name))
    }
}
