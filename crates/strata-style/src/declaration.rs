//! Style declarations: the dict-like interface over a schema's properties.
//!
//! A concrete style type owns a [`Declaration`] (its per-instance values
//! and applicator binding) and implements [`StyleDeclaration`] by telling
//! the engine where that declaration lives and how to [`apply`] a value to
//! its applicator. Everything else (validation, shorthand expansion,
//! iteration, copying, merging, rendering) is provided.
//!
//! [`apply`]: StyleDeclaration::apply

use std::fmt;
use std::rc::Rc;

use crate::error::{Result, StyleError};
use crate::property::{PropertyDescriptor, Values};
use crate::schema::{PropertyRef, Schema};
use crate::value::Value;

/// Per-instance state of a style: explicitly set values and the applicator
/// the style pushes them to.
pub struct Declaration<A: ?Sized> {
    schema: &'static Schema,
    values: Values,
    applicator: Option<Rc<A>>,
}

impl<A: ?Sized> Declaration<A> {
    /// An empty declaration of `schema`, with no applicator bound.
    #[must_use]
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            values: Values::new(),
            applicator: None,
        }
    }

    /// The schema this declaration follows.
    #[must_use]
    pub const fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// The explicitly set values.
    #[must_use]
    pub const fn values(&self) -> &Values {
        &self.values
    }

    /// The bound applicator, if any.
    #[must_use]
    pub const fn applicator(&self) -> Option<&Rc<A>> {
        self.applicator.as_ref()
    }
}

impl<A: ?Sized> fmt::Debug for Declaration<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Declaration")
            .field("schema", &self.schema.name())
            .field("values", &self.values)
            .field("bound", &self.applicator.is_some())
            .finish()
    }
}

/// External names may use hyphens; properties are stored with underscores.
fn normalize_name(name: &str) -> String {
    name.replace('-', "_")
}

fn unknown(name: &str) -> StyleError {
    StyleError::UnknownProperty(name.to_string())
}

fn write_property<S: StyleDeclaration>(
    style: &mut S,
    descriptor: &PropertyDescriptor,
    value: Option<Value>,
) -> Result<()> {
    if let Some(normalized) = descriptor.write(&mut style.declaration_mut().values, value)? {
        style.apply(descriptor.name(), &normalized)?;
    }
    Ok(())
}

fn delete_property<S: StyleDeclaration>(style: &mut S, descriptor: &PropertyDescriptor) -> Result<()> {
    let initial = descriptor.delete(&mut style.declaration_mut().values);
    style.apply(descriptor.name(), &initial)
}

/// Validate a value for a property without storing it.
fn stage(descriptor: &PropertyDescriptor, value: &Value) -> Result<Value> {
    if value.is_none() {
        return Err(StyleError::NullNotAllowed {
            property: descriptor.name().to_string(),
        });
    }
    descriptor.validate(value)
}

/// The dict-like contract of a style type.
///
/// Names given to the provided methods may use hyphens (`margin-top`) or
/// underscores (`margin_top`).
///
/// ```
/// use std::sync::LazyLock;
/// use strata_style::{ChoiceSet, Declaration, Schema, StyleDeclaration, Value};
///
/// static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
///     Schema::builder("Box")
///         .directional("margin", "margin{}", ChoiceSet::new(&[]).with_integer(), Some(0.into()))
///         .build()
///         .expect("valid schema")
/// });
///
/// struct BoxStyle(Declaration<()>);
///
/// impl Default for BoxStyle {
///     fn default() -> Self {
///         Self(Declaration::new(&SCHEMA))
///     }
/// }
///
/// impl StyleDeclaration for BoxStyle {
///     type Applicator = ();
///     fn declaration(&self) -> &Declaration<()> { &self.0 }
///     fn declaration_mut(&mut self) -> &mut Declaration<()> { &mut self.0 }
///     fn apply(&self, _name: &str, _value: &Value) -> strata_style::Result<()> { Ok(()) }
/// }
///
/// let mut style = BoxStyle::default();
/// style.set("margin", (1, 2)).unwrap();
/// assert_eq!(style.get("margin").unwrap(), Value::from((1, 2, 1, 2)));
/// assert_eq!(style.to_css(), "margin-bottom: 1; margin-left: 2; margin-right: 2; margin-top: 1");
/// ```
pub trait StyleDeclaration: Default {
    /// The renderer handle this style pushes values to.
    type Applicator: ?Sized;

    /// The per-instance state.
    fn declaration(&self) -> &Declaration<Self::Applicator>;

    /// The per-instance state, mutably.
    fn declaration_mut(&mut self) -> &mut Declaration<Self::Applicator>;

    /// Push one normalized property value to the bound applicator, if any.
    ///
    /// Called after every change to a stored property, and for every set
    /// property by [`reapply`](Self::reapply).
    ///
    /// # Errors
    ///
    /// Implementations return [`StyleError::IncompleteBinding`] when the
    /// applicator exists but is not ready to receive values yet.
    fn apply(&self, name: &str, value: &Value) -> Result<()>;

    /// The schema of this style type.
    fn schema(&self) -> &'static Schema {
        self.declaration().schema()
    }

    /// Read a property. Unset properties read as their initial value;
    /// directional and composite properties read as tuples.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownProperty`] for a name not in the schema.
    fn get(&self, name: &str) -> Result<Value> {
        let name = normalize_name(name);
        let schema = self.schema();
        let values = self.declaration().values();
        match schema.lookup(&name).ok_or_else(|| unknown(&name))? {
            PropertyRef::Primary(descriptor) => Ok(descriptor.read(values)),
            PropertyRef::Directional(directional) => {
                Ok(directional.read(values, |n| schema.property(n)))
            }
            PropertyRef::Composite(composite) => Ok(composite.read(values, |n| schema.property(n))),
        }
    }

    /// Write a property, applying every stored value that changes.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownProperty`] for a name not in the schema,
    /// any validation error of the value, or an error from
    /// [`apply`](Self::apply). Validation failures leave the style untouched.
    fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.assign(name, Some(value.into()))
    }

    /// Write a property if a value was supplied; `None` is a no-op.
    ///
    /// # Errors
    ///
    /// As [`set`](Self::set).
    fn assign(&mut self, name: &str, value: Option<Value>) -> Result<()> {
        let name = normalize_name(name);
        let schema = self.schema();
        let property = schema.lookup(&name).ok_or_else(|| unknown(&name))?;
        if let PropertyRef::Primary(descriptor) = property {
            return write_property(self, descriptor, value);
        }

        let Some(value) = value else {
            return Ok(());
        };
        if value.is_none() {
            return Err(StyleError::NullNotAllowed { property: name });
        }

        match property {
            PropertyRef::Primary(_) => Ok(()),
            PropertyRef::Directional(directional) => {
                let staged = directional
                    .expand(&value)?
                    .into_iter()
                    .map(|(edge, item)| {
                        let descriptor = schema.property(edge).ok_or_else(|| unknown(edge))?;
                        Ok((descriptor, stage(descriptor, &item)?))
                    })
                    .collect::<Result<Vec<_>>>()?;
                for (descriptor, normalized) in staged {
                    write_property(self, descriptor, Some(normalized))?;
                }
                Ok(())
            }
            PropertyRef::Composite(composite) => {
                let plan = composite.plan(&value, |n| schema.property(n))?;
                for reset in &plan.resets {
                    let descriptor = schema.property(reset).ok_or_else(|| unknown(reset))?;
                    delete_property(self, descriptor)?;
                }
                for (sub, normalized) in plan.writes {
                    let descriptor = schema.property(&sub).ok_or_else(|| unknown(&sub))?;
                    write_property(self, descriptor, Some(normalized))?;
                }
                Ok(())
            }
        }
    }

    /// Reset a property to its initial value.
    ///
    /// The initial value is applied even if the property was not set.
    /// Directional and composite properties reset all their sub-properties.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownProperty`] for a name not in the schema,
    /// or an error from [`apply`](Self::apply).
    fn delete(&mut self, name: &str) -> Result<()> {
        let name = normalize_name(name);
        let schema = self.schema();
        let subs: Vec<&str> = match schema.lookup(&name).ok_or_else(|| unknown(&name))? {
            PropertyRef::Primary(descriptor) => return delete_property(self, descriptor),
            PropertyRef::Directional(directional) => {
                directional.physical().iter().map(String::as_str).collect()
            }
            PropertyRef::Composite(composite) => composite.sub_properties().collect(),
        };
        for sub in subs {
            let descriptor = schema.property(sub).ok_or_else(|| unknown(sub))?;
            delete_property(self, descriptor)?;
        }
        Ok(())
    }

    /// Whether the property is known and explicitly set. A directional or
    /// composite property counts as set if any sub-property is.
    fn contains(&self, name: &str) -> bool {
        let values = self.declaration().values();
        match self.schema().lookup(&normalize_name(name)) {
            Some(PropertyRef::Primary(descriptor)) => descriptor.is_set(values),
            Some(PropertyRef::Directional(directional)) => directional.is_set(values),
            Some(PropertyRef::Composite(composite)) => composite.is_set(values),
            None => false,
        }
    }

    /// Names of the set stored properties, in schema order.
    fn keys(&self) -> Vec<&'static str> {
        let values = self.declaration().values();
        self.schema()
            .properties()
            .iter()
            .filter(|descriptor| descriptor.is_set(values))
            .map(PropertyDescriptor::name)
            .collect()
    }

    /// Names and values of the set stored properties, in schema order.
    fn items(&self) -> Vec<(&'static str, Value)> {
        let values = self.declaration().values();
        self.schema()
            .properties()
            .iter()
            .filter(|descriptor| descriptor.is_set(values))
            .map(|descriptor| (descriptor.name(), descriptor.read(values)))
            .collect()
    }

    /// Number of set stored properties.
    fn len(&self) -> usize {
        self.declaration().values().len()
    }

    /// Whether no property is set.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write several properties.
    ///
    /// Every name is checked before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownProperty`] before any write if a name is
    /// not in the schema; otherwise the first error of [`set`](Self::set).
    fn update<I, K, V>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let values: Vec<(K, V)> = values.into_iter().collect();
        let schema = self.schema();
        if let Some((name, _)) = values
            .iter()
            .find(|(name, _)| !schema.is_known(&normalize_name(name.as_ref())))
        {
            return Err(unknown(name.as_ref()));
        }
        for (name, value) in values {
            self.set(name.as_ref(), value)?;
        }
        Ok(())
    }

    /// A new style of the same type holding the same set values.
    ///
    /// The copy is not bound to this style's applicator.
    ///
    /// # Errors
    ///
    /// Returns any error of the copy's [`apply`](Self::apply).
    fn copy(&self) -> Result<Self> {
        let mut dup = Self::default();
        dup.update(self.items())?;
        Ok(dup)
    }

    /// A copy of this style with `other`'s set values written over it.
    ///
    /// # Errors
    ///
    /// As [`copy`](Self::copy).
    fn merged(&self, other: &Self) -> Result<Self> {
        self.merged_with(other.items())
    }

    /// A copy of this style with a name/value mapping written over it.
    ///
    /// # Errors
    ///
    /// As [`update`](Self::update).
    fn merged_with<I, K, V>(&self, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut result = self.copy()?;
        result.update(values)?;
        Ok(result)
    }

    /// Write `other`'s set values over this style.
    ///
    /// # Errors
    ///
    /// As [`update`](Self::update).
    fn merge_from(&mut self, other: &Self) -> Result<()> {
        self.update(other.items())
    }

    /// Render the set stored properties as `name: value` pairs, sorted by
    /// name, with hyphenated names.
    fn to_css(&self) -> String {
        let mut items = self.items();
        items.sort_by(|(a, _), (b, _)| a.cmp(b));
        items
            .iter()
            .map(|(name, value)| format!("{}: {value}", name.replace('_', "-")))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// The applicator this style is bound to.
    fn applicator(&self) -> Option<&Rc<Self::Applicator>> {
        self.declaration().applicator()
    }

    /// Bind (or unbind) the applicator this style pushes values to.
    fn bind_applicator(&mut self, applicator: Option<Rc<Self::Applicator>>) {
        self.declaration_mut().applicator = applicator;
    }

    /// Apply every set stored property again, to bring a newly attached
    /// applicator up to date.
    ///
    /// # Errors
    ///
    /// Returns the first error of [`apply`](Self::apply).
    fn reapply(&self) -> Result<()> {
        for (name, value) in self.items() {
            self.apply(name, &value)?;
        }
        Ok(())
    }
}
