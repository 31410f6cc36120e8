//! Style schemas: the immutable property table of one style type.
//!
//! A schema is built once per concrete style type, usually into a
//! `static` [`LazyLock`](std::sync::LazyLock), and shared read-only by every
//! declaration of that type.
//!
//! ```
//! use std::sync::LazyLock;
//! use strata_style::{ChoiceSet, Keyword, Schema, Value};
//!
//! const ROW: Keyword = Keyword::new("row");
//! const COLUMN: Keyword = Keyword::new("column");
//!
//! static PACK: LazyLock<Schema> = LazyLock::new(|| {
//!     Schema::builder("Pack")
//!         .property("direction", ChoiceSet::new(&[ROW, COLUMN]), Some(ROW.into()))
//!         .directional("margin", "margin{}", ChoiceSet::new(&[]).with_integer(), Some(0.into()))
//!         .build()
//!         .expect("valid schema")
//! });
//!
//! assert!(PACK.is_known("margin_left"));
//! ```

use std::collections::HashMap;

use crate::choices::ChoiceSet;
use crate::composite::{CompositeProperty, ShorthandParser};
use crate::directional::DirectionalProperty;
use crate::error::{Result, StyleError};
use crate::property::PropertyDescriptor;
use crate::value::Value;

/// A property of any kind, as found by [`Schema::lookup`].
#[derive(Debug, Clone, Copy)]
pub enum PropertyRef<'a> {
    /// A stored scalar or list property.
    Primary(&'a PropertyDescriptor),
    /// A view over four edge properties.
    Directional(&'a DirectionalProperty),
    /// A view over optional and required sub-properties.
    Composite(&'a CompositeProperty),
}

/// The property table of one style type.
#[derive(Debug)]
pub struct Schema {
    name: &'static str,
    properties: Vec<PropertyDescriptor>,
    index: HashMap<String, usize>,
    directional: HashMap<String, DirectionalProperty>,
    composite: HashMap<String, CompositeProperty>,
}

impl Schema {
    /// Start declaring a schema.
    #[must_use]
    pub fn builder(name: &'static str) -> SchemaBuilder {
        SchemaBuilder {
            name,
            entries: Vec::new(),
        }
    }

    /// The style type's name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Stored properties in declaration order. Directional and composite
    /// views are not included.
    #[must_use]
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// A stored property by (underscored) name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.index.get(name).map(|&i| &self.properties[i])
    }

    /// Any property by (underscored) name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<PropertyRef<'_>> {
        if let Some(descriptor) = self.property(name) {
            return Some(PropertyRef::Primary(descriptor));
        }
        if let Some(directional) = self.directional.get(name) {
            return Some(PropertyRef::Directional(directional));
        }
        self.composite.get(name).map(PropertyRef::Composite)
    }

    /// Whether `name` is a property of any kind.
    #[must_use]
    pub fn is_known(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Every property name, views included.
    pub fn all_properties(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .map(PropertyDescriptor::name)
            .chain(self.directional.keys().map(String::as_str))
            .chain(self.composite.keys().map(String::as_str))
    }
}

enum Entry {
    Property(Result<PropertyDescriptor>),
    Directional {
        name: String,
        template: String,
        choices: ChoiceSet,
        initial: Option<Value>,
    },
    Composite(CompositeProperty),
}

/// Collects property declarations; errors are reported by [`build`](Self::build).
pub struct SchemaBuilder {
    name: &'static str,
    entries: Vec<Entry>,
}

impl SchemaBuilder {
    /// Declare a scalar property.
    #[must_use]
    pub fn property(mut self, name: &str, choices: ChoiceSet, initial: Option<Value>) -> Self {
        self.entries
            .push(Entry::Property(PropertyDescriptor::scalar(name, choices, initial)));
        self
    }

    /// Declare a list property.
    #[must_use]
    pub fn list_property(mut self, name: &str, choices: ChoiceSet, initial: Option<Value>) -> Self {
        self.entries
            .push(Entry::Property(PropertyDescriptor::list(name, choices, initial)));
        self
    }

    /// Declare a directional property and its four edge properties, which
    /// share `choices` and `initial`.
    #[must_use]
    pub fn directional(
        mut self,
        name: &str,
        template: &str,
        choices: ChoiceSet,
        initial: Option<Value>,
    ) -> Self {
        self.entries.push(Entry::Directional {
            name: name.to_string(),
            template: template.to_string(),
            choices,
            initial,
        });
        self
    }

    /// Declare a composite property over previously declared properties.
    #[must_use]
    pub fn composite(
        mut self,
        name: &str,
        optional: &[&str],
        required: &[&str],
        parse: Option<ShorthandParser>,
    ) -> Self {
        self.entries.push(Entry::Composite(CompositeProperty::new(
            name, optional, required, parse,
        )));
        self
    }

    /// Finish the schema.
    ///
    /// # Errors
    ///
    /// Returns the first declaration error: an invalid initial value
    /// ([`StyleError::InvalidInitial`]), a reused name
    /// ([`StyleError::DuplicateProperty`]), a template without `{}`
    /// ([`StyleError::InvalidTemplate`]) or a composite over an undeclared
    /// property ([`StyleError::UnknownProperty`]).
    pub fn build(self) -> Result<Schema> {
        let mut schema = Schema {
            name: self.name,
            properties: Vec::new(),
            index: HashMap::new(),
            directional: HashMap::new(),
            composite: HashMap::new(),
        };

        for entry in self.entries {
            match entry {
                Entry::Property(descriptor) => schema.add_property(descriptor?)?,
                Entry::Directional {
                    name,
                    template,
                    choices,
                    initial,
                } => {
                    let directional = DirectionalProperty::new(&name, &template)?;
                    for edge in directional.physical() {
                        let descriptor =
                            PropertyDescriptor::scalar(edge, choices.clone(), initial.clone())?;
                        schema.add_property(descriptor)?;
                    }
                    schema.ensure_unused(&name)?;
                    let _ = schema.directional.insert(name, directional);
                }
                Entry::Composite(composite) => {
                    if let Some(missing) = composite
                        .sub_properties()
                        .find(|sub| schema.property(sub).is_none())
                    {
                        return Err(StyleError::UnknownProperty(missing.to_string()));
                    }
                    schema.ensure_unused(composite.name())?;
                    let _ = schema
                        .composite
                        .insert(composite.name().to_string(), composite);
                }
            }
        }
        Ok(schema)
    }
}

impl Schema {
    fn ensure_unused(&self, name: &str) -> Result<()> {
        if self.is_known(name) {
            return Err(StyleError::DuplicateProperty(name.to_string()));
        }
        Ok(())
    }

    fn add_property(&mut self, descriptor: PropertyDescriptor) -> Result<()> {
        self.ensure_unused(descriptor.name())?;
        let _ = self
            .index
            .insert(descriptor.name().to_string(), self.properties.len());
        self.properties.push(descriptor);
        Ok(())
    }
}
