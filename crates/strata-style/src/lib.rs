//! Validated style declarations for the strata style engine.
//!
//! # Scope
//!
//! This crate implements the mechanism by which a toolkit declares,
//! validates, merges and applies style properties. It does not define which
//! properties exist; each toolkit builds a [`Schema`] for its own style type.
//!
//! - **Values** - keywords, strings, numbers, colors, lists and shorthand
//!   tuples ([`Value`])
//! - **Choices** - the legal values of one property ([`ChoiceSet`])
//! - **Properties** - scalar and list descriptors ([`PropertyDescriptor`]),
//!   directional shorthands ([`DirectionalProperty`],
//!   [§ 8.3](https://www.w3.org/TR/CSS2/box.html#margin-properties)) and
//!   composite shorthands ([`CompositeProperty`])
//! - **Declarations** - the dict-like [`StyleDeclaration`] trait with
//!   change-driven application to a renderer
//!
//! # Not Yet Implemented
//!
//! - The extended named-color table (hosts can plug in a [`ColorParser`])

/// Choice sets per property.
pub mod choices;
/// Color values and the default color parser per [CSS Color Level 4](https://www.w3.org/TR/css-color-4/).
pub mod color;
/// Composite shorthand properties.
pub mod composite;
/// The dict-like style declaration interface.
pub mod declaration;
/// Directional shorthand properties.
pub mod directional;
/// Error types.
pub mod error;
/// Scalar and list property descriptors.
pub mod property;
/// Per-type property tables.
pub mod schema;
/// Shorthand string helpers.
pub mod shorthand;
/// Property values.
pub mod value;

// Re-exports for convenience
pub use choices::ChoiceSet;
pub use color::{ColorParser, ColorValue, parse_color};
pub use composite::{CompositePlan, CompositeProperty, ShorthandParser};
pub use declaration::{Declaration, StyleDeclaration};
pub use directional::{Direction, DirectionalProperty};
pub use error::{InvalidValue, Result, StyleError};
pub use property::{PropertyDescriptor, PropertyKind, Values};
pub use schema::{PropertyRef, Schema, SchemaBuilder};
pub use value::{Keyword, Value, ValueList};
