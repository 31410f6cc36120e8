//! Error types for style declarations.

use thiserror::Error;

use crate::value::Value;

/// A value was rejected by every branch of a [`ChoiceSet`](crate::ChoiceSet).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0:?} is not a valid value")]
pub struct InvalidValue(pub Value);

/// Errors raised while declaring, reading or writing style properties.
///
/// Every failure leaves the declaration exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    /// The value is not one of the property's choices.
    #[error("Invalid value {value:?} for property {property}; Valid values are: {options}")]
    InvalidValue {
        /// Property being written.
        property: String,
        /// The rejected value.
        value: Value,
        /// Rendered option list of the property's choices.
        options: String,
    },

    /// One element of a list value is not one of the property's choices.
    #[error("Invalid item value {value:?} for list property {property}; Valid values are: {options}")]
    InvalidListItem {
        /// Property being written.
        property: String,
        /// The rejected element.
        value: Value,
        /// Rendered option list of the property's choices.
        options: String,
    },

    /// A property was declared with an initial value its choices reject.
    #[error("Invalid initial value {value:?}. Available choices: {options}")]
    InvalidInitial {
        /// The rejected initial value.
        value: Value,
        /// Rendered option list of the property's choices.
        options: String,
    },

    /// The name is not a property of the declaration's schema.
    #[error("Unknown style {0}")]
    UnknownProperty(String),

    /// [`Value::None`] was written; properties are reset by deleting them.
    #[error("None cannot be used as a style value; to reset a property, delete `{property}`")]
    NullNotAllowed {
        /// Property being written.
        property: String,
    },

    /// An empty sequence was written to a list property.
    #[error("List properties cannot be set to an empty sequence; to reset a property, delete `{property}`")]
    EmptySequenceNotAllowed {
        /// Property being written.
        property: String,
    },

    /// A list property was given something that isn't a sequence or string.
    #[error("Value for list property {property} must be a sequence")]
    NotASequence {
        /// Property being written.
        property: String,
    },

    /// A shorthand tuple had the wrong number of items.
    #[error("Invalid value for '{property}'; a shorthand of {len} values is not accepted")]
    InvalidShorthand {
        /// Property being written.
        property: String,
        /// Number of values supplied.
        len: usize,
    },

    /// A shorthand string could not be split into values.
    #[error("Invalid shorthand string: {0}")]
    InvalidShorthandString(String),

    /// Two properties of one schema share a name.
    #[error("Property {0} is declared more than once")]
    DuplicateProperty(String),

    /// A directional property template has no `{{}}` placeholder.
    #[error("Directional template {0:?} has no '{{}}' placeholder")]
    InvalidTemplate(String),

    /// A style could not push a value because its applicator is not fully
    /// wired yet.
    #[error("Style is not ready to apply {0}")]
    IncompleteBinding(String),
}

/// Result type for style operations.
pub type Result<T> = std::result::Result<T, StyleError>;
