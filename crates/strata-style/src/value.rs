//! Style values.
//!
//! Property values are dynamic: the same declaration holds keywords, free
//! strings, numbers, colors and sequences side by side, so they share one
//! [`Value`] type. Comparison follows value semantics rather than variant
//! identity: a keyword equals a string with the same text, and an integer
//! equals a number with the same magnitude. Property writes rely on this to
//! decide whether a normalized value actually changed.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::color::ColorValue;

/// A symbolic constant a property can take, such as `bold` or `sans-serif`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Keyword(&'static str);

impl Keyword {
    /// Declare a keyword.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The keyword text exactly as declared.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Keywords render lower-cased, with underscores as hyphens.
impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_lowercase().replace('_', "-"))
    }
}

/// An immutable, cheaply cloned sequence of values.
///
/// This is the normalized form of every list property.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueList(Arc<[Value]>);

impl ValueList {
    /// The items as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }
}

impl Deref for ValueList {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

impl FromIterator<Value> for ValueList {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for ValueList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

/// A property value.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// No value. Unset properties without an initial value read as this; it
    /// can never be written.
    None,
    /// A symbolic constant.
    Keyword(Keyword),
    /// A free-form string.
    String(String),
    /// An integer.
    Integer(i64),
    /// A floating point number.
    Number(f64),
    /// A parsed color.
    Color(ColorValue),
    /// The normalized value of a list property.
    List(ValueList),
    /// A shorthand tuple, read from or written to directional and
    /// composite properties.
    Tuple(Vec<Value>),
}

impl Value {
    /// Build a list value.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a shorthand tuple.
    pub fn tuple<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Self>,
    {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Whether this is [`Value::None`].
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The text of a keyword or string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Keyword(k) => Some(k.as_str()),
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The value as an integer, if it is one.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The value as a float, if it is numeric.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a color, if it is one.
    #[must_use]
    pub const fn as_color(&self) -> Option<ColorValue> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// The items of a list or tuple.
    #[must_use]
    pub fn as_slice(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            Self::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    #[allow(clippy::cast_precision_loss, clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Keyword(a), Self::Keyword(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Keyword(k), Self::String(s)) | (Self::String(s), Self::Keyword(k)) => {
                k.as_str() == s
            }
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Integer(i), Self::Number(n)) | (Self::Number(n), Self::Integer(i)) => {
                *i as f64 == *n
            }
            (Self::Color(a), Self::Color(b)) => a == b,
            (Self::List(_) | Self::Tuple(_), Self::List(_) | Self::Tuple(_)) => {
                self.as_slice() == other.as_slice()
            }
            _ => false,
        }
    }
}

impl PartialEq<Keyword> for Value {
    fn eq(&self, other: &Keyword) -> bool {
        self.as_str() == Some(other.as_str())
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        *self == Self::Integer(*other)
    }
}

/// Quote list items that would otherwise be ambiguous in a comma-separated
/// rendering.
fn write_list_item(f: &mut fmt::Formatter<'_>, item: &Value) -> fmt::Result {
    match item {
        Value::String(s) if s.contains(|c: char| c.is_whitespace() || c == ',') => {
            write!(f, "\"{}\"", s.replace('"', "\\\""))
        }
        other => write!(f, "{other}"),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Keyword(k) => write!(f, "{k}"),
            Self::String(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Color(c) => write!(f, "{c}"),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_list_item(f, item)?;
                }
                Ok(())
            }
            Self::Tuple(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversions
// ─────────────────────────────────────────────────────────────────────────────

impl From<Keyword> for Value {
    fn from(k: Keyword) -> Self {
        Self::Keyword(k)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<ColorValue> for Value {
    fn from(c: ColorValue) -> Self {
        Self::Color(c)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items.into_iter().collect())
    }
}

impl<A: Into<Self>, B: Into<Self>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Self::Tuple(vec![a.into(), b.into()])
    }
}

impl<A: Into<Self>, B: Into<Self>, C: Into<Self>> From<(A, B, C)> for Value {
    fn from((a, b, c): (A, B, C)) -> Self {
        Self::Tuple(vec![a.into(), b.into(), c.into()])
    }
}

impl<A: Into<Self>, B: Into<Self>, C: Into<Self>, D: Into<Self>> From<(A, B, C, D)> for Value {
    fn from((a, b, c, d): (A, B, C, D)) -> Self {
        Self::Tuple(vec![a.into(), b.into(), c.into(), d.into()])
    }
}

impl<A: Into<Self>, B: Into<Self>, C: Into<Self>, D: Into<Self>, E: Into<Self>> From<(A, B, C, D, E)>
    for Value
{
    fn from((a, b, c, d, e): (A, B, C, D, E)) -> Self {
        Self::Tuple(vec![a.into(), b.into(), c.into(), d.into(), e.into()])
    }
}
