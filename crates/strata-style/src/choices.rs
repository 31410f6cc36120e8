//! The set of legal values for one property.

use std::fmt;

use crate::color::{ColorParser, ColorValue, parse_color};
use crate::error::InvalidValue;
use crate::value::{Keyword, Value};

/// The legal values for a property: a fixed set of keywords, optionally
/// widened to accept free strings, integers, numbers and colors.
///
/// Immutable once built; schemas share one instance across every
/// declaration of their type.
#[derive(Clone)]
pub struct ChoiceSet {
    constants: Vec<Keyword>,
    string: bool,
    integer: bool,
    number: bool,
    color: bool,
    color_parser: ColorParser,
    options: Vec<String>,
}

impl ChoiceSet {
    /// A choice set accepting exactly the given keywords.
    #[must_use]
    pub fn new(constants: &[Keyword]) -> Self {
        let mut deduped: Vec<Keyword> = Vec::with_capacity(constants.len());
        for &constant in constants {
            if !deduped.contains(&constant) {
                deduped.push(constant);
            }
        }
        let mut set = Self {
            constants: deduped,
            string: false,
            integer: false,
            number: false,
            color: false,
            color_parser: parse_color,
            options: Vec::new(),
        };
        set.render_options();
        set
    }

    /// Also accept free-form strings (trimmed).
    #[must_use]
    pub fn with_string(mut self) -> Self {
        self.string = true;
        self.render_options();
        self
    }

    /// Also accept integers, truncating floats and parsing numeric text.
    #[must_use]
    pub fn with_integer(mut self) -> Self {
        self.integer = true;
        self.render_options();
        self
    }

    /// Also accept floating point numbers.
    #[must_use]
    pub fn with_number(mut self) -> Self {
        self.number = true;
        self.render_options();
        self
    }

    /// Also accept colors, parsed by [`parse_color`].
    #[must_use]
    pub fn with_color(mut self) -> Self {
        self.color = true;
        self.render_options();
        self
    }

    /// Replace the parser used for color candidates.
    #[must_use]
    pub fn with_color_parser(mut self, parser: ColorParser) -> Self {
        self.color_parser = parser;
        self
    }

    /// The keywords this set accepts.
    #[must_use]
    pub fn constants(&self) -> &[Keyword] {
        &self.constants
    }

    /// Rendered option list: sorted keywords, then scalar placeholders.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    fn render_options(&mut self) {
        let mut options: Vec<String> = self.constants.iter().map(ToString::to_string).collect();
        options.sort();
        for (accepted, placeholder) in [
            (self.string, "<string>"),
            (self.integer, "<integer>"),
            (self.number, "<number>"),
            (self.color, "<color>"),
        ] {
            if accepted {
                options.push(placeholder.to_string());
            }
        }
        self.options = options;
    }

    /// Validate and normalize a candidate value.
    ///
    /// Branches are tried in a fixed order and the first that accepts the
    /// value wins: string, integer, number, color, then the keywords. A
    /// branch that can't coerce the value falls through to the next one, so
    /// string acceptance pre-empts color and number parsing.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidValue`] carrying the rejected value when no branch
    /// accepts it.
    pub fn validate(&self, value: &Value) -> Result<Value, InvalidValue> {
        if self.string {
            match value {
                Value::String(s) => return Ok(Value::String(s.trim().to_string())),
                Value::Keyword(k) => return Ok(Value::Keyword(*k)),
                _ => {}
            }
        }
        if self.integer
            && let Some(i) = coerce_integer(value)
        {
            return Ok(Value::Integer(i));
        }
        if self.number
            && let Some(n) = coerce_number(value)
        {
            return Ok(Value::Number(n));
        }
        if self.color
            && let Some(c) = self.coerce_color(value)
        {
            return Ok(Value::Color(c));
        }
        if let Some(constant) = self.constants.iter().find(|c| *value == **c) {
            return Ok(Value::Keyword(*constant));
        }
        Err(InvalidValue(value.clone()))
    }

    fn coerce_color(&self, value: &Value) -> Option<ColorValue> {
        match value {
            Value::Color(c) => Some(*c),
            Value::String(_) | Value::Keyword(_) => value.as_str().and_then(self.color_parser),
            _ => None,
        }
    }
}

/// 2^63, the first float past `i64::MAX`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Integer coercion: integers as is, finite floats truncated toward zero
/// when the result fits in an `i64`, and text that spells an integer.
#[allow(clippy::cast_possible_truncation)]
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(*i),
        Value::Number(n) => {
            let whole = n.trunc();
            (-I64_BOUND..I64_BOUND)
                .contains(&whole)
                .then(|| whole as i64)
        }
        Value::String(_) | Value::Keyword(_) => value.as_str()?.trim().parse().ok(),
        _ => None,
    }
}

#[allow(clippy::cast_precision_loss)]
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(i) => Some(*i as f64),
        Value::Number(n) => Some(*n),
        Value::String(_) | Value::Keyword(_) => value.as_str()?.trim().parse().ok(),
        _ => None,
    }
}

impl fmt::Display for ChoiceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.options.join(", "))
    }
}

impl fmt::Debug for ChoiceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ChoiceSet").field(&self.options).finish()
    }
}
