//! Directional shorthand properties.
//!
//! [§ 8.3 Margin properties](https://www.w3.org/TR/CSS2/box.html#margin-properties)
//!
//! A directional property such as `margin` is a view over four physical
//! properties (`margin_top`, `margin_right`, `margin_bottom`, `margin_left`).
//! It stores nothing itself.

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::error::{Result, StyleError};
use crate::property::{PropertyDescriptor, Values};
use crate::value::Value;

/// One edge of a box, in shorthand order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    /// The top edge.
    Top,
    /// The right edge.
    Right,
    /// The bottom edge.
    Bottom,
    /// The left edge.
    Left,
}

/// [§ 8.3](https://www.w3.org/TR/CSS2/box.html#margin-properties)
///
/// "If there is only one component value, it applies to all sides. If there
/// are two values, the top and bottom margins are set to the first value and
/// the right and left margins are set to the second. If there are three
/// values, the top is set to the first value, the left and right are set to
/// the second, and the bottom is set to the third. If there are four values,
/// they apply to the top, right, bottom, and left, respectively."
///
/// Indexed by tuple length; each row maps top/right/bottom/left to a tuple
/// position.
const ASSIGNMENT_SCHEMES: [[usize; 4]; 4] = [
    [0, 0, 0, 0],
    [0, 1, 0, 1],
    [0, 1, 2, 1],
    [0, 1, 2, 3],
];

/// A virtual property fanning out to four edge-specific properties.
#[derive(Debug, Clone)]
pub struct DirectionalProperty {
    name: String,
    physical: [String; 4],
}

impl DirectionalProperty {
    /// Define a directional property from a name template.
    ///
    /// `{}` in `template` is replaced with `_top`, `_right`, `_bottom` and
    /// `_left` to name the physical properties.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidTemplate`] if the template has no `{}`.
    pub fn new(name: &str, template: &str) -> Result<Self> {
        if !template.contains("{}") {
            return Err(StyleError::InvalidTemplate(template.to_string()));
        }
        let physical = Direction::iter()
            .map(|direction| template.replacen("{}", &format!("_{direction}"), 1))
            .collect::<Vec<_>>();
        let physical: [String; 4] = physical
            .try_into()
            .map_err(|_| StyleError::InvalidTemplate(template.to_string()))?;
        Ok(Self {
            name: name.to_string(),
            physical,
        })
    }

    /// The shorthand name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The physical property names in top, right, bottom, left order.
    #[must_use]
    pub const fn physical(&self) -> &[String; 4] {
        &self.physical
    }

    /// The physical property name for one edge.
    #[must_use]
    pub fn edge(&self, direction: Direction) -> &str {
        &self.physical[direction as usize]
    }

    /// Read all four edges as a (top, right, bottom, left) tuple.
    #[must_use]
    pub fn read<'a, F>(&self, values: &Values, lookup: F) -> Value
    where
        F: Fn(&str) -> Option<&'a PropertyDescriptor>,
    {
        Value::Tuple(
            self.physical
                .iter()
                .map(|name| lookup(name).map_or(Value::None, |d| d.read(values)))
                .collect(),
        )
    }

    /// Expand a shorthand value into per-edge assignments.
    ///
    /// Anything other than a tuple is broadcast to all four edges.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidShorthand`] for a tuple that is empty or
    /// longer than four items.
    pub fn expand(&self, value: &Value) -> Result<Vec<(&str, Value)>> {
        let items: &[Value] = match value {
            Value::Tuple(items) => items,
            other => std::slice::from_ref(other),
        };
        let scheme = items
            .len()
            .checked_sub(1)
            .and_then(|i| ASSIGNMENT_SCHEMES.get(i))
            .ok_or_else(|| StyleError::InvalidShorthand {
                property: self.name.clone(),
                len: items.len(),
            })?;
        Ok(self
            .physical
            .iter()
            .zip(scheme)
            .map(|(name, &index)| (name.as_str(), items[index].clone()))
            .collect())
    }

    /// Whether any of the four edges is explicitly set.
    #[must_use]
    pub fn is_set(&self, values: &Values) -> bool {
        self.physical.iter().any(|name| values.contains_key(name))
    }
}
