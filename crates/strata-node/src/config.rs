//! Node tree configuration.

use serde::{Deserialize, Serialize};

/// Behavior switches for a [`NodeTree`](crate::NodeTree).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Downgrade [`StyleError::IncompleteBinding`](strata_style::StyleError::IncompleteBinding)
    /// during style/applicator binding to a deprecation warning instead of
    /// an error.
    ///
    /// Hosts whose nodes gain an applicator before they are ready to receive
    /// style values set this while they migrate to initializing nodes fully
    /// first.
    pub allow_incomplete_binding: bool,
}

impl TreeConfig {
    /// Configuration that tolerates incomplete bindings.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            allow_incomplete_binding: true,
        }
    }
}
