//! Common utilities for the strata style engine.
//!
//! This crate provides shared infrastructure used by the node crate:
//! - **Warning System** - deduplicated, colored terminal output for
//!   deprecated usage and non-fatal problems

pub mod warning;
