//! CLI library components for GHG inventory normalization.

#![allow(missing_docs)]

pub mod logging;
pub mod pipeline;
