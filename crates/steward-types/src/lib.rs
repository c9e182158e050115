//! Shared domain types for Steward.
//!
//! This crate contains the types that cross crate boundaries: platform
//! identifiers, interaction events, the outbound UI component model, and
//! the error taxonomies of the configuration engine.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod component;
pub mod error;
pub mod ids;
pub mod interaction;
