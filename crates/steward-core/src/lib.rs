//! Configuration engine and engine ports for Steward.
//!
//! This crate defines the generic per-guild configuration engine: option
//! model, manifest, store abstraction, prompt flows, and the interactive
//! session. It depends only on `steward-types` -- persistence and the
//! chat platform are reached through traits implemented elsewhere.

pub mod config;
pub mod interaction;
pub mod transport;

#[cfg(test)]
pub(crate) mod testutil;
