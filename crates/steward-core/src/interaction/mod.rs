//! Interaction event distribution.
//!
//! The platform boundary publishes decoded [`Interaction`] events into an
//! [`InteractionHub`]; sessions and prompt flows take bounded-lifetime
//! [`Collector`] subscriptions off it.
//!
//! [`Interaction`]: steward_types::interaction::Interaction

mod collector;
mod hub;

pub use collector::Collector;
pub use hub::InteractionHub;
