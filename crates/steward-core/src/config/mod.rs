//! The generic per-guild configuration engine.
//!
//! A feature module declares a [`Manifest`] of typed options bound to
//! one backing table, supplies a row-selector strategy, and hands both
//! to a [`ConfigSession`]. The session renders the manifest as an
//! overview plus a drill-down selector, collects typed input through
//! per-kind prompt flows, and persists results through the
//! [`SettingsStore`] abstraction.

mod format;
mod manifest;
mod option;
mod prompt;
mod session;
mod store;

pub use format::{format_value, is_truthy, is_unset, NOT_SET};
pub use manifest::{Manifest, MAIN_MENU_ID};
pub use option::{ConfigOption, OptionKind, TransformFn, ValidateFn};
pub use prompt::{prompt_option_value, PromptOutcome, PROMPT_TIMEOUT};
pub use session::{ConfigSession, SessionOptions, SESSION_TIMEOUT};
pub use store::{RowSelector, SelectorFn, SettingsStore, StoreContext, WriteOp};
