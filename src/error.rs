//! Error types for configuration loading and registry mutation
//!
//! Handler execution errors are deliberately not represented here: a handler
//! failure during dispatch propagates through the intercepted call as a plain
//! `anyhow::Error`, exactly as if the original method body had failed.

use thiserror::Error;

use crate::hooks::HookHandle;

/// Errors raised while loading a hook rule set.
///
/// Loading is all-or-nothing: when any of these is returned, the rule store
/// is left exactly as it was before the load attempt.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Two rules in the set (or one new and one already loaded) share an
    /// event name.
    #[error("duplicate event name: {0}")]
    DuplicateEventName(String),

    /// A rule declares a timing but no handler is bound for it.
    #[error("event '{0}' declares a timing but no handler is bound")]
    MissingHandler(String),

    /// A rule entry is structurally unusable (e.g. missing selector name).
    #[error("invalid rule: {0}")]
    InvalidRule(String),
}

/// Errors raised by [`HookRegistry`](crate::hooks::HookRegistry) mutations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The handle does not identify any active registration.
    #[error("no registration found for {0:?}")]
    NotFound(HookHandle),
}
