//! Declarative hook rules and the rule store
//!
//! A [`HookRule`] describes one tracked event: which selector to intercept,
//! when the handler runs relative to the original body, and the handler
//! itself. Rules are declarative only; nothing is intercepted until a rule
//! set is compiled into a [`HookRegistry`](crate::hooks::HookRegistry) via
//! `install_rules`.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::hooks::context::HookHandler;

/// When a handler runs relative to the original method body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookTiming {
    /// Run before the original body; return value ignored.
    Before,
    /// Run after the original body (or its substitute); return value ignored.
    After,
    /// Replace the original body; the handler's return value becomes the
    /// call's result. The first installed `Instead` hook wins.
    Instead,
}

impl fmt::Display for HookTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookTiming::Before => write!(f, "before"),
            HookTiming::After => write!(f, "after"),
            HookTiming::Instead => write!(f, "instead"),
        }
    }
}

/// One configured hook: a tracked event bound to a selector and a handler.
#[derive(Clone)]
pub struct HookRule {
    /// Human-readable identifier of the tracked event, unique per rule set.
    pub event_name: String,
    /// When the handler runs relative to the original body.
    pub timing: HookTiming,
    /// Name of the method to intercept, resolved against the role the rule
    /// set is installed on.
    pub selector: String,
    /// The tracking/behavior logic.
    pub handler: HookHandler,
}

impl HookRule {
    /// Create a new rule.
    pub fn new(
        event_name: impl Into<String>,
        timing: HookTiming,
        selector: impl Into<String>,
        handler: HookHandler,
    ) -> Self {
        Self {
            event_name: event_name.into(),
            timing,
            selector: selector.into(),
            handler,
        }
    }
}

impl fmt::Debug for HookRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRule")
            .field("event_name", &self.event_name)
            .field("timing", &self.timing)
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}

/// Holds the declarative rule set, immutable once loaded.
///
/// Rules are kept in load order; that order is what makes multi-hook dispatch
/// on a shared selector deterministic.
#[derive(Default)]
pub struct HookRuleStore {
    rules: Vec<HookRule>,
}

impl HookRuleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Load a rule set, all-or-nothing.
    ///
    /// Fails with [`ConfigError::DuplicateEventName`] if two rules — within
    /// the incoming set or against already-loaded rules — share an event
    /// name. On error the store is left unchanged.
    pub fn load(&mut self, rules: Vec<HookRule>) -> Result<(), ConfigError> {
        let mut seen: HashSet<&str> = self.rules.iter().map(|r| r.event_name.as_str()).collect();
        for rule in &rules {
            if !seen.insert(rule.event_name.as_str()) {
                return Err(ConfigError::DuplicateEventName(rule.event_name.clone()));
            }
        }

        tracing::debug!(count = rules.len(), "loaded hook rules");
        self.rules.extend(rules);
        Ok(())
    }

    /// All loaded rules, in load order.
    pub fn all_rules(&self) -> &[HookRule] {
        &self.rules
    }
}
