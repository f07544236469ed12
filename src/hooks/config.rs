//! TrackedEvents configuration mapping
//!
//! The external configuration surface is an in-memory JSON mapping:
//!
//! ```json
//! {
//!   "TrackedEvents": [
//!     {
//!       "HookOption": "after",
//!       "EventName": "TapLoad",
//!       "EventSelectorName": "load",
//!       "EventHandlerBlock": "record_navigation"
//!     }
//!   ]
//! }
//! ```
//!
//! Handlers are closures and cannot live in JSON, so `EventHandlerBlock`
//! names an entry in a [`HandlerTable`] bound at startup. Unknown keys
//! anywhere in the mapping are ignored.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ConfigError;
use crate::hooks::context::HookHandler;
use crate::hooks::rule::{HookRule, HookRuleStore, HookTiming};

/// Named handler bindings resolved while parsing a configuration mapping.
///
/// The capability table the engine looks handlers up in by string key;
/// populated once at startup, before any configuration is loaded.
#[derive(Default)]
pub struct HandlerTable {
    handlers: HashMap<String, HookHandler>,
}

impl HandlerTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Bind a handler under a name. Rebinding a name replaces the previous
    /// handler.
    pub fn bind(&mut self, name: impl Into<String>, handler: HookHandler) {
        self.handlers.insert(name.into(), handler);
    }

    /// Look up a handler by name.
    pub fn get(&self, name: &str) -> Option<&HookHandler> {
        self.handlers.get(name)
    }
}

/// Raw event entry as it appears in the mapping. Every field is optional so
/// that validation, not deserialization, decides which error to report.
/// Unknown keys are dropped by serde.
#[derive(Debug, Deserialize)]
struct RawEventEntry {
    #[serde(rename = "HookOption")]
    hook_option: Option<HookTiming>,
    #[serde(rename = "EventName")]
    event_name: Option<String>,
    #[serde(rename = "EventSelectorName")]
    selector: Option<String>,
    #[serde(rename = "EventHandlerBlock")]
    handler: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "TrackedEvents", default)]
    tracked_events: Vec<RawEventEntry>,
}

/// Parse a `TrackedEvents` mapping into hook rules, resolving handler names
/// against `handlers`.
///
/// Errors: [`ConfigError::InvalidRule`] for a malformed mapping or an entry
/// missing `EventName`, `EventSelectorName` or `HookOption`;
/// [`ConfigError::MissingHandler`] when an entry's timing has no resolvable
/// handler binding.
pub fn parse_tracked_events(
    config: &Value,
    handlers: &HandlerTable,
) -> Result<Vec<HookRule>, ConfigError> {
    let raw: RawConfig = serde_json::from_value(config.clone())
        .map_err(|e| ConfigError::InvalidRule(e.to_string()))?;

    let mut rules = Vec::with_capacity(raw.tracked_events.len());
    for entry in raw.tracked_events {
        let event_name = entry
            .event_name
            .ok_or_else(|| ConfigError::InvalidRule("entry is missing EventName".into()))?;
        let selector = entry.selector.ok_or_else(|| {
            ConfigError::InvalidRule(format!("event '{event_name}' is missing EventSelectorName"))
        })?;
        let timing = entry.hook_option.ok_or_else(|| {
            ConfigError::InvalidRule(format!("event '{event_name}' is missing HookOption"))
        })?;
        let handler = entry
            .handler
            .as_deref()
            .and_then(|name| handlers.get(name))
            .cloned()
            .ok_or_else(|| ConfigError::MissingHandler(event_name.clone()))?;

        rules.push(HookRule::new(event_name, timing, selector, handler));
    }

    Ok(rules)
}

impl HookRuleStore {
    /// Parse a `TrackedEvents` mapping and load the resulting rules.
    ///
    /// Combines [`parse_tracked_events`] with [`HookRuleStore::load`];
    /// all-or-nothing like any other load.
    pub fn load_config(
        &mut self,
        config: &Value,
        handlers: &HandlerTable,
    ) -> Result<(), ConfigError> {
        let rules = parse_tracked_events(config, handlers)?;
        self.load(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InvocationContext;
    use serde_json::json;
    use std::sync::Arc;

    fn table_with(names: &[&str]) -> HandlerTable {
        let mut table = HandlerTable::new();
        for name in names {
            table.bind(
                *name,
                Arc::new(|_ctx: &mut InvocationContext| Ok(None)) as HookHandler,
            );
        }
        table
    }

    #[test]
    fn test_parse_valid_mapping() {
        let config = json!({
            "TrackedEvents": [
                {
                    "HookOption": "after",
                    "EventName": "TapLoad",
                    "EventSelectorName": "load",
                    "EventHandlerBlock": "record_navigation"
                },
                {
                    "HookOption": "before",
                    "EventName": "TapReload",
                    "EventSelectorName": "reload",
                    "EventHandlerBlock": "record_navigation"
                }
            ]
        });

        let rules = parse_tracked_events(&config, &table_with(&["record_navigation"])).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].event_name, "TapLoad");
        assert_eq!(rules[0].timing, HookTiming::After);
        assert_eq!(rules[0].selector, "load");
        assert_eq!(rules[1].timing, HookTiming::Before);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = json!({
            "TrackedEvents": [
                {
                    "HookOption": "after",
                    "EventName": "TapLoad",
                    "EventSelectorName": "load",
                    "EventHandlerBlock": "record_navigation",
                    "Comment": "not part of the format"
                }
            ],
            "SomethingElse": 42
        });

        let rules = parse_tracked_events(&config, &table_with(&["record_navigation"])).unwrap();
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_missing_selector_is_invalid_rule() {
        let config = json!({
            "TrackedEvents": [
                {
                    "HookOption": "after",
                    "EventName": "TapLoad",
                    "EventHandlerBlock": "record_navigation"
                }
            ]
        });

        let err =
            parse_tracked_events(&config, &table_with(&["record_navigation"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRule(_)));
    }

    #[test]
    fn test_unbound_handler_is_missing_handler() {
        let config = json!({
            "TrackedEvents": [
                {
                    "HookOption": "after",
                    "EventName": "TapLoad",
                    "EventSelectorName": "load",
                    "EventHandlerBlock": "no_such_handler"
                }
            ]
        });

        let err = parse_tracked_events(&config, &HandlerTable::new()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingHandler(name) if name == "TapLoad"));
    }

    #[test]
    fn test_absent_handler_block_is_missing_handler() {
        let config = json!({
            "TrackedEvents": [
                {
                    "HookOption": "instead",
                    "EventName": "TapLoad",
                    "EventSelectorName": "load"
                }
            ]
        });

        let err = parse_tracked_events(&config, &table_with(&["other"])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingHandler(_)));
    }

    #[test]
    fn test_empty_mapping_yields_no_rules() {
        let rules = parse_tracked_events(&json!({}), &HandlerTable::new()).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn test_load_config_is_all_or_nothing() {
        let mut store = HookRuleStore::new();
        let config = json!({
            "TrackedEvents": [
                {
                    "HookOption": "after",
                    "EventName": "TapLoad",
                    "EventSelectorName": "load",
                    "EventHandlerBlock": "record_navigation"
                },
                {
                    "HookOption": "after",
                    "EventName": "TapLoad",
                    "EventSelectorName": "reload",
                    "EventHandlerBlock": "record_navigation"
                }
            ]
        });

        let err = store
            .load_config(&config, &table_with(&["record_navigation"]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateEventName(_)));
        assert!(store.all_rules().is_empty());
    }
}
