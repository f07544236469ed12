//! Process-wide hook registry
//!
//! Maps `(role, selector)` keys to their ordered, active hook registrations.
//! The registry is the only writer of installed state: rules become live
//! interceptions here, and removing the last registration for a key restores
//! direct dispatch for that selector exactly (the key disappears from the
//! table, so the interceptor's fast path takes over again and a later
//! re-install behaves like a first install).

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::RegistryError;
use crate::hooks::context::HookHandler;
use crate::hooks::rule::{HookRuleStore, HookTiming};

/// Opaque identifier of one active registration, returned by
/// [`HookRegistry::install`] and consumed by [`HookRegistry::uninstall`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HookHandle(u64);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct HookKey {
    role: String,
    selector: String,
}

struct Registration {
    handle: HookHandle,
    timing: HookTiming,
    handler: HookHandler,
}

#[derive(Default)]
struct RegistryInner {
    table: HashMap<HookKey, Vec<Registration>>,
    next_id: u64,
}

/// Registry of active hook installations.
///
/// Designed for a single-threaded UI-event model: install and uninstall are
/// expected during setup and teardown, not concurrently with dispatch. The
/// interior lock makes shared `Arc` ownership workable and keeps `lookup`
/// snapshots consistent; it is not an invitation to mutate mid-dispatch.
#[derive(Default)]
pub struct HookRegistry {
    inner: RwLock<RegistryInner>,
}

impl HookRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(RegistryInner::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Install a hook for `(role, selector)`.
    ///
    /// The first installation for a key transitions that selector from direct
    /// to intercepted dispatch; later installations append to the key's
    /// ordered sequence (stable order = installation order).
    pub fn install(
        &self,
        role: impl Into<String>,
        selector: impl Into<String>,
        timing: HookTiming,
        handler: HookHandler,
    ) -> HookHandle {
        let key = HookKey {
            role: role.into(),
            selector: selector.into(),
        };

        let mut inner = self.write();
        let handle = HookHandle(inner.next_id);
        inner.next_id += 1;

        let registrations = inner.table.entry(key.clone()).or_default();
        if registrations.is_empty() {
            tracing::debug!(role = %key.role, selector = %key.selector, "wrapping selector");
        }
        registrations.push(Registration {
            handle,
            timing,
            handler,
        });

        tracing::debug!(
            role = %key.role,
            selector = %key.selector,
            timing = %timing,
            ?handle,
            "installed hook"
        );
        handle
    }

    /// Install every rule of a loaded store against one role, in load order.
    ///
    /// This is the compile step that turns the declarative rule set into
    /// active interceptions. Returns the handles in the same order.
    pub fn install_rules(&self, role: &str, store: &HookRuleStore) -> Vec<HookHandle> {
        store
            .all_rules()
            .iter()
            .map(|rule| {
                self.install(
                    role,
                    rule.selector.as_str(),
                    rule.timing,
                    rule.handler.clone(),
                )
            })
            .collect()
    }

    /// Remove exactly the registration identified by `handle`.
    ///
    /// When the key's sequence becomes empty the key is dropped entirely,
    /// restoring direct dispatch for that selector.
    pub fn uninstall(&self, handle: HookHandle) -> Result<(), RegistryError> {
        let mut inner = self.write();

        let key = inner
            .table
            .iter()
            .find(|(_, regs)| regs.iter().any(|r| r.handle == handle))
            .map(|(key, _)| key.clone())
            .ok_or(RegistryError::NotFound(handle))?;

        let registrations = inner
            .table
            .get_mut(&key)
            .ok_or(RegistryError::NotFound(handle))?;
        registrations.retain(|r| r.handle != handle);
        if registrations.is_empty() {
            inner.table.remove(&key);
            tracing::debug!(role = %key.role, selector = %key.selector, "unwrapping selector");
        }

        tracing::debug!(?handle, "uninstalled hook");
        Ok(())
    }

    /// Ordered `(timing, handler)` snapshot for a receiver's role chain.
    ///
    /// Polymorphic: registrations keyed on any role in the chain match, and
    /// the merged sequence preserves installation order across roles. Handler
    /// `Arc`s are cloned out so dispatch never holds the registry lock.
    pub fn lookup(&self, roles: &[&str], selector: &str) -> Vec<(HookTiming, HookHandler)> {
        let inner = self.read();

        let mut matched: Vec<&Registration> = Vec::new();
        for role in roles {
            let key = HookKey {
                role: (*role).to_string(),
                selector: selector.to_string(),
            };
            if let Some(registrations) = inner.table.get(&key) {
                matched.extend(registrations.iter());
            }
        }
        matched.sort_by_key(|r| r.handle);

        matched
            .into_iter()
            .map(|r| (r.timing, r.handler.clone()))
            .collect()
    }

    /// Whether `(role, selector)` currently has any active registration.
    pub fn is_wrapped(&self, role: &str, selector: &str) -> bool {
        let key = HookKey {
            role: role.to_string(),
            selector: selector.to_string(),
        };
        self.read().table.contains_key(&key)
    }
}
