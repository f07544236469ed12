//! Call interception
//!
//! The single wrap point every hookable method routes through. Conceptually
//! each `(role, selector)` key is a two-state machine, `Unwrapped` and
//! `Wrapped`: with no registrations present the lookup comes back empty and
//! the original body runs directly, byte-for-byte the unhooked behavior; the
//! first installation flips the key to wrapped, and removing the last one
//! flips it back.
//!
//! While wrapped, a call proceeds as: build context → `Before` handlers →
//! original body (or the first-installed `Instead` substitute) → `After`
//! handlers → return result. Everything is synchronous on the calling
//! thread, and handler errors propagate exactly like an error from the
//! original body would.

use anyhow::Result;
use serde_json::Value;

use crate::hooks::context::{HookHandler, InvocationContext};
use crate::hooks::dispatcher::EventDispatcher;
use crate::hooks::registry::HookRegistry;
use crate::hooks::rule::HookTiming;

/// Wraps original method bodies with hook dispatch.
pub struct InvocationInterceptor;

impl InvocationInterceptor {
    /// Run `original` under the hooks registered for `(roles, selector)`.
    ///
    /// `roles` is the receiver's role chain, most-derived first; a hook
    /// installed on any role in the chain matches. `original` is called at
    /// most once: either directly, or from an `Instead` handler through
    /// [`InvocationContext::invoke_original`], or not at all when an
    /// `Instead` handler substitutes its own result.
    pub fn intercept<F>(
        registry: &HookRegistry,
        roles: &[&str],
        selector: &str,
        arguments: Vec<Value>,
        original: F,
    ) -> Result<Value>
    where
        F: FnOnce(&[Value]) -> Result<Value>,
    {
        let matched = registry.lookup(roles, selector);
        if matched.is_empty() {
            // Unwrapped fast path: direct dispatch, no context is built.
            return original(&arguments);
        }

        tracing::trace!(selector, handlers = matched.len(), "intercepted call");

        let mut before: Vec<HookHandler> = Vec::new();
        let mut instead: Option<HookHandler> = None;
        let mut after: Vec<HookHandler> = Vec::new();
        for (timing, handler) in matched {
            match timing {
                HookTiming::Before => before.push(handler),
                HookTiming::After => after.push(handler),
                // First installed Instead hook wins; later ones never run.
                HookTiming::Instead => {
                    if instead.is_none() {
                        instead = Some(handler);
                    }
                }
            }
        }

        let receiver_role = roles.first().copied().unwrap_or("");
        let mut ctx = InvocationContext::new(receiver_role, selector, &arguments);

        EventDispatcher::dispatch(&before, &mut ctx)?;

        let result = match instead {
            Some(handler) => {
                ctx.attach_original(Box::new(original));
                let substituted = handler(&mut ctx)?;
                // The capability is scoped to the Instead handler.
                ctx.take_original();
                substituted.unwrap_or(Value::Null)
            }
            None => original(&arguments)?,
        };

        ctx.set_result(result);
        EventDispatcher::dispatch(&after, &mut ctx)?;

        Ok(ctx.take_result().unwrap_or(Value::Null))
    }
}
