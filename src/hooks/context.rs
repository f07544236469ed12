//! Invocation context passed to hook handlers
//!
//! One [`InvocationContext`] is built per intercepted call and discarded when
//! the call completes; it is never stored by the engine.

use anyhow::{anyhow, Result};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A hook handler closure.
///
/// For `Instead` hooks the returned `Some(value)` replaces the original
/// method's result (`None` maps to `Value::Null`). For `Before` and `After`
/// hooks the return value is ignored. A returned error aborts the intercepted
/// call and propagates to its caller unmodified.
pub type HookHandler =
    Arc<dyn Fn(&mut InvocationContext) -> Result<Option<Value>> + Send + Sync>;

/// The original method body of an intercepted call.
///
/// Invokable at most once; the interceptor either calls it itself or hands it
/// to the active `Instead` handler through the context.
pub(crate) type OriginalCall<'a> = Box<dyn FnOnce(&[Value]) -> Result<Value> + 'a>;

/// Types whose methods can be hooked by role and selector name.
///
/// There is no runtime method-table rewriting here: a hookable type routes
/// its own method bodies through
/// [`InvocationInterceptor::intercept`](crate::hooks::InvocationInterceptor::intercept)
/// and advertises the roles it answers to. The chain is ordered most-derived
/// first and includes every ancestor role, so a hook installed on a supertype
/// role matches instances of its subtypes.
pub trait Hookable {
    /// All roles this instance answers to, most-derived first.
    fn role_chain(&self) -> &'static [&'static str];

    /// The most-derived role, used as the receiver identity in contexts.
    fn role(&self) -> &'static str {
        self.role_chain().first().copied().unwrap_or("")
    }
}

/// Descriptor of one intercepted call, handed to every matched handler.
pub struct InvocationContext<'a> {
    receiver_role: &'a str,
    selector: &'a str,
    arguments: &'a [Value],
    result: Option<Value>,
    original: Option<OriginalCall<'a>>,
}

impl<'a> InvocationContext<'a> {
    pub(crate) fn new(receiver_role: &'a str, selector: &'a str, arguments: &'a [Value]) -> Self {
        Self {
            receiver_role,
            selector,
            arguments,
            result: None,
            original: None,
        }
    }

    /// The most-derived role of the object whose method was intercepted.
    pub fn receiver_role(&self) -> &str {
        self.receiver_role
    }

    /// Name of the intercepted selector.
    pub fn selector(&self) -> &str {
        self.selector
    }

    /// Positional arguments of the intercepted call. Empty for zero-argument
    /// selectors.
    pub fn arguments(&self) -> &[Value] {
        self.arguments
    }

    /// The value produced by the original body (or its `Instead` substitute).
    ///
    /// `None` while `Before` and `Instead` handlers run; populated for
    /// `After` handlers.
    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// Invoke the wrapped original method with the call's own arguments.
    ///
    /// Only available to the active `Instead` handler, and only once per
    /// intercepted call; any other use returns an error.
    pub fn invoke_original(&mut self) -> Result<Value> {
        let original = self.original.take().ok_or_else(|| {
            anyhow!(
                "original method for '{}' is not invokable from this hook",
                self.selector
            )
        })?;
        original(self.arguments)
    }

    pub(crate) fn attach_original(&mut self, original: OriginalCall<'a>) {
        self.original = Some(original);
    }

    pub(crate) fn take_original(&mut self) -> Option<OriginalCall<'a>> {
        self.original.take()
    }

    pub(crate) fn set_result(&mut self, result: Value) {
        self.result = Some(result);
    }

    pub(crate) fn take_result(&mut self) -> Option<Value> {
        self.result.take()
    }
}

impl fmt::Debug for InvocationContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationContext")
            .field("receiver_role", &self.receiver_role)
            .field("selector", &self.selector)
            .field("arguments", &self.arguments)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}
