//! taptrack
//!
//! Declarative event-tracking hooks for named method calls, plus the tabbed
//! web-content container that consumes them.
//!
//! The [`hooks`] module is the core: a rule set declares tracked events
//! (which selector, which timing, which handler), the registry turns them
//! into active interceptions, and hookable types route their method bodies
//! through the interceptor so handlers fire `before`, `after` or `instead of`
//! the original call. The [`container`] module is an ordinary consumer whose
//! navigation methods (`load`, `load_in_new_tab`, `reload`) are hookable
//! selectors.

pub mod container;
pub mod error;
pub mod hooks;
pub mod logging;

pub use container::WebContainerController;
pub use error::{ConfigError, RegistryError};
pub use hooks::{
    EventDispatcher, HandlerTable, HookHandle, HookHandler, HookRegistry, HookRule, HookRuleStore,
    HookTiming, Hookable, InvocationContext, InvocationInterceptor,
};
