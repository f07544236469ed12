//! Event-hook configuration and dispatch engine
//!
//! Declarative tracking hooks around named method calls. A rule set declares
//! which selectors to intercept and when the handler runs relative to the
//! original body (`before`, `after`, `instead`); the registry compiles rules
//! into active interceptions; hookable types route their method bodies
//! through the interceptor, which fans handler invocations out synchronously
//! on the calling thread.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use taptrack::hooks::{
//!     HookHandler, HookRegistry, HookTiming, InvocationContext, InvocationInterceptor,
//! };
//! use serde_json::{json, Value};
//!
//! let registry = HookRegistry::new();
//! let handle = registry.install(
//!     "WebContainerController",
//!     "load",
//!     HookTiming::After,
//!     Arc::new(|ctx: &mut InvocationContext| {
//!         tracing::info!(url = ?ctx.arguments().first(), "tracked a load");
//!         Ok(None)
//!     }) as HookHandler,
//! );
//!
//! // A hookable method body routes itself through the interceptor:
//! let result = InvocationInterceptor::intercept(
//!     &registry,
//!     &["WebContainerController", "UiResponder"],
//!     "load",
//!     vec![json!("https://example.com")],
//!     |_args| Ok(Value::Null),
//! )?;
//! assert_eq!(result, Value::Null);
//!
//! registry.uninstall(handle)?;
//! # anyhow::Ok(())
//! ```

pub mod config;
mod context;
mod dispatcher;
mod interceptor;
mod registry;
mod rule;

pub use config::{parse_tracked_events, HandlerTable};
pub use context::{HookHandler, Hookable, InvocationContext};
pub use dispatcher::EventDispatcher;
pub use interceptor::InvocationInterceptor;
pub use registry::{HookHandle, HookRegistry};
pub use rule::{HookRule, HookRuleStore, HookTiming};
