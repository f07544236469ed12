//! Synchronous handler fan-out
//!
//! Invokes matched handlers sequentially on the calling thread, in the order
//! the registry produced them. Fail-fast: the first handler error stops the
//! chain and propagates; later handlers do not run. A tracking handler that
//! misbehaves must surface, not silently break the tracked flow.

use anyhow::Result;

use crate::hooks::context::{HookHandler, InvocationContext};

/// Thin sequential dispatcher over an ordered handler slice.
pub struct EventDispatcher;

impl EventDispatcher {
    /// Invoke each handler in order with the shared context.
    ///
    /// Handler return values are ignored here; `Instead` substitution is the
    /// interceptor's job, not the dispatcher's.
    pub fn dispatch(handlers: &[HookHandler], ctx: &mut InvocationContext<'_>) -> Result<()> {
        for handler in handlers {
            tracing::trace!(selector = ctx.selector(), "dispatching hook handler");
            handler(ctx)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    fn recording(log: Arc<Mutex<Vec<&'static str>>>, tag: &'static str) -> HookHandler {
        Arc::new(move |_ctx| {
            log.lock().unwrap().push(tag);
            Ok(None)
        })
    }

    #[test]
    fn test_dispatch_runs_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let handlers = vec![
            recording(log.clone(), "first"),
            recording(log.clone(), "second"),
            recording(log.clone(), "third"),
        ];

        let args: Vec<Value> = Vec::new();
        let mut ctx = InvocationContext::new("Container", "load", &args);
        EventDispatcher::dispatch(&handlers, &mut ctx).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_dispatch_stops_at_first_error() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let failing: HookHandler = Arc::new(|_ctx| Err(anyhow!("handler blew up")));
        let handlers = vec![
            recording(log.clone(), "ran"),
            failing,
            recording(log.clone(), "never"),
        ];

        let args: Vec<Value> = Vec::new();
        let mut ctx = InvocationContext::new("Container", "load", &args);
        let err = EventDispatcher::dispatch(&handlers, &mut ctx).unwrap_err();

        assert!(err.to_string().contains("handler blew up"));
        assert_eq!(*log.lock().unwrap(), vec!["ran"]);
    }

    #[test]
    fn test_empty_handler_slice_is_ok() {
        let args: Vec<Value> = Vec::new();
        let mut ctx = InvocationContext::new("Container", "reload", &args);
        assert!(EventDispatcher::dispatch(&[], &mut ctx).is_ok());
    }
}
