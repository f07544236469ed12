//! Web container controller
//!
//! Models a single embedded browsing surface with tab-like multi-instance
//! navigation. This is deliberately plain sequential plumbing: the container
//! has no hook logic of its own, it is an ordinary consumer whose navigation
//! methods are registered hookable selectors. Rendering, browser chrome and
//! history persistence are out of scope.

use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use crate::hooks::{Hookable, HookRegistry, InvocationInterceptor};

/// Selector names the container exposes as hook targets.
pub mod selectors {
    /// `load(url)` — navigate the current surface.
    pub const LOAD: &str = "load";
    /// `load_in_new_tab(url)` — navigate in a freshly opened tab.
    pub const LOAD_IN_NEW_TAB: &str = "load_in_new_tab";
    /// `reload()` — reload the current URL.
    pub const RELOAD: &str = "reload";
}

/// Role name of the container itself.
pub const CONTAINER_ROLE: &str = "WebContainerController";
/// Ancestor role; hooks installed here apply to every UI responder,
/// containers included.
pub const UI_RESPONDER_ROLE: &str = "UiResponder";

const ROLE_CHAIN: &[&str] = &[CONTAINER_ROLE, UI_RESPONDER_ROLE];

/// A UI screen owning one web-content surface, plus the tabs opened from it.
pub struct WebContainerController {
    hooks: Arc<HookRegistry>,
    url: Option<String>,
    need_new_tab: bool,
    tabs: Vec<WebContainerController>,
    reload_count: usize,
}

impl WebContainerController {
    /// Create a container consuming the given hook registry.
    pub fn new(hooks: Arc<HookRegistry>) -> Self {
        Self {
            hooks,
            url: None,
            need_new_tab: false,
            tabs: Vec::new(),
            reload_count: 0,
        }
    }

    /// Create a container and load an initial URL.
    pub fn with_url(hooks: Arc<HookRegistry>, url: &str) -> Result<Self> {
        let mut container = Self::new(hooks);
        container.load(url)?;
        Ok(container)
    }

    /// Route the next `navigate` call to a new tab instead of this surface.
    pub fn set_need_new_tab(&mut self, need_new_tab: bool) {
        self.need_new_tab = need_new_tab;
    }

    /// Navigate, honoring the `need_new_tab` flag: a set flag opens a tab
    /// (and clears itself), otherwise the current surface loads in place.
    pub fn navigate(&mut self, url: &str) -> Result<()> {
        if self.need_new_tab {
            self.need_new_tab = false;
            self.load_in_new_tab(url)
        } else {
            self.load(url)
        }
    }

    /// Load a URL into this surface. Hookable as `"load"`.
    pub fn load(&mut self, url: &str) -> Result<()> {
        let hooks = Arc::clone(&self.hooks);
        let roles = self.role_chain();
        let arguments = vec![Value::String(url.to_string())];
        InvocationInterceptor::intercept(
            &hooks,
            roles,
            selectors::LOAD,
            arguments,
            |_args| {
                tracing::info!(url, "loading url");
                self.url = Some(url.to_string());
                Ok(Value::Null)
            },
        )?;
        Ok(())
    }

    /// Open a new tab sharing this container's hook registry and load the
    /// URL there. Hookable as `"load_in_new_tab"`; the tab's own `load` is
    /// itself intercepted.
    pub fn load_in_new_tab(&mut self, url: &str) -> Result<()> {
        let hooks = Arc::clone(&self.hooks);
        let roles = self.role_chain();
        let arguments = vec![Value::String(url.to_string())];
        InvocationInterceptor::intercept(
            &hooks,
            roles,
            selectors::LOAD_IN_NEW_TAB,
            arguments,
            |_args| {
                tracing::info!(url, "opening url in new tab");
                let mut tab = WebContainerController::new(Arc::clone(&self.hooks));
                tab.load(url)?;
                self.tabs.push(tab);
                Ok(Value::Null)
            },
        )?;
        Ok(())
    }

    /// Reload the current URL; a surface that never loaded anything is a
    /// no-op. Hookable as `"reload"` (a zero-argument selector).
    pub fn reload(&mut self) -> Result<()> {
        let hooks = Arc::clone(&self.hooks);
        let roles = self.role_chain();
        InvocationInterceptor::intercept(
            &hooks,
            roles,
            selectors::RELOAD,
            Vec::new(),
            |_args| {
                match &self.url {
                    Some(url) => {
                        tracing::info!(%url, "reloading");
                        self.reload_count += 1;
                    }
                    None => tracing::debug!("reload requested with no url loaded"),
                }
                Ok(Value::Null)
            },
        )?;
        Ok(())
    }

    /// The URL currently shown by this surface.
    pub fn current_url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Number of tabs opened from this container.
    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// The tabs opened from this container, in opening order.
    pub fn tabs(&self) -> &[WebContainerController] {
        &self.tabs
    }

    /// How many times this surface was reloaded.
    pub fn reload_count(&self) -> usize {
        self.reload_count
    }
}

impl Hookable for WebContainerController {
    fn role_chain(&self) -> &'static [&'static str] {
        ROLE_CHAIN
    }
}
