//! Web-content container
//!
//! The non-core collaborator of the hook engine: a container owning one
//! browsing surface plus the tabs opened from it, whose navigation methods
//! are hookable selectors.

mod controller;

pub use controller::{selectors, WebContainerController, CONTAINER_ROLE, UI_RESPONDER_ROLE};
