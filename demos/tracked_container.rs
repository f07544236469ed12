//! Tracked container demo
//!
//! Builds a TrackedEvents configuration, compiles it into a hook registry
//! and drives a web container through a few navigations while the handlers
//! report what they saw.
//!
//! Run with: cargo run --example tracked_container

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use taptrack::container::CONTAINER_ROLE;
use taptrack::{
    HandlerTable, HookHandler, HookRegistry, HookRuleStore, InvocationContext,
    WebContainerController,
};

fn main() -> Result<()> {
    taptrack::logging::init_logging()?;

    let mut handlers = HandlerTable::new();
    handlers.bind(
        "report_navigation",
        Arc::new(|ctx: &mut InvocationContext| {
            let url = ctx
                .arguments()
                .first()
                .and_then(|v| v.as_str())
                .unwrap_or("<none>");
            println!(
                "{} {} {} {}",
                "tracked".green().bold(),
                ctx.selector().cyan(),
                "url:".dimmed(),
                url
            );
            Ok(None)
        }) as HookHandler,
    );
    handlers.bind(
        "report_reload",
        Arc::new(|ctx: &mut InvocationContext| {
            println!(
                "{} {}",
                "tracked".green().bold(),
                ctx.selector().cyan()
            );
            Ok(None)
        }) as HookHandler,
    );

    let config = json!({
        "TrackedEvents": [
            {
                "HookOption": "after",
                "EventName": "TapLoad",
                "EventSelectorName": "load",
                "EventHandlerBlock": "report_navigation"
            },
            {
                "HookOption": "after",
                "EventName": "TapNewTab",
                "EventSelectorName": "load_in_new_tab",
                "EventHandlerBlock": "report_navigation"
            },
            {
                "HookOption": "before",
                "EventName": "TapReload",
                "EventSelectorName": "reload",
                "EventHandlerBlock": "report_reload"
            }
        ]
    });

    let mut store = HookRuleStore::new();
    store.load_config(&config, &handlers)?;

    let registry = Arc::new(HookRegistry::new());
    registry.install_rules(CONTAINER_ROLE, &store);

    let mut container = WebContainerController::new(registry);
    container.load("https://luowei.github.io")?;
    container.reload()?;
    container.set_need_new_tab(true);
    container.navigate("https://example.com")?;

    println!(
        "\n{} current={} tabs={} reloads={}",
        "summary".yellow().bold(),
        container.current_url().unwrap_or("<none>"),
        container.tab_count(),
        container.reload_count()
    );

    Ok(())
}
