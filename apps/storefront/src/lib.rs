//! # Storefront Application Library
//!
//! Application layer for the storefront: the single cart and wishlist
//! instances, the commands views invoke, and a stdin shell that drives them.
//!
//! ## Module Organization
//! ```text
//! storefront_app/
//! ├── lib.rs          ◄─── You are here (logging setup & run loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── Storefront provider
//! │   ├── cart.rs     ◄─── CartStore (watch channel)
//! │   ├── wishlist.rs ◄─── WishlistStore (watch channel)
//! │   └── config.rs   ◄─── AppConfig
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Grid, detail page, related products
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── wishlist.rs ◄─── Wishlist manipulation
//! │   └── checkout.rs ◄─── Order placement
//! ├── notify.rs       ◄─── Toast side-channel
//! ├── shell.rs        ◄─── Line parser and text rendering
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Subscriptions                                  │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐    │
//! │  │    CartStore     │ │  WishlistStore   │ │    AppConfig         │    │
//! │  │                  │ │                  │ │                      │    │
//! │  │  • Line items    │ │  • Saved items   │ │  • Store name        │    │
//! │  │  • Panel flag    │ │  • Panel flag    │ │  • Payment delay     │    │
//! │  │  • subscribe()   │ │  • subscribe()   │ │  • Price ceiling     │    │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘    │
//! │          │                    │                                         │
//! │          ▼                    ▼                                         │
//! │   watcher task logs every real change (no-ops never wake it)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod notify;
pub mod shell;
pub mod state;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use notify::{Notification, QueuedNotifier, Severity};
use shell::{Reply, Shell};
use state::{AppConfig, CartStore, Storefront, WishlistStore};
use storefront_core::CartTotals;

/// Runs the storefront shell until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info, debug for storefront crates; RUST_LOG overrides    │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • Defaults, then STOREFRONT_* environment variables                 │
/// │                                                                         │
/// │  3. Initialize State Objects ─────────────────────────────────────────► │
/// │     • Catalog: demo products                                            │
/// │     • CartStore / WishlistStore: empty, panels closed                   │
/// │     • QueuedNotifier: toasts printed after each command                 │
/// │                                                                         │
/// │  4. Spawn store watchers, then read commands from stdin ──────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> std::io::Result<()> {
    init_tracing();

    let config = AppConfig::from_env();
    info!(store = %config.store_name, "Starting storefront");

    let notifier = Arc::new(QueuedNotifier::new());
    let store = Storefront::with_mock_catalog(config, notifier.clone());
    info!(products = store.catalog.len(), "State initialized");

    let watchers = [spawn_cart_watcher(&store.cart), spawn_wishlist_watcher(&store.wishlist)];

    let banner = format!(
        "{} ({} products). Type 'help' for commands.\n",
        store.config.store_name,
        store.catalog.len()
    );
    let mut shell = Shell::new(store);
    let mut stdout = tokio::io::stdout();
    stdout.write_all(banner.as_bytes()).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let reply = shell.handle_line(&line).await;
        let mut output = match reply {
            Reply::Quit => break,
            Reply::Print(text) => text,
        };
        for toast in notifier.drain() {
            output.push('\n');
            output.push_str(&render_toast(&toast));
        }
        if !output.is_empty() {
            output.push('\n');
            stdout.write_all(output.as_bytes()).await?;
        }
    }

    for watcher in watchers {
        watcher.abort();
    }
    info!("Storefront stopped");
    Ok(())
}

fn render_toast(toast: &Notification) -> String {
    let marker = match toast.severity {
        Severity::Info => "*",
        Severity::Destructive => "!",
    };
    format!("{} {}: {}", marker, toast.title, toast.description)
}

/// Logs cart changes as they are published.
fn spawn_cart_watcher(cart: &CartStore) -> JoinHandle<()> {
    let mut rx = cart.subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let totals = CartTotals::from(&*rx.borrow_and_update());
            debug!(
                lines = totals.line_count,
                items = totals.total_item_count,
                total_cents = totals.total_price.cents(),
                "cart changed"
            );
        }
    })
}

fn spawn_wishlist_watcher(wishlist: &WishlistStore) -> JoinHandle<()> {
    let mut rx = wishlist.subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let count = rx.borrow_and_update().total_item_count();
            debug!(items = count, "wishlist changed");
        }
    })
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Show every store dispatch
/// - Default: INFO, DEBUG for storefront crates
///
/// Logs go to stderr so they never mix with shell output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{CartAction, Catalog, NewCartItem, ProductId};

    #[test]
    fn test_render_toast() {
        assert_eq!(
            render_toast(&Notification::destructive("Checkout failed", "Your cart is empty")),
            "! Checkout failed: Your cart is empty"
        );
    }

    #[tokio::test]
    async fn test_cart_watcher_sees_changes() {
        let cart = CartStore::new();
        let mut rx = cart.subscribe();
        let watcher = spawn_cart_watcher(&cart);

        let catalog = Catalog::mock();
        let item = NewCartItem::quick_add(catalog.get(ProductId::new(2)).unwrap()).unwrap();
        cart.dispatch(CartAction::AddItem(item));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().total_item_count(), 1);
        assert!(!watcher.is_finished());
        watcher.abort();
    }
}
