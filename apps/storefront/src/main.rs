//! # Storefront Entry Point
//!
//! Starts the storefront shell on stdin/stdout.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront                                       │
//! │                                                                         │
//! │  stdin ──► shell.rs ──► commands/ ──► state/ (CartStore, WishlistStore) │
//! │                              │                   │                      │
//! │                              ▼                   ▼                      │
//! │                         toasts (notify.rs)   storefront-core            │
//! │                              │               (pure transitions)         │
//! │                              ▼                                          │
//! │  stdout ◄──── rendered responses + toasts                               │
//! │  stderr ◄──── tracing logs                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // The actual setup is in lib.rs for testability
    storefront_app::run().await
}
