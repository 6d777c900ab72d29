//! # Observability & Tracing
//!
//! Initializes structured logging for the whole process.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup, shutdown, open transactions left at shutdown
//! - **Statements**: `Execute` with the full statement at `debug`, outcome at `info`
//! - **Transactions**: begin, savepoint, rollback-to, commit, rollback
//! - **Failures**: rejected statements and aborted transactions at `warn`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo run
//!
//! # Full statements and queries
//! RUST_LOG=debug cargo run
//!
//! # Only the transaction actor
//! RUST_LOG=txn_actor=debug cargo run
//! ```
//!
//! When `RUST_LOG` is unset, the filter passed to [`setup_tracing`] is used instead.

use tracing_subscriber::EnvFilter;

pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
