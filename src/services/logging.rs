//! Tracing subscriber setup
//!
//! The library only emits `tracing` events. Embedders that want the standard
//! output format (JSON lines filtered by `RUST_LOG`) call [`init_tracing`] once
//! at startup.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "bookshelf=info,async_graphql=warn,sqlx=warn";

/// Install the global JSON subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()?;

    Ok(())
}
