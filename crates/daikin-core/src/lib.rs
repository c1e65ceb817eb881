// daikin-core: Discovery, device registry and metrics between daikin-api and consumers.

pub mod config;
pub mod discovery;
pub mod error;
pub mod metrics;
pub mod registry;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::DiscoveryConfig;
pub use discovery::{Discovery, DiscoveryState};
pub use error::CoreError;
pub use registry::Registry;
