//! Observability integration.
//!
//! # Data Flow
//! ```text
//! tracing::info!(...) in application or dependency code
//!     → global tracing subscriber (registry + EnvFilter)
//!     → bridge.rs FacadeLayer (level + field mapping)
//!     → Logger::emit (same encoder and sink as direct facade calls)
//! ```
//!
//! # Design Decisions
//! - The bridge is opt-in; installing it claims the global subscriber slot
//! - Bridged records share the facade's level threshold and output

pub mod bridge;

pub use bridge::{install_bridge, FacadeLayer};
