//! # boxoffice-cache
//!
//! Lock gate implementations for Box Office. The gate is the fast first
//! tier of the reservation protocol: a short-lived, advisory claim keyed by
//! seat that turns away concurrent requesters before they reach the store.
//!
//! - **memory**: in-process claims held in a [`dashmap::DashMap`]
//! - **redis**: claims stored in Redis and taken with a single Lua script
//!
//! The provider is selected at runtime based on configuration.

pub mod gate;
pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use gate::{ClaimResult, LockGate};
pub use provider::GateManager;
