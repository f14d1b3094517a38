//! Redis lock gate.

pub mod client;
pub mod gate;

pub use client::RedisClient;
pub use gate::RedisLockGate;
