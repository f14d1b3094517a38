//! In-process lock gate.

pub mod gate;

pub use gate::MemoryLockGate;
