//! # boxoffice-core
//!
//! Core crate for Box Office. Contains the seams of the reservation engine
//! (lock gate, resource store, event publisher), configuration schemas,
//! reservation events, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Box Office crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
