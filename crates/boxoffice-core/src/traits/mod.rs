//! Core traits defined in `boxoffice-core` and implemented by other crates.

pub mod event_publisher;

pub use event_publisher::EventPublisher;
