//! # boxoffice-database
//!
//! The authoritative tier of the reservation protocol. Provides the
//! PostgreSQL connection pool, migrations, seat/booking repositories, and
//! the [`ResourceStore`](store::ResourceStore) seam with a PostgreSQL and an
//! in-process implementation sharing the same row-lock semantics.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{CommitOutcome, ResourceStore};
