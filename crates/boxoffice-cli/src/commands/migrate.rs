//! Database migration command.

use boxoffice_core::error::AppError;
use boxoffice_database::connection::DatabasePool;

use crate::output;

/// Run all pending migrations.
pub async fn execute(db: &DatabasePool) -> Result<(), AppError> {
    println!("Running database migrations...");
    boxoffice_database::migration::run_migrations(db.pool()).await?;
    output::print_success("All migrations applied.");
    Ok(())
}
