//! Contention drill: N requesters race for one seat through the full
//! gate/store/notify path against the configured backends.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use boxoffice_cache::GateManager;
use boxoffice_core::config::AppConfig;
use boxoffice_core::error::AppError;
use boxoffice_database::connection::DatabasePool;
use boxoffice_database::store::PgResourceStore;
use boxoffice_realtime::{HubHandle, NotificationHub};
use boxoffice_service::context::RequestContext;
use boxoffice_service::reservation::{ReservationCoordinator, ReservationOutcome};

use crate::output::{self, OutputFormat};

/// Arguments for the race command
#[derive(Debug, Args)]
pub struct RaceArgs {
    /// Seat to fight over
    #[arg(long)]
    pub seat: i32,
    /// Number of concurrent requesters
    #[arg(long, default_value_t = 100)]
    pub clients: i32,
    /// User ID of the first requester; the rest count up from it
    #[arg(long, default_value_t = 1)]
    pub first_user: i32,
}

#[derive(Debug, Serialize, Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Count")]
    count: usize,
}

/// Run the drill and print the outcome histogram.
pub async fn execute(
    args: &RaceArgs,
    config: &AppConfig,
    db: &DatabasePool,
    format: OutputFormat,
) -> Result<(), AppError> {
    let users = requester_ids(args.first_user, args.clients)?;

    let gate = GateManager::new(&config.gate).await?;
    let store = PgResourceStore::new(db);
    let (hub, _hub_task) = NotificationHub::spawn(&config.realtime);
    let coordinator = Arc::new(ReservationCoordinator::from_config(
        Arc::new(gate),
        Arc::new(store),
        Arc::new(hub.clone()),
        &config.gate,
        &config.reservation,
    ));

    let started = Instant::now();
    let attempts = users.map(|user_id| {
        let coordinator = Arc::clone(&coordinator);
        let ctx = RequestContext::new(user_id);
        let seat = args.seat;
        tokio::spawn(async move { coordinator.reserve(&ctx, seat).await })
    });
    let results = futures::future::join_all(attempts).await;
    let elapsed = started.elapsed();

    let mut histogram: BTreeMap<String, usize> = BTreeMap::new();
    let mut winner = None;
    for result in results {
        let label = match result {
            Ok(Ok(ReservationOutcome::Created(booking))) => {
                winner = Some(booking.user_id);
                "created".to_string()
            }
            Ok(Ok(outcome)) => outcome.label().to_string(),
            Ok(Err(e)) => {
                debug!(error = %e, "Attempt failed");
                format!("error:{}", e.kind)
            }
            Err(e) => {
                debug!(error = %e, "Attempt task panicked");
                "error:PANIC".to_string()
            }
        };
        *histogram.entry(label).or_default() += 1;
    }

    let rows: Vec<OutcomeRow> = histogram
        .into_iter()
        .map(|(outcome, count)| OutcomeRow { outcome, count })
        .collect();
    output::print_list(&rows, format);

    let broadcasts = settled_broadcasts(&hub, u64::from(winner.is_some())).await;
    let summary = format!(
        "{} requesters in {}ms, {broadcasts} broadcast(s)",
        args.clients,
        elapsed.as_millis(),
    );
    match winner {
        Some(user_id) => output::print_success(&format!(
            "Seat {} went to user {user_id}; {summary}",
            args.seat
        )),
        None => output::print_warning(&format!(
            "No requester won seat {}; {summary}",
            args.seat
        )),
    }
    hub.shutdown();
    Ok(())
}

/// User IDs `first_user..first_user + clients`, rejecting ranges that
/// overflow `i32`.
fn requester_ids(first_user: i32, clients: i32) -> Result<RangeInclusive<i32>, AppError> {
    if clients < 1 {
        return Err(AppError::validation("--clients must be at least 1"));
    }
    let last = first_user.checked_add(clients - 1).ok_or_else(|| {
        AppError::validation(format!(
            "--first-user {first_user} with --clients {clients} overflows the user ID range"
        ))
    })?;
    Ok(first_user..=last)
}

/// Broadcast count once the hub has taken in `expected` events, or after a
/// short grace period. Publishing is fire-and-forget, so the counter lags
/// the commits.
async fn settled_broadcasts(hub: &HubHandle, expected: u64) -> u64 {
    let _ = tokio::time::timeout(Duration::from_secs(1), async {
        while hub.metrics().snapshot().broadcasts_total < expected {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    hub.metrics().snapshot().broadcasts_total
}
