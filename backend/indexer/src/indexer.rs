//! Long-running background task that polls the Soroban RPC and writes
//! decoded SmartFunding events to the database.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::Config;
use crate::db::{self, Cursor};
use crate::errors::Result;
use crate::rpc;

pub struct IndexerState {
    pub pool: SqlitePool,
    pub config: Config,
    pub client: Client,
}

/// Poll until `shutdown` is cancelled.
pub async fn run(state: Arc<IndexerState>, shutdown: CancellationToken) {
    info!(contract = %state.config.contract_id, "Indexer starting");

    let mut cursor = match db::load_cursor(&state.pool).await {
        Ok(saved) => saved,
        Err(e) => {
            error!("Could not load indexer cursor, starting fresh: {e}");
            Cursor::default()
        }
    };
    if cursor.last_ledger <= 0 {
        cursor.last_ledger = i64::from(state.config.start_ledger);
    }

    info!(ledger = cursor.last_ledger, "Resuming");

    loop {
        match poll_once(&state, &cursor, &shutdown).await {
            Ok(next) => cursor = next,
            Err(e) => error!("Indexer poll error: {e}"),
        }

        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)) => {}
        }
    }

    info!(ledger = cursor.last_ledger, "Indexer stopped");
}

/// Perform a single poll iteration and return the cursor to resume from.
async fn poll_once(
    state: &IndexerState,
    cursor: &Cursor,
    shutdown: &CancellationToken,
) -> Result<Cursor> {
    let config = &state.config;
    let start_ledger = u32::try_from(cursor.last_ledger).unwrap_or(config.start_ledger);

    let page = rpc::fetch_events(
        &state.client,
        &config.rpc_url,
        &config.contract_id,
        start_ledger,
        cursor.last_cursor.as_deref(),
        config.events_per_page,
        shutdown,
    )
    .await?;

    if !page.events.is_empty() {
        let decoded = rpc::decode_events(&page.events, &config.contract_id);
        let inserted = db::insert_events(&state.pool, &decoded).await?;
        info!(
            raw = page.events.len(),
            stored = inserted,
            "Polled contract events"
        );
    }

    // Cancelled during backoff: nothing new was learned.
    if page.cursor.is_none() && page.latest_ledger.is_none() {
        return Ok(cursor.clone());
    }

    let next = Cursor {
        last_ledger: page
            .latest_ledger
            .map(|l| l as i64)
            .unwrap_or(cursor.last_ledger)
            .max(cursor.last_ledger),
        // Keep paging from the previous position if the RPC didn't hand back a new one.
        last_cursor: page.cursor.or_else(|| cursor.last_cursor.clone()),
    };

    db::save_cursor(&state.pool, &next).await?;
    Ok(next)
}
