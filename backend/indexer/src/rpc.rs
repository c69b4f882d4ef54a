//! Soroban RPC client — polls `getEvents` and decodes SmartFunding events.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns an error or rate-limit
//!   response, up to [`MAX_BACKOFF_SECS`] seconds.
//! * Transient network errors (connection reset, timeout) are retried silently.
//! * Retries stop as soon as the shutdown token is cancelled.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{stage_name, EventKind, FundingEvent};

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

/// JSON-RPC codes that will never succeed on retry (invalid request / method).
const HARD_ERROR_CODES: [i64; 2] = [-32600, -32601];

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

/// One event as returned by `getEvents` with `xdrFormat: json`.
#[derive(Debug, Deserialize, Clone)]
pub struct RawEvent {
    /// Unique event id assigned by the RPC (`<toid>-<index>`).
    pub id: Option<String>,
    /// Topic list as JSON ScVals.
    #[serde(rename = "topicJson", default)]
    pub topic: Vec<Value>,
    /// Event data as a JSON ScVal.
    #[serde(rename = "valueJson", default)]
    pub value: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
}

/// One page of results from `getEvents`.
#[derive(Debug)]
pub struct EventPage {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    pub latest_ledger: Option<u64>,
}

/// Doubling delay capped at [`MAX_BACKOFF_SECS`].
#[derive(Debug)]
struct Backoff {
    secs: u64,
}

impl Backoff {
    fn new() -> Self {
        Backoff {
            secs: INITIAL_BACKOFF_SECS,
        }
    }

    /// Return the current delay and double the next one.
    fn next_delay(&mut self) -> Duration {
        let delay = Duration::from_secs(self.secs);
        self.secs = (self.secs * 2).min(MAX_BACKOFF_SECS);
        delay
    }
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Fetch a page of events from the RPC.
///
/// * `start_ledger` — the ledger sequence to scan from (inclusive).
/// * `cursor`       — optional opaque pagination cursor from a previous response.
/// * `limit`        — maximum number of events to return.
///
/// Soft failures are retried until they succeed or `shutdown` fires, in which
/// case an empty page is returned.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_id: &str,
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
    shutdown: &CancellationToken,
) -> Result<EventPage> {
    let mut backoff = Backoff::new();
    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "getEvents",
        "params": build_params(contract_id, start_ledger, cursor, limit),
    });

    loop {
        let retry_reason = match client.post(rpc_url).json(&request).send().await {
            Err(e) => format!("request failed: {e}"),
            Ok(resp) if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS => {
                "rate-limited".to_string()
            }
            Ok(resp) => {
                let body: RpcResponse = resp.json().await?;
                match body.error {
                    Some(err) if HARD_ERROR_CODES.contains(&err.code) => {
                        return Err(IndexerError::Rpc {
                            code: err.code,
                            message: err.message,
                        });
                    }
                    Some(err) => format!("soft error {} {}", err.code, err.message),
                    None => {
                        let result = body.result.ok_or_else(|| {
                            IndexerError::EventParse("Empty result from getEvents".to_string())
                        })?;
                        debug!(
                            events = result.events.len(),
                            latest_ledger = ?result.latest_ledger,
                            "Fetched events page"
                        );
                        return Ok(EventPage {
                            events: result.events,
                            cursor: result.cursor,
                            latest_ledger: result.latest_ledger,
                        });
                    }
                }
            }
        };

        let delay = backoff.next_delay();
        warn!("RPC {retry_reason} (will retry in {}s)", delay.as_secs());
        tokio::select! {
            _ = shutdown.cancelled() => {
                return Ok(EventPage { events: Vec::new(), cursor: None, latest_ledger: None });
            }
            _ = tokio::time::sleep(delay) => {}
        }
    }
}

fn build_params(contract_id: &str, start_ledger: u32, cursor: Option<&str>, limit: u32) -> Value {
    let mut params = json!({
        "filters": [
            {
                "type": "contract",
                "contractIds": [contract_id]
            }
        ],
        "pagination": {
            "limit": limit
        },
        "xdrFormat": "json"
    });

    if let Some(cur) = cursor {
        params["pagination"]["cursor"] = json!(cur);
    } else {
        params["startLedger"] = json!(start_ledger);
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Decode a list of raw RPC events into [`FundingEvent`] structs.
pub fn decode_events(raw: &[RawEvent], contract_id: &str) -> Vec<FundingEvent> {
    raw.iter()
        .filter_map(|e| decode_single(e, contract_id))
        .collect()
}

/// Events from failed contract calls and events without an RPC id are skipped.
fn decode_single(raw: &RawEvent, contract_id: &str) -> Option<FundingEvent> {
    if raw.in_successful_contract_call == Some(false) {
        return None;
    }
    let event_id = raw.id.clone()?;
    let first_topic = raw.topic.first()?;
    let kind = EventKind::from_topic(&topic_scalar(first_topic));

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    let topic_investor = if kind.is_investor_scoped() {
        raw.topic.get(1).map(topic_scalar)
    } else {
        None
    };

    let (investor, amount, stage) = decode_data(&raw.value, &kind);

    Some(FundingEvent {
        event_id,
        event_type: kind.as_str().to_string(),
        investor: topic_investor.or(investor),
        amount,
        stage,
        ledger,
        timestamp,
        contract_id: raw
            .contract_id
            .clone()
            .unwrap_or_else(|| contract_id.to_string()),
        tx_hash: raw.tx_hash.clone(),
    })
}

/// Pull `(investor, amount, stage)` out of the event's data map.
fn decode_data(value: &Value, kind: &EventKind) -> (Option<String>, Option<String>, Option<String>) {
    match kind {
        EventKind::CampaignInitialized => (None, field(value, "goal"), None),
        EventKind::Invested | EventKind::RewardClaimed | EventKind::Refunded => {
            (field(value, "investor"), field(value, "amount"), None)
        }
        EventKind::CampaignFinalized => {
            let stage = field(value, "stage")
                .and_then(|s| s.parse::<u64>().ok())
                .map(|d| stage_name(d).to_string());
            (None, field(value, "pool"), stage)
        }
        EventKind::Unknown => (None, None, None),
    }
}

/// Look up `key` in a contract-type map, which the RPC renders either as a
/// plain object or as `{"map": [{"key": .., "val": ..}, ..]}`.
fn field(value: &Value, key: &str) -> Option<String> {
    if let Some(v) = value.get(key) {
        return scalar(v);
    }
    value
        .get("map")
        .and_then(Value::as_array)?
        .iter()
        .find(|entry| entry.get("key").and_then(scalar).as_deref() == Some(key))
        .and_then(|entry| entry.get("val"))
        .and_then(scalar)
}

/// Reduce a JSON ScVal to its scalar text: plain strings and numbers pass
/// through, single-key wrappers such as `{"i128": "5"}` or
/// `{"type":"symbol","value":"invest"}` are unwrapped.
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => {
            if let Some(inner) = map.get("value") {
                return scalar(inner);
            }
            if map.len() == 1 {
                return map.values().next().and_then(scalar);
            }
            None
        }
        _ => None,
    }
}

/// Text of a topic ScVal such as `{"symbol": "invest"}`; empty if not a scalar.
fn topic_scalar(topic: &Value) -> String {
    scalar(topic).unwrap_or_default()
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
