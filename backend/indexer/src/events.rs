//! Canonical event types emitted by the SmartFunding contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/smart_funding/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the SmartFunding contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The owner opened the campaign (`init` topic).
    CampaignInitialized,
    /// An investor contributed (`invest` topic).
    Invested,
    /// An investor was paid their reward (`claim` topic).
    RewardClaimed,
    /// An investor got their contribution back (`refund` topic).
    Refunded,
    /// The campaign reached a terminal stage (`finalized` topic).
    CampaignFinalized,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "init" => Self::CampaignInitialized,
            "invest" => Self::Invested,
            "claim" => Self::RewardClaimed,
            "refund" => Self::Refunded,
            "finalized" => Self::CampaignFinalized,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CampaignInitialized => "campaign_initialized",
            Self::Invested => "invested",
            Self::RewardClaimed => "reward_claimed",
            Self::Refunded => "refunded",
            Self::CampaignFinalized => "campaign_finalized",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the second topic carries the investor address.
    pub fn is_investor_scoped(&self) -> bool {
        matches!(self, Self::Invested | Self::RewardClaimed | Self::Refunded)
    }
}

/// Name of a contract `Stage` discriminant as carried in `finalized` events.
pub fn stage_name(discriminant: u64) -> &'static str {
    match discriminant {
        0 => "uninitialized",
        1 => "active",
        2 => "success",
        3 => "failed",
        _ => "unknown",
    }
}

/// A fully decoded SmartFunding event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingEvent {
    /// RPC event id, unique across the network.
    pub event_id: String,
    pub event_type: String,
    pub investor: Option<String>,
    pub amount: Option<String>,
    pub stage: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub investor: Option<String>,
    pub amount: Option<String>,
    pub stage: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}

/// Per-investor totals derived from indexed events.
///
/// Amounts are `i128` on-chain, so they are summed as `i128` and rendered as
/// decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvestorSummary {
    pub investor: String,
    pub invested: String,
    pub claimed: String,
    pub refunded: String,
    /// Invested minus refunded.
    pub outstanding: String,
    pub event_count: usize,
}

/// Fold an investor's events into an [`InvestorSummary`].
///
/// Records with an unparseable amount are counted but contribute nothing.
pub fn summarize(investor: &str, records: &[EventRecord]) -> InvestorSummary {
    let mut invested: i128 = 0;
    let mut claimed: i128 = 0;
    let mut refunded: i128 = 0;

    for record in records {
        let amount = record
            .amount
            .as_deref()
            .and_then(|a| a.parse::<i128>().ok())
            .unwrap_or(0);
        match record.event_type.as_str() {
            "invested" => invested = invested.saturating_add(amount),
            "reward_claimed" => claimed = claimed.saturating_add(amount),
            "refunded" => refunded = refunded.saturating_add(amount),
            _ => {}
        }
    }

    InvestorSummary {
        investor: investor.to_string(),
        invested: invested.to_string(),
        claimed: claimed.to_string(),
        refunded: refunded.to_string(),
        outstanding: invested.saturating_sub(refunded).to_string(),
        event_count: records.len(),
    }
}
