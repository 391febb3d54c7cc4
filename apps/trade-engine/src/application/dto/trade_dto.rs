//! Trade DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::shared::Timestamp;
use crate::domain::trading::aggregate::Trade;
use crate::domain::trading::value_objects::{TradeResolution, TradeStatus};

/// A trade as presented on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeDto {
    /// Trade identifier.
    pub id: String,
    /// Proposing trainer.
    pub sender_id: String,
    /// Responding trainer.
    pub receiver_id: String,
    /// Creatures the sender put on offer.
    pub pokemons_offered_ids: Vec<String>,
    /// Creatures the sender wants in return.
    pub pokemons_wanted_ids: Vec<String>,
    /// Lifecycle status code.
    pub status_code: TradeStatus,
    /// Who resolved the trade, for terminal trades.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<String>,
    /// Executor failure code, when the executor declined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Last update timestamp.
    pub updated_at: Timestamp,
}

impl TradeDto {
    /// Build from a domain trade.
    #[must_use]
    pub fn from_trade(trade: &Trade) -> Self {
        let (resolved_by, failure_reason) = match trade.resolution() {
            Some(TradeResolution::Receiver) => (Some("RECEIVER".to_string()), None),
            Some(TradeResolution::Executor { reason }) => {
                (Some("EXECUTOR".to_string()), Some(reason.code().to_string()))
            }
            None => (None, None),
        };
        Self {
            id: trade.id().to_string(),
            sender_id: trade.sender_id().to_string(),
            receiver_id: trade.receiver_id().to_string(),
            pokemons_offered_ids: trade.offered().iter().map(ToString::to_string).collect(),
            pokemons_wanted_ids: trade.wanted().iter().map(ToString::to_string).collect(),
            status_code: trade.status(),
            resolved_by,
            failure_reason,
            created_at: trade.created_at(),
            updated_at: trade.updated_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::{PokemonId, TrainerId};
    use crate::domain::trading::aggregate::ProposeTradeCommand;
    use crate::domain::trading::value_objects::TradeFailureReason;

    fn trade() -> Trade {
        Trade::propose(ProposeTradeCommand {
            sender_id: TrainerId::new("sender"),
            receiver_id: TrainerId::new("receiver"),
            offered: vec![PokemonId::new("p-1")],
            wanted: vec![PokemonId::new("p-2")],
        })
        .unwrap()
    }

    #[test]
    fn pending_trade_has_no_resolution_fields() {
        let json = serde_json::to_value(TradeDto::from_trade(&trade())).unwrap();
        assert_eq!(json["statusCode"], "PROPOSITION");
        assert!(json.get("resolvedBy").is_none());
        assert!(json.get("failureReason").is_none());
    }

    #[test]
    fn executor_decline_carries_failure_code() {
        let mut t = trade();
        t.decline_by_executor(TradeFailureReason::StaleInventory)
            .unwrap();
        let json = serde_json::to_value(TradeDto::from_trade(&t)).unwrap();
        assert_eq!(json["statusCode"], "DECLINED");
        assert_eq!(json["resolvedBy"], "EXECUTOR");
        assert_eq!(json["failureReason"], "STALE_INVENTORY");
    }

    #[test]
    fn receiver_decline_has_no_failure_code() {
        let mut t = trade();
        t.decline_by_receiver().unwrap();
        let json = serde_json::to_value(TradeDto::from_trade(&t)).unwrap();
        assert_eq!(json["resolvedBy"], "RECEIVER");
        assert!(json.get("failureReason").is_none());
    }
}
