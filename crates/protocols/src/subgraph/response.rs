use crate::SourceError;
use clmm_monitor_domain::{Position, TickRange, TokenHolding};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Top-level GraphQL response.
#[derive(Debug, Deserialize)]
pub struct GraphResponse {
    pub data: Option<PositionsData>,
    pub errors: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct PositionsData {
    pub positions: Option<Vec<RawPosition>>,
}

/// GraphQL `BigInt` values arrive as strings; plain `Int` fields as numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BigIntField {
    Text(String),
    Number(serde_json::Number),
}

impl BigIntField {
    fn parse<T: FromStr>(&self, what: &str, position: &str) -> Result<T, SourceError> {
        let text = self.to_string();
        text.parse().map_err(|_| {
            SourceError::Malformed(format!("position {position}: invalid {what} `{text}`"))
        })
    }
}

impl fmt::Display for BigIntField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawTick {
    pub index: BigIntField,
}

#[derive(Debug, Deserialize)]
pub struct RawToken {
    pub symbol: String,
    pub decimals: Option<BigIntField>,
}

#[derive(Debug, Deserialize)]
pub struct RawPool {
    pub id: String,
    /// Null until the pool is initialized.
    pub tick: Option<BigIntField>,
    pub token0: Option<RawToken>,
    pub token1: Option<RawToken>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPosition {
    pub id: String,
    pub liquidity: BigIntField,
    pub tick_lower: RawTick,
    pub tick_upper: RawTick,
    pub pool: RawPool,
}

impl RawToken {
    fn to_holding(&self, position: &str) -> Result<TokenHolding, SourceError> {
        let holding = TokenHolding::new(self.symbol.clone());
        match &self.decimals {
            Some(decimals) => Ok(holding.with_decimals(decimals.parse("decimals", position)?)),
            None => Ok(holding),
        }
    }
}

impl RawPosition {
    /// Maps the entity into a [`Position`]; `None` when the pool has no tick yet.
    pub fn into_position(self) -> Result<Option<Position>, SourceError> {
        let id = self.id.as_str();
        let Some(tick) = &self.pool.tick else {
            warn!(position = %id, pool = %self.pool.id, "Pool has no current tick, skipping position");
            return Ok(None);
        };

        let range = TickRange::new(
            self.tick_lower.index.parse("tickLower", id)?,
            self.tick_upper.index.parse("tickUpper", id)?,
        );
        let mut position = Position::new(
            id,
            self.pool.id.clone(),
            range,
            tick.parse("pool tick", id)?,
            self.liquidity.parse("liquidity", id)?,
        );

        if let (Some(token0), Some(token1)) = (&self.pool.token0, &self.pool.token1) {
            position = position
                .with_tokens(token0.to_holding(id)?, token1.to_holding(id)?)
                .with_underlying_amounts();
        }

        Ok(Some(position))
    }
}

impl GraphResponse {
    /// Converts the response into a snapshot, surfacing GraphQL errors.
    pub fn into_positions(self) -> Result<Vec<Position>, SourceError> {
        if let Some(errors) = self.errors {
            return Err(SourceError::Query(errors.to_string()));
        }

        let raw = self
            .data
            .and_then(|data| data.positions)
            .ok_or_else(|| SourceError::Malformed("missing data.positions".to_string()))?;

        let mut positions = Vec::with_capacity(raw.len());
        for entity in raw {
            if let Some(position) = entity.into_position()? {
                positions.push(position);
            }
        }
        Ok(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<Vec<Position>, SourceError> {
        serde_json::from_value::<GraphResponse>(value)
            .unwrap()
            .into_positions()
    }

    #[test]
    fn test_maps_positions() {
        let positions = parse(json!({
            "data": { "positions": [
                {
                    "id": "1234",
                    "liquidity": "340282366920938463463374607431768211455",
                    "tickLower": { "index": "-100" },
                    "tickUpper": { "index": "100" },
                    "pool": {
                        "id": "0xpool",
                        "tick": "50",
                        "token0": { "symbol": "WBNB", "decimals": "18" },
                        "token1": { "symbol": "USDT", "decimals": "18" }
                    }
                },
                {
                    "id": "5678",
                    "liquidity": 0,
                    "tickLower": { "index": -60 },
                    "tickUpper": { "index": 60 },
                    "pool": { "id": "0xother", "tick": 120 }
                }
            ]}
        }))
        .unwrap();

        assert_eq!(positions.len(), 2);
        let first = &positions[0];
        assert_eq!(first.id.as_str(), "1234");
        assert_eq!(first.pool_id, "0xpool");
        assert_eq!(first.range, TickRange::new(-100, 100));
        assert_eq!(first.tick_current, 50);
        assert_eq!(first.liquidity, u128::MAX);
        assert_eq!(first.pair_label().as_deref(), Some("WBNB/USDT"));
        assert!(first.is_in_range());

        let second = &positions[1];
        assert_eq!(second.liquidity, 0);
        assert!(second.token0.is_none());
        assert!(!second.is_in_range());
    }

    #[test]
    fn test_empty_positions_is_not_an_error() {
        let positions = parse(json!({ "data": { "positions": [] } })).unwrap();
        assert!(positions.is_empty());
    }

    #[test]
    fn test_graphql_errors() {
        let err = parse(json!({ "errors": [{ "message": "indexing_error" }] })).unwrap_err();
        assert!(matches!(err, SourceError::Query(msg) if msg.contains("indexing_error")));
    }

    #[test]
    fn test_missing_positions_is_malformed() {
        let err = parse(json!({ "data": null })).unwrap_err();
        assert!(matches!(err, SourceError::Malformed(_)));
    }

    #[test]
    fn test_invalid_tick_is_malformed() {
        let err = parse(json!({
            "data": { "positions": [{
                "id": "1",
                "liquidity": "1",
                "tickLower": { "index": "abc" },
                "tickUpper": { "index": "10" },
                "pool": { "id": "0xpool", "tick": "0" }
            }]}
        }))
        .unwrap_err();
        assert!(matches!(err, SourceError::Malformed(msg) if msg.contains("tickLower")));
    }

    #[test]
    fn test_uninitialized_pool_is_skipped() {
        let positions = parse(json!({
            "data": { "positions": [{
                "id": "1",
                "liquidity": "1",
                "tickLower": { "index": "-10" },
                "tickUpper": { "index": "10" },
                "pool": { "id": "0xpool", "tick": null }
            }]}
        }))
        .unwrap();
        assert!(positions.is_empty());
    }
}
