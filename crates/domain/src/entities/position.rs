use crate::entities::token::TokenHolding;
use crate::enums::RangeStatus;
use crate::math::concentrated_liquidity::{scale_by_decimals, underlying_amounts};
use crate::value_objects::tick_range::TickRange;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a position across polling cycles.
///
/// Sources use whatever their backend exposes: the subgraph entity id or
/// the position NFT token id rendered in decimal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PositionId(pub String);

impl PositionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PositionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PositionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for PositionId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A liquidity position owned by the monitored wallet, normalized from
/// whichever source produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub pool_id: String,
    pub range: TickRange,
    /// The pool's current tick at fetch time.
    pub tick_current: i32,
    pub liquidity: u128,
    /// Pool fee in hundredths of a basis point, when the source knows it.
    pub fee_tier: Option<u32>,
    pub token0: Option<TokenHolding>,
    pub token1: Option<TokenHolding>,
}

impl Position {
    pub fn new(
        id: impl Into<PositionId>,
        pool_id: impl Into<String>,
        range: TickRange,
        tick_current: i32,
        liquidity: u128,
    ) -> Self {
        Self {
            id: id.into(),
            pool_id: pool_id.into(),
            range,
            tick_current,
            liquidity,
            fee_tier: None,
            token0: None,
            token1: None,
        }
    }

    #[must_use]
    pub fn with_fee_tier(mut self, fee_tier: u32) -> Self {
        self.fee_tier = Some(fee_tier);
        self
    }

    #[must_use]
    pub fn with_tokens(mut self, token0: TokenHolding, token1: TokenHolding) -> Self {
        self.token0 = Some(token0);
        self.token1 = Some(token1);
        self
    }

    pub fn tick_lower(&self) -> i32 {
        self.range.lower
    }

    pub fn tick_upper(&self) -> i32 {
        self.range.upper
    }

    /// True iff `tick_lower <= tick_current <= tick_upper`.
    ///
    /// A degenerate range (`tick_lower > tick_upper`) is out of range.
    pub fn is_in_range(&self) -> bool {
        self.range.contains(self.tick_current)
    }

    pub fn classify(&self) -> RangeStatus {
        RangeStatus::from(self.is_in_range())
    }

    /// Fills in the current underlying amount of each token.
    ///
    /// Amounts are only computed when both tokens carry their decimals;
    /// otherwise, or if the math overflows, the position is returned as is.
    #[must_use]
    pub fn with_underlying_amounts(mut self) -> Self {
        let decimals = match (&self.token0, &self.token1) {
            (Some(token0), Some(token1)) => token0.decimals.zip(token1.decimals),
            _ => None,
        };
        let Some((decimals0, decimals1)) = decimals else {
            return self;
        };

        let scaled = underlying_amounts(self.liquidity, self.range, self.tick_current).and_then(
            |(raw0, raw1)| {
                Ok((
                    scale_by_decimals(raw0, decimals0)?,
                    scale_by_decimals(raw1, decimals1)?,
                ))
            },
        );
        if let (Ok((amount0, amount1)), Some(token0), Some(token1)) =
            (scaled, self.token0.as_mut(), self.token1.as_mut())
        {
            token0.amount = Some(amount0);
            token1.amount = Some(amount1);
        }
        self
    }

    /// `WBNB/USDT` style label when both symbols are known.
    pub fn pair_label(&self) -> Option<String> {
        match (&self.token0, &self.token1) {
            (Some(a), Some(b)) => Some(format!("{}/{}", a.symbol, b.symbol)),
            _ => None,
        }
    }
}
