//! Token amounts backing a concentrated-liquidity position.

use crate::error::DomainError;
use crate::math::price_tick::tick_to_sqrt_price;
use crate::value_objects::tick_range::TickRange;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

fn ordered(sqrt_price_a: Decimal, sqrt_price_b: Decimal) -> (Decimal, Decimal) {
    if sqrt_price_a < sqrt_price_b {
        (sqrt_price_a, sqrt_price_b)
    } else {
        (sqrt_price_b, sqrt_price_a)
    }
}

/// Amount of token0 (x) for a liquidity over a sqrt price interval.
/// delta_x = L * (sqrt(P_b) - sqrt(P_a)) / (sqrt(P_a) * sqrt(P_b))
pub fn get_amount0_delta(
    liquidity: Decimal,
    sqrt_price_a: Decimal,
    sqrt_price_b: Decimal,
) -> Result<Decimal, DomainError> {
    if sqrt_price_a <= Decimal::ZERO || sqrt_price_b <= Decimal::ZERO {
        return Err(DomainError::InvalidInput("sqrt price must be positive"));
    }
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);

    let num = upper - lower;
    let den = lower
        .checked_mul(upper)
        .ok_or(DomainError::Overflow("sqrt price product"))?;
    if den.is_zero() {
        return Err(DomainError::InvalidInput("denominator zero"));
    }

    let factor = num
        .checked_div(den)
        .ok_or(DomainError::Overflow("amount0 factor"))?;
    liquidity
        .checked_mul(factor)
        .ok_or(DomainError::Overflow("amount0"))
}

/// Amount of token1 (y) for a liquidity over a sqrt price interval.
/// delta_y = L * (sqrt(P_b) - sqrt(P_a))
pub fn get_amount1_delta(
    liquidity: Decimal,
    sqrt_price_a: Decimal,
    sqrt_price_b: Decimal,
) -> Result<Decimal, DomainError> {
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    liquidity
        .checked_mul(upper - lower)
        .ok_or(DomainError::Overflow("amount1"))
}

/// Raw (unscaled) token0/token1 amounts a position holds at the current tick.
pub fn underlying_amounts(
    liquidity: u128,
    range: TickRange,
    tick_current: i32,
) -> Result<(Decimal, Decimal), DomainError> {
    if range.is_degenerate() {
        return Err(DomainError::InvalidInput("tick_lower above tick_upper"));
    }
    let liquidity = Decimal::from_u128(liquidity).ok_or(DomainError::Overflow("liquidity"))?;
    let sqrt_lower = tick_to_sqrt_price(range.lower)?;
    let sqrt_upper = tick_to_sqrt_price(range.upper)?;

    if tick_current < range.lower {
        Ok((
            get_amount0_delta(liquidity, sqrt_lower, sqrt_upper)?,
            Decimal::ZERO,
        ))
    } else if tick_current >= range.upper {
        Ok((
            Decimal::ZERO,
            get_amount1_delta(liquidity, sqrt_lower, sqrt_upper)?,
        ))
    } else {
        let sqrt_current = tick_to_sqrt_price(tick_current)?;
        Ok((
            get_amount0_delta(liquidity, sqrt_current, sqrt_upper)?,
            get_amount1_delta(liquidity, sqrt_lower, sqrt_current)?,
        ))
    }
}

/// Converts a raw integer amount into whole tokens.
pub fn scale_by_decimals(raw: Decimal, decimals: u8) -> Result<Decimal, DomainError> {
    let unit = Decimal::try_from_i128_with_scale(1, u32::from(decimals))
        .map_err(|_| DomainError::Overflow("token decimals"))?;
    raw.checked_mul(unit)
        .ok_or(DomainError::Overflow("scaled amount"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_deltas() {
        // Liquidity 1000, sqrt price 1 -> 2
        // delta_y = 1000 * (2 - 1) = 1000
        // delta_x = 1000 * (1/1 - 1/2) = 500
        let liquidity = dec!(1000);
        let dy = get_amount1_delta(liquidity, dec!(1), dec!(2)).unwrap();
        assert_eq!(dy, dec!(1000));

        let dx = get_amount0_delta(liquidity, dec!(2), dec!(1)).unwrap();
        assert_eq!(dx, dec!(500));
    }

    #[test]
    fn test_amount0_rejects_zero_price() {
        assert!(get_amount0_delta(dec!(1), Decimal::ZERO, dec!(1)).is_err());
    }

    #[test]
    fn test_underlying_below_range_is_all_token0() {
        let (a0, a1) = underlying_amounts(1_000_000, TickRange::new(100, 200), 50).unwrap();
        assert!(a0 > Decimal::ZERO);
        assert_eq!(a1, Decimal::ZERO);
    }

    #[test]
    fn test_underlying_above_range_is_all_token1() {
        let (a0, a1) = underlying_amounts(1_000_000, TickRange::new(-200, -100), 0).unwrap();
        assert_eq!(a0, Decimal::ZERO);
        assert!(a1 > Decimal::ZERO);
    }

    #[test]
    fn test_underlying_in_range_holds_both() {
        let (a0, a1) = underlying_amounts(1_000_000, TickRange::new(-100, 100), 0).unwrap();
        assert!(a0 > Decimal::ZERO);
        assert!(a1 > Decimal::ZERO);
    }

    #[test]
    fn test_underlying_rejects_degenerate_range() {
        assert!(underlying_amounts(1, TickRange::new(10, -10), 0).is_err());
    }

    #[test]
    fn test_scale_by_decimals() {
        assert_eq!(
            scale_by_decimals(dec!(1500000000000000000), 18).unwrap(),
            dec!(1.5)
        );
        assert_eq!(scale_by_decimals(dec!(2500000), 6).unwrap(), dec!(2.5));
        assert!(scale_by_decimals(dec!(1), 40).is_err());
    }
}
