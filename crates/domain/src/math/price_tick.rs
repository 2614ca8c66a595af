use crate::error::DomainError;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Returns the square root of the price at a given tick.
/// sqrt(P) = 1.0001 ^ (tick / 2)
pub fn tick_to_sqrt_price(tick: i32) -> Result<Decimal, DomainError> {
    let base = 1.0001f64;
    let sqrt_price = base.powf(f64::from(tick) / 2.0);
    Decimal::from_f64(sqrt_price).ok_or(DomainError::Overflow("converting sqrt price"))
}

/// Returns the price corresponding to a given tick.
/// P = 1.0001 ^ tick
pub fn tick_to_price(tick: i32) -> Result<Decimal, DomainError> {
    let base = 1.0001f64;
    let price_f64 = base.powi(tick);
    Decimal::from_f64(price_f64).ok_or(DomainError::Overflow("converting price"))
}
