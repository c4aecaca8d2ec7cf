//! Price arithmetic for trades and services.
//!
//! Buy prices and service costs round up; sell prices truncate. The
//! resulting spread means selling back what was just bought always
//! returns less than was paid.

/// Convert credits to floating point for multiplication.
#[allow(clippy::cast_precision_loss)]
const fn credits_f64(credits: i64) -> f64 {
    credits as f64
}

/// Truncate or round a price back into credits. `as` saturates and maps
/// NaN to zero.
#[allow(clippy::cast_possible_truncation)]
fn to_credits(value: f64) -> i64 {
    value as i64
}

/// Price of one unit bought from a market: `ceil(base × buy_mult × (1 + tax))`.
///
/// Tax applies only when positive.
pub fn buy_unit_price(base_value: i64, buy_mult: f64, tax_rate: f64) -> i64 {
    let mut price = credits_f64(base_value) * buy_mult;
    if tax_rate > 0.0 {
        price *= 1.0 + tax_rate;
    }
    to_credits(price.ceil())
}

/// Price of one unit sold to a market: `trunc(base × sell_mult)`.
pub fn sell_unit_price(base_value: i64, sell_mult: f64) -> i64 {
    to_credits((credits_f64(base_value) * sell_mult).trunc())
}

/// Price of topping up `missing` units of fuel: `ceil(missing × base × mult)`.
pub fn refuel_cost(missing: f64, base_price: f64, fuel_cost_mult: f64) -> i64 {
    to_credits((missing * base_price * fuel_cost_mult).ceil())
}

/// Quantity-weighted average cost after adding `quantity` units bought at
/// `unit_price` to a stack of `held` units averaging `avg_cost`.
pub fn blended_cost(held: u32, avg_cost: f64, quantity: u32, unit_price: i64) -> f64 {
    let total = f64::from(held) + f64::from(quantity);
    if total <= 0.0 {
        return 0.0;
    }
    f64::from(held).mul_add(avg_cost, f64::from(quantity) * credits_f64(unit_price)) / total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_price_rounds_up_with_tax() {
        // 100 * 1.1 * 1.05 = 115.5
        assert_eq!(buy_unit_price(100, 1.1, 0.05), 116);
        assert_eq!(buy_unit_price(100, 1.5, 0.0), 150);
        assert_eq!(buy_unit_price(100, 1.0, -0.2), 100);
    }

    #[test]
    fn sell_price_truncates() {
        assert_eq!(sell_unit_price(100, 0.9), 90);
        assert_eq!(sell_unit_price(15, 0.25), 3);
    }

    #[test]
    fn refuel_rounds_up() {
        assert_eq!(refuel_cost(12.2, 1.0, 1.0), 13);
        assert_eq!(refuel_cost(10.0, 1.0, 2.5), 25);
    }

    #[test]
    fn average_cost_is_quantity_weighted() {
        assert!((blended_cost(0, 0.0, 3, 116) - 116.0).abs() < 1e-9);
        // 2 @ 100 and 2 @ 120.
        assert!((blended_cost(2, 100.0, 2, 120) - 110.0).abs() < 1e-9);
        assert!(blended_cost(0, 0.0, 0, 50).abs() < f64::EPSILON);
    }
}
