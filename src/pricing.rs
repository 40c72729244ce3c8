//! Geometric pricing for production tiers. Pure functions, no state.
//!
//! Prices grow by a fixed rate per unit owned. Bulk purchases use the
//! closed-form geometric series sum, an O(1) replacement for summing unit
//! prices in a loop. The closed form floors once at the end instead of per
//! term, so it can drift slightly below the loop sum for large quantities;
//! the drift bound is asserted in the property tests.

/// Price of the next single unit when `owned` units are already held.
pub fn unit_price(base_cost: f64, rate: f64, owned: u64) -> f64 {
    (base_cost * rate.powf(owned as f64)).floor()
}

/// Total price of the next `quantity` units bought in one transaction.
/// Returns 0 for `quantity == 0`.
pub fn bulk_price(base_cost: f64, rate: f64, owned: u64, quantity: u64) -> f64 {
    if quantity == 0 {
        return 0.0;
    }
    let first = base_cost * rate.powf(owned as f64);
    if (rate - 1.0).abs() < f64::EPSILON {
        return (first * quantity as f64).floor();
    }
    (first * (rate.powf(quantity as f64) - 1.0) / (rate - 1.0)).floor()
}

/// Refund for selling `quantity` of `owned` units: the bulk price of the
/// unit-indices being given up, times `refund_rate`, floored.
/// `None` when trying to sell more than owned.
pub fn sell_refund(
    base_cost: f64,
    rate: f64,
    owned: u64,
    quantity: u64,
    refund_rate: f64,
) -> Option<f64> {
    if quantity > owned {
        return None;
    }
    if quantity == 0 {
        return Some(0.0);
    }
    Some((bulk_price(base_cost, rate, owned - quantity, quantity) * refund_rate).floor())
}
