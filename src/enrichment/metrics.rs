//! Derived order metrics.
//!
//! Each function takes already-defaulted inputs. [`OrderMetrics::compute`] evaluates them in
//! dependency order; nothing it produces is fed back in as an input.

/// `Quantity * UnitPrice`.
pub fn total_revenue(quantity: f64, unit_price: f64) -> f64 {
    quantity * unit_price
}

/// `TotalRevenue * (1 - Discount) - ShippingCost`.
pub fn profit(total_revenue: f64, discount: f64, shipping_cost: f64) -> f64 {
    total_revenue * (1.0 - discount) - shipping_cost
}

/// `TotalRevenue * Discount`.
pub fn discount_amount(total_revenue: f64, discount: f64) -> f64 {
    total_revenue * discount
}

/// `ShippingCost / Quantity`, zero when the quotient is infinite.
///
/// A zero quantity always yields `0.0`, including `0 / 0` and a negative shipping cost.
pub fn shipping_cost_per_unit(shipping_cost: f64, quantity: f64) -> f64 {
    if quantity == 0.0 {
        return 0.0;
    }
    let per_unit = shipping_cost / quantity;
    if per_unit.is_infinite() { 0.0 } else { per_unit }
}

/// The four derived values for one order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderMetrics {
    pub total_revenue: f64,
    pub profit: f64,
    pub discount_amount: f64,
    pub shipping_cost_per_unit: f64,
}

impl OrderMetrics {
    pub fn compute(quantity: f64, unit_price: f64, discount: f64, shipping_cost: f64) -> Self {
        let total_revenue = total_revenue(quantity, unit_price);
        Self {
            total_revenue,
            profit: profit(total_revenue, discount, shipping_cost),
            discount_amount: discount_amount(total_revenue, discount),
            shipping_cost_per_unit: shipping_cost_per_unit(shipping_cost, quantity),
        }
    }
}
