//! Main scenario calculator.

use serde::Serialize;

use crate::by_product::{self, ByProduct, ByProductKind};
use crate::scenario::MillingScenario;
use crate::yields::{calculate_total_yield, weight_factor};

/// Full breakdown of one milling scenario.
///
/// CMR-obligation figures are based on `standard_paddy`; every physical yield
/// figure is based on `actual_paddy`. Head rice is not a revenue line here: it
/// discharges the delivery obligation, so only by-products earn money.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResults {
    pub standard_paddy: f64,
    pub actual_paddy: f64,
    pub out_turn_rate: f64,
    pub weight_factor: f64,
    /// CMR rice the mill must deliver.
    pub required_rice: f64,
    pub actual_head_rice: f64,
    pub rice_shortfall: f64,
    pub rice_shortfall_cost: f64,
    pub by_products: [ByProduct; 5],
    pub total_by_product_revenue: f64,
    pub total_working_costs: f64,
    pub net_balance: f64,
    pub yield_total: f64,
}

impl CalculationResults {
    pub fn by_product(&self, kind: ByProductKind) -> &ByProduct {
        // `by_products` is always built from `ByProductKind::ALL`, in order.
        &self.by_products[kind as usize]
    }
}

/// Rice still to be bought when production falls short of a requirement.
///
/// Surplus is not credited anywhere, so this never goes below zero.
pub(crate) fn shortfall(required: f64, produced: f64) -> f64 {
    (required - produced).max(0.0)
}

/// Compute the full breakdown for a scenario.
pub fn calculate_results(scenario: &MillingScenario) -> CalculationResults {
    let standard_paddy = scenario.paddy_quantity;
    let weight_factor = weight_factor(scenario.use_41kg_bags);
    let actual_paddy = standard_paddy * weight_factor;
    let out_turn_rate = scenario.rice_type.out_turn_rate();

    let required_rice = standard_paddy * out_turn_rate;
    let actual_head_rice = actual_paddy * scenario.yields.head_rice / 100.0;
    let rice_shortfall = shortfall(required_rice, actual_head_rice);
    let rice_shortfall_cost = rice_shortfall * scenario.rice_purchase_rate;

    let by_products =
        by_product::by_products(actual_paddy, &scenario.yields, &scenario.by_product_rates);
    let total_by_product_revenue = by_product::total_value(&by_products);
    let total_working_costs = scenario.working_costs.total();
    let net_balance = total_by_product_revenue - rice_shortfall_cost - total_working_costs;

    let yield_total = calculate_total_yield(&scenario.yields);
    if !scenario.yields.is_balanced() {
        tracing::warn!(yield_total, "yield percentages do not add up to 100");
    }

    tracing::debug!(
        rice_type = %scenario.rice_type,
        standard_paddy,
        actual_paddy,
        required_rice,
        rice_shortfall,
        net_balance,
        "calculated milling results"
    );

    CalculationResults {
        standard_paddy,
        actual_paddy,
        out_turn_rate,
        weight_factor,
        required_rice,
        actual_head_rice,
        rice_shortfall,
        rice_shortfall_cost,
        by_products,
        total_by_product_revenue,
        total_working_costs,
        net_balance,
        yield_total,
    }
}
