//! ACK requirement calculator: the engine run backwards from a rice target.
//!
//! Working costs are quoted for the mill's whole reference batch, so an ACK
//! only carries its share of them. The share is the ratio of the ACK's actual
//! paddy to the reference batch's actual paddy.

use serde::{Deserialize, Serialize};

use crate::by_product::{self, ByProduct, ByProductKind, ByProductRates};
use crate::engine::shortfall;
use crate::scenario::{MillingScenario, WorkingCosts};
use crate::yields::{ACK_QUANTITY_QUINTALS, RiceType, YieldStructure, weight_factor};

/// Inputs for one ACK requirement calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AckRequest {
    /// Finished rice to deliver, quintals (one ACK is 290).
    pub target_rice: f64,
    pub rice_type: RiceType,
    pub yields: YieldStructure,
    pub by_product_rates: ByProductRates,
    pub rice_purchase_rate: f64,
    /// Working costs of the whole reference batch, not of this ACK.
    pub working_costs: WorkingCosts,
    /// Standard paddy of the reference batch the working costs belong to.
    pub total_paddy_quantity: f64,
    pub use_41kg_bags: bool,
}

impl AckRequest {
    /// Reuse a calculator scenario, treating its paddy as the reference batch.
    pub fn from_scenario(target_rice: f64, scenario: &MillingScenario) -> Self {
        Self {
            target_rice,
            rice_type: scenario.rice_type,
            yields: scenario.yields,
            by_product_rates: scenario.by_product_rates,
            rice_purchase_rate: scenario.rice_purchase_rate,
            working_costs: scenario.working_costs,
            total_paddy_quantity: scenario.paddy_quantity,
            use_41kg_bags: scenario.use_41kg_bags,
        }
    }

    /// A single 290 quintal ACK against the scenario's batch.
    pub fn single_ack(scenario: &MillingScenario) -> Self {
        Self::from_scenario(ACK_QUANTITY_QUINTALS, scenario)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AckCalculationResults {
    pub target_rice: f64,
    pub out_turn_rate: f64,
    pub weight_factor: f64,
    pub required_standard_paddy: f64,
    pub required_actual_paddy: f64,
    pub actual_head_rice: f64,
    pub rice_shortfall: f64,
    pub rice_shortfall_cost: f64,
    pub by_products: [ByProduct; 5],
    pub total_by_product_revenue: f64,
    /// Reference batch in actual (weight-adjusted) terms.
    pub total_actual_paddy_for_all_paddy: f64,
    /// Unprorated working costs of the reference batch.
    pub reference_working_costs: f64,
    /// `required_actual_paddy / total_actual_paddy_for_all_paddy`; 0 without a reference.
    pub allocation_ratio: f64,
    /// Working costs prorated onto this ACK.
    pub total_working_costs: f64,
    pub net_profit: f64,
}

impl AckCalculationResults {
    pub fn by_product(&self, kind: ByProductKind) -> &ByProduct {
        &self.by_products[kind as usize]
    }
}

/// Number of ACKs a rice quantity amounts to.
pub fn acks_for_rice(rice_quintals: f64) -> f64 {
    rice_quintals / ACK_QUANTITY_QUINTALS
}

/// Paddy needed, yields and prorated costs for a target rice quantity.
///
/// A target larger than the reference batch could produce gives an allocation
/// ratio above 1; that is passed through unflagged.
pub fn calculate_ack_requirements(request: &AckRequest) -> AckCalculationResults {
    let out_turn_rate = request.rice_type.out_turn_rate();
    let weight_factor = weight_factor(request.use_41kg_bags);

    let required_standard_paddy = request.target_rice / out_turn_rate;
    let required_actual_paddy = required_standard_paddy * weight_factor;

    let actual_head_rice = required_actual_paddy * request.yields.head_rice / 100.0;
    let rice_shortfall = shortfall(request.target_rice, actual_head_rice);
    let rice_shortfall_cost = rice_shortfall * request.rice_purchase_rate;

    let by_products = by_product::by_products(
        required_actual_paddy,
        &request.yields,
        &request.by_product_rates,
    );
    let total_by_product_revenue = by_product::total_value(&by_products);

    let total_actual_paddy_for_all_paddy = request.total_paddy_quantity * weight_factor;
    let reference_working_costs = request.working_costs.total();
    let (allocation_ratio, total_working_costs) = if total_actual_paddy_for_all_paddy == 0.0 {
        (0.0, 0.0)
    } else {
        let ratio = required_actual_paddy / total_actual_paddy_for_all_paddy;
        (ratio, reference_working_costs * ratio)
    };

    let net_profit = total_by_product_revenue - rice_shortfall_cost - total_working_costs;

    tracing::debug!(
        target_rice = request.target_rice,
        required_standard_paddy,
        required_actual_paddy,
        allocation_ratio,
        net_profit,
        "calculated ACK requirements"
    );

    AckCalculationResults {
        target_rice: request.target_rice,
        out_turn_rate,
        weight_factor,
        required_standard_paddy,
        required_actual_paddy,
        actual_head_rice,
        rice_shortfall,
        rice_shortfall_cost,
        by_products,
        total_by_product_revenue,
        total_actual_paddy_for_all_paddy,
        reference_working_costs,
        allocation_ratio,
        total_working_costs,
        net_profit,
    }
}
