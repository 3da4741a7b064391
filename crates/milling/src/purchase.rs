//! Purchase/sell decision support: mill paddy, or buy finished rice?
//!
//! Unlike the CMR calculators, head rice is sold here at `rice_sale_rate`:
//! this is an open-market trading view, not a regulated delivery. The
//! break-even comparison at one ACK nets by-product revenue only against the
//! cost of milling, because the rice itself is what is being acquired.

use serde::{Deserialize, Serialize};

use crate::by_product::{self, ByProduct, ByProductKind, ByProductRates};
use crate::scenario::WorkingCosts;
use crate::yields::{ACK_QUANTITY_QUINTALS, YieldStructure, weight_factor};

/// How the quantity under analysis was entered. The two are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ProcurementMode {
    /// Paddy quantity in standard quintals.
    PaddyFirst { paddy_quantity: f64 },
    /// A rice target (usually one ACK) times a number of lots.
    RiceFirst { target_rice: f64, multiplier: f64 },
}

/// The batch whose working costs define the per-quintal cost rate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReferenceBatch {
    pub working_costs: WorkingCosts,
    /// Standard paddy of the reference batch, quintals.
    pub total_paddy_quantity: f64,
}

impl ReferenceBatch {
    /// Working cost per quintal of actual paddy; 0 without a reference.
    pub fn working_cost_rate(&self, weight_factor: f64) -> f64 {
        let actual_paddy = self.total_paddy_quantity * weight_factor;
        if actual_paddy == 0.0 {
            0.0
        } else {
            self.working_costs.total() / actual_paddy
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PurchaseAnalysisInput {
    pub mode: ProcurementMode,
    pub yields: YieldStructure,
    pub by_product_rates: ByProductRates,
    /// Market price head rice sells at, ₹/quintal.
    pub rice_sale_rate: f64,
    /// Paddy price per nominal quintal.
    pub paddy_purchase_rate: f64,
    /// Price of buying finished rice outright, ₹/quintal.
    pub direct_rice_purchase_rate: f64,
    pub use_41kg_bags: bool,
    pub reference: ReferenceBatch,
}

/// Which way of acquiring one ACK of rice costs less.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcurementOption {
    MillPaddy,
    DirectPurchase,
    /// Both options cost exactly the same.
    BreakEven,
}

/// Mill-vs-buy comparison for exactly one ACK of rice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakEvenComparison {
    pub target_rice: f64,
    pub actual_paddy: f64,
    pub paddy_cost: f64,
    pub working_costs: f64,
    pub by_product_revenue: f64,
    /// Paddy + working costs, less by-product revenue.
    pub net_cost_after_by_products: f64,
    pub direct_purchase_cost: f64,
    /// `direct_purchase_cost - net_cost_after_by_products`; negative when buying is cheaper.
    pub cost_difference: f64,
    pub cost_difference_per_quintal: f64,
    pub cheaper_option: ProcurementOption,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseAnalysis {
    pub actual_paddy: f64,
    /// Nominal paddy the purchase price is charged on (excess weight removed).
    pub effective_paddy_bags: f64,
    pub head_rice: f64,
    pub head_rice_revenue: f64,
    pub by_products: [ByProduct; 5],
    pub total_by_product_revenue: f64,
    pub total_revenue: f64,
    pub paddy_cost: f64,
    pub working_cost_rate: f64,
    pub working_costs: f64,
    pub total_cost: f64,
    pub net_profit: f64,
    /// Percent of total revenue; 0 when there is no revenue.
    pub profit_margin: f64,
    pub break_even: BreakEvenComparison,
}

impl PurchaseAnalysis {
    pub fn by_product(&self, kind: ByProductKind) -> &ByProduct {
        &self.by_products[kind as usize]
    }
}

/// Actual paddy that yields `rice` quintals of head rice.
fn actual_paddy_for_rice(rice: f64, head_rice_percent: f64) -> f64 {
    if head_rice_percent == 0.0 {
        0.0
    } else {
        rice / (head_rice_percent / 100.0)
    }
}

fn actual_paddy(input: &PurchaseAnalysisInput, weight_factor: f64) -> f64 {
    match input.mode {
        ProcurementMode::PaddyFirst { paddy_quantity } => paddy_quantity * weight_factor,
        ProcurementMode::RiceFirst {
            target_rice,
            multiplier,
        } => actual_paddy_for_rice(target_rice * multiplier, input.yields.head_rice),
    }
}

/// Run the trading analysis and the one-ACK break-even comparison.
pub fn analyze_purchase(input: &PurchaseAnalysisInput) -> PurchaseAnalysis {
    let weight_factor = weight_factor(input.use_41kg_bags);
    let actual_paddy = actual_paddy(input, weight_factor);

    let head_rice = actual_paddy * input.yields.head_rice / 100.0;
    let head_rice_revenue = head_rice * input.rice_sale_rate;
    let by_products = by_product::by_products(actual_paddy, &input.yields, &input.by_product_rates);
    let total_by_product_revenue = by_product::total_value(&by_products);
    let total_revenue = head_rice_revenue + total_by_product_revenue;

    let effective_paddy_bags = actual_paddy / weight_factor;
    let paddy_cost = effective_paddy_bags * input.paddy_purchase_rate;

    let working_cost_rate = input.reference.working_cost_rate(weight_factor);
    let working_costs = working_cost_rate * actual_paddy;

    let total_cost = paddy_cost + working_costs;
    let net_profit = total_revenue - total_cost;
    let profit_margin = if total_revenue == 0.0 {
        0.0
    } else {
        net_profit / total_revenue * 100.0
    };

    let break_even = break_even(input, weight_factor, working_cost_rate);

    tracing::debug!(
        actual_paddy,
        total_revenue,
        total_cost,
        net_profit,
        cheaper_option = ?break_even.cheaper_option,
        "analysed purchase decision"
    );

    PurchaseAnalysis {
        actual_paddy,
        effective_paddy_bags,
        head_rice,
        head_rice_revenue,
        by_products,
        total_by_product_revenue,
        total_revenue,
        paddy_cost,
        working_cost_rate,
        working_costs,
        total_cost,
        net_profit,
        profit_margin,
        break_even,
    }
}

fn break_even(
    input: &PurchaseAnalysisInput,
    weight_factor: f64,
    working_cost_rate: f64,
) -> BreakEvenComparison {
    let target_rice = ACK_QUANTITY_QUINTALS;
    let actual_paddy = actual_paddy_for_rice(target_rice, input.yields.head_rice);

    let paddy_cost = actual_paddy / weight_factor * input.paddy_purchase_rate;
    let working_costs = working_cost_rate * actual_paddy;
    let by_product_revenue = by_product::total_value(&by_product::by_products(
        actual_paddy,
        &input.yields,
        &input.by_product_rates,
    ));
    let net_cost_after_by_products = paddy_cost + working_costs - by_product_revenue;

    let direct_purchase_cost = target_rice * input.direct_rice_purchase_rate;
    let cost_difference = direct_purchase_cost - net_cost_after_by_products;
    let cost_difference_per_quintal = cost_difference.abs() / target_rice;

    let cheaper_option = if cost_difference > 0.0 {
        ProcurementOption::MillPaddy
    } else if cost_difference < 0.0 {
        ProcurementOption::DirectPurchase
    } else {
        ProcurementOption::BreakEven
    };
    let recommendation = recommendation(
        cheaper_option,
        target_rice,
        cost_difference.abs(),
        cost_difference_per_quintal,
    );

    BreakEvenComparison {
        target_rice,
        actual_paddy,
        paddy_cost,
        working_costs,
        by_product_revenue,
        net_cost_after_by_products,
        direct_purchase_cost,
        cost_difference,
        cost_difference_per_quintal,
        cheaper_option,
        recommendation,
    }
}

fn recommendation(option: ProcurementOption, target_rice: f64, saving: f64, per_quintal: f64) -> String {
    match option {
        ProcurementOption::MillPaddy => format!(
            "Milling paddy is cheaper by ₹{saving:.2} (₹{per_quintal:.2}/qtl) for {target_rice:.0} qtl of rice. Buy paddy and mill it."
        ),
        ProcurementOption::DirectPurchase => format!(
            "Buying rice directly is cheaper by ₹{saving:.2} (₹{per_quintal:.2}/qtl) for {target_rice:.0} qtl of rice. Purchase the rice instead of milling."
        ),
        ProcurementOption::BreakEven => format!(
            "Milling paddy and buying rice cost the same for {target_rice:.0} qtl of rice."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    fn rates() -> ByProductRates {
        ByProductRates {
            broken_rice: 2000.0,
            bran: 1500.0,
            param: 1000.0,
            rejection_rice: 1000.0,
            husk: 500.0,
        }
    }

    fn input(mode: ProcurementMode) -> PurchaseAnalysisInput {
        PurchaseAnalysisInput {
            mode,
            yields: YieldStructure::default(),
            by_product_rates: rates(),
            rice_sale_rate: 3500.0,
            paddy_purchase_rate: 2000.0,
            direct_rice_purchase_rate: 3300.0,
            use_41kg_bags: false,
            reference: ReferenceBatch {
                working_costs: WorkingCosts {
                    electricity: 100_000.0,
                    ..WorkingCosts::default()
                },
                total_paddy_quantity: 1000.0,
            },
        }
    }

    #[test]
    fn rice_first_with_41kg_bags_costs_fewer_nominal_quintals() {
        let mode = ProcurementMode::RiceFirst {
            target_rice: 335.0,
            multiplier: 2.0,
        };
        let standard = analyze_purchase(&input(mode));
        let heavy = analyze_purchase(&PurchaseAnalysisInput {
            use_41kg_bags: true,
            ..input(mode)
        });

        // Physical paddy needed for 670 qtl at 67% is the same either way.
        assert_close(standard.actual_paddy, 1000.0);
        assert_close(heavy.actual_paddy, 1000.0);
        assert_close(heavy.head_rice, 670.0);

        // Heavier bags mean fewer nominal quintals to pay for.
        assert_close(standard.effective_paddy_bags, 1000.0);
        assert_close(heavy.effective_paddy_bags, 1000.0 / 1.025);
        assert_close(standard.paddy_cost, 2_000_000.0);
        assert_close(heavy.paddy_cost, 2000.0 * 1000.0 / 1.025);

        // The reference rate is per actual quintal, so working costs follow suit.
        assert_close(heavy.working_cost_rate, 100_000.0 / 1025.0);
        assert_close(heavy.working_costs, 100_000.0 * 1000.0 / 1025.0);
        assert!(heavy.net_profit > standard.net_profit);
    }

    #[test]
    fn paddy_first_counts_head_rice_as_revenue() {
        let a = analyze_purchase(&input(ProcurementMode::PaddyFirst {
            paddy_quantity: 1000.0,
        }));

        assert_eq!(a.actual_paddy, 1000.0);
        assert_eq!(a.head_rice, 670.0);
        assert_eq!(a.head_rice_revenue, 670.0 * 3500.0);
        // 100*2000 + 80*1500 + 30*1000 + 20*1000 + 100*500
        assert_eq!(a.total_by_product_revenue, 420_000.0);
        assert_eq!(a.total_revenue, 2_345_000.0 + 420_000.0);
        assert_eq!(a.paddy_cost, 2_000_000.0);
        assert_eq!(a.working_cost_rate, 100.0);
        assert_eq!(a.working_costs, 100_000.0);
        assert_eq!(a.net_profit, 2_765_000.0 - 2_100_000.0);
        assert_close(a.profit_margin, 665_000.0 / 2_765_000.0 * 100.0);
    }

    #[test]
    fn paddy_cost_is_charged_on_nominal_weight() {
        let mut i = input(ProcurementMode::PaddyFirst {
            paddy_quantity: 1000.0,
        });
        i.use_41kg_bags = true;

        let a = analyze_purchase(&i);
        assert_close(a.actual_paddy, 1025.0);
        assert_close(a.effective_paddy_bags, 1000.0);
        assert_close(a.paddy_cost, 2_000_000.0);
        // Physical output scales with the excess weight.
        assert_close(a.head_rice, 686.75);
    }

    #[test]
    fn rice_first_inverts_head_rice_yield() {
        let a = analyze_purchase(&input(ProcurementMode::RiceFirst {
            target_rice: 290.0,
            multiplier: 2.0,
        }));

        assert_close(a.actual_paddy, 580.0 / 0.67);
        assert_close(a.head_rice, 580.0);
    }

    #[test]
    fn rice_first_without_head_rice_yield_is_zero() {
        let mut i = input(ProcurementMode::RiceFirst {
            target_rice: 290.0,
            multiplier: 1.0,
        });
        i.yields.head_rice = 0.0;

        let a = analyze_purchase(&i);
        assert_eq!(a.actual_paddy, 0.0);
        assert_eq!(a.total_revenue, 0.0);
        assert_eq!(a.profit_margin, 0.0);
        assert_eq!(a.break_even.actual_paddy, 0.0);
    }

    #[test]
    fn missing_reference_batch_means_no_working_costs() {
        let mut i = input(ProcurementMode::PaddyFirst {
            paddy_quantity: 500.0,
        });
        i.reference.total_paddy_quantity = 0.0;

        let a = analyze_purchase(&i);
        assert_eq!(a.working_cost_rate, 0.0);
        assert_eq!(a.working_costs, 0.0);
    }

    #[test]
    fn break_even_is_fixed_at_one_ack() {
        let small = analyze_purchase(&input(ProcurementMode::PaddyFirst {
            paddy_quantity: 10.0,
        }));
        let large = analyze_purchase(&input(ProcurementMode::PaddyFirst {
            paddy_quantity: 10_000.0,
        }));
        assert_eq!(small.break_even, large.break_even);
        assert_eq!(small.break_even.target_rice, 290.0);
    }

    #[test]
    fn break_even_excludes_head_rice_revenue() {
        let a = analyze_purchase(&input(ProcurementMode::PaddyFirst {
            paddy_quantity: 1000.0,
        }));
        let be = &a.break_even;

        let paddy = 290.0 / 0.67;
        assert_close(be.actual_paddy, paddy);
        assert_close(be.paddy_cost, paddy * 2000.0);
        assert_close(be.working_costs, paddy * 100.0);
        assert_close(be.by_product_revenue, paddy * 420.0);
        assert_close(be.net_cost_after_by_products, paddy * (2000.0 + 100.0 - 420.0));
        assert_eq!(be.direct_purchase_cost, 290.0 * 3300.0);
    }

    #[test]
    fn cheaper_option_follows_the_rice_rate() {
        // Milling one ACK nets to about 727k; buying costs 957k at 3300.
        let a = analyze_purchase(&input(ProcurementMode::PaddyFirst {
            paddy_quantity: 1000.0,
        }));
        assert_eq!(a.break_even.cheaper_option, ProcurementOption::MillPaddy);
        assert!(a.break_even.cost_difference > 0.0);
        assert!(a.break_even.recommendation.starts_with("Milling paddy is cheaper"));

        let mut i = input(ProcurementMode::PaddyFirst {
            paddy_quantity: 1000.0,
        });
        i.direct_rice_purchase_rate = 2000.0;
        let b = analyze_purchase(&i);
        assert_eq!(b.break_even.cheaper_option, ProcurementOption::DirectPurchase);
        assert!(b.break_even.cost_difference < 0.0);
        assert_close(
            b.break_even.cost_difference_per_quintal,
            b.break_even.cost_difference.abs() / 290.0,
        );
        assert!(b.break_even.recommendation.starts_with("Buying rice directly"));
    }

    #[test]
    fn equal_costs_report_break_even() {
        let mut i = input(ProcurementMode::PaddyFirst {
            paddy_quantity: 1000.0,
        });
        i.yields = YieldStructure {
            head_rice: 50.0,
            broken_rice: 0.0,
            bran: 0.0,
            param: 0.0,
            rejection_rice: 0.0,
            husk: 0.0,
        };
        i.reference.total_paddy_quantity = 0.0;
        // 580 qtl paddy at 1000 = 580_000 = 290 qtl rice at 2000.
        i.paddy_purchase_rate = 1000.0;
        i.direct_rice_purchase_rate = 2000.0;

        let a = analyze_purchase(&i);
        assert_eq!(a.break_even.cost_difference, 0.0);
        assert_eq!(a.break_even.cheaper_option, ProcurementOption::BreakEven);
    }

    #[test]
    fn mode_is_tagged_on_the_wire() {
        let mode: ProcurementMode =
            serde_json::from_str(r#"{"mode":"rice_first","target_rice":290,"multiplier":3}"#)
                .unwrap();
        assert_eq!(
            mode,
            ProcurementMode::RiceFirst {
                target_rice: 290.0,
                multiplier: 3.0
            }
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: results stay finite for any non-negative input, including zero denominators.
        #[test]
        fn analysis_is_always_finite(
            paddy_quantity in 0.0f64..100_000.0,
            head_rice in 0.0f64..100.0,
            reference_paddy in 0.0f64..100_000.0,
            rice_sale_rate in 0.0f64..10_000.0,
            use_41kg_bags in any::<bool>(),
        ) {
            let mut i = input(ProcurementMode::PaddyFirst { paddy_quantity });
            i.yields.head_rice = head_rice;
            i.reference.total_paddy_quantity = reference_paddy;
            i.rice_sale_rate = rice_sale_rate;
            i.use_41kg_bags = use_41kg_bags;

            let a = analyze_purchase(&i);
            prop_assert!(a.net_profit.is_finite());
            prop_assert!(a.profit_margin.is_finite());
            prop_assert!(a.break_even.cost_difference.is_finite());
            prop_assert_eq!(a.net_profit, a.total_revenue - (a.paddy_cost + a.working_costs));
        }
    }
}
