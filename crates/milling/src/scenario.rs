//! Milling scenario inputs.

use serde::{Deserialize, Serialize};

use millbook_core::ValueObject;

use crate::by_product::ByProductRates;
use crate::yields::{RiceType, YieldStructure};

/// Operational expense for one paddy batch, ₹.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkingCosts {
    pub electricity: f64,
    pub labour: f64,
    pub salaries: f64,
    pub hamali: f64,
    pub spares: f64,
    pub fci_expenses: f64,
    pub others: f64,
}

impl ValueObject for WorkingCosts {}

impl WorkingCosts {
    /// Sum of all seven heads, unconditionally.
    pub fn total(&self) -> f64 {
        self.electricity
            + self.labour
            + self.salaries
            + self.hamali
            + self.spares
            + self.fci_expenses
            + self.others
    }
}

/// One what-if milling run, as entered on the calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MillingScenario {
    /// Standard (contracted) paddy, quintals.
    pub paddy_quantity: f64,
    pub rice_type: RiceType,
    /// Open-market price for covering a rice shortfall, ₹/quintal.
    pub rice_purchase_rate: f64,
    pub working_costs: WorkingCosts,
    pub yields: YieldStructure,
    pub by_product_rates: ByProductRates,
    pub use_41kg_bags: bool,
}

impl Default for MillingScenario {
    fn default() -> Self {
        Self {
            paddy_quantity: 1000.0,
            rice_type: RiceType::Raw,
            rice_purchase_rate: 3500.0,
            working_costs: WorkingCosts::default(),
            yields: YieldStructure::default(),
            by_product_rates: ByProductRates::default(),
            use_41kg_bags: true,
        }
    }
}
