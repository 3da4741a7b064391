//! The five saleable milling outputs other than head rice.

use serde::{Deserialize, Serialize};

use millbook_core::ValueObject;

use crate::yields::YieldStructure;

/// By-product identity, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByProductKind {
    BrokenRice,
    Bran,
    Param,
    RejectionRice,
    Husk,
}

impl ByProductKind {
    /// Every by-product, in the fixed order results are reported in.
    pub const ALL: [ByProductKind; 5] = [
        ByProductKind::BrokenRice,
        ByProductKind::Bran,
        ByProductKind::Param,
        ByProductKind::RejectionRice,
        ByProductKind::Husk,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ByProductKind::BrokenRice => "Broken Rice",
            ByProductKind::Bran => "Bran",
            ByProductKind::Param => "Param (Short Broken)",
            ByProductKind::RejectionRice => "Rejection Rice",
            ByProductKind::Husk => "Husk",
        }
    }

    /// This by-product's share of actual paddy, in percent.
    pub fn yield_percent(self, yields: &YieldStructure) -> f64 {
        match self {
            ByProductKind::BrokenRice => yields.broken_rice,
            ByProductKind::Bran => yields.bran,
            ByProductKind::Param => yields.param,
            ByProductKind::RejectionRice => yields.rejection_rice,
            ByProductKind::Husk => yields.husk,
        }
    }
}

impl core::fmt::Display for ByProductKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sale rates per by-product, ₹/quintal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ByProductRates {
    pub broken_rice: f64,
    pub bran: f64,
    pub param: f64,
    pub rejection_rice: f64,
    pub husk: f64,
}

impl ValueObject for ByProductRates {}

impl ByProductRates {
    pub fn rate(&self, kind: ByProductKind) -> f64 {
        match kind {
            ByProductKind::BrokenRice => self.broken_rice,
            ByProductKind::Bran => self.bran,
            ByProductKind::Param => self.param,
            ByProductKind::RejectionRice => self.rejection_rice,
            ByProductKind::Husk => self.husk,
        }
    }
}

impl Default for ByProductRates {
    fn default() -> Self {
        Self {
            broken_rice: 2200.0,
            bran: 1800.0,
            param: 1600.0,
            rejection_rice: 1200.0,
            husk: 400.0,
        }
    }
}

/// One derived by-product line. Recomputed on every call, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ByProduct {
    pub kind: ByProductKind,
    pub name: &'static str,
    pub yield_percent: f64,
    /// Quintals.
    pub quantity: f64,
    /// ₹/quintal.
    pub rate: f64,
    /// `quantity × rate`, unrounded.
    pub value: f64,
}

impl ByProduct {
    pub fn new(kind: ByProductKind, actual_paddy: f64, yield_percent: f64, rate: f64) -> Self {
        let quantity = actual_paddy * yield_percent / 100.0;
        Self {
            kind,
            name: kind.name(),
            yield_percent,
            quantity,
            rate,
            value: quantity * rate,
        }
    }
}

/// All five by-products for a given actual paddy weight.
pub(crate) fn by_products(
    actual_paddy: f64,
    yields: &YieldStructure,
    rates: &ByProductRates,
) -> [ByProduct; 5] {
    ByProductKind::ALL
        .map(|kind| ByProduct::new(kind, actual_paddy, kind.yield_percent(yields), rates.rate(kind)))
}

pub(crate) fn total_value(products: &[ByProduct]) -> f64 {
    products.iter().map(|p| p.value).sum()
}
