//! Fixed milling constants and the yield structure.

use serde::{Deserialize, Serialize};

use millbook_core::ValueObject;

/// Share of *standard* paddy weight the CMR programme requires back as raw rice.
pub const OUT_TURN_RAW: f64 = 0.67;

/// Share of *standard* paddy weight the CMR programme requires back as boiled rice.
pub const OUT_TURN_BOILED: f64 = 0.68;

/// A nominal 40 kg bag actually holds up to 41 kg (2.5% excess).
pub const BAG_WEIGHT_FACTOR_41KG: f64 = 1.025;

/// Bags weighed at their nominal 40 kg.
pub const STANDARD_WEIGHT_FACTOR: f64 = 1.0;

/// One ACK, the administrative CMR delivery unit, in quintals of rice.
pub const ACK_QUANTITY_QUINTALS: f64 = 290.0;

/// The six yield percentages are expected to add up to this.
pub const YIELD_TOTAL_TARGET: f64 = 100.0;

const YIELD_TOTAL_TOLERANCE: f64 = 1e-9;

/// Rice produced for the CMR programme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiceType {
    #[default]
    Raw,
    Boiled,
}

impl RiceType {
    pub fn out_turn_rate(self) -> f64 {
        match self {
            RiceType::Raw => OUT_TURN_RAW,
            RiceType::Boiled => OUT_TURN_BOILED,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiceType::Raw => "raw",
            RiceType::Boiled => "boiled",
        }
    }
}

impl core::fmt::Display for RiceType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Out-turn rate for a rice type.
pub fn out_turn_rate(rice_type: RiceType) -> f64 {
    rice_type.out_turn_rate()
}

/// Multiplier from standard (contracted) paddy weight to actual milled weight.
pub fn weight_factor(use_41kg_bags: bool) -> f64 {
    if use_41kg_bags {
        BAG_WEIGHT_FACTOR_41KG
    } else {
        STANDARD_WEIGHT_FACTOR
    }
}

/// Milling outputs as percentages of *actual* paddy weight.
///
/// The six figures should add up to 100. That is a soft invariant: nothing
/// here normalises or rejects a structure that doesn't, results simply scale
/// with whatever was entered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldStructure {
    pub head_rice: f64,
    pub broken_rice: f64,
    pub bran: f64,
    /// Short broken rice.
    pub param: f64,
    pub rejection_rice: f64,
    pub husk: f64,
}

impl ValueObject for YieldStructure {}

impl YieldStructure {
    pub fn total(&self) -> f64 {
        self.head_rice + self.broken_rice + self.bran + self.param + self.rejection_rice + self.husk
    }

    /// Whether the percentages add up to 100 (display check only).
    pub fn is_balanced(&self) -> bool {
        (self.total() - YIELD_TOTAL_TARGET).abs() < YIELD_TOTAL_TOLERANCE
    }
}

impl Default for YieldStructure {
    fn default() -> Self {
        Self {
            head_rice: 67.0,
            broken_rice: 10.0,
            bran: 8.0,
            param: 3.0,
            rejection_rice: 2.0,
            husk: 10.0,
        }
    }
}

/// Sum of all six yield percentages.
pub fn calculate_total_yield(yields: &YieldStructure) -> f64 {
    yields.total()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_turn_selection_is_exact() {
        assert_eq!(out_turn_rate(RiceType::Raw), 0.67);
        assert_eq!(out_turn_rate(RiceType::Boiled), 0.68);
    }

    #[test]
    fn weight_factor_selection_is_exact() {
        assert_eq!(weight_factor(true), 1.025);
        assert_eq!(weight_factor(false), 1.0);
    }

    #[test]
    fn default_yields_total_one_hundred() {
        let yields = YieldStructure::default();
        assert_eq!(calculate_total_yield(&yields), 100.0);
        assert!(yields.is_balanced());
    }

    #[test]
    fn unbalanced_yields_are_reported_not_corrected() {
        let yields = YieldStructure {
            head_rice: 60.0,
            ..YieldStructure::default()
        };
        assert_eq!(yields.total(), 93.0);
        assert!(!yields.is_balanced());
        assert_eq!(yields.head_rice, 60.0);
    }

    #[test]
    fn rice_type_uses_lowercase_on_the_wire() {
        assert_eq!(serde_json::to_string(&RiceType::Boiled).unwrap(), "\"boiled\"");
        let parsed: RiceType = serde_json::from_str("\"raw\"").unwrap();
        assert_eq!(parsed, RiceType::Raw);
    }
}
