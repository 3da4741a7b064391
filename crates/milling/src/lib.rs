//! Milling yield and financial calculation engine.
//!
//! Pure, synchronous arithmetic over a milling scenario: no IO, no shared
//! state, no failure modes. Callers sanitise their inputs first (see
//! `millbook_core::input`) and render the plain numbers that come back.
//!
//! Three entry points share the same constants and per-quintal formulas:
//! - [`calculate_results`]: paddy in, CMR obligation / by-products / net balance out.
//! - [`calculate_ack_requirements`]: target rice in, paddy required and
//!   prorated costs out.
//! - [`analyze_purchase`]: mill-paddy vs. buy-rice comparison.

pub mod ack;
pub mod by_product;
pub mod engine;
pub mod purchase;
pub mod scenario;
pub mod yields;

pub use ack::{AckCalculationResults, AckRequest, acks_for_rice, calculate_ack_requirements};
pub use by_product::{ByProduct, ByProductKind, ByProductRates};
pub use engine::{CalculationResults, calculate_results};
pub use purchase::{
    BreakEvenComparison, ProcurementMode, ProcurementOption, PurchaseAnalysis,
    PurchaseAnalysisInput, ReferenceBatch, analyze_purchase,
};
pub use scenario::{MillingScenario, WorkingCosts};
pub use yields::{
    ACK_QUANTITY_QUINTALS, BAG_WEIGHT_FACTOR_41KG, OUT_TURN_BOILED, OUT_TURN_RAW, RiceType,
    STANDARD_WEIGHT_FACTOR, YIELD_TOTAL_TARGET, YieldStructure, calculate_total_yield,
    out_turn_rate, weight_factor,
};
