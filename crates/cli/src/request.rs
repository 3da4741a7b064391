//! Request/response shapes for the command.

use serde::{Deserialize, Serialize};

use millbook_milling::{
    AckCalculationResults, AckRequest, CalculationResults, MillingScenario, PurchaseAnalysis,
    PurchaseAnalysisInput, analyze_purchase, calculate_ack_requirements, calculate_results,
};

use crate::config::CliConfig;

/// One calculation, keyed by calculator:
/// `{"calculate": {...}}`, `{"ack": {...}}`, `{"ack_for_scenario": {...}}`, `{"purchase": {...}}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Request {
    Calculate(MillingScenario),
    Ack(AckRequest),
    /// ACK against a calculator scenario; target defaults to the configured ACK size.
    AckForScenario {
        scenario: MillingScenario,
        #[serde(default)]
        target_rice: Option<f64>,
    },
    Purchase(PurchaseAnalysisInput),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Calculation(CalculationResults),
    Ack(AckCalculationResults),
    Purchase(PurchaseAnalysis),
}

pub fn handle(request: &Request, config: &CliConfig) -> Response {
    match request {
        Request::Calculate(scenario) => Response::Calculation(calculate_results(scenario)),
        Request::Ack(ack) => Response::Ack(calculate_ack_requirements(ack)),
        Request::AckForScenario {
            scenario,
            target_rice,
        } => {
            let target = target_rice.unwrap_or(config.ack_quantity);
            Response::Ack(calculate_ack_requirements(&AckRequest::from_scenario(
                target, scenario,
            )))
        }
        Request::Purchase(input) => Response::Purchase(analyze_purchase(input)),
    }
}
